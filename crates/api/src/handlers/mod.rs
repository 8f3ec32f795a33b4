//! HTTP request handlers

pub mod profiles;
