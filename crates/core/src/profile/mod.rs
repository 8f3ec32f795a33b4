//! Profile management: upsert, photo replacement, validation

pub mod ports;
pub mod service;
pub mod validation;
