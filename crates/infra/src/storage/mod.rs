//! File storage backends

mod local;

pub use local::LocalFileStore;
