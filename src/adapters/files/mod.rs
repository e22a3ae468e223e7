//! File storage adapters for map images and invoices.

mod in_memory;
mod local;

pub use in_memory::InMemoryFileStorage;
pub use local::{LocalFileStorage, DEFAULT_MAX_UPLOAD_BYTES};
