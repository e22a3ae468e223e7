//! Freight record store adapters.
//!
//! - `InMemoryFreightRepository` - map-backed, for tests and demos
//! - `JsonFileFreightRepository` - single JSON document file on disk

mod in_memory;
mod json_file;

pub use in_memory::InMemoryFreightRepository;
pub use json_file::JsonFileFreightRepository;
