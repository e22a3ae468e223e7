//! Adapters - Implementations of port interfaces.
//!
//! - `freight` - Record stores (in-memory, JSON file)
//! - `files` - Upload storage (in-memory, local directory)
//! - `reference` - Truck type and carrier catalog
//! - `events` - Event bus implementations

pub mod events;
pub mod files;
pub mod freight;
pub mod reference;

pub use events::InMemoryEventBus;
pub use files::{InMemoryFileStorage, LocalFileStorage};
pub use freight::{InMemoryFreightRepository, JsonFileFreightRepository};
pub use reference::InMemoryReferenceCatalog;
