//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the application and the outside world. Adapters implement these ports.
//!
//! - `FreightRepository` - Record store for freight records
//! - `FileStorage` - Upload of map images and invoices
//! - `ReferenceCatalog` - Truck types and carriers
//! - `EventPublisher` - Publishing domain events

mod event_publisher;
mod file_storage;
mod freight_repository;
mod reference_catalog;

pub use event_publisher::EventPublisher;
pub use file_storage::{FileStorage, FileUpload, StorageError, StoredFile};
pub use freight_repository::FreightRepository;
pub use reference_catalog::ReferenceCatalog;
