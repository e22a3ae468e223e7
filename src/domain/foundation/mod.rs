//! Foundation module - Shared domain primitives.
//!
//! Contains identifiers, timestamps, the state machine trait, event
//! infrastructure and error types used by every other domain module.

mod command;
mod errors;
mod events;
mod ids;
mod state_machine;
mod timestamp;

pub use command::CommandMetadata;
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use events::{
    domain_event, DomainEvent, EventEnvelope, EventId, EventMetadata, SerializableDomainEvent,
};
pub use ids::{FreightId, UserId};
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
