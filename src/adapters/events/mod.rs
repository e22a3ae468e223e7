//! Event bus adapters.
//!
//! - `InMemoryEventBus` - Captures published envelopes in process

mod in_memory;

pub use in_memory::InMemoryEventBus;
