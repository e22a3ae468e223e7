//! Reference module - Read-only catalog entities.

mod carrier;
mod truck_type;

pub use carrier::Carrier;
pub use truck_type::{truck_types_for, TruckType};
