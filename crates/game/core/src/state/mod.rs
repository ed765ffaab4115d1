//! State owned by the simulation controllers.
//!
//! Each controller in [`crate::engine`] exclusively owns one of these records.
//! Nothing here is shared for writing; other components read through the
//! owning controller's accessors.
mod entity;
mod heat;
mod monitor;
mod types;

pub use entity::{EntityPath, EntityPhase, EntityState, EntityStatus};
pub use heat::HeatState;
pub use monitor::MonitorState;
pub use types::{AiLevel, Location, RoomId, Timestamp};
