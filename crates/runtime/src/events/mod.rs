//! Topic-based event bus for session events.
//!
//! Core notifications are mapped onto typed events and published to a topic;
//! consumers subscribe only to the topics they need.

mod bus;
mod types;

pub use bus::{Event, EventBus, Topic};
pub use types::{EntityEvent, HeatEvent};
