//! Event types for different topics.

use game_core::{AiLevel, Notification, RoomId, Timestamp};
use serde::{Deserialize, Serialize};

/// Camera heat and overheat lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HeatEvent {
    /// Rounded heat percentage changed.
    Changed { percent: u8 },
    /// Cameras locked; monitor forced closed.
    OverheatStarted,
    /// Cooldown over; cameras available again.
    OverheatEnded,
}

/// Entity movement along its path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityEvent {
    Moved { location: RoomId, at: Timestamp },
    Attacked { at: Timestamp, level: AiLevel },
}

impl From<Notification> for super::Event {
    fn from(notification: Notification) -> Self {
        use super::Event;

        match notification {
            Notification::HeatChanged { percent } => Event::Heat(HeatEvent::Changed { percent }),
            Notification::OverheatStarted => Event::Heat(HeatEvent::OverheatStarted),
            Notification::OverheatEnded => Event::Heat(HeatEvent::OverheatEnded),
            Notification::EntityMoved { location, at } => {
                Event::Entity(EntityEvent::Moved { location, at })
            }
            Notification::EntityAttacked { at, level } => {
                Event::Entity(EntityEvent::Attacked { at, level })
            }
        }
    }
}
