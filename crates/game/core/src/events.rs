//! Typed notifications emitted by the controllers.
//!
//! The core never talks to presentation code directly. Every observable change
//! is pushed through a [`NotificationSink`] supplied by the caller, synchronously
//! and in the order the changes happen.

use crate::state::{AiLevel, RoomId, Timestamp};

/// Something the presentation layer may want to react to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Notification {
    /// Rounded heat percentage changed.
    HeatChanged { percent: u8 },
    /// Heat hit the ceiling; the monitor was forced closed.
    OverheatStarted,
    /// Cooldown finished; heat is back to zero.
    OverheatEnded,
    /// The entity moved into a new room.
    EntityMoved { location: RoomId, at: Timestamp },
    /// The entity reached the terminal position.
    EntityAttacked { at: Timestamp, level: AiLevel },
}

/// Receiver of [`Notification`]s.
pub trait NotificationSink {
    fn notify(&mut self, notification: Notification);
}

/// Collects notifications in order. Handy for tests and replay tools.
impl NotificationSink for Vec<Notification> {
    fn notify(&mut self, notification: Notification) {
        self.push(notification);
    }
}

impl<S: NotificationSink + ?Sized> NotificationSink for &mut S {
    fn notify(&mut self, notification: Notification) {
        (**self).notify(notification);
    }
}
