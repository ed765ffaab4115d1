use super::RoomId;

/// Which camera, if any, the player is looking through.
///
/// The observed room is `Some` exactly when the monitor is open, so the two
/// facts are stored as one field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MonitorState {
    observed_room: Option<RoomId>,
}

impl MonitorState {
    pub const fn new() -> Self {
        Self {
            observed_room: None,
        }
    }

    pub const fn is_open(&self) -> bool {
        self.observed_room.is_some()
    }

    pub const fn observed_room(&self) -> Option<RoomId> {
        self.observed_room
    }

    pub(crate) fn set_observed(&mut self, room: Option<RoomId>) {
        self.observed_room = room;
    }
}
