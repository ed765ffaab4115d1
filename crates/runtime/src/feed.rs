//! Read models for HUD rendering.

use game_core::{Location, RoomId, Timestamp, room_info};

/// What the monitor shows for the observed room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CameraFeed {
    pub room: RoomId,
    /// Header such as `CAM 05 - STORAGE`.
    pub label: String,
    pub description: &'static str,
    /// The entity is standing in this room.
    pub motion_detected: bool,
}

impl CameraFeed {
    pub fn new(room: RoomId, entity_location: Location) -> Self {
        let (label, description) = match room_info(room) {
            Some(info) => (info.label(), info.description),
            None => (room.to_string(), ""),
        };
        Self {
            room,
            label,
            description,
            motion_detected: entity_location == Location::Room(room),
        }
    }
}

/// Formats elapsed session time as `mm:ss`.
pub fn format_clock(elapsed: Timestamp) -> String {
    let total_seconds = elapsed.as_millis() / 1_000;
    format!("{:02}:{:02}", total_seconds / 60, total_seconds % 60)
}
