//! Static camera catalog of the server room facility.

use crate::state::RoomId;

/// Display metadata for one camera.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RoomInfo {
    pub id: RoomId,
    pub name: &'static str,
    pub description: &'static str,
}

impl RoomInfo {
    /// Monitor header, e.g. `CAM 03 - SERVER ROOM`.
    pub fn label(&self) -> String {
        format!("{} - {}", self.id, self.name)
    }
}

pub static ROOMS: [RoomInfo; 5] = [
    RoomInfo {
        id: RoomId(1),
        name: "ENTRANCE",
        description: "Main data center door. Access locked.",
    },
    RoomInfo {
        id: RoomId(2),
        name: "HALLWAY A",
        description: "East hallway. Flickering lights.",
    },
    RoomInfo {
        id: RoomId(3),
        name: "SERVER ROOM",
        description: "Core hall. Active racks detected.",
    },
    RoomInfo {
        id: RoomId(4),
        name: "HALLWAY B",
        description: "West hallway. Temperature rising.",
    },
    RoomInfo {
        id: RoomId(5),
        name: "STORAGE",
        description: "Storage area. Movement detected.",
    },
];

pub fn room_info(id: RoomId) -> Option<&'static RoomInfo> {
    ROOMS.iter().find(|room| room.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::EntityPath;

    #[test]
    fn every_path_room_is_in_catalog() {
        for room in EntityPath::server_room().rooms() {
            assert!(room_info(*room).is_some(), "{room} missing");
        }
    }

    #[test]
    fn label_pads_camera_number() {
        let info = room_info(RoomId(3)).unwrap();
        assert_eq!(info.label(), "CAM 03 - SERVER ROOM");
        assert_eq!(room_info(RoomId(9)), None);
    }
}
