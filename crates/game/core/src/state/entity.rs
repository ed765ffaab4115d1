use super::{AiLevel, Location, RoomId};
use crate::error::PathError;

/// Fixed route the entity walks, ending in the terminal attack marker.
///
/// Only the rooms are stored; the terminal marker sits implicitly at index
/// `rooms.len()`, so [`EntityPath::len`] counts it.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "Vec<RoomId>", into = "Vec<RoomId>")
)]
pub struct EntityPath {
    rooms: Vec<RoomId>,
}

impl EntityPath {
    pub fn new(rooms: impl IntoIterator<Item = RoomId>) -> Result<Self, PathError> {
        let rooms: Vec<RoomId> = rooms.into_iter().collect();
        if rooms.is_empty() {
            return Err(PathError::Empty);
        }
        Ok(Self { rooms })
    }

    /// Storage room through both hallways and the entrance, then the office.
    pub fn server_room() -> Self {
        Self {
            rooms: [5, 4, 3, 2, 1].into_iter().map(RoomId).collect(),
        }
    }

    /// Number of positions including the terminal marker.
    pub fn len(&self) -> usize {
        self.rooms.len() + 1
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    /// Index of the terminal marker.
    pub fn terminal_index(&self) -> usize {
        self.rooms.len()
    }

    pub fn rooms(&self) -> &[RoomId] {
        &self.rooms
    }

    /// Location at `index`. Anything at or past the terminal index is terminal.
    pub fn location(&self, index: usize) -> Location {
        self.rooms
            .get(index)
            .copied()
            .map_or(Location::Terminal, Location::Room)
    }
}

impl TryFrom<Vec<RoomId>> for EntityPath {
    type Error = PathError;

    fn try_from(rooms: Vec<RoomId>) -> Result<Self, Self::Error> {
        Self::new(rooms)
    }
}

impl From<EntityPath> for Vec<RoomId> {
    fn from(path: EntityPath) -> Self {
        path.rooms
    }
}

impl Default for EntityPath {
    fn default() -> Self {
        Self::server_room()
    }
}

/// Mutable progress of the entity along its path.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntityState {
    pub path_index: usize,
    pub level: AiLevel,
    pub running: bool,
}

impl EntityState {
    pub const fn new(level: AiLevel) -> Self {
        Self {
            path_index: 0,
            level,
            running: false,
        }
    }
}

/// Coarse lifecycle of the entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "lowercase")]
pub enum EntityPhase {
    /// Not running and not at the terminal position.
    Idle,
    /// Running with a room location.
    Moving,
    /// Reached the terminal position. Absorbing until reset.
    Attacking,
}

/// Read-only snapshot for HUD rendering and debugging.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntityStatus {
    pub location: Location,
    pub level: AiLevel,
    pub running: bool,
    pub next_room: Location,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_room_path_counts_terminal_marker() {
        let path = EntityPath::server_room();

        assert_eq!(path.len(), 6);
        assert_eq!(path.terminal_index(), 5);
        assert_eq!(path.location(0), Location::Room(RoomId(5)));
        assert_eq!(path.location(4), Location::Room(RoomId(1)));
        assert_eq!(path.location(5), Location::Terminal);
        assert_eq!(path.location(42), Location::Terminal);
    }

    #[test]
    fn empty_path_is_rejected() {
        assert_eq!(EntityPath::new([]), Err(PathError::Empty));
    }
}
