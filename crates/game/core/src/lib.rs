//! Deterministic rules of The Server Room.
//!
//! `game-core` holds the heat/overheat controller, the camera monitor and the
//! entity's movement state machine, plus the capability traits they run on.
//! It owns no clock and no randomness: callers inject a [`Scheduler`] and a
//! [`RandomSource`] and receive every observable change as a [`Notification`].
//! The `runtime` crate composes these pieces into a playable session.
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod events;
pub mod rooms;
pub mod save;
pub mod state;

pub use config::{Difficulty, DifficultyPreset, GameConfig};
pub use engine::{
    Advance, CameraMonitor, EntityAi, EntityContext, HeatController, HeatStep, MoveOutcome,
};
pub use env::{
    RandomSource, Scheduler, ScriptedRng, TimerFire, TimerHandle, VirtualScheduler,
};
pub use error::{ConfigError, PathError};
pub use events::{Notification, NotificationSink};
pub use rooms::{ROOMS, RoomInfo, room_info};
pub use save::SaveRecord;
pub use state::{
    AiLevel, EntityPath, EntityPhase, EntityState, EntityStatus, HeatState, Location,
    MonitorState, RoomId, Timestamp,
};
