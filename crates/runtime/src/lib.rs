//! Runtime orchestration for The Server Room.
//!
//! This crate composes the deterministic controllers from `game-core` into a
//! playable [`Session`]: one heat controller, one camera monitor and one
//! entity sharing a virtual scheduler, a seeded random source and an event
//! bus. Hosts drive the session frame by frame and persist progress through a
//! [`SaveRepository`].
//!
//! Modules are organized by responsibility:
//! - [`session`] hosts the orchestrator and builder
//! - [`events`] provides the topic-based event bus
//! - [`repository`] persists the save record
//! - [`feed`] builds read models for rendering
pub mod error;
pub mod events;
pub mod feed;
pub mod repository;
pub mod rng;
pub mod session;

pub use error::{Result, RuntimeError};
pub use events::{EntityEvent, Event, EventBus, HeatEvent, Topic};
pub use feed::{CameraFeed, format_clock};
pub use repository::{
    FileSaveRepository, InMemorySaveRepository, RepositoryError, SaveRepository,
};
pub use rng::SeededRng;
pub use session::{FrameReport, HeatFrame, Session, SessionBuilder, SessionConfig};
