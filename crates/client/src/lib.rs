//! Headless client for The Server Room.
//!
//! Plays one night per launch: the saved profile picks the difficulty, an
//! autopilot guard works the cameras, and surviving advances the save.
pub mod config;
pub mod guard;
pub mod logging;
pub mod night;

pub use config::ClientConfig;
pub use guard::{GuardAction, GuardPolicy, GuardView};
pub use night::{NightOutcome, NightRunner};
