//! Controllers that mutate the simulation state.
//!
//! Each controller owns exactly one state record and receives the others by
//! reference for the duration of a call:
//!
//! - [`HeatController`] owns heat and overheat; it polls the monitor and may
//!   force it closed.
//! - [`CameraMonitor`] owns the observed room; it reads the overheat flag to
//!   gate switches.
//! - [`EntityAi`] owns the entity's progress; it reads the observed room to
//!   apply the freeze penalty.

mod entity;
mod heat;
mod monitor;

pub use entity::{Advance, EntityAi, EntityContext, MoveOutcome};
pub use heat::{HeatController, HeatStep};
pub use monitor::CameraMonitor;
