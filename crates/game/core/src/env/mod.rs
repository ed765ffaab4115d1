//! Capabilities the simulation borrows from its host.
//!
//! The rules never read a wall clock or an ambient RNG. Randomness comes from a
//! [`RandomSource`] and periodic work from a [`Scheduler`], both injected by the
//! caller so sessions can be replayed exactly.
mod rng;
mod scheduler;

pub use rng::{RandomSource, ScriptedRng};
pub use scheduler::{Scheduler, TimerFire, TimerHandle, VirtualScheduler};
