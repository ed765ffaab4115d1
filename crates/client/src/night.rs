//! Drives one night of a [`Session`] against the wall clock.

use std::time::Duration;

use game_core::Timestamp;
use runtime::Session;
use tokio::time::{MissedTickBehavior, interval};

use crate::guard::GuardPolicy;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NightOutcome {
    Survived,
    /// The entity reached the office during the frame ending at `at`.
    Attacked { at: Timestamp },
}

pub struct NightRunner {
    session: Session,
    guard: GuardPolicy,
    frame_ms: u64,
    night_ms: u64,
}

impl NightRunner {
    pub fn new(session: Session, guard: GuardPolicy, frame_ms: u64, night_ms: u64) -> Self {
        Self {
            session,
            guard,
            frame_ms: frame_ms.max(1),
            night_ms,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Starts the entity's decision loop for the night.
    pub fn begin(&mut self) {
        self.session.start_entity();
    }

    /// Lets the guard act, then advances one frame.
    pub fn step(&mut self) -> Option<NightOutcome> {
        if self.session.has_attacked() {
            return Some(NightOutcome::Attacked {
                at: self.session.elapsed(),
            });
        }

        self.guard.act(&mut self.session);
        self.session.frame(self.frame_ms);

        if self.session.has_attacked() {
            return Some(NightOutcome::Attacked {
                at: self.session.elapsed(),
            });
        }
        if self.session.elapsed().as_millis() >= self.night_ms {
            return Some(NightOutcome::Survived);
        }
        None
    }

    /// Steps once per `tick` of wall-clock time until the night ends.
    pub async fn run(mut self, tick: Duration) -> NightOutcome {
        let mut ticker = interval(tick);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            ticker.tick().await;
            if let Some(outcome) = self.step() {
                return outcome;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::{Difficulty, ScriptedRng};

    fn runner(rolls: impl IntoIterator<Item = u32>, night_ms: u64) -> NightRunner {
        let session = Session::builder()
            .difficulty(Difficulty::Normal)
            .rng(ScriptedRng::new(rolls))
            .build()
            .unwrap();
        NightRunner::new(session, GuardPolicy::default(), 1_000, night_ms)
    }

    #[test]
    fn test_survives_when_entity_never_moves() {
        let mut runner = runner([20], 60_000);
        runner.begin();

        let mut outcome = None;
        let mut frames = 0;
        while outcome.is_none() {
            outcome = runner.step();
            frames += 1;
        }

        assert_eq!(outcome, Some(NightOutcome::Survived));
        assert_eq!(frames, 60);
        assert!(!runner.session().is_overheated());
    }

    #[test]
    fn test_lucky_entity_wins_despite_guard() {
        let mut runner = runner([1], 360_000);
        runner.begin();

        let mut outcome = None;
        while outcome.is_none() {
            outcome = runner.step();
        }

        assert_eq!(
            outcome,
            Some(NightOutcome::Attacked {
                at: Timestamp(40_000)
            })
        );
    }

    #[test]
    fn test_guard_keeps_heat_below_overheat() {
        let mut runner = runner([20], 600_000);
        runner.begin();

        for _ in 0..600 {
            runner.step();
            assert!(!runner.session().is_overheated());
        }
    }
}
