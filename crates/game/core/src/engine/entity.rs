use crate::config::DifficultyPreset;
use crate::env::{RandomSource, Scheduler, TimerFire, TimerHandle};
use crate::events::{Notification, NotificationSink};
use crate::state::{
    AiLevel, EntityPath, EntityPhase, EntityState, EntityStatus, Location, RoomId, Timestamp,
};

use super::CameraMonitor;

/// Everything a move attempt borrows from the session for one call.
pub struct EntityContext<'a> {
    pub scheduler: &'a mut dyn Scheduler,
    pub rng: &'a mut dyn RandomSource,
    pub monitor: &'a CameraMonitor,
    pub sink: &'a mut dyn NotificationSink,
    pub now: Timestamp,
}

/// Result of [`EntityAi::advance`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Advance {
    Moved(RoomId),
    Attacked,
}

/// Result of one [`EntityAi::attempt_move`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Already at the terminal position; nothing was rolled.
    AlreadyAttacking,
    Rolled {
        roll: u32,
        threshold: u8,
        /// The player was watching the entity's room.
        frozen: bool,
        /// `None` when the roll missed.
        advance: Option<Advance>,
    },
}

impl MoveOutcome {
    pub const fn advanced(&self) -> Option<Advance> {
        match self {
            Self::Rolled { advance, .. } => *advance,
            Self::AlreadyAttacking => None,
        }
    }
}

/// The entity's movement state machine.
///
/// Owns [`EntityState`] and at most one live decision timer. Every transition
/// that can cancel the timer goes through [`EntityAi::stop`], so a replaced or
/// cancelled timer never keeps driving the state.
#[derive(Clone, Debug)]
pub struct EntityAi {
    path: EntityPath,
    state: EntityState,
    interval_ms: u64,
    timer: Option<TimerHandle>,
}

impl EntityAi {
    pub fn new(path: EntityPath, preset: DifficultyPreset) -> Self {
        Self {
            path,
            state: EntityState::new(preset.level),
            interval_ms: preset.interval_ms.max(1),
            timer: None,
        }
    }

    pub fn path(&self) -> &EntityPath {
        &self.path
    }

    pub fn state(&self) -> &EntityState {
        &self.state
    }

    pub fn path_index(&self) -> usize {
        self.state.path_index
    }

    pub fn location(&self) -> Location {
        self.path.location(self.state.path_index)
    }

    pub fn level(&self) -> AiLevel {
        self.state.level
    }

    pub fn is_running(&self) -> bool {
        self.state.running
    }

    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }

    /// Handle of the live decision timer, if any.
    pub fn timer(&self) -> Option<TimerHandle> {
        self.timer
    }

    pub fn phase(&self) -> EntityPhase {
        if self.location().is_terminal() {
            EntityPhase::Attacking
        } else if self.state.running {
            EntityPhase::Moving
        } else {
            EntityPhase::Idle
        }
    }

    pub fn status(&self) -> EntityStatus {
        EntityStatus {
            location: self.location(),
            level: self.state.level,
            running: self.state.running,
            next_room: self.path.location(self.state.path_index + 1),
        }
    }

    /// Starts the decision loop: one immediate attempt, then one per interval.
    ///
    /// Returns `None` when already running.
    pub fn start(&mut self, ctx: &mut EntityContext<'_>) -> Option<MoveOutcome> {
        if self.state.running {
            return None;
        }

        self.state.running = true;
        let outcome = self.attempt_move(ctx);

        // The immediate attempt may already have ended the run.
        if self.state.running {
            self.timer = Some(ctx.scheduler.schedule(self.interval_ms));
        }
        Some(outcome)
    }

    /// Handles a timer expiry. Fires from any timer other than the current
    /// one are stale and ignored.
    pub fn on_timer(&mut self, fire: TimerFire, ctx: &mut EntityContext<'_>) -> Option<MoveOutcome> {
        if self.timer != Some(fire.handle) {
            return None;
        }
        Some(self.attempt_move(ctx))
    }

    /// Rolls a d20 against the current threshold and advances on success.
    pub fn attempt_move(&mut self, ctx: &mut EntityContext<'_>) -> MoveOutcome {
        let location = self.location();
        if location.is_terminal() {
            self.stop(ctx.scheduler);
            return MoveOutcome::AlreadyAttacking;
        }

        let frozen = location.room().is_some() && ctx.monitor.current_room() == location.room();
        let threshold = if frozen {
            self.state.level.frozen_threshold()
        } else {
            self.state.level.get()
        };

        let roll = ctx.rng.roll_d20();
        let advance = if roll <= u32::from(threshold) {
            self.advance(ctx)
        } else {
            None
        };

        MoveOutcome::Rolled {
            roll,
            threshold,
            frozen,
            advance,
        }
    }

    /// Moves one step along the path and emits the matching notification.
    ///
    /// Reaching the terminal position stops the decision loop. Does nothing
    /// once the entity is already there.
    pub fn advance(&mut self, ctx: &mut EntityContext<'_>) -> Option<Advance> {
        if self.location().is_terminal() {
            return None;
        }

        self.state.path_index += 1;
        match self.location() {
            Location::Terminal => {
                self.stop(ctx.scheduler);
                ctx.sink.notify(Notification::EntityAttacked {
                    at: ctx.now,
                    level: self.state.level,
                });
                Some(Advance::Attacked)
            }
            Location::Room(room) => {
                ctx.sink.notify(Notification::EntityMoved {
                    location: room,
                    at: ctx.now,
                });
                Some(Advance::Moved(room))
            }
        }
    }

    /// Debug hook: advances without rolling.
    pub fn force_move(&mut self, ctx: &mut EntityContext<'_>) -> Option<Advance> {
        self.advance(ctx)
    }

    /// Cancels the decision timer. Safe to call when not running.
    pub fn stop(&mut self, scheduler: &mut dyn Scheduler) {
        if let Some(handle) = self.timer.take() {
            scheduler.cancel(handle);
        }
        self.state.running = false;
    }

    /// Stops and returns to the first room. The level is kept.
    pub fn reset(&mut self, scheduler: &mut dyn Scheduler) {
        self.stop(scheduler);
        self.state.path_index = 0;
    }

    /// Takes effect on the next attempt.
    pub fn set_level(&mut self, level: AiLevel) {
        self.state.level = level;
    }

    /// Changes the decision period. A live timer is cancelled and replaced
    /// in the same call, keeping the current position. Returns true when a
    /// timer was restarted.
    pub fn set_interval(&mut self, period_ms: u64, scheduler: &mut dyn Scheduler) -> bool {
        self.interval_ms = period_ms.max(1);

        if !self.state.running {
            return false;
        }
        let Some(old) = self.timer.take() else {
            return false;
        };
        scheduler.cancel(old);
        self.timer = Some(scheduler.schedule(self.interval_ms));
        true
    }

    /// Applies both halves of a difficulty preset.
    pub fn apply_preset(&mut self, preset: DifficultyPreset, scheduler: &mut dyn Scheduler) {
        self.set_level(preset.level);
        self.set_interval(preset.interval_ms, scheduler);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Difficulty, GameConfig};
    use crate::engine::HeatController;
    use crate::env::{ScriptedRng, VirtualScheduler};

    struct Harness {
        ai: EntityAi,
        scheduler: VirtualScheduler,
        rng: ScriptedRng,
        monitor: CameraMonitor,
        heat: HeatController,
        events: Vec<Notification>,
    }

    impl Harness {
        fn new(level: u8, rolls: impl IntoIterator<Item = u32>) -> Self {
            let preset = DifficultyPreset {
                level: AiLevel::new(level).unwrap(),
                interval_ms: 10_000,
            };
            Self {
                ai: EntityAi::new(EntityPath::server_room(), preset),
                scheduler: VirtualScheduler::new(),
                rng: ScriptedRng::new(rolls),
                monitor: CameraMonitor::new(),
                heat: HeatController::new(&GameConfig::default()),
                events: Vec::new(),
            }
        }

        fn with_ctx<T>(&mut self, f: impl FnOnce(&mut EntityAi, &mut EntityContext<'_>) -> T) -> T {
            let now = self.scheduler.now();
            let mut ctx = EntityContext {
                scheduler: &mut self.scheduler,
                rng: &mut self.rng,
                monitor: &self.monitor,
                sink: &mut self.events,
                now,
            };
            f(&mut self.ai, &mut ctx)
        }

        fn attempt(&mut self) -> MoveOutcome {
            self.with_ctx(|ai, ctx| ai.attempt_move(ctx))
        }

        fn force(&mut self) -> Option<Advance> {
            self.with_ctx(|ai, ctx| ai.force_move(ctx))
        }

        fn start(&mut self) -> Option<MoveOutcome> {
            self.with_ctx(|ai, ctx| ai.start(ctx))
        }

        fn watch(&mut self, room: u8) {
            assert!(self.monitor.open(RoomId(room), &self.heat));
        }

        /// Drains due timer fires up to `ms` past the current time.
        fn run_for(&mut self, ms: u64) -> usize {
            let deadline = self.scheduler.now() + ms;
            let mut handled = 0;
            while let Some(fire) = self.scheduler.pop_due(deadline) {
                let now = fire.at;
                let mut ctx = EntityContext {
                    scheduler: &mut self.scheduler,
                    rng: &mut self.rng,
                    monitor: &self.monitor,
                    sink: &mut self.events,
                    now,
                };
                if self.ai.on_timer(fire, &mut ctx).is_some() {
                    handled += 1;
                }
            }
            self.scheduler.advance_to(deadline);
            handled
        }

        fn attacks(&self) -> usize {
            self.events
                .iter()
                .filter(|n| matches!(n, Notification::EntityAttacked { .. }))
                .count()
        }
    }

    #[test]
    fn roll_of_one_always_succeeds() {
        let mut h = Harness::new(2, [1]);

        let outcome = h.attempt();

        assert_eq!(outcome.advanced(), Some(Advance::Moved(RoomId(4))));
        assert_eq!(h.ai.location(), Location::Room(RoomId(4)));
        assert_eq!(
            h.events,
            vec![Notification::EntityMoved {
                location: RoomId(4),
                at: Timestamp::ZERO
            }]
        );
    }

    #[test]
    fn roll_of_twenty_fails_below_max_level() {
        let mut h = Harness::new(2, [20]);

        assert_eq!(
            h.attempt(),
            MoveOutcome::Rolled {
                roll: 20,
                threshold: 2,
                frozen: false,
                advance: None
            }
        );
        assert_eq!(h.ai.path_index(), 0);
        assert!(h.events.is_empty());
    }

    #[test]
    fn roll_of_twenty_succeeds_at_max_level() {
        let mut h = Harness::new(20, [20]);

        assert!(h.attempt().advanced().is_some());
    }

    #[test]
    fn watching_entity_room_halves_threshold() {
        let mut h = Harness::new(2, [2, 1]);
        h.watch(5);

        assert_eq!(
            h.attempt(),
            MoveOutcome::Rolled {
                roll: 2,
                threshold: 1,
                frozen: true,
                advance: None
            }
        );
        assert!(h.attempt().advanced().is_some());
    }

    #[test]
    fn level_three_freezes_to_one_and_level_one_to_zero() {
        let mut h = Harness::new(3, [1]);
        h.watch(5);
        assert!(matches!(
            h.attempt(),
            MoveOutcome::Rolled { threshold: 1, frozen: true, .. }
        ));

        let mut h = Harness::new(1, [1]);
        h.watch(5);
        assert_eq!(
            h.attempt(),
            MoveOutcome::Rolled {
                roll: 1,
                threshold: 0,
                frozen: true,
                advance: None
            }
        );
    }

    #[test]
    fn watching_another_room_does_not_freeze() {
        let mut h = Harness::new(2, [2]);
        h.watch(3);

        assert!(matches!(
            h.attempt(),
            MoveOutcome::Rolled { threshold: 2, frozen: false, advance: Some(_), .. }
        ));
    }

    #[test]
    fn five_advances_reach_terminal_with_one_attack() {
        let mut h = Harness::new(2, []);
        h.start();
        let expected = [4, 3, 2, 1];

        for room in expected {
            assert_eq!(h.force(), Some(Advance::Moved(RoomId(room))));
        }
        assert_eq!(h.force(), Some(Advance::Attacked));

        assert_eq!(h.ai.location(), Location::Terminal);
        assert_eq!(h.ai.phase(), EntityPhase::Attacking);
        assert!(!h.ai.is_running());
        assert_eq!(h.scheduler.active_timers(), 0);
        assert_eq!(h.attacks(), 1);

        let before = h.events.len();
        assert_eq!(h.attempt(), MoveOutcome::AlreadyAttacking);
        assert_eq!(h.force(), None);
        assert_eq!(h.events.len(), before);
        assert_eq!(h.ai.path_index(), 5);
    }

    #[test]
    fn attack_carries_level_and_timestamp() {
        let mut h = Harness::new(4, [1]);
        h.scheduler.advance_to(Timestamp(12_345));
        for _ in 0..4 {
            h.force();
        }

        h.attempt();

        assert_eq!(
            h.events.last(),
            Some(&Notification::EntityAttacked {
                at: Timestamp(12_345),
                level: AiLevel::new(4).unwrap()
            })
        );
    }

    #[test]
    fn start_rolls_immediately_and_arms_one_timer() {
        let mut h = Harness::new(2, [20]);

        assert!(h.start().is_some());
        assert_eq!(h.rng.draws(), 1);
        assert!(h.ai.is_running());
        assert_eq!(h.ai.phase(), EntityPhase::Moving);
        assert_eq!(h.scheduler.active_timers(), 1);

        assert!(h.start().is_none());
        assert_eq!(h.rng.draws(), 1);
        assert_eq!(h.scheduler.active_timers(), 1);
    }

    #[test]
    fn timer_drives_attempts_every_interval() {
        let mut h = Harness::new(2, [20]);
        h.start();

        assert_eq!(h.run_for(35_000), 3);
        assert_eq!(h.rng.draws(), 4);
    }

    #[test]
    fn reaching_terminal_on_timer_stops_the_loop() {
        let mut h = Harness::new(2, [1]);
        h.start();

        h.run_for(100_000);

        assert_eq!(h.ai.location(), Location::Terminal);
        assert_eq!(h.attacks(), 1);
        assert_eq!(h.rng.draws(), 5);
        assert_eq!(h.scheduler.active_timers(), 0);
    }

    #[test]
    fn stop_is_idempotent() {
        let mut h = Harness::new(2, [20]);
        h.ai.stop(&mut h.scheduler);
        h.start();

        h.ai.stop(&mut h.scheduler);
        h.ai.stop(&mut h.scheduler);

        assert!(!h.ai.is_running());
        assert_eq!(h.ai.phase(), EntityPhase::Idle);
        assert_eq!(h.scheduler.active_timers(), 0);
        assert_eq!(h.run_for(60_000), 0);
    }

    #[test]
    fn reset_after_attack_behaves_like_fresh_session() {
        let mut h = Harness::new(2, [20]);
        for _ in 0..5 {
            h.force();
        }
        assert_eq!(h.ai.phase(), EntityPhase::Attacking);

        h.ai.reset(&mut h.scheduler);
        assert_eq!(h.ai.path_index(), 0);
        assert!(!h.ai.is_running());
        assert_eq!(h.ai.level().get(), 2);

        let mut fresh = Harness::new(2, [20]);
        assert_eq!(h.start(), fresh.start());
        assert_eq!(h.ai.status(), fresh.ai.status());
        assert_eq!(h.scheduler.active_timers(), 1);
    }

    #[test]
    fn set_level_applies_to_next_attempt() {
        let mut h = Harness::new(1, [5, 5]);
        assert!(h.attempt().advanced().is_none());

        h.ai.set_level(AiLevel::new(5).unwrap());

        assert!(h.attempt().advanced().is_some());
    }

    #[test]
    fn set_interval_while_running_replaces_timer() {
        let mut h = Harness::new(2, [20]);
        h.start();
        assert_eq!(h.run_for(60_000), 6);
        h.force();

        assert!(h.ai.set_interval(5_000, &mut h.scheduler));

        assert_eq!(h.scheduler.active_timers(), 1);
        assert_eq!(h.ai.path_index(), 1);
        assert_eq!(h.run_for(60_000), 12);
        assert_eq!(h.scheduler.fired(), 18);
    }

    #[test]
    fn stale_timer_fires_are_ignored() {
        let mut h = Harness::new(2, [20]);
        h.start();
        let old = h.ai.timer().unwrap();
        h.ai.set_interval(7_000, &mut h.scheduler);

        let stale = TimerFire {
            handle: old,
            at: Timestamp(10_000),
        };
        let handled = h.with_ctx(|ai, ctx| ai.on_timer(stale, ctx));

        assert!(handled.is_none());
        assert_eq!(h.rng.draws(), 1);
    }

    #[test]
    fn set_interval_when_stopped_only_stores_period() {
        let mut h = Harness::new(2, [20]);

        assert!(!h.ai.set_interval(3_000, &mut h.scheduler));
        assert_eq!(h.scheduler.active_timers(), 0);

        h.start();
        let timer = h.ai.timer().unwrap();
        assert_eq!(h.scheduler.period(timer), Some(3_000));
    }

    #[test]
    fn status_reports_next_room() {
        let mut h = Harness::new(2, []);
        let status = h.ai.status();
        assert_eq!(status.location, Location::Room(RoomId(5)));
        assert_eq!(status.next_room, Location::Room(RoomId(4)));
        assert!(!status.running);

        for _ in 0..4 {
            h.force();
        }
        let status = h.ai.status();
        assert_eq!(status.location, Location::Room(RoomId(1)));
        assert_eq!(status.next_room, Location::Terminal);

        h.force();
        assert_eq!(h.ai.status().next_room, Location::Terminal);
    }

    #[test]
    fn apply_preset_sets_level_and_interval() {
        let mut h = Harness::new(2, [20]);
        h.start();

        h.ai.apply_preset(Difficulty::Hard.preset(), &mut h.scheduler);

        assert_eq!(h.ai.level().get(), 3);
        assert_eq!(h.ai.interval_ms(), 7_000);
        assert_eq!(h.scheduler.period(h.ai.timer().unwrap()), Some(7_000));
    }
}
