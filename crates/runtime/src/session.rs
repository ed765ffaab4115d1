//! Session orchestrator.
//!
//! A [`Session`] owns the one canonical instance of every controller for a
//! night, plus the virtual scheduler, the random source and the event bus.
//! The host drives it with [`Session::frame`] and forwards player input through
//! the camera and entity methods; everything else happens inside.

use tokio::sync::broadcast;

use game_core::{
    Advance, AiLevel, CameraMonitor, Difficulty, EntityAi, EntityContext, EntityPath,
    EntityPhase, EntityStatus, GameConfig, HeatController, HeatStep, MoveOutcome, RandomSource,
    RoomId, SaveRecord, Timestamp, VirtualScheduler,
};

use crate::error::Result;
use crate::events::{Event, EventBus, Topic};
use crate::feed::{CameraFeed, format_clock};
use crate::rng::SeededRng;

/// Session configuration.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub game_config: GameConfig,
    pub difficulty: Difficulty,
    /// Seed for the entity's rolls. `None` draws one from the OS.
    pub seed: Option<u64>,
    pub event_buffer_size: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            game_config: GameConfig::default(),
            difficulty: Difficulty::default(),
            seed: None,
            event_buffer_size: 100,
        }
    }
}

/// What the heat side of a frame did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeatFrame {
    Ticked(HeatStep),
    Cooling { ended: bool },
}

/// Summary of one [`Session::frame`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameReport {
    pub heat: HeatFrame,
    /// Entity move attempts fired by the decision timer during this frame.
    pub attempts: Vec<MoveOutcome>,
}

impl FrameReport {
    pub fn attacked(&self) -> bool {
        self.attempts
            .iter()
            .any(|outcome| outcome.advanced() == Some(Advance::Attacked))
    }
}

/// One night of play.
pub struct Session {
    config: SessionConfig,
    heat: HeatController,
    monitor: CameraMonitor,
    entity: EntityAi,
    scheduler: VirtualScheduler,
    rng: Box<dyn RandomSource>,
    bus: EventBus,
}

impl Session {
    pub fn builder() -> SessionBuilder {
        SessionBuilder::new()
    }

    /// Fresh session for a saved profile: the entity's level and interval
    /// come from the saved difficulty, everything else starts over.
    ///
    /// Rolls are seeded from the OS. Use [`SessionBuilder::resume`] to combine
    /// a saved profile with a seed or an injected random source.
    pub fn resume(record: &SaveRecord) -> Result<Self> {
        Self::builder().resume(record).build()
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn heat(&self) -> &HeatController {
        &self.heat
    }

    pub fn monitor(&self) -> &CameraMonitor {
        &self.monitor
    }

    pub fn entity(&self) -> &EntityAi {
        &self.entity
    }

    pub fn scheduler(&self) -> &VirtualScheduler {
        &self.scheduler
    }

    pub fn event_bus(&self) -> &EventBus {
        &self.bus
    }

    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.bus.subscribe(topic)
    }

    /// Time since the session began.
    pub fn elapsed(&self) -> Timestamp {
        self.scheduler.now()
    }

    /// Session clock as `mm:ss`.
    pub fn clock(&self) -> String {
        format_clock(self.elapsed())
    }

    pub fn heat_percent(&self) -> u8 {
        self.heat.heat_percent()
    }

    pub fn is_overheated(&self) -> bool {
        self.heat.is_overheated()
    }

    pub fn cooldown_progress(&self) -> f64 {
        self.heat.cooldown_progress()
    }

    pub fn status(&self) -> EntityStatus {
        self.entity.status()
    }

    pub fn has_attacked(&self) -> bool {
        self.entity.phase() == EntityPhase::Attacking
    }

    /// Monitor contents, or `None` when the monitor is closed.
    pub fn feed(&self) -> Option<CameraFeed> {
        self.monitor
            .current_room()
            .map(|room| CameraFeed::new(room, self.entity.location()))
    }

    // ===== camera input =====

    /// Switches the monitor to `room`. Rejected while overheated.
    pub fn open_camera(&mut self, room: RoomId) -> bool {
        let accepted = self.monitor.open(room, &self.heat);
        if accepted {
            tracing::debug!("Monitor switched to {}", room);
        } else {
            tracing::debug!("Camera switch to {} rejected: system overheated", room);
        }
        accepted
    }

    pub fn close_camera(&mut self) {
        self.monitor.close();
        tracing::debug!("Monitor closed");
    }

    // ===== entity control =====

    /// Starts the entity's decision loop. `None` if it was already running.
    pub fn start_entity(&mut self) -> Option<MoveOutcome> {
        let now = self.scheduler.now();
        let mut ctx = EntityContext {
            scheduler: &mut self.scheduler,
            rng: &mut *self.rng,
            monitor: &self.monitor,
            sink: &mut self.bus,
            now,
        };
        let outcome = self.entity.start(&mut ctx)?;

        tracing::info!(
            level = %self.entity.level(),
            interval_ms = self.entity.interval_ms(),
            "Entity decision loop started"
        );
        log_attempt(&outcome, self.entity.location());
        Some(outcome)
    }

    pub fn stop_entity(&mut self) {
        let was_running = self.entity.is_running();
        self.entity.stop(&mut self.scheduler);
        if was_running {
            tracing::info!("Entity decision loop stopped");
        }
    }

    /// Stops the entity and sends it back to the first room.
    pub fn reset_entity(&mut self) {
        self.entity.reset(&mut self.scheduler);
        tracing::info!("Entity reset to {}", self.entity.location());
    }

    pub fn set_level(&mut self, level: AiLevel) {
        self.entity.set_level(level);
        tracing::info!("Entity level set to {}", level);
    }

    pub fn set_interval(&mut self, period_ms: u64) {
        let restarted = self.entity.set_interval(period_ms, &mut self.scheduler);
        tracing::info!(restarted, "Entity interval set to {}ms", self.entity.interval_ms());
    }

    /// Applies the level and interval of a difficulty mid-session.
    pub fn apply_difficulty(&mut self, difficulty: Difficulty) {
        self.config.difficulty = difficulty;
        self.entity.apply_preset(difficulty.preset(), &mut self.scheduler);
        tracing::info!(
            level = %self.entity.level(),
            interval_ms = self.entity.interval_ms(),
            "Difficulty changed to {}",
            difficulty
        );
    }

    /// Debug hook: moves the entity one step without rolling.
    pub fn force_entity_move(&mut self) -> Option<Advance> {
        let now = self.scheduler.now();
        let mut ctx = EntityContext {
            scheduler: &mut self.scheduler,
            rng: &mut *self.rng,
            monitor: &self.monitor,
            sink: &mut self.bus,
            now,
        };
        let advance = self.entity.force_move(&mut ctx);
        tracing::debug!(?advance, "Forced entity move");
        advance
    }

    // ===== clocks =====

    /// Advances the session by one frame of `delta_ms`.
    ///
    /// Heat is updated first (or the cooldown advanced while overheated),
    /// then every decision-timer fire falling inside the frame is handled in
    /// order, each seeing the monitor as it is now.
    pub fn frame(&mut self, delta_ms: u64) -> FrameReport {
        let heat = if self.heat.is_overheated() {
            let ended = self
                .heat
                .advance_cooldown(delta_ms, &mut self.monitor, &mut self.bus);
            if ended {
                tracing::info!("Overheat cooldown finished, cameras available");
            }
            HeatFrame::Cooling { ended }
        } else {
            let step = self.heat.tick(
                delta_ms as f64 / 1_000.0,
                &mut self.monitor,
                &mut self.bus,
            );
            if step == HeatStep::Overheated {
                tracing::warn!(
                    cooldown_ms = self.heat.cooldown_ms(),
                    "Camera system overheated, monitor forced closed"
                );
            }
            HeatFrame::Ticked(step)
        };

        let deadline = self.scheduler.now() + delta_ms;
        let mut attempts = Vec::new();
        while let Some(fire) = self.scheduler.pop_due(deadline) {
            let mut ctx = EntityContext {
                scheduler: &mut self.scheduler,
                rng: &mut *self.rng,
                monitor: &self.monitor,
                sink: &mut self.bus,
                now: fire.at,
            };
            if let Some(outcome) = self.entity.on_timer(fire, &mut ctx) {
                log_attempt(&outcome, self.entity.location());
                attempts.push(outcome);
            }
        }
        self.scheduler.advance_to(deadline);

        FrameReport { heat, attempts }
    }

    /// Restarts the night: heat cleared, monitor closed, entity back at the
    /// first room and stopped. Level and interval are kept.
    pub fn reset(&mut self) {
        self.heat.reset(&mut self.bus);
        self.monitor.close();
        self.entity.reset(&mut self.scheduler);
        tracing::info!("Session reset");
    }
}

fn log_attempt(outcome: &MoveOutcome, location: game_core::Location) {
    match *outcome {
        MoveOutcome::AlreadyAttacking => {
            tracing::debug!("Entity already in attack position");
        }
        MoveOutcome::Rolled {
            roll,
            threshold,
            frozen,
            advance,
        } => {
            tracing::debug!(roll, threshold, frozen, "Entity move attempt");
            match advance {
                Some(Advance::Moved(room)) => tracing::info!("Entity moved to {}", room),
                Some(Advance::Attacked) => tracing::warn!("Entity reached the office"),
                None => tracing::debug!("Entity failed to leave {}", location),
            }
        }
    }
}

/// Builder for [`Session`] with flexible configuration.
pub struct SessionBuilder {
    config: SessionConfig,
    path: Option<Vec<RoomId>>,
    rng: Option<Box<dyn RandomSource>>,
    bus: Option<EventBus>,
}

impl SessionBuilder {
    pub fn new() -> Self {
        Self {
            config: SessionConfig::default(),
            path: None,
            rng: None,
            bus: None,
        }
    }

    pub fn config(mut self, config: SessionConfig) -> Self {
        self.config = config;
        self
    }

    pub fn difficulty(mut self, difficulty: Difficulty) -> Self {
        self.config.difficulty = difficulty;
        self
    }

    /// Takes the difficulty from a saved profile.
    pub fn resume(self, record: &SaveRecord) -> Self {
        self.difficulty(record.difficulty)
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    /// Overrides the entity's route. Validated in [`Self::build`].
    pub fn path(mut self, rooms: impl IntoIterator<Item = RoomId>) -> Self {
        self.path = Some(rooms.into_iter().collect());
        self
    }

    /// Injects a random source, taking precedence over the seed.
    pub fn rng(mut self, rng: impl RandomSource + 'static) -> Self {
        self.rng = Some(Box::new(rng));
        self
    }

    pub fn event_bus(mut self, bus: EventBus) -> Self {
        self.bus = Some(bus);
        self
    }

    pub fn build(self) -> Result<Session> {
        let mut config = self.config;
        if let Some(rooms) = self.path {
            config.game_config = config.game_config.with_path(EntityPath::new(rooms)?);
        }

        let rng: Box<dyn RandomSource> = match (self.rng, config.seed) {
            (Some(rng), _) => rng,
            (None, Some(seed)) => Box::new(SeededRng::new(seed)),
            (None, None) => Box::new(SeededRng::from_entropy()),
        };
        let bus = self
            .bus
            .unwrap_or_else(|| EventBus::with_capacity(config.event_buffer_size));

        let preset = config.difficulty.preset();
        let session = Session {
            heat: HeatController::new(&config.game_config),
            monitor: CameraMonitor::new(),
            entity: EntityAi::new(config.game_config.path.clone(), preset),
            scheduler: VirtualScheduler::new(),
            rng,
            bus,
            config,
        };

        tracing::debug!(
            difficulty = %session.config.difficulty,
            level = %preset.level,
            interval_ms = preset.interval_ms,
            "Session built"
        );
        Ok(session)
    }
}

impl Default for SessionBuilder {
    fn default() -> Self {
        Self::new()
    }
}
