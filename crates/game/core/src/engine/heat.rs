use crate::config::GameConfig;
use crate::events::{Notification, NotificationSink};
use crate::state::HeatState;

use super::CameraMonitor;

/// What a single [`HeatController::tick`] did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HeatStep {
    /// Overheated; heat is frozen until the cooldown ends.
    Locked,
    /// Heat moved (or stayed clamped at a bound).
    Updated,
    /// Heat hit the ceiling on this tick and the overheat began.
    Overheated,
}

/// Owns [`HeatState`] and the overheat cooldown.
///
/// The controller polls the monitor on every tick instead of being told about
/// camera switches, and it is the only component allowed to force the monitor
/// closed.
#[derive(Clone, Debug)]
pub struct HeatController {
    state: HeatState,
    increase_rate: f64,
    decrease_rate: f64,
    cooldown_ms: u64,
    reported_percent: u8,
}

impl HeatController {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            state: HeatState::new(),
            increase_rate: config.heat_increase_rate,
            decrease_rate: config.heat_decrease_rate,
            cooldown_ms: config.cooldown_ms,
            reported_percent: 0,
        }
    }

    pub fn state(&self) -> &HeatState {
        &self.state
    }

    pub fn heat(&self) -> f64 {
        self.state.heat
    }

    pub fn heat_percent(&self) -> u8 {
        self.state.percent()
    }

    pub fn is_overheated(&self) -> bool {
        self.state.overheated
    }

    pub fn cooldown_ms(&self) -> u64 {
        self.cooldown_ms
    }

    /// Fraction of the cooldown already served, `0.0` when not overheated.
    pub fn cooldown_progress(&self) -> f64 {
        if !self.state.overheated || self.cooldown_ms == 0 {
            return 0.0;
        }
        (self.state.cooldown_elapsed_ms as f64 / self.cooldown_ms as f64).min(1.0)
    }

    /// Advances heat by one frame.
    ///
    /// Negative or non-finite deltas count as zero.
    pub fn tick(
        &mut self,
        delta_seconds: f64,
        monitor: &mut CameraMonitor,
        sink: &mut dyn NotificationSink,
    ) -> HeatStep {
        if self.state.overheated {
            return HeatStep::Locked;
        }

        let delta = if delta_seconds.is_finite() {
            delta_seconds.max(0.0)
        } else {
            0.0
        };

        self.state.heat = if monitor.is_open() {
            (self.state.heat + self.increase_rate * delta).min(HeatState::MAX_HEAT)
        } else {
            (self.state.heat - self.decrease_rate * delta).max(0.0)
        };
        self.report_percent(sink);

        if self.state.heat >= HeatState::MAX_HEAT {
            self.trigger_overheat(monitor, sink);
            return HeatStep::Overheated;
        }
        HeatStep::Updated
    }

    /// Locks the cameras: closes the monitor and starts the cooldown.
    pub fn trigger_overheat(&mut self, monitor: &mut CameraMonitor, sink: &mut dyn NotificationSink) {
        self.state.overheated = true;
        self.state.cooldown_elapsed_ms = 0;
        monitor.close();
        sink.notify(Notification::OverheatStarted);
    }

    /// Accumulates cooldown time. Returns true when this call ended the
    /// overheat; calls while not overheated do nothing.
    pub fn advance_cooldown(
        &mut self,
        delta_ms: u64,
        monitor: &mut CameraMonitor,
        sink: &mut dyn NotificationSink,
    ) -> bool {
        if !self.state.overheated {
            return false;
        }

        self.state.cooldown_elapsed_ms = self.state.cooldown_elapsed_ms.saturating_add(delta_ms);
        if self.state.cooldown_elapsed_ms >= self.cooldown_ms {
            self.end_overheat(monitor, sink);
            return true;
        }
        false
    }

    /// Finishes the cooldown: heat drops to zero and the monitor returns to
    /// its idle screen.
    pub fn end_overheat(&mut self, monitor: &mut CameraMonitor, sink: &mut dyn NotificationSink) {
        if !self.state.overheated {
            return;
        }

        self.state = HeatState::new();
        sink.notify(Notification::OverheatEnded);
        self.report_percent(sink);
        monitor.close();
    }

    /// Returns to the session-start state. An overheat in progress is ended
    /// so listeners see the lock lifted.
    pub fn reset(&mut self, sink: &mut dyn NotificationSink) {
        let was_overheated = self.state.overheated;
        self.state = HeatState::new();
        if was_overheated {
            sink.notify(Notification::OverheatEnded);
        }
        self.report_percent(sink);
    }

    fn report_percent(&mut self, sink: &mut dyn NotificationSink) {
        let percent = self.state.percent();
        if percent != self.reported_percent {
            self.reported_percent = percent;
            sink.notify(Notification::HeatChanged { percent });
        }
    }
}
