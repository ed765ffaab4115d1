use crate::state::{MonitorState, RoomId};

use super::HeatController;

/// Owns [`MonitorState`]: which camera feed is on screen.
///
/// Passive with respect to heat: it only reads the overheat flag to gate
/// switches and never calls into the controller.
#[derive(Clone, Debug, Default)]
pub struct CameraMonitor {
    state: MonitorState,
}

impl CameraMonitor {
    pub const fn new() -> Self {
        Self {
            state: MonitorState::new(),
        }
    }

    pub fn state(&self) -> &MonitorState {
        &self.state
    }

    pub fn is_open(&self) -> bool {
        self.state.is_open()
    }

    /// Room currently observed, if any.
    pub fn current_room(&self) -> Option<RoomId> {
        self.state.observed_room()
    }

    /// Switches to `room`. Returns false (and changes nothing) while the
    /// cameras are overheated.
    pub fn open(&mut self, room: RoomId, heat: &HeatController) -> bool {
        if heat.is_overheated() {
            return false;
        }
        self.state.set_observed(Some(room));
        true
    }

    pub fn close(&mut self) {
        self.state.set_observed(None);
    }
}
