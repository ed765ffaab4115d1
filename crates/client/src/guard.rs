//! Autopilot that plays the guard.
//!
//! The guard keeps a camera on the entity while heat allows, backs off before
//! the system overheats and comes back once it has cooled down.

use game_core::{Location, RoomId};
use runtime::Session;

/// Snapshot of what the guard can see before a frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GuardView {
    pub heat_percent: u8,
    pub overheated: bool,
    pub observed: Option<RoomId>,
    pub entity: Location,
}

impl GuardView {
    pub fn of(session: &Session) -> Self {
        Self {
            heat_percent: session.heat_percent(),
            overheated: session.is_overheated(),
            observed: session.monitor().current_room(),
            entity: session.entity().location(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardAction {
    Watch(RoomId),
    Close,
    Hold,
}

/// Heat hysteresis for the guard.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GuardPolicy {
    /// Close the monitor at or above this percentage.
    pub close_at: u8,
    /// Reopen once heat is back at or below this percentage.
    pub reopen_at: u8,
}

impl Default for GuardPolicy {
    fn default() -> Self {
        Self {
            close_at: 90,
            reopen_at: 30,
        }
    }
}

impl GuardPolicy {
    pub fn decide(&self, view: GuardView) -> GuardAction {
        if view.overheated {
            return GuardAction::Hold;
        }
        let Some(target) = view.entity.room() else {
            return GuardAction::Hold;
        };

        match view.observed {
            Some(_) if view.heat_percent >= self.close_at => GuardAction::Close,
            Some(room) if room != target => GuardAction::Watch(target),
            Some(_) => GuardAction::Hold,
            None if view.heat_percent <= self.reopen_at => GuardAction::Watch(target),
            None => GuardAction::Hold,
        }
    }

    /// Decides and applies the action to the session.
    pub fn act(&self, session: &mut Session) -> GuardAction {
        let action = self.decide(GuardView::of(session));
        match action {
            GuardAction::Watch(room) => {
                session.open_camera(room);
            }
            GuardAction::Close => session.close_camera(),
            GuardAction::Hold => {}
        }
        action
    }
}
