//! Cancellable fixed-period timers.
//!
//! The entity's decision loop runs on a [`Scheduler`] instead of a platform
//! timer. A fire is reported back as its [`TimerHandle`]; the owner compares it
//! with the handle it currently holds, so a fire from a cancelled or replaced
//! timer can never reach the state machine.
//!
//! [`VirtualScheduler`] keeps a virtual millisecond clock that only moves when
//! told to, which makes every timing property testable without sleeping.

use std::collections::BTreeMap;

use crate::state::Timestamp;

/// Opaque identifier of a scheduled periodic timer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerHandle(u64);

/// Capability to start and cancel periodic timers.
pub trait Scheduler {
    /// Starts a timer firing every `period_ms`, first one period from now.
    fn schedule(&mut self, period_ms: u64) -> TimerHandle;

    /// Cancels a timer. Returns false if it was not active.
    fn cancel(&mut self, handle: TimerHandle) -> bool;
}

/// A single timer expiry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimerFire {
    pub handle: TimerHandle,
    pub at: Timestamp,
}

#[derive(Clone, Copy, Debug)]
struct PeriodicTimer {
    period_ms: u64,
    next_fire: u64,
}

/// Deterministic scheduler driven by an explicit virtual clock.
///
/// Callers move time forward by draining [`VirtualScheduler::pop_due`] up to a
/// deadline and then calling [`VirtualScheduler::advance_to`]. Fires come out
/// in chronological order, ties broken by creation order, and the clock sits at
/// each fire's time while it is being handled.
#[derive(Clone, Debug, Default)]
pub struct VirtualScheduler {
    now: u64,
    next_id: u64,
    timers: BTreeMap<TimerHandle, PeriodicTimer>,
    fired: u64,
}

impl VirtualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> Timestamp {
        Timestamp(self.now)
    }

    /// Number of timers currently scheduled.
    pub fn active_timers(&self) -> usize {
        self.timers.len()
    }

    /// Total fires handed out since creation.
    pub fn fired(&self) -> u64 {
        self.fired
    }

    pub fn period(&self, handle: TimerHandle) -> Option<u64> {
        self.timers.get(&handle).map(|timer| timer.period_ms)
    }

    /// Pops the earliest fire due at or before `deadline`, moving the clock to
    /// its time and re-arming the timer for the next period.
    pub fn pop_due(&mut self, deadline: Timestamp) -> Option<TimerFire> {
        let (handle, at) = self
            .timers
            .iter()
            .filter(|(_, timer)| timer.next_fire <= deadline.0)
            .min_by_key(|(handle, timer)| (timer.next_fire, **handle))
            .map(|(handle, timer)| (*handle, timer.next_fire))?;

        if let Some(timer) = self.timers.get_mut(&handle) {
            timer.next_fire = at.saturating_add(timer.period_ms);
        }
        self.now = self.now.max(at);
        self.fired += 1;

        Some(TimerFire {
            handle,
            at: Timestamp(at),
        })
    }

    /// Moves the clock to `deadline`. Drain [`Self::pop_due`] first; fires left
    /// behind would be delivered late.
    pub fn advance_to(&mut self, deadline: Timestamp) {
        self.now = self.now.max(deadline.0);
    }
}

impl Scheduler for VirtualScheduler {
    fn schedule(&mut self, period_ms: u64) -> TimerHandle {
        let handle = TimerHandle(self.next_id);
        self.next_id += 1;

        let period_ms = period_ms.max(1);
        self.timers.insert(
            handle,
            PeriodicTimer {
                period_ms,
                next_fire: self.now.saturating_add(period_ms),
            },
        );
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) -> bool {
        self.timers.remove(&handle).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(scheduler: &mut VirtualScheduler, deadline: u64) -> Vec<TimerFire> {
        let deadline = Timestamp(deadline);
        let mut fires = Vec::new();
        while let Some(fire) = scheduler.pop_due(deadline) {
            fires.push(fire);
        }
        scheduler.advance_to(deadline);
        fires
    }

    #[test]
    fn fires_once_per_period() {
        let mut scheduler = VirtualScheduler::new();
        let handle = scheduler.schedule(1_000);

        let fires = drain(&mut scheduler, 3_500);

        assert_eq!(fires.len(), 3);
        assert!(fires.iter().all(|fire| fire.handle == handle));
        assert_eq!(
            fires.iter().map(|fire| fire.at.0).collect::<Vec<_>>(),
            vec![1_000, 2_000, 3_000]
        );
        assert_eq!(scheduler.now(), Timestamp(3_500));
    }

    #[test]
    fn interleaves_timers_chronologically() {
        let mut scheduler = VirtualScheduler::new();
        let slow = scheduler.schedule(300);
        let fast = scheduler.schedule(200);

        let order: Vec<TimerHandle> = drain(&mut scheduler, 600)
            .into_iter()
            .map(|fire| fire.handle)
            .collect();

        assert_eq!(order, vec![fast, slow, fast, slow, fast]);
    }

    #[test]
    fn cancelled_timer_stops_firing() {
        let mut scheduler = VirtualScheduler::new();
        let handle = scheduler.schedule(100);

        assert_eq!(drain(&mut scheduler, 250).len(), 2);
        assert!(scheduler.cancel(handle));
        assert!(!scheduler.cancel(handle));
        assert!(drain(&mut scheduler, 1_000).is_empty());
        assert_eq!(scheduler.active_timers(), 0);
    }

    #[test]
    fn new_timer_counts_from_current_time() {
        let mut scheduler = VirtualScheduler::new();
        scheduler.advance_to(Timestamp(950));
        scheduler.schedule(100);

        let fires = drain(&mut scheduler, 1_200);
        assert_eq!(fires[0].at, Timestamp(1_050));
    }
}
