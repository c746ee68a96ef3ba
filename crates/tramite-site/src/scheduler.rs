// File: tramite-site/src/scheduler.rs
// Purpose: Fire-once timers for UI reverts and the consent fallback

use std::cell::{Cell, RefCell};
use std::time::Duration;

/// Deferred work the page schedules.
///
/// The host calls [`crate::Site::on_timer`] with the timer once its delay
/// has elapsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timer {
    /// Restore the submit button after success/failure of `attempt`
    RevertSubmit { attempt: u64 },
    /// Show the cookie banner if the visitor never scrolled
    ConsentFallback,
}

/// Scheduling primitive (`setTimeout` in the browser)
pub trait Scheduler {
    fn schedule(&self, timer: Timer, delay: Duration);
}

/// Scheduler driven by hand from tests.
///
/// Time only moves when [`ManualScheduler::advance`] is called.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    now: Cell<Duration>,
    pending: RefCell<Vec<(Duration, u64, Timer)>>,
    seq: Cell<u64>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move time forward and return every timer that came due, oldest deadline first
    pub fn advance(&self, by: Duration) -> Vec<Timer> {
        let now = self.now.get() + by;
        self.now.set(now);

        let mut pending = self.pending.borrow_mut();
        let (mut due, rest): (Vec<_>, Vec<_>) =
            pending.drain(..).partition(|(deadline, _, _)| *deadline <= now);
        *pending = rest;

        due.sort_by_key(|(deadline, seq, _)| (*deadline, *seq));
        due.into_iter().map(|(_, _, timer)| timer).collect()
    }

    /// Timers not yet due
    pub fn pending(&self) -> Vec<Timer> {
        self.pending.borrow().iter().map(|(_, _, t)| *t).collect()
    }

    pub fn elapsed(&self) -> Duration {
        self.now.get()
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&self, timer: Timer, delay: Duration) {
        let seq = self.seq.get();
        self.seq.set(seq + 1);
        self.pending
            .borrow_mut()
            .push((self.now.get() + delay, seq, timer));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_timers_fire_once_after_delay() {
        let scheduler = ManualScheduler::new();
        scheduler.schedule(Timer::ConsentFallback, Duration::from_millis(3000));

        assert!(scheduler.advance(Duration::from_millis(2999)).is_empty());
        assert_eq!(
            scheduler.advance(Duration::from_millis(1)),
            vec![Timer::ConsentFallback]
        );
        assert!(scheduler.advance(Duration::from_secs(10)).is_empty());
    }

    #[test]
    fn test_due_timers_ordered_by_deadline() {
        let scheduler = ManualScheduler::new();
        scheduler.schedule(Timer::RevertSubmit { attempt: 1 }, Duration::from_millis(4000));
        scheduler.schedule(Timer::ConsentFallback, Duration::from_millis(3000));

        assert_eq!(
            scheduler.advance(Duration::from_secs(5)),
            vec![Timer::ConsentFallback, Timer::RevertSubmit { attempt: 1 }]
        );
        assert!(scheduler.pending().is_empty());
        assert_eq!(scheduler.elapsed(), Duration::from_secs(5));
    }
}
