//! Timer scheduler
//!
//! Delayed one-shot callbacks on a clock the host advances explicitly, so
//! timer-driven sequences such as the splash stages can be stepped
//! deterministically. The scheduler owns the entries; components hold a weak
//! [`SchedulerHandle`] and, usually, a [`ScheduledTimer`] guard that cancels
//! the timer when the component goes away.

use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::time::Duration;

use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Handle to a pending timer
    pub struct TimerId;
}

type TimerCallback = Box<dyn FnOnce(Duration)>;

struct TimerEntry {
    due: Duration,
    /// Registration order, breaks ties between timers due at the same instant
    seq: u64,
    callback: TimerCallback,
}

/// Internal state of the timer scheduler
#[derive(Default)]
struct SchedulerInner {
    timers: SlotMap<TimerId, TimerEntry>,
    now: Duration,
    next_seq: u64,
}

impl SchedulerInner {
    fn next_due(&self, limit: Duration) -> Option<TimerId> {
        self.timers
            .iter()
            .filter(|(_, entry)| entry.due <= limit)
            .min_by(|(_, a), (_, b)| a.due.cmp(&b.due).then(a.seq.cmp(&b.seq)))
            .map(|(id, _)| id)
    }
}

/// Owner of all pending timers
///
/// Time only moves when [`advance_to`](Self::advance_to) or
/// [`advance_by`](Self::advance_by) is called.
#[derive(Default)]
pub struct TimerScheduler {
    inner: Rc<RefCell<SchedulerInner>>,
}

impl TimerScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a weak handle for registering timers
    pub fn handle(&self) -> SchedulerHandle {
        SchedulerHandle {
            inner: Rc::downgrade(&self.inner),
        }
    }

    /// Current scheduler time
    pub fn now(&self) -> Duration {
        self.inner.borrow().now
    }

    pub fn pending_count(&self) -> usize {
        self.inner.borrow().timers.len()
    }

    /// Move the clock to `now`, firing every timer due by then
    ///
    /// Timers fire in due order; each callback receives its due time. The
    /// scheduler is not borrowed while a callback runs, so callbacks may
    /// schedule or cancel other timers. Returns the number fired.
    pub fn advance_to(&self, now: Duration) -> usize {
        let current = self.now();
        if now < current {
            tracing::warn!(?now, ?current, "timer clock moved backwards, ignoring");
            return 0;
        }

        let mut fired = 0;
        loop {
            let entry = {
                let mut inner = self.inner.borrow_mut();
                let Some(id) = inner.next_due(now) else {
                    break;
                };
                let entry = inner.timers.remove(id);
                if let Some(entry) = &entry {
                    inner.now = entry.due.max(inner.now);
                }
                entry
            };

            if let Some(entry) = entry {
                tracing::trace!(due = ?entry.due, "timer fired");
                (entry.callback)(entry.due);
                fired += 1;
            }
        }

        self.inner.borrow_mut().now = now;
        fired
    }

    pub fn advance_by(&self, delta: Duration) -> usize {
        self.advance_to(self.now() + delta)
    }
}

/// A weak handle to the timer scheduler
///
/// It won't keep the scheduler alive; operations on a dead scheduler are
/// no-ops.
#[derive(Clone, Default)]
pub struct SchedulerHandle {
    inner: Weak<RefCell<SchedulerInner>>,
}

impl SchedulerHandle {
    /// Run `callback` once, `delay` after the scheduler's current time
    pub fn schedule<F>(&self, delay: Duration, callback: F) -> Option<TimerId>
    where
        F: FnOnce(Duration) + 'static,
    {
        let inner = self.inner.upgrade()?;
        let mut inner = inner.borrow_mut();
        let due = inner.now + delay;
        let seq = inner.next_seq;
        inner.next_seq += 1;
        Some(inner.timers.insert(TimerEntry {
            due,
            seq,
            callback: Box::new(callback),
        }))
    }

    /// Like [`schedule`](Self::schedule) but cancelled when the guard drops
    pub fn schedule_guarded<F>(&self, delay: Duration, callback: F) -> ScheduledTimer
    where
        F: FnOnce(Duration) + 'static,
    {
        ScheduledTimer {
            handle: self.clone(),
            id: self.schedule(delay, callback),
        }
    }

    /// Cancel a pending timer; returns whether it was still pending
    pub fn cancel(&self, id: TimerId) -> bool {
        self.inner
            .upgrade()
            .map(|inner| inner.borrow_mut().timers.remove(id).is_some())
            .unwrap_or(false)
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.inner
            .upgrade()
            .map(|inner| inner.borrow().timers.contains_key(id))
            .unwrap_or(false)
    }

    /// Current scheduler time, if the scheduler is still alive
    pub fn now(&self) -> Option<Duration> {
        self.inner.upgrade().map(|inner| inner.borrow().now)
    }

    pub fn is_alive(&self) -> bool {
        self.inner.strong_count() > 0
    }
}

/// A pending timer that is cancelled when dropped
#[must_use = "dropping a ScheduledTimer cancels it"]
pub struct ScheduledTimer {
    handle: SchedulerHandle,
    id: Option<TimerId>,
}

impl ScheduledTimer {
    pub fn id(&self) -> Option<TimerId> {
        self.id
    }

    pub fn is_pending(&self) -> bool {
        self.id.is_some_and(|id| self.handle.is_pending(id))
    }

    pub fn cancel(mut self) {
        self.cancel_inner();
    }

    fn cancel_inner(&mut self) {
        if let Some(id) = self.id.take() {
            self.handle.cancel(id);
        }
    }
}

impl Drop for ScheduledTimer {
    fn drop(&mut self) {
        self.cancel_inner();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(ms: u64) -> Duration {
        Duration::from_millis(ms)
    }

    #[test]
    fn test_timers_fire_in_due_order() {
        let scheduler = TimerScheduler::new();
        let handle = scheduler.handle();
        let log = Rc::new(RefCell::new(Vec::new()));

        for (delay, name) in [(2000, "b"), (500, "a"), (2800, "c")] {
            let log = Rc::clone(&log);
            handle.schedule(ms(delay), move |at| log.borrow_mut().push((name, at)));
        }

        assert_eq!(scheduler.advance_to(ms(499)), 0);
        assert_eq!(scheduler.advance_to(ms(2000)), 2);
        assert_eq!(scheduler.advance_by(ms(10_000)), 1);
        assert_eq!(
            *log.borrow(),
            vec![("a", ms(500)), ("b", ms(2000)), ("c", ms(2800))]
        );
        assert_eq!(scheduler.pending_count(), 0);
    }

    #[test]
    fn test_same_instant_fires_in_registration_order() {
        let scheduler = TimerScheduler::new();
        let handle = scheduler.handle();
        let log = Rc::new(RefCell::new(Vec::new()));

        for name in ["first", "second", "third"] {
            let log = Rc::clone(&log);
            handle.schedule(ms(100), move |_| log.borrow_mut().push(name));
        }
        scheduler.advance_by(ms(100));
        assert_eq!(*log.borrow(), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_callbacks_can_schedule_more_timers() {
        let scheduler = TimerScheduler::new();
        let handle = scheduler.handle();
        let fired = Rc::new(RefCell::new(Vec::new()));

        let inner_handle = handle.clone();
        let inner_fired = Rc::clone(&fired);
        handle.schedule(ms(100), move |at| {
            inner_fired.borrow_mut().push(at);
            let fired = Rc::clone(&inner_fired);
            inner_handle.schedule(ms(50), move |at| fired.borrow_mut().push(at));
        });

        // The chained timer is due at 150 and fires in the same advance
        assert_eq!(scheduler.advance_to(ms(200)), 2);
        assert_eq!(*fired.borrow(), vec![ms(100), ms(150)]);
    }

    #[test]
    fn test_guard_cancels_on_drop() {
        let scheduler = TimerScheduler::new();
        let handle = scheduler.handle();
        let fired = Rc::new(RefCell::new(false));

        let flag = Rc::clone(&fired);
        let guard = handle.schedule_guarded(ms(10), move |_| *flag.borrow_mut() = true);
        assert!(guard.is_pending());
        drop(guard);

        assert_eq!(scheduler.pending_count(), 0);
        scheduler.advance_by(ms(100));
        assert!(!*fired.borrow());
    }

    #[test]
    fn test_cancel_and_dead_scheduler() {
        let scheduler = TimerScheduler::new();
        let handle = scheduler.handle();
        let id = handle.schedule(ms(10), |_| {}).unwrap();
        assert!(handle.is_pending(id));
        assert!(handle.cancel(id));
        assert!(!handle.cancel(id));

        drop(scheduler);
        assert!(!handle.is_alive());
        assert!(handle.schedule(ms(10), |_| {}).is_none());
        assert_eq!(handle.now(), None);
    }

    #[test]
    fn test_clock_never_runs_backwards() {
        let scheduler = TimerScheduler::new();
        scheduler.advance_to(ms(500));
        assert_eq!(scheduler.advance_to(ms(100)), 0);
        assert_eq!(scheduler.now(), ms(500));
    }
}
