//! Repeating timer abstraction.
//!
//! The refresh service registers its timers through [`Scheduler`] so the
//! same wiring runs on tokio in production and on a hand-cranked
//! [`ManualScheduler`] in tests.

use std::fmt;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::{self, MissedTickBehavior};

use teamconnect_core::traits::ManualClock;

/// Callback run on every timer period.
pub type RepeatingTask = Box<dyn FnMut() + Send + 'static>;

/// Registers repeating timers.
pub trait Scheduler: Send + Sync + fmt::Debug {
    /// Run `task` every `period`, first after one full period.
    ///
    /// The timer runs until the returned handle is cancelled or dropped.
    fn every(&self, name: &'static str, period: Duration, task: RepeatingTask) -> TimerHandle;
}

/// Cancellation handle for a registered timer.
///
/// Dropping the handle cancels the timer.
#[derive(Debug)]
pub struct TimerHandle {
    name: &'static str,
    cancel: watch::Sender<bool>,
}

impl TimerHandle {
    fn new(name: &'static str) -> (Self, watch::Receiver<bool>) {
        let (cancel, rx) = watch::channel(false);
        (Self { name, cancel }, rx)
    }

    /// Timer name given at registration.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Stop the timer. Idempotent.
    pub fn cancel(&self) {
        let _ = self.cancel.send(true);
    }

    /// Whether [`cancel`](Self::cancel) has been called.
    pub fn is_cancelled(&self) -> bool {
        *self.cancel.borrow()
    }
}

/// Scheduler backed by tokio intervals.
///
/// Each timer runs in its own task, so timers due at the same instant fire
/// in no fixed order. A refresh tick may therefore see an activity state up
/// to one poll interval old.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioScheduler;

impl Scheduler for TokioScheduler {
    fn every(&self, name: &'static str, period: Duration, mut task: RepeatingTask) -> TimerHandle {
        let (handle, mut cancel) = TimerHandle::new(name);

        tokio::spawn(async move {
            let mut interval = time::interval_at(time::Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            tracing::debug!("Timer '{}' started (every {:?})", name, period);
            loop {
                tokio::select! {
                    changed = cancel.changed() => {
                        if changed.is_err() || *cancel.borrow() {
                            break;
                        }
                    }
                    _ = interval.tick() => {
                        task();
                    }
                }
            }
            tracing::debug!("Timer '{}' stopped", name);
        });

        handle
    }
}

struct ManualTimer {
    name: &'static str,
    period: Duration,
    next_due: Mutex<Duration>,
    task: Mutex<RepeatingTask>,
    cancel: watch::Receiver<bool>,
}

impl ManualTimer {
    fn is_live(&self) -> bool {
        // A dropped handle counts as cancelled.
        self.cancel.has_changed().is_ok() && !*self.cancel.borrow()
    }

    fn next_due(&self) -> Duration {
        *self.next_due.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Deterministic scheduler for tests.
///
/// Time only moves through [`advance`](Self::advance), which fires due
/// timers in deadline order and moves the attached [`ManualClock`] to each
/// deadline before firing, so callbacks observe the instant they were due.
#[derive(Clone)]
pub struct ManualScheduler {
    clock: ManualClock,
    elapsed: Arc<Mutex<Duration>>,
    timers: Arc<Mutex<Vec<Arc<ManualTimer>>>>,
}

impl fmt::Debug for ManualScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ManualScheduler")
            .field("elapsed", &self.elapsed())
            .finish()
    }
}

impl ManualScheduler {
    /// Create a scheduler that drives `clock`.
    pub fn new(clock: ManualClock) -> Self {
        Self {
            clock,
            elapsed: Arc::new(Mutex::new(Duration::ZERO)),
            timers: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Total simulated time since creation.
    pub fn elapsed(&self) -> Duration {
        *self.elapsed.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Number of timers that are still live.
    pub fn active_timers(&self) -> usize {
        self.timers
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .filter(|t| t.is_live())
            .count()
    }

    /// Advance simulated time by `by`, firing every timer that comes due.
    ///
    /// Returns the names of the timers fired, in order.
    pub fn advance(&self, by: Duration) -> Vec<&'static str> {
        let target = self.elapsed() + by;
        let mut fired = Vec::new();

        while let Some(timer) = self.next_due_before(target) {
            let due = timer.next_due();
            self.move_to(due);

            {
                let mut task = timer.task.lock().unwrap_or_else(|e| e.into_inner());
                task();
            }
            *timer.next_due.lock().unwrap_or_else(|e| e.into_inner()) = due + timer.period;
            fired.push(timer.name);
        }

        self.move_to(target);
        fired
    }

    fn next_due_before(&self, target: Duration) -> Option<Arc<ManualTimer>> {
        let timers = self.timers.lock().unwrap_or_else(|e| e.into_inner());
        timers
            .iter()
            .filter(|t| t.is_live() && t.next_due() <= target)
            // min_by_key keeps the first of equal keys: registration order breaks ties.
            .min_by_key(|t| t.next_due())
            .cloned()
    }

    fn move_to(&self, at: Duration) {
        let mut elapsed = self.elapsed.lock().unwrap_or_else(|e| e.into_inner());
        if at > *elapsed {
            self.clock.advance(at - *elapsed);
            *elapsed = at;
        }
    }
}

impl Scheduler for ManualScheduler {
    fn every(&self, name: &'static str, period: Duration, task: RepeatingTask) -> TimerHandle {
        let (handle, cancel) = TimerHandle::new(name);
        let timer = ManualTimer {
            name,
            period,
            next_due: Mutex::new(self.elapsed() + period),
            task: Mutex::new(task),
            cancel,
        };
        self.timers
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(Arc::new(timer));
        handle
    }
}
