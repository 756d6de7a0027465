//! Refresh service: drives the controller from timers and dispatches
//! refreshes to the data source.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use tokio::task::JoinHandle;

use teamconnect_core::traits::{Clock, FocusProbe, RefreshSource};

use crate::activity::InputEvent;
use crate::controller::{RefreshController, RefreshSettings, SkipReason, TickDecision};
use crate::scheduler::{Scheduler, TimerHandle};
use crate::status::ActivityState;

/// Timer name of the activity poll.
pub const ACTIVITY_POLL_TIMER: &str = "activity_poll";
/// Timer name of the refresh tick.
pub const REFRESH_TICK_TIMER: &str = "refresh_tick";

/// Result of one tick.
#[derive(Debug)]
pub enum TickOutcome {
    /// A refresh was spawned. Awaiting the handle is optional; the service
    /// never does.
    Dispatched(JoinHandle<()>),
    /// Nothing was fetched.
    Skipped(SkipReason),
}

impl TickOutcome {
    /// `true` when a refresh was spawned.
    pub fn is_dispatched(&self) -> bool {
        matches!(self, Self::Dispatched(_))
    }
}

/// Counters describing what the service has done so far.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct RefreshStats {
    /// Ticks that spawned a refresh.
    pub dispatched: u64,
    /// Refreshes that completed successfully.
    pub succeeded: u64,
    /// Refreshes that returned an error.
    pub failed: u64,
    /// Ticks skipped because the user was idle.
    pub skipped_idle: u64,
    /// Ticks skipped because the view lacked focus.
    pub skipped_unfocused: u64,
    /// Ticks skipped because a refresh was still running.
    pub skipped_in_flight: u64,
}

#[derive(Debug, Default)]
struct StatCounters {
    dispatched: AtomicU64,
    succeeded: AtomicU64,
    failed: AtomicU64,
    skipped_idle: AtomicU64,
    skipped_unfocused: AtomicU64,
    skipped_in_flight: AtomicU64,
}

impl StatCounters {
    fn snapshot(&self) -> RefreshStats {
        RefreshStats {
            dispatched: self.dispatched.load(Ordering::Relaxed),
            succeeded: self.succeeded.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
            skipped_idle: self.skipped_idle.load(Ordering::Relaxed),
            skipped_unfocused: self.skipped_unfocused.load(Ordering::Relaxed),
            skipped_in_flight: self.skipped_in_flight.load(Ordering::Relaxed),
        }
    }

    fn record_skip(&self, reason: SkipReason) {
        let counter = match reason {
            SkipReason::Idle => &self.skipped_idle,
            SkipReason::Unfocused => &self.skipped_unfocused,
            SkipReason::InFlight => &self.skipped_in_flight,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }
}

/// Decrements the in-flight count when a refresh task ends, even if the
/// source panics.
struct InFlightGuard(Arc<AtomicUsize>);

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Activity-aware dashboard refresher.
pub struct RefreshService {
    controller: Mutex<RefreshController>,
    source: Arc<dyn RefreshSource>,
    focus: Arc<dyn FocusProbe>,
    in_flight: Arc<AtomicUsize>,
    stats: Arc<StatCounters>,
}

impl std::fmt::Debug for RefreshService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RefreshService")
            .field("state", &self.state())
            .field("in_flight", &self.in_flight())
            .finish()
    }
}

impl RefreshService {
    /// Create a new refresh service.
    pub fn new(
        settings: RefreshSettings,
        clock: Arc<dyn Clock>,
        source: Arc<dyn RefreshSource>,
        focus: Arc<dyn FocusProbe>,
    ) -> Arc<Self> {
        Arc::new(Self {
            controller: Mutex::new(RefreshController::new(settings, clock)),
            source,
            focus,
            in_flight: Arc::new(AtomicUsize::new(0)),
            stats: Arc::new(StatCounters::default()),
        })
    }

    fn controller(&self) -> MutexGuard<'_, RefreshController> {
        self.controller.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Controller settings.
    pub fn settings(&self) -> RefreshSettings {
        *self.controller().settings()
    }

    /// Activity state as of the last poll.
    pub fn state(&self) -> ActivityState {
        self.controller().state()
    }

    /// Number of refreshes currently running.
    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Snapshot of the service counters.
    pub fn stats(&self) -> RefreshStats {
        self.stats.snapshot()
    }

    /// Record a qualifying input event.
    pub fn record_activity(&self) {
        self.controller().record_activity();
    }

    /// Record a host event; non-qualifying events are ignored.
    pub fn record_event(&self, event: InputEvent) -> bool {
        self.controller().record_event(event)
    }

    /// Re-evaluate the activity state.
    pub fn poll_activity(&self) -> ActivityState {
        self.controller().poll_activity()
    }

    /// Run one refresh tick.
    ///
    /// Spawns the refresh and returns immediately. Refresh errors are logged
    /// and counted, never propagated or retried.
    pub fn tick(&self) -> TickOutcome {
        let decision = self.controller().evaluate_tick(self.focus.has_focus());

        if let TickDecision::Skip(reason) = decision {
            tracing::trace!("Refresh tick skipped: {:?}", reason);
            self.stats.record_skip(reason);
            return TickOutcome::Skipped(reason);
        }

        let previous = self.in_flight.fetch_add(1, Ordering::SeqCst);
        let guard = InFlightGuard(Arc::clone(&self.in_flight));
        if previous > 0 && self.settings().skip_when_in_flight {
            drop(guard);
            tracing::debug!("Refresh tick skipped: previous refresh still in flight");
            self.stats.record_skip(SkipReason::InFlight);
            return TickOutcome::Skipped(SkipReason::InFlight);
        }

        self.stats.dispatched.fetch_add(1, Ordering::Relaxed);
        let source = Arc::clone(&self.source);
        let stats = Arc::clone(&self.stats);

        let handle = tokio::spawn(async move {
            let _guard = guard;
            match source.refresh().await {
                Ok(()) => {
                    stats.succeeded.fetch_add(1, Ordering::Relaxed);
                    tracing::debug!("Dashboard refreshed");
                }
                Err(e) => {
                    stats.failed.fetch_add(1, Ordering::Relaxed);
                    tracing::warn!("Dashboard refresh failed: {}", e);
                }
            }
        });

        TickOutcome::Dispatched(handle)
    }

    /// Register the activity poll and refresh tick timers.
    pub fn start(self: &Arc<Self>, scheduler: &dyn Scheduler) -> RefreshHandle {
        let settings = self.settings();

        let poller = Arc::clone(self);
        let poll_timer = scheduler.every(
            ACTIVITY_POLL_TIMER,
            settings.activity_poll_interval,
            Box::new(move || {
                poller.poll_activity();
            }),
        );

        let ticker = Arc::clone(self);
        let tick_timer = scheduler.every(
            REFRESH_TICK_TIMER,
            settings.refresh_interval,
            Box::new(move || {
                ticker.tick();
            }),
        );

        tracing::info!(
            "Dashboard auto-refresh started: refresh every {:?}, activity poll every {:?}, idle after {:?}",
            settings.refresh_interval,
            settings.activity_poll_interval,
            settings.inactivity_threshold
        );

        RefreshHandle {
            service: Arc::clone(self),
            timers: vec![poll_timer, tick_timer],
        }
    }
}

/// Running refresh timers. Dropping the handle stops them.
#[derive(Debug)]
pub struct RefreshHandle {
    service: Arc<RefreshService>,
    timers: Vec<TimerHandle>,
}

impl RefreshHandle {
    /// The service these timers drive.
    pub fn service(&self) -> &Arc<RefreshService> {
        &self.service
    }

    /// Whether any timer is still running.
    pub fn is_running(&self) -> bool {
        self.timers.iter().any(|t| !t.is_cancelled())
    }

    /// Cancel every timer. Refreshes already in flight run to completion.
    pub fn stop(&self) {
        if !self.is_running() {
            return;
        }
        for timer in &self.timers {
            timer.cancel();
        }
        tracing::info!(
            "Dashboard auto-refresh stopped ({:?})",
            self.service.stats()
        );
    }
}

impl Drop for RefreshHandle {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use async_trait::async_trait;
    use tokio::sync::Notify;

    use teamconnect_core::error::AppError;
    use teamconnect_core::result::AppResult;
    use teamconnect_core::traits::{ManualClock, SharedFocus, SystemClock};

    use super::*;
    use crate::scheduler::{ManualScheduler, TokioScheduler};

    #[derive(Debug, Default)]
    struct CountingSource {
        calls: AtomicUsize,
        fail: std::sync::atomic::AtomicBool,
    }

    #[async_trait]
    impl RefreshSource for CountingSource {
        async fn refresh(&self) -> AppResult<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail.load(Ordering::SeqCst) {
                Err(AppError::network("connection refused"))
            } else {
                Ok(())
            }
        }
    }

    /// Source whose refresh blocks until released.
    #[derive(Debug, Default)]
    struct GatedSource {
        calls: AtomicUsize,
        release: Notify,
    }

    #[async_trait]
    impl RefreshSource for GatedSource {
        async fn refresh(&self) -> AppResult<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.release.notified().await;
            Ok(())
        }
    }

    struct Fixture<S: RefreshSource> {
        service: Arc<RefreshService>,
        source: Arc<S>,
        focus: Arc<SharedFocus>,
        clock: ManualClock,
    }

    fn fixture<S: RefreshSource + Default>(settings: RefreshSettings) -> Fixture<S> {
        let clock = ManualClock::new();
        let source = Arc::new(S::default());
        let focus = Arc::new(SharedFocus::new(true));
        let service = RefreshService::new(
            settings,
            Arc::new(clock.clone()),
            Arc::clone(&source) as Arc<dyn RefreshSource>,
            Arc::clone(&focus) as Arc<dyn FocusProbe>,
        );
        Fixture {
            service,
            source,
            focus,
            clock,
        }
    }

    async fn finish(outcome: TickOutcome) {
        match outcome {
            TickOutcome::Dispatched(handle) => handle.await.expect("refresh task"),
            TickOutcome::Skipped(reason) => panic!("expected dispatch, skipped: {reason:?}"),
        }
    }

    #[tokio::test]
    async fn test_active_and_focused_refreshes_once_per_tick() {
        let f = fixture::<CountingSource>(RefreshSettings::default());

        finish(f.service.tick()).await;
        assert_eq!(f.source.calls.load(Ordering::SeqCst), 1);

        finish(f.service.tick()).await;
        assert_eq!(f.source.calls.load(Ordering::SeqCst), 2);
        assert_eq!(f.service.stats().succeeded, 2);
    }

    #[tokio::test]
    async fn test_idle_never_refreshes() {
        let f = fixture::<CountingSource>(RefreshSettings::default());
        f.clock.advance(Duration::from_secs(61));
        assert_eq!(f.service.poll_activity(), ActivityState::Idle);

        for _ in 0..3 {
            assert!(matches!(
                f.service.tick(),
                TickOutcome::Skipped(SkipReason::Idle)
            ));
        }
        tokio::task::yield_now().await;
        assert_eq!(f.source.calls.load(Ordering::SeqCst), 0);
        assert_eq!(f.service.stats().skipped_idle, 3);
    }

    #[tokio::test]
    async fn test_unfocused_never_refreshes() {
        let f = fixture::<CountingSource>(RefreshSettings::default());
        f.focus.set_focused(false);

        assert!(matches!(
            f.service.tick(),
            TickOutcome::Skipped(SkipReason::Unfocused)
        ));
        assert_eq!(f.source.calls.load(Ordering::SeqCst), 0);

        f.focus.set_focused(true);
        finish(f.service.tick()).await;
        assert_eq!(f.source.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failure_is_swallowed_and_state_unchanged() {
        let f = fixture::<CountingSource>(RefreshSettings::default());
        f.source.fail.store(true, Ordering::SeqCst);

        finish(f.service.tick()).await;
        assert_eq!(f.service.state(), ActivityState::Active);
        assert_eq!(f.service.stats().failed, 1);
        assert_eq!(f.service.in_flight(), 0);

        finish(f.service.tick()).await;
        assert_eq!(f.source.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_overlapping_tick_is_dropped_while_in_flight() {
        let f = fixture::<GatedSource>(RefreshSettings::default());

        let first = f.service.tick();
        assert!(first.is_dispatched());
        while f.source.calls.load(Ordering::SeqCst) == 0 {
            tokio::task::yield_now().await;
        }

        assert!(matches!(
            f.service.tick(),
            TickOutcome::Skipped(SkipReason::InFlight)
        ));
        assert_eq!(f.service.in_flight(), 1);

        f.source.release.notify_one();
        finish(first).await;
        assert_eq!(f.service.in_flight(), 0);

        let next = f.service.tick();
        assert!(next.is_dispatched());
        f.source.release.notify_one();
        finish(next).await;
        assert_eq!(f.source.calls.load(Ordering::SeqCst), 2);
        assert_eq!(f.service.stats().skipped_in_flight, 1);
    }

    #[tokio::test]
    async fn test_overlap_allowed_when_guard_disabled() {
        let settings = RefreshSettings {
            skip_when_in_flight: false,
            ..RefreshSettings::default()
        };
        let f = fixture::<GatedSource>(settings);

        let first = f.service.tick();
        let second = f.service.tick();
        assert!(first.is_dispatched());
        assert!(second.is_dispatched());
        while f.source.calls.load(Ordering::SeqCst) < 2 {
            tokio::task::yield_now().await;
        }
        assert_eq!(f.service.in_flight(), 2);

        f.source.release.notify_waiters();
        finish(first).await;
        finish(second).await;
        assert_eq!(f.service.in_flight(), 0);
    }

    #[tokio::test]
    async fn test_scheduled_session_scenario() {
        let f = fixture::<CountingSource>(RefreshSettings::default());
        let scheduler = ManualScheduler::new(f.clock.clone());
        let handle = f.service.start(&scheduler);
        assert_eq!(scheduler.active_timers(), 2);

        // t=0 activity; polls at 10..30s keep the user active, tick at 30s fetches.
        f.service.record_activity();
        scheduler.advance(Duration::from_secs(30));
        assert_eq!(f.service.state(), ActivityState::Active);
        assert_eq!(f.service.stats().dispatched, 1);
        while f.service.in_flight() > 0 {
            tokio::task::yield_now().await;
        }

        // Poll at 60s: exactly 60s since input, so idle. Tick at 60s skips.
        scheduler.advance(Duration::from_secs(30));
        assert_eq!(f.service.state(), ActivityState::Idle);
        assert_eq!(f.service.stats().dispatched, 1);
        assert_eq!(f.service.stats().skipped_idle, 1);

        // Input at 65s becomes visible at the 70s poll; 90s tick fetches.
        scheduler.advance(Duration::from_secs(5));
        f.service.record_activity();
        assert_eq!(f.service.state(), ActivityState::Idle);
        scheduler.advance(Duration::from_secs(5));
        assert_eq!(f.service.state(), ActivityState::Active);
        scheduler.advance(Duration::from_secs(20));
        assert_eq!(f.service.stats().dispatched, 2);

        handle.stop();
        assert!(!handle.is_running());
        assert_eq!(scheduler.active_timers(), 0);
        scheduler.advance(Duration::from_secs(300));
        assert_eq!(f.service.stats().dispatched, 2);

        while f.service.in_flight() > 0 {
            tokio::task::yield_now().await;
        }
        assert_eq!(f.source.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_idle_within_one_poll_after_threshold() {
        let f = fixture::<CountingSource>(RefreshSettings::default());
        let scheduler = ManualScheduler::new(f.clock.clone());
        let _handle = f.service.start(&scheduler);

        // Last input at 7s; threshold passes at 67s; next poll is at 70s.
        scheduler.advance(Duration::from_secs(7));
        f.service.record_activity();
        scheduler.advance(Duration::from_secs(62));
        assert_eq!(f.service.state(), ActivityState::Active);
        scheduler.advance(Duration::from_secs(1));
        assert_eq!(f.service.state(), ActivityState::Idle);
    }

    #[tokio::test]
    async fn test_dropping_handle_stops_timers() {
        let f = fixture::<CountingSource>(RefreshSettings::default());
        let scheduler = ManualScheduler::new(f.clock.clone());
        drop(f.service.start(&scheduler));
        assert_eq!(scheduler.active_timers(), 0);
        assert!(scheduler.advance(Duration::from_secs(120)).is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_tokio_timers_lag_at_most_one_poll() {
        let source = Arc::new(CountingSource::default());
        let service = RefreshService::new(
            RefreshSettings::default(),
            Arc::new(SystemClock),
            Arc::clone(&source) as Arc<dyn RefreshSource>,
            Arc::new(SharedFocus::new(true)) as Arc<dyn FocusProbe>,
        );
        let _handle = service.start(&TokioScheduler);

        // No input after start. The 60s poll and tick race each other, but
        // the polls at 70s and 80s settle Idle before the 90s tick.
        tokio::time::sleep(Duration::from_secs(95)).await;
        let stats = service.stats();
        assert_eq!(service.state(), ActivityState::Idle);
        assert!((1..=2).contains(&stats.dispatched));
        assert!(stats.skipped_idle >= 1);
        assert_eq!(stats.dispatched + stats.skipped_idle, 3);
    }
}
