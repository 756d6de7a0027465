//! Integration tests for the activity-aware refresh driving a real client.

mod helpers;

use std::sync::Arc;
use std::time::Duration;

use teamconnect_core::traits::{ManualClock, SharedFocus};
use teamconnect_refresh::{
    ActivityState, InputEvent, ManualScheduler, RefreshService, RefreshSettings, SkipReason,
    TickOutcome,
};

struct Session {
    server: helpers::MockServer,
    service: Arc<RefreshService>,
    scheduler: ManualScheduler,
    focus: Arc<SharedFocus>,
}

async fn session(server: helpers::MockServer, anonymous: bool) -> Session {
    let clock = ManualClock::new();
    let scheduler = ManualScheduler::new(clock.clone());
    let focus = Arc::new(SharedFocus::default());
    let client = if anonymous {
        server.anonymous_client()
    } else {
        server.client()
    };
    let service = RefreshService::new(
        RefreshSettings::from(&server.config().refresh),
        Arc::new(clock),
        Arc::new(client),
        focus.clone(),
    );
    Session {
        server,
        service,
        scheduler,
        focus,
    }
}

#[tokio::test]
async fn test_active_focused_session_fetches_each_interval() {
    let s = session(helpers::MockServer::start().await, false).await;
    let handle = s.service.start(&s.scheduler);

    s.scheduler.advance(Duration::from_secs(30));
    helpers::wait_until(|| s.server.dashboard_hits() == 1).await;
    helpers::wait_until(|| s.service.in_flight() == 0).await;

    // Stay active with input every 20s.
    s.service.record_event(InputEvent::KeyPress);
    s.scheduler.advance(Duration::from_secs(20));
    s.service.record_event(InputEvent::PointerMove);
    s.scheduler.advance(Duration::from_secs(10));
    helpers::wait_until(|| s.server.dashboard_hits() == 2).await;

    handle.stop();
    let stats = s.service.stats();
    assert_eq!(stats.dispatched, 2);
}

#[tokio::test]
async fn test_idle_and_unfocused_sessions_do_not_fetch() {
    let s = session(helpers::MockServer::start().await, false).await;

    // No input since start: idle from the 60s poll on, so the ticks at
    // 60s and 90s are skipped.
    let _handle = s.service.start(&s.scheduler);
    s.scheduler.advance(Duration::from_secs(30));
    helpers::wait_until(|| s.server.dashboard_hits() == 1).await;

    s.scheduler.advance(Duration::from_secs(60));
    assert_eq!(s.service.state(), ActivityState::Idle);
    assert_eq!(s.service.stats().skipped_idle, 2);

    // Input while idle is picked up by the next poll.
    s.service.record_event(InputEvent::Scroll);
    s.focus.set_focused(false);
    s.scheduler.advance(Duration::from_secs(30));
    assert_eq!(s.service.state(), ActivityState::Active);
    assert_eq!(s.service.stats().skipped_unfocused, 1);

    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(s.server.dashboard_hits(), 1);
}

#[tokio::test]
async fn test_expired_session_counts_failed_refreshes() {
    let s = session(helpers::MockServer::start().await, true).await;

    match s.service.tick() {
        TickOutcome::Dispatched(task) => task.await.unwrap(),
        TickOutcome::Skipped(reason) => panic!("tick skipped: {reason:?}"),
    }

    let stats = s.service.stats();
    assert_eq!(stats.failed, 1);
    assert_eq!(stats.succeeded, 0);
    assert_eq!(s.server.dashboard_hits(), 0);

    // Failures are not retried and do not stop later ticks.
    assert!(s.service.tick().is_dispatched());
    assert!(!matches!(
        s.service.tick(),
        TickOutcome::Skipped(SkipReason::Idle | SkipReason::Unfocused)
    ));
}
