//! Activity-aware refresh controller.
//!
//! Pure state machine: it owns the last-activity timestamp and the derived
//! [`ActivityState`], and decides whether a refresh tick should fetch. It
//! performs no I/O and never spawns; [`crate::service::RefreshService`]
//! drives it from timers.

use std::sync::Arc;
use std::time::Duration;

use teamconnect_core::config::RefreshConfig;
use teamconnect_core::traits::Clock;

use crate::activity::{ActivityTracker, InputEvent};
use crate::status::ActivityState;

/// Timing parameters of the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshSettings {
    /// Interval between refresh attempts.
    pub refresh_interval: Duration,
    /// Interval between activity re-evaluations.
    pub activity_poll_interval: Duration,
    /// Input older than this marks the user idle.
    pub inactivity_threshold: Duration,
    /// Drop a tick while the previous refresh is still running.
    pub skip_when_in_flight: bool,
}

impl Default for RefreshSettings {
    fn default() -> Self {
        Self::from(&RefreshConfig::default())
    }
}

impl From<&RefreshConfig> for RefreshSettings {
    fn from(config: &RefreshConfig) -> Self {
        Self {
            refresh_interval: config.refresh_interval(),
            activity_poll_interval: config.activity_poll_interval(),
            inactivity_threshold: config.inactivity_threshold(),
            skip_when_in_flight: config.skip_when_in_flight,
        }
    }
}

/// Why a tick did not fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The user is idle.
    Idle,
    /// The view does not have focus.
    Unfocused,
    /// The previous refresh has not finished yet.
    InFlight,
}

/// Outcome of evaluating a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickDecision {
    /// Fetch now.
    Refresh,
    /// Do nothing this tick.
    Skip(SkipReason),
}

/// Tracks user activity and gates refresh ticks on it.
#[derive(Debug)]
pub struct RefreshController {
    settings: RefreshSettings,
    clock: Arc<dyn Clock>,
    tracker: ActivityTracker,
    state: ActivityState,
}

impl RefreshController {
    /// Create a controller. The user is assumed active at creation.
    pub fn new(settings: RefreshSettings, clock: Arc<dyn Clock>) -> Self {
        let tracker = ActivityTracker::new(clock.now());
        Self {
            settings,
            clock,
            tracker,
            state: ActivityState::Active,
        }
    }

    /// Controller settings.
    pub fn settings(&self) -> &RefreshSettings {
        &self.settings
    }

    /// Current activity state as of the last poll.
    pub fn state(&self) -> ActivityState {
        self.state
    }

    /// Shorthand for `state().is_active()`.
    pub fn is_active(&self) -> bool {
        self.state.is_active()
    }

    /// Record a qualifying input event at the current instant.
    ///
    /// The state does not change here; an idle user becomes active on the
    /// next [`poll_activity`](Self::poll_activity).
    pub fn record_activity(&mut self) {
        self.tracker.record(self.clock.now());
    }

    /// Record a host event if it qualifies. Returns whether it did.
    pub fn record_event(&mut self, event: InputEvent) -> bool {
        if event.is_qualifying() {
            self.record_activity();
            true
        } else {
            false
        }
    }

    /// Recompute the activity state from the last recorded activity.
    pub fn poll_activity(&mut self) -> ActivityState {
        let now = self.clock.now();
        let next = if self
            .tracker
            .active_within(now, self.settings.inactivity_threshold)
        {
            ActivityState::Active
        } else {
            ActivityState::Idle
        };

        if next != self.state {
            tracing::debug!(
                "Activity state changed: {} -> {} (last input {:?} ago)",
                self.state.as_str(),
                next.as_str(),
                now.saturating_duration_since(self.tracker.last_active())
            );
            self.state = next;
        }

        self.state
    }

    /// Decide whether a tick should refresh, given the current view focus.
    pub fn evaluate_tick(&self, has_focus: bool) -> TickDecision {
        if !self.state.is_active() {
            TickDecision::Skip(SkipReason::Idle)
        } else if !has_focus {
            TickDecision::Skip(SkipReason::Unfocused)
        } else {
            TickDecision::Refresh
        }
    }
}
