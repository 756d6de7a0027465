//! Dashboard auto-refresh settings.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Cadence and thresholds of the activity-aware dashboard refresh.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshConfig {
    /// Path fetched on every refresh.
    #[serde(default = "default_dashboard_path")]
    pub dashboard_path: String,
    /// Interval between refresh attempts in milliseconds.
    #[serde(default = "default_refresh_interval")]
    pub refresh_interval_ms: u64,
    /// Interval between activity re-evaluations in milliseconds.
    #[serde(default = "default_activity_poll_interval")]
    pub activity_poll_interval_ms: u64,
    /// Input older than this marks the user idle, in milliseconds.
    #[serde(default = "default_inactivity_threshold")]
    pub inactivity_threshold_ms: u64,
    /// Drop a tick while the previous refresh is still in flight.
    #[serde(default = "default_true")]
    pub skip_when_in_flight: bool,
}

impl RefreshConfig {
    /// Refresh cadence as a [`Duration`].
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_millis(self.refresh_interval_ms)
    }

    /// Activity poll cadence as a [`Duration`].
    pub fn activity_poll_interval(&self) -> Duration {
        Duration::from_millis(self.activity_poll_interval_ms)
    }

    /// Inactivity threshold as a [`Duration`].
    pub fn inactivity_threshold(&self) -> Duration {
        Duration::from_millis(self.inactivity_threshold_ms)
    }
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            dashboard_path: default_dashboard_path(),
            refresh_interval_ms: default_refresh_interval(),
            activity_poll_interval_ms: default_activity_poll_interval(),
            inactivity_threshold_ms: default_inactivity_threshold(),
            skip_when_in_flight: true,
        }
    }
}

fn default_dashboard_path() -> String {
    "/dashboard".to_string()
}

fn default_refresh_interval() -> u64 {
    30_000
}

fn default_activity_poll_interval() -> u64 {
    10_000
}

fn default_inactivity_threshold() -> u64 {
    60_000
}

fn default_true() -> bool {
    true
}
