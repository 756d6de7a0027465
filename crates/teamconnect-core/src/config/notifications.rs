//! Toast notification settings.

use serde::{Deserialize, Serialize};

/// Toast notification timings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationsConfig {
    /// How long a toast stays visible when no duration is given (0 = sticky).
    #[serde(default = "default_duration")]
    pub default_duration_ms: u64,
    /// Show the welcome toast when a dashboard session starts.
    #[serde(default = "default_true")]
    pub welcome_enabled: bool,
    /// Delay before the welcome toast appears.
    #[serde(default = "default_welcome_delay")]
    pub welcome_delay_ms: u64,
    /// Lifetime of the welcome toast.
    #[serde(default = "default_welcome_duration")]
    pub welcome_duration_ms: u64,
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self {
            default_duration_ms: default_duration(),
            welcome_enabled: true,
            welcome_delay_ms: default_welcome_delay(),
            welcome_duration_ms: default_welcome_duration(),
        }
    }
}

fn default_duration() -> u64 {
    5000
}

fn default_true() -> bool {
    true
}

fn default_welcome_delay() -> u64 {
    1000
}

fn default_welcome_duration() -> u64 {
    3000
}
