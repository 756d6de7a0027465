//! Toast notifications.
//!
//! Toasts expire on the injected [`Clock`]; nothing here sleeps. Hosts call
//! [`NotificationCenter::prune`] whenever they redraw.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::time::Instant;

use teamconnect_core::config::NotificationsConfig;
use teamconnect_core::error::AppError;
use teamconnect_core::traits::Clock;

/// Greeting shown when a dashboard session opens.
pub const WELCOME_MESSAGE: &str = "Welcome to TeamConnect! Share and collaborate with your team.";

/// Shown after a snippet was copied to the clipboard.
pub const COPY_SUCCEEDED: &str = "Code copied to clipboard!";

/// Shown when the clipboard refused the snippet.
pub const COPY_FAILED: &str = "Failed to copy code";

/// Lifetime of the copy feedback toasts.
pub const COPY_TOAST_DURATION: Duration = Duration::from_secs(2);

/// Toast severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    /// Neutral information.
    #[default]
    Info,
    /// An action succeeded.
    Success,
    /// Something needs attention.
    Warning,
    /// An action failed.
    Error,
}

impl NotificationKind {
    /// Icon class.
    pub fn icon(&self) -> &'static str {
        match self {
            Self::Info => "fas fa-info-circle",
            Self::Success => "fas fa-check-circle",
            Self::Warning => "fas fa-exclamation-triangle",
            Self::Error => "fas fa-exclamation-circle",
        }
    }

    /// CSS colour variable of the icon. Warnings share the info colour.
    pub fn color_var(&self) -> &'static str {
        match self {
            Self::Error => "--danger-color",
            Self::Success => "--success-color",
            Self::Info | Self::Warning => "--info-color",
        }
    }

    /// Lowercase name, used in the `notification-{kind}` class.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NotificationKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "info" => Ok(Self::Info),
            "success" => Ok(Self::Success),
            "warning" => Ok(Self::Warning),
            "error" => Ok(Self::Error),
            other => Err(AppError::validation(format!(
                "Unknown notification kind '{other}'"
            ))),
        }
    }
}

/// A toast on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    /// Id returned by [`NotificationCenter::show`].
    pub id: u64,
    /// Text shown.
    pub message: String,
    /// Severity.
    pub kind: NotificationKind,
    /// When the toast was shown.
    pub shown_at: Instant,
    /// When it disappears; `None` for sticky toasts.
    pub expires_at: Option<Instant>,
}

impl Toast {
    /// Whether the toast has expired at `now`.
    pub fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|at| now >= at)
    }

    /// CSS class list of the toast element.
    pub fn class_name(&self) -> String {
        format!("notification notification-{}", self.kind)
    }
}

impl fmt::Display for Toast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind, self.message)
    }
}

/// Holds the toasts currently on screen, oldest first.
#[derive(Debug)]
pub struct NotificationCenter {
    clock: Arc<dyn Clock>,
    default_duration: Duration,
    next_id: u64,
    toasts: Vec<Toast>,
}

impl NotificationCenter {
    /// Create an empty center.
    pub fn new(clock: Arc<dyn Clock>, default_duration: Duration) -> Self {
        Self {
            clock,
            default_duration,
            next_id: 1,
            toasts: Vec::new(),
        }
    }

    /// Create a center with the configured default lifetime.
    pub fn from_config(clock: Arc<dyn Clock>, config: &NotificationsConfig) -> Self {
        Self::new(clock, Duration::from_millis(config.default_duration_ms))
    }

    /// Show a toast. A zero `duration` keeps it until dismissed.
    pub fn show(&mut self, message: impl Into<String>, kind: NotificationKind, duration: Duration) -> u64 {
        let id = self.next_id;
        self.next_id += 1;

        let shown_at = self.clock.now();
        let toast = Toast {
            id,
            message: message.into(),
            kind,
            shown_at,
            expires_at: (!duration.is_zero()).then(|| shown_at + duration),
        };
        tracing::debug!("Toast #{} shown: {}", id, toast);
        self.toasts.push(toast);
        id
    }

    /// Show a toast with the default lifetime.
    pub fn notify(&mut self, message: impl Into<String>, kind: NotificationKind) -> u64 {
        self.show(message, kind, self.default_duration)
    }

    /// Show the session greeting.
    pub fn welcome(&mut self, duration: Duration) -> u64 {
        self.show(WELCOME_MESSAGE, NotificationKind::Info, duration)
    }

    /// Report the outcome of copying a snippet to the clipboard.
    pub fn code_copied(&mut self, copied: bool) -> u64 {
        if copied {
            self.show(COPY_SUCCEEDED, NotificationKind::Success, COPY_TOAST_DURATION)
        } else {
            self.show(COPY_FAILED, NotificationKind::Error, COPY_TOAST_DURATION)
        }
    }

    /// Remove a toast. Returns whether it was on screen.
    pub fn dismiss(&mut self, id: u64) -> bool {
        let before = self.toasts.len();
        self.toasts.retain(|t| t.id != id);
        self.toasts.len() != before
    }

    /// Drop toasts expired at `now` and return them.
    pub fn prune(&mut self, now: Instant) -> Vec<Toast> {
        let (expired, live): (Vec<_>, Vec<_>) = std::mem::take(&mut self.toasts)
            .into_iter()
            .partition(|t| t.is_expired(now));
        self.toasts = live;
        expired
    }

    /// Toasts currently on screen.
    pub fn active(&self) -> &[Toast] {
        &self.toasts
    }
}
