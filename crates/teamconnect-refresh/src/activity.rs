//! Host input events and last-activity tracking.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::time::Instant;

/// An input event reported by the host view, named after its DOM event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputEvent {
    /// `mousedown`
    PointerDown,
    /// `mousemove`
    PointerMove,
    /// `keypress`
    KeyPress,
    /// `scroll`
    Scroll,
    /// `touchstart`
    TouchStart,
    /// `click`
    Click,
    /// `resize`
    Resize,
    /// `focus`
    Focus,
    /// `blur`
    Blur,
}

impl InputEvent {
    /// Events that count as the user being present.
    pub const QUALIFYING: [InputEvent; 5] = [
        Self::PointerDown,
        Self::PointerMove,
        Self::KeyPress,
        Self::Scroll,
        Self::TouchStart,
    ];

    /// Whether this event refreshes the activity timestamp.
    pub fn is_qualifying(&self) -> bool {
        Self::QUALIFYING.contains(self)
    }

    /// The DOM event name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PointerDown => "mousedown",
            Self::PointerMove => "mousemove",
            Self::KeyPress => "keypress",
            Self::Scroll => "scroll",
            Self::TouchStart => "touchstart",
            Self::Click => "click",
            Self::Resize => "resize",
            Self::Focus => "focus",
            Self::Blur => "blur",
        }
    }
}

impl fmt::Display for InputEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a host reports an event name we do not know.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown input event '{0}'")]
pub struct UnknownInputEvent(pub String);

impl FromStr for InputEvent {
    type Err = UnknownInputEvent;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mousedown" | "pointerdown" => Ok(Self::PointerDown),
            "mousemove" | "pointermove" => Ok(Self::PointerMove),
            "keypress" | "keydown" => Ok(Self::KeyPress),
            "scroll" => Ok(Self::Scroll),
            "touchstart" => Ok(Self::TouchStart),
            "click" => Ok(Self::Click),
            "resize" => Ok(Self::Resize),
            "focus" => Ok(Self::Focus),
            "blur" => Ok(Self::Blur),
            other => Err(UnknownInputEvent(other.to_string())),
        }
    }
}

/// Tracks when the user was last active.
#[derive(Debug, Clone)]
pub struct ActivityTracker {
    last_active: Instant,
}

impl ActivityTracker {
    /// Start tracking as if the user had just been active at `now`.
    pub fn new(now: Instant) -> Self {
        Self { last_active: now }
    }

    /// Record activity at `now`. Out-of-order timestamps never move it back.
    pub fn record(&mut self, now: Instant) {
        if now > self.last_active {
            self.last_active = now;
        }
    }

    /// Instant of the most recent activity.
    pub fn last_active(&self) -> Instant {
        self.last_active
    }

    /// Whether activity was seen strictly within `threshold` before `now`.
    pub fn active_within(&self, now: Instant, threshold: std::time::Duration) -> bool {
        now.saturating_duration_since(self.last_active) < threshold
    }
}
