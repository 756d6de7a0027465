//! Activity state definitions.

use serde::{Deserialize, Serialize};

/// Whether the user is currently considered present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityState {
    /// Recent qualifying input was seen.
    #[default]
    Active,
    /// No qualifying input within the inactivity threshold.
    Idle,
}

impl ActivityState {
    /// `true` for [`ActivityState::Active`].
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }

    /// Converts to string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Idle => "idle",
        }
    }
}
