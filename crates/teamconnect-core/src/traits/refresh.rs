//! Seams between the refresh scheduler and the layers it drives.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;

use crate::result::AppResult;

/// Something that can re-fetch the data behind the current view.
///
/// Implemented by the HTTP client; the refresh service only cares whether
/// the call succeeded.
#[async_trait]
pub trait RefreshSource: Send + Sync + 'static {
    /// Fetch fresh data once.
    async fn refresh(&self) -> AppResult<()>;
}

/// Answers whether the view currently has input focus.
pub trait FocusProbe: Send + Sync + 'static {
    /// `true` when the user is looking at the view.
    fn has_focus(&self) -> bool;
}

/// Focus flag flipped by the host when it sees focus/blur events.
#[derive(Debug)]
pub struct SharedFocus {
    focused: AtomicBool,
}

impl SharedFocus {
    /// Create a focus flag with an initial value.
    pub fn new(focused: bool) -> Self {
        Self {
            focused: AtomicBool::new(focused),
        }
    }

    /// Record a focus change.
    pub fn set_focused(&self, focused: bool) {
        self.focused.store(focused, Ordering::Relaxed);
    }
}

impl Default for SharedFocus {
    fn default() -> Self {
        Self::new(true)
    }
}

impl FocusProbe for SharedFocus {
    fn has_focus(&self) -> bool {
        self.focused.load(Ordering::Relaxed)
    }
}
