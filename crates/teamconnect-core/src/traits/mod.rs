//! Core traits defined in `teamconnect-core` and implemented by other crates.

pub mod clock;
pub mod refresh;

pub use clock::{Clock, ManualClock, SystemClock};
pub use refresh::{FocusProbe, RefreshSource, SharedFocus};
