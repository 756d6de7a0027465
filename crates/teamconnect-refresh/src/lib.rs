//! # teamconnect-refresh
//!
//! Activity-aware dashboard refresh for the TeamConnect client. Provides:
//!
//! - Host input event classification (which events count as activity)
//! - The refresh controller: active/idle state derived from recent input
//! - A timer scheduler abstraction with a tokio and a manual implementation
//! - The refresh service that wires controller, timers, focus, and the
//!   data source together behind an explicit start/stop handle

pub mod activity;
pub mod controller;
pub mod scheduler;
pub mod service;
pub mod status;

pub use activity::InputEvent;
pub use controller::{RefreshController, RefreshSettings, SkipReason, TickDecision};
pub use scheduler::{ManualScheduler, Scheduler, TimerHandle, TokioScheduler};
pub use service::{RefreshHandle, RefreshService, RefreshStats, TickOutcome};
pub use status::ActivityState;
