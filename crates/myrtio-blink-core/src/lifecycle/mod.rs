//! Blink task lifecycle
//!
//! The controller owns at most one live blink activity. `start` and `stop`
//! are idempotent and the whole check-and-transition runs under one lock, so
//! concurrent callers always observe a serialized sequence of transitions.

mod activity;
mod controller;
mod runtime;

pub use activity::{ActivityTicket, BlinkActivity};
pub use controller::{BlinkControl, LifecycleController, LifecycleError, LifecycleState};
pub use runtime::{SpawnError, TaskRuntime};

/// Blink timing, injected at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlinkConfig {
    /// Time the pin stays at each level, in milliseconds.
    pub interval_ms: u32,
}

impl BlinkConfig {
    pub const fn new(interval_ms: u32) -> Self {
        Self { interval_ms }
    }
}

impl Default for BlinkConfig {
    fn default() -> Self {
        Self::new(500)
    }
}
