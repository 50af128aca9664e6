use core::fmt;

use super::BlinkActivity;

/// Error returned by a task runtime that could not start an activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnError {
    /// No free task slot is available
    Busy,
}

impl fmt::Display for SpawnError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpawnError::Busy => write!(f, "no free task slot"),
        }
    }
}

/// Scheduler able to run a blink activity concurrently with the caller and
/// to tear it down by handle.
///
/// Both calls are made with the controller lock held and must not block.
pub trait TaskRuntime<'a, P> {
    /// Handle identifying a spawned activity.
    type Handle;

    /// Schedule `activity` to run until terminated.
    fn spawn(
        &mut self,
        activity: BlinkActivity<'a, P>,
    ) -> Result<Self::Handle, SpawnError>;

    /// Request termination of a previously spawned activity.
    fn terminate(&mut self, handle: Self::Handle);
}
