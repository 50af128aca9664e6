use core::cell::RefCell;
use core::fmt;

use embassy_sync::blocking_mutex::{Mutex, raw::CriticalSectionRawMutex};

use super::{ActivityTicket, BlinkActivity, BlinkConfig, SpawnError, TaskRuntime};
use crate::gpio::{GpioOutput, SharedPin};

/// Error returned by [`LifecycleController::start`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleError {
    /// The task runtime refused to spawn the blink activity
    Spawn(SpawnError),
}

impl fmt::Display for LifecycleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LifecycleError::Spawn(e) => write!(f, "failed to spawn blink task: {}", e),
        }
    }
}

impl From<SpawnError> for LifecycleError {
    fn from(e: SpawnError) -> Self {
        LifecycleError::Spawn(e)
    }
}

/// Observable lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    Idle,
    Running,
}

/// Start/stop interface used by the request router.
pub trait BlinkControl {
    /// Start blinking. Starting while already running is a no-op.
    fn start_blinking(&self) -> Result<(), LifecycleError>;

    /// Stop blinking and hold the pin low. Stopping while idle is a no-op.
    fn stop_blinking(&self);
}

enum Slot<H> {
    Idle,
    Running { handle: H, ticket: ActivityTicket },
}

enum StartOutcome {
    AlreadyRunning(ActivityTicket),
    Started(ActivityTicket),
    Failed(ActivityTicket, SpawnError),
}

struct Inner<R, H> {
    slot: Slot<H>,
    runtime: R,
    next_ticket: u32,
}

impl<R, H> Inner<R, H> {
    fn issue_ticket(&mut self) -> ActivityTicket {
        let ticket = ActivityTicket::new(self.next_ticket);
        self.next_ticket = self.next_ticket.wrapping_add(1);
        ticket
    }
}

/// Owner of the single blink activity.
///
/// State and runtime live behind one critical section mutex, so the
/// check-then-spawn in [`start`](Self::start) and check-then-terminate in
/// [`stop`](Self::stop) are atomic with respect to each other.
pub struct LifecycleController<'a, P, R: TaskRuntime<'a, P>> {
    pin: &'a SharedPin<P>,
    config: BlinkConfig,
    inner: Mutex<CriticalSectionRawMutex, RefCell<Inner<R, R::Handle>>>,
}

impl<'a, P: GpioOutput, R: TaskRuntime<'a, P>> LifecycleController<'a, P, R> {
    /// Create an idle controller. The pin is driven low right away.
    pub fn new(pin: &'a SharedPin<P>, runtime: R, config: BlinkConfig) -> Self {
        pin.release();
        Self {
            pin,
            config,
            inner: Mutex::new(RefCell::new(Inner {
                slot: Slot::Idle,
                runtime,
                next_ticket: 1,
            })),
        }
    }

    /// Spawn the blink activity unless it is already running.
    ///
    /// On spawn failure the controller stays idle and the pin stays low.
    pub fn start(&self) -> Result<(), LifecycleError> {
        let outcome = self.inner.lock(|cell| {
            let inner = &mut *cell.borrow_mut();
            if let Slot::Running { ticket, .. } = inner.slot {
                return StartOutcome::AlreadyRunning(ticket);
            }

            let ticket = inner.issue_ticket();
            self.pin.grant(ticket);
            let activity = BlinkActivity::new(self.pin, ticket, self.config.interval_ms);
            match inner.runtime.spawn(activity) {
                Ok(handle) => {
                    inner.slot = Slot::Running { handle, ticket };
                    StartOutcome::Started(ticket)
                }
                Err(e) => {
                    self.pin.release();
                    StartOutcome::Failed(ticket, e)
                }
            }
        });

        // Log sinks may block, keep them out of the critical section
        match outcome {
            StartOutcome::AlreadyRunning(ticket) => {
                log::info!("blink: task {} already running", ticket);
                Ok(())
            }
            StartOutcome::Started(ticket) => {
                log::info!("blink: starting blink task {}", ticket);
                Ok(())
            }
            StartOutcome::Failed(ticket, e) => {
                log::error!("blink: unable to start task {}: {}", ticket, e);
                Err(e.into())
            }
        }
    }

    /// Terminate the blink activity if it is running and hold the pin low.
    ///
    /// The grant is revoked before the runtime is told to terminate, so the
    /// activity cannot write the pin again once cancellation is signalled.
    pub fn stop(&self) {
        let stopped = self.inner.lock(|cell| {
            let inner = &mut *cell.borrow_mut();
            let Slot::Running { handle, ticket } =
                core::mem::replace(&mut inner.slot, Slot::Idle)
            else {
                return None;
            };
            self.pin.release();
            inner.runtime.terminate(handle);
            Some(ticket)
        });

        if let Some(ticket) = stopped {
            log::info!("blink: stopped blink task {}", ticket);
        }
    }

    pub fn state(&self) -> LifecycleState {
        self.inner.lock(|cell| match cell.borrow().slot {
            Slot::Idle => LifecycleState::Idle,
            Slot::Running { .. } => LifecycleState::Running,
        })
    }

    /// Run `op` with shared access to the task runtime.
    pub fn with_runtime<T>(&self, op: impl FnOnce(&R) -> T) -> T {
        self.inner.lock(|cell| op(&cell.borrow().runtime))
    }
}

impl<'a, P: GpioOutput, R: TaskRuntime<'a, P>> BlinkControl
    for LifecycleController<'a, P, R>
{
    fn start_blinking(&self) -> Result<(), LifecycleError> {
        self.start()
    }

    fn stop_blinking(&self) {
        self.stop();
    }
}
