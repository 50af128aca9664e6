//! GPIO output abstraction
//!
//! The blink pin is shared between the lifecycle controller and the blink
//! activity. [`SharedPin`] keeps the pin together with the ticket of the only
//! activity allowed to drive it, so a write from a revoked activity can never
//! land after the controller has released the pin.

use core::cell::RefCell;
use core::ops::Not;

use embassy_sync::blocking_mutex::{Mutex, raw::CriticalSectionRawMutex};

use crate::lifecycle::ActivityTicket;

/// Digital output level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinLevel {
    Low,
    High,
}

impl Not for PinLevel {
    type Output = Self;

    fn not(self) -> Self::Output {
        match self {
            PinLevel::Low => PinLevel::High,
            PinLevel::High => PinLevel::Low,
        }
    }
}

/// Output-capable GPIO pin.
///
/// Implementations are expected to be infallible and fast: both methods are
/// called with the pin lock held.
pub trait GpioOutput {
    /// Configure the pin as a push-pull output.
    fn configure_output(&mut self);

    /// Drive the pin to the given level.
    fn write(&mut self, level: PinLevel);
}

struct PinSlot<P> {
    pin: P,
    owner: Option<ActivityTicket>,
}

/// GPIO pin guarded by a critical section mutex.
pub struct SharedPin<P> {
    inner: Mutex<CriticalSectionRawMutex, RefCell<PinSlot<P>>>,
}

impl<P: GpioOutput> SharedPin<P> {
    pub const fn new(pin: P) -> Self {
        Self {
            inner: Mutex::new(RefCell::new(PinSlot { pin, owner: None })),
        }
    }

    /// Drive the pin on behalf of an activity.
    ///
    /// Returns `false` without touching the pin when `ticket` no longer owns it.
    pub fn drive(&self, ticket: ActivityTicket, level: PinLevel) -> bool {
        self.inner.lock(|cell| {
            let mut slot = cell.borrow_mut();
            if slot.owner != Some(ticket) {
                return false;
            }
            slot.pin.write(level);
            true
        })
    }

    /// Ticket of the activity currently allowed to drive the pin.
    pub fn owner(&self) -> Option<ActivityTicket> {
        self.inner.lock(|cell| cell.borrow().owner)
    }

    /// Run `op` with shared access to the underlying pin.
    pub fn with_pin<R>(&self, op: impl FnOnce(&P) -> R) -> R {
        self.inner.lock(|cell| op(&cell.borrow().pin))
    }

    /// Configure the pin as output and hand it over to `ticket`.
    pub(crate) fn grant(&self, ticket: ActivityTicket) {
        self.inner.lock(|cell| {
            let mut slot = cell.borrow_mut();
            slot.pin.configure_output();
            slot.owner = Some(ticket);
        });
    }

    /// Revoke any grant and hold the pin low.
    pub(crate) fn release(&self) {
        self.inner.lock(|cell| {
            let mut slot = cell.borrow_mut();
            slot.owner = None;
            slot.pin.write(PinLevel::Low);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Probe {
        configured: bool,
        writes: std::vec::Vec<PinLevel>,
    }

    impl GpioOutput for Probe {
        fn configure_output(&mut self) {
            self.configured = true;
        }

        fn write(&mut self, level: PinLevel) {
            self.writes.push(level);
        }
    }

    #[test]
    fn drive_requires_current_grant() {
        let pin = SharedPin::new(Probe::default());
        let first = ActivityTicket::new(1);
        let second = ActivityTicket::new(2);

        assert!(!pin.drive(first, PinLevel::High));

        pin.grant(first);
        assert!(pin.with_pin(|p| p.configured));
        assert!(pin.drive(first, PinLevel::High));
        assert!(!pin.drive(second, PinLevel::Low));

        pin.release();
        assert!(!pin.drive(first, PinLevel::Low));
        assert_eq!(pin.owner(), None);
        pin.with_pin(|p| assert_eq!(p.writes, [PinLevel::High, PinLevel::Low]));
    }

    #[test]
    fn level_negation() {
        assert_eq!(!PinLevel::High, PinLevel::Low);
        assert_eq!(!PinLevel::Low, PinLevel::High);
    }
}
