use core::fmt;

use embedded_hal_async::delay::DelayNs;

use crate::gpio::{GpioOutput, PinLevel, SharedPin};

/// Identifies one blink activity instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActivityTicket(u32);

impl ActivityTicket {
    pub(crate) const fn new(id: u32) -> Self {
        Self(id)
    }
}

impl fmt::Display for ActivityTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The periodic unit of work: toggles the shared pin every `interval_ms`.
///
/// Created only by the lifecycle controller. The activity keeps running while
/// its ticket owns the pin; once the controller revokes the grant the next
/// write is refused and [`BlinkActivity::run`] returns.
pub struct BlinkActivity<'a, P> {
    pin: &'a SharedPin<P>,
    ticket: ActivityTicket,
    interval_ms: u32,
}

impl<'a, P: GpioOutput> BlinkActivity<'a, P> {
    pub(crate) const fn new(
        pin: &'a SharedPin<P>,
        ticket: ActivityTicket,
        interval_ms: u32,
    ) -> Self {
        Self {
            pin,
            ticket,
            interval_ms,
        }
    }

    pub const fn ticket(&self) -> ActivityTicket {
        self.ticket
    }

    pub const fn interval_ms(&self) -> u32 {
        self.interval_ms
    }

    /// Set the pin high, wait, set it low, wait, until the grant is revoked.
    pub async fn run<D: DelayNs>(self, mut delay: D) {
        log::info!("blink: task {} started", self.ticket);
        let mut level = PinLevel::High;
        while self.pin.drive(self.ticket, level) {
            delay.delay_ms(self.interval_ms).await;
            level = !level;
        }
        log::info!("blink: task {} finished", self.ticket);
    }
}
