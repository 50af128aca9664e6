//! Test doubles shared by the integration tests.

#![allow(dead_code, unreachable_pub)]

use std::cell::RefCell;
use std::net::IpAddr;
use std::sync::Mutex;

use embedded_hal_async::delay::DelayNs;
use myrtio_blink_core::{
    ActivityTicket,
    BlinkActivity,
    GpioOutput,
    PinLevel,
    RequestLog,
    RequestLogEntry,
    SpawnError,
    TaskRuntime,
};

/// Pin that remembers every write.
#[derive(Debug)]
pub struct RecordingPin {
    pub level: PinLevel,
    pub configured: u32,
    pub writes: Vec<PinLevel>,
}

impl RecordingPin {
    /// A pin left high by whatever ran before the controller.
    pub fn floating_high() -> Self {
        Self {
            level: PinLevel::High,
            configured: 0,
            writes: Vec::new(),
        }
    }
}

impl GpioOutput for RecordingPin {
    fn configure_output(&mut self) {
        self.configured += 1;
    }

    fn write(&mut self, level: PinLevel) {
        self.level = level;
        self.writes.push(level);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeEvent {
    Spawn(ActivityTicket),
    Terminate(ActivityTicket),
}

pub type Parked<'a> = Mutex<Vec<BlinkActivity<'a, RecordingPin>>>;

/// Task runtime that records calls instead of scheduling anything.
///
/// Spawned activities are dropped unless a parking slot is attached, in which
/// case the test can take them out and run them by hand.
pub struct FakeRuntime<'a> {
    pub events: Vec<RuntimeEvent>,
    parked: Option<&'a Parked<'a>>,
    failing: bool,
}

impl<'a> FakeRuntime<'a> {
    pub fn new() -> Self {
        Self {
            events: Vec::new(),
            parked: None,
            failing: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::new()
        }
    }

    pub fn parking(slot: &'a Parked<'a>) -> Self {
        Self {
            parked: Some(slot),
            ..Self::new()
        }
    }

    pub fn spawn_count(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, RuntimeEvent::Spawn(_)))
            .count()
    }

    pub fn terminate_count(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, RuntimeEvent::Terminate(_)))
            .count()
    }

    pub fn live_count(&self) -> usize {
        self.spawn_count() - self.terminate_count()
    }
}

impl<'a> TaskRuntime<'a, RecordingPin> for FakeRuntime<'a> {
    type Handle = ActivityTicket;

    fn spawn(
        &mut self,
        activity: BlinkActivity<'a, RecordingPin>,
    ) -> Result<ActivityTicket, SpawnError> {
        if self.failing {
            return Err(SpawnError::Busy);
        }
        let ticket = activity.ticket();
        self.events.push(RuntimeEvent::Spawn(ticket));
        if let Some(slot) = self.parked {
            slot.lock().unwrap().push(activity);
        }
        Ok(ticket)
    }

    fn terminate(&mut self, handle: ActivityTicket) {
        self.events.push(RuntimeEvent::Terminate(handle));
    }
}

/// Delay that completes immediately and runs a hook after `limit` waits.
pub struct HookDelay<F: FnMut()> {
    pub waits: Vec<u32>,
    limit: usize,
    hook: Option<F>,
}

impl<F: FnMut()> HookDelay<F> {
    pub fn after(limit: usize, hook: F) -> Self {
        Self {
            waits: Vec::new(),
            limit,
            hook: Some(hook),
        }
    }

    fn wait(&mut self, ms: u32) {
        self.waits.push(ms);
        if self.waits.len() >= self.limit {
            if let Some(mut hook) = self.hook.take() {
                hook();
            }
        }
    }
}

impl<F: FnMut()> DelayNs for HookDelay<F> {
    async fn delay_ns(&mut self, ns: u32) {
        self.wait(ns / 1_000_000);
    }

    async fn delay_ms(&mut self, ms: u32) {
        self.wait(ms);
    }
}

/// Request log that keeps entries in memory.
#[derive(Debug, Default)]
pub struct RecordingLog {
    entries: RefCell<Vec<(Option<IpAddr>, String, u16)>>,
}

impl RecordingLog {
    pub fn entries(&self) -> Vec<(Option<IpAddr>, String, u16)> {
        self.entries.borrow().clone()
    }
}

impl RequestLog for RecordingLog {
    fn record(&self, entry: &RequestLogEntry<'_>) {
        self.entries
            .borrow_mut()
            .push((entry.client, entry.path.to_string(), entry.status));
    }
}
