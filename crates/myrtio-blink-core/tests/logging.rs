//! Lifecycle log records are emitted with the controller unlocked.
//!
//! The logger below reads controller and pin state on every record. Reading
//! while the controller still holds its state cell would panic on the
//! `RefCell` borrow.

mod support;

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use log::{Level, LevelFilter, Log, Metadata, Record};
use myrtio_blink_core::{
    BlinkConfig,
    LifecycleController,
    LifecycleState,
    PinLevel,
    SharedPin,
};

use support::{FakeRuntime, RecordingPin};

type Controller = LifecycleController<'static, RecordingPin, FakeRuntime<'static>>;

struct StateReadingLogger {
    watched: Mutex<Vec<(&'static Controller, &'static SharedPin<RecordingPin>)>>,
    records: AtomicUsize,
    errors: AtomicUsize,
}

impl Log for StateReadingLogger {
    fn enabled(&self, _metadata: &Metadata<'_>) -> bool {
        true
    }

    fn log(&self, record: &Record<'_>) {
        self.records.fetch_add(1, Ordering::SeqCst);
        if record.level() == Level::Error {
            self.errors.fetch_add(1, Ordering::SeqCst);
        }
        for (controller, pin) in self.watched.lock().unwrap().iter() {
            let _ = controller.state();
            let _ = pin.owner();
            let _ = pin.with_pin(|p| p.level);
        }
    }

    fn flush(&self) {}
}

static LOGGER: StateReadingLogger = StateReadingLogger {
    watched: Mutex::new(Vec::new()),
    records: AtomicUsize::new(0),
    errors: AtomicUsize::new(0),
};

fn watched_controller(runtime: FakeRuntime<'static>) -> &'static Controller {
    let pin: &'static SharedPin<RecordingPin> =
        Box::leak(Box::new(SharedPin::new(RecordingPin::floating_high())));
    let controller: &'static Controller =
        Box::leak(Box::new(LifecycleController::new(pin, runtime, BlinkConfig::default())));
    LOGGER.watched.lock().unwrap().push((controller, pin));
    controller
}

#[test]
fn logger_can_read_state_during_lifecycle_records() {
    log::set_logger(&LOGGER).unwrap();
    log::set_max_level(LevelFilter::Trace);

    let controller = watched_controller(FakeRuntime::new());
    controller.start().unwrap();
    controller.start().unwrap();
    controller.stop();
    controller.stop();
    assert_eq!(controller.state(), LifecycleState::Idle);

    let broken = watched_controller(FakeRuntime::failing());
    assert!(broken.start().is_err());
    assert_eq!(broken.state(), LifecycleState::Idle);
    assert_eq!(
        LOGGER.watched.lock().unwrap()[1].1.with_pin(|p| p.level),
        PinLevel::Low
    );

    // started, already running, stopped, unable to start
    assert_eq!(LOGGER.records.load(Ordering::SeqCst), 4);
    assert_eq!(LOGGER.errors.load(Ordering::SeqCst), 1);
}
