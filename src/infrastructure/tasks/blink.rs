//! Embassy runtime for the blink activity
//!
//! Activities run in a small task pool. Termination is signalled with the
//! ticket of the activity to stop; the task races its blink loop against that
//! signal. Ownership of the pin is revoked by the controller before the
//! signal is even observed, so a slow teardown can never toggle the LED.

use embassy_executor::SendSpawner;
use embassy_futures::select::select;
use embassy_sync::{blocking_mutex::raw::CriticalSectionRawMutex, signal::Signal};
use embassy_time::Delay;
use myrtio_blink_core::{ActivityTicket, BlinkActivity, SpawnError, TaskRuntime};

use crate::infrastructure::drivers::LedPin;

/// One running instance plus one still unwinding after a stop.
const BLINK_TASK_POOL: usize = 2;

static BLINK_CANCEL: Signal<CriticalSectionRawMutex, ActivityTicket> = Signal::new();

#[embassy_executor::task(pool_size = BLINK_TASK_POOL)]
async fn blink_task(activity: BlinkActivity<'static, LedPin>) {
    let ticket = activity.ticket();
    select(activity.run(Delay), cancelled(ticket)).await;
}

async fn cancelled(ticket: ActivityTicket) {
    // A signal meant for an older instance is dropped; that instance exits
    // on its next refused write.
    while BLINK_CANCEL.wait().await != ticket {}
    log::info!("blink: task {} cancelled", ticket);
}

/// Spawns blink activities on the embassy executor.
pub struct EmbassyBlinkRuntime {
    spawner: SendSpawner,
}

impl EmbassyBlinkRuntime {
    pub fn new(spawner: SendSpawner) -> Self {
        Self { spawner }
    }
}

impl TaskRuntime<'static, LedPin> for EmbassyBlinkRuntime {
    type Handle = ActivityTicket;

    fn spawn(
        &mut self,
        activity: BlinkActivity<'static, LedPin>,
    ) -> Result<ActivityTicket, SpawnError> {
        let ticket = activity.ticket();
        let token = blink_task(activity).map_err(|_| SpawnError::Busy)?;
        self.spawner.spawn(token);
        Ok(ticket)
    }

    fn terminate(&mut self, handle: ActivityTicket) {
        BLINK_CANCEL.signal(handle);
    }
}
