use myrtio_blink_core::{LifecycleController, Router, SharedPin, StaticAssetStore};

use crate::infrastructure::{
    drivers::LedPin,
    services::SerialRequestLog,
    tasks::EmbassyBlinkRuntime,
};

pub type BlinkPin = SharedPin<LedPin>;
pub type BlinkController = LifecycleController<'static, LedPin, EmbassyBlinkRuntime>;
pub type BlinkRouter =
    Router<'static, StaticAssetStore, BlinkController, SerialRequestLog>;
