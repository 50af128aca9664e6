use esp_hal::gpio::{DriveMode, Level, Output, OutputConfig, OutputPin};
use myrtio_blink_core::{GpioOutput, PinLevel};

/// Status LED on a push-pull GPIO.
pub struct LedPin {
    output: Output<'static>,
}

impl LedPin {
    /// Take the GPIO as an output, starting low.
    pub fn new(gpio: impl OutputPin + 'static) -> Self {
        Self {
            output: Output::new(gpio, Level::Low, output_config()),
        }
    }
}

fn output_config() -> OutputConfig {
    OutputConfig::default().with_drive_mode(DriveMode::PushPull)
}

impl GpioOutput for LedPin {
    fn configure_output(&mut self) {
        self.output.apply_config(&output_config());
    }

    fn write(&mut self, level: PinLevel) {
        self.output.set_level(match level {
            PinLevel::Low => Level::Low,
            PinLevel::High => Level::High,
        });
    }
}
