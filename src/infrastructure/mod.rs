//! Infrastructure layer
//!
//! ESP32 bindings for the ports of `myrtio-blink-core`: the LED pin, the
//! embassy task runtime, the embedded asset table, the serial request log and
//! the Wi-Fi station.

pub mod drivers;
pub mod services;
pub mod tasks;
pub mod types;
