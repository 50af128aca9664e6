use esp_println::println;
use myrtio_blink_core::{RequestLog, RequestLogEntry};

/// Writes one line per request to the serial console.
#[derive(Debug, Default)]
pub struct SerialRequestLog;

impl RequestLog for SerialRequestLog {
    fn record(&self, entry: &RequestLogEntry<'_>) {
        println!("{}", entry);
    }
}
