mod led;
pub mod wifi_sta;

pub use led::LedPin;
pub use wifi_sta::{NetworkError, start_wifi_sta};
