mod assets;
mod request_log;

pub use assets::{log_asset_inventory, web_asset_store};
pub use request_log::SerialRequestLog;
