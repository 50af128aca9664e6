mod http;

use myrtio_blink_core::{ROUTES, Router, StaticAssetStore};

pub use http::BlinkHttpController;

use crate::{
    infrastructure::{services::SerialRequestLog, types::BlinkController},
    mk_static,
};

/// Wire the router into the HTTP controller shared by all server tasks.
pub fn init_http_controller(
    assets: &'static StaticAssetStore,
    blinker: &'static BlinkController,
    request_log: &'static SerialRequestLog,
) -> &'static BlinkHttpController {
    let router = Router::new(&ROUTES, assets, blinker, request_log);
    mk_static!(BlinkHttpController, BlinkHttpController::new(router))
}
