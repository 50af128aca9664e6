use crate::{
    infrastructure::types::BlinkRouter,
    net::http::{HttpConnection, HttpHandler, HttpResult},
};

/// Serves the blink page and the start/stop endpoints.
pub struct BlinkHttpController {
    router: BlinkRouter,
}

impl BlinkHttpController {
    pub fn new(router: BlinkRouter) -> Self {
        Self { router }
    }
}

impl HttpHandler for BlinkHttpController {
    async fn handle_request(&self, conn: HttpConnection<'_>) -> HttpResult {
        let (method, path) = conn.route();
        let response = self.router.dispatch(method, path, conn.client());
        conn.respond(&response).await
    }
}
