//! HTTP server task
//!
//! Each task owns one listening socket; running several lets a second client
//! be accepted while the first response is still being written.

use embassy_net::Stack;

use crate::{config::HTTP, controllers::BlinkHttpController, net::http::HttpServer};

pub const HTTP_SERVER_TASKS: usize = 2;

const RX_BUFFER_SIZE: usize = 1024;
const TX_BUFFER_SIZE: usize = 4096;

#[embassy_executor::task(pool_size = HTTP_SERVER_TASKS)]
pub async fn http_server_task(stack: Stack<'static>, handler: &'static BlinkHttpController) {
    let server = HttpServer::new(handler, HTTP.port);
    let mut rx_buffer = [0u8; RX_BUFFER_SIZE];
    let mut tx_buffer = [0u8; TX_BUFFER_SIZE];

    server
        .listen_and_serve(stack, &mut rx_buffer, &mut tx_buffer)
        .await
}
