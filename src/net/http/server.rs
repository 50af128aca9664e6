use embassy_net::{Stack, tcp::TcpSocket};
use embassy_time::Duration;
#[cfg(feature = "log")]
use esp_println::println;

use super::{HttpResult, connection::HttpConnection};

const SOCKET_TIMEOUT: Duration = Duration::from_secs(30);

pub(crate) trait HttpHandler {
    async fn handle_request(&self, conn: HttpConnection<'_>) -> HttpResult;
}

/// Accept loop serving one connection at a time.
pub(crate) struct HttpServer<'a, T: HttpHandler> {
    handler: &'a T,
    port: u16,
}

impl<'a, T: HttpHandler> HttpServer<'a, T> {
    pub(crate) fn new(handler: &'a T, port: u16) -> Self {
        Self { handler, port }
    }

    pub(crate) async fn listen_and_serve(
        &self,
        stack: Stack<'static>,
        rx_buffer: &mut [u8],
        tx_buffer: &mut [u8],
    ) -> ! {
        loop {
            let mut socket = TcpSocket::new(stack, rx_buffer, tx_buffer);
            socket.set_timeout(Some(SOCKET_TIMEOUT));

            if let Err(_e) = socket.accept(self.port).await {
                #[cfg(feature = "log")]
                println!("http_server: accept error: {:?}", _e);
                continue;
            }

            let conn = match HttpConnection::from_socket(socket).await {
                Ok(connection) => connection,
                Err(_e) => {
                    #[cfg(feature = "log")]
                    println!("http_server: connection startup error: {}", _e);
                    continue;
                }
            };

            if let Err(e) = self.handler.handle_request(conn).await {
                log::warn!("http: connection error: {}", e);
            }
        }
    }
}
