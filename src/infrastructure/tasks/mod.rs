mod blink;
mod http_server;
mod network;

pub use blink::EmbassyBlinkRuntime;
pub use http_server::{HTTP_SERVER_TASKS, http_server_task};
pub use network::{network_runner_task, wifi_connection_task};
