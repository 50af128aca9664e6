//! Request routing
//!
//! Maps `(method, path)` to either a static asset or a blink command. Every
//! request, matched or not, produces exactly one [`RequestLogEntry`] carrying
//! the status code of the response it was answered with.

use core::fmt::Write as _;
use core::net::IpAddr;

use heapless::String;

use crate::{
    assets::AssetStore,
    http::{
        ContentType,
        HttpMethod,
        STATUS_INTERNAL_ERROR,
        STATUS_NOT_FOUND,
        STATUS_OK,
        StatusCode,
    },
    lifecycle::BlinkControl,
    request_log::{RequestLog, RequestLogEntry},
};

const MESSAGE_CAPACITY: usize = 64;

/// Plain-text response message.
pub type Message = String<MESSAGE_CAPACITY>;

/// Blink command triggered by a control route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlCommand {
    StartBlinking,
    StopBlinking,
}

/// What a route does when matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteAction {
    /// Serve the named asset with a fixed content type, or 404
    Asset {
        name: &'static str,
        content_type: ContentType,
    },
    Control(ControlCommand),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route {
    pub method: HttpMethod,
    pub path: &'static str,
    pub action: RouteAction,
}

impl Route {
    pub const fn asset(
        path: &'static str,
        name: &'static str,
        content_type: ContentType,
    ) -> Self {
        Self {
            method: HttpMethod::Get,
            path,
            action: RouteAction::Asset { name, content_type },
        }
    }

    pub const fn control(path: &'static str, command: ControlCommand) -> Self {
        Self {
            method: HttpMethod::Get,
            path,
            action: RouteAction::Control(command),
        }
    }
}

/// Routes served by the blink firmware.
pub const ROUTES: [Route; 5] = [
    Route::asset("/", "index.html", ContentType::TextHtml),
    Route::asset("/styles.css", "styles.css", ContentType::TextCss),
    Route::asset("/script.js", "script.js", ContentType::ApplicationJavascript),
    Route::control("/StartBlinking", ControlCommand::StartBlinking),
    Route::control("/StopBlinking", ControlCommand::StopBlinking),
];

/// Response body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Body<'a> {
    /// Asset bytes, borrowed from the store
    Asset(&'a [u8]),
    Text(Message),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response<'a> {
    pub status: StatusCode,
    pub content_type: ContentType,
    pub body: Body<'a>,
}

impl<'a> Response<'a> {
    pub fn text(status: StatusCode, text: &str) -> Self {
        let mut message = Message::new();
        let _ = message.push_str(text);
        Self::message(status, message)
    }

    pub fn message(status: StatusCode, message: Message) -> Self {
        Self {
            status,
            content_type: ContentType::TextPlain,
            body: Body::Text(message),
        }
    }

    pub fn asset(content_type: ContentType, bytes: &'a [u8]) -> Self {
        Self {
            status: STATUS_OK,
            content_type,
            body: Body::Asset(bytes),
        }
    }

    pub fn not_found() -> Self {
        Self::text(STATUS_NOT_FOUND, "Not found")
    }

    pub fn body_bytes(&self) -> &[u8] {
        match &self.body {
            Body::Asset(bytes) => bytes,
            Body::Text(message) => message.as_bytes(),
        }
    }
}

/// Request dispatcher.
///
/// The route table is fixed at construction; lookup is by exact
/// `(method, path)` match.
pub struct Router<'a, S, C, L> {
    routes: &'a [Route],
    assets: &'a S,
    blinker: &'a C,
    log: &'a L,
}

impl<'a, S, C, L> Router<'a, S, C, L>
where
    S: AssetStore,
    C: BlinkControl,
    L: RequestLog,
{
    pub const fn new(
        routes: &'a [Route],
        assets: &'a S,
        blinker: &'a C,
        log: &'a L,
    ) -> Self {
        Self {
            routes,
            assets,
            blinker,
            log,
        }
    }

    /// Find the route registered for `(method, path)`.
    pub fn lookup(&self, method: HttpMethod, path: &str) -> Option<&'a Route> {
        self.routes
            .iter()
            .find(|route| route.method == method && route.path == path)
    }

    /// Answer one request and record its outcome.
    pub fn dispatch(
        &self,
        method: HttpMethod,
        path: &str,
        client: Option<IpAddr>,
    ) -> Response<'a> {
        log::info!("http: request for {} received", path);
        let response = match self.lookup(method, path) {
            Some(route) => self.handle(route),
            None => {
                log::info!("http: not found: {}", path);
                Response::not_found()
            }
        };

        self.log.record(&RequestLogEntry {
            client,
            path,
            status: response.status,
        });
        response
    }

    fn handle(&self, route: &Route) -> Response<'a> {
        match route.action {
            RouteAction::Asset { name, content_type } => {
                self.serve_asset(name, content_type)
            }
            RouteAction::Control(command) => self.control(command),
        }
    }

    fn serve_asset(&self, name: &str, content_type: ContentType) -> Response<'a> {
        if !self.assets.exists(name) {
            log::warn!("http: {} not found", name);
            return Response::message(STATUS_NOT_FOUND, describe(name, "not found"));
        }

        let assets: &'a S = self.assets;
        match assets.open(name) {
            Ok(asset) => Response::asset(content_type, asset.bytes()),
            Err(e) => {
                log::error!("http: unable to open {}: {}", name, e);
                Response::message(
                    STATUS_INTERNAL_ERROR,
                    describe(name, "could not be opened"),
                )
            }
        }
    }

    fn control(&self, command: ControlCommand) -> Response<'a> {
        match command {
            ControlCommand::StartBlinking => match self.blinker.start_blinking() {
                Ok(()) => Response::text(STATUS_OK, "Started Blinking"),
                Err(e) => {
                    log::error!("http: {}", e);
                    Response::text(STATUS_INTERNAL_ERROR, "Failed to start blinking")
                }
            },
            ControlCommand::StopBlinking => {
                self.blinker.stop_blinking();
                Response::text(STATUS_OK, "Stopped Blinking")
            }
        }
    }
}

fn describe(name: &str, what: &str) -> Message {
    let mut message = Message::new();
    let _ = write!(message, "{} {}", name, what);
    message
}
