pub(crate) mod connection;
pub(crate) mod server;

pub(crate) use connection::HttpConnection;
pub(crate) use server::{HttpHandler, HttpServer};

/// HTTP connection error.
#[derive(Debug)]
pub enum Error {
    /// Peer reset the connection
    Closed,
    /// Request line is not valid UTF-8 or names an unknown method
    Parse,
    /// Peer closed the connection before sending a request
    NoData,
    /// Response headers did not fit the header buffer
    FormatHeaders,
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::Closed => write!(f, "connection reset"),
            Error::Parse => write!(f, "malformed request"),
            Error::NoData => write!(f, "empty request"),
            Error::FormatHeaders => write!(f, "response headers overflow"),
        }
    }
}

impl From<core::fmt::Error> for Error {
    fn from(_error: core::fmt::Error) -> Self {
        Error::FormatHeaders
    }
}

impl From<embassy_net::tcp::Error> for Error {
    fn from(err: embassy_net::tcp::Error) -> Self {
        match err {
            embassy_net::tcp::Error::ConnectionReset => Error::Closed,
        }
    }
}

pub(crate) type HttpResult = Result<(), Error>;
