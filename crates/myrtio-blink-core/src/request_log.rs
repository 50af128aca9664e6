//! Per-request log contract

use core::fmt;
use core::net::IpAddr;

use crate::http::StatusCode;

/// Outcome of one handled request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestLogEntry<'a> {
    /// Remote address, if the transport reported one
    pub client: Option<IpAddr>,
    pub path: &'a str,
    pub status: StatusCode,
}

impl fmt::Display for RequestLogEntry<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Client IP: ")?;
        match self.client {
            Some(ip) => write!(f, "{}", ip)?,
            None => write!(f, "unknown")?,
        }
        write!(
            f,
            ", Requested URL: {}, Response Code: {}",
            self.path, self.status
        )
    }
}

/// Sink receiving exactly one entry per handled request.
pub trait RequestLog {
    fn record(&self, entry: &RequestLogEntry<'_>);
}

#[cfg(test)]
mod tests {
    use core::net::Ipv4Addr;
    use std::string::ToString;

    use super::*;

    #[test]
    fn display_names_all_fields() {
        let entry = RequestLogEntry {
            client: Some(IpAddr::V4(Ipv4Addr::new(192, 168, 1, 42))),
            path: "/StartBlinking",
            status: 200,
        };

        assert_eq!(
            entry.to_string(),
            "Client IP: 192.168.1.42, Requested URL: /StartBlinking, Response Code: 200"
        );
    }

    #[test]
    fn display_without_client() {
        let entry = RequestLogEntry {
            client: None,
            path: "/nope",
            status: 404,
        };

        assert_eq!(
            entry.to_string(),
            "Client IP: unknown, Requested URL: /nope, Response Code: 404"
        );
    }
}
