//! HTTP/1.1 framing helpers
//!
//! Response header formatting and request line parsing. Socket I/O stays in
//! the firmware; everything here writes to a [`core::fmt::Write`] target.

use core::fmt::Write;

pub type StatusCode = u16;

pub const STATUS_OK: StatusCode = 200;
pub const STATUS_NOT_FOUND: StatusCode = 404;
pub const STATUS_INTERNAL_ERROR: StatusCode = 500;

fn reason_phrase(code: StatusCode) -> &'static str {
    match code {
        STATUS_OK => "OK",
        STATUS_NOT_FOUND => "Not Found",
        STATUS_INTERNAL_ERROR => "Internal Server Error",
        _ => "Unknown",
    }
}

/// HTTP Content Type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentType {
    TextPlain,
    TextHtml,
    TextCss,
    ApplicationJavascript,
}

impl ContentType {
    /// Convert the content type to a string.
    pub const fn as_str(self) -> &'static str {
        match self {
            ContentType::TextPlain => "text/plain",
            ContentType::TextHtml => "text/html",
            ContentType::TextCss => "text/css",
            ContentType::ApplicationJavascript => "application/javascript",
        }
    }
}

/// Text Encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    Utf8,
}

impl TextEncoding {
    /// Convert the text encoding to a string.
    pub const fn as_str(self) -> &'static str {
        match self {
            TextEncoding::Utf8 => "utf-8",
        }
    }
}

/// HTTP socket connection policy.
#[derive(Debug, Clone, Copy)]
enum ConnectionPolicy {
    Close,
}

impl ConnectionPolicy {
    const fn as_str(self) -> &'static str {
        match self {
            ConnectionPolicy::Close => "close",
        }
    }
}

/// Something that serializes itself into header lines.
pub trait TargetWriter {
    fn write_to(&self, writer: &mut impl Write) -> Result<(), core::fmt::Error>;
}

/// HTTP Content Headers.
#[derive(Debug, Clone, Copy)]
pub struct ContentHeaders {
    content_type: ContentType,
    content_length: Option<usize>,
    text_encoding: Option<TextEncoding>,
}

impl ContentHeaders {
    /// Create a new content headers with a content type.
    pub const fn new(content_type: ContentType) -> Self {
        Self {
            content_type,
            content_length: None,
            text_encoding: None,
        }
    }

    /// Set the content length.
    #[must_use]
    pub const fn with_length(mut self, length: usize) -> Self {
        self.content_length = Some(length);
        self
    }

    /// Set the text encoding.
    #[must_use]
    pub const fn with_text_encoding(mut self, text_encoding: TextEncoding) -> Self {
        self.text_encoding = Some(text_encoding);
        self
    }
}

impl TargetWriter for ContentHeaders {
    fn write_to(&self, writer: &mut impl Write) -> Result<(), core::fmt::Error> {
        write!(writer, "Content-Type: {}", self.content_type.as_str())?;
        if let Some(text_encoding) = self.text_encoding {
            write!(writer, "; charset={}", text_encoding.as_str())?;
        }
        write!(writer, "\r\n")?;
        if let Some(content_length) = self.content_length {
            write!(writer, "Content-Length: {}\r\n", content_length)?;
        }
        Ok(())
    }
}

/// Response Headers.
#[derive(Debug, Clone, Copy)]
pub struct ResponseHeaders {
    status: StatusCode,
    connection: ConnectionPolicy,
    content: Option<ContentHeaders>,
}

impl ResponseHeaders {
    /// Create response headers with a status code.
    pub const fn from_code(code: StatusCode) -> Self {
        Self {
            status: code,
            content: None,
            connection: ConnectionPolicy::Close,
        }
    }

    /// Set the content headers.
    #[must_use]
    pub const fn with_content(mut self, content: ContentHeaders) -> Self {
        self.content = Some(content);
        self
    }
}

impl TargetWriter for ResponseHeaders {
    fn write_to(&self, writer: &mut impl Write) -> Result<(), core::fmt::Error> {
        let reason = reason_phrase(self.status);
        write!(writer, "HTTP/1.1 {} {}\r\n", self.status, reason)?;
        if let Some(content) = &self.content {
            content.write_to(writer)?;
        }

        write!(writer, "Connection: {}\r\n", self.connection.as_str())?;
        write!(writer, "\r\n")?;
        Ok(())
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Options,
    Head,
    Trace,
    Connect,
    /// Any other method token; never matches a route
    Extension,
}

impl HttpMethod {
    pub fn from_token(token: &[u8]) -> Self {
        match token {
            b"GET" => HttpMethod::Get,
            b"POST" => HttpMethod::Post,
            b"PUT" => HttpMethod::Put,
            b"DELETE" => HttpMethod::Delete,
            b"PATCH" => HttpMethod::Patch,
            b"OPTIONS" => HttpMethod::Options,
            b"HEAD" => HttpMethod::Head,
            b"TRACE" => HttpMethod::Trace,
            b"CONNECT" => HttpMethod::Connect,
            _ => HttpMethod::Extension,
        }
    }
}

/// Path reported for a request target that is not valid UTF-8.
pub const UNDECODABLE_PATH: &str = "<invalid utf-8>";

/// Parse the request line at the start of a request heading.
///
/// Returns the method and the path with any query string removed. Only a
/// line without a method or a target is rejected.
pub fn parse_request_line(heading: &[u8]) -> Option<(HttpMethod, &str)> {
    let line_end = heading
        .windows(2)
        .position(|w| w == b"\r\n")
        .unwrap_or(heading.len());
    let mut parts = heading[..line_end]
        .split(u8::is_ascii_whitespace)
        .filter(|part| !part.is_empty());
    let method = HttpMethod::from_token(parts.next()?);
    let target = parts.next()?;
    let path = target.split(|&b| b == b'?').next().unwrap_or(target);
    let path = core::str::from_utf8(path).unwrap_or(UNDECODABLE_PATH);

    Some((method, path))
}

#[cfg(test)]
mod tests {
    use heapless::String;

    use super::*;

    #[test]
    fn writes_status_line_content_and_connection() {
        let content = ContentHeaders::new(ContentType::TextHtml)
            .with_text_encoding(TextEncoding::Utf8)
            .with_length(13);
        let headers = ResponseHeaders::from_code(STATUS_OK).with_content(content);

        let mut out = String::<256>::new();
        headers.write_to(&mut out).unwrap();

        assert_eq!(
            out.as_str(),
            "HTTP/1.1 200 OK\r\n\
             Content-Type: text/html; charset=utf-8\r\n\
             Content-Length: 13\r\n\
             Connection: close\r\n\r\n"
        );
    }

    #[test]
    fn writes_bare_server_error() {
        let mut out = String::<128>::new();
        ResponseHeaders::from_code(STATUS_INTERNAL_ERROR)
            .write_to(&mut out)
            .unwrap();

        assert_eq!(
            out.as_str(),
            "HTTP/1.1 500 Internal Server Error\r\nConnection: close\r\n\r\n"
        );
    }

    #[test]
    fn header_overflow_is_reported() {
        let mut out = String::<8>::new();
        assert!(ResponseHeaders::from_code(STATUS_NOT_FOUND).write_to(&mut out).is_err());
    }

    #[test]
    fn parses_request_line() {
        let raw = b"GET /styles.css HTTP/1.1\r\nHost: 192.168.1.20\r\n\r\n";

        assert_eq!(parse_request_line(raw), Some((HttpMethod::Get, "/styles.css")));
    }

    #[test]
    fn strips_query_string() {
        let (_, path) =
            parse_request_line(b"GET /StartBlinking?t=1700000000 HTTP/1.1\r\n\r\n").unwrap();

        assert_eq!(path, "/StartBlinking");
    }

    #[test]
    fn unknown_method_is_kept_as_extension() {
        let raw = b"BREW /doesnotexist HTTP/1.1\r\nHost: x\r\n\r\n";

        assert_eq!(
            parse_request_line(raw),
            Some((HttpMethod::Extension, "/doesnotexist"))
        );
    }

    #[test]
    fn undecodable_target_still_parses() {
        let raw = b"GET /caf\xe9 HTTP/1.1\r\n\r\n";

        assert_eq!(parse_request_line(raw), Some((HttpMethod::Get, UNDECODABLE_PATH)));
    }

    #[test]
    fn rejects_missing_target() {
        assert!(parse_request_line(b"GET\r\n\r\n").is_none());
        assert!(parse_request_line(b"").is_none());
    }

    #[test]
    fn request_line_without_terminator() {
        assert_eq!(parse_request_line(b"POST /"), Some((HttpMethod::Post, "/")));
    }
}
