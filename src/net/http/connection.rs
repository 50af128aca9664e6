use core::net::IpAddr;

use embassy_net::tcp::{Error as TcpError, TcpSocket};
use embedded_io_async::Write as _;
use heapless::String;
use myrtio_blink_core::{
    Response,
    http::{
        ContentHeaders,
        HttpMethod,
        ResponseHeaders,
        TargetWriter as _,
        TextEncoding,
        parse_request_line,
    },
};

use super::{Error, HttpResult};

const HEADER_BUFFER_SIZE: usize = 512;
const RESPONSE_HEADER_SIZE: usize = 256;
const STREAM_CHUNK_SIZE: usize = 1024;

/// Request path. Always fits: it is a slice of the header buffer.
pub(crate) type RequestPath = String<HEADER_BUFFER_SIZE>;

/// HTTP connection context
pub(crate) struct HttpConnection<'a> {
    pub method: HttpMethod,
    pub path: RequestPath,

    socket: TcpSocket<'a>,
    client: Option<IpAddr>,
}

impl<'a> HttpConnection<'a> {
    /// Read the request heading from an accepted socket.
    pub(crate) async fn from_socket(mut socket: TcpSocket<'a>) -> Result<Self, Error> {
        let client = socket.remote_endpoint().map(|endpoint| endpoint.addr.into());

        let mut header_buf = [0u8; HEADER_BUFFER_SIZE];
        let (header_end, _) = read_heading(&mut header_buf, &mut socket).await?;
        if header_end == 0 {
            return Err(Error::NoData);
        }

        let (method, raw_path) =
            parse_request_line(&header_buf[..header_end]).ok_or(Error::Parse)?;

        let mut path = RequestPath::new();
        path.push_str(raw_path).map_err(|()| Error::Parse)?;
        Ok(Self {
            method,
            path,
            socket,
            client,
        })
    }

    /// Get request method and path
    pub(crate) fn route(&self) -> (HttpMethod, &'_ str) {
        (self.method, self.path.as_str())
    }

    /// Address of the remote peer, if known
    pub(crate) fn client(&self) -> Option<IpAddr> {
        self.client
    }

    /// Write a complete response and close the connection.
    pub(crate) async fn respond(mut self, response: &Response<'_>) -> HttpResult {
        let body = response.body_bytes();
        // Every served type is text
        let content = ContentHeaders::new(response.content_type)
            .with_text_encoding(TextEncoding::Utf8)
            .with_length(body.len());
        let headers = ResponseHeaders::from_code(response.status).with_content(content);

        self.write_headers(&headers).await?;
        self.write_body(body).await?;
        self.close().await;
        Ok(())
    }

    /// Write the headers to the connection
    async fn write_headers(&mut self, headers: &ResponseHeaders) -> HttpResult {
        let mut buf = String::<RESPONSE_HEADER_SIZE>::new();
        headers.write_to(&mut buf)?;
        self.write_all(buf.as_bytes()).await
    }

    /// Write the body to the connection
    async fn write_body(&mut self, body: &[u8]) -> HttpResult {
        for chunk in body.chunks(STREAM_CHUNK_SIZE) {
            self.write_all(chunk).await?;
        }
        Ok(())
    }

    async fn write_all(&mut self, buf: &[u8]) -> HttpResult {
        self.socket.write_all(buf).await?;
        self.socket.flush().await?;
        Ok(())
    }

    /// Send FIN and wait until the peer has our data.
    async fn close(&mut self) {
        self.socket.close();
        let _ = self.socket.flush().await;
    }
}

/// Read the start line and headers from the socket.
///
/// Returns the position of the end of the headers and the length of the data
/// read. If the peer closes before sending anything, returns (0, 0).
async fn read_heading(
    buf: &mut [u8],
    socket: &mut TcpSocket<'_>,
) -> Result<(usize, usize), TcpError> {
    let mut header_len = 0;
    let mut header_end = None;
    loop {
        let n = socket.read(&mut buf[header_len..]).await?;
        if n == 0 {
            break;
        }
        header_len += n;
        if let Some(pos) = buf[..header_len].windows(4).position(|w| w == b"\r\n\r\n") {
            header_end = Some(pos + 4);
            break;
        }
        // Oversized heading: the request line is all we need
        if header_len >= buf.len() {
            break;
        }
    }

    Ok((header_end.unwrap_or(header_len), header_len))
}
