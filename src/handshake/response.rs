//! Server upgrade response.
//!
//! From [RFC-6455 Section 4.2](https://datatracker.ietf.org/doc/html/rfc6455#section-4.2):
//!
//! If the server chooses to accept the incoming connection, it MUST
//! reply with a valid HTTP response.
//!
//! Example:
//!
//! ```text
//! HTTP/1.1 101 Switching Protocols
//! Upgrade: websocket
//! Connection: Upgrade
//! Sec-WebSocket-Accept: s3pPLMBiTxaQ9kYGzzhZRbK+xOo=
//! ```
//!
//! Otherwise a plain text [`Rejection`] is sent and the connection is closed.

use super::HttpHeader;
use super::write_header;
use super::{HTTP_STATUS_LINE, HTTP_VERSION, HTTP_LINE_BREAK, HTTP_HEADER_SP};
use super::static_headers::*;

use crate::bleed::Writer;
use crate::error::HandshakeError;

/// Http response presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Response<'b> {
    pub sec_accept: &'b [u8],
}

impl<'b> Response<'b> {
    /// Constructor.
    #[inline]
    pub const fn new(sec_accept: &'b [u8]) -> Self { Self { sec_accept } }

    /// Encode to a provided buffer, return the number of written bytes.
    ///
    /// Headers `upgrade`, `connection`, and `sec-websocket-accept`
    /// are written to the buffer.
    ///
    /// Caller should make sure the buffer is large enough,
    /// otherwise a [`HandshakeError::NotEnoughCapacity`] error will be returned.
    pub fn encode(&self, buf: &mut [u8]) -> Result<usize, HandshakeError> {
        let mut w = Writer::new(buf);

        // HTTP/1.1 101 Switching Protocols
        w.write_or_err(HTTP_STATUS_LINE, || HandshakeError::NotEnoughCapacity)?;
        w.write_or_err(HTTP_LINE_BREAK, || HandshakeError::NotEnoughCapacity)?;

        // Upgrade: websocket
        write_header!(w, HEADER_UPGRADE_NAME, HEADER_UPGRADE_VALUE);

        // Connection: Upgrade
        write_header!(w, HEADER_CONNECTION_NAME, HEADER_CONNECTION_VALUE);

        // Sec-WebSocket-Accept: {sec_accept}
        write_header!(w, HEADER_SEC_WEBSOCKET_ACCEPT_NAME, self.sec_accept);

        // finish with CRLF
        w.write_or_err(HTTP_LINE_BREAK, || HandshakeError::NotEnoughCapacity)?;

        Ok(w.pos())
    }
}

/// Plain text error response, the connection is closed afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rejection {
    pub status: u16,
    pub reason: &'static str,
}

impl Rejection {
    /// Http reason phrase of the status code.
    pub const fn status_text(&self) -> &'static str {
        match self.status {
            400 => "Bad Request",
            404 => "Not Found",
            431 => "Request Header Fields Too Large",
            500 => "Internal Server Error",
            _ => "Unknown",
        }
    }

    /// Encode to a provided buffer, return the number of written bytes.
    ///
    /// The body is the reason followed by a line feed.
    pub fn encode(&self, buf: &mut [u8]) -> Result<usize, HandshakeError> {
        let mut w = Writer::new(buf);

        macro_rules! writex {
            ($($part: expr),+) => {
                $( w.write_or_err($part, || HandshakeError::NotEnoughCapacity)?; )+
            };
        }

        let status = self.status.to_string();
        let body_len = (self.reason.len() + 1).to_string();

        // HTTP/1.1 {status} {text}
        writex!(
            HTTP_VERSION,
            b" ",
            status.as_bytes(),
            b" ",
            self.status_text().as_bytes(),
            HTTP_LINE_BREAK
        );

        write_header!(w, HEADER_CONTENT_TYPE_NAME, HEADER_CONTENT_TYPE_VALUE);
        write_header!(w, HEADER_CONTENT_LENGTH_NAME, body_len.as_bytes());
        write_header!(w, HEADER_CONNECTION_NAME, HEADER_CONNECTION_CLOSE_VALUE);

        writex!(HTTP_LINE_BREAK, self.reason.as_bytes(), b"\n");

        Ok(w.pos())
    }
}

impl From<&HandshakeError> for Rejection {
    fn from(e: &HandshakeError) -> Self {
        Rejection {
            status: e.status(),
            reason: e.reason(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const RESPONSE: &[u8] = b"\
        HTTP/1.1 101 Switching Protocols\r\n\
        Upgrade: websocket\r\n\
        Connection: Upgrade\r\n\
        Sec-WebSocket-Accept: s3pPLMBiTxaQ9kYGzzhZRbK+xOo=\r\n\r\n";

    #[test]
    fn encode_response() {
        let response = Response::new(b"s3pPLMBiTxaQ9kYGzzhZRbK+xOo=");
        let mut buf = vec![0; 1024];
        let n = response.encode(&mut buf).unwrap();
        assert_eq!(&buf[..n], RESPONSE);

        // parse it back as a client would
        let mut headers = [httparse::EMPTY_HEADER; 8];
        let mut parsed = httparse::Response::new(&mut headers);
        assert_eq!(parsed.parse(&buf[..n]).unwrap(), httparse::Status::Complete(n));
        assert_eq!(parsed.code, Some(101));
    }

    #[test]
    fn encode_response_small_buffer() {
        let response = Response::new(b"s3pPLMBiTxaQ9kYGzzhZRbK+xOo=");
        for len in 0..RESPONSE.len() {
            let mut buf = vec![0; len];
            assert_eq!(
                response.encode(&mut buf),
                Err(HandshakeError::NotEnoughCapacity)
            );
        }
    }

    #[test]
    fn encode_rejection() {
        let rejection = Rejection::from(&HandshakeError::SecWebSocketVersion);
        let mut buf = vec![0; 1024];
        let n = rejection.encode(&mut buf).unwrap();

        let expected: &[u8] = b"\
            HTTP/1.1 400 Bad Request\r\n\
            Content-Type: text/plain; charset=utf-8\r\n\
            Content-Length: 30\r\n\
            Connection: close\r\n\r\n\
            Unsupported WebSocket version\n";
        assert_eq!(&buf[..n], expected);
    }

    #[test]
    fn encode_rejection_status() {
        let rejection = Rejection::from(&HandshakeError::UpgradeUnsupported);
        assert_eq!(rejection.status, 500);
        assert_eq!(rejection.status_text(), "Internal Server Error");

        let mut buf = vec![0; 1024];
        let n = rejection.encode(&mut buf).unwrap();
        assert!(buf[..n].starts_with(b"HTTP/1.1 500 Internal Server Error\r\n"));
        assert!(buf[..n].ends_with(b"Hijacking not supported\n"));
    }
}
