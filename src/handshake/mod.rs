//! Websocket handshake.
//!
//! The server side of the opening handshake:
//! [`Request`] is parsed from the client's upgrade request,
//! [`Request::negotiate`] validates it and derives the accept key,
//! and [`Response`] encodes the reply.

pub mod key;
pub mod request;
pub mod response;

pub use request::Request;
pub use response::{Response, Rejection};
pub use key::derive_accept_key;

/// 64
pub const MAX_ALLOW_HEADERS: usize = 64;

/// 258EAFA5-E914-47DA-95CA-C5AB0DC85B11
pub const GUID: &[u8] = b"258EAFA5-E914-47DA-95CA-C5AB0DC85B11";

/// HTTP/1.1
pub const HTTP_VERSION: &[u8] = b"HTTP/1.1";

/// CRLF
pub const HTTP_LINE_BREAK: &[u8] = b"\r\n";

/// A colon + one SP is prefered
pub const HTTP_HEADER_SP: &[u8] = b": ";

/// HTTP/1.1 101 Switching Protocols
pub const HTTP_STATUS_LINE: &[u8] = b"HTTP/1.1 101 Switching Protocols";

/// Http header, take two references
#[allow(clippy::len_without_is_empty)]
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct HttpHeader<'h> {
    pub name: &'h [u8],
    pub value: &'h [u8],
}

impl<'h> HttpHeader<'h> {
    /// Constructor, take provided name and value.
    #[inline]
    pub const fn new(name: &'h [u8], value: &'h [u8]) -> Self { Self { name, value } }

    /// Total number of bytes(name + value + sp).
    #[inline]
    pub const fn len(&self) -> usize {
        self.name.len() + self.value.len() + HTTP_HEADER_SP.len() + HTTP_LINE_BREAK.len()
    }
}

impl<'h> std::fmt::Display for HttpHeader<'h> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {}",
            String::from_utf8_lossy(self.name),
            String::from_utf8_lossy(self.value)
        )
    }
}

macro_rules! header {
    (   $(
            $(#[$docs: meta])*
            ($hdr_name: ident => $name: expr);
        )+
    ) => {
        $(
            $(#[$docs])*
            pub const $hdr_name: &[u8] = $name;
        )+
    };
}

macro_rules! write_header {
    ($w: expr, $hdr: expr) => {{
        let hdr = $hdr;
        if $w.remaining() < hdr.len() {
            return Err(HandshakeError::NotEnoughCapacity);
        }
        for part in [hdr.name, HTTP_HEADER_SP, hdr.value, HTTP_LINE_BREAK] {
            $w.write_or_err(part, || HandshakeError::NotEnoughCapacity)?;
        }
    }};
    ($w: expr, $name: expr, $value: expr) => {
        write_header!($w, HttpHeader::new($name, $value))
    };
}

pub(self) use write_header;

/// Find the first header with the given name (case insensitive).
///
/// An empty value is treated as missing.
#[inline]
fn find_header<'b>(all: &[httparse::Header<'b>], name: &[u8]) -> Option<&'b [u8]> {
    all.iter()
        .find(|hdr| hdr.name.as_bytes().eq_ignore_ascii_case(name))
        .map(|hdr| hdr.value)
        .filter(|value| !value.is_empty())
}

/// Static http headers
#[allow(unused)]
pub mod static_headers {
    // header name, matched case insensitively
    header! {
        /// upgrade
        (HEADER_UPGRADE_NAME => b"Upgrade");

        /// connection
        (HEADER_CONNECTION_NAME => b"Connection");

        /// sec-websocket-key
        (HEADER_SEC_WEBSOCKET_KEY_NAME => b"Sec-WebSocket-Key");

        /// sec-websocket-accept
        (HEADER_SEC_WEBSOCKET_ACCEPT_NAME => b"Sec-WebSocket-Accept");

        /// sec-websocket-version
        (HEADER_SEC_WEBSOCKET_VERSION_NAME => b"Sec-WebSocket-Version");

        /// content-type
        (HEADER_CONTENT_TYPE_NAME => b"Content-Type");

        /// content-length
        (HEADER_CONTENT_LENGTH_NAME => b"Content-Length");
    }

    // header value, matched case sensitively
    header! {
        (HEADER_UPGRADE_VALUE => b"websocket");

        (HEADER_CONNECTION_VALUE => b"Upgrade");

        (HEADER_CONNECTION_CLOSE_VALUE => b"close");

        (HEADER_SEC_WEBSOCKET_VERSION_VALUE => b"13");

        (HEADER_CONTENT_TYPE_VALUE => b"text/plain; charset=utf-8");
    }
}
