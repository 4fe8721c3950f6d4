//! Client upgrade request.
//!
//! From [RFC-6455 Section 4.1](https://datatracker.ietf.org/doc/html/rfc6455#section-4.1):
//!
//! Once a connection to the server has been established (including a
//! connection via a proxy or over a TLS-encrypted tunnel), the client
//! MUST send an opening handshake to the server.  The handshake consists
//! of an HTTP Upgrade request, along with a list of required and
//! optional header fields.
//!
//! Example:
//!
//! ```text
//! GET /ws HTTP/1.1
//! Host: www.example.com
//! Upgrade: websocket
//! Connection: Upgrade
//! Sec-WebSocket-Key: dGhlIHNhbXBsZSBub25jZQ==
//! Sec-WebSocket-Version: 13
//! ```
//!
//! Header names are case insensitive. The values of `upgrade` and
//! `connection` are compared **case sensitively**, a client sending
//! `connection: keep-alive, Upgrade` or `upgrade: WebSocket` is rejected.

use super::find_header;
use super::derive_accept_key;
use super::MAX_ALLOW_HEADERS;
use super::static_headers::*;

use crate::error::HandshakeError;

/// Http request presentation.
///
/// Only the fields required by the handshake are kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Request<'b> {
    pub path: &'b [u8],
    pub upgrade: Option<&'b [u8]>,
    pub connection: Option<&'b [u8]>,
    pub sec_version: Option<&'b [u8]>,
    pub sec_key: Option<&'b [u8]>,
}

impl<'b> Request<'b> {
    /// Create from the four header values, path is left empty.
    #[inline]
    pub const fn new(
        upgrade: Option<&'b [u8]>,
        connection: Option<&'b [u8]>,
        sec_version: Option<&'b [u8]>,
        sec_key: Option<&'b [u8]>,
    ) -> Self {
        Self {
            path: b"",
            upgrade,
            connection,
            sec_version,
            sec_key,
        }
    }

    /// Parse from a provided buffer, return the request and
    /// the number of bytes parsed.
    ///
    /// Headers are only collected here, see [`negotiate`](Self::negotiate)
    /// for the checks. If the buffer does not contain a complete http request,
    /// a [`HandshakeError::NotEnoughData`] error will be returned.
    pub fn decode(buf: &'b [u8]) -> Result<(Self, usize), HandshakeError> {
        let mut headers = [httparse::EMPTY_HEADER; MAX_ALLOW_HEADERS];
        let mut request = httparse::Request::new(&mut headers);

        // return value
        let decode_n = match request.parse(buf)? {
            httparse::Status::Complete(n) => n,
            httparse::Status::Partial => return Err(HandshakeError::NotEnoughData),
        };

        // headers are shrunk to number of inited headers
        // ref: https://docs.rs/httparse/latest/src/httparse/lib.rs.html#757-765
        let headers = request.headers;

        let request = Request {
            path: request.path.map(str::as_bytes).unwrap_or(b""),
            upgrade: find_header(headers, HEADER_UPGRADE_NAME),
            connection: find_header(headers, HEADER_CONNECTION_NAME),
            sec_version: find_header(headers, HEADER_SEC_WEBSOCKET_VERSION_NAME),
            sec_key: find_header(headers, HEADER_SEC_WEBSOCKET_KEY_NAME),
        };

        Ok((request, decode_n))
    }

    /// Validate the upgrade request, return the derived `sec-websocket-accept`.
    ///
    /// Checks run in order, the first failure is returned:
    /// `upgrade` and `connection` ([`HandshakeError::Upgrade`],
    /// [`HandshakeError::Connection`]), then `sec-websocket-version`
    /// ([`HandshakeError::SecWebSocketVersion`]), then `sec-websocket-key`
    /// ([`HandshakeError::SecWebSocketKey`]).
    pub fn negotiate(&self) -> Result<[u8; 28], HandshakeError> {
        if self.upgrade != Some(HEADER_UPGRADE_VALUE) {
            return Err(HandshakeError::Upgrade);
        }

        if self.connection != Some(HEADER_CONNECTION_VALUE) {
            return Err(HandshakeError::Connection);
        }

        if self.sec_version != Some(HEADER_SEC_WEBSOCKET_VERSION_VALUE) {
            return Err(HandshakeError::SecWebSocketVersion);
        }

        match self.sec_key {
            Some(key) => Ok(derive_accept_key(key)),
            None => Err(HandshakeError::SecWebSocketKey),
        }
    }
}
