use crate::handshake::{Request, Response, Rejection};
use crate::error::HandshakeError;

use super::RESPONSE_BUF_LEN;

/// A validated upgrade request.
pub(super) struct Negotiated {
    pub sec_accept: [u8; 28],
    /// Length of the http request, anything after it
    /// belongs to the websocket stream.
    pub request_len: usize,
    /// Count of received bytes.
    pub filled: usize,
}

/// Parse and validate an upgrade request.
/// Returns `Ok(None)` if more data is required.
pub(super) fn negotiate(buf: &[u8], path: &str) -> Result<Option<Negotiated>, HandshakeError> {
    let (request, request_len) = match Request::decode(buf) {
        Ok(x) => x,
        Err(HandshakeError::NotEnoughData) => return Ok(None),
        Err(e) => return Err(e),
    };

    // query string is not part of the route
    let route = request.path.split(|b| *b == b'?').next().unwrap_or(b"");
    if route != path.as_bytes() {
        return Err(HandshakeError::HttpPath);
    }

    let sec_accept = request.negotiate()?;

    Ok(Some(Negotiated {
        sec_accept,
        request_len,
        filled: buf.len(),
    }))
}

/// Encode the 101 response, return the buffer and the count of bytes.
pub(super) fn encode_response(sec_accept: &[u8]) -> Result<([u8; RESPONSE_BUF_LEN], usize), HandshakeError> {
    let mut buf = [0_u8; RESPONSE_BUF_LEN];
    let n = Response::new(sec_accept).encode(&mut buf)?;
    Ok((buf, n))
}

/// Encode a rejection, return the buffer and the count of bytes.
pub(super) fn encode_rejection(e: &HandshakeError) -> Result<([u8; RESPONSE_BUF_LEN], usize), HandshakeError> {
    let mut buf = [0_u8; RESPONSE_BUF_LEN];
    let n = Rejection::from(e).encode(&mut buf)?;
    Ok((buf, n))
}
