use std::io::{Read, Write, ErrorKind};

use log::debug;

use super::{detail, Endpoint, Hijack};

use crate::error::{Error, HandshakeError, Result};
use crate::stream::Stream;

impl<IO: Read + Write> Endpoint<IO> {
    /// Receive the upgrade request from the transport into the provided buffer,
    /// until a complete request is present.
    fn recv_request<T: Read>(
        transport: &mut T,
        buf: &mut [u8],
        path: &str,
    ) -> Result<detail::Negotiated> {
        let mut offset = 0;

        while offset < buf.len() {
            let n = match transport.read(&mut buf[offset..]) {
                Ok(n) => n,
                Err(ref e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            };

            // EOF, no more data
            if n == 0 {
                return Err(HandshakeError::NotEnoughData.into());
            }

            offset += n;

            if let Some(negotiated) = detail::negotiate(&buf[..offset], path)? {
                return Ok(negotiated);
            }
        }

        // provided buffer is filled, however it could not accommodate the request.
        Err(HandshakeError::NotEnoughCapacity.into())
    }

    /// Send an http error response, write errors are ignored
    /// since the connection is about to be closed.
    fn send_rejection<T: Write>(transport: &mut T, e: &HandshakeError) {
        let sent = detail::encode_rejection(e)
            .map_err(Error::from)
            .and_then(|(buf, n)| {
                transport.write_all(&buf[..n])?;
                transport.flush()?;
                Ok(())
            });

        if let Err(e) = sent {
            debug!("failed to send rejection: {}", e);
        }
    }

    /// Perform a websocket server handshake, return a new websocket stream.
    ///
    /// The upgrade request is read through `transport`, using `buf` as storage,
    /// the request must fit in `buf`. Only requests for `path` are accepted.
    ///
    /// If the request is rejected, an http error response is written through
    /// `transport` and the transport is dropped without being hijacked.
    /// Otherwise the transport is hijacked exactly once, the 101 response
    /// is written to the raw IO source, which is then owned by the returned stream.
    pub fn accept<H>(mut transport: H, buf: &mut [u8], path: &str) -> Result<Stream<IO>>
    where
        H: Hijack<Io = IO> + Read + Write,
    {
        let negotiated = match Self::recv_request(&mut transport, buf, path) {
            Ok(x) => x,
            Err(Error::Handshake(e)) => {
                Self::send_rejection(&mut transport, &e);
                return Err(e.into());
            }
            Err(e) => return Err(e),
        };

        let mut io = match transport.hijack() {
            Ok(io) => io,
            Err(mut transport) => {
                let e = HandshakeError::UpgradeUnsupported;
                Self::send_rejection(&mut transport, &e);
                return Err(e.into());
            }
        };

        let (response, n) = detail::encode_response(&negotiated.sec_accept)?;
        io.write_all(&response[..n]).map_err(Error::WriteFailure)?;
        io.flush().map_err(Error::WriteFailure)?;

        let pending = &buf[negotiated.request_len..negotiated.filled];
        Ok(Stream::new_with_data(io, pending))
    }
}
