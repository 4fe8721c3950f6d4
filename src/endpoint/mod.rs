//! Websocket endpoint.
//!
//! [`Endpoint::accept`] reads the upgrade request from a hosting transport,
//! validates it, and on success takes the raw IO source out of the transport
//! through [`Hijack`]. The transport is never touched again after that.
//! On failure an http error response is written through the transport,
//! and [`Hijack::hijack`] is never called.

mod detail;
mod server;

cfg_if::cfg_if! {
    if #[cfg(feature = "tokio")] {
        mod async_server;
    }
}

use std::marker::PhantomData;

/// 256, enough for a 101 response or a rejection.
pub(crate) const RESPONSE_BUF_LEN: usize = 256;

/// Capability to take exclusive ownership of the raw IO source
/// behind a request/response transport.
///
/// It is consumed by the call, so the ownership is transferred at most once.
pub trait Hijack: Sized {
    /// The raw IO source.
    type Io;

    /// Give away the raw IO source. A transport which is not able to do so
    /// returns itself, so that an error response could still be sent.
    fn hijack(self) -> Result<Self::Io, Self>;
}

/// A transport which is the raw IO source itself.
#[derive(Debug)]
pub struct Raw<IO>(pub IO);

impl<IO> Hijack for Raw<IO> {
    type Io = IO;

    #[inline]
    fn hijack(self) -> Result<IO, Self> { Ok(self.0) }
}

impl Hijack for std::net::TcpStream {
    type Io = Self;

    #[inline]
    fn hijack(self) -> Result<Self, Self> { Ok(self) }
}

impl<IO: std::io::Read> std::io::Read for Raw<IO> {
    #[inline]
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> { self.0.read(buf) }
}

impl<IO: std::io::Write> std::io::Write for Raw<IO> {
    #[inline]
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> { self.0.write(buf) }

    #[inline]
    fn flush(&mut self) -> std::io::Result<()> { self.0.flush() }
}

/// Server endpoint.
pub struct Endpoint<IO> {
    _marker: PhantomData<IO>,
}
