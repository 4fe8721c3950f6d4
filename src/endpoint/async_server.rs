use std::io::ErrorKind;
use std::pin::Pin;
use std::task::{Context, Poll};

use log::debug;
use tokio::io::{AsyncRead, AsyncWrite, AsyncReadExt, AsyncWriteExt, ReadBuf};

use super::{detail, Endpoint, Hijack, Raw};

use crate::error::{Error, HandshakeError, Result};
use crate::stream::Stream;

impl Hijack for tokio::net::TcpStream {
    type Io = Self;

    #[inline]
    fn hijack(self) -> std::result::Result<Self, Self> { Ok(self) }
}

impl<IO: AsyncRead + Unpin> AsyncRead for Raw<IO> {
    #[inline]
    fn poll_read(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<std::io::Result<()>> {
        Pin::new(&mut self.get_mut().0).poll_read(cx, buf)
    }
}

impl<IO: AsyncWrite + Unpin> AsyncWrite for Raw<IO> {
    #[inline]
    fn poll_write(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &[u8],
    ) -> Poll<std::io::Result<usize>> {
        Pin::new(&mut self.get_mut().0).poll_write(cx, buf)
    }

    #[inline]
    fn poll_flush(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<std::io::Result<()>> {
        Pin::new(&mut self.get_mut().0).poll_flush(cx)
    }

    #[inline]
    fn poll_shutdown(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<std::io::Result<()>> {
        Pin::new(&mut self.get_mut().0).poll_shutdown(cx)
    }
}

impl<IO: AsyncRead + AsyncWrite + Unpin> Endpoint<IO> {
    /// Async version of `recv_request`.
    async fn recv_request_async<T: AsyncRead + Unpin>(
        transport: &mut T,
        buf: &mut [u8],
        path: &str,
    ) -> Result<detail::Negotiated> {
        let mut offset = 0;

        while offset < buf.len() {
            let n = match transport.read(&mut buf[offset..]).await {
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

    /// Async version of `send_rejection`.
    async fn send_rejection_async<T: AsyncWrite + Unpin>(transport: &mut T, e: &HandshakeError) {
        let (buf, n) = match detail::encode_rejection(e) {
            Ok(x) => x,
            Err(e) => {
                debug!("failed to encode rejection: {}", e);
                return;
            }
        };

        if let Err(e) = transport.write_all(&buf[..n]).await {
            debug!("failed to send rejection: {}", e);
            return;
        }

        let _ = transport.flush().await;
    }

    /// Async version of [`accept`](Self::accept).
    pub async fn accept_async<H>(mut transport: H, buf: &mut [u8], path: &str) -> Result<Stream<IO>>
    where
        H: Hijack<Io = IO> + AsyncRead + AsyncWrite + Unpin,
    {
        let negotiated = match Self::recv_request_async(&mut transport, buf, path).await {
            Ok(x) => x,
            Err(Error::Handshake(e)) => {
                Self::send_rejection_async(&mut transport, &e).await;
                return Err(e.into());
            }
            Err(e) => return Err(e),
        };

        let mut io = match transport.hijack() {
            Ok(io) => io,
            Err(mut transport) => {
                let e = HandshakeError::UpgradeUnsupported;
                Self::send_rejection_async(&mut transport, &e).await;
                return Err(e.into());
            }
        };

        let (response, n) = detail::encode_response(&negotiated.sec_accept)?;
        io.write_all(&response[..n]).await.map_err(Error::WriteFailure)?;
        io.flush().await.map_err(Error::WriteFailure)?;

        let pending = &buf[negotiated.request_len..negotiated.filled];
        Ok(Stream::new_with_data(io, pending))
    }
}
