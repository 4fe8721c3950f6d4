use std::future::Future;
use std::time::Duration;

use tokio::io::{AsyncRead, AsyncWrite};

use super::{Connection, log_message};

use crate::config::Config;
use crate::endpoint::{Endpoint, Hijack};
use crate::error::{Error, Result};

/// Bound a read or write with an optional deadline.
async fn deadline<F, T>(timeout: Option<Duration>, fut: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    match timeout {
        Some(timeout) => tokio::time::timeout(timeout, fut)
            .await
            .map_err(|_| Error::Timeout)?,
        None => fut.await,
    }
}

impl<IO: AsyncRead + AsyncWrite + Unpin> Connection<IO> {
    /// Async version of [`accept`](Self::accept).
    ///
    /// The whole handshake is bounded by the read timeout.
    pub async fn accept_async<H>(&mut self, transport: H) -> Result<()>
    where
        H: Hijack<Io = IO> + AsyncRead + AsyncWrite + Unpin,
    {
        self.check_negotiating()?;

        let mut buf = vec![0; self.config.max_request_len];
        let accepted = deadline(
            self.config.read_timeout,
            Endpoint::accept_async(transport, &mut buf, &self.config.path),
        )
        .await;
        self.on_accept(accepted)
    }

    /// Async version of [`run`](Self::run).
    ///
    /// Each frame read is bounded by the read timeout,
    /// each frame write is bounded by the write timeout.
    pub async fn run_async(&mut self) -> Result<()> {
        let read_timeout = self.config.read_timeout;
        let write_timeout = self.config.write_timeout;

        while let Some(stream) = self.stream.as_mut() {
            let payload = match deadline(read_timeout, stream.read_frame_async()).await {
                Ok(frame) => frame.into_payload(),
                Err(e) => return self.on_error(e),
            };

            log_message(&payload);

            if let Err(e) = deadline(write_timeout, stream.write_text_async(&payload)).await {
                return self.on_error(e);
            }
        }
        Ok(())
    }
}

/// Async version of [`serve`](super::serve).
pub async fn serve_async<H, IO>(transport: H, config: Config) -> Result<()>
where
    H: Hijack<Io = IO> + AsyncRead + AsyncWrite + Unpin,
    IO: AsyncRead + AsyncWrite + Unpin,
{
    let mut conn = Connection::new(config);
    conn.accept_async(transport).await?;
    conn.run_async().await
}

#[cfg(test)]
mod test {
    use super::super::State;
    use super::super::test::REQUEST;
    use super::*;
    use crate::endpoint::Raw;
    use crate::error::{FrameError, HandshakeError};
    use crate::frame::{Fin, OpCode};
    use crate::stream::test::make_frame;

    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    const KEY: [u8; 4] = [0x11, 0x22, 0x33, 0x44];

    #[tokio::test]
    async fn echo_async() {
        let _ = env_logger::try_init();
        let (mut client, server) = tokio::io::duplex(4096);

        let task = tokio::spawn(async move {
            let mut conn = Connection::new(Config::default());
            conn.accept_async(Raw(server)).await?;
            assert_eq!(conn.state(), State::Open);
            conn.run_async().await?;
            assert_eq!(conn.state(), State::Closed);
            Ok::<_, Error>(())
        });

        client.write_all(REQUEST).await.unwrap();
        client
            .write_all(&make_frame(Fin::Y, OpCode::Text, Some(KEY), b"hello"))
            .await
            .unwrap();

        let mut buf = vec![0; 512];
        let mut received = Vec::new();
        while !received.ends_with(b"\x81\x05hello") {
            let n = client.read(&mut buf).await.unwrap();
            assert_ne!(n, 0);
            received.extend_from_slice(&buf[..n]);
        }
        assert!(received.starts_with(b"HTTP/1.1 101 Switching Protocols\r\n"));

        drop(client);
        task.await.unwrap().unwrap();
    }

    #[tokio::test]
    async fn unsupported_frame_async() {
        let _ = env_logger::try_init();
        let (mut client, server) = tokio::io::duplex(4096);

        client.write_all(REQUEST).await.unwrap();
        client
            .write_all(&make_frame(Fin::Y, OpCode::Binary, Some(KEY), b"data"))
            .await
            .unwrap();

        let e = serve_async(Raw(server), Config::default()).await.unwrap_err();
        assert!(matches!(e, Error::Frame(FrameError::UnsupportedFrameType)));
    }

    #[tokio::test]
    async fn rejected_async() {
        let _ = env_logger::try_init();
        let (mut client, server) = tokio::io::duplex(4096);

        client.write_all(b"GET /ws HTTP/1.1\r\nhost: localhost\r\n\r\n").await.unwrap();

        let mut conn = Connection::new(Config::default());
        let e = conn.accept_async(Raw(server)).await.unwrap_err();
        assert!(matches!(e, Error::Handshake(HandshakeError::Upgrade)));
        assert!(conn.is_closed());

        let mut response = Vec::new();
        client.read_to_end(&mut response).await.unwrap();
        assert!(response.starts_with(b"HTTP/1.1 400 Bad Request\r\n"));
        assert!(response.ends_with(b"Not a WebSocket request\n"));
    }

    #[tokio::test(start_paused = true)]
    async fn read_timeout_async() {
        let _ = env_logger::try_init();
        let (mut client, server) = tokio::io::duplex(4096);
        client.write_all(REQUEST).await.unwrap();

        let config = Config::default().read_timeout(Some(Duration::from_secs(5)));
        let mut conn = Connection::new(config);
        conn.accept_async(Raw(server)).await.unwrap();

        // the peer stays silent
        let e = conn.run_async().await.unwrap_err();
        assert!(matches!(e, Error::Timeout));
        assert!(conn.is_closed());
        drop(client);
    }

    #[tokio::test]
    async fn accept_twice_async() {
        let _ = env_logger::try_init();
        let (mut client, server) = tokio::io::duplex(4096);
        client.write_all(REQUEST).await.unwrap();

        let mut conn = Connection::new(Config::default());
        conn.accept_async(Raw(server)).await.unwrap();

        let (_other_client, other_server) = tokio::io::duplex(4096);
        let e = conn.accept_async(Raw(other_server)).await.unwrap_err();
        assert!(matches!(e, Error::AlreadyNegotiated));
        assert_eq!(conn.state(), State::Open);
    }

    #[tokio::test]
    async fn short_write_async() {
        let _ = env_logger::try_init();
        // each direction holds at most 256 bytes
        let (mut client, server) = tokio::io::duplex(256);
        client.write_all(REQUEST).await.unwrap();

        let mut conn = Connection::new(Config::default());
        conn.accept_async(Raw(server)).await.unwrap();

        let mut response = Vec::new();
        let mut buf = [0_u8; 256];
        while !response.ends_with(b"\r\n\r\n") {
            let n = client.read(&mut buf).await.unwrap();
            response.extend_from_slice(&buf[..n]);
        }

        // the echo frame is 304 bytes
        let frame = make_frame(Fin::Y, OpCode::Text, Some(KEY), &[b'x'; 300]);
        let (sent, run) = tokio::join!(client.write_all(&frame), conn.run_async());
        sent.unwrap();

        match run.unwrap_err() {
            Error::WriteFailure(e) => assert_eq!(e.kind(), std::io::ErrorKind::WriteZero),
            e => panic!("unexpected error: {}", e),
        }
        assert!(conn.is_closed());

        // one write, nothing retried
        let mut echoed = Vec::new();
        client.read_to_end(&mut echoed).await.unwrap();
        assert_eq!(echoed.len(), 256);
        assert_eq!(&echoed[..4], &[0x81, 126, 0x01, 0x2c]);
    }

    #[tokio::test(start_paused = true)]
    async fn handshake_timeout_async() {
        let _ = env_logger::try_init();
        let (mut client, server) = tokio::io::duplex(4096);
        client.write_all(&REQUEST[..10]).await.unwrap();

        let config = Config::default().read_timeout(Some(Duration::from_secs(5)));
        let mut conn = Connection::new(config);
        let e = conn.accept_async(Raw(server)).await.unwrap_err();
        assert!(matches!(e, Error::Timeout));
        assert!(conn.is_closed());
        drop(client);
    }
}
