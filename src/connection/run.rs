use std::io::{Read, Write, ErrorKind};
use std::net::TcpStream;

use super::{Connection, log_message};

use crate::config::Config;
use crate::endpoint::{Endpoint, Hijack};
use crate::error::{Error, Result};

/// Socket timeouts surface as `WouldBlock` or `TimedOut`.
fn deadline_expired(e: Error) -> Error {
    match e {
        Error::Io(ref io) | Error::WriteFailure(ref io)
            if matches!(io.kind(), ErrorKind::WouldBlock | ErrorKind::TimedOut) =>
        {
            Error::Timeout
        }
        e => e,
    }
}

impl<IO: Read + Write> Connection<IO> {
    /// Run the handshake on a hosting transport.
    ///
    /// On success the connection is `Open`, otherwise the rejection has
    /// been sent through the transport and the connection is `Closed`.
    ///
    /// A connection which is not `Negotiating` returns
    /// [`Error::AlreadyNegotiated`] without touching the transport.
    pub fn accept<H>(&mut self, transport: H) -> Result<()>
    where
        H: Hijack<Io = IO> + Read + Write,
    {
        self.check_negotiating()?;

        let mut buf = vec![0; self.config.max_request_len];
        let accepted = Endpoint::accept(transport, &mut buf, &self.config.path)
            .map_err(deadline_expired);
        self.on_accept(accepted)
    }

    /// Echo messages until the connection is closed.
    ///
    /// A peer leaving between two frames returns `Ok`,
    /// any other failure is returned after the stream is released.
    /// An expired socket timeout is returned as [`Error::Timeout`].
    pub fn run(&mut self) -> Result<()> {
        while let Some(stream) = self.stream.as_mut() {
            let echoed = stream.read_frame().and_then(|frame| {
                let payload = frame.into_payload();
                log_message(&payload);
                stream.write_text(&payload)
            });

            if let Err(e) = echoed {
                return self.on_error(deadline_expired(e));
            }
        }
        Ok(())
    }
}

/// Accept a transport and echo until it is closed.
///
/// Deadlines of `config` are not applied, see [`serve_tcp`].
pub fn serve<H, IO>(transport: H, config: Config) -> Result<()>
where
    H: Hijack<Io = IO> + Read + Write,
    IO: Read + Write,
{
    let mut conn = Connection::new(config);
    conn.accept(transport)?;
    conn.run()
}

/// Same as [`serve`], the read and write deadlines of `config`
/// are set as socket timeouts first.
pub fn serve_tcp(tcp: TcpStream, config: Config) -> Result<()> {
    tcp.set_read_timeout(config.read_timeout)?;
    tcp.set_write_timeout(config.write_timeout)?;
    serve(tcp, config)
}
