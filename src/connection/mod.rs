//! Connection driver.
//!
//! A [`Connection`] owns one upgraded stream. It runs the handshake once,
//! then echoes every received text message back to the peer, one at a time,
//! until the peer goes away or an error occurs.
//!
//! ```text
//!              accept ok             read + echo ok
//! Negotiating ----------> Open <-------------------+
//!      |                   |  |                     |
//!      | rejected          |  +---------------------+
//!      v                   | error / peer closed
//!    Closed <--------------+
//! ```
//!
//! The stream is dropped exactly once, when the connection enters `Closed`.

mod run;

cfg_if::cfg_if! {
    if #[cfg(feature = "tokio")] {
        mod async_run;
    }
}

pub use run::{serve, serve_tcp};

#[cfg(feature = "tokio")]
pub use async_run::serve_async;

use log::{debug, warn};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::stream::Stream;

/// Connection state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Negotiating,
    Open,
    Closed,
}

/// Exclusive owner of one websocket stream.
pub struct Connection<IO> {
    config: Config,
    state: State,
    stream: Option<Stream<IO>>,
}

impl<IO> std::fmt::Debug for Connection<IO> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Connection")
            .field("state", &self.state)
            .field("path", &self.config.path)
            .finish()
    }
}

impl<IO> Connection<IO> {
    /// Create a connection waiting for its handshake.
    #[inline]
    pub fn new(config: Config) -> Self {
        Connection {
            config,
            state: State::Negotiating,
            stream: None,
        }
    }

    #[inline]
    pub const fn state(&self) -> State { self.state }

    #[inline]
    pub const fn is_closed(&self) -> bool { matches!(self.state, State::Closed) }

    #[inline]
    pub const fn config(&self) -> &Config { &self.config }

    /// Release the stream and enter `Closed`, this could be called many times.
    #[inline]
    pub fn close(&mut self) {
        if let Some(stream) = self.stream.take() {
            drop(stream);
            debug!("connection closed");
        }
        self.state = State::Closed;
    }

    /// The handshake runs only once, the state is left as is otherwise.
    fn check_negotiating(&self) -> Result<()> {
        match self.state {
            State::Negotiating => Ok(()),
            _ => {
                warn!("handshake on a {:?} connection", self.state);
                Err(Error::AlreadyNegotiated)
            }
        }
    }

    /// Handshake result, `Negotiating` -> `Open` or `Closed`.
    fn on_accept(&mut self, accepted: Result<Stream<IO>>) -> Result<()> {
        match accepted {
            Ok(stream) => {
                debug!("connection upgraded");
                self.stream = Some(stream);
                self.state = State::Open;
                Ok(())
            }
            Err(e) => {
                warn!("handshake failed: {}", e);
                self.close();
                Err(e)
            }
        }
    }

    /// Any error closes the connection. A peer leaving between two
    /// frames is a normal close.
    fn on_error(&mut self, e: Error) -> Result<()> {
        self.close();

        if e.is_clean_close() {
            debug!("peer closed");
            Ok(())
        } else {
            warn!("connection error: {}", e);
            Err(e)
        }
    }
}

/// Log a received message.
#[inline]
fn log_message(payload: &[u8]) {
    debug!("received: {}", String::from_utf8_lossy(payload));
}

#[cfg(test)]
mod test {
    use std::io::{Read, Write, Result};
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    pub const REQUEST: &[u8] = b"\
        GET /ws HTTP/1.1\r\n\
        host: www.example.com\r\n\
        upgrade: websocket\r\n\
        connection: Upgrade\r\n\
        sec-websocket-key: dGhlIHNhbXBsZSBub25jZQ==\r\n\
        sec-websocket-version: 13\r\n\r\n";

    /// In-memory IO source which counts how many times it is dropped.
    pub struct CountedIo {
        pub rbuf: Vec<u8>,
        pub cursor: usize,
        pub wbuf: Arc<std::sync::Mutex<Vec<u8>>>,
        pub wlimit: usize,
        pub drops: Arc<AtomicUsize>,
    }

    impl CountedIo {
        pub fn new(rbuf: Vec<u8>) -> Self {
            CountedIo {
                rbuf,
                cursor: 0,
                wbuf: Arc::new(std::sync::Mutex::new(Vec::new())),
                wlimit: usize::MAX,
                drops: Arc::new(AtomicUsize::new(0)),
            }
        }

        pub fn drop_count(drops: &Arc<AtomicUsize>) -> usize { drops.load(Ordering::SeqCst) }
    }

    impl Drop for CountedIo {
        fn drop(&mut self) { self.drops.fetch_add(1, Ordering::SeqCst); }
    }

    impl Read for CountedIo {
        fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
            let n = std::cmp::min(buf.len(), self.rbuf.len() - self.cursor);
            buf[..n].copy_from_slice(&self.rbuf[self.cursor..self.cursor + n]);
            self.cursor += n;
            Ok(n)
        }
    }

    impl Write for CountedIo {
        fn write(&mut self, buf: &[u8]) -> Result<usize> {
            let n = std::cmp::min(buf.len(), self.wlimit);
            self.wbuf.lock().unwrap().extend_from_slice(&buf[..n]);
            Ok(n)
        }

        fn flush(&mut self) -> Result<()> { Ok(()) }
    }
}
