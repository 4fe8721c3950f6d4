//! Websocket stream.
//!
//! [`Stream`] owns the upgraded IO source. It reads one complete
//! frame at a time and writes one complete text frame at a time,
//! nothing is carried over from one frame to the next.

mod read;
mod write;

cfg_if::cfg_if! {
    if #[cfg(feature = "tokio")] {
        mod async_read;
        mod async_write;
    }
}

use crate::error::Result;
use crate::frame::{Frame, FrameHead, Mask};
use crate::frame::mask::apply_mask4;

/// Websocket stream.
///
/// This is a simple wrapper of the underlying connection.
/// Bytes received after the upgrade request, but before the
/// stream is created, are replayed before reading from the connection.
pub struct Stream<IO> {
    io: IO,
    pending: Vec<u8>,
}

impl<IO> AsRef<IO> for Stream<IO> {
    #[inline]
    fn as_ref(&self) -> &IO { &self.io }
}

impl<IO> AsMut<IO> for Stream<IO> {
    #[inline]
    fn as_mut(&mut self) -> &mut IO { &mut self.io }
}

impl<IO> std::fmt::Debug for Stream<IO> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Stream")
            .field("pending", &self.pending.len())
            .finish()
    }
}

impl<IO> Stream<IO> {
    /// Create websocket stream from IO source directly,
    /// without a handshake.
    #[inline]
    pub const fn new(io: IO) -> Self {
        Stream {
            io,
            pending: Vec::new(),
        }
    }

    /// Create websocket stream with some already received data.
    #[inline]
    pub fn new_with_data(io: IO, data: &[u8]) -> Self {
        Stream {
            io,
            pending: data.to_vec(),
        }
    }

    /// Release the underlying IO source.
    /// Replayed data which is not consumed yet is dropped.
    #[inline]
    pub fn into_inner(self) -> IO { self.io }

    /// Move replayed data to the front of `buf`, returns the count of moved bytes.
    #[inline]
    fn take_pending(&mut self, buf: &mut [u8]) -> usize {
        let n = std::cmp::min(self.pending.len(), buf.len());
        if n > 0 {
            buf[..n].copy_from_slice(&self.pending[..n]);
            self.pending.drain(..n);
        }
        n
    }
}

/// Unmask the payload, then make sure this is a final text frame.
#[inline]
fn finish_frame(head: FrameHead, mut payload: Vec<u8>) -> Result<Frame> {
    if let Mask::Key(key) = head.mask {
        apply_mask4(key, &mut payload);
    }
    head.check()?;
    Ok(Frame { head, payload })
}

#[cfg(test)]
pub(crate) mod test {
    use std::io::{Read, Write, Result};

    use crate::frame::{FrameHead, Fin, OpCode, Mask, PayloadLen};
    use crate::frame::mask::apply_mask;

    /// In-memory IO source, reads at most `rlimit` bytes
    /// and writes at most `wlimit` bytes at a time.
    pub struct LimitReadWriter {
        pub rbuf: Vec<u8>,
        pub wbuf: Vec<u8>,
        pub rlimit: usize,
        pub wlimit: usize,
        pub cursor: usize,
    }

    impl LimitReadWriter {
        pub fn new(rbuf: Vec<u8>, rlimit: usize, wlimit: usize) -> Self {
            LimitReadWriter {
                rbuf,
                wbuf: Vec::new(),
                rlimit,
                wlimit,
                cursor: 0,
            }
        }
    }

    impl Read for LimitReadWriter {
        fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
            let to_read = std::cmp::min(buf.len(), self.rlimit);
            let left_data = self.rbuf.len() - self.cursor;
            let n = std::cmp::min(to_read, left_data);

            buf[..n].copy_from_slice(&self.rbuf[self.cursor..self.cursor + n]);
            self.cursor += n;
            Ok(n)
        }
    }

    impl Write for LimitReadWriter {
        fn write(&mut self, buf: &[u8]) -> Result<usize> {
            let len = std::cmp::min(buf.len(), self.wlimit);
            self.wbuf.write(&buf[..len])
        }

        fn flush(&mut self) -> Result<()> { Ok(()) }
    }

    /// Build a client frame, masked with `key` if provided.
    pub fn make_frame(fin: Fin, opcode: OpCode, key: Option<[u8; 4]>, data: &[u8]) -> Vec<u8> {
        let mask = match key {
            Some(key) => Mask::Key(key),
            None => Mask::None,
        };
        let head = FrameHead::new(fin, opcode, mask, PayloadLen::from_num(data.len()).unwrap());

        let mut frame = vec![0; 8];
        let n = head.encode(&mut frame).unwrap();
        frame.truncate(n);

        let mut payload = data.to_vec();
        if let Some(key) = key {
            apply_mask(key, &mut payload);
        }
        frame.append(&mut payload);
        frame
    }
}
