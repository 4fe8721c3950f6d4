use std::io::{Read, ErrorKind};

use super::{Stream, finish_frame};

use crate::frame::{Frame, FrameHead, MAX_FRAME_HEAD_LEN};
use crate::error::{FrameError, Result};

impl<IO: Read> Stream<IO> {
    /// Read one complete frame from the underlying IO source.
    /// This function will block until the whole frame is received.
    ///
    /// The payload is unmasked if a mask key is present.
    /// Only a final text frame is accepted, anything else fails with
    /// [`FrameError::UnsupportedFrameType`] after its payload is consumed.
    /// A 64-bit extended length fails with [`FrameError::UnsupportedLength`]
    /// right after the first 2 bytes.
    ///
    /// If the IO source reaches `EOF`, [`FrameError::UnexpectedEnd`] is returned,
    /// carrying the count of bytes of this frame received so far.
    pub fn read_frame(&mut self) -> Result<Frame> {
        let mut head_buf = [0_u8; MAX_FRAME_HEAD_LEN];

        // fin, opcode, mask, payload length
        self.read_full(&mut head_buf[..2], 0)?;

        // extended payload length, mask key
        let head_len = FrameHead::head_len(head_buf[1])?;
        self.read_full(&mut head_buf[2..head_len], 2)?;

        let (head, _) = FrameHead::decode(&head_buf[..head_len])?;

        let mut payload = vec![0_u8; head.length.to_num()];
        self.read_full(&mut payload, head_len)?;

        finish_frame(head, payload)
    }

    /// Fill the whole buffer, `offset` is the count of bytes
    /// of the current frame read before.
    fn read_full(&mut self, buf: &mut [u8], offset: usize) -> Result<()> {
        let mut n = self.take_pending(buf);

        while n < buf.len() {
            match self.io.read(&mut buf[n..]) {
                Ok(0) => return Err(FrameError::UnexpectedEnd { offset: offset + n }.into()),
                Ok(x) => n += x,
                Err(ref e) if e.kind() == ErrorKind::Interrupted => {}
                Err(e) => return Err(e.into()),
            }
        }
        Ok(())
    }
}
