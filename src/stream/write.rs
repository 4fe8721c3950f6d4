use std::io::{Write, ErrorKind};

use super::Stream;

use crate::frame::encode_text;
use crate::error::{Error, Result};

impl<IO: Write> Stream<IO> {
    /// Write one complete text frame to the underlying IO source,
    /// return the count of bytes on the wire.
    ///
    /// Frame head and payload are handed to a single `write` call, the frame
    /// is never masked. A payload longer than 65535 bytes fails with
    /// [`FrameError::UnsupportedLength`](crate::error::FrameError::UnsupportedLength)
    /// before anything is written.
    ///
    /// A short write is not retried, it fails with [`Error::WriteFailure`]
    /// of kind `WriteZero`, like any other io error.
    pub fn write_text(&mut self, payload: &[u8]) -> Result<usize> {
        let frame = encode_text(payload)?;

        let n = loop {
            match self.io.write(&frame) {
                Ok(n) => break n,
                Err(ref e) if e.kind() == ErrorKind::Interrupted => {}
                Err(e) => return Err(Error::WriteFailure(e)),
            }
        };

        if n < frame.len() {
            return Err(Error::WriteFailure(ErrorKind::WriteZero.into()));
        }

        self.io.flush().map_err(Error::WriteFailure)?;

        Ok(n)
    }
}
