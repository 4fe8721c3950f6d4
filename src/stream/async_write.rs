use std::io::ErrorKind;

use tokio::io::{AsyncWrite, AsyncWriteExt};

use super::Stream;

use crate::frame::encode_text;
use crate::error::{Error, Result};

impl<IO: AsyncWrite + Unpin> Stream<IO> {
    /// Async version of [`write_text`](Self::write_text).
    pub async fn write_text_async(&mut self, payload: &[u8]) -> Result<usize> {
        let frame = encode_text(payload)?;

        let n = loop {
            match self.io.write(&frame).await {
                Ok(n) => break n,
                Err(ref e) if e.kind() == ErrorKind::Interrupted => {}
                Err(e) => return Err(Error::WriteFailure(e)),
            }
        };

        if n < frame.len() {
            return Err(Error::WriteFailure(ErrorKind::WriteZero.into()));
        }

        self.io.flush().await.map_err(Error::WriteFailure)?;

        Ok(n)
    }

    /// Shutdown the write side of the underlying IO source.
    pub async fn shutdown_async(&mut self) -> Result<()> {
        self.io.shutdown().await.map_err(Error::WriteFailure)
    }
}
