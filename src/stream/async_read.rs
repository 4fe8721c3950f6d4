use std::io::ErrorKind;

use tokio::io::{AsyncRead, AsyncReadExt};

use super::{Stream, finish_frame};

use crate::frame::{Frame, FrameHead, MAX_FRAME_HEAD_LEN};
use crate::error::{FrameError, Result};

impl<IO: AsyncRead + Unpin> Stream<IO> {
    /// Async version of [`read_frame`](Self::read_frame).
    ///
    /// Cancelling the returned future in the middle of a frame
    /// leaves the stream in an unknown position, it should be dropped.
    pub async fn read_frame_async(&mut self) -> Result<Frame> {
        let mut head_buf = [0_u8; MAX_FRAME_HEAD_LEN];

        // fin, opcode, mask, payload length
        self.read_full_async(&mut head_buf[..2], 0).await?;

        // extended payload length, mask key
        let head_len = FrameHead::head_len(head_buf[1])?;
        self.read_full_async(&mut head_buf[2..head_len], 2).await?;

        let (head, _) = FrameHead::decode(&head_buf[..head_len])?;

        let mut payload = vec![0_u8; head.length.to_num()];
        self.read_full_async(&mut payload, head_len).await?;

        finish_frame(head, payload)
    }

    async fn read_full_async(&mut self, buf: &mut [u8], offset: usize) -> Result<()> {
        let mut n = self.take_pending(buf);

        while n < buf.len() {
            match self.io.read(&mut buf[n..]).await {
                Ok(0) => return Err(FrameError::UnexpectedEnd { offset: offset + n }.into()),
                Ok(x) => n += x,
                Err(ref e) if e.kind() == ErrorKind::Interrupted => {}
                Err(e) => return Err(e.into()),
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use super::super::test::make_frame;
    use crate::frame::{Fin, OpCode};
    use crate::error::Error;
    use tokio::io::AsyncWriteExt;

    #[tokio::test]
    async fn read_frame_from_pipe() {
        let (client, server) = tokio::io::duplex(16);
        let mut stream = Stream::new(server);

        let data: Vec<u8> = (0..3000).map(|_| rand::random::<u8>()).collect();
        let frame = make_frame(Fin::Y, OpCode::Text, Some(rand::random()), &data);

        let writer = tokio::spawn(async move {
            let mut client = client;
            client.write_all(&frame).await.unwrap();
            client
        });

        let read = stream.read_frame_async().await.unwrap();
        assert_eq!(read.payload, data);

        // peer goes away between two frames
        drop(writer.await.unwrap());
        let e = stream.read_frame_async().await.unwrap_err();
        assert!(e.is_clean_close());
    }

    #[tokio::test]
    async fn read_frame_truncated() {
        let frame = make_frame(Fin::Y, OpCode::Text, Some([1, 2, 3, 4]), b"hello");
        let io: &[u8] = &frame[..frame.len() - 1];
        let mut stream = Stream::new(io);

        let e = stream.read_frame_async().await.unwrap_err();
        assert!(matches!(
            e,
            Error::Frame(FrameError::UnexpectedEnd { offset }) if offset == frame.len() - 1
        ));
    }

    #[tokio::test]
    async fn read_frame_fragmented() {
        let frame = make_frame(Fin::N, OpCode::Text, Some([1, 2, 3, 4]), b"hello");
        let mut stream = Stream::new(&frame[..]);

        let e = stream.read_frame_async().await.unwrap_err();
        assert!(matches!(e, Error::Frame(FrameError::UnsupportedFrameType)));
    }
}
