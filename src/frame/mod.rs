//! Websocket data frame.
//!
//! [RFC-6455 Section5](https://datatracker.ietf.org/doc/html/rfc6455#section-5)
//!
//! ```text
//! 0                   1                   2                   3
//! 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
//! +-+-+-+-+-------+-+-------------+-------------------------------+
//! |F|R|R|R| opcode|M| Payload len |    Extended payload length    |
//! |I|S|S|S|  (4)  |A|     (7)     |             (16)              |
//! |N|V|V|V|       |S|             |     (if payload len==126)     |
//! | |1|2|3|       |K|             |                               |
//! +-+-+-+-+-------+-+-------------+-------------------------------+
//! |                 Masking-key, if MASK set to 1                 |
//! +---------------------------------------------------------------+
//! :                     Payload Data continued ...                :
//! + - - - - - - - - - - - - - - - - - - - - - - - - - - - - - - - +
//! |                     Payload Data continued ...                |
//! +---------------------------------------------------------------+
//! ```
//!
//! Only unfragmented text frames are accepted. A payload length of 127
//! (64-bit extended length) is rejected.

pub mod flag;
pub mod length;
pub mod mask;

pub use flag::{Fin, OpCode};
pub use length::{PayloadLen, MAX_PAYLOAD_LEN};
pub use mask::Mask;

use crate::bleed::Writer;
use crate::error::FrameError;

/// 2 + 2 + 4
pub const MAX_FRAME_HEAD_LEN: usize = 8;

/// Websocket frame head.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHead {
    pub fin: Fin,
    pub opcode: OpCode,
    pub mask: Mask,
    pub length: PayloadLen,
}

impl FrameHead {
    /// Constructor.
    #[inline]
    pub const fn new(fin: Fin, opcode: OpCode, mask: Mask, length: PayloadLen) -> Self {
        Self {
            fin,
            opcode,
            mask,
            length,
        }
    }

    /// Head of an unmasked, unfragmented text frame.
    #[inline]
    pub const fn text(len: usize) -> Result<Self, FrameError> {
        match PayloadLen::from_num(len) {
            Ok(length) => Ok(Self::new(Fin::Y, OpCode::Text, Mask::None, length)),
            Err(e) => Err(e),
        }
    }

    /// Total head length, derived from the first 2 bytes.
    ///
    /// Returns [`FrameError::UnsupportedLength`] if the 64-bit
    /// extended length is used.
    #[inline]
    pub const fn head_len(b2: u8) -> Result<usize, FrameError> {
        match PayloadLen::from_flag(b2) {
            Ok(length) => Ok(2 + length.extended_len() + Mask::from_flag(b2).key_len()),
            Err(e) => Err(e),
        }
    }

    /// Encode to provided buffer, returns the count of written bytes.
    /// The caller should ensure the buffer is large enough,
    /// otherwise a [`FrameError::NotEnoughCapacity`] error will be returned.
    pub fn encode(&self, buf: &mut [u8]) -> Result<usize, FrameError> {
        let mut writer = Writer::new(buf);

        macro_rules! writex {
            ($dst: expr) => {
                writer.write_or_err($dst, || FrameError::NotEnoughCapacity)?
            };
        }

        // fin, opcode
        let b1 = self.fin.to_flag() | self.opcode.to_flag();

        // mask, payload length
        let b2 = self.mask.to_flag() | self.length.to_flag();

        writex!(&[b1, b2]);

        // extended payload length
        if let PayloadLen::Extended(v) = &self.length {
            writex!(&v.to_be_bytes());
        }

        // mask key
        if let Mask::Key(k) = &self.mask {
            writex!(k);
        }

        Ok(writer.pos())
    }

    /// Parse from provided buffer, returns [`FrameHead`] and the count of read bytes
    /// if the parse succeeds.
    /// If there is not enough data to parse, a [`FrameError::NotEnoughData`] error
    /// will be returned.
    pub fn decode(buf: &[u8]) -> Result<(Self, usize), FrameError> {
        let (b1, b2) = match buf {
            [b1, b2, ..] => (*b1, *b2),
            _ => return Err(FrameError::NotEnoughData),
        };

        // fin, opcode
        let fin = Fin::from_flag(b1);
        let opcode = OpCode::from_flag(b1);

        // mask, payload length
        let mut mask = Mask::from_flag(b2);
        let mut length = PayloadLen::from_flag(b2)?;

        let mut n: usize = 2;

        if let PayloadLen::Extended(_) = length {
            let ext: [u8; 2] = buf
                .get(n..n + 2)
                .and_then(|x| x.try_into().ok())
                .ok_or(FrameError::NotEnoughData)?;

            length = PayloadLen::from_byte2(ext);
            n += 2;
        }

        if let Mask::Key(_) = mask {
            let key: [u8; 4] = buf
                .get(n..n + 4)
                .and_then(|x| x.try_into().ok())
                .ok_or(FrameError::NotEnoughData)?;

            mask = Mask::Key(key);
            n += 4;
        }

        Ok((
            FrameHead {
                fin,
                opcode,
                mask,
                length,
            },
            n,
        ))
    }

    /// Only a final text frame carries a complete message.
    #[inline]
    pub fn check(&self) -> Result<(), FrameError> {
        match (self.fin, self.opcode) {
            (Fin::Y, OpCode::Text) => Ok(()),
            _ => Err(FrameError::UnsupportedFrameType),
        }
    }
}

/// A complete frame, payload is already unmasked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub head: FrameHead,
    pub payload: Vec<u8>,
}

impl Frame {
    /// Payload as utf-8 text, if it is.
    #[inline]
    pub fn text(&self) -> Option<&str> { std::str::from_utf8(&self.payload).ok() }

    /// Take the payload.
    #[inline]
    pub fn into_payload(self) -> Vec<u8> { self.payload }
}

/// Encode a complete, unmasked text frame.
///
/// Returns [`FrameError::UnsupportedLength`] if the payload is longer
/// than [`MAX_PAYLOAD_LEN`].
pub fn encode_text(payload: &[u8]) -> Result<Vec<u8>, FrameError> {
    let head = FrameHead::text(payload.len())?;

    let mut buf = [0_u8; MAX_FRAME_HEAD_LEN];
    let n = head.encode(&mut buf)?;

    let mut frame = Vec::with_capacity(n + payload.len());
    frame.extend_from_slice(&buf[..n]);
    frame.extend_from_slice(payload);
    Ok(frame)
}
