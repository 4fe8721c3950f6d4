//! Payload length.

use crate::error::FrameError;

/// Largest payload this implementation reads or writes.
pub const MAX_PAYLOAD_LEN: usize = u16::MAX as usize;

/// Payload length.
///
/// Could be 7 bits or 7+16 bits. The 7+64 bits form is
/// rejected with [`FrameError::UnsupportedLength`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadLen {
    /// 0 - 125
    Standard(u8),
    /// 126 - 65535
    Extended(u16),
}

impl PayloadLen {
    /// Parse from number.
    #[inline]
    pub const fn from_num(n: usize) -> Result<Self, FrameError> {
        if n < 126 {
            Ok(PayloadLen::Standard(n as u8))
        } else if n <= MAX_PAYLOAD_LEN {
            Ok(PayloadLen::Extended(n as u16))
        } else {
            Err(FrameError::UnsupportedLength)
        }
    }

    /// Convert to number.
    #[inline]
    pub const fn to_num(self) -> usize {
        use PayloadLen::*;
        match self {
            Standard(v) => v as usize,
            Extended(v) => v as usize,
        }
    }

    /// Read the flag which indicates the kind of length.
    ///
    /// If extended length is used, the caller should read the next 2 bytes
    /// to get the real length.
    #[inline]
    pub const fn from_flag(b: u8) -> Result<Self, FrameError> {
        match b & 0x7f {
            126 => Ok(PayloadLen::Extended(0)),
            127 => Err(FrameError::UnsupportedLength),
            b => Ok(PayloadLen::Standard(b)),
        }
    }

    /// Generate the flag byte.
    /// If `length <= 125`, it represents the real length.
    #[inline]
    pub const fn to_flag(&self) -> u8 {
        use PayloadLen::*;
        match self {
            Standard(b) => *b,
            Extended(_) => 126,
        }
    }

    /// Read as 16-bit length.
    #[inline]
    pub const fn from_byte2(buf: [u8; 2]) -> Self { PayloadLen::Extended(u16::from_be_bytes(buf)) }

    /// Number of extended length bytes following the flag byte.
    #[inline]
    pub const fn extended_len(&self) -> usize {
        match self {
            PayloadLen::Standard(_) => 0,
            PayloadLen::Extended(_) => 2,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn standard() {
        for v in 0..=125_u8 {
            let a = PayloadLen::from_flag(v).unwrap();
            let b = PayloadLen::from_num(v as usize).unwrap();

            assert_eq!(a.to_flag(), v);
            assert_eq!(a.to_num(), b.to_num());
            assert_eq!(b.extended_len(), 0);
        }
    }

    #[test]
    fn extended() {
        for v in [126_u16, 127, 1000, 65535] {
            let a = PayloadLen::from_num(v as usize).unwrap();
            let b = PayloadLen::from_byte2(v.to_be_bytes());

            assert_eq!(a.to_flag(), 126_u8);
            assert_eq!(a.to_num(), b.to_num());
            assert_eq!(a.extended_len(), 2);
        }
    }

    #[test]
    fn unsupported() {
        assert_eq!(PayloadLen::from_flag(127), Err(FrameError::UnsupportedLength));
        assert_eq!(PayloadLen::from_flag(0xff), Err(FrameError::UnsupportedLength));
        assert_eq!(PayloadLen::from_num(65536), Err(FrameError::UnsupportedLength));
    }
}
