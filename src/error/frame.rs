use std::fmt::{Display, Formatter};

#[derive(Debug, PartialEq, Eq)]
pub enum FrameError {
    /// Payload length needs the 64-bit extended form.
    UnsupportedLength,

    /// Fragmented or non-text frame.
    UnsupportedFrameType,

    /// Stream closed after `offset` bytes of the current frame.
    UnexpectedEnd { offset: usize },

    NotEnoughData,

    NotEnoughCapacity,
}

impl FrameError {
    /// The peer went away between two frames.
    #[inline]
    pub const fn is_frame_boundary(&self) -> bool {
        matches!(self, FrameError::UnexpectedEnd { offset: 0 })
    }
}

impl Display for FrameError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        use FrameError::*;
        match self {
            UnsupportedLength => write!(f, "Payload length exceeds 65535 bytes"),
            UnsupportedFrameType => write!(f, "Unsupported frame type"),
            UnexpectedEnd { offset } => {
                write!(f, "Unexpected end of stream after {} bytes", offset)
            }
            NotEnoughData => write!(f, "Not enough data to parse"),
            NotEnoughCapacity => write!(f, "Not enough space to write to"),
        }
    }
}

// use default impl
impl std::error::Error for FrameError {}
