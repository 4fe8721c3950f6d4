//! Fin flag and opcode.

/// Fin flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fin {
    /// a byte with its leading bit set
    Y = 0x80,

    /// a byte with its leading bit clear
    N = 0x00,
}

/// Frame opcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpCode {
    /// denotes a continuation frame, 0x00
    Continue,
    /// denotes a text frame, 0x01
    Text,
    /// denotes a binary frame, 0x02
    Binary,

    /// denotes a connection close, 0x08
    Close,
    /// denotes a ping, 0x09
    Ping,
    /// denotes a pong, 0x0a
    Pong,

    /// reserved for further frames, 0x03 - 0x07, 0x0b - 0x0f
    Reserved(u8),
}

impl Fin {
    /// Parse from byte, reserved bits are ignored.
    #[inline]
    pub const fn from_flag(b: u8) -> Self {
        match b & 0x80 {
            0x80 => Fin::Y,
            _ => Fin::N,
        }
    }

    /// Get the flag byte.
    #[inline]
    pub const fn to_flag(self) -> u8 { self as u8 }
}

impl OpCode {
    /// Parse from byte.
    #[inline]
    pub const fn from_flag(b: u8) -> Self {
        use OpCode::*;
        match b & 0x0f {
            0x00 => Continue,
            0x01 => Text,
            0x02 => Binary,
            0x08 => Close,
            0x09 => Ping,
            0x0a => Pong,
            x => Reserved(x),
        }
    }

    /// Get the flag byte.
    #[inline]
    pub const fn to_flag(self) -> u8 {
        use OpCode::*;
        match self {
            Continue => 0x00,
            Text => 0x01,
            Binary => 0x02,
            Close => 0x08,
            Ping => 0x09,
            Pong => 0x0a,
            Reserved(x) => x & 0x0f,
        }
    }
}
