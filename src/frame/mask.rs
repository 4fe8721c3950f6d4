//!  Mask flag and key.

/// Payload mask with a 32-bit key.
///
/// Only client to server frames carry a key,
/// frames written by this crate always use `Mask::None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mask {
    Key([u8; 4]),
    None,
}

impl Mask {
    /// Read the flag which indicates whether mask is used.
    ///
    /// The key is left empty, the caller should read the
    /// next 4 bytes to get the real key.
    #[inline]
    pub const fn from_flag(b: u8) -> Self {
        match b & 0x80 {
            0x80 => Mask::Key([0; 4]),
            _ => Mask::None,
        }
    }

    /// Get the flag byte.
    #[inline]
    pub const fn to_flag(&self) -> u8 {
        match self {
            Mask::Key(_) => 0x80,
            Mask::None => 0x00,
        }
    }

    /// Number of key bytes following the length.
    #[inline]
    pub const fn key_len(&self) -> usize {
        match self {
            Mask::Key(_) => 4,
            Mask::None => 0,
        }
    }
}

/// Mask the buffer, byte by byte.
///
/// Masking twice with the same key restores the buffer.
#[inline]
pub fn apply_mask(key: [u8; 4], buf: &mut [u8]) {
    for (i, b) in buf.iter_mut().enumerate() {
        *b ^= key[i & 0x03];
    }
}

/// Mask the buffer, 4 bytes at a time.
#[inline]
pub fn apply_mask4(key: [u8; 4], buf: &mut [u8]) {
    let key4 = u32::from_ne_bytes(key);

    // u8 -> u32 is always a valid transmute
    let (prefix, middle, suffix) = unsafe { buf.align_to_mut::<u32>() };

    apply_mask(key, prefix);

    let head = prefix.len() & 3;
    let key4 = if head > 0 {
        if cfg!(target_endian = "big") {
            key4.rotate_left(8 * head as u32)
        } else {
            key4.rotate_right(8 * head as u32)
        }
    } else {
        key4
    };
    for b4 in middle.iter_mut() {
        *b4 ^= key4;
    }

    apply_mask(key4.to_ne_bytes(), suffix);
}
