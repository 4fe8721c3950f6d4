/// Cursor over a caller provided buffer.
///
/// Every write is bounds checked, a write which does not fit
/// leaves the cursor untouched.
pub struct Writer<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl<'a> Writer<'a> {
    #[inline]
    pub fn new(buf: &'a mut [u8]) -> Self { Writer { buf, pos: 0 } }

    #[inline]
    pub const fn pos(&self) -> usize { self.pos }

    #[inline]
    pub fn remaining(&self) -> usize { self.buf.len() - self.pos }

    /// Returns `None` if there is not enough space left.
    #[inline]
    pub fn write(&mut self, src: &[u8]) -> Option<usize> {
        let end = self.pos + src.len();
        self.buf.get_mut(self.pos..end)?.copy_from_slice(src);
        self.pos = end;
        Some(src.len())
    }

    #[inline]
    pub fn write_or_err<F, E>(&mut self, src: &[u8], f: F) -> Result<usize, E>
    where
        F: Fn() -> E,
        E: std::error::Error,
    {
        self.write(src).ok_or_else(f)
    }
}
