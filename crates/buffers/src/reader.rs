//! Binary buffer reader with cursor tracking.

use std::str;

use crate::BufferError;

/// A binary buffer reader that reads data from a borrowed byte slice.
///
/// The reader maintains a cursor position and provides typed big-endian
/// reads. The `try_*` variants are bounds-checked and never advance the
/// cursor on failure.
///
/// # Example
///
/// ```
/// use boon_buffers::Reader;
///
/// let data = [0x01, 0x02, 0x03, 0x04];
/// let mut reader = Reader::new(&data);
///
/// assert_eq!(reader.try_u8(), Ok(0x01));
/// assert_eq!(reader.try_u16(), Ok(0x0203));
/// ```
pub struct Reader<'a> {
    /// The underlying byte slice.
    pub uint8: &'a [u8],
    /// Current cursor position.
    pub x: usize,
}

impl<'a> Reader<'a> {
    /// Creates a new reader for the given byte slice.
    pub fn new(uint8: &'a [u8]) -> Self {
        Self { uint8, x: 0 }
    }

    /// Resets the reader with a new byte slice.
    pub fn reset(&mut self, uint8: &'a [u8]) {
        self.x = 0;
        self.uint8 = uint8;
    }

    /// Returns the number of remaining bytes.
    pub fn size(&self) -> usize {
        self.uint8.len() - self.x
    }

    /// Advances the cursor by the given number of bytes.
    pub fn skip(&mut self, length: usize) {
        self.x += length;
    }

    /// Checks that `n` more bytes are available from the current cursor.
    #[inline]
    fn check(&self, n: usize) -> Result<(), BufferError> {
        if self.x + n > self.uint8.len() {
            Err(BufferError::EndOfBuffer)
        } else {
            Ok(())
        }
    }

    /// Peeks at the current byte without advancing the cursor.
    pub fn try_peek(&self) -> Result<u8, BufferError> {
        self.check(1)?;
        Ok(self.uint8[self.x])
    }

    /// Reads an unsigned 8-bit integer.
    #[inline]
    pub fn try_u8(&mut self) -> Result<u8, BufferError> {
        self.check(1)?;
        let val = self.uint8[self.x];
        self.x += 1;
        Ok(val)
    }

    /// Reads a signed 8-bit integer.
    #[inline]
    pub fn try_i8(&mut self) -> Result<i8, BufferError> {
        self.check(1)?;
        let val = self.uint8[self.x] as i8;
        self.x += 1;
        Ok(val)
    }

    /// Reads an unsigned 16-bit big-endian integer.
    #[inline]
    pub fn try_u16(&mut self) -> Result<u16, BufferError> {
        self.check(2)?;
        let val = u16::from_be_bytes([self.uint8[self.x], self.uint8[self.x + 1]]);
        self.x += 2;
        Ok(val)
    }

    /// Reads a signed 16-bit big-endian integer.
    #[inline]
    pub fn try_i16(&mut self) -> Result<i16, BufferError> {
        self.check(2)?;
        let val = i16::from_be_bytes([self.uint8[self.x], self.uint8[self.x + 1]]);
        self.x += 2;
        Ok(val)
    }

    /// Reads an unsigned 32-bit big-endian integer.
    #[inline]
    pub fn try_u32(&mut self) -> Result<u32, BufferError> {
        self.check(4)?;
        let val = u32::from_be_bytes([
            self.uint8[self.x],
            self.uint8[self.x + 1],
            self.uint8[self.x + 2],
            self.uint8[self.x + 3],
        ]);
        self.x += 4;
        Ok(val)
    }

    /// Reads a signed 32-bit big-endian integer.
    #[inline]
    pub fn try_i32(&mut self) -> Result<i32, BufferError> {
        self.check(4)?;
        let val = i32::from_be_bytes([
            self.uint8[self.x],
            self.uint8[self.x + 1],
            self.uint8[self.x + 2],
            self.uint8[self.x + 3],
        ]);
        self.x += 4;
        Ok(val)
    }

    /// Reads an unsigned 64-bit big-endian integer.
    #[inline]
    pub fn try_u64(&mut self) -> Result<u64, BufferError> {
        self.check(8)?;
        let val = u64::from_be_bytes([
            self.uint8[self.x],
            self.uint8[self.x + 1],
            self.uint8[self.x + 2],
            self.uint8[self.x + 3],
            self.uint8[self.x + 4],
            self.uint8[self.x + 5],
            self.uint8[self.x + 6],
            self.uint8[self.x + 7],
        ]);
        self.x += 8;
        Ok(val)
    }

    /// Reads a signed 64-bit big-endian integer.
    #[inline]
    pub fn try_i64(&mut self) -> Result<i64, BufferError> {
        self.check(8)?;
        let val = i64::from_be_bytes([
            self.uint8[self.x],
            self.uint8[self.x + 1],
            self.uint8[self.x + 2],
            self.uint8[self.x + 3],
            self.uint8[self.x + 4],
            self.uint8[self.x + 5],
            self.uint8[self.x + 6],
            self.uint8[self.x + 7],
        ]);
        self.x += 8;
        Ok(val)
    }

    /// Reads a 32-bit big-endian float.
    #[inline]
    pub fn try_f32(&mut self) -> Result<f32, BufferError> {
        self.check(4)?;
        let val = f32::from_be_bytes([
            self.uint8[self.x],
            self.uint8[self.x + 1],
            self.uint8[self.x + 2],
            self.uint8[self.x + 3],
        ]);
        self.x += 4;
        Ok(val)
    }

    /// Reads a 64-bit big-endian float.
    #[inline]
    pub fn try_f64(&mut self) -> Result<f64, BufferError> {
        self.check(8)?;
        let val = f64::from_be_bytes([
            self.uint8[self.x],
            self.uint8[self.x + 1],
            self.uint8[self.x + 2],
            self.uint8[self.x + 3],
            self.uint8[self.x + 4],
            self.uint8[self.x + 5],
            self.uint8[self.x + 6],
            self.uint8[self.x + 7],
        ]);
        self.x += 8;
        Ok(val)
    }

    /// Reads an `n`-byte big-endian unsigned integer, `n <= 8`.
    pub fn try_uint_be(&mut self, n: usize) -> Result<u64, BufferError> {
        debug_assert!(n <= 8);
        self.check(n)?;
        let mut val = 0u64;
        for i in 0..n {
            val = (val << 8) | self.uint8[self.x + i] as u64;
        }
        self.x += n;
        Ok(val)
    }

    /// Reads `size` raw bytes and advances the cursor.
    pub fn try_buf(&mut self, size: usize) -> Result<&'a [u8], BufferError> {
        self.check(size)?;
        let x = self.x;
        let end = x + size;
        let bin = &self.uint8[x..end];
        self.x = end;
        Ok(bin)
    }

    /// Reads a UTF-8 string of `size` bytes.
    ///
    /// The cursor does not advance on out-of-bounds; it does advance past
    /// invalid UTF-8 (the whole decode call is aborted in that case anyway).
    pub fn try_utf8(&mut self, size: usize) -> Result<&'a str, BufferError> {
        self.check(size)?;
        let start = self.x;
        self.x += size;
        str::from_utf8(&self.uint8[start..self.x]).map_err(|_| BufferError::InvalidUtf8)
    }
}
