//! Binary buffer writer with auto-growing capacity.

/// A binary buffer writer that grows automatically as needed.
///
/// # Example
///
/// ```
/// use boon_buffers::Writer;
///
/// let mut writer = Writer::new();
/// writer.u8(0x01);
/// writer.u16(0x0203);
/// let data = writer.flush();
/// assert_eq!(data, [0x01, 0x02, 0x03]);
/// ```
pub struct Writer {
    /// The underlying byte buffer.
    pub uint8: Vec<u8>,
    /// Position where last flush happened.
    pub x0: usize,
    /// Current cursor position.
    pub x: usize,
}

impl Default for Writer {
    fn default() -> Self {
        Self::new()
    }
}

impl Writer {
    /// Creates a new writer with the default initial capacity (4KB).
    pub fn new() -> Self {
        Self::with_capacity(4 * 1024)
    }

    /// Creates a new writer with a caller-chosen initial capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        let uint8 = vec![0u8; capacity.max(1)];
        Self { uint8, x0: 0, x: 0 }
    }

    /// Ensures at least `capacity` more bytes can be written.
    ///
    /// Grows the backing storage by doubling until it covers
    /// `cursor + capacity`, so total writes stay amortized O(1).
    pub fn ensure_capacity(&mut self, capacity: usize) {
        let required = self.x + capacity;
        if required <= self.uint8.len() {
            return;
        }
        let mut new_size = self.uint8.len() * 2;
        while new_size < required {
            new_size *= 2;
        }
        self.grow(new_size);
    }

    fn grow(&mut self, new_size: usize) {
        let mut new_buf = vec![0u8; new_size];
        new_buf[..self.x].copy_from_slice(&self.uint8[..self.x]);
        self.uint8 = new_buf;
    }

    /// Moves the cursor forward by the given amount.
    pub fn move_cursor(&mut self, capacity: usize) {
        self.ensure_capacity(capacity);
        self.x += capacity;
    }

    /// Resets the flush position.
    pub fn reset(&mut self) {
        self.x0 = self.x;
    }

    /// Returns the written data and advances the flush position.
    pub fn flush(&mut self) -> Vec<u8> {
        let result = self.uint8[self.x0..self.x].to_vec();
        self.x0 = self.x;
        result
    }

    /// Writes an unsigned 8-bit integer.
    #[inline]
    pub fn u8(&mut self, val: u8) {
        self.ensure_capacity(1);
        self.uint8[self.x] = val;
        self.x += 1;
    }

    /// Writes a signed 8-bit integer.
    #[inline]
    pub fn i8(&mut self, val: i8) {
        self.ensure_capacity(1);
        self.uint8[self.x] = val as u8;
        self.x += 1;
    }

    /// Writes an unsigned 16-bit integer (big-endian).
    #[inline]
    pub fn u16(&mut self, val: u16) {
        self.ensure_capacity(2);
        let bytes = val.to_be_bytes();
        self.uint8[self.x] = bytes[0];
        self.uint8[self.x + 1] = bytes[1];
        self.x += 2;
    }

    /// Writes a signed 16-bit integer (big-endian).
    #[inline]
    pub fn i16(&mut self, val: i16) {
        self.ensure_capacity(2);
        let bytes = val.to_be_bytes();
        self.uint8[self.x] = bytes[0];
        self.uint8[self.x + 1] = bytes[1];
        self.x += 2;
    }

    /// Writes an unsigned 32-bit integer (big-endian).
    #[inline]
    pub fn u32(&mut self, val: u32) {
        self.ensure_capacity(4);
        let bytes = val.to_be_bytes();
        self.uint8[self.x..self.x + 4].copy_from_slice(&bytes);
        self.x += 4;
    }

    /// Writes a signed 32-bit integer (big-endian).
    #[inline]
    pub fn i32(&mut self, val: i32) {
        self.ensure_capacity(4);
        let bytes = val.to_be_bytes();
        self.uint8[self.x..self.x + 4].copy_from_slice(&bytes);
        self.x += 4;
    }

    /// Writes an unsigned 64-bit integer (big-endian).
    #[inline]
    pub fn u64(&mut self, val: u64) {
        self.ensure_capacity(8);
        let bytes = val.to_be_bytes();
        self.uint8[self.x..self.x + 8].copy_from_slice(&bytes);
        self.x += 8;
    }

    /// Writes a signed 64-bit integer (big-endian).
    #[inline]
    pub fn i64(&mut self, val: i64) {
        self.ensure_capacity(8);
        let bytes = val.to_be_bytes();
        self.uint8[self.x..self.x + 8].copy_from_slice(&bytes);
        self.x += 8;
    }

    /// Writes a 32-bit floating point number (big-endian).
    #[inline]
    pub fn f32(&mut self, val: f32) {
        self.ensure_capacity(4);
        let bytes = val.to_be_bytes();
        self.uint8[self.x..self.x + 4].copy_from_slice(&bytes);
        self.x += 4;
    }

    /// Writes a 64-bit floating point number (big-endian).
    #[inline]
    pub fn f64(&mut self, val: f64) {
        self.ensure_capacity(8);
        let bytes = val.to_be_bytes();
        self.uint8[self.x..self.x + 8].copy_from_slice(&bytes);
        self.x += 8;
    }

    /// Writes a u8 followed by a u16 (big-endian).
    pub fn u8u16(&mut self, u8_val: u8, u16_val: u16) {
        self.ensure_capacity(3);
        self.uint8[self.x] = u8_val;
        let bytes = u16_val.to_be_bytes();
        self.uint8[self.x + 1] = bytes[0];
        self.uint8[self.x + 2] = bytes[1];
        self.x += 3;
    }

    /// Writes a u8 followed by a u32 (big-endian).
    pub fn u8u32(&mut self, u8_val: u8, u32_val: u32) {
        self.ensure_capacity(5);
        self.uint8[self.x] = u8_val;
        let bytes = u32_val.to_be_bytes();
        self.uint8[self.x + 1..self.x + 5].copy_from_slice(&bytes);
        self.x += 5;
    }

    /// Writes a u8 followed by a u64 (big-endian).
    pub fn u8u64(&mut self, u8_val: u8, u64_val: u64) {
        self.ensure_capacity(9);
        self.uint8[self.x] = u8_val;
        let bytes = u64_val.to_be_bytes();
        self.uint8[self.x + 1..self.x + 9].copy_from_slice(&bytes);
        self.x += 9;
    }

    /// Writes a u8 followed by an f32 (big-endian).
    pub fn u8f32(&mut self, u8_val: u8, f32_val: f32) {
        self.ensure_capacity(5);
        self.uint8[self.x] = u8_val;
        let bytes = f32_val.to_be_bytes();
        self.uint8[self.x + 1..self.x + 5].copy_from_slice(&bytes);
        self.x += 5;
    }

    /// Writes a u8 followed by an f64 (big-endian).
    pub fn u8f64(&mut self, u8_val: u8, f64_val: f64) {
        self.ensure_capacity(9);
        self.uint8[self.x] = u8_val;
        let bytes = f64_val.to_be_bytes();
        self.uint8[self.x + 1..self.x + 9].copy_from_slice(&bytes);
        self.x += 9;
    }

    /// Writes a byte slice.
    pub fn buf(&mut self, buf: &[u8]) {
        let length = buf.len();
        self.ensure_capacity(length);
        self.uint8[self.x..self.x + length].copy_from_slice(buf);
        self.x += length;
    }

    /// Writes a UTF-8 string. Returns the number of bytes written.
    pub fn utf8(&mut self, s: &str) -> usize {
        let bytes = s.as_bytes();
        let length = bytes.len();
        self.ensure_capacity(length);
        self.uint8[self.x..self.x + length].copy_from_slice(bytes);
        self.x += length;
        length
    }
}
