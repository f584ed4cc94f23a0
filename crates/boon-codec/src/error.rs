//! Decode error taxonomy shared by both wire schemes.

use boon_buffers::BufferError;
use thiserror::Error;

/// Error type for BOON decoding operations.
///
/// Every error aborts the current decode call entirely; there are no
/// partial results and no retry logic inside the codec.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BoonError {
    /// Magic mismatch or malformed header region.
    #[error("invalid header")]
    InvalidHeader,
    /// Version byte exceeds what this decoder understands.
    #[error("unsupported version: {0}")]
    UnsupportedVersion(u8),
    /// Tag byte outside defined and reserved ranges.
    #[error("unknown tag: 0x{0:02x}")]
    UnknownTag(u8),
    /// Tag byte in a range reserved for future versions.
    #[error("reserved tag: 0x{0:02x}")]
    ReservedTag(u8),
    /// Fewer bytes remain than a field declares.
    #[error("unexpected end of input")]
    TruncatedData,
    /// String or key bytes are not valid UTF-8.
    #[error("invalid UTF-8")]
    InvalidUtf8,
    /// Break marker encountered outside an open indefinite container.
    #[error("unexpected break marker")]
    UnexpectedBreak,
    /// A key-table index is out of range for the declared table.
    #[error("key index out of range: {0}")]
    InvalidKeyIndex(u64),
    /// A varint continuation chain exceeds the 10-byte maximum.
    #[error("variable-length integer is too long")]
    InvalidVarint,
}

impl From<BufferError> for BoonError {
    fn from(err: BufferError) -> Self {
        match err {
            BufferError::EndOfBuffer => BoonError::TruncatedData,
            BufferError::InvalidUtf8 => BoonError::InvalidUtf8,
        }
    }
}
