//! Key dictionary subsystem: the static common-key dictionary and the
//! optional per-message key table.
//!
//! Object keys are written without a type tag; their first byte selects
//! one of three representations, all of which may appear in one message:
//!
//! - `0x00..=0x7B` — literal key, the byte is the UTF-8 length directly;
//! - `0x7D` — per-message table reference, varint index follows;
//! - `0x7E`/`0x7F` — literal key with an explicit u16/u32 length field;
//! - `0x80..=0xFF` — common-key dictionary code (`0x80 | index`).
//!
//! `0x7C` marks the end of an indefinite-length object (the break
//! position of an object is a key position, so the marker lives in the
//! key byte space rather than the value tag space).

mod common;
mod table;

pub use common::{CommonKeys, COMMON_KEYS};
pub use table::{collect_keys, should_use_table, KeyTable, KeyUsage};

/// Largest key length encodable directly in the first byte.
pub const KEY_LITERAL_MAX: u8 = 0x7b;
/// Terminates an indefinite-length object.
pub const KEY_BREAK: u8 = 0x7c;
/// A varint index into the per-message key table follows.
pub const KEY_TABLE_REF: u8 = 0x7d;
/// A u16 big-endian key length follows.
pub const KEY_LEN_U16: u8 = 0x7e;
/// A u32 big-endian key length follows.
pub const KEY_LEN_U32: u8 = 0x7f;
/// High bit selecting the common-key dictionary band.
pub const KEY_COMMON_BIT: u8 = 0x80;

/// Bytes a literal key of `len` UTF-8 bytes costs, including its length
/// prefix. Feeds the key-table cost estimate.
pub fn literal_key_cost(len: usize) -> usize {
    if len <= KEY_LITERAL_MAX as usize {
        1 + len
    } else if len <= 0xffff {
        3 + len
    } else {
        5 + len
    }
}
