//! Format-family constants shared by both wire schemes.

/// Four-byte magic marker opening every headered message.
pub const MAGIC: [u8; 4] = *b"BOON";

/// Wire version of the primary fixed-width tag scheme.
pub const VERSION_BOON: u8 = 1;

/// Wire version of the simplified varint scheme.
pub const VERSION_LEAN: u8 = 2;

/// Header discriminator selecting the key-table-prefixed form.
///
/// Appears where a version byte otherwise would, immediately after the
/// magic; the real version byte follows it.
pub const STRING_TABLE_TAG: u8 = 0xd1;
