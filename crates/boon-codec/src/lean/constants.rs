//! Value tags of the simplified varint scheme (wire version 2).
//!
//! One tag per kind: integers are zigzag varints, strings carry a
//! varint byte length, and containers are indefinite-only, terminated
//! by a break byte. Floats are 8-byte big-endian — the whole family
//! uses one endianness convention; the two schemes remain
//! wire-incompatible (different version bytes and tag spaces) and must
//! not be mixed.

pub const LEAN_NULL: u8 = 0x00;
pub const LEAN_FALSE: u8 = 0x01;
pub const LEAN_TRUE: u8 = 0x02;
/// Zigzag varint integer.
pub const LEAN_INT: u8 = 0x03;
/// 8-byte big-endian IEEE-754 float.
pub const LEAN_FLOAT: u8 = 0x04;
/// Varint byte length + UTF-8 bytes.
pub const LEAN_STR: u8 = 0x05;
/// Members until [`LEAN_BREAK`].
pub const LEAN_ARR: u8 = 0x06;
/// (tagged string key, value) pairs until [`LEAN_BREAK`].
pub const LEAN_OBJ: u8 = 0x07;

/// Terminates the innermost open container.
pub const LEAN_BREAK: u8 = 0xff;
