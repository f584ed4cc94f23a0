//! Value tags of the primary fixed-width scheme (wire version 1).
//!
//! Every tag byte maps to exactly one decode rule. `0x20..=0x2F` is the
//! application-reserved band: those tags are self-delimiting (a varint
//! payload length follows the tag) so lenient decoders can skip data
//! they do not understand. Everything from `0x30` up is unassigned.

pub const TAG_NULL: u8 = 0x00;
pub const TAG_FALSE: u8 = 0x01;
pub const TAG_TRUE: u8 = 0x02;

pub const TAG_I8: u8 = 0x03;
pub const TAG_I16: u8 = 0x04;
pub const TAG_I32: u8 = 0x05;
pub const TAG_I64: u8 = 0x06;
pub const TAG_U8: u8 = 0x07;
pub const TAG_U16: u8 = 0x08;
pub const TAG_U32: u8 = 0x09;

pub const TAG_F32: u8 = 0x0a;
pub const TAG_F64: u8 = 0x0b;

pub const TAG_STR_EMPTY: u8 = 0x0c;
pub const TAG_STR8: u8 = 0x0d;
pub const TAG_STR16: u8 = 0x0e;
pub const TAG_STR32: u8 = 0x0f;

pub const TAG_ARR_EMPTY: u8 = 0x10;
pub const TAG_ARR8: u8 = 0x11;
pub const TAG_ARR16: u8 = 0x12;
pub const TAG_ARR32: u8 = 0x13;

pub const TAG_OBJ_EMPTY: u8 = 0x14;
pub const TAG_OBJ8: u8 = 0x15;
pub const TAG_OBJ16: u8 = 0x16;
pub const TAG_OBJ32: u8 = 0x17;

/// Opens an array whose member count is unknown upfront; members follow
/// until [`TAG_BREAK`].
pub const TAG_ARR_INDEF: u8 = 0x18;
/// Opens an object whose entry count is unknown upfront; entries follow
/// until a break in key position (`keys::KEY_BREAK`).
pub const TAG_OBJ_INDEF: u8 = 0x19;

/// Terminates an indefinite-length array.
pub const TAG_BREAK: u8 = 0x1f;

/// First byte of the application-reserved, self-delimiting tag band.
pub const TAG_RESERVED_MIN: u8 = 0x20;
/// Last byte of the application-reserved tag band.
pub const TAG_RESERVED_MAX: u8 = 0x2f;
