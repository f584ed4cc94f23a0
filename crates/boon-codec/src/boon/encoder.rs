//! `BoonEncoder` — primary-scheme encoder with narrowest-fit tag
//! selection and the optional key-table pre-pass.

use boon_buffers::{is_float32, Writer};

use crate::constants::{MAGIC, STRING_TABLE_TAG, VERSION_BOON};
use crate::json_value::{safe_integer, JsonValue};
use crate::keys::{
    collect_keys, should_use_table, CommonKeys, KeyTable, KeyUsage, KEY_BREAK, KEY_COMMON_BIT,
    KEY_LEN_U16, KEY_LEN_U32, KEY_LITERAL_MAX, KEY_TABLE_REF,
};
use crate::options::{EncodeOptions, KeyTableMode};
use crate::varint::write_varint_u64;

use super::constants::*;

/// Primary-scheme encoder.
///
/// Walks the value tree once, writing tagged bytes through the growable
/// writer; the optional key-collection pre-pass runs before the walk.
/// Encoding never fails on well-formed [`JsonValue`] input.
pub struct BoonEncoder {
    pub writer: Writer,
    common: CommonKeys,
    options: EncodeOptions,
}

impl Default for BoonEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl BoonEncoder {
    pub fn new() -> Self {
        Self::with_options(EncodeOptions::default())
    }

    pub fn with_options(options: EncodeOptions) -> Self {
        Self {
            writer: Writer::with_capacity(options.initial_buffer_size),
            common: CommonKeys::new(),
            options,
        }
    }

    /// Encodes one value into a fresh byte vector.
    pub fn encode(&mut self, value: &JsonValue) -> Vec<u8> {
        self.writer.reset();
        let table = self.plan_key_table(value);
        if self.options.include_header {
            self.write_header(table.as_ref());
        }
        self.write_any(value, table.as_ref());
        self.writer.flush()
    }

    /// Encodes a `serde_json::Value` through the abstract model.
    pub fn encode_json(&mut self, value: &serde_json::Value) -> Vec<u8> {
        self.encode(&JsonValue::from(value.clone()))
    }

    /// Runs the key-collection pre-pass and the cost estimate.
    ///
    /// Headerless messages cannot carry a table: the table rides in the
    /// header region.
    fn plan_key_table(&self, value: &JsonValue) -> Option<KeyTable> {
        if !self.options.include_header {
            return None;
        }
        match self.options.use_key_table {
            KeyTableMode::Never => None,
            KeyTableMode::Always => {
                let mut usage = KeyUsage::new();
                collect_keys(value, &self.common, &mut usage);
                if usage.is_empty() {
                    None
                } else {
                    Some(usage.into_table())
                }
            }
            KeyTableMode::Auto => {
                let mut usage = KeyUsage::new();
                collect_keys(value, &self.common, &mut usage);
                if should_use_table(&usage) {
                    Some(usage.into_table())
                } else {
                    None
                }
            }
        }
    }

    fn write_header(&mut self, table: Option<&KeyTable>) {
        self.writer.buf(&MAGIC);
        match table {
            Some(table) => {
                self.writer.u8(STRING_TABLE_TAG);
                self.writer.u8(VERSION_BOON);
                write_varint_u64(&mut self.writer, table.len() as u64);
                for key in table.iter() {
                    write_varint_u64(&mut self.writer, key.len() as u64);
                    self.writer.utf8(key);
                }
            }
            None => self.writer.u8(VERSION_BOON),
        }
    }

    fn write_any(&mut self, value: &JsonValue, table: Option<&KeyTable>) {
        match value {
            JsonValue::Null => self.write_null(),
            JsonValue::Bool(b) => self.write_boolean(*b),
            JsonValue::Number(n) => self.write_number(*n),
            JsonValue::Str(s) => self.write_str(s),
            JsonValue::Array(items) => {
                if items.is_empty() {
                    self.writer.u8(TAG_ARR_EMPTY);
                } else {
                    self.write_arr_hdr(items.len());
                    for item in items {
                        self.write_any(item, table);
                    }
                }
            }
            JsonValue::Object(pairs) => {
                if pairs.is_empty() {
                    self.writer.u8(TAG_OBJ_EMPTY);
                } else {
                    self.write_obj_hdr(pairs.len());
                    for (key, item) in pairs {
                        self.write_key(key, table);
                        self.write_any(item, table);
                    }
                }
            }
        }
    }

    pub fn write_null(&mut self) {
        self.writer.u8(TAG_NULL);
    }

    pub fn write_boolean(&mut self, b: bool) {
        self.writer.u8(if b { TAG_TRUE } else { TAG_FALSE });
    }

    /// Writes a number, classifying it as integer or float first.
    pub fn write_number(&mut self, n: f64) {
        match safe_integer(n) {
            Some(int) => self.write_integer(int),
            None => self.write_float(n),
        }
    }

    /// Writes an integer with the narrowest exactly-representing width.
    ///
    /// Unsigned widths are only chosen for non-negative values that do
    /// not fit the signed width of the same size.
    pub fn write_integer(&mut self, int: i64) {
        if (-128..=127).contains(&int) {
            self.writer.u8(TAG_I8);
            self.writer.i8(int as i8);
        } else if (128..=255).contains(&int) {
            self.writer.u8(TAG_U8);
            self.writer.u8(int as u8);
        } else if (-32768..=32767).contains(&int) {
            self.writer.u8(TAG_I16);
            self.writer.i16(int as i16);
        } else if (32768..=65535).contains(&int) {
            self.writer.u8u16(TAG_U16, int as u16);
        } else if (-2147483648..=2147483647).contains(&int) {
            self.writer.u8(TAG_I32);
            self.writer.i32(int as i32);
        } else if (2147483648..=4294967295).contains(&int) {
            self.writer.u8u32(TAG_U32, int as u32);
        } else {
            self.writer.u8(TAG_I64);
            self.writer.i64(int);
        }
    }

    /// Uses f32 when the value fits losslessly, otherwise f64.
    pub fn write_float(&mut self, float: f64) {
        if is_float32(float) {
            self.writer.u8f32(TAG_F32, float as f32);
        } else {
            self.writer.u8f64(TAG_F64, float);
        }
    }

    pub fn write_str(&mut self, s: &str) {
        let byte_len = s.len();
        if byte_len == 0 {
            self.writer.u8(TAG_STR_EMPTY);
            return;
        }
        if byte_len <= 0xff {
            self.writer.u8(TAG_STR8);
            self.writer.u8(byte_len as u8);
        } else if byte_len <= 0xffff {
            self.writer.u8u16(TAG_STR16, byte_len as u16);
        } else {
            self.writer.u8u32(TAG_STR32, byte_len as u32);
        }
        self.writer.utf8(s);
    }

    /// Writes a counted-array header for `length > 0` members.
    pub fn write_arr_hdr(&mut self, length: usize) {
        if length <= 0xff {
            self.writer.u8(TAG_ARR8);
            self.writer.u8(length as u8);
        } else if length <= 0xffff {
            self.writer.u8u16(TAG_ARR16, length as u16);
        } else {
            self.writer.u8u32(TAG_ARR32, length as u32);
        }
    }

    /// Writes a counted-object header for `length > 0` entries.
    pub fn write_obj_hdr(&mut self, length: usize) {
        if length <= 0xff {
            self.writer.u8(TAG_OBJ8);
            self.writer.u8(length as u8);
        } else if length <= 0xffff {
            self.writer.u8u16(TAG_OBJ16, length as u16);
        } else {
            self.writer.u8u32(TAG_OBJ32, length as u32);
        }
    }

    /// Opens an indefinite-length array; close with [`Self::write_arr_end`].
    pub fn write_arr_begin(&mut self) {
        self.writer.u8(TAG_ARR_INDEF);
    }

    /// Terminates an indefinite-length array.
    pub fn write_arr_end(&mut self) {
        self.writer.u8(TAG_BREAK);
    }

    /// Opens an indefinite-length object; close with [`Self::write_obj_end`].
    pub fn write_obj_begin(&mut self) {
        self.writer.u8(TAG_OBJ_INDEF);
    }

    /// Terminates an indefinite-length object.
    ///
    /// The object break lives in key byte space: it appears where the
    /// next key otherwise would.
    pub fn write_obj_end(&mut self) {
        self.writer.u8(KEY_BREAK);
    }

    /// Writes an object key using the cheapest available representation:
    /// common-dictionary code, key-table index, then literal.
    pub fn write_key(&mut self, key: &str, table: Option<&KeyTable>) {
        if let Some(code) = self.common.get_code(key) {
            self.writer.u8(KEY_COMMON_BIT | code);
            return;
        }
        if let Some(index) = table.and_then(|t| t.get_id(key)) {
            self.writer.u8(KEY_TABLE_REF);
            write_varint_u64(&mut self.writer, index as u64);
            return;
        }
        let len = key.len();
        if len <= KEY_LITERAL_MAX as usize {
            self.writer.u8(len as u8);
        } else if len <= 0xffff {
            self.writer.u8u16(KEY_LEN_U16, len as u16);
        } else {
            self.writer.u8u32(KEY_LEN_U32, len as u32);
        }
        self.writer.utf8(key);
    }
}
