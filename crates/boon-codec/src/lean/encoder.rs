//! `LeanEncoder` — simplified-scheme encoder.

use boon_buffers::Writer;

use crate::constants::{MAGIC, VERSION_LEAN};
use crate::json_value::{safe_integer, JsonValue};
use crate::options::EncodeOptions;
use crate::varint::{write_varint_u64, zigzag_encode};

use super::constants::*;

/// Simplified-scheme encoder: zigzag-varint integers, varint-length
/// strings, indefinite-only containers, no dictionaries.
///
/// The `use_key_table` encode option has no effect in this scheme.
pub struct LeanEncoder {
    pub writer: Writer,
    options: EncodeOptions,
}

impl Default for LeanEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl LeanEncoder {
    pub fn new() -> Self {
        Self::with_options(EncodeOptions::default())
    }

    pub fn with_options(options: EncodeOptions) -> Self {
        Self {
            writer: Writer::with_capacity(options.initial_buffer_size),
            options,
        }
    }

    /// Encodes one value into a fresh byte vector.
    pub fn encode(&mut self, value: &JsonValue) -> Vec<u8> {
        self.writer.reset();
        if self.options.include_header {
            self.writer.buf(&MAGIC);
            self.writer.u8(VERSION_LEAN);
        }
        self.write_any(value);
        self.writer.flush()
    }

    /// Encodes a `serde_json::Value` through the abstract model.
    pub fn encode_json(&mut self, value: &serde_json::Value) -> Vec<u8> {
        self.encode(&JsonValue::from(value.clone()))
    }

    pub fn write_any(&mut self, value: &JsonValue) {
        match value {
            JsonValue::Null => self.writer.u8(LEAN_NULL),
            JsonValue::Bool(b) => self.writer.u8(if *b { LEAN_TRUE } else { LEAN_FALSE }),
            JsonValue::Number(n) => self.write_number(*n),
            JsonValue::Str(s) => self.write_str(s),
            JsonValue::Array(items) => {
                self.writer.u8(LEAN_ARR);
                for item in items {
                    self.write_any(item);
                }
                self.writer.u8(LEAN_BREAK);
            }
            JsonValue::Object(pairs) => {
                self.writer.u8(LEAN_OBJ);
                for (key, item) in pairs {
                    // Keys are tagged strings: the break byte is only ever
                    // compared against a tag, never a length field.
                    self.write_str(key);
                    self.write_any(item);
                }
                self.writer.u8(LEAN_BREAK);
            }
        }
    }

    pub fn write_number(&mut self, n: f64) {
        match safe_integer(n) {
            Some(int) => {
                self.writer.u8(LEAN_INT);
                write_varint_u64(&mut self.writer, zigzag_encode(int));
            }
            None => self.writer.u8f64(LEAN_FLOAT, n),
        }
    }

    pub fn write_str(&mut self, s: &str) {
        self.writer.u8(LEAN_STR);
        write_varint_u64(&mut self.writer, s.len() as u64);
        self.writer.utf8(s);
    }
}
