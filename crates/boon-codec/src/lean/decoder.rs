//! `LeanDecoder` — simplified-scheme decoder.

use boon_buffers::Reader;

use crate::boon::insert_entry;
use crate::constants::{MAGIC, VERSION_LEAN};
use crate::error::BoonError;
use crate::json_value::JsonValue;
use crate::options::DecodeOptions;
use crate::varint::{read_varint_u64, zigzag_decode};

use super::constants::*;

/// Simplified-scheme decoder.
///
/// Integers decode through the zigzag mapping into the f64 numeric
/// slot; magnitudes beyond 2^53 lose precision on a best-effort basis.
pub struct LeanDecoder {
    options: DecodeOptions,
}

impl Default for LeanDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl LeanDecoder {
    pub fn new() -> Self {
        Self::with_options(DecodeOptions::default())
    }

    pub fn with_options(options: DecodeOptions) -> Self {
        Self { options }
    }

    /// Decodes one value from `data`.
    pub fn decode(&self, data: &[u8]) -> Result<JsonValue, BoonError> {
        let mut reader = Reader::new(data);
        if self.options.expect_header {
            let magic = reader.try_buf(4).map_err(|_| BoonError::InvalidHeader)?;
            if magic != MAGIC {
                return Err(BoonError::InvalidHeader);
            }
            let version = reader.try_u8().map_err(|_| BoonError::InvalidHeader)?;
            if version != VERSION_LEAN {
                return Err(BoonError::UnsupportedVersion(version));
            }
        }
        read_any(&mut reader)
    }

    /// Decodes into a `serde_json::Value` through the abstract model.
    pub fn decode_json(&self, data: &[u8]) -> Result<serde_json::Value, BoonError> {
        self.decode(data).map(serde_json::Value::from)
    }
}

fn read_any(reader: &mut Reader) -> Result<JsonValue, BoonError> {
    let tag = reader.try_u8()?;
    read_any_tag(reader, tag)
}

fn read_any_tag(reader: &mut Reader, tag: u8) -> Result<JsonValue, BoonError> {
    match tag {
        LEAN_NULL => Ok(JsonValue::Null),
        LEAN_FALSE => Ok(JsonValue::Bool(false)),
        LEAN_TRUE => Ok(JsonValue::Bool(true)),
        LEAN_INT => {
            let z = read_varint_u64(reader)?;
            Ok(JsonValue::Number(zigzag_decode(z) as f64))
        }
        LEAN_FLOAT => Ok(JsonValue::Number(reader.try_f64()?)),
        LEAN_STR => {
            let len = read_varint_u64(reader)? as usize;
            Ok(JsonValue::Str(reader.try_utf8(len)?.to_string()))
        }
        LEAN_ARR => {
            let mut items = Vec::new();
            loop {
                let tag = reader.try_u8()?;
                if tag == LEAN_BREAK {
                    break;
                }
                items.push(read_any_tag(reader, tag)?);
            }
            Ok(JsonValue::Array(items))
        }
        LEAN_OBJ => {
            let mut pairs = Vec::new();
            loop {
                // Keys are tagged strings so the break byte can never be
                // mistaken for the start of a key.
                let tag = reader.try_u8()?;
                if tag == LEAN_BREAK {
                    break;
                }
                if tag != LEAN_STR {
                    return Err(BoonError::UnknownTag(tag));
                }
                let len = read_varint_u64(reader)? as usize;
                let key = reader.try_utf8(len)?.to_string();
                let value = read_any(reader)?;
                insert_entry(&mut pairs, key, value);
            }
            Ok(JsonValue::Object(pairs))
        }
        LEAN_BREAK => Err(BoonError::UnexpectedBreak),
        _ => Err(BoonError::UnknownTag(tag)),
    }
}
