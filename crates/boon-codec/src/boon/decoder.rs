//! `BoonDecoder` — eager primary-scheme decoder, plus the shared
//! raw-decoder core the streaming decoder builds on.

use boon_buffers::Reader;

use crate::constants::{MAGIC, STRING_TABLE_TAG, VERSION_BOON};
use crate::error::BoonError;
use crate::json_value::JsonValue;
use crate::keys::{
    CommonKeys, KeyTable, KEY_BREAK, KEY_COMMON_BIT, KEY_LEN_U16, KEY_LEN_U32, KEY_LITERAL_MAX,
    KEY_TABLE_REF,
};
use crate::options::DecodeOptions;
use crate::varint::read_varint_u64;

use super::constants::*;

/// Eager primary-scheme decoder.
///
/// Validates the header (per options), consumes the key table when
/// present, then materializes the value tree in one forward pass.
///
/// 64-bit integer payloads decode into the f64 numeric slot on a
/// best-effort basis; magnitudes beyond 2^53 lose precision.
pub struct BoonDecoder {
    options: DecodeOptions,
}

impl Default for BoonDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl BoonDecoder {
    pub fn new() -> Self {
        Self::with_options(DecodeOptions::default())
    }

    pub fn with_options(options: DecodeOptions) -> Self {
        Self { options }
    }

    /// Decodes one value from `data`.
    pub fn decode(&self, data: &[u8]) -> Result<JsonValue, BoonError> {
        let mut raw = RawDecoder::new(data);
        if self.options.expect_header {
            raw.read_header()?;
        }
        raw.read_any(self.options.strict)
    }

    /// Decodes into a `serde_json::Value` through the abstract model.
    pub fn decode_json(&self, data: &[u8]) -> Result<serde_json::Value, BoonError> {
        self.decode(data).map(serde_json::Value::from)
    }
}

/// Replaces an earlier entry for `key` or appends a new one: when wire
/// data repeats a key, the later occurrence wins.
pub(crate) fn insert_entry(obj: &mut Vec<(String, JsonValue)>, key: String, value: JsonValue) {
    if let Some(slot) = obj.iter_mut().find(|(k, _)| *k == key) {
        slot.1 = value;
    } else {
        obj.push((key, value));
    }
}

/// Tag-dispatch and key-reading core shared by the eager and streaming
/// decode paths, parameterized by the presence of a key table.
pub(crate) struct RawDecoder<'a> {
    pub(crate) reader: Reader<'a>,
    pub(crate) key_table: Option<KeyTable>,
    common: CommonKeys,
}

impl<'a> RawDecoder<'a> {
    pub(crate) fn new(data: &'a [u8]) -> Self {
        Self {
            reader: Reader::new(data),
            key_table: None,
            common: CommonKeys::new(),
        }
    }

    /// Validates the header region and consumes the key table if the
    /// string-table form is in effect. Returns the format version.
    pub(crate) fn read_header(&mut self) -> Result<u8, BoonError> {
        let magic = self
            .reader
            .try_buf(4)
            .map_err(|_| BoonError::InvalidHeader)?;
        if magic != MAGIC {
            return Err(BoonError::InvalidHeader);
        }
        let discriminator = self
            .reader
            .try_u8()
            .map_err(|_| BoonError::InvalidHeader)?;
        if discriminator == STRING_TABLE_TAG {
            let version = self
                .reader
                .try_u8()
                .map_err(|_| BoonError::InvalidHeader)?;
            if version != VERSION_BOON {
                return Err(BoonError::UnsupportedVersion(version));
            }
            let count = read_varint_u64(&mut self.reader)?;
            let mut table = KeyTable::new();
            for _ in 0..count {
                let len = read_varint_u64(&mut self.reader)? as usize;
                let key = self.reader.try_utf8(len)?;
                table.add(key);
            }
            self.key_table = Some(table);
            Ok(version)
        } else {
            if discriminator != VERSION_BOON {
                return Err(BoonError::UnsupportedVersion(discriminator));
            }
            Ok(discriminator)
        }
    }

    /// Reads one value starting at the next tag byte.
    pub(crate) fn read_any(&mut self, strict: bool) -> Result<JsonValue, BoonError> {
        let tag = self.reader.try_u8()?;
        self.read_any_tag(tag, strict)
    }

    /// Reads one value whose tag byte has already been consumed.
    pub(crate) fn read_any_tag(&mut self, tag: u8, strict: bool) -> Result<JsonValue, BoonError> {
        match tag {
            TAG_NULL => Ok(JsonValue::Null),
            TAG_FALSE => Ok(JsonValue::Bool(false)),
            TAG_TRUE => Ok(JsonValue::Bool(true)),
            TAG_I8 => Ok(JsonValue::Number(self.reader.try_i8()? as f64)),
            TAG_I16 => Ok(JsonValue::Number(self.reader.try_i16()? as f64)),
            TAG_I32 => Ok(JsonValue::Number(self.reader.try_i32()? as f64)),
            TAG_I64 => Ok(JsonValue::Number(self.reader.try_i64()? as f64)),
            TAG_U8 => Ok(JsonValue::Number(self.reader.try_u8()? as f64)),
            TAG_U16 => Ok(JsonValue::Number(self.reader.try_u16()? as f64)),
            TAG_U32 => Ok(JsonValue::Number(self.reader.try_u32()? as f64)),
            TAG_F32 => Ok(JsonValue::Number(self.reader.try_f32()? as f64)),
            TAG_F64 => Ok(JsonValue::Number(self.reader.try_f64()?)),
            TAG_STR_EMPTY => Ok(JsonValue::Str(String::new())),
            TAG_STR8 | TAG_STR16 | TAG_STR32 => {
                let len = self.read_str_len(tag)?;
                Ok(JsonValue::Str(self.reader.try_utf8(len)?.to_string()))
            }
            TAG_ARR_EMPTY => Ok(JsonValue::Array(Vec::new())),
            TAG_ARR8 | TAG_ARR16 | TAG_ARR32 => {
                let count = self.read_count(tag)?;
                // An element is at least one byte; cap the reservation by
                // what the buffer can still hold.
                let mut items = Vec::with_capacity(count.min(self.reader.size()));
                for _ in 0..count {
                    items.push(self.read_any(strict)?);
                }
                Ok(JsonValue::Array(items))
            }
            TAG_OBJ_EMPTY => Ok(JsonValue::Object(Vec::new())),
            TAG_OBJ8 | TAG_OBJ16 | TAG_OBJ32 => {
                let count = self.read_count(tag)?;
                let mut pairs = Vec::with_capacity(count.min(self.reader.size()));
                for _ in 0..count {
                    let key = self.read_key()?;
                    let value = self.read_any(strict)?;
                    insert_entry(&mut pairs, key, value);
                }
                Ok(JsonValue::Object(pairs))
            }
            TAG_ARR_INDEF => {
                let mut items = Vec::new();
                loop {
                    let tag = self.reader.try_u8()?;
                    if tag == TAG_BREAK {
                        break;
                    }
                    items.push(self.read_any_tag(tag, strict)?);
                }
                Ok(JsonValue::Array(items))
            }
            TAG_OBJ_INDEF => {
                let mut pairs = Vec::new();
                while let Some(key) = self.read_key_or_break()? {
                    let value = self.read_any(strict)?;
                    insert_entry(&mut pairs, key, value);
                }
                Ok(JsonValue::Object(pairs))
            }
            TAG_BREAK => Err(BoonError::UnexpectedBreak),
            TAG_RESERVED_MIN..=TAG_RESERVED_MAX => {
                if strict {
                    Err(BoonError::ReservedTag(tag))
                } else {
                    let len = read_varint_u64(&mut self.reader)? as usize;
                    self.reader.try_buf(len)?;
                    Ok(JsonValue::Null)
                }
            }
            _ => Err(BoonError::UnknownTag(tag)),
        }
    }

    fn read_str_len(&mut self, tag: u8) -> Result<usize, BoonError> {
        Ok(match tag {
            TAG_STR8 => self.reader.try_u8()? as usize,
            TAG_STR16 => self.reader.try_u16()? as usize,
            _ => self.reader.try_u32()? as usize,
        })
    }

    pub(crate) fn read_count(&mut self, tag: u8) -> Result<usize, BoonError> {
        Ok(match tag {
            TAG_ARR8 | TAG_OBJ8 => self.reader.try_u8()? as usize,
            TAG_ARR16 | TAG_OBJ16 => self.reader.try_u16()? as usize,
            _ => self.reader.try_u32()? as usize,
        })
    }

    /// Reads a key in a counted object, where a break is illegal.
    pub(crate) fn read_key(&mut self) -> Result<String, BoonError> {
        let first = self.reader.try_u8()?;
        if first == KEY_BREAK {
            return Err(BoonError::UnexpectedBreak);
        }
        self.read_key_tail(first)
    }

    /// Reads a key in an indefinite object; `None` means the break.
    pub(crate) fn read_key_or_break(&mut self) -> Result<Option<String>, BoonError> {
        let first = self.reader.try_u8()?;
        if first == KEY_BREAK {
            return Ok(None);
        }
        self.read_key_tail(first).map(Some)
    }

    fn read_key_tail(&mut self, first: u8) -> Result<String, BoonError> {
        if first & KEY_COMMON_BIT != 0 {
            return Ok(self.common.get_text(first).to_string());
        }
        if first <= KEY_LITERAL_MAX {
            return Ok(self.reader.try_utf8(first as usize)?.to_string());
        }
        match first {
            KEY_TABLE_REF => {
                let index = read_varint_u64(&mut self.reader)?;
                let text = u32::try_from(index)
                    .ok()
                    .and_then(|i| {
                        self.key_table
                            .as_ref()
                            .and_then(|table| table.get_text(i))
                    })
                    .ok_or(BoonError::InvalidKeyIndex(index))?;
                Ok(text.to_string())
            }
            KEY_LEN_U16 => {
                let len = self.reader.try_u16()? as usize;
                Ok(self.reader.try_utf8(len)?.to_string())
            }
            KEY_LEN_U32 => {
                let len = self.reader.try_u32()? as usize;
                Ok(self.reader.try_utf8(len)?.to_string())
            }
            _ => Err(BoonError::UnknownTag(first)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boon::encoder::BoonEncoder;
    use crate::options::EncodeOptions;

    fn bare_options() -> DecodeOptions {
        DecodeOptions {
            expect_header: false,
            strict: true,
        }
    }

    #[test]
    fn test_corrupted_magic() {
        let mut encoder = BoonEncoder::new();
        let mut bytes = encoder.encode(&JsonValue::Null);
        bytes[0] = b'X';
        let decoder = BoonDecoder::new();
        assert_eq!(decoder.decode(&bytes), Err(BoonError::InvalidHeader));
    }

    #[test]
    fn test_unsupported_version() {
        let mut bytes = b"BOON".to_vec();
        bytes.push(9);
        bytes.push(TAG_NULL);
        let decoder = BoonDecoder::new();
        assert_eq!(decoder.decode(&bytes), Err(BoonError::UnsupportedVersion(9)));
    }

    #[test]
    fn test_truncated_string_payload() {
        // Declares 10 bytes, supplies 3.
        let bytes = [TAG_STR8, 10, b'a', b'b', b'c'];
        let decoder = BoonDecoder::with_options(bare_options());
        assert_eq!(decoder.decode(&bytes), Err(BoonError::TruncatedData));
    }

    #[test]
    fn test_unknown_tag() {
        let bytes = [0xee];
        let decoder = BoonDecoder::with_options(bare_options());
        assert_eq!(decoder.decode(&bytes), Err(BoonError::UnknownTag(0xee)));
    }

    #[test]
    fn test_break_as_first_byte() {
        let bytes = [TAG_BREAK];
        let decoder = BoonDecoder::with_options(bare_options());
        assert_eq!(decoder.decode(&bytes), Err(BoonError::UnexpectedBreak));
    }

    #[test]
    fn test_invalid_utf8_in_string() {
        let bytes = [TAG_STR8, 2, 0xff, 0xfe];
        let decoder = BoonDecoder::with_options(bare_options());
        assert_eq!(decoder.decode(&bytes), Err(BoonError::InvalidUtf8));
    }

    #[test]
    fn test_reserved_tag_strict_vs_lenient() {
        // Reserved tag 0x20 with a 2-byte self-delimited payload.
        let bytes = [TAG_RESERVED_MIN, 2, 0xaa, 0xbb];
        let strict = BoonDecoder::with_options(bare_options());
        assert_eq!(
            strict.decode(&bytes),
            Err(BoonError::ReservedTag(TAG_RESERVED_MIN))
        );
        let lenient = BoonDecoder::with_options(DecodeOptions {
            expect_header: false,
            strict: false,
        });
        assert_eq!(lenient.decode(&bytes), Ok(JsonValue::Null));
    }

    #[test]
    fn test_duplicate_keys_later_wins() {
        let mut encoder = BoonEncoder::with_options(EncodeOptions {
            include_header: false,
            ..EncodeOptions::default()
        });
        encoder.write_obj_hdr(2);
        encoder.write_key("clash", None);
        encoder.write_number(1.0);
        encoder.write_key("clash", None);
        encoder.write_number(2.0);
        let bytes = encoder.writer.flush();

        let decoder = BoonDecoder::with_options(bare_options());
        assert_eq!(
            decoder.decode(&bytes),
            Ok(JsonValue::Object(vec![(
                "clash".into(),
                JsonValue::Number(2.0)
            )]))
        );
    }

    #[test]
    fn test_key_index_without_table() {
        let bytes = [TAG_OBJ8, 1, KEY_TABLE_REF, 0, TAG_NULL];
        let decoder = BoonDecoder::with_options(bare_options());
        assert_eq!(decoder.decode(&bytes), Err(BoonError::InvalidKeyIndex(0)));
    }

    #[test]
    fn test_i64_beyond_safe_range_loses_precision() {
        let mut encoder = BoonEncoder::with_options(EncodeOptions {
            include_header: false,
            ..EncodeOptions::default()
        });
        // 2^53 + 1 is not representable in f64.
        encoder.writer.u8(TAG_I64);
        encoder.writer.i64(9_007_199_254_740_993);
        let bytes = encoder.writer.flush();
        let decoder = BoonDecoder::with_options(bare_options());
        let value = decoder.decode(&bytes).unwrap();
        assert_eq!(value, JsonValue::Number(9_007_199_254_740_992.0));
    }
}
