//! BOON — a compact, type-tagged binary encoding of the JSON data model.
//!
//! Two sibling wire schemes live behind one magic marker:
//!
//! - [`boon`] (version 1): fixed-width narrowest-fit tags, big-endian
//!   scalar fields, a static common-key dictionary and an optional
//!   per-message key table chosen only when provably beneficial.
//! - [`lean`] (version 2): one tag per kind, zigzag-varint integers,
//!   indefinite-only containers, no dictionaries.
//!
//! Decoding is available eagerly (a [`JsonValue`] tree) or lazily (the
//! [`StreamingDecoder`] yields structural [`DecodeEvent`]s without
//! materializing the tree). Both paths share tag dispatch and key
//! reading and produce identical results.
//!
//! The codec is synchronous and single-threaded; every call owns its
//! buffer, reader and scratch state, so concurrent calls from multiple
//! threads are safe. Declared lengths are trusted up to the size of the
//! input; callers handling untrusted input should bound message size
//! themselves.
//!
//! # Example
//!
//! ```
//! use boon_codec::BoonJsonValueCodec;
//! use serde_json::json;
//!
//! let mut codec = BoonJsonValueCodec::new();
//! let value = json!({"id": 1, "name": "boon", "tags": ["binary", "json"]});
//! let bytes = codec.encode(&value).unwrap();
//! assert_eq!(codec.decode(&bytes).unwrap(), value);
//! ```

pub mod boon;
pub mod keys;
pub mod lean;
pub mod stream;
pub mod varint;

mod constants;
mod error;
mod json_value;
mod options;

pub use boon::{BoonDecoder, BoonEncoder, BoonJsonValueCodec};
pub use constants::{MAGIC, STRING_TABLE_TAG, VERSION_BOON, VERSION_LEAN};
pub use error::BoonError;
pub use json_value::{safe_integer, JsonValue, MAX_SAFE_INTEGER};
pub use lean::{LeanDecoder, LeanEncoder};
pub use options::{DecodeOptions, EncodeOptions, KeyTableMode};
pub use stream::{events_to_value, ChunkedDecoder, DecodeEvent, StreamingDecoder};

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn round_trip_deep_nesting() {
        let mut value = JsonValue::Number(1.0);
        for depth in 0..60 {
            if depth % 2 == 0 {
                value = JsonValue::Array(vec![value]);
            } else {
                value = JsonValue::Object(vec![("level".into(), value)]);
            }
        }
        let mut encoder = BoonEncoder::new();
        let bytes = encoder.encode(&value);
        assert_eq!(BoonDecoder::new().decode(&bytes), Ok(value.clone()));
        assert_eq!(
            events_to_value(StreamingDecoder::new(&bytes)),
            Ok(value.clone())
        );

        let mut lean = LeanEncoder::new();
        let bytes = lean.encode(&value);
        assert_eq!(LeanDecoder::new().decode(&bytes), Ok(value));
    }

    #[test]
    fn round_trip_boundary_integers() {
        let mut encoder = BoonEncoder::new();
        let decoder = BoonDecoder::new();
        for n in [
            0.0,
            -1.0,
            1.0,
            -128.0,
            127.0,
            -129.0,
            128.0,
            255.0,
            256.0,
            -32768.0,
            32767.0,
            -32769.0,
            32768.0,
            65535.0,
            65536.0,
            -2147483648.0,
            2147483647.0,
            -2147483649.0,
            2147483648.0,
            4294967295.0,
            4294967296.0,
            MAX_SAFE_INTEGER,
            -MAX_SAFE_INTEGER,
        ] {
            let bytes = encoder.encode(&JsonValue::Number(n));
            assert_eq!(
                decoder.decode(&bytes),
                Ok(JsonValue::Number(n)),
                "round-trip failed for {n}"
            );
        }
    }

    #[test]
    fn compactness_beats_json_text_on_boolean_heavy_objects() {
        let value = json!({
            "active": true,
            "enabled": false,
            "visible": true,
            "required": false,
            "unique": true,
            "stream": false,
        });
        let text_size = serde_json::to_string(&value).unwrap().len();
        let mut codec = BoonJsonValueCodec::new();
        let bytes = codec.encode(&value).unwrap();
        assert!(
            bytes.len() * 2 <= text_size,
            "encoded {} bytes vs {} text bytes",
            bytes.len(),
            text_size
        );
        assert_eq!(codec.decode(&bytes).unwrap(), value);
    }

    #[test]
    fn sibling_schemes_are_not_cross_compatible() {
        let mut encoder = LeanEncoder::new();
        let bytes = encoder.encode(&JsonValue::Null);
        assert_eq!(
            BoonDecoder::new().decode(&bytes),
            Err(BoonError::UnsupportedVersion(VERSION_LEAN))
        );
    }

    #[test]
    fn headerless_fragment_by_mutual_agreement() {
        let mut encoder = BoonEncoder::with_options(EncodeOptions {
            include_header: false,
            ..EncodeOptions::default()
        });
        let decoder = BoonDecoder::with_options(DecodeOptions {
            expect_header: false,
            strict: true,
        });
        let value = JsonValue::Array(vec![JsonValue::Str("fragment".into())]);
        let bytes = encoder.encode(&value);
        assert_eq!(decoder.decode(&bytes), Ok(value));
    }
}
