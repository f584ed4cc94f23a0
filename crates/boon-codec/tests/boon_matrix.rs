use boon_codec::{
    BoonDecoder, BoonEncoder, BoonError, DecodeOptions, EncodeOptions, JsonValue, KeyTableMode,
    MAX_SAFE_INTEGER,
};

fn obj(fields: &[(&str, JsonValue)]) -> JsonValue {
    JsonValue::Object(
        fields
            .iter()
            .map(|(k, v)| ((*k).to_owned(), v.clone()))
            .collect(),
    )
}

fn matrix() -> Vec<JsonValue> {
    vec![
        JsonValue::Null,
        JsonValue::Bool(true),
        JsonValue::Bool(false),
        JsonValue::Number(0.0),
        JsonValue::Number(-1.0),
        JsonValue::Number(127.0),
        JsonValue::Number(-128.0),
        JsonValue::Number(128.0),
        JsonValue::Number(255.0),
        JsonValue::Number(32767.0),
        JsonValue::Number(-32768.0),
        JsonValue::Number(65535.0),
        JsonValue::Number(2147483647.0),
        JsonValue::Number(-2147483648.0),
        JsonValue::Number(4294967295.0),
        JsonValue::Number(MAX_SAFE_INTEGER),
        JsonValue::Number(-MAX_SAFE_INTEGER),
        JsonValue::Number(0.1),
        JsonValue::Number(1.5),
        JsonValue::Number(-123.123),
        JsonValue::Number(-0.0),
        JsonValue::Str(String::new()),
        JsonValue::Str("a".into()),
        JsonValue::Str("asdf asfd 😱 asdf asdf 👀 as".into()),
        JsonValue::Str("x".repeat(300)),
        JsonValue::Str("y".repeat(70_000)),
        JsonValue::Array(vec![]),
        JsonValue::Array(vec![
            JsonValue::Number(1.0),
            JsonValue::Str("a".into()),
            JsonValue::Number(-2.0),
        ]),
        JsonValue::Array((0..300).map(|i| JsonValue::Number(i as f64)).collect()),
        JsonValue::Object(vec![]),
        obj(&[
            ("foo", JsonValue::Str("bar".into())),
            ("baz", JsonValue::Number(123.0)),
        ]),
        obj(&[
            ("id", JsonValue::Number(1.0)),
            ("items", JsonValue::Array(vec![obj(&[("deep", JsonValue::Null)])])),
        ]),
    ]
}

#[test]
fn boon_encoder_decoder_matrix() {
    let mut encoder = BoonEncoder::new();
    let decoder = BoonDecoder::new();
    for value in matrix() {
        let encoded = encoder.encode(&value);
        let decoded = decoder
            .decode(&encoded)
            .unwrap_or_else(|e| panic!("decode failed for {value:?}: {e}"));
        assert_eq!(decoded, value);
    }
}

#[test]
fn boon_headerless_matrix() {
    let mut encoder = BoonEncoder::with_options(EncodeOptions {
        include_header: false,
        ..EncodeOptions::default()
    });
    let decoder = BoonDecoder::with_options(DecodeOptions {
        expect_header: false,
        strict: true,
    });
    for value in matrix() {
        let encoded = encoder.encode(&value);
        assert_eq!(decoder.decode(&encoded), Ok(value));
    }
}

#[test]
fn boon_key_table_mode_matrix() {
    for mode in [KeyTableMode::Auto, KeyTableMode::Always, KeyTableMode::Never] {
        let mut encoder = BoonEncoder::with_options(EncodeOptions {
            use_key_table: mode,
            ..EncodeOptions::default()
        });
        let decoder = BoonDecoder::new();
        for value in matrix() {
            let encoded = encoder.encode(&value);
            assert_eq!(decoder.decode(&encoded), Ok(value), "mode {mode:?}");
        }
    }
}

#[test]
fn boon_scalar_encoded_sizes() {
    let mut encoder = BoonEncoder::with_options(EncodeOptions {
        include_header: false,
        ..EncodeOptions::default()
    });
    let cases: Vec<(JsonValue, usize)> = vec![
        (JsonValue::Null, 1),
        (JsonValue::Bool(true), 1),
        (JsonValue::Number(0.0), 2),          // i8
        (JsonValue::Number(200.0), 2),        // u8
        (JsonValue::Number(1000.0), 3),       // i16
        (JsonValue::Number(40000.0), 3),      // u16
        (JsonValue::Number(100000.0), 5),     // i32
        (JsonValue::Number(3e9), 5),          // u32
        (JsonValue::Number(5e9), 9),          // i64
        (JsonValue::Number(1.5), 5),          // f32
        (JsonValue::Number(0.1), 9),          // f64
        (JsonValue::Str(String::new()), 1),   // empty tag
        (JsonValue::Str("ab".into()), 4),     // tag + u8 len + 2
        (JsonValue::Array(vec![]), 1),
        (JsonValue::Object(vec![]), 1),
    ];
    for (value, expected) in cases {
        let encoded = encoder.encode(&value);
        assert_eq!(encoded.len(), expected, "size mismatch for {value:?}");
    }
}

#[test]
fn boon_error_matrix() {
    let decoder = BoonDecoder::with_options(DecodeOptions {
        expect_header: false,
        strict: true,
    });
    let cases: Vec<(&[u8], BoonError)> = vec![
        (&[], BoonError::TruncatedData),
        (&[0x0d, 10, b'a', b'b', b'c'], BoonError::TruncatedData),
        (&[0xee], BoonError::UnknownTag(0xee)),
        (&[0x30], BoonError::UnknownTag(0x30)),
        (&[0x1f], BoonError::UnexpectedBreak),
        (&[0x20, 1, 0], BoonError::ReservedTag(0x20)),
        (&[0x0d, 2, 0xff, 0xfe], BoonError::InvalidUtf8),
        (&[0x04, 0x01], BoonError::TruncatedData),
    ];
    for (bytes, expected) in cases {
        assert_eq!(decoder.decode(bytes), Err(expected), "input {bytes:02x?}");
    }
}

#[test]
fn boon_header_error_matrix() {
    let decoder = BoonDecoder::new();
    // Corrupted magic.
    assert_eq!(
        decoder.decode(b"NOPE\x01\x00"),
        Err(BoonError::InvalidHeader)
    );
    // Header cut short.
    assert_eq!(decoder.decode(b"BO"), Err(BoonError::InvalidHeader));
    // Future version.
    assert_eq!(
        decoder.decode(b"BOON\x07\x00"),
        Err(BoonError::UnsupportedVersion(7))
    );
}

#[test]
fn boon_deterministic_output() {
    let value = obj(&[
        ("record_type", JsonValue::Str("event".into())),
        ("payload_size", JsonValue::Number(42.0)),
    ]);
    let mut a = BoonEncoder::new();
    let mut b = BoonEncoder::new();
    assert_eq!(a.encode(&value), b.encode(&value));
    // Re-encoding with the same encoder instance is also stable.
    assert_eq!(a.encode(&value), a.encode(&value));
}
