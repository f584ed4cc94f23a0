//! `BoonJsonValueCodec` — combined encoder/decoder pair.

use serde_json::Value;

use crate::error::BoonError;
use crate::options::{DecodeOptions, EncodeOptions};

use super::decoder::BoonDecoder;
use super::encoder::BoonEncoder;

/// Paired primary-scheme encoder and decoder with `serde_json::Value`
/// entry points.
#[derive(Default)]
pub struct BoonJsonValueCodec {
    encoder: BoonEncoder,
    decoder: BoonDecoder,
}

impl BoonJsonValueCodec {
    pub fn new() -> Self {
        Self {
            encoder: BoonEncoder::new(),
            decoder: BoonDecoder::new(),
        }
    }

    pub fn with_options(encode: EncodeOptions, decode: DecodeOptions) -> Self {
        Self {
            encoder: BoonEncoder::with_options(encode),
            decoder: BoonDecoder::with_options(decode),
        }
    }

    pub fn encode(&mut self, value: &Value) -> Result<Vec<u8>, BoonError> {
        Ok(self.encoder.encode_json(value))
    }

    pub fn decode(&self, bytes: &[u8]) -> Result<Value, BoonError> {
        self.decoder.decode_json(bytes)
    }
}
