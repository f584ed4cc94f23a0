//! `ChunkedDecoder` — chunk-consuming wrapper around the streaming
//! decoder.
//!
//! Known limitation, not a guarantee: all pushed chunks are buffered
//! into one contiguous array before decoding begins, so this entry
//! point is not truly incremental and offers no backpressure. Callers
//! feeding untrusted input should bound the total buffered size
//! themselves.

use boon_buffers::concat_list;

use crate::error::BoonError;
use crate::json_value::JsonValue;
use crate::options::DecodeOptions;

use super::decoder::StreamingDecoder;
use super::events::DecodeEvent;
use super::events_to_value;

/// Accumulates input chunks, then decodes them as one message.
#[derive(Default)]
pub struct ChunkedDecoder {
    chunks: Vec<Vec<u8>>,
    options: DecodeOptions,
}

impl ChunkedDecoder {
    pub fn new() -> Self {
        Self::with_options(DecodeOptions::default())
    }

    pub fn with_options(options: DecodeOptions) -> Self {
        Self {
            chunks: Vec::new(),
            options,
        }
    }

    /// Appends one input chunk.
    pub fn push(&mut self, chunk: Vec<u8>) {
        self.chunks.push(chunk);
    }

    /// Total bytes buffered so far.
    pub fn buffered_len(&self) -> usize {
        self.chunks.iter().map(|c| c.len()).sum()
    }

    /// Concatenates all chunks into the contiguous decode buffer.
    pub fn buffer(&self) -> Vec<u8> {
        let refs: Vec<&[u8]> = self.chunks.iter().map(|c| c.as_slice()).collect();
        concat_list(&refs)
    }

    /// Runs the streaming decoder over the buffered input, handing each
    /// event to `sink`.
    pub fn events<F>(&self, mut sink: F) -> Result<(), BoonError>
    where
        F: FnMut(DecodeEvent),
    {
        let buffer = self.buffer();
        for event in StreamingDecoder::with_options(&buffer, self.options) {
            sink(event?);
        }
        Ok(())
    }

    /// Decodes the buffered input into a value tree.
    pub fn decode(&self) -> Result<JsonValue, BoonError> {
        let buffer = self.buffer();
        events_to_value(StreamingDecoder::with_options(&buffer, self.options))
    }
}
