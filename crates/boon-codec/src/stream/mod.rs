//! Streaming decode: lazy event production over tagged bytes.

mod chunked;
mod decoder;
mod events;

pub use chunked::ChunkedDecoder;
pub use decoder::StreamingDecoder;
pub use events::DecodeEvent;

use crate::boon::insert_entry;
use crate::error::BoonError;
use crate::json_value::JsonValue;

/// Rebuilds a value tree from a structural event stream.
///
/// The inverse of flattening: feeding it everything a
/// [`StreamingDecoder`] yields produces the tree the eager decoder
/// would have materialized, including the later-occurrence-wins rule
/// for repeated object keys. Expects a well-formed stream (the ordering
/// the decoder guarantees); a stream that ends before the root value
/// completes is reported as truncated.
pub fn events_to_value<I>(events: I) -> Result<JsonValue, BoonError>
where
    I: IntoIterator<Item = Result<DecodeEvent, BoonError>>,
{
    enum Node {
        Array(Vec<JsonValue>),
        Object(Vec<(String, JsonValue)>, Option<String>),
    }

    fn attach(stack: &mut Vec<Node>, root: &mut Option<JsonValue>, value: JsonValue) {
        match stack.last_mut() {
            None => *root = Some(value),
            Some(Node::Array(items)) => items.push(value),
            Some(Node::Object(pairs, pending)) => {
                debug_assert!(pending.is_some(), "value event without a preceding key");
                if let Some(key) = pending.take() {
                    insert_entry(pairs, key, value);
                }
            }
        }
    }

    let mut stack: Vec<Node> = Vec::new();
    let mut root: Option<JsonValue> = None;
    for event in events {
        match event? {
            DecodeEvent::Header { .. } => {}
            DecodeEvent::StartArray { .. } => stack.push(Node::Array(Vec::new())),
            DecodeEvent::StartObject { .. } => stack.push(Node::Object(Vec::new(), None)),
            DecodeEvent::Key(key) => {
                if let Some(Node::Object(_, pending)) = stack.last_mut() {
                    *pending = Some(key);
                }
            }
            DecodeEvent::Primitive(value) => attach(&mut stack, &mut root, value),
            DecodeEvent::EndArray => {
                if let Some(Node::Array(items)) = stack.pop() {
                    attach(&mut stack, &mut root, JsonValue::Array(items));
                }
            }
            DecodeEvent::EndObject => {
                if let Some(Node::Object(pairs, _)) = stack.pop() {
                    attach(&mut stack, &mut root, JsonValue::Object(pairs));
                }
            }
        }
    }
    root.ok_or(BoonError::TruncatedData)
}
