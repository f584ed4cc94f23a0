//! `StreamingDecoder` — lazy, resumable event producer over tagged bytes.
//!
//! An explicit state machine stands in for a generator: a stack of
//! container frames records what container the cursor is inside and how
//! many members remain. Each `next()` call resumes exactly where the
//! previous yield left off; consuming the iterator to completion emits
//! the event sequence the eager decoder's tree would flatten into.

use crate::boon::constants::*;
use crate::boon::RawDecoder;
use crate::error::BoonError;
use crate::options::DecodeOptions;

use super::events::DecodeEvent;

/// What container the cursor is inside and how many members remain.
/// `remaining: None` marks the indefinite form, terminated by a break.
#[derive(Debug, Clone, Copy)]
enum Frame {
    Array {
        remaining: Option<usize>,
    },
    Object {
        remaining: Option<usize>,
        expect_key: bool,
    },
}

/// Cooperative streaming decoder for the primary scheme.
///
/// Works on keyed, dictionary-optimized and indefinite-length input; the
/// key table (if present) is consumed up front, before any structural
/// event is yielded, so a consumer never observes an unresolved index.
/// Dropping a partially-consumed decoder is safe at any point; it holds
/// no resources beyond the borrowed input slice.
///
/// # Example
///
/// ```
/// use boon_codec::{BoonEncoder, DecodeEvent, JsonValue, StreamingDecoder};
///
/// let mut encoder = BoonEncoder::new();
/// let bytes = encoder.encode(&JsonValue::Array(vec![JsonValue::Bool(true)]));
/// let events: Result<Vec<_>, _> = StreamingDecoder::new(&bytes).collect();
/// assert_eq!(
///     events.unwrap(),
///     vec![
///         DecodeEvent::Header { version: 1 },
///         DecodeEvent::StartArray { length: Some(1) },
///         DecodeEvent::Primitive(JsonValue::Bool(true)),
///         DecodeEvent::EndArray,
///     ],
/// );
/// ```
pub struct StreamingDecoder<'a> {
    raw: RawDecoder<'a>,
    options: DecodeOptions,
    stack: Vec<Frame>,
    header_done: bool,
    started: bool,
    failed: bool,
}

impl<'a> StreamingDecoder<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self::with_options(data, DecodeOptions::default())
    }

    pub fn with_options(data: &'a [u8], options: DecodeOptions) -> Self {
        Self {
            raw: RawDecoder::new(data),
            options,
            stack: Vec::new(),
            header_done: false,
            started: false,
            failed: false,
        }
    }

    fn set_top(&mut self, frame: Frame) {
        if let Some(top) = self.stack.last_mut() {
            *top = frame;
        }
    }

    fn step(&mut self) -> Result<Option<DecodeEvent>, BoonError> {
        if !self.header_done {
            self.header_done = true;
            if self.options.expect_header {
                let version = self.raw.read_header()?;
                return Ok(Some(DecodeEvent::Header { version }));
            }
        }
        if !self.started {
            self.started = true;
            return self.value_event().map(Some);
        }
        let top = match self.stack.last().copied() {
            None => return Ok(None),
            Some(frame) => frame,
        };
        match top {
            Frame::Array { remaining: Some(0) } => {
                self.stack.pop();
                Ok(Some(DecodeEvent::EndArray))
            }
            Frame::Array {
                remaining: Some(n),
            } => {
                self.set_top(Frame::Array {
                    remaining: Some(n - 1),
                });
                self.value_event().map(Some)
            }
            Frame::Array { remaining: None } => {
                let tag = self.raw.reader.try_u8()?;
                if tag == TAG_BREAK {
                    self.stack.pop();
                    Ok(Some(DecodeEvent::EndArray))
                } else {
                    self.value_event_tag(tag).map(Some)
                }
            }
            Frame::Object {
                remaining,
                expect_key: true,
            } => match remaining {
                Some(0) => {
                    self.stack.pop();
                    Ok(Some(DecodeEvent::EndObject))
                }
                Some(_) => {
                    let key = self.raw.read_key()?;
                    self.set_top(Frame::Object {
                        remaining,
                        expect_key: false,
                    });
                    Ok(Some(DecodeEvent::Key(key)))
                }
                None => match self.raw.read_key_or_break()? {
                    None => {
                        self.stack.pop();
                        Ok(Some(DecodeEvent::EndObject))
                    }
                    Some(key) => {
                        self.set_top(Frame::Object {
                            remaining: None,
                            expect_key: false,
                        });
                        Ok(Some(DecodeEvent::Key(key)))
                    }
                },
            },
            Frame::Object {
                remaining,
                expect_key: false,
            } => {
                self.set_top(Frame::Object {
                    remaining: remaining.map(|n| n - 1),
                    expect_key: true,
                });
                self.value_event().map(Some)
            }
        }
    }

    fn value_event(&mut self) -> Result<DecodeEvent, BoonError> {
        let tag = self.raw.reader.try_u8()?;
        self.value_event_tag(tag)
    }

    fn value_event_tag(&mut self, tag: u8) -> Result<DecodeEvent, BoonError> {
        match tag {
            TAG_ARR_EMPTY => {
                self.stack.push(Frame::Array { remaining: Some(0) });
                Ok(DecodeEvent::StartArray { length: Some(0) })
            }
            TAG_ARR8 | TAG_ARR16 | TAG_ARR32 => {
                let length = self.raw.read_count(tag)?;
                self.stack.push(Frame::Array {
                    remaining: Some(length),
                });
                Ok(DecodeEvent::StartArray {
                    length: Some(length),
                })
            }
            TAG_ARR_INDEF => {
                self.stack.push(Frame::Array { remaining: None });
                Ok(DecodeEvent::StartArray { length: None })
            }
            TAG_OBJ_EMPTY => {
                self.stack.push(Frame::Object {
                    remaining: Some(0),
                    expect_key: true,
                });
                Ok(DecodeEvent::StartObject { key_count: Some(0) })
            }
            TAG_OBJ8 | TAG_OBJ16 | TAG_OBJ32 => {
                let key_count = self.raw.read_count(tag)?;
                self.stack.push(Frame::Object {
                    remaining: Some(key_count),
                    expect_key: true,
                });
                Ok(DecodeEvent::StartObject {
                    key_count: Some(key_count),
                })
            }
            TAG_OBJ_INDEF => {
                self.stack.push(Frame::Object {
                    remaining: None,
                    expect_key: true,
                });
                Ok(DecodeEvent::StartObject { key_count: None })
            }
            TAG_BREAK => Err(BoonError::UnexpectedBreak),
            _ => self
                .raw
                .read_any_tag(tag, self.options.strict)
                .map(DecodeEvent::Primitive),
        }
    }
}

impl<'a> Iterator for StreamingDecoder<'a> {
    type Item = Result<DecodeEvent, BoonError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        match self.step() {
            Ok(Some(event)) => Some(Ok(event)),
            Ok(None) => None,
            Err(err) => {
                self.failed = true;
                Some(Err(err))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boon::BoonEncoder;
    use crate::json_value::JsonValue;
    use crate::options::EncodeOptions;

    fn bare(strict: bool) -> DecodeOptions {
        DecodeOptions {
            expect_header: false,
            strict,
        }
    }

    fn collect(bytes: &[u8], options: DecodeOptions) -> Vec<DecodeEvent> {
        StreamingDecoder::with_options(bytes, options)
            .collect::<Result<Vec<_>, _>>()
            .unwrap()
    }

    #[test]
    fn test_primitive_only_stream() {
        let mut encoder = BoonEncoder::with_options(EncodeOptions {
            include_header: false,
            ..EncodeOptions::default()
        });
        let bytes = encoder.encode(&JsonValue::Number(7.0));
        assert_eq!(
            collect(&bytes, bare(true)),
            vec![DecodeEvent::Primitive(JsonValue::Number(7.0))]
        );
    }

    #[test]
    fn test_key_precedes_value_events() {
        let mut encoder = BoonEncoder::with_options(EncodeOptions {
            include_header: false,
            ..EncodeOptions::default()
        });
        let value = JsonValue::Object(vec![(
            "items".into(),
            JsonValue::Array(vec![JsonValue::Null]),
        )]);
        let bytes = encoder.encode(&value);
        assert_eq!(
            collect(&bytes, bare(true)),
            vec![
                DecodeEvent::StartObject { key_count: Some(1) },
                DecodeEvent::Key("items".into()),
                DecodeEvent::StartArray { length: Some(1) },
                DecodeEvent::Primitive(JsonValue::Null),
                DecodeEvent::EndArray,
                DecodeEvent::EndObject,
            ]
        );
    }

    #[test]
    fn test_indefinite_containers_report_no_length() {
        let mut encoder = BoonEncoder::with_options(EncodeOptions {
            include_header: false,
            ..EncodeOptions::default()
        });
        encoder.write_obj_begin();
        encoder.write_key("data", None);
        encoder.write_arr_begin();
        encoder.write_number(1.0);
        encoder.write_arr_end();
        encoder.write_obj_end();
        let bytes = encoder.writer.flush();
        assert_eq!(
            collect(&bytes, bare(true)),
            vec![
                DecodeEvent::StartObject { key_count: None },
                DecodeEvent::Key("data".into()),
                DecodeEvent::StartArray { length: None },
                DecodeEvent::Primitive(JsonValue::Number(1.0)),
                DecodeEvent::EndArray,
                DecodeEvent::EndObject,
            ]
        );
    }

    #[test]
    fn test_header_event_comes_first() {
        let mut encoder = BoonEncoder::new();
        let bytes = encoder.encode(&JsonValue::Bool(true));
        let events = collect(&bytes, DecodeOptions::default());
        assert_eq!(events[0], DecodeEvent::Header { version: 1 });
    }

    #[test]
    fn test_key_table_resolved_before_events() {
        let mut encoder = BoonEncoder::with_options(EncodeOptions {
            use_key_table: crate::options::KeyTableMode::Always,
            ..EncodeOptions::default()
        });
        let value = JsonValue::Object(vec![
            ("first_field".into(), JsonValue::Number(1.0)),
            ("second_field".into(), JsonValue::Number(2.0)),
        ]);
        let bytes = encoder.encode(&value);
        let events = collect(&bytes, DecodeOptions::default());
        assert!(events.contains(&DecodeEvent::Key("first_field".into())));
        assert!(events.contains(&DecodeEvent::Key("second_field".into())));
    }

    #[test]
    fn test_leading_break_fails() {
        let bytes = [TAG_BREAK];
        let mut decoder = StreamingDecoder::with_options(&bytes, bare(true));
        assert_eq!(decoder.next(), Some(Err(BoonError::UnexpectedBreak)));
        // The iterator fuses after a failure.
        assert_eq!(decoder.next(), None);
    }

    #[test]
    fn test_dropping_midway_is_safe() {
        let mut encoder = BoonEncoder::with_options(EncodeOptions {
            include_header: false,
            ..EncodeOptions::default()
        });
        let bytes = encoder.encode(&JsonValue::Array(vec![
            JsonValue::Number(1.0),
            JsonValue::Number(2.0),
        ]));
        let mut decoder = StreamingDecoder::with_options(&bytes, bare(true));
        assert!(decoder.next().is_some());
        drop(decoder);
    }
}
