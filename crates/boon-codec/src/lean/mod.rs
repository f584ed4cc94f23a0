//! Simplified varint scheme (wire version 2): one tag per kind, zigzag
//! varint integers, indefinite-only containers, no dictionaries.
//!
//! A sibling format, not an extension: the two schemes share the magic
//! and the abstract value model but are wire-incompatible and must not
//! be mixed. Pick one as canonical per deployment.

pub mod constants;

mod decoder;
mod encoder;

pub use decoder::LeanDecoder;
pub use encoder::LeanEncoder;
