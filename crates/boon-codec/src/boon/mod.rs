//! Primary fixed-width tag scheme (wire version 1): narrowest-fit value
//! tags, big-endian scalar fields, common-key and key-table dictionary
//! support.

pub mod constants;

mod codec;
mod decoder;
mod encoder;

pub use codec::BoonJsonValueCodec;
pub use decoder::BoonDecoder;
pub use encoder::BoonEncoder;

pub(crate) use decoder::{insert_entry, RawDecoder};
