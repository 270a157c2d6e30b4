//! Compact wire codec
//!
//! Compact integers, length-prefixed strings and the byte cursor the
//! extrinsic parser reads through.

pub mod compact;
pub mod cursor;

pub use compact::{
    compact_width, decode_compact_u32, decode_string, decode_u64, encode_compact_u32,
    encode_string, write_compact_u32,
};
pub use cursor::ByteCursor;
