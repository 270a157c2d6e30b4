//! Utility functions and helpers
//!
//! Hashing and hex helpers shared by the parser, the builder and the CLI.

pub mod crypto;

pub use crypto::{
    blake2_256, extrinsic_hash, hex_decode, hex_decode_fixed, hex_encode, hex_encode_prefixed,
    strip_hex_prefix,
};
