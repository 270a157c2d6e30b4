//! # ChainX Extrinsic - Transfer Codec and Signer
//!
//! This is my library for reading and writing ChainX extrinsics without a node.
//! When I come back to this code, here's what I need to remember:
//!
//! ## What I Built
//! - **Compact Codec**: Variable-length integers in 1, 2, 4 or big-integer mode
//! - **Extrinsic Parser**: A one-way state machine over raw on-chain bytes
//! - **Transfer Builder**: Method bytes, signature payload and final combine step
//! - **Signer**: Seed-based ed25519 with zeroized secrets
//! - **Block Digest**: Timestamp and transfer records for a whole block
//!
//! ## How I Organized My Code
//! - `codec/`: Compact integers and the byte cursor everything reads through
//! - `core/`: Addresses, calls, extrinsics, transfers, payloads and block digests
//! - `wallet/`: Seeds, key pairs and signatures
//! - `utils/`: Blake2 hashing and hex helpers
//! - `config/`: Defaults for the CLI, from file and environment
//! - `cli/`: Command-line interface
//!
//! ## Key Design Decisions I Made
//! - Short reads are errors everywhere except the era byte and the memo length
//! - A signed extrinsic keeps its marked length prefix apart from its body
//! - Library calls take explicit arguments; only the CLI reads the global config
//!
//! ## When I Need to Understand Something
//! 1. Start with `core/extrinsic.rs` for the parse order
//! 2. Look at `core/transfer.rs` and `core/payload.rs` for the build side
//! 3. Check `codec/compact.rs` when a length looks wrong

pub mod cli;
pub mod codec;
pub mod config;
pub mod core;
pub mod error;
pub mod utils;
pub mod wallet;

#[cfg(test)]
pub mod testnet;

// Re-export commonly used types for convenience
pub use cli::{Command, Opt};
pub use codec::{decode_compact_u32, encode_compact_u32, ByteCursor};
pub use config::{Config, GLOBAL_CONFIG};
pub use self::core::{
    build_transfer_call, combine, AccountAddress, AddressCodec, BlockDigest, Call, CallIndex,
    Extrinsic, ExtrinsicParser, HexAddressCodec, ParseState, SignaturePayload, SignedExtrinsic,
    SignedFields, SkipPolicy, Transaction, TransferCall, TransferParams, TransferRecord,
};
pub use error::{ExtrinsicError, Result};
pub use utils::{blake2_256, extrinsic_hash, hex_decode, hex_encode, hex_encode_prefixed};
pub use wallet::{sign, verify, SecretSeed, Signer};
