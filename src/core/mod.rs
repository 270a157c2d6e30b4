//! Core extrinsic functionality
//!
//! This module contains the extrinsic data model and both directions of the
//! wire format: parsing on-chain extrinsics and building signed transfers.

pub mod address;
pub mod block;
pub mod call;
pub mod extrinsic;
pub mod payload;
pub mod transfer;

pub use address::{AccountAddress, AddressCodec, HexAddressCodec, PUBLIC_KEY_LEN, PUBLIC_KEY_MARKER};
pub use block::{BlockDigest, SkipPolicy, TransferRecord};
pub use call::{Call, CallIndex, TransferCall, TIMESTAMP_SET};
pub use extrinsic::{
    Extrinsic, ExtrinsicParser, ParseState, SignedFields, IMMORTAL_ERA, SIGNATURE_LEN,
    VERSION_SIGNED, VERSION_UNSIGNED,
};
pub use payload::{combine, combine_signature, SignaturePayload, SignedExtrinsic, SIGNED_LENGTH_MARKER};
pub use transfer::{
    build_transfer_call, Transaction, TransferParams, DEFAULT_ACCELERATION, MAX_TOKEN_LEN,
};
