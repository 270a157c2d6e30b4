//! Test utilities for extrinsic testing

use crate::core::{CallIndex, Transaction};
use crate::wallet::{SecretSeed, Signer};

/// Seed of the sending account in every fixture
pub const SENDER_SEED: [u8; 32] = [0x11; 32];

/// Recipient public key; never needs a matching secret
pub const RECIPIENT: [u8; 32] = [0x22; 32];

pub const BLOCK_HASH: &str = "0x3333333333333333333333333333333333333333333333333333333333333333";

pub fn test_signer() -> Signer {
    Signer::from_seed(&SecretSeed::new(SENDER_SEED)).unwrap()
}

/// 500000 PCX from the test signer to RECIPIENT, nonce 7
pub fn sample_transaction() -> Transaction {
    Transaction {
        sender: test_signer().public_key(),
        recipient: RECIPIENT,
        token: "PCX".to_string(),
        amount: 500_000,
        nonce: 7,
        memo: "rent".to_string(),
        acceleration: 1,
        call_index: CallIndex::TRANSFER,
    }
}

/// Hex of the signed sample transfer behind a plain, unmarked length prefix
pub fn signed_transfer_hex() -> String {
    let signed = sample_transaction()
        .sign_and_combine(&test_signer(), BLOCK_HASH)
        .unwrap();
    let mut raw = crate::codec::encode_compact_u32(signed.body().len() as u32);
    raw.extend_from_slice(signed.body());
    crate::utils::hex_encode_prefixed(&raw)
}
