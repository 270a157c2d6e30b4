//! Extrinsic integration tests
//!
//! Exercises the public API end to end: building and signing a transfer,
//! re-parsing what was built, and reading block extrinsics.

use chainx_extrinsic::codec::{decode_compact_u32, encode_compact_u32};
use chainx_extrinsic::core::{
    build_transfer_call, AccountAddress, BlockDigest, Call, CallIndex, Extrinsic,
    HexAddressCodec, SignaturePayload, SkipPolicy, Transaction, TransferParams, IMMORTAL_ERA,
};
use chainx_extrinsic::error::ExtrinsicError;
use chainx_extrinsic::utils::{extrinsic_hash, hex_encode, hex_encode_prefixed};
use chainx_extrinsic::wallet::{sign, verify, Signer};

const SEED: &str = "0x5a5a5a5a5a5a5a5a5a5a5a5a5a5a5a5a5a5a5a5a5a5a5a5a5a5a5a5a5a5a5a5a";
const BLOCK_HASH: &str = "0x8d8d8d8d8d8d8d8d8d8d8d8d8d8d8d8d8d8d8d8d8d8d8d8d8d8d8d8d8d8d8d8d";

fn test_transaction(signer: &Signer, memo: &str) -> Transaction {
    let params = TransferParams {
        from: hex_encode_prefixed(&signer.public_key()),
        to: hex_encode_prefixed(&[0x44u8; 32]),
        token: "PCX".to_string(),
        amount: 500_000,
        nonce: 100,
        memo: memo.to_string(),
    };
    Transaction::from_params(&params, &HexAddressCodec)
        .unwrap()
        .with_acceleration(3)
}

fn with_plain_prefix(body: &[u8]) -> Vec<u8> {
    let mut raw = encode_compact_u32(body.len() as u32);
    raw.extend_from_slice(body);
    raw
}

#[test]
fn test_build_sign_parse_round_trip() {
    let signer = Signer::from_seed_hex(SEED).unwrap();
    let tx = test_transaction(&signer, "invoice 42");

    let signed = tx.sign_and_combine(&signer, BLOCK_HASH).unwrap();
    let parsed = Extrinsic::decode_body(signed.body()).unwrap();

    assert!(parsed.is_signed());
    let fields = parsed.signed.as_ref().unwrap();
    assert_eq!(fields.sender, AccountAddress::PublicKey(signer.public_key()));
    assert_eq!(fields.nonce, 100);
    assert_eq!(fields.era, Some(IMMORTAL_ERA));
    assert_eq!(fields.acceleration, Some(3));

    assert_eq!(parsed.call_index(), Some(CallIndex::TRANSFER));
    let transfer = parsed.call.as_ref().and_then(Call::as_transfer).unwrap();
    assert_eq!(transfer.dest, AccountAddress::PublicKey([0x44u8; 32]));
    assert_eq!(transfer.token_symbol(), "PCX");
    assert_eq!(transfer.amount, 500_000);
    assert_eq!(transfer.memo_text(), "invoice 42");

    // the embedded signature checks out against the payload the sender signed
    let payload = tx.signature_payload(BLOCK_HASH).unwrap();
    assert!(verify(
        &signer.public_key(),
        payload.as_bytes(),
        &fields.signature
    ));
}

#[test]
fn test_detached_signing_matches_one_step_signing() {
    let signer = Signer::from_seed_hex(SEED).unwrap();
    let tx = test_transaction(&signer, "");

    let payload = tx.signature_payload(BLOCK_HASH).unwrap();
    let signature = sign(SEED, payload.as_bytes()).unwrap();
    let detached = tx.combine(&hex_encode(&signature)).unwrap();

    let one_step = tx.sign_and_combine(&signer, BLOCK_HASH).unwrap();
    assert_eq!(detached.to_hex(), one_step.to_hex());
    assert_eq!(detached.txid(), one_step.txid());
    assert_eq!(
        detached.txid(),
        hex_encode_prefixed(&extrinsic_hash(&detached.to_bytes()))
    );
}

#[test]
fn test_signed_length_prefix_is_marked() {
    let signer = Signer::from_seed_hex(SEED).unwrap();
    let signed = test_transaction(&signer, "")
        .sign_and_combine(&signer, BLOCK_HASH)
        .unwrap();

    let mut expected = encode_compact_u32(signed.body().len() as u32);
    expected[0] = expected[0].wrapping_add(1);
    assert_eq!(signed.length_prefix(), expected.as_slice());
    assert!(signed.to_hex().starts_with("0x"));
}

#[test]
fn test_parser_checks_declared_length() {
    let signer = Signer::from_seed_hex(SEED).unwrap();
    let signed = test_transaction(&signer, "memo")
        .sign_and_combine(&signer, BLOCK_HASH)
        .unwrap();
    let body = signed.body();

    let parsed = Extrinsic::decode(&with_plain_prefix(body)).unwrap();
    assert_eq!(parsed.length as usize, body.len());

    let mut truncated = encode_compact_u32(body.len() as u32);
    truncated.extend_from_slice(&body[..body.len() - 1]);
    assert_eq!(
        Extrinsic::decode(&truncated),
        Err(ExtrinsicError::LengthMismatch {
            declared: body.len(),
            actual: body.len() - 1,
        })
    );
}

#[test]
fn test_signer_must_own_the_sender_key() {
    let signer = Signer::from_seed_hex(SEED).unwrap();
    let other = Signer::from_seed_hex(&"07".repeat(32)).unwrap();
    let tx = test_transaction(&signer, "");
    assert!(matches!(
        tx.sign_and_combine(&other, BLOCK_HASH),
        Err(ExtrinsicError::Crypto(_))
    ));
}

#[test]
fn test_compact_scenarios() {
    assert_eq!(decode_compact_u32(&[0x04]).unwrap(), 1);
    assert_eq!(decode_compact_u32(&[0x91, 0x01]).unwrap(), 100);
    assert!(matches!(
        decode_compact_u32(&[0x02]),
        Err(ExtrinsicError::MalformedInput(_))
    ));
}

#[test]
fn test_timestamp_extrinsic() {
    let extrinsic = Extrinsic::from_hex("0x20010100030000ca9a3b").unwrap();
    assert!(!extrinsic.is_signed());
    assert_eq!(
        extrinsic.call,
        Some(Call::Timestamp {
            kind: 0x03,
            moment: Some(1_000_000_000)
        })
    );
}

#[test]
fn test_pcx_transfer_method_bytes() {
    let method = build_transfer_call(CallIndex::TRANSFER, &[0x44u8; 32], "PCX", "", 500_000)
        .unwrap();
    let (head, memo_len) = method.split_at(method.len() - 1);
    assert_eq!(memo_len, &[0]);
    let amount = u64::from_le_bytes(head[head.len() - 8..].try_into().unwrap());
    assert_eq!(amount, 500_000);
}

#[test]
fn test_build_guards() {
    assert_eq!(
        build_transfer_call(CallIndex::TRANSFER, &[0x44u8; 32], "PCX", "", 0),
        Err(ExtrinsicError::ZeroAmount)
    );
    assert!(matches!(
        build_transfer_call(CallIndex::TRANSFER, &[0x44u8; 20], "PCX", "", 1),
        Err(ExtrinsicError::InvalidFieldLength { actual: 20, .. })
    ));
    assert!(matches!(
        SignaturePayload::build(0, &[], "0x1234", 1),
        Err(ExtrinsicError::InvalidFieldLength { actual: 2, .. })
    ));
}

#[test]
fn test_block_digest_over_built_extrinsics() {
    let signer = Signer::from_seed_hex(SEED).unwrap();
    let signed = test_transaction(&signer, "rent")
        .sign_and_combine(&signer, BLOCK_HASH)
        .unwrap();
    let transfer_hex = hex_encode_prefixed(&with_plain_prefix(signed.body()));

    let extrinsics = vec![
        "0x20010100030000ca9a3b".to_string(),
        "0xdeadbeef".to_string(),
        transfer_hex,
    ];

    assert!(BlockDigest::from_extrinsics(&extrinsics, SkipPolicy::Abort).is_err());

    let digest = BlockDigest::from_extrinsics(&extrinsics, SkipPolicy::SkipMalformed).unwrap();
    assert_eq!(digest.timestamp, Some(1_000_000_000));
    assert_eq!(digest.skipped, vec![1]);
    assert_eq!(digest.transfers.len(), 1);

    let record = &digest.transfers[0];
    assert_eq!(record.index, 2);
    assert_eq!(record.from, Some(hex_encode_prefixed(&signer.public_key())));
    assert_eq!(record.memo, "rent");
    assert_eq!(record.acceleration, Some(3));

    let json = serde_json::to_value(&digest).unwrap();
    assert_eq!(json["transfers"][0]["token"], "PCX");
    assert_eq!(json["transfers"][0]["amount"], 500_000);
}
