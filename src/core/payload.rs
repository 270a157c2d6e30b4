use crate::codec::{encode_compact_u32, write_compact_u32};
use crate::core::address::AccountAddress;
use crate::core::extrinsic::{IMMORTAL_ERA, SIGNATURE_LEN, VERSION_SIGNED};
use crate::core::transfer::Transaction;
use crate::error::{ExtrinsicError, Result};
use crate::utils::{extrinsic_hash, hex_decode, hex_decode_fixed, hex_encode_prefixed};

/// Added to the first length-prefix byte of every signed extrinsic
pub const SIGNED_LENGTH_MARKER: u8 = 1;

/// The exact bytes a sender signs:
/// nonce (compact) | method | era | block hash | acceleration (compact)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignaturePayload(Vec<u8>);

impl SignaturePayload {
    pub fn build(
        nonce: u32,
        method: &[u8],
        block_hash: &str,
        acceleration: u32,
    ) -> Result<SignaturePayload> {
        let block_hash = hex_decode_fixed::<32>(block_hash, "block hash")?;

        let mut out = Vec::with_capacity(method.len() + 32 + 10);
        write_compact_u32(&mut out, nonce);
        out.extend_from_slice(method);
        out.push(IMMORTAL_ERA);
        out.extend_from_slice(&block_hash);
        write_compact_u32(&mut out, acceleration);
        Ok(SignaturePayload(out))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex_encode_prefixed(&self.0)
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }
}

/// Final wire form of a signed transfer: marked length prefix, then body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedExtrinsic {
    length_prefix: Vec<u8>,
    body: Vec<u8>,
}

impl SignedExtrinsic {
    fn new(body: Vec<u8>) -> Result<SignedExtrinsic> {
        let len = u32::try_from(body.len())
            .map_err(|_| ExtrinsicError::RangeOverflow("extrinsic body length".to_string()))?;
        let mut length_prefix = encode_compact_u32(len);
        length_prefix[0] = length_prefix[0].wrapping_add(SIGNED_LENGTH_MARKER);
        Ok(SignedExtrinsic {
            length_prefix,
            body,
        })
    }

    pub fn length_prefix(&self) -> &[u8] {
        &self.length_prefix
    }

    /// Everything after the length prefix, starting at the version byte
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.length_prefix.len() + self.body.len());
        out.extend_from_slice(&self.length_prefix);
        out.extend_from_slice(&self.body);
        out
    }

    /// `0x`-prefixed hex, ready for submission
    pub fn to_hex(&self) -> String {
        hex_encode_prefixed(&self.to_bytes())
    }

    pub fn txid(&self) -> String {
        hex_encode_prefixed(&extrinsic_hash(&self.to_bytes()))
    }
}

/// Attach a hex signature to `tx`. The signature must decode to exactly 64 bytes.
pub fn combine(tx: &Transaction, signature_hex: &str) -> Result<SignedExtrinsic> {
    let signature = hex_decode(signature_hex)?;
    combine_signature(tx, &signature)
}

pub fn combine_signature(tx: &Transaction, signature: &[u8]) -> Result<SignedExtrinsic> {
    if signature.len() != SIGNATURE_LEN {
        return Err(ExtrinsicError::InvalidFieldLength {
            field: "signature",
            expected: SIGNATURE_LEN,
            actual: signature.len(),
        });
    }
    let method = tx.method_bytes()?;

    let mut body = Vec::with_capacity(2 + 32 + SIGNATURE_LEN + 12 + method.len());
    body.push(VERSION_SIGNED);
    AccountAddress::encode_public_key(&mut body, &tx.sender);
    body.extend_from_slice(signature);
    write_compact_u32(&mut body, tx.nonce);
    body.push(IMMORTAL_ERA);
    write_compact_u32(&mut body, tx.acceleration);
    body.extend_from_slice(&method);

    SignedExtrinsic::new(body)
}
