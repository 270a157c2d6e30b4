// Outbound side: transfer parameters -> method bytes.
// The resulting Transaction feeds the signature payload and the final combine step.

use crate::codec::write_compact_u32;
use crate::core::address::{AccountAddress, AddressCodec, PUBLIC_KEY_LEN};
use crate::core::call::CallIndex;
use crate::core::payload::{combine, combine_signature, SignaturePayload, SignedExtrinsic};
use crate::error::{ExtrinsicError, Result};
use crate::wallet::Signer;
use log::debug;
use serde::{Deserialize, Serialize};

/// Fee multiplier used when the caller does not pick one
pub const DEFAULT_ACCELERATION: u32 = 1;

/// Longest token symbol whose compact length still fits in one byte
pub const MAX_TOKEN_LEN: usize = 63;

/// Encode a transfer call: call index, destination, token, amount and memo.
///
/// The destination must be a 32-byte public key and the amount non-zero.
pub fn build_transfer_call(
    call_index: CallIndex,
    dest: &[u8],
    token: &str,
    memo: &str,
    amount: u64,
) -> Result<Vec<u8>> {
    let dest: &[u8; PUBLIC_KEY_LEN] =
        dest.try_into().map_err(|_| ExtrinsicError::InvalidFieldLength {
            field: "destination public key",
            expected: PUBLIC_KEY_LEN,
            actual: dest.len(),
        })?;
    if amount == 0 {
        return Err(ExtrinsicError::ZeroAmount);
    }
    if token.len() > MAX_TOKEN_LEN {
        return Err(ExtrinsicError::RangeOverflow(format!(
            "token symbol is {} bytes, at most {MAX_TOKEN_LEN} allowed",
            token.len()
        )));
    }
    let memo_len = u32::try_from(memo.len())
        .map_err(|_| ExtrinsicError::RangeOverflow("memo longer than u32::MAX".to_string()))?;

    let mut out = Vec::with_capacity(PUBLIC_KEY_LEN + token.len() + memo.len() + 16);
    out.extend_from_slice(call_index.as_bytes());
    AccountAddress::encode_public_key(&mut out, dest);
    write_compact_u32(&mut out, token.len() as u32);
    out.extend_from_slice(token.as_bytes());
    out.extend_from_slice(&amount.to_le_bytes());
    write_compact_u32(&mut out, memo_len);
    out.extend_from_slice(memo.as_bytes());
    Ok(out)
}

/// Caller-facing description of a transfer, addresses still human-readable
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferParams {
    pub from: String,
    pub to: String,
    pub token: String,
    pub amount: u64,
    pub nonce: u32,
    #[serde(default)]
    pub memo: String,
}

/// A transfer ready to be signed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub sender: [u8; PUBLIC_KEY_LEN],
    pub recipient: [u8; PUBLIC_KEY_LEN],
    pub token: String,
    pub amount: u64,
    pub nonce: u32,
    pub memo: String,
    pub acceleration: u32,
    pub call_index: CallIndex,
}

impl Transaction {
    /// Resolve both addresses through `codec`; acceleration and call index take their defaults
    pub fn from_params(params: &TransferParams, codec: &dyn AddressCodec) -> Result<Transaction> {
        if params.amount == 0 {
            return Err(ExtrinsicError::ZeroAmount);
        }
        Ok(Transaction {
            sender: codec.decode(&params.from)?,
            recipient: codec.decode(&params.to)?,
            token: params.token.clone(),
            amount: params.amount,
            nonce: params.nonce,
            memo: params.memo.clone(),
            acceleration: DEFAULT_ACCELERATION,
            call_index: CallIndex::TRANSFER,
        })
    }

    pub fn with_acceleration(mut self, acceleration: u32) -> Self {
        self.acceleration = acceleration;
        self
    }

    pub fn with_call_index(mut self, call_index: CallIndex) -> Self {
        self.call_index = call_index;
        self
    }

    pub fn method_bytes(&self) -> Result<Vec<u8>> {
        build_transfer_call(
            self.call_index,
            &self.recipient,
            &self.token,
            &self.memo,
            self.amount,
        )
    }

    /// Bytes the sender signs, bound to `block_hash`
    pub fn signature_payload(&self, block_hash: &str) -> Result<SignaturePayload> {
        let method = self.method_bytes()?;
        let payload = SignaturePayload::build(self.nonce, &method, block_hash, self.acceleration)?;
        debug!(
            "signature payload for nonce {} is {} bytes",
            self.nonce,
            payload.as_bytes().len()
        );
        Ok(payload)
    }

    /// Build, sign and combine in one step
    pub fn sign_and_combine(&self, signer: &Signer, block_hash: &str) -> Result<SignedExtrinsic> {
        if signer.public_key() != self.sender {
            return Err(ExtrinsicError::Crypto(
                "signing key does not match the sender public key".to_string(),
            ));
        }
        let payload = self.signature_payload(block_hash)?;
        let signature = signer.sign(payload.as_bytes())?;
        combine_signature(self, &signature)
    }

    /// Attach a detached signature given as hex
    pub fn combine(&self, signature_hex: &str) -> Result<SignedExtrinsic> {
        combine(self, signature_hex)
    }
}
