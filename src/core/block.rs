use crate::core::address::{AddressCodec, HexAddressCodec};
use crate::core::call::Call;
use crate::core::extrinsic::Extrinsic;
use crate::error::{ExtrinsicError, Result};
use crate::utils::{extrinsic_hash, hex_decode, hex_encode_prefixed};
use log::{debug, warn};
use serde::Serialize;

/// What to do with an extrinsic that fails to parse
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SkipPolicy {
    #[default]
    Abort,
    SkipMalformed,
}

/// One transfer found in a block
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransferRecord {
    pub index: usize,
    pub txid: String,
    pub from: Option<String>,
    pub to: String,
    pub token: String,
    pub amount: u64,
    pub memo: String,
    pub signature: Option<String>,
    pub nonce: Option<u32>,
    pub era: Option<u8>,
    pub acceleration: Option<u32>,
}

/// Timestamp and transfers extracted from the extrinsics of one block
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct BlockDigest {
    pub timestamp: Option<u64>,
    pub transfers: Vec<TransferRecord>,
    pub skipped: Vec<usize>,
}

impl BlockDigest {
    pub fn from_extrinsics(extrinsics: &[String], policy: SkipPolicy) -> Result<BlockDigest> {
        Self::from_extrinsics_with_codec(extrinsics, policy, &HexAddressCodec)
    }

    pub fn from_extrinsics_with_codec(
        extrinsics: &[String],
        policy: SkipPolicy,
        codec: &dyn AddressCodec,
    ) -> Result<BlockDigest> {
        let mut digest = BlockDigest::default();

        for (index, hex) in extrinsics.iter().enumerate() {
            match Self::parse_one(hex) {
                Ok((raw, extrinsic)) => digest.absorb(index, &raw, extrinsic, codec),
                Err(e) if policy == SkipPolicy::SkipMalformed => {
                    warn!("Skipping extrinsic {index}: {e}");
                    digest.skipped.push(index);
                }
                Err(e) => {
                    return Err(ExtrinsicError::MalformedInput(format!(
                        "extrinsic {index}: {e}"
                    )))
                }
            }
        }

        debug!(
            "Block digest: {} transfers, {} skipped",
            digest.transfers.len(),
            digest.skipped.len()
        );
        Ok(digest)
    }

    fn parse_one(hex: &str) -> Result<(Vec<u8>, Extrinsic)> {
        let raw = hex_decode(hex)?;
        let extrinsic = Extrinsic::decode(&raw)?;
        Ok((raw, extrinsic))
    }

    fn absorb(&mut self, index: usize, raw: &[u8], extrinsic: Extrinsic, codec: &dyn AddressCodec) {
        match extrinsic.call {
            Some(Call::Timestamp {
                moment: Some(moment),
                ..
            }) => self.timestamp = Some(moment),
            Some(Call::Transfer(transfer)) => {
                let signed = extrinsic.signed.as_ref();
                self.transfers.push(TransferRecord {
                    index,
                    txid: hex_encode_prefixed(&extrinsic_hash(raw)),
                    from: signed.map(|s| s.sender.render(codec)),
                    to: transfer.dest.render(codec),
                    token: transfer.token_symbol().into_owned(),
                    amount: transfer.amount,
                    memo: transfer.memo_text().into_owned(),
                    signature: signed.map(|s| hex_encode_prefixed(&s.signature)),
                    nonce: signed.map(|s| s.nonce),
                    era: signed.and_then(|s| s.era),
                    acceleration: signed.and_then(|s| s.acceleration),
                });
            }
            _ => {}
        }
    }
}
