use crate::codec::{decode_compact_u32, decode_u64, ByteCursor};
use crate::core::address::AccountAddress;
use crate::error::Result;
use crate::utils::{hex_decode_fixed, hex_encode};
use serde::{Serialize, Serializer};
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

/// Sub-discriminator of a timestamp call that carries a moment
pub const TIMESTAMP_SET: u8 = 0x03;

/// Two-byte call discriminator (module index, call index)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CallIndex(pub [u8; 2]);

impl CallIndex {
    pub const TRANSFER: CallIndex = CallIndex([0x08, 0x03]);
    pub const TIMESTAMP: CallIndex = CallIndex([0x01, 0x00]);
    pub const PRODUCE: CallIndex = CallIndex([0x06, 0x00]);

    pub fn as_bytes(&self) -> &[u8; 2] {
        &self.0
    }
}

impl fmt::Display for CallIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex_encode(&self.0))
    }
}

impl FromStr for CallIndex {
    type Err = crate::error::ExtrinsicError;

    fn from_str(s: &str) -> Result<Self> {
        Ok(CallIndex(hex_decode_fixed::<2>(s, "call index")?))
    }
}

impl Serialize for CallIndex {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Decoded payload of a transfer call
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransferCall {
    pub dest: AccountAddress,
    pub token: Vec<u8>,
    pub amount: u64,
    pub memo: Vec<u8>,
}

impl TransferCall {
    pub fn token_symbol(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.token)
    }

    pub fn memo_text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.memo)
    }

    fn decode(cursor: &mut ByteCursor<'_>) -> Result<TransferCall> {
        let dest = AccountAddress::decode(cursor)?;

        let token_len = decode_compact_u32(cursor.take_compact("token length")?)? as usize;
        let token = cursor.take(token_len, "token")?.to_vec();

        let amount = decode_u64(cursor.take(8, "amount")?)?;

        // A missing or cut-off memo length means an empty memo; a cut-off
        // memo body keeps the bytes that are there
        let memo = match cursor.take_compact_optional() {
            None => Vec::new(),
            Some(raw) => {
                let memo_len = decode_compact_u32(raw)? as usize;
                cursor.take_partial(memo_len).to_vec()
            }
        };

        Ok(TransferCall {
            dest,
            token,
            amount,
            memo,
        })
    }
}

/// The call an extrinsic invokes, selected by its call index
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Call {
    Transfer(TransferCall),
    Timestamp { kind: u8, moment: Option<u64> },
    Produce,
    Unknown { index: CallIndex },
}

impl Call {
    /// Decode the payload that follows `index`. Unknown indices are kept
    /// without touching the remaining bytes.
    pub fn decode(index: CallIndex, cursor: &mut ByteCursor<'_>) -> Result<Call> {
        match index {
            CallIndex::TRANSFER => Ok(Call::Transfer(TransferCall::decode(cursor)?)),
            CallIndex::TIMESTAMP => {
                let kind = cursor.take_u8("timestamp kind")?;
                let moment = if kind == TIMESTAMP_SET {
                    Some(decode_u64(cursor.take(4, "timestamp")?)?)
                } else {
                    None
                };
                Ok(Call::Timestamp { kind, moment })
            }
            CallIndex::PRODUCE => Ok(Call::Produce),
            other => Ok(Call::Unknown { index: other }),
        }
    }

    pub fn index(&self) -> CallIndex {
        match self {
            Call::Transfer(_) => CallIndex::TRANSFER,
            Call::Timestamp { .. } => CallIndex::TIMESTAMP,
            Call::Produce => CallIndex::PRODUCE,
            Call::Unknown { index } => *index,
        }
    }

    pub fn as_transfer(&self) -> Option<&TransferCall> {
        match self {
            Call::Transfer(transfer) => Some(transfer),
            _ => None,
        }
    }
}
