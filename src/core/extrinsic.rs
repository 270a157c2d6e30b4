// Inbound side: raw extrinsic bytes -> structured Extrinsic.
// The parser walks a fixed sequence of states and never goes back:
//   Start -> LengthRead -> VersionRead -> [SignedFieldsRead] -> CallIndexRead -> CallPayloadRead -> Done
// Any error aborts the walk; the partially filled value is dropped.

use crate::codec::{decode_compact_u32, ByteCursor};
use crate::core::address::AccountAddress;
use crate::core::call::{Call, CallIndex};
use crate::error::{ExtrinsicError, Result};
use crate::utils::{hex_decode, hex_encode_prefixed};
use log::debug;
use serde::{Serialize, Serializer};

pub const VERSION_UNSIGNED: u8 = 0x01;
pub const VERSION_SIGNED: u8 = 0x81;
const SIGNED_BIT: u8 = 0x80;
pub const IMMORTAL_ERA: u8 = 0x00;
pub const SIGNATURE_LEN: usize = 64;

fn serialize_hex<S: Serializer>(
    bytes: &[u8; SIGNATURE_LEN],
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(&hex_encode_prefixed(bytes))
}

/// Fields present only on signed extrinsics
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignedFields {
    pub sender: AccountAddress,
    #[serde(serialize_with = "serialize_hex")]
    pub signature: [u8; SIGNATURE_LEN],
    pub nonce: u32,
    /// `None` when the extrinsic ends right after the nonce
    pub era: Option<u8>,
    pub acceleration: Option<u32>,
}

/// A parsed on-chain extrinsic
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Extrinsic {
    /// Declared byte length, equal to the bytes following the length field
    pub length: u32,
    pub version: u8,
    pub signed: Option<SignedFields>,
    pub call: Option<Call>,
}

impl Extrinsic {
    /// Parse a complete, length-prefixed extrinsic
    pub fn decode(data: &[u8]) -> Result<Extrinsic> {
        ExtrinsicParser::new(data).parse()
    }

    /// Parse an extrinsic whose compact length prefix was already stripped
    pub fn decode_body(body: &[u8]) -> Result<Extrinsic> {
        ExtrinsicParser::new(body).parse_body()
    }

    /// Parse from hex, with or without a `0x` prefix
    pub fn from_hex(data: &str) -> Result<Extrinsic> {
        let bytes = hex_decode(data)?;
        Self::decode(&bytes)
    }

    pub fn is_signed(&self) -> bool {
        self.signed.is_some()
    }

    pub fn call_index(&self) -> Option<CallIndex> {
        self.call.as_ref().map(Call::index)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseState {
    Start,
    LengthRead,
    VersionRead,
    SignedFieldsRead,
    CallIndexRead,
    CallPayloadRead,
    Done,
}

/// Single-use parser owning its cursor over one extrinsic
pub struct ExtrinsicParser<'a> {
    cursor: ByteCursor<'a>,
    state: ParseState,
}

impl<'a> ExtrinsicParser<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        ExtrinsicParser {
            cursor: ByteCursor::new(data),
            state: ParseState::Start,
        }
    }

    pub fn state(&self) -> ParseState {
        self.state
    }

    fn advance(&mut self, next: ParseState) {
        debug!(
            "extrinsic parser {:?} -> {:?} at offset {}",
            self.state,
            next,
            self.cursor.offset()
        );
        self.state = next;
    }

    pub fn parse(mut self) -> Result<Extrinsic> {
        if self.cursor.is_empty() {
            return Err(ExtrinsicError::MalformedInput(
                "empty extrinsic".to_string(),
            ));
        }
        let length = self.read_length()?;
        self.parse_from_version(length)
    }

    fn parse_body(mut self) -> Result<Extrinsic> {
        if self.cursor.is_empty() {
            return Err(ExtrinsicError::MalformedInput(
                "empty extrinsic body".to_string(),
            ));
        }
        let length = u32::try_from(self.cursor.remaining())
            .map_err(|_| ExtrinsicError::RangeOverflow("extrinsic body length".to_string()))?;
        self.advance(ParseState::LengthRead);
        self.parse_from_version(length)
    }

    fn read_length(&mut self) -> Result<u32> {
        let raw = self.cursor.take_compact("extrinsic length")?;
        let length = decode_compact_u32(raw)?;
        let actual = self.cursor.remaining();
        if length as usize != actual {
            return Err(ExtrinsicError::LengthMismatch {
                declared: length as usize,
                actual,
            });
        }
        self.advance(ParseState::LengthRead);
        Ok(length)
    }

    fn parse_from_version(mut self, length: u32) -> Result<Extrinsic> {
        let version = self.cursor.take_u8("version")?;
        if version != VERSION_UNSIGNED && version != VERSION_SIGNED {
            return Err(ExtrinsicError::UnsupportedVersion(version));
        }
        self.advance(ParseState::VersionRead);

        let mut extrinsic = Extrinsic {
            length,
            version,
            signed: None,
            call: None,
        };

        if version & SIGNED_BIT != 0 {
            let signed = self.read_signed_fields()?;
            let ended_early = signed.era.is_none();
            extrinsic.signed = Some(signed);
            self.advance(ParseState::SignedFieldsRead);
            if ended_early {
                self.advance(ParseState::Done);
                return Ok(extrinsic);
            }
        }

        let index = CallIndex(self.cursor.take_array::<2>("call index")?);
        self.advance(ParseState::CallIndexRead);

        extrinsic.call = Some(Call::decode(index, &mut self.cursor)?);
        self.advance(ParseState::CallPayloadRead);

        self.advance(ParseState::Done);
        Ok(extrinsic)
    }

    fn read_signed_fields(&mut self) -> Result<SignedFields> {
        let sender = AccountAddress::decode(&mut self.cursor)?;
        let signature = self.cursor.take_array::<SIGNATURE_LEN>("signature")?;
        let nonce = decode_compact_u32(self.cursor.take_compact("nonce")?)?;

        // An exhausted buffer here means the era and everything after it are absent
        let era = match self.cursor.take_partial(1) {
            [] => None,
            [IMMORTAL_ERA] => Some(IMMORTAL_ERA),
            [other, ..] => return Err(ExtrinsicError::UnsupportedEra(*other)),
        };

        let acceleration = match era {
            Some(_) => Some(decode_compact_u32(
                self.cursor.take_compact("acceleration")?,
            )?),
            None => None,
        };

        Ok(SignedFields {
            sender,
            signature,
            nonce,
            era,
            acceleration,
        })
    }
}
