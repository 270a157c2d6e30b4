use crate::codec::ByteCursor;
use crate::error::{ExtrinsicError, Result};
use crate::utils::{hex_decode_fixed, hex_encode_prefixed};
use serde::{Serialize, Serializer};
use std::fmt;

/// Marker byte announcing a full 32-byte public key
pub const PUBLIC_KEY_MARKER: u8 = 0xff;
pub const PUBLIC_KEY_LEN: usize = 32;

/// An account as it appears on the wire: either a full public key, or a
/// short account index carried in the marker byte itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccountAddress {
    PublicKey([u8; PUBLIC_KEY_LEN]),
    Index(u64),
}

impl AccountAddress {
    pub fn decode(cursor: &mut ByteCursor<'_>) -> Result<AccountAddress> {
        let marker = cursor.take_u8("address marker")?;
        if marker == PUBLIC_KEY_MARKER {
            let key = cursor.take_array::<PUBLIC_KEY_LEN>("address public key")?;
            Ok(AccountAddress::PublicKey(key))
        } else {
            Ok(AccountAddress::Index(u64::from(marker)))
        }
    }

    /// Wire form of a public-key account; index accounts are never built here
    pub fn encode_public_key(out: &mut Vec<u8>, key: &[u8; PUBLIC_KEY_LEN]) {
        out.push(PUBLIC_KEY_MARKER);
        out.extend_from_slice(key);
    }

    pub fn public_key(&self) -> Option<&[u8; PUBLIC_KEY_LEN]> {
        match self {
            AccountAddress::PublicKey(key) => Some(key),
            AccountAddress::Index(_) => None,
        }
    }

    /// Human-readable form through an address codec; indices stay decimal
    pub fn render(&self, codec: &dyn AddressCodec) -> String {
        match self {
            AccountAddress::PublicKey(key) => codec.encode(key),
            AccountAddress::Index(index) => index.to_string(),
        }
    }
}

impl fmt::Display for AccountAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render(&HexAddressCodec))
    }
}

impl Serialize for AccountAddress {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Converts between 32-byte public keys and a chain's human-readable
/// addresses. Checksummed SS58 encodings are supplied by the caller.
pub trait AddressCodec {
    fn encode(&self, public_key: &[u8; PUBLIC_KEY_LEN]) -> String;
    fn decode(&self, address: &str) -> Result<[u8; PUBLIC_KEY_LEN]>;
}

/// Addresses written as `0x`-prefixed public key hex
#[derive(Debug, Clone, Copy, Default)]
pub struct HexAddressCodec;

impl AddressCodec for HexAddressCodec {
    fn encode(&self, public_key: &[u8; PUBLIC_KEY_LEN]) -> String {
        hex_encode_prefixed(public_key)
    }

    fn decode(&self, address: &str) -> Result<[u8; PUBLIC_KEY_LEN]> {
        if address.trim().is_empty() {
            return Err(ExtrinsicError::MalformedInput("empty address".to_string()));
        }
        hex_decode_fixed::<PUBLIC_KEY_LEN>(address, "public key")
    }
}
