use blake2::digest::consts::U32;
use blake2::{Blake2b, Digest};
use data_encoding::{HEXLOWER, HEXLOWER_PERMISSIVE};

use crate::error::{ExtrinsicError, Result};

/// Blake2b with a 256-bit output, the chain's extrinsic hash
pub fn blake2_256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Blake2b::<U32>::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Transaction id of a raw extrinsic (length prefix included)
pub fn extrinsic_hash(raw: &[u8]) -> [u8; 32] {
    blake2_256(raw)
}

pub fn strip_hex_prefix(data: &str) -> &str {
    data.strip_prefix("0x").unwrap_or(data)
}

/// Decode hex with an optional `0x` prefix. Upper and lower case are accepted.
pub fn hex_decode(data: &str) -> Result<Vec<u8>> {
    let trimmed = strip_hex_prefix(data.trim());
    Ok(HEXLOWER_PERMISSIVE.decode(trimmed.as_bytes())?)
}

/// Decode hex that must hold exactly `N` bytes
pub fn hex_decode_fixed<const N: usize>(data: &str, field: &'static str) -> Result<[u8; N]> {
    let bytes = hex_decode(data)?;
    <[u8; N]>::try_from(bytes.as_slice()).map_err(|_| ExtrinsicError::InvalidFieldLength {
        field,
        expected: N,
        actual: bytes.len(),
    })
}

pub fn hex_encode(data: &[u8]) -> String {
    HEXLOWER.encode(data)
}

pub fn hex_encode_prefixed(data: &[u8]) -> String {
    format!("0x{}", HEXLOWER.encode(data))
}
