// Compact integer codec used throughout the chain's wire format.
// The low two bits of the first byte select the width:
//   0b00 -> 1 byte,  value = byte >> 2
//   0b01 -> 2 bytes, value = u16 LE >> 2
//   0b10 -> 4 bytes, value = u32 LE >> 2
//   0b11 -> big-integer mode, 5 + (byte >> 2) bytes in total, value LE after the mode byte

use crate::error::{ExtrinsicError, Result};
use num_bigint::BigUint;

const SINGLE_BYTE_MAX: u32 = 0x3f;
const TWO_BYTE_MAX: u32 = 0x3fff;
const FOUR_BYTE_MAX: u32 = 0x3fff_ffff;

/// Total encoded width (mode byte included) implied by the first byte
pub fn compact_width(first: u8) -> usize {
    match first & 0b11 {
        0b00 => 1,
        0b01 => 2,
        0b10 => 4,
        _ => 5 + (first >> 2) as usize,
    }
}

fn require(bytes: &[u8], needed: usize, what: &str) -> Result<()> {
    if bytes.len() < needed {
        return Err(ExtrinsicError::MalformedInput(format!(
            "{what} needs {needed} bytes, only {} available",
            bytes.len()
        )));
    }
    Ok(())
}

/// Decode a compact integer into a `u32`.
///
/// Trailing bytes after the encoded width are ignored. Big-integer mode is
/// decoded at full precision first so that values above `u32::MAX` are
/// reported as a range error instead of being truncated.
pub fn decode_compact_u32(bytes: &[u8]) -> Result<u32> {
    let first = *bytes
        .first()
        .ok_or_else(|| ExtrinsicError::MalformedInput("empty compact integer".to_string()))?;
    let width = compact_width(first);
    require(bytes, width, "compact integer")?;

    match first & 0b11 {
        0b00 => Ok(u32::from(first >> 2)),
        0b01 => Ok(u32::from(u16::from_le_bytes([bytes[0], bytes[1]]) >> 2)),
        0b10 => Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]) >> 2),
        _ => {
            let value = BigUint::from_bytes_le(&bytes[1..width]);
            u32::try_from(&value).map_err(|_| {
                ExtrinsicError::RangeOverflow(format!("compact value {value} exceeds u32"))
            })
        }
    }
}

/// Decode a fixed little-endian scalar of 4 or 8 bytes (not compact encoded)
pub fn decode_u64(bytes: &[u8]) -> Result<u64> {
    match bytes.len() {
        4 => Ok(u64::from(u32::from_le_bytes([
            bytes[0], bytes[1], bytes[2], bytes[3],
        ]))),
        8 => Ok(u64::from_le_bytes([
            bytes[0], bytes[1], bytes[2], bytes[3], bytes[4], bytes[5], bytes[6], bytes[7],
        ])),
        n => Err(ExtrinsicError::MalformedInput(format!(
            "fixed scalar must be 4 or 8 bytes, got {n}"
        ))),
    }
}

/// Decode a compact-length-prefixed UTF-8 string
pub fn decode_string(bytes: &[u8]) -> Result<String> {
    let len = decode_compact_u32(bytes)? as usize;
    let start = compact_width(bytes[0]);
    let end = start
        .checked_add(len)
        .ok_or_else(|| ExtrinsicError::RangeOverflow("string length".to_string()))?;
    require(bytes, end, "string body")?;

    String::from_utf8(bytes[start..end].to_vec())
        .map_err(|e| ExtrinsicError::MalformedInput(format!("string is not UTF-8: {e}")))
}

pub fn write_compact_u32(out: &mut Vec<u8>, value: u32) {
    if value <= SINGLE_BYTE_MAX {
        out.push((value as u8) << 2);
    } else if value <= TWO_BYTE_MAX {
        out.extend_from_slice(&(((value as u16) << 2) | 0b01).to_le_bytes());
    } else if value <= FOUR_BYTE_MAX {
        out.extend_from_slice(&((value << 2) | 0b10).to_le_bytes());
    } else {
        // four value bytes follow: ((4 - 4) << 2) | 0b11
        out.push(0b11);
        out.extend_from_slice(&value.to_le_bytes());
    }
}

/// Encode a `u32` with the narrowest compact width
pub fn encode_compact_u32(value: u32) -> Vec<u8> {
    let mut out = Vec::with_capacity(5);
    write_compact_u32(&mut out, value);
    out
}

/// Encode a string as compact byte length followed by its UTF-8 bytes
pub fn encode_string(value: &str) -> Result<Vec<u8>> {
    let len = u32::try_from(value.len())
        .map_err(|_| ExtrinsicError::RangeOverflow("string longer than u32::MAX".to_string()))?;
    let mut out = encode_compact_u32(len);
    out.extend_from_slice(value.as_bytes());
    Ok(out)
}
