use crate::codec::compact::compact_width;
use crate::error::{ExtrinsicError, Result};

/// Forward-only reader over a borrowed byte buffer.
///
/// Strict reads fail on truncation. The `_partial` / `_optional` variants
/// tolerate a short read and are only meant for trailing optional fields.
#[derive(Debug, Clone)]
pub struct ByteCursor<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> ByteCursor<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        ByteCursor { data, offset: 0 }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn remaining(&self) -> usize {
        self.data.len() - self.offset
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Next `n` bytes, or whatever is left with the offset pinned at the end
    pub fn take_partial(&mut self, n: usize) -> &'a [u8] {
        let end = self.offset.saturating_add(n).min(self.data.len());
        let out = &self.data[self.offset..end];
        self.offset = end;
        out
    }

    /// Exactly `n` bytes; a short read leaves the cursor untouched
    pub fn take(&mut self, n: usize, what: &str) -> Result<&'a [u8]> {
        if self.remaining() < n {
            return Err(ExtrinsicError::MalformedInput(format!(
                "{what} needs {n} bytes at offset {}, only {} left",
                self.offset,
                self.remaining()
            )));
        }
        Ok(self.take_partial(n))
    }

    pub fn take_u8(&mut self, what: &str) -> Result<u8> {
        Ok(self.take(1, what)?[0])
    }

    pub fn take_array<const N: usize>(&mut self, what: &str) -> Result<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N, what)?);
        Ok(out)
    }

    /// Raw bytes of one compact integer, mode byte included
    pub fn take_compact(&mut self, what: &str) -> Result<&'a [u8]> {
        let first = *self.data.get(self.offset).ok_or_else(|| {
            ExtrinsicError::MalformedInput(format!("{what} missing at offset {}", self.offset))
        })?;
        self.take(compact_width(first), what)
    }

    /// Like [`take_compact`](Self::take_compact) but a short read means the field is absent.
    /// Whatever bytes were left are consumed either way.
    pub fn take_compact_optional(&mut self) -> Option<&'a [u8]> {
        let first = *self.data.get(self.offset)?;
        let width = compact_width(first);
        let raw = self.take_partial(width);
        (raw.len() == width).then_some(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_advances_offset() {
        let data = [1u8, 2, 3, 4, 5];
        let mut cursor = ByteCursor::new(&data);
        assert_eq!(cursor.take(2, "head").unwrap(), &[1, 2]);
        assert_eq!(cursor.offset(), 2);
        assert_eq!(cursor.take_u8("next").unwrap(), 3);
        assert_eq!(cursor.take_array::<2>("tail").unwrap(), [4, 5]);
        assert!(cursor.is_empty());
    }

    #[test]
    fn test_partial_read_pins_offset_at_end() {
        let data = [1u8, 2, 3];
        let mut cursor = ByteCursor::new(&data);
        cursor.take(2, "head").unwrap();
        assert_eq!(cursor.take_partial(8), &[3]);
        assert_eq!(cursor.offset(), 3);
        assert!(cursor.take_partial(1).is_empty());
        assert_eq!(cursor.offset(), 3);
    }

    #[test]
    fn test_strict_read_fails_without_moving() {
        let data = [1u8, 2, 3];
        let mut cursor = ByteCursor::new(&data);
        assert!(matches!(
            cursor.take(4, "signature"),
            Err(ExtrinsicError::MalformedInput(_))
        ));
        assert_eq!(cursor.offset(), 0);
    }

    #[test]
    fn test_take_compact_returns_raw_bytes() {
        let data = [0x91u8, 0x01, 0x04, 0xff];
        let mut cursor = ByteCursor::new(&data);
        assert_eq!(cursor.take_compact("nonce").unwrap(), &[0x91, 0x01]);
        assert_eq!(cursor.take_compact("acc").unwrap(), &[0x04]);
        // 0xff claims big-integer mode with 68 bytes
        assert!(cursor.take_compact("len").is_err());
    }

    #[test]
    fn test_optional_compact_on_exhausted_buffer() {
        let data = [0x00u8];
        let mut cursor = ByteCursor::new(&data);
        assert_eq!(cursor.take_compact_optional(), Some(&[0x00][..]));
        assert_eq!(cursor.take_compact_optional(), None);
    }

    #[test]
    fn test_optional_compact_short_of_its_width() {
        // 0x01 selects the two-byte mode but nothing follows
        let data = [0x04u8, 0x01];
        let mut cursor = ByteCursor::new(&data);
        assert_eq!(cursor.take_compact_optional(), Some(&[0x04][..]));
        assert_eq!(cursor.take_compact_optional(), None);
        assert!(cursor.is_empty());
    }
}
