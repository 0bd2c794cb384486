//! `/ASCIIHexDecode`: two hex digits per byte, terminated by `>`.

use super::{Codec, FilterKind, FilterParams};
use crate::error::{FilterError, Stage};

#[derive(Debug, Clone, Copy, Default)]
pub struct AsciiHex;

impl Codec for AsciiHex {
    fn kind(&self) -> FilterKind {
        FilterKind::AsciiHex
    }

    fn encode(&self, data: &[u8], _params: &FilterParams) -> Result<Vec<u8>, FilterError> {
        const DIGITS: &[u8; 16] = b"0123456789ABCDEF";
        let mut out = Vec::with_capacity(data.len() * 2 + 1);
        for &b in data {
            out.push(DIGITS[usize::from(b >> 4)]);
            out.push(DIGITS[usize::from(b & 0x0F)]);
        }
        out.push(b'>');
        Ok(out)
    }

    /// Whitespace is skipped and input stops at `>` or at its end. An odd
    /// digit count is rejected.
    fn decode(&self, data: &[u8], _params: &FilterParams) -> Result<Vec<u8>, FilterError> {
        let mut out = Vec::with_capacity(data.len() / 2);
        let mut high: Option<u8> = None;

        for (offset, &b) in data.iter().enumerate() {
            let digit = match b {
                b'>' => break,
                b'0'..=b'9' => b - b'0',
                b'a'..=b'f' => b - b'a' + 10,
                b'A'..=b'F' => b - b'A' + 10,
                b if crate::lexer::is_whitespace(b) => continue,
                other => {
                    return Err(FilterError::malformed(
                        FilterKind::AsciiHex,
                        Stage::Decode,
                        format!("invalid character 0x{other:02X} at offset {offset}"),
                    ))
                }
            };
            match high.take() {
                Some(h) => out.push((h << 4) | digit),
                None => high = Some(digit),
            }
        }

        if high.is_some() {
            return Err(FilterError::malformed(
                FilterKind::AsciiHex,
                Stage::Decode,
                "odd number of hex digits",
            ));
        }
        Ok(out)
    }
}
