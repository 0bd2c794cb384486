//! `/ASCII85Decode`: base-85 text, four bytes per five characters, `~>` ends.
//!
//! Decoding stops at `~>`; a `~` followed by anything else is malformed.
//! Input that ends without the marker is accepted as complete.

use super::{Codec, FilterKind, FilterParams};
use crate::error::{FilterError, Stage};

#[derive(Debug, Clone, Copy, Default)]
pub struct Ascii85;

fn malformed(msg: impl std::fmt::Display) -> FilterError {
    FilterError::malformed(FilterKind::Ascii85, Stage::Decode, msg)
}

impl Codec for Ascii85 {
    fn kind(&self) -> FilterKind {
        FilterKind::Ascii85
    }

    fn encode(&self, data: &[u8], _params: &FilterParams) -> Result<Vec<u8>, FilterError> {
        let mut out = Vec::with_capacity(data.len() / 4 * 5 + 7);
        for chunk in data.chunks(4) {
            let mut group = [0u8; 4];
            group[..chunk.len()].copy_from_slice(chunk);
            let mut value = u32::from_be_bytes(group);

            if chunk.len() == 4 && value == 0 {
                out.push(b'z');
                continue;
            }
            let mut digits = [0u8; 5];
            for digit in digits.iter_mut().rev() {
                *digit = (value % 85) as u8 + b'!';
                value /= 85;
            }
            // A partial group of n bytes is written as n + 1 characters.
            out.extend_from_slice(&digits[..chunk.len() + 1]);
        }
        out.extend_from_slice(b"~>");
        Ok(out)
    }

    fn decode(&self, data: &[u8], _params: &FilterParams) -> Result<Vec<u8>, FilterError> {
        let mut out = Vec::with_capacity(data.len() / 5 * 4);
        let mut group: u64 = 0;
        let mut count = 0usize;

        for (offset, &b) in data.iter().enumerate() {
            match b {
                b'~' if data.get(offset + 1) == Some(&b'>') => break,
                b'~' => return Err(malformed(format!("'~' without '>' at offset {offset}"))),
                b'z' if count == 0 => out.extend_from_slice(&[0; 4]),
                b'z' => return Err(malformed(format!("'z' inside a group at offset {offset}"))),
                b'!'..=b'u' => {
                    group = group * 85 + u64::from(b - b'!');
                    count += 1;
                    if count == 5 {
                        let value = u32::try_from(group)
                            .map_err(|_| malformed(format!("group overflow at offset {offset}")))?;
                        out.extend_from_slice(&value.to_be_bytes());
                        group = 0;
                        count = 0;
                    }
                }
                b if crate::lexer::is_whitespace(b) => {}
                other => {
                    return Err(malformed(format!(
                        "invalid character 0x{other:02X} at offset {offset}"
                    )))
                }
            }
        }

        match count {
            0 => {}
            1 => return Err(malformed("final group has a single character")),
            n => {
                for _ in n..5 {
                    group = group * 85 + 84;
                }
                let value = u32::try_from(group).map_err(|_| malformed("final group overflow"))?;
                out.extend_from_slice(&value.to_be_bytes()[..n - 1]);
            }
        }
        Ok(out)
    }
}
