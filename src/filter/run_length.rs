//! `/RunLengthDecode`.
//!
//! A length byte `n` is followed by `n + 1` literal bytes when `n < 128`, or
//! by one byte repeated `257 - n` times when `n > 128`. `128` ends the data.

use super::{Codec, FilterKind, FilterParams};
use crate::error::{FilterError, Stage};

const END_OF_DATA: u8 = 128;
const MAX_RUN: usize = 128;

#[derive(Debug, Clone, Copy, Default)]
pub struct RunLength;

impl Codec for RunLength {
    fn kind(&self) -> FilterKind {
        FilterKind::RunLength
    }

    fn encode(&self, data: &[u8], _params: &FilterParams) -> Result<Vec<u8>, FilterError> {
        let mut out = Vec::with_capacity(data.len() + data.len() / MAX_RUN + 2);
        let mut i = 0;
        while i < data.len() {
            let byte = data[i];
            let run = data[i..]
                .iter()
                .take(MAX_RUN)
                .take_while(|&&b| b == byte)
                .count();
            if run >= 2 {
                out.push((257 - run) as u8);
                out.push(byte);
                i += run;
                continue;
            }

            // Literal run up to the next pair of equal bytes.
            let start = i;
            while i < data.len()
                && i - start < MAX_RUN
                && !(i + 1 < data.len() && data[i] == data[i + 1])
            {
                i += 1;
            }
            out.push((i - start - 1) as u8);
            out.extend_from_slice(&data[start..i]);
        }
        out.push(END_OF_DATA);
        Ok(out)
    }

    fn decode(&self, data: &[u8], _params: &FilterParams) -> Result<Vec<u8>, FilterError> {
        let truncated = |at: usize| {
            FilterError::malformed(
                FilterKind::RunLength,
                Stage::Decode,
                format!("run at offset {at} is cut short"),
            )
        };
        let mut out = Vec::new();
        let mut i = 0;
        while let Some(&length) = data.get(i) {
            match length {
                END_OF_DATA => return Ok(out),
                0..=127 => {
                    let count = usize::from(length) + 1;
                    let literal = data.get(i + 1..i + 1 + count).ok_or_else(|| truncated(i))?;
                    out.extend_from_slice(literal);
                    i += 1 + count;
                }
                _ => {
                    let &byte = data.get(i + 1).ok_or_else(|| truncated(i))?;
                    out.resize(out.len() + 257 - usize::from(length), byte);
                    i += 2;
                }
            }
        }
        Ok(out)
    }
}
