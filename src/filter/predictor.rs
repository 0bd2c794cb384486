//! TIFF and PNG predictors.
//!
//! Predictors run after Flate/LZW decoding and before their encoding. Input is
//! split into rows of [`FilterParams::row_len`] bytes; a final short row is
//! processed as far as it goes and kept at its exact length.
//!
//! - `1`: no prediction
//! - `2`: TIFF horizontal differencing, 8 or 16 bits per component, no tag byte
//! - `10..=14`: PNG None, Sub, Up, Average, Paeth on every row
//! - `15`: PNG "optimum"; each row is tagged with whichever of the five
//!   minimizes the sum of absolute residuals
//!
//! Decoding reads the per-row tag, so any PNG predictor value decodes any
//! PNG-tagged data.

use super::{FilterKind, FilterParams};
use crate::error::{FilterError, Stage};

/// Reverses the prediction named in `params`.
pub fn decode(codec: FilterKind, data: &[u8], params: &FilterParams) -> Result<Vec<u8>, FilterError> {
    match params.predictor {
        1 => Ok(data.to_vec()),
        2 => tiff(codec, data, params, Stage::Decode),
        10..=15 => png_decode(codec, data, params),
        other => Err(FilterError::unsupported(codec, format!("predictor {other}"))),
    }
}

/// Applies the prediction named in `params`.
pub fn encode(codec: FilterKind, data: &[u8], params: &FilterParams) -> Result<Vec<u8>, FilterError> {
    match params.predictor {
        1 => Ok(data.to_vec()),
        2 => tiff(codec, data, params, Stage::Encode),
        10..=15 => png_encode(codec, data, params),
        other => Err(FilterError::unsupported(codec, format!("predictor {other}"))),
    }
}

/// Row length and bytes per pixel, rejecting parameters that overflow.
fn geometry(codec: FilterKind, params: &FilterParams) -> Result<(usize, usize), FilterError> {
    match (params.row_len(), params.bytes_per_pixel()) {
        (Some(row_len), Some(bpp)) => Ok((row_len, bpp)),
        _ => Err(FilterError::unsupported(
            codec,
            format!(
                "row of {} columns x {} colors x {} bits is too large",
                params.columns, params.colors, params.bits_per_component
            ),
        )),
    }
}

fn tiff(codec: FilterKind, data: &[u8], params: &FilterParams, stage: Stage) -> Result<Vec<u8>, FilterError> {
    let (row_len, stride) = geometry(codec, params)?;
    let mut out = data.to_vec();
    match params.bits_per_component {
        8 => {
            for row in out.chunks_mut(row_len) {
                match stage {
                    Stage::Decode => {
                        for i in stride..row.len() {
                            row[i] = row[i].wrapping_add(row[i - stride]);
                        }
                    }
                    // Right to left, so each left neighbour is still original.
                    Stage::Encode => {
                        for i in (stride..row.len()).rev() {
                            row[i] = row[i].wrapping_sub(row[i - stride]);
                        }
                    }
                }
            }
        }
        16 => {
            // Whole 16-bit samples even when `colors` is 0.
            let stride = stride.max(2);
            let read = |row: &[u8], i: usize| u16::from_be_bytes([row[i], row[i + 1]]);
            for row in out.chunks_mut(row_len) {
                let whole = row.len() - row.len() % 2;
                let indices: Vec<usize> = (stride..whole).step_by(2).collect();
                match stage {
                    Stage::Decode => {
                        for i in indices {
                            let value = read(row, i).wrapping_add(read(row, i - stride));
                            row[i..i + 2].copy_from_slice(&value.to_be_bytes());
                        }
                    }
                    Stage::Encode => {
                        for i in indices.into_iter().rev() {
                            let value = read(row, i).wrapping_sub(read(row, i - stride));
                            row[i..i + 2].copy_from_slice(&value.to_be_bytes());
                        }
                    }
                }
            }
        }
        other => {
            return Err(FilterError::unsupported(
                codec,
                format!("TIFF predictor with {other} bits per component"),
            ))
        }
    }
    Ok(out)
}

/// Nearest of left, above and upper-left to `left + above - upper_left`.
pub fn paeth_predictor(left: u8, above: u8, upper_left: u8) -> u8 {
    let p = i16::from(left) + i16::from(above) - i16::from(upper_left);
    let pa = (p - i16::from(left)).abs();
    let pb = (p - i16::from(above)).abs();
    let pc = (p - i16::from(upper_left)).abs();
    if pa <= pb && pa <= pc {
        left
    } else if pb <= pc {
        above
    } else {
        upper_left
    }
}

/// The value a PNG filter type predicts for byte `i` of a row.
#[inline]
fn predict(tag: u8, row: &[u8], prev: &[u8], i: usize, bpp: usize) -> u8 {
    let left = if i >= bpp { row[i - bpp] } else { 0 };
    let above = prev.get(i).copied().unwrap_or(0);
    let upper_left = if i >= bpp {
        prev.get(i - bpp).copied().unwrap_or(0)
    } else {
        0
    };
    match tag {
        1 => left,
        2 => above,
        3 => ((u16::from(left) + u16::from(above)) / 2) as u8,
        4 => paeth_predictor(left, above, upper_left),
        _ => 0,
    }
}

fn png_decode(codec: FilterKind, data: &[u8], params: &FilterParams) -> Result<Vec<u8>, FilterError> {
    let (row_len, bpp) = geometry(codec, params)?;
    let mut out = Vec::with_capacity(data.len());
    // A row is never longer than the input.
    let mut prev = vec![0u8; row_len.min(data.len())];
    let mut row = Vec::with_capacity(prev.len());

    for (index, chunk) in data.chunks(row_len + 1).enumerate() {
        let tag = chunk[0];
        if tag > 4 {
            return Err(FilterError::malformed(
                codec,
                Stage::Decode,
                format!("PNG row {index} has unknown filter type {tag}"),
            ));
        }
        row.clear();
        for (i, &residual) in chunk[1..].iter().enumerate() {
            let predicted = predict(tag, &row, &prev, i, bpp);
            row.push(residual.wrapping_add(predicted));
        }
        out.extend_from_slice(&row);
        prev[..row.len()].copy_from_slice(&row);
    }
    Ok(out)
}

fn png_encode(codec: FilterKind, data: &[u8], params: &FilterParams) -> Result<Vec<u8>, FilterError> {
    let (row_len, bpp) = geometry(codec, params)?;
    let rows = data.len() / row_len + usize::from(data.len() % row_len != 0);
    let mut out = Vec::with_capacity(data.len() + rows);
    let mut prev: &[u8] = &[];
    let mut residuals = Vec::with_capacity(row_len.min(data.len()));

    for row in data.chunks(row_len) {
        let tag = match params.predictor {
            15 => (0..=4u8)
                .min_by_key(|&tag| {
                    row.iter()
                        .enumerate()
                        .map(|(i, &b)| {
                            let r = b.wrapping_sub(predict(tag, row, prev, i, bpp));
                            u32::from((r as i8).unsigned_abs())
                        })
                        .sum::<u32>()
                })
                .unwrap_or(0),
            fixed => fixed - 10,
        };
        residuals.clear();
        residuals.extend(
            row.iter()
                .enumerate()
                .map(|(i, &b)| b.wrapping_sub(predict(tag, row, prev, i, bpp))),
        );
        out.push(tag);
        out.extend_from_slice(&residuals);
        prev = row;
    }
    Ok(out)
}
