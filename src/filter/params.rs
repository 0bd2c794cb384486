//! Per-filter parameter records (`/DecodeParms`).

use super::FilterKind;
use crate::error::FilterError;
use crate::{Dictionary, Number, Object};
use serde::{Deserialize, Serialize};

/// Parameters of one filter in a chain.
///
/// Only Flate and LZW read the predictor fields, and only LZW reads
/// `early_change`. Fields default to the values the format assigns when the
/// entry is absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterParams {
    /// 1 = none, 2 = TIFF horizontal differencing, 10..=15 = PNG
    pub predictor: u8,
    /// Components per sample
    pub colors: usize,
    pub bits_per_component: usize,
    /// Samples per row
    pub columns: usize,
    /// LZW code width grows one code early
    pub early_change: bool,
}

impl Default for FilterParams {
    fn default() -> Self {
        FilterParams {
            predictor: 1,
            colors: 1,
            bits_per_component: 8,
            columns: 1,
            early_change: true,
        }
    }
}

impl FilterParams {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_predictor(mut self, predictor: u8) -> Self {
        self.predictor = predictor;
        self
    }

    #[must_use]
    pub fn with_colors(mut self, colors: usize) -> Self {
        self.colors = colors;
        self
    }

    #[must_use]
    pub fn with_bits_per_component(mut self, bits: usize) -> Self {
        self.bits_per_component = bits;
        self
    }

    #[must_use]
    pub fn with_columns(mut self, columns: usize) -> Self {
        self.columns = columns;
        self
    }

    #[must_use]
    pub fn with_early_change(mut self, early_change: bool) -> Self {
        self.early_change = early_change;
        self
    }

    /// Bytes per row of predictor input, `ceil(columns * colors * bpc / 8)`, at least 1.
    ///
    /// `None` if the product does not fit in a `usize`.
    #[must_use]
    pub fn row_len(&self) -> Option<usize> {
        let bits = self
            .columns
            .checked_mul(self.colors)?
            .checked_mul(self.bits_per_component)?;
        Some((bits / 8 + usize::from(bits % 8 != 0)).max(1))
    }

    /// Bytes per complete sample, at least 1. `None` on overflow.
    #[must_use]
    pub fn bytes_per_pixel(&self) -> Option<usize> {
        let bits = self.colors.checked_mul(self.bits_per_component)?;
        Some((bits / 8 + usize::from(bits % 8 != 0)).max(1))
    }

    /// Reads a `/DecodeParms` dictionary. Missing entries take their defaults.
    pub fn from_dict(codec: FilterKind, dict: &Dictionary) -> Result<Self, FilterError> {
        let mut params = FilterParams::default();
        let read = |key: &str| -> Result<Option<i64>, FilterError> {
            match dict.get(key) {
                None | Some(Object::Null) => Ok(None),
                Some(value) => value
                    .as_number()
                    .and_then(Number::as_i64)
                    .map(Some)
                    .ok_or_else(|| {
                        FilterError::unsupported(codec, format!("/{key} must be an integer"))
                    }),
            }
        };

        if let Some(predictor) = read("Predictor")? {
            params.predictor = u8::try_from(predictor)
                .map_err(|_| FilterError::unsupported(codec, format!("predictor {predictor}")))?;
        }
        let positive = |key: &str, value: i64| -> Result<usize, FilterError> {
            usize::try_from(value)
                .ok()
                .filter(|v| *v > 0)
                .ok_or_else(|| FilterError::unsupported(codec, format!("/{key} {value}")))
        };
        if let Some(colors) = read("Colors")? {
            params.colors = positive("Colors", colors)?;
        }
        if let Some(bits) = read("BitsPerComponent")? {
            params.bits_per_component = positive("BitsPerComponent", bits)?;
        }
        if let Some(columns) = read("Columns")? {
            params.columns = positive("Columns", columns)?;
        }
        if let Some(early) = read("EarlyChange")? {
            params.early_change = early != 0;
        }
        if params.row_len().is_none() {
            return Err(FilterError::unsupported(
                codec,
                format!(
                    "row of {} columns x {} colors x {} bits is too large",
                    params.columns, params.colors, params.bits_per_component
                ),
            ));
        }
        Ok(params)
    }

    /// Writes the non-default entries back as a `/DecodeParms` dictionary.
    #[must_use]
    pub fn to_dict(&self) -> Dictionary {
        let defaults = FilterParams::default();
        let mut dict = Dictionary::new();
        if self.predictor != defaults.predictor {
            dict.insert("Predictor", self.predictor);
        }
        if self.colors != defaults.colors {
            dict.insert("Colors", self.colors);
        }
        if self.bits_per_component != defaults.bits_per_component {
            dict.insert("BitsPerComponent", self.bits_per_component);
        }
        if self.columns != defaults.columns {
            dict.insert("Columns", self.columns);
        }
        if self.early_change != defaults.early_change {
            dict.insert("EarlyChange", i64::from(self.early_change));
        }
        dict
    }
}
