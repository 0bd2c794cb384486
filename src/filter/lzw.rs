//! `/LZWDecode`: MSB-first LZW with 9 to 12 bit codes.

use super::{predictor, Codec, FilterKind, FilterParams};
use crate::error::{FilterError, Stage};
use weezl::{decode::Decoder, encode::Encoder, BitOrder};

/// LZW codec. `/EarlyChange 1` (the default) widens codes one entry early,
/// which is the TIFF size switch in `weezl`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Lzw;

impl Codec for Lzw {
    fn kind(&self) -> FilterKind {
        FilterKind::Lzw
    }

    fn encode(&self, data: &[u8], params: &FilterParams) -> Result<Vec<u8>, FilterError> {
        let predicted = predictor::encode(FilterKind::Lzw, data, params)?;
        let mut encoder = if params.early_change {
            Encoder::with_tiff_size_switch(BitOrder::Msb, 8)
        } else {
            Encoder::new(BitOrder::Msb, 8)
        };
        encoder
            .encode(&predicted)
            .map_err(|e| FilterError::malformed(FilterKind::Lzw, Stage::Encode, e))
    }

    fn decode(&self, data: &[u8], params: &FilterParams) -> Result<Vec<u8>, FilterError> {
        let mut decoder = if params.early_change {
            Decoder::with_tiff_size_switch(BitOrder::Msb, 8)
        } else {
            Decoder::new(BitOrder::Msb, 8)
        };
        let decoded = decoder
            .decode(data)
            .map_err(|e| FilterError::malformed(FilterKind::Lzw, Stage::Decode, e))?;
        predictor::decode(FilterKind::Lzw, &decoded, params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lzw_round_trip_both_code_widths() {
        let original = b"ABCABCABCABCABCABCABCABCABC".repeat(50);
        for early_change in [true, false] {
            let params = FilterParams::default().with_early_change(early_change);
            let encoded = Lzw.encode(&original, &params).unwrap();
            assert!(encoded.len() < original.len());
            assert_eq!(Lzw.decode(&encoded, &params).unwrap(), original);
        }
    }

    #[test]
    fn test_lzw_empty() {
        let params = FilterParams::default();
        let encoded = Lzw.encode(&[], &params).unwrap();
        assert!(Lzw.decode(&encoded, &params).unwrap().is_empty());
    }

    #[test]
    fn test_out_of_range_code() {
        // Clear code (256) followed by code 300 before any entry exists.
        let data = [0x80, 0x4B, 0x00, 0x00];
        let err = Lzw.decode(&data, &FilterParams::default()).unwrap_err();
        assert!(matches!(
            err,
            FilterError::Malformed { codec: FilterKind::Lzw, stage: Stage::Decode, .. }
        ));
    }
}
