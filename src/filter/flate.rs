//! `/FlateDecode`: zlib compression.

use super::{predictor, Codec, FilterKind, FilterParams};
use crate::error::{FilterError, Stage};
use flate2::read::ZlibEncoder;
use flate2::{Compression, Decompress, FlushDecompress, Status};
use std::io::Read;

/// zlib codec.
///
/// With `recover_partial` set, a corrupt stream decodes to whatever was
/// inflated before the error instead of failing.
#[derive(Debug, Clone, Copy, Default)]
pub struct Flate {
    pub recover_partial: bool,
}

impl Codec for Flate {
    fn kind(&self) -> FilterKind {
        FilterKind::Flate
    }

    fn encode(&self, data: &[u8], params: &FilterParams) -> Result<Vec<u8>, FilterError> {
        let predicted = predictor::encode(FilterKind::Flate, data, params)?;
        let mut encoder = ZlibEncoder::new(predicted.as_slice(), Compression::default());
        let mut compressed = Vec::new();
        encoder
            .read_to_end(&mut compressed)
            .map_err(|e| FilterError::malformed(FilterKind::Flate, Stage::Encode, e))?;
        Ok(compressed)
    }

    fn decode(&self, data: &[u8], params: &FilterParams) -> Result<Vec<u8>, FilterError> {
        let (inflated, failure) = inflate(data);
        if let Some(e) = failure {
            if !self.recover_partial {
                return Err(FilterError::malformed(FilterKind::Flate, Stage::Decode, e));
            }
            tracing::warn!(
                error = %e,
                recovered = inflated.len(),
                "corrupt Flate stream, keeping partially inflated data"
            );
        }
        predictor::decode(FilterKind::Flate, &inflated, params)
    }
}

/// Inflates until the end of the zlib stream, returning what was produced
/// and, if the stream is corrupt or cut short, why it stopped.
fn inflate(data: &[u8]) -> (Vec<u8>, Option<String>) {
    let mut decompress = Decompress::new(true);
    let mut out = Vec::with_capacity(data.len().saturating_mul(4).max(64));
    loop {
        if out.len() == out.capacity() {
            out.reserve(out.len().max(4096));
        }
        let consumed = decompress.total_in() as usize;
        let produced = decompress.total_out();
        match decompress.decompress_vec(&data[consumed..], &mut out, FlushDecompress::None) {
            Ok(Status::StreamEnd) => return (out, None),
            Ok(_) => {
                let progressed =
                    decompress.total_in() as usize > consumed || decompress.total_out() > produced;
                if !progressed {
                    return (out, Some("unexpected end of compressed data".to_string()));
                }
            }
            Err(e) => return (out, Some(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flate_round_trip() {
        let original = b"Hello, Flate! Hello, Flate! Hello, Flate! Hello, Flate!";
        let params = FilterParams::default();
        let compressed = Flate::default().encode(original, &params).unwrap();
        assert!(compressed.len() < original.len());
        assert_eq!(Flate::default().decode(&compressed, &params).unwrap(), original);
    }

    #[test]
    fn test_flate_empty() {
        let params = FilterParams::default();
        let compressed = Flate::default().encode(&[], &params).unwrap();
        assert!(Flate::default().decode(&compressed, &params).unwrap().is_empty());
    }

    #[test]
    fn test_corrupt_stream() {
        let params = FilterParams::default();
        let data = b"0123456789".repeat(200);
        let mut compressed = Flate::default().encode(&data, &params).unwrap();
        let cut = compressed.len() / 2;
        compressed.truncate(cut);

        let strict = Flate::default().decode(&compressed, &params).unwrap_err();
        assert_eq!(strict.codec(), FilterKind::Flate);

        let recovered = Flate { recover_partial: true }
            .decode(&compressed, &params)
            .unwrap();
        assert!(data.starts_with(&recovered));
    }
}
