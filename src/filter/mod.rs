//! Stream codecs and the chains that apply them.
//!
//! Every codec is a pure pair of functions over byte buffers, configured by
//! [`FilterParams`]. A [`FilterChain`] decodes in declaration order and
//! encodes in reverse, so `decode(encode(b)) == b` for every supported chain.
//!
//! | Name | Codec | Encodes |
//! |---|---|---|
//! | `/FlateDecode` (`/Fl`) | zlib via `flate2` | yes |
//! | `/LZWDecode` (`/LZW`) | LZW via `weezl`, early change configurable | yes |
//! | `/ASCIIHexDecode` (`/AHx`) | hex text | yes |
//! | `/ASCII85Decode` (`/A85`) | base-85 text | yes |
//! | `/RunLengthDecode` (`/RL`) | run-length | yes |
//!
//! Flate and LZW also apply the TIFF or PNG predictor named by their
//! parameters.
//!
//! ## Examples
//!
//! ```rust
//! use pdf_graph::filter::{FilterChain, FilterKind, FilterParams};
//! use pdf_graph::Options;
//!
//! let chain = FilterChain::new()
//!     .with(FilterKind::Ascii85, FilterParams::default())
//!     .with(FilterKind::Flate, FilterParams::default());
//!
//! let data = b"0123456789".repeat(100);
//! let raw = chain.encode(&data).unwrap();
//! assert!(raw.ends_with(b"~>"));
//! assert_eq!(chain.decode(&raw, &Options::default()).unwrap(), data);
//! ```

mod ascii85;
mod ascii_hex;
mod chain;
mod flate;
mod lzw;
mod params;
pub mod predictor;
mod run_length;

pub use ascii85::Ascii85;
pub use ascii_hex::AsciiHex;
pub use chain::FilterChain;
pub use flate::Flate;
pub use lzw::Lzw;
pub use params::FilterParams;
pub use run_length::RunLength;

use crate::error::FilterError;
use crate::Options;
use std::fmt;

/// The codecs this crate implements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterKind {
    Flate,
    Lzw,
    AsciiHex,
    Ascii85,
    RunLength,
}

impl FilterKind {
    /// Looks a filter up by its full or abbreviated name.
    ///
    /// ```rust
    /// use pdf_graph::filter::FilterKind;
    ///
    /// assert_eq!(FilterKind::from_name("FlateDecode"), Some(FilterKind::Flate));
    /// assert_eq!(FilterKind::from_name("AHx"), Some(FilterKind::AsciiHex));
    /// assert_eq!(FilterKind::from_name("DCTDecode"), None);
    /// ```
    #[must_use]
    pub fn from_name(name: &str) -> Option<FilterKind> {
        match name {
            "FlateDecode" | "Fl" => Some(FilterKind::Flate),
            "LZWDecode" | "LZW" => Some(FilterKind::Lzw),
            "ASCIIHexDecode" | "AHx" => Some(FilterKind::AsciiHex),
            "ASCII85Decode" | "A85" => Some(FilterKind::Ascii85),
            "RunLengthDecode" | "RL" => Some(FilterKind::RunLength),
            _ => None,
        }
    }

    /// The full name used in `/Filter` entries.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            FilterKind::Flate => "FlateDecode",
            FilterKind::Lzw => "LZWDecode",
            FilterKind::AsciiHex => "ASCIIHexDecode",
            FilterKind::Ascii85 => "ASCII85Decode",
            FilterKind::RunLength => "RunLengthDecode",
        }
    }

    /// Whether the codec reads predictor parameters.
    #[must_use]
    pub const fn accepts_predictor(self) -> bool {
        matches!(self, FilterKind::Flate | FilterKind::Lzw)
    }

    /// The codec for this kind, configured from `options`.
    #[must_use]
    pub fn codec(self, options: &Options) -> Box<dyn Codec> {
        match self {
            FilterKind::Flate => Box::new(Flate {
                recover_partial: options.ignore_compression_errors,
            }),
            FilterKind::Lzw => Box::new(Lzw),
            FilterKind::AsciiHex => Box::new(AsciiHex),
            FilterKind::Ascii85 => Box::new(Ascii85),
            FilterKind::RunLength => Box::new(RunLength),
        }
    }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A stateless stream codec.
///
/// `decode(encode(data, p), p)` must return `data` for every buffer and every
/// parameter record the codec accepts.
pub trait Codec: fmt::Debug {
    fn kind(&self) -> FilterKind;

    fn encode(&self, data: &[u8], params: &FilterParams) -> Result<Vec<u8>, FilterError>;

    fn decode(&self, data: &[u8], params: &FilterParams) -> Result<Vec<u8>, FilterError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip() {
        for kind in [
            FilterKind::Flate,
            FilterKind::Lzw,
            FilterKind::AsciiHex,
            FilterKind::Ascii85,
            FilterKind::RunLength,
        ] {
            assert_eq!(FilterKind::from_name(kind.name()), Some(kind));
            assert_eq!(kind.codec(&Options::default()).kind(), kind);
        }
    }
}
