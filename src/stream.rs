//! Streams: a dictionary plus a byte payload.
//!
//! A [`Stream`] holds its payload in two forms. The *raw* bytes are what the
//! file stores, after every filter in `/Filter` has been applied. The
//! *logical* data is what an application reads. Exactly one form is
//! authoritative at a time: setting one drops the other, which is recomputed
//! through the filter chain the next time it is asked for.
//!
//! ## Examples
//!
//! ```rust
//! use pdf_graph::filter::{FilterChain, FilterKind, FilterParams};
//! use pdf_graph::{Dictionary, Options, Stream};
//!
//! let mut stream = Stream::new(b"BT /F1 12 Tf ET".to_vec(), Dictionary::new());
//! stream.set_filters(
//!     FilterChain::new().with(FilterKind::Flate, FilterParams::default()),
//!     &Options::default(),
//! ).unwrap();
//!
//! let raw = stream.raw().unwrap().to_vec();
//! assert_ne!(raw, b"BT /F1 12 Tf ET");
//!
//! let mut parsed = Stream::from_raw(stream.dict().clone(), raw);
//! assert_eq!(parsed.data(&Options::default()).unwrap(), b"BT /F1 12 Tf ET");
//! ```

use crate::filter::{FilterChain, FilterParams};
use crate::{Dictionary, Error, Object, Options, Result};
use std::borrow::Cow;

/// A stream object.
#[derive(Debug, Clone)]
pub struct Stream {
    dict: Dictionary,
    raw: Option<Vec<u8>>,
    data: Option<Vec<u8>>,
}

impl Stream {
    /// Creates a stream from logical data; the raw bytes are produced on demand.
    #[must_use]
    pub fn new(data: Vec<u8>, dict: Dictionary) -> Self {
        Stream {
            dict,
            raw: None,
            data: Some(data),
        }
    }

    /// Creates a stream from bytes as stored in a file.
    #[must_use]
    pub fn from_raw(mut dict: Dictionary, raw: Vec<u8>) -> Self {
        dict.insert("Length", raw.len());
        Stream {
            dict,
            raw: Some(raw),
            data: None,
        }
    }

    #[inline]
    #[must_use]
    pub fn dict(&self) -> &Dictionary {
        &self.dict
    }

    /// Mutable access to the dictionary.
    ///
    /// Changing `/Filter` or `/DecodeParms` here does not re-encode the
    /// payload; use [`Stream::set_filters`] for that.
    #[inline]
    pub fn dict_mut(&mut self) -> &mut Dictionary {
        &mut self.dict
    }

    /// The filter chain declared by the dictionary.
    pub fn filters(&self) -> Result<FilterChain> {
        FilterChain::from_dict(&self.dict)
    }

    /// The logical data, decoding the raw bytes if they are authoritative.
    pub fn data(&mut self, options: &Options) -> Result<&[u8]> {
        if self.data.is_none() {
            let raw = self.raw.as_deref().unwrap_or_default();
            let decoded = self.filters()?.decode(raw, options)?;
            self.data = Some(decoded);
        }
        Ok(self.data.as_deref().unwrap_or_default())
    }

    /// The raw bytes, encoding the logical data if it is authoritative.
    pub fn raw(&mut self) -> Result<&[u8]> {
        if self.raw.is_none() {
            let encoded = self.encoded()?.into_owned();
            self.dict.insert("Length", encoded.len());
            self.raw = Some(encoded);
        }
        Ok(self.raw.as_deref().unwrap_or_default())
    }

    /// The raw bytes without caching them.
    pub(crate) fn encoded(&self) -> Result<Cow<'_, [u8]>> {
        match (&self.raw, &self.data) {
            (Some(raw), _) => Ok(Cow::Borrowed(raw)),
            (None, Some(data)) => Ok(Cow::Owned(self.filters()?.encode(data)?)),
            (None, None) => Ok(Cow::Borrowed(&[])),
        }
    }

    /// Replaces the logical data. The raw bytes become stale.
    pub fn set_data(&mut self, data: Vec<u8>) {
        self.data = Some(data);
        self.raw = None;
    }

    /// Replaces the raw bytes. The logical data becomes stale.
    pub fn set_raw(&mut self, raw: Vec<u8>) {
        self.dict.insert("Length", raw.len());
        self.raw = Some(raw);
        self.data = None;
    }

    /// Whether the raw bytes are the authoritative form.
    #[must_use]
    pub fn is_raw_authoritative(&self) -> bool {
        self.raw.is_some() && self.data.is_none()
    }

    /// Re-encodes the payload under a new filter chain.
    ///
    /// The current logical data is decoded first, so this fails if the
    /// existing raw bytes do not decode.
    pub fn set_filters(&mut self, chain: FilterChain, options: &Options) -> Result<()> {
        let data = self.data(options)?.to_vec();
        chain.write_to(&mut self.dict);
        self.set_data(data);
        Ok(())
    }

    /// Sets predictor parameters on the first Flate or LZW filter of the chain.
    ///
    /// # Errors
    ///
    /// Fails when the chain has no filter that takes a predictor.
    pub fn set_predictor(
        &mut self,
        predictor: u8,
        colors: usize,
        bits_per_component: usize,
        columns: usize,
        options: &Options,
    ) -> Result<()> {
        let mut chain = self.filters()?;
        let (_, params) = chain
            .params_mut()
            .find(|(kind, _)| kind.accepts_predictor())
            .ok_or_else(|| Error::custom("no Flate or LZW filter to attach a predictor to"))?;
        *params = FilterParams {
            predictor,
            colors,
            bits_per_component,
            columns,
            ..*params
        };
        self.set_filters(chain, options)
    }
}

/// Streams are equal when their dictionaries match (ignoring `/Length`) and
/// they agree on a payload form both have at hand.
impl PartialEq for Stream {
    fn eq(&self, other: &Self) -> bool {
        let without_length = |d: &Dictionary| {
            d.iter()
                .filter(|(k, _)| k.as_str() != "Length")
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect::<Dictionary>()
        };
        if without_length(&self.dict) != without_length(&other.dict) {
            return false;
        }
        match (&self.raw, &other.raw, &self.data, &other.data) {
            (Some(a), Some(b), _, _) => a == b,
            (_, _, Some(a), Some(b)) => a == b,
            _ => false,
        }
    }
}

impl TryFrom<Object> for Stream {
    type Error = Error;

    fn try_from(value: Object) -> Result<Self> {
        match value {
            Object::Stream(s) => Ok(s),
            other => Err(Error::custom(format!(
                "expected stream, found {}",
                other.type_name()
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::FilterKind;
    use crate::Name;

    #[test]
    fn test_raw_is_authoritative_after_parse() {
        let mut dict = Dictionary::new();
        dict.insert("Filter", Name::new("ASCIIHexDecode"));
        let mut stream = Stream::from_raw(dict, b"48 69>".to_vec());
        assert!(stream.is_raw_authoritative());
        assert_eq!(stream.data(&Options::default()).unwrap(), b"Hi");
        assert_eq!(stream.dict().get("Length").and_then(Object::as_i64), Some(6));
    }

    #[test]
    fn test_set_data_invalidates_raw() {
        let mut dict = Dictionary::new();
        dict.insert("Filter", Name::new("AHx"));
        let mut stream = Stream::from_raw(dict, b"41>".to_vec());
        stream.set_data(b"BC".to_vec());
        assert_eq!(stream.raw().unwrap(), b"4243>");
        assert_eq!(stream.dict().get("Length").and_then(Object::as_i64), Some(5));
    }

    #[test]
    fn test_set_predictor() {
        let data: Vec<u8> = (0..64).collect();
        let mut stream = Stream::new(data.clone(), Dictionary::new());
        let options = Options::default();
        assert!(stream.set_predictor(12, 1, 8, 8, &options).is_err());

        stream
            .set_filters(
                FilterChain::new().with(FilterKind::Flate, FilterParams::default()),
                &options,
            )
            .unwrap();
        stream.set_predictor(12, 1, 8, 8, &options).unwrap();
        let parms = stream.dict().get("DecodeParms").and_then(Object::as_dict).unwrap();
        assert_eq!(parms.get("Predictor").and_then(Object::as_i64), Some(12));

        let raw = stream.raw().unwrap().to_vec();
        let mut reparsed = Stream::from_raw(stream.dict().clone(), raw);
        assert_eq!(reparsed.data(&options).unwrap(), data.as_slice());
    }

    #[test]
    fn test_bad_raw_bytes_fail_to_decode() {
        let mut dict = Dictionary::new();
        dict.insert("Filter", Name::new("FlateDecode"));
        let mut stream = Stream::from_raw(dict, b"not zlib".to_vec());
        let err = stream.data(&Options::default()).unwrap_err();
        assert!(matches!(err, Error::Filter(_)));
    }
}
