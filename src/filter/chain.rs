//! Ordered filter chains.

use super::{FilterKind, FilterParams};
use crate::error::FilterError;
use crate::{Dictionary, Error, Name, Object, Options, Result};

/// The filters of one stream, in `/Filter` order.
///
/// Decoding applies index 0 first; encoding applies the last filter first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterChain {
    filters: Vec<(FilterKind, FilterParams)>,
}

impl FilterChain {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a filter, builder style.
    #[must_use]
    pub fn with(mut self, kind: FilterKind, params: FilterParams) -> Self {
        self.push(kind, params);
        self
    }

    pub fn push(&mut self, kind: FilterKind, params: FilterParams) {
        self.filters.push((kind, params));
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.filters.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(FilterKind, FilterParams)> {
        self.filters.iter()
    }

    pub(crate) fn params_mut(&mut self) -> impl Iterator<Item = &mut (FilterKind, FilterParams)> {
        self.filters.iter_mut()
    }

    /// Runs every filter's decoder in chain order.
    pub fn decode(&self, raw: &[u8], options: &Options) -> std::result::Result<Vec<u8>, FilterError> {
        let mut data = raw.to_vec();
        for (kind, params) in &self.filters {
            data = kind.codec(options).decode(&data, params)?;
        }
        Ok(data)
    }

    /// Runs every filter's encoder in reverse chain order.
    pub fn encode(&self, data: &[u8]) -> std::result::Result<Vec<u8>, FilterError> {
        let options = Options::default();
        let mut raw = data.to_vec();
        for (kind, params) in self.filters.iter().rev() {
            raw = kind.codec(&options).encode(&raw, params)?;
        }
        Ok(raw)
    }

    /// Reads `/Filter` and `/DecodeParms` from a stream dictionary.
    ///
    /// Both may be a single value or an array. A `null` parameter entry
    /// means defaults.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pdf_graph::filter::{FilterChain, FilterKind};
    /// use pdf_graph::lexer::Cursor;
    ///
    /// let dict = Cursor::new(b"<< /Filter [/AHx /Fl] /DecodeParms [null << /Predictor 12 /Columns 4 >>] >>")
    ///     .parse_object()
    ///     .unwrap();
    /// let chain = FilterChain::from_dict(dict.as_dict().unwrap()).unwrap();
    /// let kinds: Vec<FilterKind> = chain.iter().map(|(kind, _)| *kind).collect();
    /// assert_eq!(kinds, vec![FilterKind::AsciiHex, FilterKind::Flate]);
    /// assert_eq!(chain.iter().nth(1).unwrap().1.predictor, 12);
    /// ```
    pub fn from_dict(dict: &Dictionary) -> Result<Self> {
        let names: Vec<&Name> = match dict.get("Filter") {
            None | Some(Object::Null) => Vec::new(),
            Some(Object::Name(name)) => vec![name],
            Some(Object::Array(items)) => items
                .iter()
                .map(|item| {
                    item.as_name()
                        .ok_or_else(|| Error::custom("/Filter array must hold names"))
                })
                .collect::<Result<_>>()?,
            Some(other) => {
                return Err(Error::custom(format!(
                    "/Filter must be a name or an array, found {}",
                    other.type_name()
                )))
            }
        };

        let params: Vec<Option<&Dictionary>> = match dict.get("DecodeParms") {
            None | Some(Object::Null) => vec![None; names.len()],
            Some(Object::Dictionary(d)) => vec![Some(d)],
            Some(Object::Array(items)) => items.iter().map(Object::as_dict).collect(),
            Some(other) => {
                return Err(Error::custom(format!(
                    "/DecodeParms must be a dictionary or an array, found {}",
                    other.type_name()
                )))
            }
        };

        let mut chain = FilterChain::new();
        for (i, name) in names.into_iter().enumerate() {
            let kind = FilterKind::from_name(name.as_str())
                .ok_or_else(|| Error::custom(format!("unsupported filter {name}")))?;
            let params = match params.get(i).copied().flatten() {
                Some(d) => FilterParams::from_dict(kind, d)?,
                None => FilterParams::default(),
            };
            chain.push(kind, params);
        }
        Ok(chain)
    }

    /// Writes `/Filter` and `/DecodeParms` into a stream dictionary, removing
    /// them when the chain is empty.
    pub fn write_to(&self, dict: &mut Dictionary) {
        dict.remove("Filter");
        dict.remove("DecodeParms");
        match self.filters.as_slice() {
            [] => {}
            [(kind, params)] => {
                dict.insert("Filter", Name::new(kind.name()));
                let parms = params.to_dict();
                if !parms.is_empty() {
                    dict.insert("DecodeParms", parms);
                }
            }
            filters => {
                let names = filters
                    .iter()
                    .map(|(kind, _)| Object::Name(Name::new(kind.name())))
                    .collect::<Vec<_>>();
                dict.insert("Filter", names);
                if filters.iter().any(|(_, p)| *p != FilterParams::default()) {
                    let parms = filters
                        .iter()
                        .map(|(_, p)| {
                            let d = p.to_dict();
                            if d.is_empty() {
                                Object::Null
                            } else {
                                Object::Dictionary(d)
                            }
                        })
                        .collect::<Vec<_>>();
                    dict.insert("DecodeParms", parms);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order() {
        let chain = FilterChain::new()
            .with(FilterKind::AsciiHex, FilterParams::default())
            .with(FilterKind::RunLength, FilterParams::default());
        let raw = chain.encode(b"aaaa").unwrap();
        // The outermost layer is the first filter.
        assert!(raw.ends_with(b">"));
        assert_eq!(chain.decode(&raw, &Options::default()).unwrap(), b"aaaa");
    }

    #[test]
    fn test_dictionary_round_trip() {
        let chain = FilterChain::new()
            .with(FilterKind::Ascii85, FilterParams::default())
            .with(FilterKind::Lzw, FilterParams::default().with_early_change(false));
        let mut dict = Dictionary::new();
        chain.write_to(&mut dict);
        assert_eq!(FilterChain::from_dict(&dict).unwrap(), chain);

        FilterChain::new().write_to(&mut dict);
        assert!(!dict.contains_key("Filter"));
        assert!(!dict.contains_key("DecodeParms"));
    }

    #[test]
    fn test_unknown_filter() {
        let mut dict = Dictionary::new();
        dict.insert("Filter", Name::new("JBIG2Decode"));
        assert!(FilterChain::from_dict(&dict).is_err());
    }
}
