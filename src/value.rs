//! Dynamic representation of every primitive value of the object format.
//!
//! ## Core Types
//!
//! - [`Object`]: null, boolean, number, name, string, array, dictionary, stream or reference
//! - [`Reference`]: an `(object number, generation)` key into an [`ObjectGraph`](crate::ObjectGraph)
//!
//! A [`Reference`] owns no data; it only means something relative to the graph
//! that resolves it.
//!
//! ## Usage Patterns
//!
//! ### Creating Values
//!
//! ```rust
//! use pdf_graph::{Object, Name, Reference};
//!
//! let null = Object::Null;
//! let flag = Object::from(true);
//! let count = Object::from(42);
//! let name = Object::from(Name::new("Page"));
//! let parent = Object::from(Reference::new(3, 0));
//!
//! use pdf_graph::pdf;
//! let dict = pdf!({ "Type" => name "Page", "Rotate" => 90 });
//! assert!(dict.is_dictionary());
//! ```
//!
//! ### Extracting Values
//!
//! ```rust
//! use pdf_graph::Object;
//!
//! let value = Object::from(42);
//! assert_eq!(value.as_i64(), Some(42));
//! assert_eq!(i64::try_from(value).unwrap(), 42);
//! ```

use crate::{Dictionary, Name, Number, PdfString, Stream};
use serde::{Serialize, Serializer};
use std::fmt;

/// An `(object number, generation)` pair naming an indirect object.
///
/// # Examples
///
/// ```rust
/// use pdf_graph::Reference;
///
/// let r = Reference::new(12, 0);
/// assert_eq!(r.to_string(), "12 0 R");
/// assert!(Reference::new(12, 1) > r);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Reference {
    pub number: u32,
    pub generation: u16,
}

impl Reference {
    #[must_use]
    pub const fn new(number: u32, generation: u16) -> Self {
        Reference { number, generation }
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} R", self.number, self.generation)
    }
}

/// Any value of the object format.
///
/// # Examples
///
/// ```rust
/// use pdf_graph::{Object, Number};
///
/// let num = Object::Number(Number::from(42));
/// let text = Object::from("hello");
///
/// assert!(num.is_number());
/// assert!(text.is_string());
/// assert!(Object::Null.is_null());
/// ```
#[derive(Clone, Debug, PartialEq, Default)]
pub enum Object {
    #[default]
    Null,
    Boolean(bool),
    Number(Number),
    Name(Name),
    String(PdfString),
    Array(Vec<Object>),
    Dictionary(Dictionary),
    Stream(Stream),
    Reference(Reference),
}

impl Object {
    /// Short name of the variant, used in diagnostics.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Object::Null => "null",
            Object::Boolean(_) => "boolean",
            Object::Number(Number::Integer(_)) => "integer",
            Object::Number(Number::Real(_)) => "real",
            Object::Name(_) => "name",
            Object::String(_) => "string",
            Object::Array(_) => "array",
            Object::Dictionary(_) => "dictionary",
            Object::Stream(_) => "stream",
            Object::Reference(_) => "reference",
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Object::Null)
    }

    #[inline]
    #[must_use]
    pub const fn is_bool(&self) -> bool {
        matches!(self, Object::Boolean(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_number(&self) -> bool {
        matches!(self, Object::Number(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_name(&self) -> bool {
        matches!(self, Object::Name(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_string(&self) -> bool {
        matches!(self, Object::String(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_array(&self) -> bool {
        matches!(self, Object::Array(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_dictionary(&self) -> bool {
        matches!(self, Object::Dictionary(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_stream(&self) -> bool {
        matches!(self, Object::Stream(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_reference(&self) -> bool {
        matches!(self, Object::Reference(_))
    }

    #[inline]
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Object::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_number(&self) -> Option<&Number> {
        match self {
            Object::Number(n) => Some(n),
            _ => None,
        }
    }

    /// If the value is an integer that fits in `i64`, returns it.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pdf_graph::Object;
    ///
    /// assert_eq!(Object::from(42).as_i64(), Some(42));
    /// assert_eq!(Object::from(42.0).as_i64(), None);
    /// ```
    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        self.as_number().and_then(Number::as_i64)
    }

    /// If the value is a number of either kind, returns it as `f64`.
    #[inline]
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        self.as_number().map(Number::as_f64)
    }

    #[inline]
    #[must_use]
    pub fn as_name(&self) -> Option<&Name> {
        match self {
            Object::Name(n) => Some(n),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_string(&self) -> Option<&PdfString> {
        match self {
            Object::String(s) => Some(s),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_array(&self) -> Option<&Vec<Object>> {
        match self {
            Object::Array(arr) => Some(arr),
            _ => None,
        }
    }

    #[inline]
    pub fn as_array_mut(&mut self) -> Option<&mut Vec<Object>> {
        match self {
            Object::Array(arr) => Some(arr),
            _ => None,
        }
    }

    /// The dictionary of a dictionary or of a stream.
    #[inline]
    #[must_use]
    pub fn as_dict(&self) -> Option<&Dictionary> {
        match self {
            Object::Dictionary(dict) => Some(dict),
            Object::Stream(stream) => Some(stream.dict()),
            _ => None,
        }
    }

    #[inline]
    pub fn as_dict_mut(&mut self) -> Option<&mut Dictionary> {
        match self {
            Object::Dictionary(dict) => Some(dict),
            Object::Stream(stream) => Some(stream.dict_mut()),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_stream(&self) -> Option<&Stream> {
        match self {
            Object::Stream(stream) => Some(stream),
            _ => None,
        }
    }

    #[inline]
    pub fn as_stream_mut(&mut self) -> Option<&mut Stream> {
        match self {
            Object::Stream(stream) => Some(stream),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_reference(&self) -> Option<Reference> {
        match self {
            Object::Reference(r) => Some(*r),
            _ => None,
        }
    }

    /// Calls `f` on every reference reachable inside this value without
    /// following any of them.
    pub fn for_each_reference(&self, f: &mut impl FnMut(Reference)) {
        match self {
            Object::Reference(r) => f(*r),
            Object::Array(items) => items.iter().for_each(|item| item.for_each_reference(f)),
            Object::Dictionary(dict) => dict.values().for_each(|v| v.for_each_reference(f)),
            Object::Stream(stream) => stream.dict().values().for_each(|v| v.for_each_reference(f)),
            _ => {}
        }
    }

    /// Rewrites every reference inside this value in place.
    pub fn map_references(&mut self, f: &mut impl FnMut(Reference) -> Reference) {
        match self {
            Object::Reference(r) => *r = f(*r),
            Object::Array(items) => items.iter_mut().for_each(|item| item.map_references(f)),
            Object::Dictionary(dict) => dict.values_mut().for_each(|v| v.map_references(f)),
            Object::Stream(stream) => stream
                .dict_mut()
                .values_mut()
                .for_each(|v| v.map_references(f)),
            _ => {}
        }
    }
}

impl fmt::Display for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bytes = crate::ser::to_vec_with_options(self, &crate::WriteOptions::default())
            .map_err(|_| fmt::Error)?;
        f.write_str(&String::from_utf8_lossy(&bytes))
    }
}

impl Serialize for Object {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Object::Null => serializer.serialize_unit(),
            Object::Boolean(b) => serializer.serialize_bool(*b),
            Object::Number(Number::Integer(i)) => match Number::Integer(i.clone()).as_i64() {
                Some(small) => serializer.serialize_i64(small),
                None => serializer.serialize_str(&i.to_string()),
            },
            Object::Number(Number::Real(r)) => serializer.serialize_f64(*r),
            Object::Name(n) => serializer.serialize_str(&n.to_string()),
            Object::String(s) => match s.as_str() {
                Some(text) => serializer.serialize_str(text),
                None => serializer.serialize_bytes(s.as_bytes()),
            },
            Object::Array(arr) => {
                use serde::ser::SerializeSeq;
                let mut seq = serializer.serialize_seq(Some(arr.len()))?;
                for element in arr {
                    seq.serialize_element(element)?;
                }
                seq.end()
            }
            Object::Dictionary(dict) => serialize_dict(dict, serializer),
            Object::Stream(stream) => serialize_dict(stream.dict(), serializer),
            Object::Reference(r) => serializer.serialize_str(&r.to_string()),
        }
    }
}

fn serialize_dict<S>(dict: &Dictionary, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    use serde::ser::SerializeMap;
    let mut map = serializer.serialize_map(Some(dict.len()))?;
    for (k, v) in dict.iter() {
        map.serialize_entry(k.as_str(), v)?;
    }
    map.end()
}

// TryFrom implementations for extracting values from Object
impl TryFrom<Object> for i64 {
    type Error = crate::Error;

    fn try_from(value: Object) -> crate::Result<Self> {
        value.as_i64().ok_or_else(|| {
            crate::Error::custom(format!("expected integer, found {}", value.type_name()))
        })
    }
}

impl TryFrom<Object> for f64 {
    type Error = crate::Error;

    fn try_from(value: Object) -> crate::Result<Self> {
        value.as_f64().ok_or_else(|| {
            crate::Error::custom(format!("expected number, found {}", value.type_name()))
        })
    }
}

impl TryFrom<Object> for bool {
    type Error = crate::Error;

    fn try_from(value: Object) -> crate::Result<Self> {
        value.as_bool().ok_or_else(|| {
            crate::Error::custom(format!("expected boolean, found {}", value.type_name()))
        })
    }
}

impl TryFrom<Object> for Name {
    type Error = crate::Error;

    fn try_from(value: Object) -> crate::Result<Self> {
        match value {
            Object::Name(n) => Ok(n),
            other => Err(crate::Error::custom(format!(
                "expected name, found {}",
                other.type_name()
            ))),
        }
    }
}

impl TryFrom<Object> for Dictionary {
    type Error = crate::Error;

    fn try_from(value: Object) -> crate::Result<Self> {
        match value {
            Object::Dictionary(d) => Ok(d),
            other => Err(crate::Error::custom(format!(
                "expected dictionary, found {}",
                other.type_name()
            ))),
        }
    }
}

// From implementations for creating Object from primitives
impl From<bool> for Object {
    fn from(value: bool) -> Self {
        Object::Boolean(value)
    }
}

macro_rules! number_into_object {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Object {
                fn from(value: $t) -> Self {
                    Object::Number(Number::from(value))
                }
            }
        )*
    };
}

number_into_object!(i8, i16, i32, i64, u8, u16, u32, u64, usize, f32, f64);

impl From<Number> for Object {
    fn from(value: Number) -> Self {
        Object::Number(value)
    }
}

impl From<Name> for Object {
    fn from(value: Name) -> Self {
        Object::Name(value)
    }
}

impl From<PdfString> for Object {
    fn from(value: PdfString) -> Self {
        Object::String(value)
    }
}

impl From<&str> for Object {
    fn from(value: &str) -> Self {
        Object::String(PdfString::literal(value))
    }
}

impl From<String> for Object {
    fn from(value: String) -> Self {
        Object::String(PdfString::literal(value))
    }
}

impl From<Vec<Object>> for Object {
    fn from(value: Vec<Object>) -> Self {
        Object::Array(value)
    }
}

impl From<Dictionary> for Object {
    fn from(value: Dictionary) -> Self {
        Object::Dictionary(value)
    }
}

impl From<Stream> for Object {
    fn from(value: Stream) -> Self {
        Object::Stream(value)
    }
}

impl From<Reference> for Object {
    fn from(value: Reference) -> Self {
        Object::Reference(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tryfrom_i64() {
        assert_eq!(i64::try_from(Object::from(42)).unwrap(), 42);
        assert!(i64::try_from(Object::from(42.0)).is_err());
        assert!(i64::try_from(Object::from("test")).is_err());
    }

    #[test]
    fn test_tryfrom_f64() {
        assert_eq!(f64::try_from(Object::from(3.5)).unwrap(), 3.5);
        assert_eq!(f64::try_from(Object::from(42)).unwrap(), 42.0);
        assert!(f64::try_from(Object::Null).is_err());
    }

    #[test]
    fn test_tryfrom_name() {
        let name = Name::try_from(Object::from(Name::new("Page"))).unwrap();
        assert_eq!(name, "Page");
        assert!(Name::try_from(Object::from("Page")).is_err());
    }

    #[test]
    fn test_reference_walk_and_rewrite() {
        let mut dict = Dictionary::new();
        dict.insert("Parent", Reference::new(1, 0));
        dict.insert(
            "Kids",
            vec![Object::from(Reference::new(2, 0)), Object::from(Reference::new(3, 0))],
        );
        let mut value = Object::from(dict);

        let mut seen = Vec::new();
        value.for_each_reference(&mut |r| seen.push(r.number));
        assert_eq!(seen, vec![1, 2, 3]);

        value.map_references(&mut |r| Reference::new(r.number + 10, r.generation));
        let mut rewritten = Vec::new();
        value.for_each_reference(&mut |r| rewritten.push(r.number));
        assert_eq!(rewritten, vec![11, 12, 13]);
    }

    #[test]
    fn test_serde_mapping() {
        let mut dict = Dictionary::new();
        dict.insert("Type", Name::new("Page"));
        dict.insert("Parent", Reference::new(1, 0));
        dict.insert("MediaBox", vec![Object::from(0), Object::from(612.5)]);
        let json = serde_json::to_value(Object::from(dict)).unwrap();
        assert_eq!(json["Type"], "/Page");
        assert_eq!(json["Parent"], "1 0 R");
        assert_eq!(json["MediaBox"][1], 612.5);
    }
}
