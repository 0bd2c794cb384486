//! # pdf_graph
//!
//! The object layer of the PDF file format: a tokenizer for its textual
//! object syntax, an indirect-object graph with reference resolution, the
//! stream filter pipeline, and counted trees such as the page tree.
//!
//! ## Key Features
//!
//! - **Tokenizer**: every primitive (numbers, names, strings, arrays,
//!   dictionaries, references, streams) parsed from a positioned byte cursor
//!   with byte offsets in every error
//! - **Object graph**: `(number, generation)` identities, strict or permissive
//!   generation handling, a bounded hop count for reference chains, and
//!   export between graphs
//! - **Filters**: Flate, LZW, ASCIIHex, ASCII85 and RunLength codecs, with
//!   TIFF and PNG predictors, composed into chains that round-trip
//! - **Counted trees**: append, insert, indexed lookup and in-order traversal
//!   that keep every node's `/Count` exact
//! - **No Unsafe Code**
//!
//! ## Quick Start
//!
//! ```rust
//! use pdf_graph::{from_slice, to_string, Object};
//!
//! let value = from_slice(b"<< /Type /Page /MediaBox [0 0 612 792] /Parent 3 0 R >>").unwrap();
//! let dict = value.as_dict().unwrap();
//! assert_eq!(dict.type_name(), Some("Page"));
//! assert!(dict.get("Parent").unwrap().is_reference());
//!
//! assert_eq!(
//!     to_string(&value).unwrap(),
//!     "<< /Type /Page /MediaBox [0 0 612 792] /Parent 3 0 R >>"
//! );
//! ```
//!
//! ### Graphs and streams
//!
//! ```rust
//! use pdf_graph::filter::{FilterChain, FilterKind, FilterParams};
//! use pdf_graph::{Dictionary, ObjectGraph, Options, Stream};
//!
//! let mut graph = ObjectGraph::new();
//! let mut content = Stream::new(b"0 0 m 100 100 l S".to_vec(), Dictionary::new());
//! content
//!     .set_filters(
//!         FilterChain::new().with(FilterKind::Flate, FilterParams::default()),
//!         &Options::default(),
//!     )
//!     .unwrap();
//! let handle = graph.add(content).unwrap();
//!
//! let bytes = graph.to_bytes(&Default::default()).unwrap();
//! let mut reread = ObjectGraph::new();
//! reread.parse_objects(&bytes).unwrap();
//!
//! let mut stream = reread.resolve(handle.reference).unwrap().as_stream().unwrap().clone();
//! assert_eq!(stream.data(reread.options()).unwrap(), b"0 0 m 100 100 l S");
//! ```
//!
//! ### Page trees
//!
//! ```rust
//! use pdf_graph::{CountedTree, Dictionary, ObjectGraph};
//!
//! let mut graph = ObjectGraph::new();
//! let mut tree = CountedTree::new(&mut graph);
//! let root = tree.new_node().unwrap();
//! let pages: Vec<_> = (0..3)
//!     .map(|_| tree.new_leaf(Dictionary::new()).unwrap())
//!     .collect();
//! tree.append(root, &pages).unwrap();
//! assert_eq!(tree.count(root).unwrap(), 3);
//! assert_eq!(tree.get(root, 3).unwrap(), pages[2]);
//! ```
//!
//! ## Configuration
//!
//! Resolution and decoding behaviour is controlled by [`Options`], an
//! immutable record carried by each graph and passed to stream decoding.
//! There is no global state.
//!
//! ## Logging
//!
//! State changes and permissive recoveries are reported through `tracing`
//! events; install a subscriber to see them.
//!
//! ## Syntax
//!
//! See the [`syntax`] module for the object syntax this crate reads and
//! writes.

pub mod error;
pub mod filter;
pub mod graph;
pub mod lexer;
pub mod macros;
pub mod map;
pub mod name;
pub mod number;
pub mod options;
pub mod ser;
pub mod stream;
pub mod string;
pub mod syntax;
pub mod tree;
pub mod value;

pub use error::{Error, FilterError, Result, Stage};
pub use graph::{GraphId, Handle, IndirectObject, ObjectGraph, Validator};
pub use map::Dictionary;
pub use name::Name;
pub use number::{Number, NumberKind};
pub use options::{Options, ReferenceMode, WriteOptions};
pub use ser::Serializer;
pub use stream::Stream;
pub use string::{PdfString, StringFormat};
pub use tree::{ChildKind, CountedTree, Leaves, PageTreeLayout, TreeLayout};
pub use value::{Object, Reference};

use lexer::Cursor;

/// Parses one value at the cursor, returning it with the number of bytes
/// consumed.
///
/// # Examples
///
/// ```rust
/// use pdf_graph::lexer::Cursor;
/// use pdf_graph::{parse_primitive, Object};
///
/// let mut cursor = Cursor::new(b"(Hello) 42");
/// let (value, consumed) = parse_primitive(&mut cursor).unwrap();
/// assert_eq!(value.as_string().unwrap().as_bytes(), b"Hello");
/// assert_eq!(consumed, 7);
/// assert_eq!(parse_primitive(&mut cursor).unwrap().0, Object::from(42));
/// ```
///
/// # Errors
///
/// Returns a token error if the bytes do not form a value; the cursor is
/// left where it was.
pub fn parse_primitive(cursor: &mut Cursor<'_>) -> Result<(Object, usize)> {
    cursor.parse_primitive()
}

/// Parses a buffer holding exactly one value.
///
/// # Examples
///
/// ```rust
/// use pdf_graph::{from_slice, Number, Object};
///
/// assert_eq!(from_slice(b" 3.1400 ").unwrap(), Object::Number(Number::Real(3.14)));
/// assert!(from_slice(b"1 2").is_err());
/// ```
///
/// # Errors
///
/// Fails if the bytes are not a value or if anything but whitespace and
/// comments follows it.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_slice(bytes: &[u8]) -> Result<Object> {
    let mut cursor = Cursor::new(bytes);
    let value = cursor.parse_object()?;
    cursor.skip_whitespace();
    if cursor.is_eof() {
        Ok(value)
    } else {
        Err(Error::syntax(cursor.position(), "trailing data after value"))
    }
}

/// Serializes a value in compact layout.
///
/// # Errors
///
/// Fails if a stream's logical data cannot be encoded through its filters.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_vec(value: &Object) -> Result<Vec<u8>> {
    ser::to_vec_with_options(value, &WriteOptions::default())
}

/// Serializes a value in compact layout as text.
///
/// # Examples
///
/// ```rust
/// use pdf_graph::{pdf, to_string};
///
/// let kids = pdf!([ref 4 0, ref 5 0]);
/// assert_eq!(to_string(&kids).unwrap(), "[4 0 R 5 0 R]");
/// ```
///
/// # Errors
///
/// Fails if the output is not valid UTF-8 (binary strings or stream data), or
/// if a stream cannot be encoded.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string(value: &Object) -> Result<String> {
    to_string_with_options(value, &WriteOptions::default())
}

/// Serializes a value with one dictionary entry per line.
///
/// # Errors
///
/// As [`to_string`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_pretty(value: &Object) -> Result<String> {
    to_string_with_options(value, &WriteOptions::pretty())
}

/// Serializes a value as text with explicit layout options.
///
/// # Errors
///
/// As [`to_string`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_with_options(value: &Object, options: &WriteOptions) -> Result<String> {
    let bytes = ser::to_vec_with_options(value, options)?;
    String::from_utf8(bytes).map_err(|e| Error::custom(format!("output is not UTF-8: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_slice_rejects_trailing_data() {
        assert!(matches!(from_slice(b"/A /B"), Err(Error::Syntax { offset: 3, .. })));
        assert_eq!(from_slice(b"/A % comment\n").unwrap(), Object::Name(Name::new("A")));
    }

    #[test]
    fn test_to_string_round_trip() {
        let source = "<< /Kids [1 0 R 2 0 R] /Count 2 /Title (A \\(nested\\) title) >>";
        let value = from_slice(source.as_bytes()).unwrap();
        let text = to_string(&value).unwrap();
        assert_eq!(from_slice(text.as_bytes()).unwrap(), value);
    }

    #[test]
    fn test_to_string_rejects_binary() {
        let value = Object::String(PdfString::literal(vec![0xFF, 0xFE]));
        assert!(to_string(&value).is_err());
        assert!(to_vec(&value).is_ok());
    }
}
