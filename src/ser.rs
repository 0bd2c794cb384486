//! Serialization of objects back into the textual object syntax.
//!
//! The [`Serializer`] writes bytes, not text: strings and stream payloads may
//! hold arbitrary binary data.
//!
//! ## Usage
//!
//! Most users should use the high-level functions in the crate root:
//!
//! ```rust
//! use pdf_graph::{pdf, to_string, to_string_pretty};
//!
//! let page = pdf!({ "Type" => name "Page", "Rotate" => 90 });
//! assert_eq!(to_string(&page).unwrap(), "<< /Type /Page /Rotate 90 >>");
//! assert_eq!(
//!     to_string_pretty(&page).unwrap(),
//!     "<<\n  /Type /Page\n  /Rotate 90\n>>"
//! );
//! ```
//!
//! ## Direct Serializer Usage
//!
//! ```rust
//! use pdf_graph::{IndirectObject, Object, Reference, Serializer, WriteOptions};
//!
//! let mut serializer = Serializer::new(WriteOptions::new());
//! serializer
//!     .write_indirect(&IndirectObject::new(Reference::new(4, 0), Object::from(1.50)))
//!     .unwrap();
//! assert_eq!(serializer.into_inner(), b"4 0 obj\n1.5\nendobj\n");
//! ```

use crate::graph::IndirectObject;
use crate::number::format_real;
use crate::{Dictionary, Number, Object, PdfString, Result, StringFormat, WriteOptions};

/// Writes objects in the object syntax.
pub struct Serializer {
    output: Vec<u8>,
    options: WriteOptions,
    indent_level: usize,
}

impl Serializer {
    pub fn new(options: WriteOptions) -> Self {
        Serializer {
            output: Vec::with_capacity(256),
            options,
            indent_level: 0,
        }
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.output
    }

    fn write_newline(&mut self) {
        self.output.push(b'\n');
        let width = self.indent_level * self.options.indent;
        self.output.extend(std::iter::repeat(b' ').take(width));
    }

    /// Writes one value.
    ///
    /// # Errors
    ///
    /// Fails only when a stream whose logical data is authoritative cannot be
    /// encoded through its filters.
    pub fn write_object(&mut self, value: &Object) -> Result<()> {
        match value {
            Object::Null => self.output.extend_from_slice(b"null"),
            Object::Boolean(true) => self.output.extend_from_slice(b"true"),
            Object::Boolean(false) => self.output.extend_from_slice(b"false"),
            Object::Number(Number::Integer(i)) => {
                self.output.extend_from_slice(i.to_string().as_bytes());
            }
            Object::Number(Number::Real(r)) => {
                self.output.extend_from_slice(format_real(*r).as_bytes());
            }
            Object::Name(name) => self.output.extend_from_slice(&name.to_escaped()),
            Object::String(s) => self.write_string(s),
            Object::Array(items) => {
                self.output.push(b'[');
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        self.output.push(b' ');
                    }
                    self.write_object(item)?;
                }
                self.output.push(b']');
            }
            Object::Dictionary(dict) => self.write_dictionary(dict)?,
            Object::Stream(stream) => {
                let raw = stream.encoded()?;
                let mut dict = stream.dict().clone();
                dict.insert("Length", raw.len());
                self.write_dictionary(&dict)?;
                self.output.extend_from_slice(b"\nstream\n");
                self.output.extend_from_slice(&raw);
                self.output.extend_from_slice(b"\nendstream");
            }
            Object::Reference(r) => self.output.extend_from_slice(r.to_string().as_bytes()),
        }
        Ok(())
    }

    fn write_dictionary(&mut self, dict: &Dictionary) -> Result<()> {
        if dict.is_empty() {
            self.output.extend_from_slice(b"<< >>");
            return Ok(());
        }

        self.output.extend_from_slice(b"<<");
        self.indent_level += 1;
        for (key, value) in dict {
            if self.options.pretty {
                self.write_newline();
            } else {
                self.output.push(b' ');
            }
            self.output.extend_from_slice(&key.to_escaped());
            self.output.push(b' ');
            self.write_object(value)?;
        }
        self.indent_level -= 1;
        if self.options.pretty {
            self.write_newline();
        } else {
            self.output.push(b' ');
        }
        self.output.extend_from_slice(b">>");
        Ok(())
    }

    fn write_string(&mut self, s: &PdfString) {
        match s.format() {
            StringFormat::Hex => {
                self.output.push(b'<');
                for b in s.as_bytes() {
                    self.output
                        .extend_from_slice(format!("{b:02X}").as_bytes());
                }
                self.output.push(b'>');
            }
            StringFormat::Literal => {
                self.output.push(b'(');
                for &b in s.as_bytes() {
                    match b {
                        b'(' | b')' | b'\\' => {
                            self.output.push(b'\\');
                            self.output.push(b);
                        }
                        b'\n' => self.output.extend_from_slice(b"\\n"),
                        b'\r' => self.output.extend_from_slice(b"\\r"),
                        b'\t' => self.output.extend_from_slice(b"\\t"),
                        b'\x08' => self.output.extend_from_slice(b"\\b"),
                        b'\x0C' => self.output.extend_from_slice(b"\\f"),
                        _ => self.output.push(b),
                    }
                }
                self.output.push(b')');
            }
        }
    }

    /// Writes `n g obj`, the value, and `endobj`, each on its own line.
    pub fn write_indirect(&mut self, object: &IndirectObject) -> Result<()> {
        let header = format!(
            "{} {} obj",
            object.reference.number, object.reference.generation
        );
        self.output.extend_from_slice(header.as_bytes());
        self.output.push(b'\n');
        self.write_object(&object.value)?;
        self.output.extend_from_slice(b"\nendobj\n");
        Ok(())
    }
}

/// Serializes one value with explicit layout options.
pub fn to_vec_with_options(value: &Object, options: &WriteOptions) -> Result<Vec<u8>> {
    let mut serializer = Serializer::new(*options);
    serializer.write_object(value)?;
    Ok(serializer.into_inner())
}
