//! Name atoms (`/Type`, `/Filter`, ...).
//!
//! A [`Name`] is an immutable, cheaply cloned atom. Names are compared by
//! content and can be looked up by `&str` in a [`Dictionary`](crate::Dictionary).
//!
//! ## Examples
//!
//! ```rust
//! use pdf_graph::Name;
//!
//! let name = Name::new("A B");
//! assert_eq!(name.as_str(), "A B");
//! assert_eq!(name.to_string(), "/A#20B");
//! ```

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

/// A name atom. Stored without the leading solidus and with `#xx` escapes decoded.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Name(Arc<str>);

impl Name {
    #[must_use]
    pub fn new(name: &str) -> Self {
        Name(Arc::from(name))
    }

    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Decodes the raw bytes following a `/`, expanding `#xx` escapes.
    ///
    /// Returns `None` if an escape is not followed by two hex digits.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pdf_graph::Name;
    ///
    /// assert_eq!(Name::from_escaped(b"Lime#20Green").unwrap().as_str(), "Lime Green");
    /// assert!(Name::from_escaped(b"Bad#2").is_none());
    /// ```
    #[must_use]
    pub fn from_escaped(raw: &[u8]) -> Option<Self> {
        let mut bytes = Vec::with_capacity(raw.len());
        let mut i = 0;
        while i < raw.len() {
            if raw[i] == b'#' {
                let hi = hex_value(*raw.get(i + 1)?)?;
                let lo = hex_value(*raw.get(i + 2)?)?;
                bytes.push((hi << 4) | lo);
                i += 3;
            } else {
                bytes.push(raw[i]);
                i += 1;
            }
        }
        Some(Name::new(&String::from_utf8_lossy(&bytes)))
    }

    /// Bytes of the name as written in a file, including the leading `/`.
    #[must_use]
    pub fn to_escaped(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.0.len() + 1);
        out.push(b'/');
        for &b in self.0.as_bytes() {
            if needs_escape(b) {
                out.push(b'#');
                out.push(HEX_DIGITS[(b >> 4) as usize]);
                out.push(HEX_DIGITS[(b & 0x0F) as usize]);
            } else {
                out.push(b);
            }
        }
        out
    }
}

const HEX_DIGITS: &[u8; 16] = b"0123456789ABCDEF";

fn hex_value(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

fn needs_escape(b: u8) -> bool {
    !(b'!'..=b'~').contains(&b) || b == b'#' || crate::lexer::is_delimiter(b)
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}", self.0)
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(&self.to_escaped()))
    }
}

impl Borrow<str> for Name {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Name {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Name {
    fn from(value: &str) -> Self {
        Name::new(value)
    }
}

impl From<String> for Name {
    fn from(value: String) -> Self {
        Name(Arc::from(value))
    }
}

impl PartialEq<str> for Name {
    fn eq(&self, other: &str) -> bool {
        &*self.0 == other
    }
}

impl PartialEq<&str> for Name {
    fn eq(&self, other: &&str) -> bool {
        &*self.0 == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_roundtrip() {
        let name = Name::new("Weird(Name)#1");
        let escaped = name.to_escaped();
        assert_eq!(escaped, b"/Weird#28Name#29#231");
        assert_eq!(Name::from_escaped(&escaped[1..]), Some(name));
    }

    #[test]
    fn test_plain_name_is_not_escaped() {
        assert_eq!(Name::new("FlateDecode").to_string(), "/FlateDecode");
    }

    #[test]
    fn test_compare_with_str() {
        let name = Name::from("Page");
        assert_eq!(name, "Page");
        assert!(Name::new("A") < Name::new("B"));
    }

    #[test]
    fn test_serde_as_plain_string() {
        let name = Name::new("MediaBox");
        assert_eq!(serde_json::to_string(&name).unwrap(), "\"MediaBox\"");
        let back: Name = serde_json::from_str("\"MediaBox\"").unwrap();
        assert_eq!(back, name);
    }
}
