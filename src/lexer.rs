//! Tokenizer and primitive parser over a positioned byte cursor.
//!
//! A [`Cursor`] is a byte slice plus a position. Every `parse_*` method first
//! skips whitespace (space, tab, CR, LF, form feed, NUL) and `%` comments,
//! then either consumes exactly one token and advances, or fails and leaves
//! the position where it was.
//!
//! ## Examples
//!
//! ```rust
//! use pdf_graph::lexer::Cursor;
//! use pdf_graph::{Number, Object};
//!
//! let mut cursor = Cursor::new(b"  123 3.1400 [/A (b)]");
//! let int = cursor.parse_integer().unwrap();
//! assert_eq!(int.value, Number::from(123));
//! assert_eq!(int.offset, 2);
//!
//! let real = cursor.parse_real().unwrap();
//! assert_eq!(real.value.to_string(), "3.14");
//!
//! let array = cursor.parse_object().unwrap();
//! assert!(array.is_array());
//! assert!(cursor.is_eof());
//! ```

use crate::graph::IndirectObject;
use crate::{Dictionary, Error, Name, Number, Object, PdfString, Reference, Result, Stream};
use num_bigint::BigInt;
use std::str::FromStr;

/// Containers nested deeper than this are rejected rather than recursed into.
const MAX_DEPTH: usize = 256;

/// A value together with the byte offset its token started at.
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned<T> {
    pub value: T,
    pub offset: usize,
}

/// Whitespace bytes of the object syntax.
#[inline]
pub fn is_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\r' | b'\n' | b'\x0C' | b'\0')
}

/// Bytes that end a name or keyword and start another token.
#[inline]
pub fn is_delimiter(b: u8) -> bool {
    matches!(
        b,
        b'(' | b')' | b'<' | b'>' | b'[' | b']' | b'{' | b'}' | b'/' | b'%'
    )
}

#[inline]
fn is_regular(b: u8) -> bool {
    !is_whitespace(b) && !is_delimiter(b)
}

/// A byte buffer and a read position.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    #[must_use]
    pub fn new(data: &'a [u8]) -> Self {
        Cursor { data, pos: 0 }
    }

    /// Starts reading at `pos` instead of the beginning of the buffer.
    #[must_use]
    pub fn at(data: &'a [u8], pos: usize) -> Self {
        Cursor {
            data,
            pos: pos.min(data.len()),
        }
    }

    #[inline]
    #[must_use]
    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn set_position(&mut self, pos: usize) {
        self.pos = pos.min(self.data.len());
    }

    #[inline]
    #[must_use]
    pub fn remaining(&self) -> &'a [u8] {
        &self.data[self.pos..]
    }

    #[inline]
    #[must_use]
    pub fn is_eof(&self) -> bool {
        self.pos >= self.data.len()
    }

    #[inline]
    fn peek(&self) -> Option<u8> {
        self.data.get(self.pos).copied()
    }

    #[inline]
    fn peek_at(&self, ahead: usize) -> Option<u8> {
        self.data.get(self.pos + ahead).copied()
    }

    #[inline]
    fn next_byte(&mut self) -> Option<u8> {
        let b = self.peek()?;
        self.pos += 1;
        Some(b)
    }

    fn starts_with(&self, token: &[u8]) -> bool {
        self.remaining().starts_with(token)
    }

    /// Skips whitespace and comments. A comment runs to the next CR or LF.
    pub fn skip_whitespace(&mut self) {
        while let Some(b) = self.peek() {
            if is_whitespace(b) {
                self.pos += 1;
            } else if b == b'%' {
                while let Some(c) = self.peek() {
                    if c == b'\r' || c == b'\n' {
                        break;
                    }
                    self.pos += 1;
                }
            } else {
                break;
            }
        }
    }

    fn skip_digits(&mut self) -> usize {
        let start = self.pos;
        while matches!(self.peek(), Some(b'0'..=b'9')) {
            self.pos += 1;
        }
        self.pos - start
    }

    fn skip_sign(&mut self) {
        if matches!(self.peek(), Some(b'+' | b'-')) {
            self.pos += 1;
        }
    }

    /// Parses `[+-]?\d+` not immediately followed by `.`.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::InvalidIntegerToken`] at the token start when the
    /// grammar does not match; the cursor is left unchanged.
    ///
    /// ```rust
    /// use pdf_graph::lexer::Cursor;
    ///
    /// assert!(Cursor::new(b"12.5").parse_integer().is_err());
    /// assert_eq!(Cursor::new(b"-17").parse_integer().unwrap().value.as_i64(), Some(-17));
    /// ```
    pub fn parse_integer(&mut self) -> Result<Spanned<Number>> {
        let saved = self.pos;
        self.skip_whitespace();
        let start = self.pos;
        self.skip_sign();
        if self.skip_digits() == 0 || self.peek() == Some(b'.') {
            self.pos = saved;
            return Err(Error::InvalidIntegerToken { offset: start });
        }
        let text = std::str::from_utf8(&self.data[start..self.pos]).unwrap_or("");
        let text = text.strip_prefix('+').unwrap_or(text);
        match BigInt::from_str(text) {
            Ok(value) => Ok(Spanned {
                value: Number::Integer(value),
                offset: start,
            }),
            Err(_) => {
                self.pos = saved;
                Err(Error::InvalidIntegerToken { offset: start })
            }
        }
    }

    /// Parses `[+-]?(\d+\.\d*|\d*\.\d+)([eE][+-]?\d+)?`.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::InvalidRealToken`] at the token start when the
    /// grammar does not match; the cursor is left unchanged.
    pub fn parse_real(&mut self) -> Result<Spanned<Number>> {
        let saved = self.pos;
        self.skip_whitespace();
        let start = self.pos;
        self.skip_sign();
        let int_digits = self.skip_digits();
        if self.peek() != Some(b'.') {
            self.pos = saved;
            return Err(Error::InvalidRealToken { offset: start });
        }
        self.pos += 1;
        let frac_digits = self.skip_digits();
        if int_digits + frac_digits == 0 {
            self.pos = saved;
            return Err(Error::InvalidRealToken { offset: start });
        }

        if matches!(self.peek(), Some(b'e' | b'E')) {
            let before_exponent = self.pos;
            self.pos += 1;
            self.skip_sign();
            if self.skip_digits() == 0 {
                self.pos = before_exponent;
            }
        }

        let text = std::str::from_utf8(&self.data[start..self.pos]).unwrap_or("");
        match f64::from_str(text) {
            Ok(value) => Ok(Spanned {
                value: Number::Real(value),
                offset: start,
            }),
            Err(_) => {
                self.pos = saved;
                Err(Error::InvalidRealToken { offset: start })
            }
        }
    }

    /// Parses an integer or a real, whichever the token is.
    ///
    /// A `.` after the digits always makes the token a real.
    pub fn parse_number(&mut self) -> Result<Spanned<Number>> {
        self.skip_whitespace();
        let mut ahead = self.clone();
        ahead.skip_sign();
        ahead.skip_digits();
        if ahead.peek() == Some(b'.') {
            self.parse_real()
        } else {
            self.parse_integer()
        }
    }

    /// Parses `/Name`, expanding `#xx` escapes.
    pub fn parse_name(&mut self) -> Result<Spanned<Name>> {
        self.skip_whitespace();
        let start = self.pos;
        if self.peek() != Some(b'/') {
            return Err(Error::syntax(start, "expected name"));
        }
        self.pos += 1;
        let body_start = self.pos;
        while matches!(self.peek(), Some(b) if is_regular(b)) {
            self.pos += 1;
        }
        match Name::from_escaped(&self.data[body_start..self.pos]) {
            Some(value) => Ok(Spanned {
                value,
                offset: start,
            }),
            None => {
                self.pos = start;
                Err(Error::syntax(start, "invalid #xx escape in name"))
            }
        }
    }

    /// Parses a literal `( ... )` or hexadecimal `< ... >` string.
    pub fn parse_string(&mut self) -> Result<Spanned<PdfString>> {
        self.skip_whitespace();
        let start = self.pos;
        let result = match self.peek() {
            Some(b'(') => self.parse_literal_string(),
            Some(b'<') if self.peek_at(1) != Some(b'<') => self.parse_hex_string(),
            Some(_) => Err(Error::syntax(start, "expected string")),
            None => Err(Error::unexpected_eof(start, "string")),
        };
        match result {
            Ok(value) => Ok(Spanned {
                value,
                offset: start,
            }),
            Err(e) => {
                self.pos = start;
                Err(e)
            }
        }
    }

    fn parse_literal_string(&mut self) -> Result<PdfString> {
        let start = self.pos;
        self.pos += 1;
        let mut bytes = Vec::new();
        let mut depth = 1usize;

        loop {
            let b = self
                .next_byte()
                .ok_or_else(|| Error::unexpected_eof(start, "')'"))?;
            match b {
                b'(' => {
                    depth += 1;
                    bytes.push(b);
                }
                b')' => {
                    depth -= 1;
                    if depth == 0 {
                        break;
                    }
                    bytes.push(b);
                }
                b'\\' => {
                    let escaped = self
                        .next_byte()
                        .ok_or_else(|| Error::unexpected_eof(start, "escape sequence"))?;
                    match escaped {
                        b'n' => bytes.push(b'\n'),
                        b'r' => bytes.push(b'\r'),
                        b't' => bytes.push(b'\t'),
                        b'b' => bytes.push(b'\x08'),
                        b'f' => bytes.push(b'\x0C'),
                        b'0'..=b'7' => {
                            let mut value = u32::from(escaped - b'0');
                            for _ in 0..2 {
                                match self.peek() {
                                    Some(d @ b'0'..=b'7') => {
                                        value = value * 8 + u32::from(d - b'0');
                                        self.pos += 1;
                                    }
                                    _ => break,
                                }
                            }
                            // High-order overflow is ignored.
                            bytes.push((value & 0xFF) as u8);
                        }
                        b'\r' => {
                            if self.peek() == Some(b'\n') {
                                self.pos += 1;
                            }
                        }
                        b'\n' => {}
                        other => bytes.push(other),
                    }
                }
                b'\r' => {
                    // An unescaped end-of-line of any kind reads as a single LF.
                    if self.peek() == Some(b'\n') {
                        self.pos += 1;
                    }
                    bytes.push(b'\n');
                }
                other => bytes.push(other),
            }
        }

        Ok(PdfString::literal(bytes))
    }

    fn parse_hex_string(&mut self) -> Result<PdfString> {
        let start = self.pos;
        self.pos += 1;
        let mut bytes = Vec::new();
        let mut high: Option<u8> = None;

        loop {
            let b = self
                .next_byte()
                .ok_or_else(|| Error::unexpected_eof(start, "'>'"))?;
            let digit = match b {
                b'>' => break,
                b'0'..=b'9' => b - b'0',
                b'a'..=b'f' => b - b'a' + 10,
                b'A'..=b'F' => b - b'A' + 10,
                b if is_whitespace(b) => continue,
                _ => return Err(Error::syntax(self.pos - 1, "invalid character in hex string")),
            };
            match high.take() {
                Some(h) => bytes.push((h << 4) | digit),
                None => high = Some(digit),
            }
        }
        // A missing final digit is taken as 0.
        if let Some(h) = high {
            bytes.push(h << 4);
        }

        Ok(PdfString::hex(bytes))
    }

    fn read_keyword(&mut self) -> &'a [u8] {
        let start = self.pos;
        while matches!(self.peek(), Some(b) if is_regular(b)) {
            self.pos += 1;
        }
        &self.data[start..self.pos]
    }

    /// Consumes `keyword` if it is the next token, as a whole word.
    fn eat_keyword(&mut self, keyword: &[u8]) -> bool {
        let saved = self.pos;
        self.skip_whitespace();
        if self.read_keyword() == keyword {
            true
        } else {
            self.pos = saved;
            false
        }
    }

    fn expect_keyword(&mut self, keyword: &str) -> Result<()> {
        self.skip_whitespace();
        let offset = self.pos;
        if self.is_eof() {
            return Err(Error::unexpected_eof(offset, keyword));
        }
        if self.eat_keyword(keyword.as_bytes()) {
            Ok(())
        } else {
            Err(Error::syntax(offset, &format!("expected '{keyword}'")))
        }
    }

    /// Parses any primitive value, streams and references included.
    ///
    /// Trailing whitespace after the value is not consumed.
    pub fn parse_object(&mut self) -> Result<Object> {
        let saved = self.pos;
        self.parse_object_at_depth(0).map_err(|e| {
            self.pos = saved;
            e
        })
    }

    /// Parses one value and reports how many bytes it consumed, leading
    /// whitespace included.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pdf_graph::lexer::Cursor;
    /// use pdf_graph::Reference;
    ///
    /// let mut cursor = Cursor::new(b" 12 0 R /Next");
    /// let (value, consumed) = cursor.parse_primitive().unwrap();
    /// assert_eq!(value.as_reference(), Some(Reference::new(12, 0)));
    /// assert_eq!(consumed, 7);
    /// ```
    pub fn parse_primitive(&mut self) -> Result<(Object, usize)> {
        let start = self.pos;
        let value = self.parse_object()?;
        Ok((value, self.pos - start))
    }

    fn parse_object_at_depth(&mut self, depth: usize) -> Result<Object> {
        self.skip_whitespace();
        let start = self.pos;
        if depth > MAX_DEPTH {
            return Err(Error::syntax(start, "objects nested too deeply"));
        }

        let b = self
            .peek()
            .ok_or_else(|| Error::unexpected_eof(start, "object"))?;
        match b {
            b'/' => Ok(Object::Name(self.parse_name()?.value)),
            b'(' => Ok(Object::String(self.parse_literal_string()?)),
            b'<' if self.peek_at(1) == Some(b'<') => self.parse_dictionary_or_stream(depth),
            b'<' => Ok(Object::String(self.parse_hex_string()?)),
            b'[' => self.parse_array(depth),
            b'+' | b'-' | b'.' | b'0'..=b'9' => self.parse_number_or_reference(),
            b if is_regular(b) => match self.read_keyword() {
                b"true" => Ok(Object::Boolean(true)),
                b"false" => Ok(Object::Boolean(false)),
                b"null" => Ok(Object::Null),
                other => Err(Error::syntax(
                    start,
                    &format!("unexpected keyword '{}'", String::from_utf8_lossy(other)),
                )),
            },
            other => Err(Error::syntax(
                start,
                &format!("unexpected character '{}'", other as char),
            )),
        }
    }

    fn parse_number_or_reference(&mut self) -> Result<Object> {
        let number = self.parse_number()?.value;
        if let Some(reference) = self.try_reference_tail(&number) {
            return Ok(Object::Reference(reference));
        }
        Ok(Object::Number(number))
    }

    /// After an integer, looks ahead for `<generation> R`.
    fn try_reference_tail(&mut self, number: &Number) -> Option<Reference> {
        if !number.is_integer() {
            return None;
        }
        let object_number = u32::try_from(number.as_i64()?).ok()?;
        let saved = self.pos;

        self.skip_whitespace();
        let gen_start = self.pos;
        let generation = if self.skip_digits() > 0 {
            std::str::from_utf8(&self.data[gen_start..self.pos])
                .ok()
                .and_then(|s| s.parse::<u16>().ok())
        } else {
            None
        };
        let ok = generation.is_some()
            && matches!(self.peek(), Some(b) if is_whitespace(b) || is_delimiter(b))
            && self.eat_keyword(b"R");

        match generation {
            Some(generation) if ok => Some(Reference::new(object_number, generation)),
            _ => {
                self.pos = saved;
                None
            }
        }
    }

    fn parse_array(&mut self, depth: usize) -> Result<Object> {
        let start = self.pos;
        self.pos += 1;
        let mut items = Vec::new();
        loop {
            self.skip_whitespace();
            match self.peek() {
                Some(b']') => {
                    self.pos += 1;
                    return Ok(Object::Array(items));
                }
                Some(_) => items.push(self.parse_object_at_depth(depth + 1)?),
                None => return Err(Error::unexpected_eof(start, "']'")),
            }
        }
    }

    fn parse_dictionary_or_stream(&mut self, depth: usize) -> Result<Object> {
        let start = self.pos;
        self.pos += 2;
        let mut dict = Dictionary::new();
        loop {
            self.skip_whitespace();
            match self.peek() {
                Some(b'>') if self.peek_at(1) == Some(b'>') => {
                    self.pos += 2;
                    break;
                }
                Some(b'/') => {
                    let key = self.parse_name()?.value;
                    let value = self.parse_object_at_depth(depth + 1)?;
                    dict.insert(key, value);
                }
                Some(_) => return Err(Error::syntax(self.pos, "expected name as dictionary key")),
                None => return Err(Error::unexpected_eof(start, "'>>'")),
            }
        }

        let before_keyword = self.pos;
        if self.eat_keyword(b"stream") {
            return self.parse_stream_body(dict).map(Object::Stream);
        }
        self.pos = before_keyword;
        Ok(Object::Dictionary(dict))
    }

    /// Reads the payload after the `stream` keyword up to `endstream`.
    ///
    /// A direct `/Length` is trusted when `endstream` follows it; otherwise the
    /// payload runs to the next `endstream`, minus the end-of-line before it.
    fn parse_stream_body(&mut self, dict: Dictionary) -> Result<Stream> {
        match (self.peek(), self.peek_at(1)) {
            (Some(b'\r'), Some(b'\n')) => self.pos += 2,
            (Some(b'\r' | b'\n'), _) => self.pos += 1,
            _ => {}
        }
        let data_start = self.pos;

        let declared = dict
            .get("Length")
            .and_then(Object::as_number)
            .and_then(Number::as_usize);
        if let Some(length) = declared {
            if let Some(end) = data_start.checked_add(length) {
                if end <= self.data.len() {
                    let mut ahead = Cursor::at(self.data, end);
                    if ahead.eat_keyword(b"endstream") {
                        let raw = self.data[data_start..end].to_vec();
                        self.pos = ahead.pos;
                        return Ok(Stream::from_raw(dict, raw));
                    }
                }
            }
            tracing::debug!(length, offset = data_start, "stream /Length is wrong, scanning for endstream");
        }

        let found = self.data[data_start..]
            .windows(b"endstream".len())
            .position(|w| w == b"endstream")
            .ok_or_else(|| Error::unexpected_eof(data_start, "endstream"))?;
        let keyword_start = data_start + found;
        let mut data_end = keyword_start;
        if data_end > data_start && self.data[data_end - 1] == b'\n' {
            data_end -= 1;
        }
        if data_end > data_start && self.data[data_end - 1] == b'\r' {
            data_end -= 1;
        }
        let raw = self.data[data_start..data_end].to_vec();
        self.pos = keyword_start + b"endstream".len();
        Ok(Stream::from_raw(dict, raw))
    }

    /// Parses `n g obj <value> endobj`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pdf_graph::lexer::Cursor;
    /// use pdf_graph::Reference;
    ///
    /// let mut cursor = Cursor::new(b"7 0 obj\n<< /Type /Page >>\nendobj");
    /// let object = cursor.parse_indirect_object().unwrap();
    /// assert_eq!(object.reference, Reference::new(7, 0));
    /// assert!(object.value.is_dictionary());
    /// ```
    pub fn parse_indirect_object(&mut self) -> Result<IndirectObject> {
        let saved = self.pos;
        let result = self.parse_indirect_object_inner();
        if result.is_err() {
            self.pos = saved;
        }
        result
    }

    fn parse_indirect_object_inner(&mut self) -> Result<IndirectObject> {
        let number = self.parse_integer()?;
        let object_number = number
            .value
            .as_i64()
            .and_then(|n| u32::try_from(n).ok())
            .ok_or_else(|| Error::syntax(number.offset, "object number out of range"))?;
        let generation = self.parse_integer()?;
        let generation_number = generation
            .value
            .as_i64()
            .and_then(|n| u16::try_from(n).ok())
            .ok_or_else(|| Error::syntax(generation.offset, "generation number out of range"))?;
        self.expect_keyword("obj")?;

        let value = self.parse_object()?;
        self.expect_keyword("endobj")?;

        Ok(IndirectObject {
            reference: Reference::new(object_number, generation_number),
            value,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &[u8]) -> Object {
        Cursor::new(input).parse_object().unwrap()
    }

    #[test]
    fn test_integer_offsets() {
        let token = Cursor::new(b"123").parse_integer().unwrap();
        assert_eq!(token.value, Number::from(123));
        assert_eq!(token.offset, 0);

        let token = Cursor::new(b"% note\n +42").parse_integer().unwrap();
        assert_eq!(token.value, Number::from(42));
        assert_eq!(token.offset, 8);
    }

    #[test]
    fn test_integer_failure_leaves_cursor() {
        let mut cursor = Cursor::new(b"  abc");
        assert_eq!(
            cursor.parse_integer(),
            Err(Error::InvalidIntegerToken { offset: 2 })
        );
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn test_real_forms() {
        for (input, expected) in [
            (&b"3.1400"[..], 3.14),
            (b"-.5", -0.5),
            (b"4.", 4.0),
            (b"+1.5e3", 1500.0),
        ] {
            let token = Cursor::new(input).parse_real().unwrap();
            assert_eq!(token.value, Number::Real(expected));
        }
        assert!(matches!(
            Cursor::new(b"12").parse_real(),
            Err(Error::InvalidRealToken { offset: 0 })
        ));
        assert!(Cursor::new(b".").parse_real().is_err());
    }

    #[test]
    fn test_exponent_without_digits_is_not_consumed() {
        let mut cursor = Cursor::new(b"1.5e");
        let token = cursor.parse_real().unwrap();
        assert_eq!(token.value, Number::Real(1.5));
        assert_eq!(cursor.position(), 3);
    }

    #[test]
    fn test_literal_string_escapes() {
        let value = parse(b"(a\\(b\\)c (nested) \\101\\n\\\nend)");
        let s = value.as_string().unwrap();
        assert_eq!(s.as_bytes(), b"a(b)c (nested) A\nend");
    }

    #[test]
    fn test_hex_string_odd_digits() {
        let value = parse(b"<48 65 6C 6C 6F 7>");
        assert_eq!(value.as_string().unwrap().as_bytes(), b"Hello\x70");
        assert!(Cursor::new(b"<4G>").parse_object().is_err());
    }

    #[test]
    fn test_reference_lookahead() {
        assert_eq!(parse(b"12 0 R"), Object::Reference(Reference::new(12, 0)));
        let array = parse(b"[1 2 3 0 R 4]");
        let items = array.as_array().unwrap();
        assert_eq!(items.len(), 4);
        assert_eq!(items[1].as_i64(), Some(2));
        assert_eq!(items[2], Object::Reference(Reference::new(3, 0)));
        // `R` must be a whole keyword
        assert_eq!(parse(b"1 0 RG").as_i64(), Some(1));
    }

    #[test]
    fn test_dictionary() {
        let value = parse(b"<</Type/Page/Kids[1 0 R]/Count 1/Nested<</A true>>>>");
        let dict = value.as_dict().unwrap();
        assert_eq!(dict.type_name(), Some("Page"));
        assert_eq!(dict.get("Count").and_then(Object::as_i64), Some(1));
        assert!(dict.get("Nested").unwrap().is_dictionary());
    }

    #[test]
    fn test_stream_with_length() {
        let mut cursor = Cursor::new(b"<< /Length 5 >>\nstream\r\nhello\nendstream rest");
        let value = cursor.parse_object().unwrap();
        let mut stream = value.as_stream().cloned().unwrap();
        assert_eq!(stream.raw().unwrap(), b"hello");
        assert_eq!(cursor.remaining(), b" rest");
    }

    #[test]
    fn test_stream_with_wrong_length() {
        let value = parse(b"<< /Length 99 >> stream\nabc\r\nendstream");
        let mut stream = value.as_stream().cloned().unwrap();
        assert_eq!(stream.raw().unwrap(), b"abc");
    }

    #[test]
    fn test_keywords() {
        assert_eq!(parse(b"null"), Object::Null);
        assert_eq!(parse(b"true"), Object::Boolean(true));
        assert!(Cursor::new(b"maybe").parse_object().is_err());
    }

    #[test]
    fn test_deep_nesting_rejected() {
        let input = vec![b'['; MAX_DEPTH + 10];
        assert!(matches!(
            Cursor::new(&input).parse_object(),
            Err(Error::Syntax { .. })
        ));
    }

    #[test]
    fn test_indirect_object_requires_endobj() {
        let mut cursor = Cursor::new(b"1 0 obj 5");
        assert!(cursor.parse_indirect_object().is_err());
        assert_eq!(cursor.position(), 0);
    }
}
