//! Object Syntax
//!
//! This module documents the textual object syntax read by [`crate::lexer`]
//! and written by [`crate::ser`].
//!
//! # Overview
//!
//! A document is a sequence of indirect objects, each a primitive value
//! registered under a `(number, generation)` identity:
//!
//! ```text
//! 4 0 obj
//! << /Type /Page /Parent 3 0 R /MediaBox [0 0 612 792] >>
//! endobj
//! ```
//!
//! # Lexical Rules
//!
//! ## Whitespace
//!
//! Space, tab, CR, LF, form feed and NUL separate tokens. A `%` starts a
//! comment that runs to the end of the line; comments count as whitespace.
//!
//! ## Delimiters
//!
//! `( ) < > [ ] { } / %` end any name or keyword and need no whitespace
//! around them: `[/A/B(c)]` is three elements.
//!
//! # Primitives
//!
//! | Type | Syntax | Example |
//! |------|--------|---------|
//! | Null | `null` | `null` |
//! | Boolean | `true` or `false` | `true` |
//! | Integer | optional sign, digits | `-17` |
//! | Real | optional sign, digits with one `.`, optional exponent | `3.14`, `.5`, `-2.` |
//! | Name | `/` then regular bytes, `#xx` escapes | `/Type`, `/A#20B` |
//! | Literal string | balanced `( )` | `(Hello (world))` |
//! | Hex string | `< >` around hex digits | `<48656C6C6F>` |
//! | Array | `[ ]` around values | `[1 2.0 /Three]` |
//! | Dictionary | `<< >>` around name/value pairs | `<< /Count 3 >>` |
//! | Reference | number, generation, `R` | `12 0 R` |
//!
//! ## Numbers
//!
//! Integers are arbitrary precision. A `.` directly after the digits makes
//! the token a real, so `12.` is a real and never the integer `12` followed
//! by something else. Arithmetic keeps the kinds apart: integers combine to
//! integers, anything involving a real yields a real.
//!
//! Reals are written in fixed-point notation with trailing zeros removed and
//! no exponent:
//!
//! ```text
//! 3.1400  ->  3.14
//! 2.0     ->  2
//! 1.0e-3  ->  0.001
//! ```
//!
//! ## Names
//!
//! Bytes outside `!`..`~`, delimiters and `#` are written as `#xx` with two
//! hex digits. `/A#42` and `/AB` are the same name.
//!
//! ## Literal Strings
//!
//! Balanced parentheses need no escape. Escapes:
//!
//! | Escape | Meaning |
//! |--------|---------|
//! | `\n` `\r` `\t` `\b` `\f` | control characters |
//! | `\(` `\)` `\\` | the character itself |
//! | `\ddd` | one to three octal digits |
//! | `\` before an end of line | line continuation, nothing is produced |
//!
//! An unescaped end of line (CR, LF or CRLF) inside a string reads as one LF.
//!
//! ## Hex Strings
//!
//! Whitespace between digits is ignored. An odd number of digits is read as
//! if a final `0` followed: `<901FA>` is the bytes `90 1F A0`.
//!
//! ## References
//!
//! `n g R` where `n` fits in 32 bits and `g` in 16. A reference names an
//! object; it carries no data. Resolution rules are documented on
//! [`ObjectGraph::resolve`](crate::ObjectGraph::resolve).
//!
//! # Streams
//!
//! A dictionary followed by the `stream` keyword, one end of line, the raw
//! bytes and `endstream`:
//!
//! ```text
//! << /Length 11 /Filter /ASCIIHexDecode >>
//! stream
//! 48656C6C6F>
//! endstream
//! ```
//!
//! A direct `/Length` is used when `endstream` follows that many bytes;
//! otherwise the reader scans for `endstream`.
//!
//! ## Filters
//!
//! `/Filter` holds a name or an array of names, applied in order when
//! decoding. `/DecodeParms` holds a matching dictionary, `null`, or an array
//! of them.
//!
//! | Filter | Abbreviation | Parameters |
//! |--------|--------------|------------|
//! | `FlateDecode` | `Fl` | `Predictor`, `Colors`, `BitsPerComponent`, `Columns` |
//! | `LZWDecode` | `LZW` | as Flate, plus `EarlyChange` |
//! | `ASCIIHexDecode` | `AHx` | none |
//! | `ASCII85Decode` | `A85` | none |
//! | `RunLengthDecode` | `RL` | none |
//!
//! ## Predictors
//!
//! | Value | Meaning |
//! |-------|---------|
//! | 1 | none |
//! | 2 | TIFF horizontal differencing, no row tags |
//! | 10 to 14 | PNG None, Sub, Up, Average, Paeth; each row starts with its tag |
//! | 15 | PNG, tag chosen per row by the encoder |
//!
//! A row holds `ceil(Columns * BitsPerComponent * Colors / 8)` bytes. For
//! PNG predictors the row above the first is all zeros.
//!
//! # Counted Trees
//!
//! Interior nodes carry `/Kids` (references to children) and `/Count` (the
//! number of leaves below). Children point back with `/Parent`:
//!
//! ```text
//! 3 0 obj << /Type /Pages /Kids [4 0 R 5 0 R] /Count 2 >> endobj
//! 4 0 obj << /Type /Page /Parent 3 0 R >> endobj
//! 5 0 obj << /Type /Page /Parent 3 0 R >> endobj
//! ```
//!
//! # Limitations
//!
//! - **Cross-reference tables and trailers**: not read or written here
//! - **Encryption**: strings and streams are taken as stored
//! - **Image-only filters** (`DCTDecode`, `JBIG2Decode`, `CCITTFaxDecode`,
//!   `JPXDecode`): rejected as unsupported
//! - **Inline images** in content streams: not tokenized

// This module contains only documentation; no implementation code
