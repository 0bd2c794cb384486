//! Byte strings in literal `( ... )` or hexadecimal `< ... >` form.
//!
//! A [`PdfString`] is an arbitrary byte sequence; it is not required to be
//! valid UTF-8. The form it was read in is remembered so serialization writes
//! it back the same way.
//!
//! Date strings (`D:YYYYMMDDHHmmSSOHH'mm'`) are strings by syntax; see
//! [`PdfString::to_date`] and [`PdfString::from_date`].

use chrono::{DateTime, FixedOffset, NaiveDate, TimeZone};
use serde::{Deserialize, Serialize};

/// How a string is written.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum StringFormat {
    #[default]
    Literal,
    Hex,
}

/// A string value: raw bytes plus the notation used to write them.
///
/// Two strings with the same bytes compare equal regardless of notation.
///
/// # Examples
///
/// ```rust
/// use pdf_graph::{PdfString, StringFormat};
///
/// let literal = PdfString::literal("Hello");
/// let hex = PdfString::hex(b"Hello".to_vec());
/// assert_eq!(literal, hex);
/// assert_eq!(hex.format(), StringFormat::Hex);
/// assert_eq!(literal.as_str(), Some("Hello"));
/// ```
#[derive(Clone, Debug, Eq, Serialize, Deserialize)]
pub struct PdfString {
    bytes: Vec<u8>,
    format: StringFormat,
}

impl PdfString {
    #[must_use]
    pub fn new(bytes: Vec<u8>, format: StringFormat) -> Self {
        PdfString { bytes, format }
    }

    #[must_use]
    pub fn literal(text: impl Into<Vec<u8>>) -> Self {
        Self::new(text.into(), StringFormat::Literal)
    }

    #[must_use]
    pub fn hex(bytes: Vec<u8>) -> Self {
        Self::new(bytes, StringFormat::Hex)
    }

    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    #[inline]
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    #[inline]
    #[must_use]
    pub const fn format(&self) -> StringFormat {
        self.format
    }

    /// The bytes as text, if they are valid UTF-8.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.bytes).ok()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Interprets the string as a date (`D:YYYYMMDDHHmmSSOHH'mm'`).
    ///
    /// Every field after the year is optional; missing fields default to the
    /// start of the period and a missing offset means UTC.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pdf_graph::PdfString;
    /// use chrono::{Datelike, Timelike};
    ///
    /// let date = PdfString::literal("D:19981223195200-08'00'").to_date().unwrap();
    /// assert_eq!(date.year(), 1998);
    /// assert_eq!(date.hour(), 19);
    /// assert_eq!(date.offset().local_minus_utc(), -8 * 3600);
    ///
    /// let year_only = PdfString::literal("D:2024").to_date().unwrap();
    /// assert_eq!(year_only.month(), 1);
    /// ```
    #[must_use]
    pub fn to_date(&self) -> Option<DateTime<FixedOffset>> {
        let text = self.as_str()?;
        let text = text.strip_prefix("D:").unwrap_or(text);
        let bytes = text.as_bytes();

        let field = |start: usize, len: usize, default: u32| -> Option<u32> {
            match bytes.get(start..start + len) {
                Some(digits) if digits.iter().all(u8::is_ascii_digit) => {
                    std::str::from_utf8(digits).ok()?.parse().ok()
                }
                Some(_) => None,
                None if start >= bytes.len() => Some(default),
                None => None,
            }
        };

        let year = field(0, 4, 0)?;
        if bytes.len() < 4 {
            return None;
        }
        let month = field(4, 2, 1)?;
        let day = field(6, 2, 1)?;
        let hour = field(8, 2, 0)?;
        let minute = field(10, 2, 0)?;
        let second = field(12, 2, 0)?;

        let offset_seconds = match bytes.get(14) {
            None | Some(b'Z') => 0,
            Some(&sign @ (b'+' | b'-')) => {
                let rest: Vec<u8> = bytes[15..]
                    .iter()
                    .copied()
                    .filter(u8::is_ascii_digit)
                    .collect();
                let parse2 = |s: &[u8]| -> Option<i32> { std::str::from_utf8(s).ok()?.parse().ok() };
                let hh = rest.get(0..2).and_then(parse2).unwrap_or(0);
                let mm = rest.get(2..4).and_then(parse2).unwrap_or(0);
                let total = hh * 3600 + mm * 60;
                if sign == b'-' {
                    -total
                } else {
                    total
                }
            }
            Some(_) => return None,
        };

        let offset = FixedOffset::east_opt(offset_seconds)?;
        let naive = NaiveDate::from_ymd_opt(year as i32, month, day)?
            .and_hms_opt(hour, minute, second)?;
        offset.from_local_datetime(&naive).single()
    }

    /// Formats a date as a literal date string.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pdf_graph::PdfString;
    /// use chrono::{FixedOffset, TimeZone};
    ///
    /// let date = FixedOffset::east_opt(3600).unwrap()
    ///     .with_ymd_and_hms(2024, 5, 6, 7, 8, 9).unwrap();
    /// let s = PdfString::from_date(&date);
    /// assert_eq!(s.as_str(), Some("D:20240506070809+01'00'"));
    /// assert_eq!(s.to_date(), Some(date));
    /// ```
    #[must_use]
    pub fn from_date(date: &DateTime<FixedOffset>) -> Self {
        let offset = date.offset().local_minus_utc();
        let text = if offset == 0 {
            format!("D:{}Z", date.format("%Y%m%d%H%M%S"))
        } else {
            let sign = if offset < 0 { '-' } else { '+' };
            let abs = offset.abs();
            format!(
                "D:{}{}{:02}'{:02}'",
                date.format("%Y%m%d%H%M%S"),
                sign,
                abs / 3600,
                (abs % 3600) / 60
            )
        };
        Self::literal(text)
    }
}

impl PartialEq for PdfString {
    fn eq(&self, other: &Self) -> bool {
        self.bytes == other.bytes
    }
}

impl From<&str> for PdfString {
    fn from(value: &str) -> Self {
        PdfString::literal(value)
    }
}

impl From<String> for PdfString {
    fn from(value: String) -> Self {
        PdfString::literal(value)
    }
}
