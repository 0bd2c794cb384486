//! Numeric values: arbitrary-precision integers and double-precision reals.
//!
//! The two kinds are distinct in the file syntax (`1` versus `1.0`), so they
//! stay distinct here. Arithmetic is closed over the kind:
//!
//! | left    | right   | result  |
//! |---------|---------|---------|
//! | Integer | Integer | Integer |
//! | Integer | Real    | Real    |
//! | Real    | any     | Real    |
//!
//! Bitwise operations are only defined on integers.
//!
//! ## Examples
//!
//! ```rust
//! use pdf_graph::Number;
//!
//! let a = Number::from(7);
//! let b = Number::from(2);
//! assert_eq!(a.clone() + b.clone(), Number::from(9));
//! assert_eq!(a.checked_div(&b).unwrap(), Number::from(3));
//! assert_eq!(a + Number::from(0.5), Number::from(7.5));
//! ```

use crate::{Error, Result};
use num_bigint::BigInt;
use num_traits::{FromPrimitive, Signed, ToPrimitive, Zero};
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

/// Largest integer result, in bits, that `pow` and shifts will produce.
pub const MAX_INTEGER_BITS: u64 = 1 << 20;

/// A numeric value.
#[derive(Clone, Debug, PartialEq)]
pub enum Number {
    Integer(BigInt),
    Real(f64),
}

/// The kind of a [`Number`], usable to build a number of the same kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NumberKind {
    Integer,
    Real,
}

impl NumberKind {
    /// Builds a number of this kind from a real value.
    ///
    /// Integers are truncated toward zero and keep every digit of the
    /// truncated value; non-finite values become zero.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pdf_graph::{Number, NumberKind};
    ///
    /// assert_eq!(NumberKind::Integer.construct(2.9), Number::from(2));
    /// assert_eq!(NumberKind::Integer.construct(1e20).to_string(), "100000000000000000000");
    /// assert_eq!(NumberKind::Real.construct(2.9), Number::from(2.9));
    /// ```
    #[must_use]
    pub fn construct(self, value: f64) -> Number {
        match self {
            NumberKind::Integer => {
                Number::Integer(BigInt::from_f64(value.trunc()).unwrap_or_default())
            }
            NumberKind::Real => Number::Real(value),
        }
    }

    /// Kind of the result of a binary operation between the two kinds.
    #[must_use]
    pub const fn join(self, other: NumberKind) -> NumberKind {
        match (self, other) {
            (NumberKind::Integer, NumberKind::Integer) => NumberKind::Integer,
            _ => NumberKind::Real,
        }
    }
}

impl Number {
    #[inline]
    #[must_use]
    pub const fn kind(&self) -> NumberKind {
        match self {
            Number::Integer(_) => NumberKind::Integer,
            Number::Real(_) => NumberKind::Real,
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_integer(&self) -> bool {
        matches!(self, Number::Integer(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_real(&self) -> bool {
        matches!(self, Number::Real(_))
    }

    /// The value as `i64`, if it is an integer in range.
    ///
    /// Reals are never converted: `1.0` is not an integer.
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Number::Integer(i) => i.to_i64(),
            Number::Real(_) => None,
        }
    }

    #[must_use]
    pub fn as_usize(&self) -> Option<usize> {
        match self {
            Number::Integer(i) => i.to_usize(),
            Number::Real(_) => None,
        }
    }

    /// The value as `f64` (integers may lose precision).
    #[must_use]
    pub fn as_f64(&self) -> f64 {
        match self {
            Number::Integer(i) => i.to_f64().unwrap_or(f64::NAN),
            Number::Real(r) => *r,
        }
    }

    #[must_use]
    pub fn abs(&self) -> Number {
        match self {
            Number::Integer(i) => Number::Integer(i.abs()),
            Number::Real(r) => Number::Real(r.abs()),
        }
    }

    /// Division. Integer division truncates toward zero and fails on a zero divisor.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pdf_graph::Number;
    ///
    /// assert_eq!(Number::from(-7).checked_div(&Number::from(2)).unwrap(), Number::from(-3));
    /// assert!(Number::from(1).checked_div(&Number::from(0)).is_err());
    /// assert_eq!(Number::from(1.0).checked_div(&Number::from(4)).unwrap(), Number::from(0.25));
    /// ```
    pub fn checked_div(&self, rhs: &Number) -> Result<Number> {
        match (self, rhs) {
            (Number::Integer(a), Number::Integer(b)) => {
                if b.is_zero() {
                    Err(Error::arithmetic("integer division by zero"))
                } else {
                    Ok(Number::Integer(a / b))
                }
            }
            _ => Ok(Number::Real(self.as_f64() / rhs.as_f64())),
        }
    }

    /// Exponentiation. An integer raised to a non-negative integer stays an integer.
    ///
    /// Integer results longer than [`MAX_INTEGER_BITS`] fail with `Arithmetic`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pdf_graph::Number;
    ///
    /// assert_eq!(Number::from(2).pow(&Number::from(10)).unwrap(), Number::from(1024));
    /// assert_eq!(Number::from(2.0).pow(&Number::from(2)).unwrap(), Number::from(4.0));
    /// assert!(Number::from(2).pow(&Number::from(-1)).is_err());
    /// ```
    pub fn pow(&self, rhs: &Number) -> Result<Number> {
        match (self, rhs) {
            (Number::Integer(base), Number::Integer(exp)) => {
                let exp = exp.to_u32().ok_or_else(|| {
                    Error::arithmetic("integer exponent must be a non-negative 32-bit value")
                })?;
                let bits = base.bits();
                if bits > 1 && bits.saturating_mul(u64::from(exp)) > MAX_INTEGER_BITS {
                    return Err(Error::arithmetic("integer power result too large"));
                }
                Ok(Number::Integer(base.pow(exp)))
            }
            _ => Ok(Number::Real(self.as_f64().powf(rhs.as_f64()))),
        }
    }

    fn integer_operands<'a>(&'a self, rhs: &'a Number, op: &str) -> Result<(&'a BigInt, &'a BigInt)> {
        match (self, rhs) {
            (Number::Integer(a), Number::Integer(b)) => Ok((a, b)),
            _ => Err(Error::Arithmetic(format!("{} requires integer operands", op))),
        }
    }

    pub fn bit_and(&self, rhs: &Number) -> Result<Number> {
        let (a, b) = self.integer_operands(rhs, "&")?;
        Ok(Number::Integer(a & b))
    }

    pub fn bit_or(&self, rhs: &Number) -> Result<Number> {
        let (a, b) = self.integer_operands(rhs, "|")?;
        Ok(Number::Integer(a | b))
    }

    pub fn bit_xor(&self, rhs: &Number) -> Result<Number> {
        let (a, b) = self.integer_operands(rhs, "^")?;
        Ok(Number::Integer(a ^ b))
    }

    /// Two's-complement bitwise not (`!x == -x - 1`).
    pub fn bit_not(&self) -> Result<Number> {
        match self {
            Number::Integer(a) => Ok(Number::Integer(!a)),
            Number::Real(_) => Err(Error::arithmetic("~ requires an integer operand")),
        }
    }

    /// Left shift; a negative amount shifts right.
    ///
    /// Results longer than [`MAX_INTEGER_BITS`] fail with `Arithmetic`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pdf_graph::Number;
    ///
    /// assert_eq!(Number::from(1).shl(&Number::from(4)).unwrap(), Number::from(16));
    /// assert_eq!(Number::from(16).shl(&Number::from(-4)).unwrap(), Number::from(1));
    /// assert!(Number::from(1.5).shl(&Number::from(1)).is_err());
    /// assert!(Number::from(2).shl(&Number::from(1i64 << 40)).is_err());
    /// ```
    pub fn shl(&self, rhs: &Number) -> Result<Number> {
        let (a, b) = self.integer_operands(rhs, "<<")?;
        if b.is_negative() {
            // Shifting out every bit already gives 0 or -1.
            let amount = b.magnitude().to_u64().unwrap_or(u64::MAX).min(a.bits());
            return Ok(Number::Integer(a >> amount));
        }
        if a.is_zero() {
            return Ok(Number::Integer(BigInt::zero()));
        }
        let amount = b
            .to_u64()
            .filter(|amount| a.bits().saturating_add(*amount) <= MAX_INTEGER_BITS)
            .ok_or_else(|| Error::arithmetic("shift result too large"))?;
        Ok(Number::Integer(a << amount))
    }

    /// Arithmetic right shift; a negative amount shifts left.
    pub fn shr(&self, rhs: &Number) -> Result<Number> {
        let negated = match rhs {
            Number::Integer(b) => Number::Integer(-b),
            Number::Real(_) => return Err(Error::arithmetic(">> requires integer operands")),
        };
        self.shl(&negated)
    }
}

fn binary(lhs: Number, rhs: Number, int_op: fn(BigInt, BigInt) -> BigInt, real_op: fn(f64, f64) -> f64) -> Number {
    match (lhs, rhs) {
        (Number::Integer(a), Number::Integer(b)) => Number::Integer(int_op(a, b)),
        (a, b) => Number::Real(real_op(a.as_f64(), b.as_f64())),
    }
}

impl Add for Number {
    type Output = Number;

    fn add(self, rhs: Number) -> Number {
        binary(self, rhs, |a, b| a + b, |a, b| a + b)
    }
}

impl Sub for Number {
    type Output = Number;

    fn sub(self, rhs: Number) -> Number {
        binary(self, rhs, |a, b| a - b, |a, b| a - b)
    }
}

impl Mul for Number {
    type Output = Number;

    fn mul(self, rhs: Number) -> Number {
        binary(self, rhs, |a, b| a * b, |a, b| a * b)
    }
}

impl Neg for Number {
    type Output = Number;

    fn neg(self) -> Number {
        match self {
            Number::Integer(i) => Number::Integer(-i),
            Number::Real(r) => Number::Real(-r),
        }
    }
}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Number::Integer(a), Number::Integer(b)) => Some(a.cmp(b)),
            _ => self.as_f64().partial_cmp(&other.as_f64()),
        }
    }
}

/// Formats a real in fixed-point notation with trailing zeros stripped.
///
/// Non-finite values have no textual form and render as `0`.
pub(crate) fn format_real(value: f64) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }
    // `Display` for f64 is shortest round-trip and never uses exponent notation.
    let mut text = value.to_string();
    if text.contains('.') {
        let trimmed = text.trim_end_matches('0').trim_end_matches('.').len();
        text.truncate(trimmed);
    }
    text
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Integer(i) => write!(f, "{}", i),
            Number::Real(r) => f.write_str(&format_real(*r)),
        }
    }
}

macro_rules! integer_from {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Number {
                fn from(value: $t) -> Self {
                    Number::Integer(BigInt::from(value))
                }
            }
        )*
    };
}

integer_from!(i8, i16, i32, i64, u8, u16, u32, u64, usize);

impl From<BigInt> for Number {
    fn from(value: BigInt) -> Self {
        Number::Integer(value)
    }
}

impl From<f32> for Number {
    fn from(value: f32) -> Self {
        Number::Real(value as f64)
    }
}

impl From<f64> for Number {
    fn from(value: f64) -> Self {
        Number::Real(value)
    }
}
