//! The operation contract shared by every numeric representation.
//!
//! Each representation is a stateless kind type implementing [`NumberKind`] over its
//! payload type. [`NumberValue`](crate::NumberValue) selects the kind matching its
//! variant and forwards the call.

mod big_integer;
mod extended;
mod int64;
mod rational;

pub use big_integer::BigIntegerKind;
pub use extended::{BinaryFloatKind, DecimalKind, ExtendedKind};
pub use int64::Int64Kind;
pub use rational::RationalKind;

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::ToPrimitive;
use snafu::Snafu;

use crate::types::{ExtendedDecimal, ExtendedFloat, Kind, NumberValue};

pub type Result<T> = std::result::Result<T, Error>;

/// Failure of a numeric conversion.
///
/// Fit predicates never fail; only conversions that promise an exact result do.
#[derive(Debug, PartialEq, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    /// The value does not lie within the requested range.
    #[snafu(display("This object's value is out of range: {value}"))]
    OutOfRange { value: String },

    /// NaN or infinity where a finite value is required.
    #[snafu(display("Value is not finite: {value}"))]
    NotFinite { value: String },

    /// The target representation cannot hold the value without rounding.
    #[snafu(display("Value {value} has no exact {target} representation"))]
    Inexact { value: String, target: &'static str },
}

impl Error {
    pub fn is_out_of_range(&self) -> bool {
        matches!(self, Error::OutOfRange { .. })
    }
}

/// Operations every numeric representation supports.
///
/// Implementations are stateless: every function is pure and takes the payload it
/// operates on. Conversions that change representation return a new value and
/// never mutate the input.
pub trait NumberKind {
    /// Payload type this kind operates on.
    type Repr;

    /// Tag of the [`NumberValue`] variant carrying [`Self::Repr`].
    const KIND: Kind;

    /// Returns `true` iff the value equals zero.
    fn is_zero(value: &Self::Repr) -> bool;

    /// Returns -1, 0 or 1 matching the sign of the value. Only zero reports 0,
    /// except NaN, which has no sign and also reports 0.
    fn sign(value: &Self::Repr) -> i32;

    /// Returns `true` iff the value is finite and has no fractional part.
    fn is_integral(value: &Self::Repr) -> bool;

    fn is_nan(value: &Self::Repr) -> bool;

    fn is_positive_infinity(value: &Self::Repr) -> bool;

    fn is_negative_infinity(value: &Self::Repr) -> bool;

    fn is_infinity(value: &Self::Repr) -> bool {
        Self::is_positive_infinity(value) || Self::is_negative_infinity(value)
    }

    /// Returns the value truncated toward zero as an `i64`.
    ///
    /// # Errors
    /// [`Error::OutOfRange`] if the truncated value does not fit, [`Error::NotFinite`]
    /// for NaN and infinities.
    fn as_i64(value: &Self::Repr) -> Result<i64>;

    /// Returns the value truncated toward zero as an `i32`, provided it lies within
    /// `[min, max]`.
    ///
    /// # Errors
    /// [`Error::OutOfRange`] if the truncated value lies outside `[min, max]`.
    fn as_i32(value: &Self::Repr, min: i32, max: i32) -> Result<i32>;

    /// Returns `true` iff the value is integral and within the `i32` range.
    fn can_fit_in_i32(value: &Self::Repr) -> bool;

    /// Returns `true` iff the value is integral and within the `i64` range.
    fn can_fit_in_i64(value: &Self::Repr) -> bool;

    /// Returns `true` iff the value truncated toward zero is within the `i32` range.
    fn can_truncated_int_fit_in_i32(value: &Self::Repr) -> bool;

    /// Returns `true` iff the value truncated toward zero is within the `i64` range.
    fn can_truncated_int_fit_in_i64(value: &Self::Repr) -> bool;

    /// Converts to the nearest `f64`. Not exact; see [`Self::can_fit_in_f64`].
    fn as_f64(value: &Self::Repr) -> f64;

    /// Converts to an `f32` approximation. Not exact; see [`Self::can_fit_in_f32`].
    fn as_f32(value: &Self::Repr) -> f32;

    /// Returns `true` iff the value is exactly representable as an `f64`.
    fn can_fit_in_f64(value: &Self::Repr) -> bool;

    /// Returns `true` iff the value is exactly representable as an `f32`.
    fn can_fit_in_f32(value: &Self::Repr) -> bool;

    /// Returns the additive inverse, widened to another kind when the same kind
    /// cannot hold it.
    fn negate(value: &Self::Repr) -> NumberValue;

    /// Returns the magnitude, widened like [`Self::negate`].
    fn abs(value: &Self::Repr) -> NumberValue;

    fn as_extended_decimal(value: &Self::Repr) -> Result<ExtendedDecimal>;

    fn as_extended_float(value: &Self::Repr) -> Result<ExtendedFloat>;

    fn as_extended_rational(value: &Self::Repr) -> Result<BigRational>;

    /// Returns the value truncated toward zero as an arbitrary-precision integer.
    fn as_big_integer(value: &Self::Repr) -> Result<BigInt>;
}

/// An IEEE 754 binary interchange format, described by what it can hold exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct BinaryFormat {
    /// Significand bits, including the implicit leading bit.
    precision: u64,
    /// Exponent of the least significant bit of the smallest subnormal.
    min_exponent: i64,
    /// One past the exponent of the most significant bit of the largest finite value.
    max_exponent: i64,
}

impl BinaryFormat {
    pub(crate) const SINGLE: Self = Self {
        precision: 24,
        min_exponent: -149,
        max_exponent: 128,
    };

    pub(crate) const DOUBLE: Self = Self {
        precision: 53,
        min_exponent: -1074,
        max_exponent: 1024,
    };

    /// Cheap pre-check on an estimated `log2(|value|)`: `false` means the value is
    /// certainly too large or too small to be held.
    pub(crate) fn near_range(&self, log2: f64) -> bool {
        log2 <= (self.max_exponent + 2) as f64 && log2 >= (self.min_exponent - 2) as f64
    }

    /// Returns `true` iff `mantissa * 2^exponent` is representable without rounding,
    /// subnormals included.
    pub(crate) fn holds(&self, mantissa: &BigInt, exponent: &BigInt) -> bool {
        let Some(shift) = mantissa.trailing_zeros() else {
            return true;
        };
        let odd = mantissa.magnitude() >> shift;
        let bits = odd.bits();
        let Some(exponent) = (exponent + BigInt::from(shift)).to_i64() else {
            return false;
        };

        bits <= self.precision
            && exponent >= self.min_exponent
            && exponent.saturating_add_unsigned(bits) <= self.max_exponent
    }
}
