use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::One;
use snafu::OptionExt;
use tracing::{debug, trace};

use crate::{
    kind::{NumberKind, OutOfRangeSnafu, Result},
    types::{ExtendedDecimal, ExtendedFloat, Kind, NumberValue},
};

/// Numbers stored as a machine 64-bit signed integer.
///
/// Every value in `[-2^63, 2^63 - 1]` is integral and finite, so all predicates
/// except the narrowing and floating-point fit checks are constant, and every
/// widening conversion is exact and infallible. The one value that cannot stay
/// in this kind is the magnitude of `i64::MIN`, which [`Int64Kind::negate`] and
/// [`Int64Kind::abs`] return as a [`NumberValue::BigInteger`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Int64Kind;

impl Int64Kind {
    /// Checks exact representability in a binary float with `precision`
    /// significand bits.
    ///
    /// Trailing zero bits are shifted out while the magnitude is at least
    /// `2^precision`, since the exponent absorbs them. What remains must fit the
    /// significand. `i64::MIN` is `-2^63` and always fits.
    fn fits_in_significand(value: i64, precision: u32) -> bool {
        if value == i64::MIN {
            return true;
        }

        let capacity = 1i64 << precision;
        let mut magnitude = value.abs();
        while magnitude >= capacity && (magnitude & 1) == 0 {
            magnitude >>= 1;
        }
        magnitude < capacity
    }

    /// `2^63`, the magnitude of `i64::MIN`.
    fn widened_min() -> NumberValue {
        trace!("Widening magnitude of {} to a big integer", i64::MIN);
        NumberValue::BigInteger(BigInt::one() << 63u32)
    }
}

impl NumberKind for Int64Kind {
    type Repr = i64;

    const KIND: Kind = Kind::Int64;

    fn is_zero(value: &i64) -> bool {
        *value == 0
    }

    fn sign(value: &i64) -> i32 {
        match *value {
            0 => 0,
            v if v < 0 => -1,
            _ => 1,
        }
    }

    fn is_integral(_: &i64) -> bool {
        true
    }

    fn is_nan(_: &i64) -> bool {
        false
    }

    fn is_positive_infinity(_: &i64) -> bool {
        false
    }

    fn is_negative_infinity(_: &i64) -> bool {
        false
    }

    fn is_infinity(_: &i64) -> bool {
        false
    }

    fn as_i64(value: &i64) -> Result<i64> {
        Ok(*value)
    }

    fn as_i32(value: &i64, min: i32, max: i32) -> Result<i32> {
        let narrowed = i32::try_from(*value)
            .ok()
            .filter(|v| (min..=max).contains(v));
        if narrowed.is_none() {
            debug!("{value} is outside of [{min}, {max}]");
        }

        narrowed.context(OutOfRangeSnafu {
            value: value.to_string(),
        })
    }

    fn can_fit_in_i32(value: &i64) -> bool {
        i32::try_from(*value).is_ok()
    }

    fn can_fit_in_i64(_: &i64) -> bool {
        true
    }

    fn can_truncated_int_fit_in_i32(value: &i64) -> bool {
        Self::can_fit_in_i32(value)
    }

    fn can_truncated_int_fit_in_i64(_: &i64) -> bool {
        true
    }

    fn as_f64(value: &i64) -> f64 {
        *value as f64
    }

    fn as_f32(value: &i64) -> f32 {
        *value as f32
    }

    fn can_fit_in_f64(value: &i64) -> bool {
        Self::fits_in_significand(*value, f64::MANTISSA_DIGITS)
    }

    fn can_fit_in_f32(value: &i64) -> bool {
        Self::fits_in_significand(*value, f32::MANTISSA_DIGITS)
    }

    fn negate(value: &i64) -> NumberValue {
        value
            .checked_neg()
            .map_or_else(Self::widened_min, NumberValue::Int64)
    }

    fn abs(value: &i64) -> NumberValue {
        value
            .checked_abs()
            .map_or_else(Self::widened_min, NumberValue::Int64)
    }

    fn as_extended_decimal(value: &i64) -> Result<ExtendedDecimal> {
        Ok(ExtendedDecimal::from_i64(*value))
    }

    fn as_extended_float(value: &i64) -> Result<ExtendedFloat> {
        Ok(ExtendedFloat::from_i64(*value))
    }

    fn as_extended_rational(value: &i64) -> Result<BigRational> {
        Ok(BigRational::from_integer(BigInt::from(*value)))
    }

    fn as_big_integer(value: &i64) -> Result<BigInt> {
        Ok(BigInt::from(*value))
    }
}
