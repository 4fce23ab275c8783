use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{Signed, ToPrimitive, Zero};
use snafu::OptionExt;
use tracing::debug;

use crate::{
    kind::{BinaryFormat, NumberKind, OutOfRangeSnafu, Result},
    types::{ExtendedDecimal, ExtendedFloat, Kind, NumberValue},
};

/// Numbers stored as an arbitrary-precision integer.
///
/// Always integral and finite. Negation never changes kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BigIntegerKind;

impl NumberKind for BigIntegerKind {
    type Repr = BigInt;

    const KIND: Kind = Kind::BigInteger;

    fn is_zero(value: &BigInt) -> bool {
        value.is_zero()
    }

    fn sign(value: &BigInt) -> i32 {
        if value.is_zero() {
            0
        } else if value.is_negative() {
            -1
        } else {
            1
        }
    }

    fn is_integral(_: &BigInt) -> bool {
        true
    }

    fn is_nan(_: &BigInt) -> bool {
        false
    }

    fn is_positive_infinity(_: &BigInt) -> bool {
        false
    }

    fn is_negative_infinity(_: &BigInt) -> bool {
        false
    }

    fn as_i64(value: &BigInt) -> Result<i64> {
        value.to_i64().context(OutOfRangeSnafu {
            value: value.to_string(),
        })
    }

    fn as_i32(value: &BigInt, min: i32, max: i32) -> Result<i32> {
        let narrowed = value.to_i32().filter(|v| (min..=max).contains(v));
        if narrowed.is_none() {
            debug!("{value} is outside of [{min}, {max}]");
        }

        narrowed.context(OutOfRangeSnafu {
            value: value.to_string(),
        })
    }

    fn can_fit_in_i32(value: &BigInt) -> bool {
        value.to_i32().is_some()
    }

    fn can_fit_in_i64(value: &BigInt) -> bool {
        value.to_i64().is_some()
    }

    fn can_truncated_int_fit_in_i32(value: &BigInt) -> bool {
        Self::can_fit_in_i32(value)
    }

    fn can_truncated_int_fit_in_i64(value: &BigInt) -> bool {
        Self::can_fit_in_i64(value)
    }

    fn as_f64(value: &BigInt) -> f64 {
        value.to_f64().unwrap_or_else(|| infinity_f64(value))
    }

    fn as_f32(value: &BigInt) -> f32 {
        value
            .to_f32()
            .unwrap_or_else(|| infinity_f64(value) as f32)
    }

    fn can_fit_in_f64(value: &BigInt) -> bool {
        BinaryFormat::DOUBLE.holds(value, &BigInt::zero())
    }

    fn can_fit_in_f32(value: &BigInt) -> bool {
        BinaryFormat::SINGLE.holds(value, &BigInt::zero())
    }

    fn negate(value: &BigInt) -> NumberValue {
        NumberValue::BigInteger(-value)
    }

    fn abs(value: &BigInt) -> NumberValue {
        NumberValue::BigInteger(value.abs())
    }

    fn as_extended_decimal(value: &BigInt) -> Result<ExtendedDecimal> {
        Ok(ExtendedDecimal::from_integer(value.clone()))
    }

    fn as_extended_float(value: &BigInt) -> Result<ExtendedFloat> {
        Ok(ExtendedFloat::from_integer(value.clone()))
    }

    fn as_extended_rational(value: &BigInt) -> Result<BigRational> {
        Ok(BigRational::from_integer(value.clone()))
    }

    fn as_big_integer(value: &BigInt) -> Result<BigInt> {
        Ok(value.clone())
    }
}

fn infinity_f64(value: &BigInt) -> f64 {
    if value.is_negative() {
        f64::NEG_INFINITY
    } else {
        f64::INFINITY
    }
}
