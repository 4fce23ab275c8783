use num_bigint::BigInt;
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::{One, Signed, ToPrimitive, Zero};
use snafu::OptionExt;
use tracing::debug;

use crate::{
    kind::{BinaryFormat, InexactSnafu, NumberKind, OutOfRangeSnafu, Result},
    types::{ExtendedDecimal, ExtendedFloat, Kind, NumberValue, extended::power},
};

/// Numbers stored as a normalized fraction of arbitrary-precision integers.
///
/// Always finite. Conversions to the extended floats succeed only when the
/// denominator allows a terminating expansion in the target radix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RationalKind;

impl RationalKind {
    fn truncated(value: &BigRational) -> BigInt {
        value.numer() / value.denom()
    }

    /// Returns `k` if the denominator is exactly `2^k`.
    fn binary_scale(value: &BigRational) -> Option<u64> {
        let denom = value.denom();
        let shift = denom.trailing_zeros()?;
        (denom.bits() == shift + 1).then_some(shift)
    }

    /// Splits the denominator into `2^twos * 5^fives`, or `None` if it has any
    /// other prime factor.
    fn decimal_factors(value: &BigRational) -> Option<(u64, u64)> {
        let denom = value.denom();
        let twos = denom.trailing_zeros()?;
        let mut rest: BigInt = denom >> twos;
        let five = BigInt::from(5);
        let mut fives = 0;
        loop {
            let (quotient, remainder) = rest.div_rem(&five);
            if !remainder.is_zero() {
                break;
            }
            rest = quotient;
            fives += 1;
        }

        rest.is_one().then_some((twos, fives))
    }
}

impl NumberKind for RationalKind {
    type Repr = BigRational;

    const KIND: Kind = Kind::Rational;

    fn is_zero(value: &BigRational) -> bool {
        value.is_zero()
    }

    fn sign(value: &BigRational) -> i32 {
        if value.is_zero() {
            0
        } else if value.is_negative() {
            -1
        } else {
            1
        }
    }

    fn is_integral(value: &BigRational) -> bool {
        value.is_integer()
    }

    fn is_nan(_: &BigRational) -> bool {
        false
    }

    fn is_positive_infinity(_: &BigRational) -> bool {
        false
    }

    fn is_negative_infinity(_: &BigRational) -> bool {
        false
    }

    fn as_i64(value: &BigRational) -> Result<i64> {
        Self::truncated(value).to_i64().context(OutOfRangeSnafu {
            value: value.to_string(),
        })
    }

    fn as_i32(value: &BigRational, min: i32, max: i32) -> Result<i32> {
        let narrowed = Self::truncated(value)
            .to_i32()
            .filter(|v| (min..=max).contains(v));
        if narrowed.is_none() {
            debug!("{value} truncates outside of [{min}, {max}]");
        }

        narrowed.context(OutOfRangeSnafu {
            value: value.to_string(),
        })
    }

    fn can_fit_in_i32(value: &BigRational) -> bool {
        value.is_integer() && value.numer().to_i32().is_some()
    }

    fn can_fit_in_i64(value: &BigRational) -> bool {
        value.is_integer() && value.numer().to_i64().is_some()
    }

    fn can_truncated_int_fit_in_i32(value: &BigRational) -> bool {
        Self::truncated(value).to_i32().is_some()
    }

    fn can_truncated_int_fit_in_i64(value: &BigRational) -> bool {
        Self::truncated(value).to_i64().is_some()
    }

    fn as_f64(value: &BigRational) -> f64 {
        value.to_f64().unwrap_or(f64::NAN)
    }

    /// Rounds through `f64`.
    fn as_f32(value: &BigRational) -> f32 {
        Self::as_f64(value) as f32
    }

    fn can_fit_in_f64(value: &BigRational) -> bool {
        Self::binary_scale(value).is_some_and(|shift| {
            BinaryFormat::DOUBLE.holds(value.numer(), &-BigInt::from(shift))
        })
    }

    fn can_fit_in_f32(value: &BigRational) -> bool {
        Self::binary_scale(value).is_some_and(|shift| {
            BinaryFormat::SINGLE.holds(value.numer(), &-BigInt::from(shift))
        })
    }

    fn negate(value: &BigRational) -> NumberValue {
        NumberValue::Rational(-value)
    }

    fn abs(value: &BigRational) -> NumberValue {
        NumberValue::Rational(value.abs())
    }

    fn as_extended_decimal(value: &BigRational) -> Result<ExtendedDecimal> {
        let (twos, fives) = Self::decimal_factors(value).context(InexactSnafu {
            value: value.to_string(),
            target: "decimal",
        })?;

        // n / (2^a * 5^b) == n * 2^(k-a) * 5^(k-b) / 10^k with k = max(a, b)
        let scale = twos.max(fives);
        let mantissa = power(2, &BigInt::from(scale - twos))
            .zip(power(5, &BigInt::from(scale - fives)))
            .map(|(two, five)| value.numer() * two * five)
            .context(OutOfRangeSnafu {
                value: value.to_string(),
            })?;

        Ok(ExtendedDecimal::new(mantissa, -BigInt::from(scale)))
    }

    fn as_extended_float(value: &BigRational) -> Result<ExtendedFloat> {
        let shift = Self::binary_scale(value).context(InexactSnafu {
            value: value.to_string(),
            target: "binary float",
        })?;

        Ok(ExtendedFloat::new(
            value.numer().clone(),
            -BigInt::from(shift),
        ))
    }

    fn as_extended_rational(value: &BigRational) -> Result<BigRational> {
        Ok(value.clone())
    }

    fn as_big_integer(value: &BigRational) -> Result<BigInt> {
        Ok(Self::truncated(value))
    }
}
