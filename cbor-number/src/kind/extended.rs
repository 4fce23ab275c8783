use std::marker::PhantomData;

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{Signed, ToPrimitive, Zero};
use snafu::OptionExt;
use tracing::debug;

use crate::{
    kind::{
        BinaryFormat, InexactSnafu, NotFiniteSnafu, NumberKind, OutOfRangeSnafu, Result,
    },
    types::{
        Binary, Decimal, Extended, ExtendedDecimal, ExtendedFloat, Kind, NumberValue, Radix,
    },
};

/// Numbers stored as an arbitrary-precision float in radix `R`.
///
/// The only kinds that can hold NaN and infinities. NaN and infinities are exactly
/// representable in `f32` and `f64`, so they pass the floating-point fit checks,
/// but fail every integer conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtendedKind<R>(PhantomData<R>);

/// Numbers stored as `mantissa * 10^exponent`.
pub type DecimalKind = ExtendedKind<Decimal>;

/// Numbers stored as `mantissa * 2^exponent`.
pub type BinaryFloatKind = ExtendedKind<Binary>;

impl<R: Radix> ExtendedKind<R> {
    /// Truncates toward zero, skipping values whose magnitude is at least `2^64`.
    ///
    /// `R^exponent >= 2^exponent`, so a non-zero mantissa with an exponent of 64 or
    /// more can never fit a 64-bit integer and is not expanded.
    fn truncated_small(value: &Extended<R>) -> Option<BigInt> {
        let (mantissa, exponent) = value.parts()?;
        if !mantissa.is_zero() && *exponent >= BigInt::from(64) {
            return None;
        }
        value.truncate()
    }

    fn fits_format(value: &Extended<R>, format: BinaryFormat) -> bool {
        let Some((mantissa, exponent)) = value.parts() else {
            return true;
        };
        if value
            .approximate_log2()
            .is_some_and(|log2| !format.near_range(log2))
        {
            return false;
        }

        R::to_binary(mantissa, exponent)
            .is_some_and(|(mantissa, exponent)| format.holds(&mantissa, &exponent))
    }

    fn require_finite(value: &Extended<R>) -> Result<()> {
        if value.is_finite() {
            Ok(())
        } else {
            NotFiniteSnafu {
                value: value.to_string(),
            }
            .fail()
        }
    }

    fn convert_special<S: Radix>(value: &Extended<R>) -> Option<Extended<S>> {
        if value.is_nan() {
            Some(Extended::nan())
        } else if value.is_infinity() {
            Some(Extended::infinity(value.is_negative_infinity()))
        } else {
            None
        }
    }
}

/// Expands to zero or the signed infinity for magnitudes outside `f64`, otherwise
/// converts the exact rational.
fn approximate<R: Radix>(value: &Extended<R>) -> f64 {
    if value.is_nan() {
        return f64::NAN;
    }
    if value.is_infinity() {
        return if value.is_negative_infinity() {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }

    let negative = value.sign() < 0;
    match value.approximate_log2() {
        None => 0.0,
        Some(log2) if log2 > 1026.0 => {
            if negative {
                f64::NEG_INFINITY
            } else {
                f64::INFINITY
            }
        }
        Some(log2) if log2 < -1080.0 => {
            if negative {
                -0.0
            } else {
                0.0
            }
        }
        Some(_) => value
            .to_rational()
            .and_then(|rational| rational.to_f64())
            .unwrap_or(f64::NAN),
    }
}

impl<R: Radix> NumberKind for ExtendedKind<R>
where
    NumberValue: From<Extended<R>>,
{
    type Repr = Extended<R>;

    const KIND: Kind = R::KIND;

    fn is_zero(value: &Extended<R>) -> bool {
        value.is_zero()
    }

    fn sign(value: &Extended<R>) -> i32 {
        value.sign()
    }

    fn is_integral(value: &Extended<R>) -> bool {
        value.is_integral()
    }

    fn is_nan(value: &Extended<R>) -> bool {
        value.is_nan()
    }

    fn is_positive_infinity(value: &Extended<R>) -> bool {
        value.is_positive_infinity()
    }

    fn is_negative_infinity(value: &Extended<R>) -> bool {
        value.is_negative_infinity()
    }

    fn is_infinity(value: &Extended<R>) -> bool {
        value.is_infinity()
    }

    fn as_i64(value: &Extended<R>) -> Result<i64> {
        Self::require_finite(value)?;

        Self::truncated_small(value)
            .and_then(|truncated| truncated.to_i64())
            .context(OutOfRangeSnafu {
                value: value.to_string(),
            })
    }

    fn as_i32(value: &Extended<R>, min: i32, max: i32) -> Result<i32> {
        Self::require_finite(value)?;

        let narrowed = Self::truncated_small(value)
            .and_then(|truncated| truncated.to_i32())
            .filter(|v| (min..=max).contains(v));
        if narrowed.is_none() {
            debug!("{value} truncates outside of [{min}, {max}]");
        }

        narrowed.context(OutOfRangeSnafu {
            value: value.to_string(),
        })
    }

    fn can_fit_in_i32(value: &Extended<R>) -> bool {
        value.is_integral() && Self::can_truncated_int_fit_in_i32(value)
    }

    fn can_fit_in_i64(value: &Extended<R>) -> bool {
        value.is_integral() && Self::can_truncated_int_fit_in_i64(value)
    }

    fn can_truncated_int_fit_in_i32(value: &Extended<R>) -> bool {
        Self::truncated_small(value).is_some_and(|truncated| truncated.to_i32().is_some())
    }

    fn can_truncated_int_fit_in_i64(value: &Extended<R>) -> bool {
        Self::truncated_small(value).is_some_and(|truncated| truncated.to_i64().is_some())
    }

    fn as_f64(value: &Extended<R>) -> f64 {
        approximate(value)
    }

    /// Rounds through `f64`, so the result may differ from the correctly rounded
    /// `f32` in the last place.
    fn as_f32(value: &Extended<R>) -> f32 {
        approximate(value) as f32
    }

    fn can_fit_in_f64(value: &Extended<R>) -> bool {
        Self::fits_format(value, BinaryFormat::DOUBLE)
    }

    fn can_fit_in_f32(value: &Extended<R>) -> bool {
        Self::fits_format(value, BinaryFormat::SINGLE)
    }

    fn negate(value: &Extended<R>) -> NumberValue {
        NumberValue::from(value.negate())
    }

    fn abs(value: &Extended<R>) -> NumberValue {
        NumberValue::from(value.abs())
    }

    fn as_extended_decimal(value: &Extended<R>) -> Result<ExtendedDecimal> {
        let Some((mantissa, exponent)) = value.parts() else {
            return Self::convert_special(value).context(NotFiniteSnafu {
                value: value.to_string(),
            });
        };

        R::to_decimal(mantissa, exponent)
            .map(|(mantissa, exponent)| ExtendedDecimal::new(mantissa, exponent))
            .context(OutOfRangeSnafu {
                value: value.to_string(),
            })
    }

    fn as_extended_float(value: &Extended<R>) -> Result<ExtendedFloat> {
        let Some((mantissa, exponent)) = value.parts() else {
            return Self::convert_special(value).context(NotFiniteSnafu {
                value: value.to_string(),
            });
        };

        // Negative exponents only fail when no dyadic form exists; positive ones
        // only when the power is too large to build.
        match R::to_binary(mantissa, exponent) {
            Some((mantissa, exponent)) => Ok(ExtendedFloat::new(mantissa, exponent)),
            None if exponent.is_negative() => InexactSnafu {
                value: value.to_string(),
                target: "binary float",
            }
            .fail(),
            None => OutOfRangeSnafu {
                value: value.to_string(),
            }
            .fail(),
        }
    }

    fn as_extended_rational(value: &Extended<R>) -> Result<BigRational> {
        Self::require_finite(value)?;

        value.to_rational().context(OutOfRangeSnafu {
            value: value.to_string(),
        })
    }

    fn as_big_integer(value: &Extended<R>) -> Result<BigInt> {
        Self::require_finite(value)?;

        value.truncate().context(OutOfRangeSnafu {
            value: value.to_string(),
        })
    }
}
