//! Construction of decimal fractions (CBOR tag 4) and bigfloats (tag 5).
//!
//! Both tags wrap a two-element array `[exponent, mantissa]` of integers. Decoding
//! the array is up to the codec; these functions validate the two decoded items
//! and build the number they denote.

use num_bigint::BigInt;
use num_traits::Zero;
use snafu::{ResultExt, Snafu};
use tracing::trace;

use crate::types::{Binary, Decimal, Extended, NumberValue, Radix};

/// Tag number of a decimal fraction, `mantissa * 10^exponent`.
pub const DECIMAL_FRACTION_TAG: u64 = 4;
/// Tag number of a bigfloat, `mantissa * 2^exponent`.
pub const BIG_FLOAT_TAG: u64 = 5;

#[derive(Debug, Snafu)]
pub struct Error(error::Error);
type Result<T> = std::result::Result<T, Error>;

/// Builds the value of a decimal fraction from its decoded items.
///
/// When `extended` is `false`, exponents are limited to 64 bits as required by
/// RFC 8949. A zero exponent yields the mantissa itself as an integer.
///
/// # Errors
/// Returns an error if either item is not integral, or if the exponent needs more
/// than 64 bits and `extended` is `false`.
pub fn decimal_fraction(
    exponent: &NumberValue,
    mantissa: &NumberValue,
    extended: bool,
) -> Result<NumberValue> {
    build::<Decimal>(exponent, mantissa, extended)
}

/// Builds the value of a bigfloat from its decoded items.
///
/// Same rules as [`decimal_fraction`], with radix 2.
///
/// # Errors
/// Returns an error if either item is not integral, or if the exponent needs more
/// than 64 bits and `extended` is `false`.
pub fn big_float(
    exponent: &NumberValue,
    mantissa: &NumberValue,
    extended: bool,
) -> Result<NumberValue> {
    build::<Binary>(exponent, mantissa, extended)
}

fn build<R: Radix>(
    exponent: &NumberValue,
    mantissa: &NumberValue,
    extended: bool,
) -> Result<NumberValue>
where
    NumberValue: From<Extended<R>>,
{
    let exponent = integer(exponent, "Exponent")?;
    let mantissa = integer(mantissa, "Mantissa")?;

    if exponent.bits() > 64 && !extended {
        return Err(error::Error::ExponentTooBig {
            exponent: exponent.to_string(),
        }
        .into());
    }
    if exponent.is_zero() {
        trace!("Zero exponent, reading {mantissa} as an integer");
        return Ok(NumberValue::BigInteger(mantissa).narrowed());
    }

    Ok(Extended::<R>::new(mantissa, exponent).into())
}

fn integer(item: &NumberValue, which: &'static str) -> Result<BigInt> {
    if !item.is_integral() {
        return Err(error::Error::NotIntegral {
            which,
            value: item.to_string(),
        }
        .into());
    }

    item.as_big_integer()
        .context(error::ConversionSnafu { which })
        .map_err(Into::into)
}

mod error {
    use snafu::Snafu;

    #[derive(Debug, Snafu)]
    #[snafu(visibility(pub(super)))]
    pub(super) enum Error {
        #[snafu(display("{which} is not an integer: {value}"))]
        NotIntegral { which: &'static str, value: String },

        #[snafu(display("Exponent is too big: {exponent}"))]
        ExponentTooBig { exponent: String },

        #[snafu(display("{which} cannot be read as an integer"))]
        Conversion {
            which: &'static str,
            source: crate::kind::Error,
        },
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::types::{ExtendedDecimal, ExtendedFloat, Kind};

    #[test]
    fn test_decimal_fraction() {
        let value = decimal_fraction(&NumberValue::Int64(-2), &NumberValue::Int64(27315), false)
            .unwrap();

        assert_eq!(value, NumberValue::Decimal(ExtendedDecimal::new(27315, -2)));
        assert_eq!(value.as_i64().unwrap(), 273);
        assert!(!value.is_integral());
    }

    #[test]
    fn test_big_float() {
        let value = big_float(&NumberValue::Int64(-1), &NumberValue::Int64(3), false).unwrap();

        assert_eq!(value, NumberValue::BinaryFloat(ExtendedFloat::new(3, -1)));
        assert_eq!(value.as_f64(), 1.5);
        assert!(value.can_fit_in_f32());
    }

    #[test]
    fn test_zero_exponent_returns_mantissa() {
        let value = decimal_fraction(&NumberValue::Int64(0), &NumberValue::Int64(5), false)
            .unwrap();
        assert_eq!(value, NumberValue::Int64(5));

        let wide: BigInt = "36893488147419103232".parse().unwrap();
        let value = big_float(
            &NumberValue::Int64(0),
            &NumberValue::BigInteger(wide.clone()),
            false,
        )
        .unwrap();
        assert_eq!(value, NumberValue::BigInteger(wide));
    }

    #[test]
    fn test_exponent_size_limit() {
        let huge = NumberValue::BigInteger(BigInt::from(1) << 64u32);

        let err = decimal_fraction(&huge, &NumberValue::Int64(1), false).unwrap_err();
        assert!(err.to_string().contains("Exponent is too big"));

        let value = decimal_fraction(&huge, &NumberValue::Int64(1), true).unwrap();
        assert_eq!(value.kind(), Kind::Decimal);
    }

    #[test]
    fn test_items_must_be_integral() {
        let half = NumberValue::Decimal(ExtendedDecimal::new(5, -1));

        let err = decimal_fraction(&half, &NumberValue::Int64(1), false).unwrap_err();
        assert!(err.to_string().contains("Exponent is not an integer"));

        let err = big_float(&NumberValue::Int64(1), &half, false).unwrap_err();
        assert!(err.to_string().contains("Mantissa is not an integer"));

        let nan = NumberValue::Decimal(ExtendedDecimal::nan());
        assert!(big_float(&NumberValue::Int64(1), &nan, false).is_err());
    }

    #[test]
    fn test_items_too_large_to_expand() {
        let huge = NumberValue::Decimal(ExtendedDecimal::new(1, 2_000_000));

        let err = decimal_fraction(&huge, &NumberValue::Int64(1), true).unwrap_err();
        assert!(err.to_string().contains("Exponent cannot be read as an integer"));
    }
}
