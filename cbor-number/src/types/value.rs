use std::fmt;

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::ToPrimitive;

use crate::{
    kind::{
        BigIntegerKind, BinaryFloatKind, DecimalKind, Int64Kind, NumberKind, RationalKind, Result,
    },
    types::{ExtendedDecimal, ExtendedFloat},
};

/// Identifies which representation a [`NumberValue`] carries.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Kind {
    Int64,
    BigInteger,
    Decimal,
    BinaryFloat,
    Rational,
}

impl Kind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Kind::Int64 => "int64",
            Kind::BigInteger => "big integer",
            Kind::Decimal => "decimal",
            Kind::BinaryFloat => "binary float",
            Kind::Rational => "rational",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Represents a numeric scalar of a CBOR data item.
///
/// A decoder produces one of these for every integer, bignum (tags 2 and 3),
/// decimal fraction (tag 4), bigfloat (tag 5) and rational (tag 30) it reads. The
/// payload is stored in its concrete representation, and every numeric query goes
/// through the [`NumberKind`] matching the variant.
///
/// # Representations
/// - Integers that fit into 64 bits are kept as `i64`
/// - Larger integers are kept as arbitrary-precision integers
/// - Decimal fractions and bigfloats keep their mantissa and exponent as written
/// - Rationals are kept normalized
///
/// Values are immutable. Operations that change the representation, such as
/// negating `i64::MIN`, return a new value of a different kind.
///
/// # Examples
/// 42              // Int64
/// 18446744073709551616 // BigInteger
/// 15E-1           // Decimal, 1.5
/// 3p-2            // BinaryFloat, 0.75
/// 1/3             // Rational
///
/// Equality is structural: `Int64(1)` and `BigInteger(1)` are different values.
#[derive(Debug, PartialEq, Clone)]
pub enum NumberValue {
    /// An integer stored as a 64-bit signed integer.
    Int64(i64),
    /// An integer of any size.
    BigInteger(BigInt),
    /// `mantissa * 10^exponent`, or a decimal NaN or infinity.
    Decimal(ExtendedDecimal),
    /// `mantissa * 2^exponent`, or a binary NaN or infinity.
    BinaryFloat(ExtendedFloat),
    /// A normalized fraction.
    Rational(BigRational),
}

/// Forwards an operation to the [`NumberKind`] matching the variant.
macro_rules! dispatch {
    ($value:expr, $operation:ident $(, $argument:expr)*) => {
        match $value {
            NumberValue::Int64(v) => Int64Kind::$operation(v $(, $argument)*),
            NumberValue::BigInteger(v) => BigIntegerKind::$operation(v $(, $argument)*),
            NumberValue::Decimal(v) => DecimalKind::$operation(v $(, $argument)*),
            NumberValue::BinaryFloat(v) => BinaryFloatKind::$operation(v $(, $argument)*),
            NumberValue::Rational(v) => RationalKind::$operation(v $(, $argument)*),
        }
    };
}

impl NumberValue {
    pub fn kind(&self) -> Kind {
        match self {
            NumberValue::Int64(_) => Int64Kind::KIND,
            NumberValue::BigInteger(_) => BigIntegerKind::KIND,
            NumberValue::Decimal(_) => DecimalKind::KIND,
            NumberValue::BinaryFloat(_) => BinaryFloatKind::KIND,
            NumberValue::Rational(_) => RationalKind::KIND,
        }
    }

    /// Returns the canonical form a decoder stores: big integers that fit into
    /// 64 bits become [`NumberValue::Int64`]. Other values are returned unchanged.
    pub fn narrowed(self) -> Self {
        match self {
            NumberValue::BigInteger(v) => match v.to_i64() {
                Some(narrow) => NumberValue::Int64(narrow),
                None => NumberValue::BigInteger(v),
            },
            other => other,
        }
    }

    pub fn is_zero(&self) -> bool {
        dispatch!(self, is_zero)
    }

    /// Returns -1, 0 or 1. See [`NumberKind::sign`].
    pub fn sign(&self) -> i32 {
        dispatch!(self, sign)
    }

    pub fn is_integral(&self) -> bool {
        dispatch!(self, is_integral)
    }

    pub fn is_nan(&self) -> bool {
        dispatch!(self, is_nan)
    }

    pub fn is_infinity(&self) -> bool {
        dispatch!(self, is_infinity)
    }

    pub fn is_positive_infinity(&self) -> bool {
        dispatch!(self, is_positive_infinity)
    }

    pub fn is_negative_infinity(&self) -> bool {
        dispatch!(self, is_negative_infinity)
    }

    /// See [`NumberKind::as_i64`].
    pub fn as_i64(&self) -> Result<i64> {
        dispatch!(self, as_i64)
    }

    /// See [`NumberKind::as_i32`].
    pub fn as_i32(&self, min: i32, max: i32) -> Result<i32> {
        dispatch!(self, as_i32, min, max)
    }

    pub fn can_fit_in_i32(&self) -> bool {
        dispatch!(self, can_fit_in_i32)
    }

    pub fn can_fit_in_i64(&self) -> bool {
        dispatch!(self, can_fit_in_i64)
    }

    pub fn can_truncated_int_fit_in_i32(&self) -> bool {
        dispatch!(self, can_truncated_int_fit_in_i32)
    }

    pub fn can_truncated_int_fit_in_i64(&self) -> bool {
        dispatch!(self, can_truncated_int_fit_in_i64)
    }

    pub fn as_f64(&self) -> f64 {
        dispatch!(self, as_f64)
    }

    pub fn as_f32(&self) -> f32 {
        dispatch!(self, as_f32)
    }

    pub fn can_fit_in_f64(&self) -> bool {
        dispatch!(self, can_fit_in_f64)
    }

    pub fn can_fit_in_f32(&self) -> bool {
        dispatch!(self, can_fit_in_f32)
    }

    pub fn negate(&self) -> NumberValue {
        dispatch!(self, negate)
    }

    pub fn abs(&self) -> NumberValue {
        dispatch!(self, abs)
    }

    pub fn as_extended_decimal(&self) -> Result<ExtendedDecimal> {
        dispatch!(self, as_extended_decimal)
    }

    pub fn as_extended_float(&self) -> Result<ExtendedFloat> {
        dispatch!(self, as_extended_float)
    }

    pub fn as_extended_rational(&self) -> Result<BigRational> {
        dispatch!(self, as_extended_rational)
    }

    pub fn as_big_integer(&self) -> Result<BigInt> {
        dispatch!(self, as_big_integer)
    }
}

impl From<i64> for NumberValue {
    fn from(value: i64) -> Self {
        NumberValue::Int64(value)
    }
}

impl From<i32> for NumberValue {
    fn from(value: i32) -> Self {
        NumberValue::Int64(value.into())
    }
}

impl From<BigInt> for NumberValue {
    fn from(value: BigInt) -> Self {
        NumberValue::BigInteger(value)
    }
}

impl From<ExtendedDecimal> for NumberValue {
    fn from(value: ExtendedDecimal) -> Self {
        NumberValue::Decimal(value)
    }
}

impl From<ExtendedFloat> for NumberValue {
    fn from(value: ExtendedFloat) -> Self {
        NumberValue::BinaryFloat(value)
    }
}

impl From<BigRational> for NumberValue {
    fn from(value: BigRational) -> Self {
        NumberValue::Rational(value)
    }
}

/// Rationals always print as `numer/denom`, even when integral, so the text reads
/// back as the same kind. Big integers print as plain digits and read back
/// narrowed, see [`NumberValue::narrowed`].
impl fmt::Display for NumberValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumberValue::Int64(v) => write!(f, "{v}"),
            NumberValue::BigInteger(v) => write!(f, "{v}"),
            NumberValue::Decimal(v) => write!(f, "{v}"),
            NumberValue::BinaryFloat(v) => write!(f, "{v}"),
            NumberValue::Rational(v) => write!(f, "{}/{}", v.numer(), v.denom()),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_kind() {
        let test_cases = [
            (NumberValue::Int64(1), Kind::Int64),
            (NumberValue::BigInteger(BigInt::from(1)), Kind::BigInteger),
            (
                NumberValue::Decimal(ExtendedDecimal::new(1, 1)),
                Kind::Decimal,
            ),
            (
                NumberValue::BinaryFloat(ExtendedFloat::new(1, 1)),
                Kind::BinaryFloat,
            ),
            (
                NumberValue::Rational(BigRational::from_integer(BigInt::from(1))),
                Kind::Rational,
            ),
        ];

        for (value, expected) in test_cases {
            assert_eq!(value.kind(), expected, "kind of {value}");
        }
    }

    #[test]
    fn test_narrowed() {
        assert_eq!(
            NumberValue::BigInteger(BigInt::from(-5)).narrowed(),
            NumberValue::Int64(-5)
        );

        let wide = NumberValue::BigInteger(BigInt::from(u64::MAX));
        assert_eq!(wide.clone().narrowed(), wide);

        let decimal = NumberValue::Decimal(ExtendedDecimal::new(5, 0));
        assert_eq!(decimal.clone().narrowed(), decimal);
    }

    #[test]
    fn test_min_int64_scenario() {
        let value = NumberValue::Int64(i64::MIN);
        let widened = NumberValue::BigInteger("9223372036854775808".parse().unwrap());

        assert_eq!(value.negate(), widened);
        assert_eq!(value.abs(), widened);
        assert_eq!(value.negate().kind(), Kind::BigInteger);
        assert!(!value.can_fit_in_i32());
        assert!(value.can_fit_in_i64());
        assert!(value.can_fit_in_f32());
        assert!(value.can_fit_in_f64());
        assert_eq!(value.sign(), -1);
    }

    #[test]
    fn test_two_pow_24_plus_one_scenario() {
        let value = NumberValue::Int64(16_777_217);

        assert!(!value.can_fit_in_f32());
        assert!(value.can_fit_in_f64());
        assert_eq!(value.as_f32(), 16_777_216.0);
        assert_eq!(value.as_f64(), 16_777_217.0);
    }

    #[test]
    fn test_dispatch_forwards_arguments() {
        let value = NumberValue::Decimal(ExtendedDecimal::new(1275, -1));

        assert_eq!(value.as_i32(0, 200), Ok(127));
        assert!(value.as_i32(0, 100).unwrap_err().is_out_of_range());
    }

    #[test]
    fn test_display() {
        let test_cases = [
            (NumberValue::Int64(-42), "-42"),
            (
                NumberValue::BigInteger("18446744073709551616".parse().unwrap()),
                "18446744073709551616",
            ),
            (NumberValue::Decimal(ExtendedDecimal::new(15, -1)), "15E-1"),
            (NumberValue::BinaryFloat(ExtendedFloat::new(3, -2)), "3p-2"),
            (
                NumberValue::Decimal(ExtendedDecimal::negative_infinity()),
                "-Infinity",
            ),
            (NumberValue::Decimal(ExtendedDecimal::nan()), "NaN"),
            (NumberValue::BinaryFloat(ExtendedFloat::nan()), "NaNp"),
            (
                NumberValue::BinaryFloat(ExtendedFloat::positive_infinity()),
                "Infinityp",
            ),
            (
                NumberValue::Rational(BigRational::from_integer(BigInt::from(4))),
                "4/1",
            ),
            (
                NumberValue::Rational(BigRational::new(BigInt::from(2), BigInt::from(-6))),
                "-1/3",
            ),
        ];

        for (value, expected) in test_cases {
            assert_eq!(value.to_string(), expected);
        }
    }
}
