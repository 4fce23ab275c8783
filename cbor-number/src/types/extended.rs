use std::{fmt, marker::PhantomData};

use num_bigint::BigInt;
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::{Signed, ToPrimitive, Zero};

use crate::types::Kind;

/// Largest power of the radix a conversion is allowed to materialize, counted on
/// top of the mantissa's bit length when the power divides the mantissa.
///
/// Values such as `1E4000000000` are valid, but expanding them to an integer or a
/// rational would allocate gigabytes. Conversions that need a larger scale report
/// the value as out of range instead.
pub const MAX_SCALE: u64 = 1 << 20;

mod private {
    pub trait Sealed {}

    impl Sealed for super::Decimal {}
    impl Sealed for super::Binary {}
}

/// The base an [`Extended`] value's exponent is applied to.
///
/// Implemented only by [`Decimal`] and [`Binary`].
pub trait Radix:
    private::Sealed + fmt::Debug + Clone + Copy + PartialEq + Eq + std::hash::Hash + Default
{
    /// Numeric base of the exponent.
    const RADIX: u32;
    /// `log2(RADIX)`, used for magnitude estimates.
    const LOG2: f64;
    /// Marker separating mantissa and exponent in the textual form.
    const EXPONENT_MARK: char;
    /// Appended to NaN and infinities in the textual form.
    const SPECIAL_SUFFIX: &'static str;
    /// Tag of the `NumberValue` variant carrying this representation.
    const KIND: Kind;

    /// Returns `true` if `RADIX^scale` divides the non-zero `mantissa`.
    fn divides(mantissa: &BigInt, scale: &BigInt) -> bool;

    /// Rewrites the finite `mantissa * RADIX^exponent` as `(m, e)` denoting `m * 2^e`.
    ///
    /// `None` when the value has no such exact form or the rewrite needs a scale
    /// above [`MAX_SCALE`].
    fn to_binary(mantissa: &BigInt, exponent: &BigInt) -> Option<(BigInt, BigInt)>;

    /// Rewrites the finite `mantissa * RADIX^exponent` as `(m, e)` denoting `m * 10^e`.
    ///
    /// `None` when the rewrite needs a scale above [`MAX_SCALE`].
    fn to_decimal(mantissa: &BigInt, exponent: &BigInt) -> Option<(BigInt, BigInt)>;
}

/// Radix 10: `mantissa * 10^exponent`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Decimal;

/// Radix 2: `mantissa * 2^exponent`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Binary;

impl Radix for Decimal {
    const RADIX: u32 = 10;
    const LOG2: f64 = std::f64::consts::LOG2_10;
    const EXPONENT_MARK: char = 'E';
    const SPECIAL_SUFFIX: &'static str = "";
    const KIND: Kind = Kind::Decimal;

    // |mantissa| < 2^bits <= 10^bits, so no larger scale can divide it.
    fn divides(mantissa: &BigInt, scale: &BigInt) -> bool {
        *scale < BigInt::from(mantissa.bits())
            && scale_power(10, scale, mantissa).is_some_and(|divisor| (mantissa % divisor).is_zero())
    }

    fn to_binary(mantissa: &BigInt, exponent: &BigInt) -> Option<(BigInt, BigInt)> {
        if mantissa.is_zero() {
            return Some((BigInt::zero(), BigInt::zero()));
        }
        // m * 10^e == (m * 5^e) * 2^e
        if !exponent.is_negative() {
            return Some((mantissa * power(5, exponent)?, exponent.clone()));
        }

        // m * 10^-k is dyadic iff 5^k divides m, impossible once 5^k > 2^bits > |m|.
        let scale = -exponent;
        if scale >= BigInt::from(mantissa.bits()) {
            return None;
        }
        let (quotient, remainder) = mantissa.div_rem(&scale_power(5, &scale, mantissa)?);
        remainder
            .is_zero()
            .then(|| (quotient, exponent.clone()))
    }

    fn to_decimal(mantissa: &BigInt, exponent: &BigInt) -> Option<(BigInt, BigInt)> {
        Some((mantissa.clone(), exponent.clone()))
    }
}

impl Radix for Binary {
    const RADIX: u32 = 2;
    const LOG2: f64 = 1.0;
    const EXPONENT_MARK: char = 'p';
    const SPECIAL_SUFFIX: &'static str = "p";
    const KIND: Kind = Kind::BinaryFloat;

    fn divides(mantissa: &BigInt, scale: &BigInt) -> bool {
        mantissa
            .trailing_zeros()
            .is_some_and(|shift| BigInt::from(shift) >= *scale)
    }

    fn to_binary(mantissa: &BigInt, exponent: &BigInt) -> Option<(BigInt, BigInt)> {
        Some((mantissa.clone(), exponent.clone()))
    }

    fn to_decimal(mantissa: &BigInt, exponent: &BigInt) -> Option<(BigInt, BigInt)> {
        if mantissa.is_zero() {
            return Some((BigInt::zero(), BigInt::zero()));
        }
        if !exponent.is_negative() {
            return Some((mantissa * power(2, exponent)?, BigInt::zero()));
        }

        // m * 2^-k == (m * 5^k) * 10^-k
        let scale = -exponent;
        Some((mantissa * scale_power(5, &scale, mantissa)?, exponent.clone()))
    }
}

/// Arbitrary-precision decimal float, `mantissa * 10^exponent`.
pub type ExtendedDecimal = Extended<Decimal>;

/// Arbitrary-precision binary float, `mantissa * 2^exponent`.
pub type ExtendedFloat = Extended<Binary>;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum Repr {
    Finite { mantissa: BigInt, exponent: BigInt },
    Infinity { negative: bool },
    NaN,
}

/// An arbitrary-precision floating-point value in radix `R`.
///
/// Either a finite `mantissa * R^exponent` with both parts unbounded, a signed
/// infinity or NaN. The value is not normalized: equality compares the stored
/// representation, so `1E1` and `10E0` are different values that denote the same
/// number.
///
/// This type only carries the value. Arithmetic on the parts is done with
/// [`num_bigint::BigInt`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Extended<R: Radix> {
    repr: Repr,
    radix: PhantomData<R>,
}

impl<R: Radix> Extended<R> {
    fn from_repr(repr: Repr) -> Self {
        Self {
            repr,
            radix: PhantomData,
        }
    }

    /// Creates a finite value equal to `mantissa * R^exponent`.
    pub fn new(mantissa: impl Into<BigInt>, exponent: impl Into<BigInt>) -> Self {
        Self::from_repr(Repr::Finite {
            mantissa: mantissa.into(),
            exponent: exponent.into(),
        })
    }

    /// Creates an integral value with a zero exponent. Exact for every input.
    pub fn from_integer(value: impl Into<BigInt>) -> Self {
        Self::new(value, BigInt::zero())
    }

    /// Creates an integral value from a 64-bit signed integer. Exact and total.
    pub fn from_i64(value: i64) -> Self {
        Self::from_integer(value)
    }

    pub fn nan() -> Self {
        Self::from_repr(Repr::NaN)
    }

    pub fn infinity(negative: bool) -> Self {
        Self::from_repr(Repr::Infinity { negative })
    }

    pub fn positive_infinity() -> Self {
        Self::infinity(false)
    }

    pub fn negative_infinity() -> Self {
        Self::infinity(true)
    }

    /// Returns the mantissa of a finite value, `None` for NaN and infinities.
    pub fn mantissa(&self) -> Option<&BigInt> {
        match &self.repr {
            Repr::Finite { mantissa, .. } => Some(mantissa),
            _ => None,
        }
    }

    /// Returns the exponent of a finite value, `None` for NaN and infinities.
    pub fn exponent(&self) -> Option<&BigInt> {
        match &self.repr {
            Repr::Finite { exponent, .. } => Some(exponent),
            _ => None,
        }
    }

    /// Returns both parts of a finite value.
    pub fn parts(&self) -> Option<(&BigInt, &BigInt)> {
        match &self.repr {
            Repr::Finite { mantissa, exponent } => Some((mantissa, exponent)),
            _ => None,
        }
    }

    pub fn is_nan(&self) -> bool {
        matches!(self.repr, Repr::NaN)
    }

    pub fn is_infinity(&self) -> bool {
        matches!(self.repr, Repr::Infinity { .. })
    }

    pub fn is_positive_infinity(&self) -> bool {
        matches!(self.repr, Repr::Infinity { negative: false })
    }

    pub fn is_negative_infinity(&self) -> bool {
        matches!(self.repr, Repr::Infinity { negative: true })
    }

    pub fn is_finite(&self) -> bool {
        matches!(self.repr, Repr::Finite { .. })
    }

    pub fn is_zero(&self) -> bool {
        self.mantissa().is_some_and(Zero::is_zero)
    }

    /// Returns -1, 0 or 1. NaN has no sign and reports 0.
    pub fn sign(&self) -> i32 {
        match &self.repr {
            Repr::Finite { mantissa, .. } => {
                if mantissa.is_zero() {
                    0
                } else if mantissa.is_negative() {
                    -1
                } else {
                    1
                }
            }
            Repr::Infinity { negative: true } => -1,
            Repr::Infinity { negative: false } => 1,
            Repr::NaN => 0,
        }
    }

    /// Returns `true` if the value is finite and has no fractional part.
    pub fn is_integral(&self) -> bool {
        let Some((mantissa, exponent)) = self.parts() else {
            return false;
        };
        if mantissa.is_zero() || !exponent.is_negative() {
            return true;
        }

        R::divides(mantissa, &-exponent)
    }

    pub fn negate(&self) -> Self {
        match &self.repr {
            Repr::Finite { mantissa, exponent } => Self::new(-mantissa, exponent.clone()),
            Repr::Infinity { negative } => Self::infinity(!negative),
            Repr::NaN => Self::nan(),
        }
    }

    pub fn abs(&self) -> Self {
        match &self.repr {
            Repr::Finite { mantissa, exponent } => Self::new(mantissa.abs(), exponent.clone()),
            Repr::Infinity { .. } => Self::positive_infinity(),
            Repr::NaN => Self::nan(),
        }
    }

    /// Estimates `log2(|self|)` for finite non-zero values.
    pub(crate) fn approximate_log2(&self) -> Option<f64> {
        let (mantissa, exponent) = self.parts()?;
        if mantissa.is_zero() {
            return None;
        }
        Some(mantissa.bits() as f64 + exponent.to_f64()? * R::LOG2)
    }

    /// Returns the value truncated toward zero.
    ///
    /// `None` when the value is not finite or its positive exponent exceeds
    /// [`MAX_SCALE`].
    pub fn truncate(&self) -> Option<BigInt> {
        let (mantissa, exponent) = self.parts()?;
        if mantissa.is_zero() {
            return Some(BigInt::zero());
        }
        if !exponent.is_negative() {
            return Some(mantissa * radix_power::<R>(exponent)?);
        }

        // |mantissa| < 2^bits <= R^bits, so any larger scale truncates to zero.
        let scale = -exponent;
        if scale >= BigInt::from(mantissa.bits()) {
            return Some(BigInt::zero());
        }
        Some(mantissa / scale_power(R::RADIX, &scale, mantissa)?)
    }

    /// Returns the exact value as a normalized rational.
    ///
    /// `None` when the value is not finite, or when its exponent exceeds [`MAX_SCALE`]
    /// or, if negative, the mantissa size plus [`MAX_SCALE`].
    pub fn to_rational(&self) -> Option<BigRational> {
        let (mantissa, exponent) = self.parts()?;
        if mantissa.is_zero() {
            return Some(BigRational::zero());
        }
        if exponent.is_negative() {
            Some(BigRational::new(
                mantissa.clone(),
                scale_power(R::RADIX, &-exponent, mantissa)?,
            ))
        } else {
            Some(BigRational::from_integer(
                mantissa * radix_power::<R>(exponent)?,
            ))
        }
    }
}

/// Returns `R^exponent` when `0 <= exponent <= MAX_SCALE`.
pub(crate) fn radix_power<R: Radix>(exponent: &BigInt) -> Option<BigInt> {
    power(R::RADIX, exponent)
}

/// Returns `base^exponent` when `0 <= exponent <= MAX_SCALE`.
pub(crate) fn power(base: u32, exponent: &BigInt) -> Option<BigInt> {
    bounded_power(base, exponent, MAX_SCALE)
}

/// Returns `base^scale` for a scale applied to `mantissa`, when `scale` is at most
/// the bit length of `mantissa` plus [`MAX_SCALE`]. The power then stays within a
/// constant factor of the mantissa's own size.
pub(crate) fn scale_power(base: u32, scale: &BigInt, mantissa: &BigInt) -> Option<BigInt> {
    bounded_power(base, scale, mantissa.bits().saturating_add(MAX_SCALE))
}

fn bounded_power(base: u32, exponent: &BigInt, limit: u64) -> Option<BigInt> {
    let exponent = exponent.to_u64().filter(|e| *e <= limit)?;
    let exponent = u32::try_from(exponent).ok()?;
    Some(BigInt::from(base).pow(exponent))
}

impl<R: Radix> From<i64> for Extended<R> {
    fn from(value: i64) -> Self {
        Self::from_i64(value)
    }
}

impl<R: Radix> From<BigInt> for Extended<R> {
    fn from(value: BigInt) -> Self {
        Self::from_integer(value)
    }
}

/// Finite values print as `{mantissa}{mark}{exponent}` with `E` for decimals and
/// `p` for binary floats, e.g. `15E-1` and `3p-2`. Binary NaN and infinities carry
/// a trailing `p` (`NaNp`, `-Infinityp`) so they read back as binary floats.
impl<R: Radix> fmt::Display for Extended<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.repr {
            Repr::Finite { mantissa, exponent } => {
                write!(f, "{mantissa}{}{exponent}", R::EXPONENT_MARK)
            }
            Repr::Infinity { negative: true } => write!(f, "-Infinity{}", R::SPECIAL_SUFFIX),
            Repr::Infinity { negative: false } => write!(f, "Infinity{}", R::SPECIAL_SUFFIX),
            Repr::NaN => write!(f, "NaN{}", R::SPECIAL_SUFFIX),
        }
    }
}
