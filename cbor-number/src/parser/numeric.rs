use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::{tag, tag_no_case},
    character::complete::{digit1, one_of},
    combinator::{cut, map_opt, opt, verify},
    sequence::preceded,
};
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::Zero;

use crate::types::{ExtendedDecimal, ExtendedFloat, NumberValue};

/// Parses a numeric literal from a byte slice.
///
/// Accepted forms:
/// - `[+-]digits` integers, kept as `Int64` when they fit
/// - `[+-]digits[.digits][e[+-]digits]` decimal fractions
/// - `[+-]digits p [+-]digits` bigfloats, `mantissa * 2^exponent`
/// - `[+-]digits/digits` rationals
/// - `NaN`, `[+-]Infinity` and `[+-]Inf`, case-insensitive, as decimal specials,
///   or as binary float specials when followed by `p`
///
/// A zero denominator fails with `ErrorKind::Verify` and is not recoverable.
pub fn numeric(input: &[u8]) -> IResult<&[u8], NumberValue> {
    alt((special, finite)).parse(input)
}

fn sign(input: &[u8]) -> IResult<&[u8], bool> {
    opt(one_of("+-"))
        .map(|sign| sign == Some('-'))
        .parse(input)
}

fn unsigned(input: &[u8]) -> IResult<&[u8], BigInt> {
    map_opt(digit1, |digits: &[u8]| BigInt::parse_bytes(digits, 10)).parse(input)
}

fn signed(input: &[u8]) -> IResult<&[u8], BigInt> {
    (sign, unsigned)
        .map(|(negative, magnitude)| if negative { -magnitude } else { magnitude })
        .parse(input)
}

fn binary_mark(input: &[u8]) -> IResult<&[u8], bool> {
    opt(one_of("pP")).map(|mark| mark.is_some()).parse(input)
}

/// NaN and infinities. A trailing `p` selects the binary float kind.
fn special(input: &[u8]) -> IResult<&[u8], NumberValue> {
    alt((
        preceded(tag_no_case("nan"), binary_mark).map(|binary| {
            if binary {
                NumberValue::BinaryFloat(ExtendedFloat::nan())
            } else {
                NumberValue::Decimal(ExtendedDecimal::nan())
            }
        }),
        (
            sign,
            alt((tag_no_case("infinity"), tag_no_case("inf"))),
            binary_mark,
        )
            .map(|(negative, _, binary)| {
                if binary {
                    NumberValue::BinaryFloat(ExtendedFloat::infinity(negative))
                } else {
                    NumberValue::Decimal(ExtendedDecimal::infinity(negative))
                }
            }),
    ))
    .parse(input)
}

fn finite(input: &[u8]) -> IResult<&[u8], NumberValue> {
    let (input, (negative, digits)) = (sign, digit1).parse(input)?;
    let mantissa = move |digits: &[u8]| {
        BigInt::parse_bytes(digits, 10).map(|magnitude| if negative { -magnitude } else { magnitude })
    };

    alt((
        preceded(tag("/"), cut(verify(unsigned, |denom: &BigInt| !denom.is_zero())))
            .map_opt(move |denom| {
                Some(NumberValue::Rational(BigRational::new(mantissa(digits)?, denom)))
            }),
        preceded(one_of("pP"), cut(signed)).map_opt(move |exponent| {
            Some(NumberValue::BinaryFloat(ExtendedFloat::new(
                mantissa(digits)?,
                exponent,
            )))
        }),
        (
            opt(preceded(tag("."), cut(digit1))),
            opt(preceded(one_of("eE"), cut(signed))),
        )
            .map_opt(move |(fraction, exponent): (Option<&[u8]>, Option<BigInt>)| {
                if fraction.is_none() && exponent.is_none() {
                    return Some(NumberValue::BigInteger(mantissa(digits)?).narrowed());
                }

                let fraction = fraction.unwrap_or_default();
                let all_digits = [digits, fraction].concat();
                let exponent = exponent.unwrap_or_default() - BigInt::from(fraction.len());
                Some(NumberValue::Decimal(ExtendedDecimal::new(
                    mantissa(all_digits.as_slice())?,
                    exponent,
                )))
            }),
    ))
    .parse(input)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_numeric_parser() {
        #[derive(Debug, PartialEq)]
        struct TestCase {
            name: &'static str,
            input: &'static [u8],
            expected: bool,
            expected_result: Option<NumberValue>,
            expected_remainder: Option<&'static [u8]>,
        }

        let big = |source: &str| source.parse::<BigInt>().unwrap();

        let test_cases = [
            TestCase {
                name: "valid integer '123'",
                input: b"123",
                expected: true,
                expected_result: Some(NumberValue::Int64(123)),
                expected_remainder: Some(b""),
            },
            TestCase {
                name: "valid negative integer '-456'",
                input: b"-456",
                expected: true,
                expected_result: Some(NumberValue::Int64(-456)),
                expected_remainder: Some(b""),
            },
            TestCase {
                name: "valid positive integer '+789'",
                input: b"+789",
                expected: true,
                expected_result: Some(NumberValue::Int64(789)),
                expected_remainder: Some(b""),
            },
            TestCase {
                name: "i64::MIN stays Int64",
                input: b"-9223372036854775808",
                expected: true,
                expected_result: Some(NumberValue::Int64(i64::MIN)),
                expected_remainder: Some(b""),
            },
            TestCase {
                name: "2^63 becomes a big integer",
                input: b"9223372036854775808",
                expected: true,
                expected_result: Some(NumberValue::BigInteger(big("9223372036854775808"))),
                expected_remainder: Some(b""),
            },
            TestCase {
                name: "valid decimal '123.45'",
                input: b"123.45",
                expected: true,
                expected_result: Some(NumberValue::Decimal(ExtendedDecimal::new(12345, -2))),
                expected_remainder: Some(b""),
            },
            TestCase {
                name: "valid negative decimal '-678.90'",
                input: b"-678.90",
                expected: true,
                expected_result: Some(NumberValue::Decimal(ExtendedDecimal::new(-67890, -2))),
                expected_remainder: Some(b""),
            },
            TestCase {
                name: "decimal with exponent '1.5e3'",
                input: b"1.5e3",
                expected: true,
                expected_result: Some(NumberValue::Decimal(ExtendedDecimal::new(15, 2))),
                expected_remainder: Some(b""),
            },
            TestCase {
                name: "exponent without fraction '15E-1'",
                input: b"15E-1",
                expected: true,
                expected_result: Some(NumberValue::Decimal(ExtendedDecimal::new(15, -1))),
                expected_remainder: Some(b""),
            },
            TestCase {
                name: "binary float '3p-2'",
                input: b"3p-2",
                expected: true,
                expected_result: Some(NumberValue::BinaryFloat(ExtendedFloat::new(3, -2))),
                expected_remainder: Some(b""),
            },
            TestCase {
                name: "rational '-2/6' is normalized",
                input: b"-2/6",
                expected: true,
                expected_result: Some(NumberValue::Rational(BigRational::new(
                    BigInt::from(-1),
                    BigInt::from(3),
                ))),
                expected_remainder: Some(b""),
            },
            TestCase {
                name: "zero denominator '1/0'",
                input: b"1/0",
                expected: false,
                expected_result: None,
                expected_remainder: None,
            },
            TestCase {
                name: "NaN",
                input: b"NaN",
                expected: true,
                expected_result: Some(NumberValue::Decimal(ExtendedDecimal::nan())),
                expected_remainder: Some(b""),
            },
            TestCase {
                name: "negative infinity '-Infinity'",
                input: b"-Infinity",
                expected: true,
                expected_result: Some(NumberValue::Decimal(ExtendedDecimal::negative_infinity())),
                expected_remainder: Some(b""),
            },
            TestCase {
                name: "short infinity 'inf'",
                input: b"inf",
                expected: true,
                expected_result: Some(NumberValue::Decimal(ExtendedDecimal::positive_infinity())),
                expected_remainder: Some(b""),
            },
            TestCase {
                name: "binary NaN 'NaNp'",
                input: b"NaNp",
                expected: true,
                expected_result: Some(NumberValue::BinaryFloat(ExtendedFloat::nan())),
                expected_remainder: Some(b""),
            },
            TestCase {
                name: "binary negative infinity '-Infinityp'",
                input: b"-Infinityp",
                expected: true,
                expected_result: Some(NumberValue::BinaryFloat(ExtendedFloat::negative_infinity())),
                expected_remainder: Some(b""),
            },
            TestCase {
                name: "short binary infinity '+infP'",
                input: b"+infP",
                expected: true,
                expected_result: Some(NumberValue::BinaryFloat(ExtendedFloat::positive_infinity())),
                expected_remainder: Some(b""),
            },
            TestCase {
                name: "invalid 'abc'",
                input: b"abc",
                expected: false,
                expected_result: None,
                expected_remainder: None,
            },
            TestCase {
                name: "integer with some text '12a3'",
                input: b"12a3",
                expected: true,
                expected_result: Some(NumberValue::Int64(12)),
                expected_remainder: Some(b"a3"),
            },
            TestCase {
                name: "invalid empty input",
                input: b"",
                expected: false,
                expected_result: None,
                expected_remainder: None,
            },
            TestCase {
                name: "invalid '12.' (no digits after decimal)",
                input: b"12.",
                expected: false,
                expected_result: None,
                expected_remainder: None,
            },
            TestCase {
                name: "invalid '1e' (no exponent digits)",
                input: b"1e",
                expected: false,
                expected_result: None,
                expected_remainder: None,
            },
            TestCase {
                name: "valid with residual text '123.45.67' (extra decimal)",
                input: b"123.45.67",
                expected: true,
                expected_result: Some(NumberValue::Decimal(ExtendedDecimal::new(12345, -2))),
                expected_remainder: Some(b".67"),
            },
        ];

        for case in &test_cases {
            let result = numeric(case.input);
            let success = result.is_ok();
            assert_eq!(
                success, case.expected,
                "Test '{}' failed: expected success: {}, got: {}",
                case.name, case.expected, success
            );

            if case.expected {
                let (actual_remainder, result) = match result {
                    Ok((rem, res)) => (rem, res),
                    Err(e) => panic!(
                        "Parsing failed for test '{}', input: {:#?}, error: {e:?}",
                        case.name, case.input
                    ),
                };
                let expected_result = case.expected_result.as_ref().unwrap();
                assert_eq!(
                    result, *expected_result,
                    "Test '{}' failed: expected result: {:?}, got: {:?}",
                    case.name, *expected_result, result
                );
                assert_eq!(
                    actual_remainder,
                    case.expected_remainder.unwrap(),
                    "Test '{}' failed: expected remainder: {:?}, got: {:?}",
                    case.name,
                    case.expected_remainder.unwrap(),
                    actual_remainder
                );
            }
        }
    }
}
