mod numeric;

pub use numeric::numeric;

use nom::{Finish, error::ErrorKind};
use snafu::Snafu;
use tracing::trace;

use crate::types::NumberValue;

#[derive(Debug, Snafu)]
pub struct Error(error::Error);
type Result<T> = std::result::Result<T, Error>;

/// Reads a whole string as one numeric literal.
///
/// Leading and trailing whitespace is ignored. See [`numeric`] for the accepted
/// forms.
///
/// # Errors
/// Fails if the text is not a literal, has trailing characters, or is a rational
/// with a zero denominator.
pub fn read_number(source: &str) -> Result<NumberValue> {
    let trimmed = source.trim();
    let (remainder, value) = match numeric(trimmed.as_bytes()).finish() {
        Ok(parsed) => parsed,
        Err(err) if err.code == ErrorKind::Verify => {
            return Err(error::Error::ZeroDenominator {
                input: trimmed.to_string(),
            }
            .into());
        }
        Err(_) => {
            return Err(error::Error::Syntax {
                input: trimmed.to_string(),
            }
            .into());
        }
    };

    if !remainder.is_empty() {
        return Err(error::Error::TrailingInput {
            input: trimmed.to_string(),
            remainder: String::from_utf8_lossy(remainder).into_owned(),
        }
        .into());
    }

    trace!("Read {trimmed:?} as {} {value}", value.kind());
    Ok(value)
}

mod error {
    use snafu::Snafu;

    #[derive(Debug, Snafu)]
    #[snafu(visibility(pub(super)))]
    pub(super) enum Error {
        #[snafu(display("Not a numeric literal: {input:?}"))]
        Syntax { input: String },

        #[snafu(display("Unexpected {remainder:?} after numeric literal in {input:?}"))]
        TrailingInput { input: String, remainder: String },

        #[snafu(display("Zero denominator in rational {input:?}"))]
        ZeroDenominator { input: String },
    }
}
