use clap::{ArgAction, Parser};

/// Inspect how CBOR numeric values classify and convert
#[derive(Parser)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Numeric literals, e.g. `42`, `15E-1`, `3p-2`, `1/3` or `NaN`. Put other
    /// values starting with `-` after `--`
    #[arg(required = true, allow_negative_numbers = true)]
    pub values: Vec<String>,

    /// Lower bound for the bounded `i32` conversion
    #[arg(long, default_value_t = i32::MIN, allow_negative_numbers = true)]
    pub min: i32,

    /// Upper bound for the bounded `i32` conversion
    #[arg(long, default_value_t = i32::MAX, allow_negative_numbers = true)]
    pub max: i32,

    /// Raise log verbosity, repeat for more
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn log_level(&self) -> tracing::Level {
        match self.verbose {
            0 => tracing::Level::ERROR,
            1 => tracing::Level::WARN,
            2 => tracing::Level::INFO,
            3 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        }
    }
}

pub fn parse() -> Cli {
    Cli::parse()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_parse_arguments() {
        let cli = Cli::try_parse_from([
            "cbornum", "-vv", "--min", "-5", "--max", "5", "--", "-15E-1", "1/3",
        ])
        .unwrap();

        assert_eq!(cli.values, ["-15E-1", "1/3"]);
        assert_eq!(cli.min, -5);
        assert_eq!(cli.max, 5);
        assert_eq!(cli.log_level(), tracing::Level::INFO);
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["cbornum", "42"]).unwrap();

        assert_eq!(cli.min, i32::MIN);
        assert_eq!(cli.max, i32::MAX);
        assert_eq!(cli.log_level(), tracing::Level::ERROR);
    }

    #[test]
    fn test_values_required() {
        assert!(Cli::try_parse_from(["cbornum"]).is_err());
    }
}
