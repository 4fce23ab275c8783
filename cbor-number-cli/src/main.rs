mod cli;
mod error;
mod report;

use snafu::{ResultExt, ensure};

use crate::error::{BoundsSnafu, Error, ParseSnafu};

fn main() -> Result<(), Box<Error>> {
    let cli = cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(cli.log_level())
        .init();

    ensure!(
        cli.min <= cli.max,
        BoundsSnafu {
            min: cli.min,
            max: cli.max
        }
    );

    for value in &cli.values {
        let number = cbor_number::read_number(value).context(ParseSnafu { value })?;
        print!("{}", report::Report::new(&number, cli.min, cli.max));
    }

    Ok(())
}
