use snafu::Snafu;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    #[snafu(display("Cannot read {value:?} as a number"))]
    Parse {
        value: String,
        source: cbor_number::parser::Error,
    },

    #[snafu(display("--min {min} is greater than --max {max}"))]
    Bounds { min: i32, max: i32 },
}
