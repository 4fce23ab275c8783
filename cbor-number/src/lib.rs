pub mod fraction;
pub mod kind;
pub mod parser;
pub mod types;

pub use kind::{
    BigIntegerKind, BinaryFloatKind, DecimalKind, ExtendedKind, Int64Kind, NumberKind,
    RationalKind,
};
pub use parser::read_number;
pub use types::{ExtendedDecimal, ExtendedFloat, Kind, NumberValue};
