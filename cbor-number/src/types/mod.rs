pub mod extended;
mod value;

pub use extended::{Binary, Decimal, Extended, ExtendedDecimal, ExtendedFloat, Radix};
pub use value::{Kind, NumberValue};
