use std::fmt;

use cbor_number::{NumberValue, kind};

/// Operation table printed for one value.
pub struct Report<'a> {
    value: &'a NumberValue,
    min: i32,
    max: i32,
}

impl<'a> Report<'a> {
    pub fn new(value: &'a NumberValue, min: i32, max: i32) -> Self {
        Self { value, min, max }
    }
}

fn outcome<T: fmt::Display>(result: kind::Result<T>) -> String {
    match result {
        Ok(value) => value.to_string(),
        Err(err) => format!("error: {err}"),
    }
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = self.value;

        writeln!(f, "{value} ({})", value.kind())?;
        writeln!(f, "  sign                 {}", value.sign())?;
        writeln!(f, "  zero                 {}", value.is_zero())?;
        writeln!(f, "  integral             {}", value.is_integral())?;
        writeln!(f, "  nan                  {}", value.is_nan())?;
        writeln!(f, "  infinity             {}", value.is_infinity())?;
        writeln!(f, "  fits i32             {}", value.can_fit_in_i32())?;
        writeln!(f, "  fits i64             {}", value.can_fit_in_i64())?;
        writeln!(f, "  truncated fits i32   {}", value.can_truncated_int_fit_in_i32())?;
        writeln!(f, "  truncated fits i64   {}", value.can_truncated_int_fit_in_i64())?;
        writeln!(f, "  fits f32             {}", value.can_fit_in_f32())?;
        writeln!(f, "  fits f64             {}", value.can_fit_in_f64())?;
        writeln!(f, "  as i64               {}", outcome(value.as_i64()))?;
        writeln!(
            f,
            "  as i32 [{}, {}]   {}",
            self.min,
            self.max,
            outcome(value.as_i32(self.min, self.max))
        )?;
        writeln!(f, "  as f64               {}", value.as_f64())?;
        writeln!(f, "  as f32               {}", value.as_f32())?;
        writeln!(f, "  negate               {}", value.negate())?;
        writeln!(f, "  abs                  {} ({})", value.abs(), value.abs().kind())
    }
}
