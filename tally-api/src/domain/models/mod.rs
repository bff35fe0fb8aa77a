mod identity;
mod ids;
mod project;
mod report;
mod time_entry;

pub use identity::*;
pub use ids::*;
pub use project::*;
pub use report::*;
pub use time_entry::*;

use rust_decimal::Decimal;

/// Whether a value is representable in a `NUMERIC(_, 2)` column without
/// rounding.
pub(crate) fn fits_cents(value: Decimal) -> bool {
    value.normalize().scale() <= 2
}

/// Whether a value stays below `10^digits` in magnitude, i.e. fits the
/// integer part of a `NUMERIC(digits + 2, 2)` column.
pub(crate) fn fits_integer_digits(value: Decimal, digits: u32) -> bool {
    value.abs() < Decimal::from(10_i64.pow(digits))
}
