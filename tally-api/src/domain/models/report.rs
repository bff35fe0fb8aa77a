use rust_decimal::Decimal;

use super::{fits_cents, fits_integer_digits, UserId};
use crate::domain::ReportError;

/// `target_amount` is stored as `NUMERIC(14, 2)`.
const TARGET_INTEGER_DIGITS: u32 = 12;

/// Fallback yearly revenue target used when a user has none stored.
pub const DEFAULT_YEARLY_TARGET: Decimal = Decimal::from_parts(150_000, 0, 0, false, 0);

/// A user's revenue goal for one calendar year.
#[derive(Debug, Clone, PartialEq)]
pub struct YearlyTarget {
    pub user_id: UserId,
    pub year: i32,
    pub target_amount: Decimal,
}

impl YearlyTarget {
    pub fn new(user_id: impl Into<UserId>, year: i32, target_amount: Decimal) -> Self {
        Self {
            user_id: user_id.into(),
            year,
            target_amount,
        }
    }
}

/// Range and precision checks for a yearly target amount.
pub fn validate_target_amount(amount: Decimal) -> Result<(), ReportError> {
    if amount < Decimal::ZERO {
        return Err(ReportError::validation(
            "target amount must not be negative",
        ));
    }
    if !fits_cents(amount) {
        return Err(ReportError::validation(
            "target amount may have at most two decimal places",
        ));
    }
    if !fits_integer_digits(amount, TARGET_INTEGER_DIGITS) {
        return Err(ReportError::validation(format!(
            "target amount must have at most {TARGET_INTEGER_DIGITS} integer digits"
        )));
    }

    Ok(())
}

/// Hours and revenue logged in one calendar month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthlyStat {
    /// 1 = January, 12 = December.
    pub month: u8,
    pub total_hours: Decimal,
    pub total_revenue: Decimal,
}

impl MonthlyStat {
    pub fn empty(month: u8) -> Self {
        Self {
            month,
            total_hours: Decimal::ZERO,
            total_revenue: Decimal::ZERO,
        }
    }
}

/// Revenue progress against a yearly target.
///
/// `progress_percentage` is the raw ratio and exceeds 100 when the target
/// has been passed. Use [`ProgressStat::clamped`] for progress bars.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressStat {
    pub current_amount: Decimal,
    pub yearly_target: Decimal,
    pub progress_percentage: Decimal,
}

impl ProgressStat {
    /// Presentation variant with the percentage limited to `[0, 100]`.
    pub fn clamped(self) -> Self {
        Self {
            progress_percentage: self
                .progress_percentage
                .clamp(Decimal::ZERO, Decimal::ONE_HUNDRED),
            ..self
        }
    }
}
