//! Daily hour cap.
//!
//! A user may log at most [`DAILY_HOUR_CAP`] hours across all projects and
//! entries for a single calendar date. The checks here are pure; the
//! repositories run them while holding a lock on the `(user, date)` pair.

use rust_decimal::Decimal;
use time::Date;

use super::{
    models::{TimeEntry, TimeEntryId, UserId},
    TimeEntryError,
};

pub const DAILY_HOUR_CAP: Decimal = Decimal::from_parts(24, 0, 0, false, 0);

/// Decide whether `hours` more can be logged on a day that already holds
/// `current_total` hours.
pub fn check_daily_cap(current_total: Decimal, hours: Decimal) -> Result<(), TimeEntryError> {
    match current_total.checked_add(hours) {
        Some(total) if hours > Decimal::ZERO && total <= DAILY_HOUR_CAP => Ok(()),
        _ => Err(TimeEntryError::DailyCapExceeded {
            current_total: current_total.normalize(),
        }),
    }
}

/// Sum of the hours a user has logged on `date`, optionally leaving out one
/// entry (the one being updated).
pub fn day_total<'a>(
    entries: impl IntoIterator<Item = &'a TimeEntry>,
    user_id: UserId,
    date: Date,
    excluding: Option<TimeEntryId>,
) -> Decimal {
    entries
        .into_iter()
        .filter(|e| e.user_id == user_id && e.date == date)
        .filter(|e| Some(e.id) != excluding)
        .map(|e| e.hours)
        .sum()
}
