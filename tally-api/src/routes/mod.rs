pub(crate) mod error;
pub(crate) mod projects;
pub(crate) mod time_entries;
pub(crate) mod users;

pub(crate) use error::ApiError;

use time::{macros::format_description, Date, OffsetDateTime};

/// Parse a `YYYY-MM-DD` calendar date.
pub(crate) fn parse_date(value: &str) -> Result<Date, ApiError> {
    Date::parse(value, format_description!("[year]-[month]-[day]")).map_err(|_| {
        ApiError::bad_request(format!("could not parse date: {value} (expected YYYY-MM-DD)"))
    })
}

pub(crate) fn current_year() -> i32 {
    OffsetDateTime::now_utc().year()
}
