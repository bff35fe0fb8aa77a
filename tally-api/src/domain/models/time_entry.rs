use rust_decimal::Decimal;
use time::{Date, Month, OffsetDateTime};

use super::{fits_cents, ProjectId, TimeEntryId, UserId};
use crate::domain::{validation::DAILY_HOUR_CAP, TimeEntryError};

const MAX_DESCRIPTION_LEN: usize = 2000;

/// Hours logged by a user against one of their projects on a given day.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeEntry {
    pub id: TimeEntryId,
    pub user_id: UserId,
    pub project_id: ProjectId,
    pub date: Date,
    pub hours: Decimal,
    pub description: Option<String>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

/// The replaceable fields of a time entry.
///
/// Used both when creating an entry and when updating one, since an update
/// replaces project, date, hours and description together.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeEntryDraft {
    pub project_id: ProjectId,
    pub date: Date,
    pub hours: Decimal,
    pub description: Option<String>,
}

impl TimeEntryDraft {
    pub fn new(project_id: impl Into<ProjectId>, date: Date, hours: Decimal) -> Self {
        Self {
            project_id: project_id.into(),
            date,
            hours,
            description: None,
        }
    }

    /// Blank descriptions are stored as `None`.
    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = description
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());
        self
    }

    /// Shape checks that do not need any stored state.
    pub fn validate(&self) -> Result<(), TimeEntryError> {
        if self.hours <= Decimal::ZERO {
            return Err(TimeEntryError::validation(
                "hours must be greater than zero",
            ));
        }
        if self.hours > DAILY_HOUR_CAP {
            return Err(TimeEntryError::validation(format!(
                "hours must not exceed {DAILY_HOUR_CAP}"
            )));
        }
        if !fits_cents(self.hours) {
            return Err(TimeEntryError::validation(
                "hours may have at most two decimal places",
            ));
        }
        if let Some(description) = &self.description {
            if description.chars().count() > MAX_DESCRIPTION_LEN {
                return Err(TimeEntryError::validation(format!(
                    "description must be at most {MAX_DESCRIPTION_LEN} characters"
                )));
            }
        }

        Ok(())
    }
}

/// Selection criteria for listing a user's time entries.
///
/// All criteria are optional and combine with AND. Date bounds are inclusive.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimeEntryFilter {
    pub year: Option<i32>,
    pub from: Option<Date>,
    pub to: Option<Date>,
    pub project_id: Option<ProjectId>,
}

impl TimeEntryFilter {
    pub fn for_year(year: i32) -> Self {
        Self {
            year: Some(year),
            ..Default::default()
        }
    }

    /// Effective inclusive date bounds, intersecting the year with any
    /// explicit range.
    pub fn bounds(&self) -> Result<(Option<Date>, Option<Date>), TimeEntryError> {
        if let (Some(from), Some(to)) = (self.from, self.to) {
            if from > to {
                return Err(TimeEntryError::validation(
                    "'from' must not be after 'to'",
                ));
            }
        }

        let (mut from, mut to) = (self.from, self.to);
        if let Some(year) = self.year {
            let (year_start, year_end) = year_bounds(year)?;
            from = Some(from.map_or(year_start, |d| d.max(year_start)));
            to = Some(to.map_or(year_end, |d| d.min(year_end)));
        }

        Ok((from, to))
    }

    pub fn matches(&self, entry: &TimeEntry) -> bool {
        let Ok((from, to)) = self.bounds() else {
            return false;
        };

        from.map_or(true, |from| entry.date >= from)
            && to.map_or(true, |to| entry.date <= to)
            && self
                .project_id
                .map_or(true, |project_id| entry.project_id == project_id)
    }
}

/// First and last day of a calendar year.
pub fn year_bounds(year: i32) -> Result<(Date, Date), TimeEntryError> {
    let start = Date::from_calendar_date(year, Month::January, 1)
        .map_err(|_| TimeEntryError::validation(format!("invalid year: {year}")))?;
    let end = Date::from_calendar_date(year, Month::December, 31)
        .map_err(|_| TimeEntryError::validation(format!("invalid year: {year}")))?;
    Ok((start, end))
}

/// Order entries newest first. Entries on the same date keep no particular
/// order beyond a descending id tiebreak.
pub fn sort_newest_first(entries: &mut [TimeEntry]) {
    entries.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| b.id.cmp(&a.id)));
}
