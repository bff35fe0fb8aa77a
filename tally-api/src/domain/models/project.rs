use rust_decimal::Decimal;
use time::{Date, OffsetDateTime};

use super::{fits_cents, fits_integer_digits, ProjectId, UserId};
use crate::domain::ProjectError;

const MAX_NAME_LEN: usize = 200;
/// `hourly_rate` is stored as `NUMERIC(12, 2)`.
const RATE_INTEGER_DIGITS: u32 = 10;

/// A client project that hours are billed against.
#[derive(Debug, Clone, PartialEq)]
pub struct Project {
    pub id: ProjectId,
    pub owner_id: UserId,
    pub name: String,
    pub hourly_rate: Decimal,
    pub start_date: Date,
    pub end_date: Date,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl Project {
    /// Apply a patch, returning the updated project if the result still
    /// satisfies the project invariants.
    pub fn patched(&self, patch: ProjectPatch) -> Result<Project, ProjectError> {
        let mut updated = self.clone();

        if let Some(name) = patch.name {
            updated.name = name.trim().to_string();
        }
        if let Some(hourly_rate) = patch.hourly_rate {
            updated.hourly_rate = hourly_rate;
        }
        if let Some(start_date) = patch.start_date {
            updated.start_date = start_date;
        }
        if let Some(end_date) = patch.end_date {
            updated.end_date = end_date;
        }

        validate_fields(
            &updated.name,
            updated.hourly_rate,
            updated.start_date,
            updated.end_date,
        )?;

        Ok(updated)
    }
}

/// Data for creating a new project.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProject {
    pub owner_id: UserId,
    pub name: String,
    pub hourly_rate: Decimal,
    pub start_date: Date,
    pub end_date: Date,
}

impl NewProject {
    pub fn new(
        owner_id: impl Into<UserId>,
        name: impl Into<String>,
        hourly_rate: Decimal,
        start_date: Date,
        end_date: Date,
    ) -> Self {
        Self {
            owner_id: owner_id.into(),
            name: name.into().trim().to_string(),
            hourly_rate,
            start_date,
            end_date,
        }
    }

    pub fn validate(&self) -> Result<(), ProjectError> {
        validate_fields(&self.name, self.hourly_rate, self.start_date, self.end_date)
    }
}

/// Partial update of a project. `None` leaves the field unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectPatch {
    pub name: Option<String>,
    pub hourly_rate: Option<Decimal>,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
}

impl ProjectPatch {
    /// Whether applying the patch would change the project's name.
    pub fn renames(&self, project: &Project) -> bool {
        self.name
            .as_deref()
            .is_some_and(|name| name.trim() != project.name)
    }
}

fn validate_fields(
    name: &str,
    hourly_rate: Decimal,
    start_date: Date,
    end_date: Date,
) -> Result<(), ProjectError> {
    if name.trim().is_empty() {
        return Err(ProjectError::validation("project name must not be empty"));
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(ProjectError::validation(format!(
            "project name must be at most {MAX_NAME_LEN} characters"
        )));
    }
    if hourly_rate <= Decimal::ZERO {
        return Err(ProjectError::validation(
            "hourly rate must be greater than zero",
        ));
    }
    if !fits_cents(hourly_rate) {
        return Err(ProjectError::validation(
            "hourly rate may have at most two decimal places",
        ));
    }
    if !fits_integer_digits(hourly_rate, RATE_INTEGER_DIGITS) {
        return Err(ProjectError::validation(format!(
            "hourly rate must have at most {RATE_INTEGER_DIGITS} integer digits"
        )));
    }
    if end_date < start_date {
        return Err(ProjectError::validation(
            "end date must not be before start date",
        ));
    }

    Ok(())
}
