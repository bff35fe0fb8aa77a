use std::fmt::Display;

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that can occur while recording or changing time entries.
#[derive(Debug, Error, PartialEq)]
pub enum TimeEntryError {
    #[error("{0}")]
    ValidationFailed(String),
    /// Carries the hours already logged for the day so callers can show
    /// a precise message.
    #[error(
        "daily limit of 24 hours exceeded: {current_total} hours already logged for this date"
    )]
    DailyCapExceeded { current_total: Decimal },
    #[error("project not found")]
    ProjectNotFoundOrUnauthorized,
    #[error("time entry not found")]
    NotFound,
    #[error("storage failure: {0}")]
    Storage(String),
}

impl TimeEntryError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::ValidationFailed(msg.into())
    }

    pub fn storage(err: impl Display) -> Self {
        Self::Storage(err.to_string())
    }
}

/// Errors raised by the project catalog.
#[derive(Debug, Error, PartialEq)]
pub enum ProjectError {
    #[error("{0}")]
    ValidationFailed(String),
    #[error("project not found")]
    NotFound,
    #[error("project has time entries and can only have its rate or dates changed")]
    InUse,
    #[error("storage failure: {0}")]
    Storage(String),
}

impl ProjectError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::ValidationFailed(msg.into())
    }

    pub fn storage(err: impl Display) -> Self {
        Self::Storage(err.to_string())
    }
}

impl From<ProjectError> for TimeEntryError {
    fn from(err: ProjectError) -> Self {
        match err {
            ProjectError::NotFound => Self::ProjectNotFoundOrUnauthorized,
            ProjectError::ValidationFailed(msg) => Self::ValidationFailed(msg),
            ProjectError::Storage(msg) => Self::Storage(msg),
            ProjectError::InUse => Self::ValidationFailed(err.to_string()),
        }
    }
}

/// Errors raised while building reports or managing yearly targets.
#[derive(Debug, Error, PartialEq)]
pub enum ReportError {
    #[error("{0}")]
    ValidationFailed(String),
    #[error("storage failure: {0}")]
    Storage(String),
}

impl ReportError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::ValidationFailed(msg.into())
    }

    pub fn storage(err: impl Display) -> Self {
        Self::Storage(err.to_string())
    }
}

impl From<TimeEntryError> for ReportError {
    fn from(err: TimeEntryError) -> Self {
        match err {
            TimeEntryError::Storage(msg) => Self::Storage(msg),
            other => Self::Storage(other.to_string()),
        }
    }
}

impl From<ProjectError> for ReportError {
    fn from(err: ProjectError) -> Self {
        match err {
            ProjectError::Storage(msg) => Self::Storage(msg),
            other => Self::Storage(other.to_string()),
        }
    }
}
