//! HTTP response types for the time entry, project and report endpoints.
//!
//! Money and hours serialize as JSON numbers. Dates serialize as
//! `YYYY-MM-DD` strings.

use rust_decimal::Decimal;
use serde::Serialize;
use time::OffsetDateTime;

use crate::domain::models::{MonthlyStat, ProgressStat, Project, TimeEntry, YearlyTarget};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeEntryResponse {
    pub id: i32,
    pub user_id: i32,
    pub project_id: i32,
    pub date: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub hours: Decimal,
    pub description: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl From<TimeEntry> for TimeEntryResponse {
    fn from(entry: TimeEntry) -> Self {
        Self {
            id: entry.id.as_i32(),
            user_id: entry.user_id.as_i32(),
            project_id: entry.project_id.as_i32(),
            date: entry.date.to_string(),
            hours: entry.hours,
            description: entry.description,
            created_at: entry.created_at,
            updated_at: entry.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectResponse {
    pub id: i32,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub hourly_rate: Decimal,
    pub start_date: String,
    pub end_date: String,
}

impl From<Project> for ProjectResponse {
    fn from(project: Project) -> Self {
        Self {
            id: project.id.as_i32(),
            name: project.name,
            hourly_rate: project.hourly_rate,
            start_date: project.start_date.to_string(),
            end_date: project.end_date.to_string(),
        }
    }
}

/// One row of the monthly report.
///
/// Field names are snake_case, unlike the rest of the API, since existing
/// report consumers read `total_hours` and `total_amount`.
#[derive(Debug, Serialize)]
pub struct MonthlyReportRow {
    pub month: u8,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_hours: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_amount: Decimal,
}

impl From<MonthlyStat> for MonthlyReportRow {
    fn from(stat: MonthlyStat) -> Self {
        Self {
            month: stat.month,
            total_hours: stat.total_hours,
            total_amount: stat.total_revenue,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressResponse {
    #[serde(with = "rust_decimal::serde::float")]
    pub current_amount: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub yearly_target: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub progress_percentage: Decimal,
}

impl From<ProgressStat> for ProgressResponse {
    fn from(stat: ProgressStat) -> Self {
        Self {
            current_amount: stat.current_amount,
            yearly_target: stat.yearly_target,
            progress_percentage: stat.progress_percentage,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YearlyTargetResponse {
    pub message: String,
    pub user_id: i32,
    pub year: i32,
    #[serde(with = "rust_decimal::serde::float")]
    pub target_amount: Decimal,
}

impl From<YearlyTarget> for YearlyTargetResponse {
    fn from(target: YearlyTarget) -> Self {
        Self {
            message: "Yearly target updated successfully".to_string(),
            user_id: target.user_id.as_i32(),
            year: target.year,
            target_amount: target.target_amount,
        }
    }
}

/// Body returned by `POST` endpoints.
#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub id: i32,
    pub message: String,
}

impl CreatedResponse {
    pub fn new(id: i32, message: impl Into<String>) -> Self {
        Self {
            id,
            message: message.into(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
