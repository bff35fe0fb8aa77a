use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::WithRejection;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::instrument;

use crate::{
    adapters::inbound::http::{CreatedResponse, MessageResponse, TimeEntryResponse},
    app_state::AppState,
    auth::{Access, AuthUser},
    domain::models::{TimeEntryDraft, TimeEntryFilter, TimeEntryId},
    routes::{parse_date, ApiError},
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeEntryPayload {
    project_id: i32,
    date: String,
    hours: Decimal,
    description: Option<String>,
}

impl TimeEntryPayload {
    fn into_draft(self) -> Result<TimeEntryDraft, ApiError> {
        let date = parse_date(&self.date)?;
        Ok(TimeEntryDraft::new(self.project_id, date, self.hours)
            .with_description(self.description))
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListEntriesQuery {
    year: Option<i32>,
    from: Option<String>,
    to: Option<String>,
    project_id: Option<i32>,
}

impl ListEntriesQuery {
    fn into_filter(self) -> Result<TimeEntryFilter, ApiError> {
        Ok(TimeEntryFilter {
            year: self.year,
            from: self.from.as_deref().map(parse_date).transpose()?,
            to: self.to.as_deref().map(parse_date).transpose()?,
            project_id: self.project_id.map(Into::into),
        })
    }
}

#[instrument(name = "list_time_entries", skip(app_state))]
pub async fn list_entries(
    user: AuthUser,
    State(app_state): State<AppState>,
    WithRejection(Query(query), _): WithRejection<Query<ListEntriesQuery>, ApiError>,
) -> Result<Json<Vec<TimeEntryResponse>>, ApiError> {
    let user_id = user.own(Access::Read)?;
    let filter = query.into_filter()?;

    let entries = app_state
        .time_entries
        .list_entries(&user_id, &filter)
        .await?;

    Ok(Json(entries.into_iter().map(Into::into).collect()))
}

#[instrument(name = "get_time_entry", skip(app_state))]
pub async fn get_entry(
    user: AuthUser,
    State(app_state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<i32>, ApiError>,
) -> Result<Json<TimeEntryResponse>, ApiError> {
    let user_id = user.own(Access::Read)?;

    let entry = app_state
        .time_entries
        .get_entry(&user_id, &TimeEntryId::new(id))
        .await?;

    Ok(Json(entry.into()))
}

#[instrument(name = "create_time_entry", skip(app_state))]
pub async fn create_entry(
    user: AuthUser,
    State(app_state): State<AppState>,
    WithRejection(Json(payload), _): WithRejection<Json<TimeEntryPayload>, ApiError>,
) -> Result<(StatusCode, Json<CreatedResponse>), ApiError> {
    let user_id = user.own(Access::Write)?;
    let draft = payload.into_draft()?;

    let entry = app_state.time_entries.create_entry(&user_id, draft).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse::new(
            entry.id.as_i32(),
            "Time entry created successfully",
        )),
    ))
}

#[instrument(name = "update_time_entry", skip(app_state))]
pub async fn update_entry(
    user: AuthUser,
    State(app_state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<i32>, ApiError>,
    WithRejection(Json(payload), _): WithRejection<Json<TimeEntryPayload>, ApiError>,
) -> Result<Json<MessageResponse>, ApiError> {
    let user_id = user.own(Access::Write)?;
    let draft = payload.into_draft()?;

    app_state
        .time_entries
        .update_entry(&user_id, &TimeEntryId::new(id), draft)
        .await?;

    Ok(Json(MessageResponse::new("Time entry updated successfully")))
}

#[instrument(name = "delete_time_entry", skip(app_state))]
pub async fn delete_entry(
    user: AuthUser,
    State(app_state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<i32>, ApiError>,
) -> Result<Json<MessageResponse>, ApiError> {
    let user_id = user.own(Access::Write)?;

    app_state
        .time_entries
        .delete_entry(&user_id, &TimeEntryId::new(id))
        .await?;

    Ok(Json(MessageResponse::new("Time entry deleted successfully")))
}
