use axum::{
    extract::{Query, State},
    Json,
};
use axum_extra::extract::WithRejection;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::instrument;

use crate::{
    adapters::inbound::http::{MonthlyReportRow, ProgressResponse, YearlyTargetResponse},
    app_state::AppState,
    auth::{Access, AuthUser},
    domain::{models::UserId, zero_filled},
    routes::{current_year, ApiError},
};

#[derive(Debug, Deserialize)]
pub struct MonthlyReportQuery {
    year: Option<i32>,
    #[serde(default)]
    fill: bool,
}

#[derive(Debug, Deserialize)]
pub struct ProgressQuery {
    year: Option<i32>,
    #[serde(default)]
    clamp: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearlyTargetPayload {
    year: Option<i32>,
    target_amount: Decimal,
}

#[instrument(name = "monthly_report", skip(app_state))]
pub async fn monthly_report(
    user: AuthUser,
    State(app_state): State<AppState>,
    WithRejection(Query(query), _): WithRejection<Query<MonthlyReportQuery>, ApiError>,
) -> Result<Json<Vec<MonthlyReportRow>>, ApiError> {
    let user_id = user.own(Access::Read)?;
    let year = query.year.unwrap_or_else(current_year);

    let mut stats = app_state.reporting.monthly_report(&user_id, year).await?;
    if query.fill {
        stats = zero_filled(stats);
    }

    Ok(Json(stats.into_iter().map(Into::into).collect()))
}

#[instrument(name = "yearly_progress", skip(app_state))]
pub async fn yearly_progress(
    user: AuthUser,
    State(app_state): State<AppState>,
    WithRejection(Query(query), _): WithRejection<Query<ProgressQuery>, ApiError>,
) -> Result<Json<ProgressResponse>, ApiError> {
    let user_id = user.own(Access::Read)?;
    yearly_progress_for(&app_state, &user_id, query).await
}

#[instrument(name = "set_yearly_target", skip(app_state))]
pub async fn set_yearly_target(
    user: AuthUser,
    State(app_state): State<AppState>,
    WithRejection(Json(payload), _): WithRejection<Json<YearlyTargetPayload>, ApiError>,
) -> Result<Json<YearlyTargetResponse>, ApiError> {
    let user_id = user.own(Access::Write)?;
    set_yearly_target_for(&app_state, &user_id, payload).await
}

/// Progress for an already authorized user.
pub(crate) async fn yearly_progress_for(
    app_state: &AppState,
    user_id: &UserId,
    query: ProgressQuery,
) -> Result<Json<ProgressResponse>, ApiError> {
    let year = query.year.unwrap_or_else(current_year);

    let mut progress = app_state.reporting.yearly_progress(user_id, year).await?;
    if query.clamp {
        progress = progress.clamped();
    }

    Ok(Json(progress.into()))
}

pub(crate) async fn set_yearly_target_for(
    app_state: &AppState,
    user_id: &UserId,
    payload: YearlyTargetPayload,
) -> Result<Json<YearlyTargetResponse>, ApiError> {
    let year = payload.year.unwrap_or_else(current_year);

    let target = app_state
        .reporting
        .set_yearly_target(user_id, year, payload.target_amount)
        .await?;

    Ok(Json(target.into()))
}
