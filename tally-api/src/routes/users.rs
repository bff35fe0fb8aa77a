//! Administrator surface for other users' yearly targets.
//!
//! A caller may always reach their own id here. Other ids need the
//! `read-any` or `write-any` capability.

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use axum_extra::extract::WithRejection;
use tracing::instrument;

use crate::{
    adapters::inbound::http::{ProgressResponse, YearlyTargetResponse},
    app_state::AppState,
    auth::{Access, AuthUser},
    domain::models::UserId,
    routes::{
        time_entries::{
            set_yearly_target_for, yearly_progress_for, ProgressQuery, YearlyTargetPayload,
        },
        ApiError,
    },
};

pub fn router() -> Router<AppState> {
    Router::new().route(
        "/:user_id/yearly-target",
        get(user_yearly_progress).put(set_user_yearly_target),
    )
}

#[instrument(name = "user_yearly_progress", skip(app_state))]
async fn user_yearly_progress(
    user: AuthUser,
    State(app_state): State<AppState>,
    WithRejection(Path(user_id), _): WithRejection<Path<i32>, ApiError>,
    WithRejection(Query(query), _): WithRejection<Query<ProgressQuery>, ApiError>,
) -> Result<Json<ProgressResponse>, ApiError> {
    let user_id = user.on_behalf_of(Access::Read, UserId::from(user_id))?;
    yearly_progress_for(&app_state, &user_id, query).await
}

#[instrument(name = "set_user_yearly_target", skip(app_state))]
async fn set_user_yearly_target(
    user: AuthUser,
    State(app_state): State<AppState>,
    WithRejection(Path(user_id), _): WithRejection<Path<i32>, ApiError>,
    WithRejection(Json(payload), _): WithRejection<Json<YearlyTargetPayload>, ApiError>,
) -> Result<Json<YearlyTargetResponse>, ApiError> {
    let user_id = user.on_behalf_of(Access::Write, UserId::from(user_id))?;
    set_yearly_target_for(&app_state, &user_id, payload).await
}
