use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use axum_extra::extract::WithRejection;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::instrument;

use crate::{
    adapters::inbound::http::{CreatedResponse, MessageResponse, ProjectResponse},
    app_state::AppState,
    auth::{Access, AuthUser},
    domain::models::{NewProject, ProjectId, ProjectPatch},
    routes::{parse_date, ApiError},
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_projects).post(create_project))
        .route(
            "/:id",
            get(get_project).put(update_project).delete(delete_project),
        )
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectPayload {
    name: String,
    hourly_rate: Decimal,
    start_date: String,
    end_date: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProjectPayload {
    name: Option<String>,
    hourly_rate: Option<Decimal>,
    start_date: Option<String>,
    end_date: Option<String>,
}

impl UpdateProjectPayload {
    fn into_patch(self) -> Result<ProjectPatch, ApiError> {
        Ok(ProjectPatch {
            name: self.name,
            hourly_rate: self.hourly_rate,
            start_date: self.start_date.as_deref().map(parse_date).transpose()?,
            end_date: self.end_date.as_deref().map(parse_date).transpose()?,
        })
    }
}

#[instrument(name = "list_projects", skip(app_state))]
async fn list_projects(
    user: AuthUser,
    State(app_state): State<AppState>,
) -> Result<Json<Vec<ProjectResponse>>, ApiError> {
    let owner_id = user.own(Access::Read)?;
    let projects = app_state.projects.list_projects(&owner_id).await?;

    Ok(Json(projects.into_iter().map(Into::into).collect()))
}

#[instrument(name = "get_project", skip(app_state))]
async fn get_project(
    user: AuthUser,
    State(app_state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<i32>, ApiError>,
) -> Result<Json<ProjectResponse>, ApiError> {
    let owner_id = user.own(Access::Read)?;
    let project = app_state
        .projects
        .get_project(&owner_id, &ProjectId::new(id))
        .await?;

    Ok(Json(project.into()))
}

#[instrument(name = "create_project", skip(app_state))]
async fn create_project(
    user: AuthUser,
    State(app_state): State<AppState>,
    WithRejection(Json(payload), _): WithRejection<Json<CreateProjectPayload>, ApiError>,
) -> Result<(StatusCode, Json<CreatedResponse>), ApiError> {
    let owner_id = user.own(Access::Write)?;
    let project = NewProject::new(
        owner_id,
        payload.name,
        payload.hourly_rate,
        parse_date(&payload.start_date)?,
        parse_date(&payload.end_date)?,
    );

    let created = app_state.projects.create_project(project).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse::new(
            created.id.as_i32(),
            "Project created successfully",
        )),
    ))
}

#[instrument(name = "update_project", skip(app_state))]
async fn update_project(
    user: AuthUser,
    State(app_state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<i32>, ApiError>,
    WithRejection(Json(payload), _): WithRejection<Json<UpdateProjectPayload>, ApiError>,
) -> Result<Json<ProjectResponse>, ApiError> {
    let owner_id = user.own(Access::Write)?;
    let patch = payload.into_patch()?;

    let updated = app_state
        .projects
        .update_project(&owner_id, &ProjectId::new(id), patch)
        .await?;

    Ok(Json(updated.into()))
}

#[instrument(name = "delete_project", skip(app_state))]
async fn delete_project(
    user: AuthUser,
    State(app_state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<i32>, ApiError>,
) -> Result<Json<MessageResponse>, ApiError> {
    let owner_id = user.own(Access::Write)?;
    app_state
        .projects
        .delete_project(&owner_id, &ProjectId::new(id))
        .await?;

    Ok(Json(MessageResponse::new("Project deleted successfully")))
}
