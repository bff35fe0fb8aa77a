use std::collections::HashMap;

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::domain::{
    models::{NewProject, Project, ProjectId, UserId},
    ProjectError,
};

/// Outbound port for the project catalog.
///
/// Lookups are scoped to the owner; a foreign project is reported as absent.
#[async_trait]
pub trait ProjectRepository: Send + Sync + 'static {
    async fn list(&self, owner_id: &UserId) -> Result<Vec<Project>, ProjectError>;

    async fn get(
        &self,
        owner_id: &UserId,
        id: &ProjectId,
    ) -> Result<Option<Project>, ProjectError>;

    async fn insert(&self, project: &NewProject) -> Result<Project, ProjectError>;

    /// Persist name, rate and dates of an existing project.
    ///
    /// Fails with [`ProjectError::InUse`] when the name changes while time
    /// entries reference the project. The check and the write are atomic
    /// with respect to concurrent entry writers.
    async fn update(&self, project: &Project) -> Result<Project, ProjectError>;

    /// Returns `false` if no project was deleted. Fails with
    /// [`ProjectError::InUse`] when time entries still reference it.
    async fn delete(&self, owner_id: &UserId, id: &ProjectId) -> Result<bool, ProjectError>;

    /// Whether any time entry references the project.
    async fn has_time_entries(&self, id: &ProjectId) -> Result<bool, ProjectError>;

    /// Hourly rate of every project the user owns.
    async fn hourly_rates(
        &self,
        owner_id: &UserId,
    ) -> Result<HashMap<ProjectId, Decimal>, ProjectError>;
}
