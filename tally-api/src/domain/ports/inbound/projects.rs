use async_trait::async_trait;

use crate::domain::{
    models::{NewProject, Project, ProjectId, ProjectPatch, UserId},
    ProjectError,
};

/// Inbound port for managing a user's project catalog.
#[async_trait]
pub trait ProjectService: Send + Sync + 'static {
    async fn list_projects(&self, owner_id: &UserId) -> Result<Vec<Project>, ProjectError>;

    async fn get_project(
        &self,
        owner_id: &UserId,
        id: &ProjectId,
    ) -> Result<Project, ProjectError>;

    async fn create_project(&self, project: NewProject) -> Result<Project, ProjectError>;

    /// Rate and date edits are always allowed; renaming is rejected once
    /// time entries reference the project.
    async fn update_project(
        &self,
        owner_id: &UserId,
        id: &ProjectId,
        patch: ProjectPatch,
    ) -> Result<Project, ProjectError>;

    /// Rejected once time entries reference the project.
    async fn delete_project(&self, owner_id: &UserId, id: &ProjectId)
        -> Result<(), ProjectError>;
}
