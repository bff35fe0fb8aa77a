use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::{
    models::{NewProject, Project, ProjectId, ProjectPatch, UserId},
    ports::{inbound::ProjectService, outbound::ProjectRepository},
    ProjectError,
};

pub struct ProjectServiceImpl<P> {
    projects: Arc<P>,
}

impl<P> ProjectServiceImpl<P> {
    pub fn new(projects: Arc<P>) -> Self {
        Self { projects }
    }
}

#[async_trait]
impl<P: ProjectRepository> ProjectService for ProjectServiceImpl<P> {
    async fn list_projects(&self, owner_id: &UserId) -> Result<Vec<Project>, ProjectError> {
        let mut projects = self.projects.list(owner_id).await?;
        projects.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
        Ok(projects)
    }

    async fn get_project(
        &self,
        owner_id: &UserId,
        id: &ProjectId,
    ) -> Result<Project, ProjectError> {
        self.projects
            .get(owner_id, id)
            .await?
            .ok_or(ProjectError::NotFound)
    }

    async fn create_project(&self, project: NewProject) -> Result<Project, ProjectError> {
        project.validate()?;

        let created = self.projects.insert(&project).await?;
        tracing::debug!(project_id = %created.id, owner_id = %created.owner_id, "project created");

        Ok(created)
    }

    async fn update_project(
        &self,
        owner_id: &UserId,
        id: &ProjectId,
        patch: ProjectPatch,
    ) -> Result<Project, ProjectError> {
        let current = self.get_project(owner_id, id).await?;

        // The repository repeats this check atomically with the write
        if patch.renames(&current) && self.projects.has_time_entries(id).await? {
            return Err(ProjectError::InUse);
        }

        let updated = current.patched(patch)?;
        self.projects.update(&updated).await
    }

    async fn delete_project(
        &self,
        owner_id: &UserId,
        id: &ProjectId,
    ) -> Result<(), ProjectError> {
        self.get_project(owner_id, id).await?;
        if self.projects.has_time_entries(id).await? {
            return Err(ProjectError::InUse);
        }
        if !self.projects.delete(owner_id, id).await? {
            return Err(ProjectError::NotFound);
        }

        tracing::debug!(project_id = %id, %owner_id, "project deleted");
        Ok(())
    }
}
