//! PostgreSQL implementation of the ProjectRepository port.

use std::collections::HashMap;

use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::PgPool;
use time::{Date, OffsetDateTime};

use crate::domain::{
    models::{NewProject, Project, ProjectId, UserId},
    ports::outbound::ProjectRepository,
    ProjectError,
};

pub struct PostgresProjectRepository {
    pool: PgPool,
}

impl PostgresProjectRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ProjectRow {
    id: i32,
    owner_id: i32,
    name: String,
    hourly_rate: Decimal,
    start_date: Date,
    end_date: Date,
    created_at: OffsetDateTime,
    updated_at: OffsetDateTime,
}

impl From<ProjectRow> for Project {
    fn from(row: ProjectRow) -> Self {
        Self {
            id: row.id.into(),
            owner_id: row.owner_id.into(),
            name: row.name,
            hourly_rate: row.hourly_rate,
            start_date: row.start_date,
            end_date: row.end_date,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl ProjectRepository for PostgresProjectRepository {
    async fn list(&self, owner_id: &UserId) -> Result<Vec<Project>, ProjectError> {
        let rows = sqlx::query_as::<_, ProjectRow>(
            r#"
            SELECT id, owner_id, name, hourly_rate, start_date, end_date, created_at, updated_at
            FROM projects
            WHERE owner_id = $1
            "#,
        )
        .bind(owner_id.as_i32())
        .fetch_all(&self.pool)
        .await
        .map_err(ProjectError::storage)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn get(
        &self,
        owner_id: &UserId,
        id: &ProjectId,
    ) -> Result<Option<Project>, ProjectError> {
        let row = sqlx::query_as::<_, ProjectRow>(
            r#"
            SELECT id, owner_id, name, hourly_rate, start_date, end_date, created_at, updated_at
            FROM projects
            WHERE id = $1 AND owner_id = $2
            "#,
        )
        .bind(id.as_i32())
        .bind(owner_id.as_i32())
        .fetch_optional(&self.pool)
        .await
        .map_err(ProjectError::storage)?;

        Ok(row.map(Into::into))
    }

    async fn insert(&self, project: &NewProject) -> Result<Project, ProjectError> {
        let row = sqlx::query_as::<_, ProjectRow>(
            r#"
            INSERT INTO projects (owner_id, name, hourly_rate, start_date, end_date)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, owner_id, name, hourly_rate, start_date, end_date, created_at, updated_at
            "#,
        )
        .bind(project.owner_id.as_i32())
        .bind(&project.name)
        .bind(project.hourly_rate)
        .bind(project.start_date)
        .bind(project.end_date)
        .fetch_one(&self.pool)
        .await
        .map_err(ProjectError::storage)?;

        Ok(row.into())
    }

    async fn update(&self, project: &Project) -> Result<Project, ProjectError> {
        let mut tx = self.pool.begin().await.map_err(ProjectError::storage)?;

        // Entry writers share-lock the project row, so once this lock is held
        // the reference check below cannot miss an entry still in flight
        let current_name = sqlx::query_scalar::<_, String>(
            r#"
            SELECT name FROM projects
            WHERE id = $1 AND owner_id = $2
            FOR UPDATE
            "#,
        )
        .bind(project.id.as_i32())
        .bind(project.owner_id.as_i32())
        .fetch_optional(&mut *tx)
        .await
        .map_err(ProjectError::storage)?
        .ok_or(ProjectError::NotFound)?;

        if current_name != project.name {
            let referenced = sqlx::query_scalar::<_, bool>(
                r#"
                SELECT EXISTS (SELECT 1 FROM time_entries WHERE project_id = $1)
                "#,
            )
            .bind(project.id.as_i32())
            .fetch_one(&mut *tx)
            .await
            .map_err(ProjectError::storage)?;

            if referenced {
                return Err(ProjectError::InUse);
            }
        }

        let row = sqlx::query_as::<_, ProjectRow>(
            r#"
            UPDATE projects
            SET name = $3, hourly_rate = $4, start_date = $5, end_date = $6, updated_at = now()
            WHERE id = $1 AND owner_id = $2
            RETURNING id, owner_id, name, hourly_rate, start_date, end_date, created_at, updated_at
            "#,
        )
        .bind(project.id.as_i32())
        .bind(project.owner_id.as_i32())
        .bind(&project.name)
        .bind(project.hourly_rate)
        .bind(project.start_date)
        .bind(project.end_date)
        .fetch_one(&mut *tx)
        .await
        .map_err(ProjectError::storage)?;

        tx.commit().await.map_err(ProjectError::storage)?;

        Ok(row.into())
    }

    async fn delete(&self, owner_id: &UserId, id: &ProjectId) -> Result<bool, ProjectError> {
        let result = sqlx::query(
            r#"
            DELETE FROM projects
            WHERE id = $1 AND owner_id = $2
            "#,
        )
        .bind(id.as_i32())
        .bind(owner_id.as_i32())
        .execute(&self.pool)
        .await
        .map_err(|err| match &err {
            // time_entries.project_id is ON DELETE RESTRICT
            sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation() => {
                ProjectError::InUse
            }
            _ => ProjectError::storage(err),
        })?;

        Ok(result.rows_affected() > 0)
    }

    async fn has_time_entries(&self, id: &ProjectId) -> Result<bool, ProjectError> {
        sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (SELECT 1 FROM time_entries WHERE project_id = $1)
            "#,
        )
        .bind(id.as_i32())
        .fetch_one(&self.pool)
        .await
        .map_err(ProjectError::storage)
    }

    async fn hourly_rates(
        &self,
        owner_id: &UserId,
    ) -> Result<HashMap<ProjectId, Decimal>, ProjectError> {
        let rates = sqlx::query_as::<_, (i32, Decimal)>(
            r#"
            SELECT id, hourly_rate
            FROM projects
            WHERE owner_id = $1
            "#,
        )
        .bind(owner_id.as_i32())
        .fetch_all(&self.pool)
        .await
        .map_err(ProjectError::storage)?;

        Ok(rates
            .into_iter()
            .map(|(id, rate)| (ProjectId::new(id), rate))
            .collect())
    }
}
