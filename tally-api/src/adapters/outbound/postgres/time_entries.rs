//! PostgreSQL implementation of the TimeEntryRepository port.
//!
//! Creates and updates run in a transaction that first takes a
//! transaction-scoped advisory lock on `(user_id, julian day)`. Concurrent
//! writers for the same user and date therefore read the day's total one
//! after the other, and a failed cap check rolls back without writing.
//! The target project row is share-locked as well, so a concurrent rename
//! of that project waits for the entry to commit.

use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, Transaction};
use time::{Date, OffsetDateTime};

use crate::domain::{
    check_daily_cap,
    models::{ProjectId, TimeEntry, TimeEntryDraft, TimeEntryFilter, TimeEntryId, UserId},
    ports::outbound::TimeEntryRepository,
    TimeEntryError,
};

pub struct PostgresTimeEntryRepository {
    pool: PgPool,
}

impl PostgresTimeEntryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct TimeEntryRow {
    id: i32,
    user_id: i32,
    project_id: i32,
    entry_date: Date,
    hours: Decimal,
    description: Option<String>,
    created_at: OffsetDateTime,
    updated_at: OffsetDateTime,
}

impl From<TimeEntryRow> for TimeEntry {
    fn from(row: TimeEntryRow) -> Self {
        Self {
            id: row.id.into(),
            user_id: row.user_id.into(),
            project_id: row.project_id.into(),
            date: row.entry_date,
            hours: row.hours,
            description: row.description,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Serialize writers for one user and day until the transaction ends.
async fn lock_day(
    tx: &mut Transaction<'_, Postgres>,
    user_id: &UserId,
    date: Date,
) -> Result<(), TimeEntryError> {
    sqlx::query("SELECT pg_advisory_xact_lock($1, $2)")
        .bind(user_id.as_i32())
        .bind(date.to_julian_day())
        .execute(&mut **tx)
        .await
        .map_err(TimeEntryError::storage)?;

    Ok(())
}

/// Share-lock the caller's project row until the transaction ends.
async fn lock_project(
    tx: &mut Transaction<'_, Postgres>,
    user_id: &UserId,
    project_id: &ProjectId,
) -> Result<(), TimeEntryError> {
    sqlx::query_scalar::<_, i32>(
        r#"
        SELECT id FROM projects
        WHERE id = $1 AND owner_id = $2
        FOR SHARE
        "#,
    )
    .bind(project_id.as_i32())
    .bind(user_id.as_i32())
    .fetch_optional(&mut **tx)
    .await
    .map_err(TimeEntryError::storage)?
    .ok_or(TimeEntryError::ProjectNotFoundOrUnauthorized)?;

    Ok(())
}

async fn day_total(
    tx: &mut Transaction<'_, Postgres>,
    user_id: &UserId,
    date: Date,
    excluding: Option<&TimeEntryId>,
) -> Result<Decimal, TimeEntryError> {
    sqlx::query_scalar::<_, Decimal>(
        r#"
        SELECT COALESCE(SUM(hours), 0)
        FROM time_entries
        WHERE user_id = $1 AND entry_date = $2 AND ($3::int4 IS NULL OR id <> $3)
        "#,
    )
    .bind(user_id.as_i32())
    .bind(date)
    .bind(excluding.map(|id| id.as_i32()))
    .fetch_one(&mut **tx)
    .await
    .map_err(TimeEntryError::storage)
}

#[async_trait]
impl TimeEntryRepository for PostgresTimeEntryRepository {
    async fn get(
        &self,
        user_id: &UserId,
        id: &TimeEntryId,
    ) -> Result<Option<TimeEntry>, TimeEntryError> {
        let row = sqlx::query_as::<_, TimeEntryRow>(
            r#"
            SELECT id, user_id, project_id, entry_date, hours, description, created_at, updated_at
            FROM time_entries
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id.as_i32())
        .bind(user_id.as_i32())
        .fetch_optional(&self.pool)
        .await
        .map_err(TimeEntryError::storage)?;

        Ok(row.map(Into::into))
    }

    async fn list(
        &self,
        user_id: &UserId,
        filter: &TimeEntryFilter,
    ) -> Result<Vec<TimeEntry>, TimeEntryError> {
        let (from, to) = filter.bounds()?;

        let rows = sqlx::query_as::<_, TimeEntryRow>(
            r#"
            SELECT id, user_id, project_id, entry_date, hours, description, created_at, updated_at
            FROM time_entries
            WHERE user_id = $1
              AND ($2::date IS NULL OR entry_date >= $2)
              AND ($3::date IS NULL OR entry_date <= $3)
              AND ($4::int4 IS NULL OR project_id = $4)
            ORDER BY entry_date DESC, id DESC
            "#,
        )
        .bind(user_id.as_i32())
        .bind(from)
        .bind(to)
        .bind(filter.project_id.map(|id| id.as_i32()))
        .fetch_all(&self.pool)
        .await
        .map_err(TimeEntryError::storage)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn insert_within_cap(
        &self,
        user_id: &UserId,
        draft: &TimeEntryDraft,
    ) -> Result<TimeEntry, TimeEntryError> {
        let mut tx = self.pool.begin().await.map_err(TimeEntryError::storage)?;

        lock_day(&mut tx, user_id, draft.date).await?;
        lock_project(&mut tx, user_id, &draft.project_id).await?;
        let current_total = day_total(&mut tx, user_id, draft.date, None).await?;
        check_daily_cap(current_total, draft.hours)?;

        // Selecting through projects keeps the ownership check inside the
        // same statement as the insert
        let row = sqlx::query_as::<_, TimeEntryRow>(
            r#"
            INSERT INTO time_entries (user_id, project_id, entry_date, hours, description)
            SELECT $1, p.id, $3, $4, $5
            FROM projects p
            WHERE p.id = $2 AND p.owner_id = $1
            RETURNING id, user_id, project_id, entry_date, hours, description, created_at, updated_at
            "#,
        )
        .bind(user_id.as_i32())
        .bind(draft.project_id.as_i32())
        .bind(draft.date)
        .bind(draft.hours)
        .bind(draft.description.as_deref())
        .fetch_optional(&mut *tx)
        .await
        .map_err(TimeEntryError::storage)?
        .ok_or(TimeEntryError::ProjectNotFoundOrUnauthorized)?;

        tx.commit().await.map_err(TimeEntryError::storage)?;

        Ok(row.into())
    }

    async fn update_within_cap(
        &self,
        user_id: &UserId,
        id: &TimeEntryId,
        draft: &TimeEntryDraft,
    ) -> Result<TimeEntry, TimeEntryError> {
        let mut tx = self.pool.begin().await.map_err(TimeEntryError::storage)?;

        sqlx::query_scalar::<_, i32>(
            r#"
            SELECT id FROM time_entries
            WHERE id = $1 AND user_id = $2
            FOR UPDATE
            "#,
        )
        .bind(id.as_i32())
        .bind(user_id.as_i32())
        .fetch_optional(&mut *tx)
        .await
        .map_err(TimeEntryError::storage)?
        .ok_or(TimeEntryError::NotFound)?;

        lock_day(&mut tx, user_id, draft.date).await?;
        lock_project(&mut tx, user_id, &draft.project_id).await?;
        let current_total = day_total(&mut tx, user_id, draft.date, Some(id)).await?;
        check_daily_cap(current_total, draft.hours)?;

        let row = sqlx::query_as::<_, TimeEntryRow>(
            r#"
            UPDATE time_entries t
            SET project_id = p.id,
                entry_date = $4,
                hours = $5,
                description = $6,
                updated_at = now()
            FROM projects p
            WHERE t.id = $1 AND t.user_id = $2 AND p.id = $3 AND p.owner_id = $2
            RETURNING t.id, t.user_id, t.project_id, t.entry_date, t.hours, t.description,
                      t.created_at, t.updated_at
            "#,
        )
        .bind(id.as_i32())
        .bind(user_id.as_i32())
        .bind(draft.project_id.as_i32())
        .bind(draft.date)
        .bind(draft.hours)
        .bind(draft.description.as_deref())
        .fetch_optional(&mut *tx)
        .await
        .map_err(TimeEntryError::storage)?
        .ok_or(TimeEntryError::ProjectNotFoundOrUnauthorized)?;

        tx.commit().await.map_err(TimeEntryError::storage)?;

        Ok(row.into())
    }

    async fn delete(&self, user_id: &UserId, id: &TimeEntryId) -> Result<bool, TimeEntryError> {
        let result = sqlx::query(
            r#"
            DELETE FROM time_entries
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id.as_i32())
        .bind(user_id.as_i32())
        .execute(&self.pool)
        .await
        .map_err(TimeEntryError::storage)?;

        Ok(result.rows_affected() > 0)
    }
}
