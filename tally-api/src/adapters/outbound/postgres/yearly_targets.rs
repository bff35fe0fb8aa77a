use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::domain::{
    models::{UserId, YearlyTarget},
    ports::outbound::YearlyTargetRepository,
    ReportError,
};

pub struct PostgresYearlyTargetRepository {
    pool: PgPool,
}

impl PostgresYearlyTargetRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl YearlyTargetRepository for PostgresYearlyTargetRepository {
    async fn get(&self, user_id: &UserId, year: i32) -> Result<Option<YearlyTarget>, ReportError> {
        let amount = sqlx::query_scalar::<_, Decimal>(
            r#"
            SELECT target_amount
            FROM yearly_targets
            WHERE user_id = $1 AND year = $2
            "#,
        )
        .bind(user_id.as_i32())
        .bind(year)
        .fetch_optional(&self.pool)
        .await
        .map_err(ReportError::storage)?;

        Ok(amount.map(|amount| YearlyTarget::new(*user_id, year, amount)))
    }

    async fn upsert(&self, target: &YearlyTarget) -> Result<(), ReportError> {
        sqlx::query(
            r#"
            INSERT INTO yearly_targets (user_id, year, target_amount, updated_at)
            VALUES ($1, $2, $3, now())
            ON CONFLICT (user_id, year) DO UPDATE
            SET target_amount = EXCLUDED.target_amount,
                updated_at = now()
            "#,
        )
        .bind(target.user_id.as_i32())
        .bind(target.year)
        .bind(target.target_amount)
        .execute(&self.pool)
        .await
        .map_err(ReportError::storage)?;

        Ok(())
    }
}
