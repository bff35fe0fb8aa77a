use async_trait::async_trait;

use crate::domain::{
    models::{UserId, YearlyTarget},
    ReportError,
};

/// Outbound port for stored yearly revenue targets.
#[async_trait]
pub trait YearlyTargetRepository: Send + Sync + 'static {
    async fn get(&self, user_id: &UserId, year: i32) -> Result<Option<YearlyTarget>, ReportError>;

    /// Insert or replace the target for the record's user and year.
    async fn upsert(&self, target: &YearlyTarget) -> Result<(), ReportError>;
}
