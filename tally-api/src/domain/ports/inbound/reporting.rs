use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::domain::{
    models::{MonthlyStat, ProgressStat, UserId, YearlyTarget},
    ReportError,
};

/// Inbound port for monthly reports and yearly target tracking.
#[async_trait]
pub trait ReportingService: Send + Sync + 'static {
    /// Hours and revenue per month of `year`, only for months with entries.
    async fn monthly_report(
        &self,
        user_id: &UserId,
        year: i32,
    ) -> Result<Vec<MonthlyStat>, ReportError>;

    /// Revenue progress towards the stored (or default) target for `year`.
    async fn yearly_progress(
        &self,
        user_id: &UserId,
        year: i32,
    ) -> Result<ProgressStat, ReportError>;

    async fn set_yearly_target(
        &self,
        user_id: &UserId,
        year: i32,
        target_amount: Decimal,
    ) -> Result<YearlyTarget, ReportError>;
}
