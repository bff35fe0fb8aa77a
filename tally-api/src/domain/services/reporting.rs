use std::sync::Arc;

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::domain::{
    aggregation::{monthly_stats, progress, yearly_revenue},
    models::{
        validate_target_amount, MonthlyStat, ProgressStat, TimeEntryFilter, UserId,
        YearlyTarget, DEFAULT_YEARLY_TARGET,
    },
    ports::{
        inbound::ReportingService,
        outbound::{ProjectRepository, TimeEntryRepository, YearlyTargetRepository},
    },
    ReportError,
};

const MIN_YEAR: i32 = 1900;
const MAX_YEAR: i32 = 9999;

/// Implementation of the ReportingService inbound port.
///
/// Reads entries and rates from the stores and feeds them through the pure
/// aggregation functions. Users without a stored target fall back to
/// `default_target`.
pub struct ReportingServiceImpl<E, P, T> {
    entries: Arc<E>,
    projects: Arc<P>,
    targets: Arc<T>,
    default_target: Decimal,
}

impl<E, P, T> ReportingServiceImpl<E, P, T> {
    pub fn new(entries: Arc<E>, projects: Arc<P>, targets: Arc<T>) -> Self {
        Self {
            entries,
            projects,
            targets,
            default_target: DEFAULT_YEARLY_TARGET,
        }
    }

    pub fn with_default_target(mut self, default_target: Decimal) -> Self {
        self.default_target = default_target;
        self
    }
}

fn validate_year(year: i32) -> Result<(), ReportError> {
    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return Err(ReportError::validation(format!(
            "year must be between {MIN_YEAR} and {MAX_YEAR}"
        )));
    }
    Ok(())
}

#[async_trait]
impl<E, P, T> ReportingService for ReportingServiceImpl<E, P, T>
where
    E: TimeEntryRepository,
    P: ProjectRepository,
    T: YearlyTargetRepository,
{
    async fn monthly_report(
        &self,
        user_id: &UserId,
        year: i32,
    ) -> Result<Vec<MonthlyStat>, ReportError> {
        validate_year(year)?;

        let entries = self
            .entries
            .list(user_id, &TimeEntryFilter::for_year(year))
            .await?;
        let rates = self.projects.hourly_rates(user_id).await?;

        Ok(monthly_stats(year, &entries, &rates))
    }

    async fn yearly_progress(
        &self,
        user_id: &UserId,
        year: i32,
    ) -> Result<ProgressStat, ReportError> {
        let stats = self.monthly_report(user_id, year).await?;
        let target = self
            .targets
            .get(user_id, year)
            .await?
            .map(|t| t.target_amount)
            .unwrap_or(self.default_target);

        Ok(progress(yearly_revenue(&stats), target))
    }

    async fn set_yearly_target(
        &self,
        user_id: &UserId,
        year: i32,
        target_amount: Decimal,
    ) -> Result<YearlyTarget, ReportError> {
        validate_year(year)?;
        validate_target_amount(target_amount)?;

        let target = YearlyTarget::new(*user_id, year, target_amount);
        self.targets.upsert(&target).await?;
        tracing::info!(%user_id, year, %target_amount, "yearly target set");

        Ok(target)
    }
}
