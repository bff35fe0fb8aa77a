//! Composition root: wires concrete outbound adapters into the domain services.
//!
//! This is the ONLY place that imports concrete outbound adapters.

use std::sync::Arc;

use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::{
    adapters::outbound::postgres::{
        PostgresProjectRepository, PostgresTimeEntryRepository, PostgresYearlyTargetRepository,
    },
    app_state::AppState,
    auth::TokenVerifier,
    domain::{
        ports::outbound::{ProjectRepository, TimeEntryRepository, YearlyTargetRepository},
        services::{ProjectServiceImpl, ReportingServiceImpl, TimeEntryServiceImpl},
    },
};

/// Build the application state on top of Postgres-backed repositories.
pub fn postgres_app_state(pool: PgPool, jwt_secret: &str, default_target: Decimal) -> AppState {
    let entries = Arc::new(PostgresTimeEntryRepository::new(pool.clone()));
    let projects = Arc::new(PostgresProjectRepository::new(pool.clone()));
    let targets = Arc::new(PostgresYearlyTargetRepository::new(pool));

    app_state(entries, projects, targets, jwt_secret, default_target)
}

fn app_state<E, P, T>(
    entries: Arc<E>,
    projects: Arc<P>,
    targets: Arc<T>,
    jwt_secret: &str,
    default_target: Decimal,
) -> AppState
where
    E: TimeEntryRepository,
    P: ProjectRepository,
    T: YearlyTargetRepository,
{
    AppState {
        time_entries: Arc::new(TimeEntryServiceImpl::new(entries.clone(), projects.clone())),
        projects: Arc::new(ProjectServiceImpl::new(projects.clone())),
        reporting: Arc::new(
            ReportingServiceImpl::new(entries, projects, targets)
                .with_default_target(default_target),
        ),
        verifier: Arc::new(TokenVerifier::new(jwt_secret)),
    }
}

/// Application state backed by a single in-memory store.
#[cfg(test)]
pub fn mock_app_state(store: crate::adapters::outbound::MockStore, jwt_secret: &str) -> AppState {
    let store = Arc::new(store);
    app_state(
        store.clone(),
        store.clone(),
        store,
        jwt_secret,
        crate::domain::models::DEFAULT_YEARLY_TARGET,
    )
}
