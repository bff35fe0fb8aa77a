use std::sync::Arc;

use axum::extract::FromRef;

use crate::{
    auth::TokenVerifier,
    domain::ports::inbound::{ProjectService, ReportingService, TimeEntryService},
};

/// Shared per-request state. Holds only `Arc`ed services and the token
/// verifier, all of which are immutable after startup.
#[derive(Clone)]
pub struct AppState {
    pub time_entries: Arc<dyn TimeEntryService>,
    pub projects: Arc<dyn ProjectService>,
    pub reporting: Arc<dyn ReportingService>,
    pub verifier: Arc<TokenVerifier>,
}

impl FromRef<AppState> for Arc<TokenVerifier> {
    fn from_ref(state: &AppState) -> Self {
        state.verifier.clone()
    }
}
