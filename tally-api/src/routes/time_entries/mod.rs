mod entries;
mod reports;

use axum::{routing::get, Router};

use crate::app_state::AppState;

pub(crate) use reports::{
    set_yearly_target_for, yearly_progress_for, ProgressQuery, YearlyTargetPayload,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(entries::list_entries).post(entries::create_entry))
        .route("/monthly-report", get(reports::monthly_report))
        .route(
            "/yearly-target",
            get(reports::yearly_progress).put(reports::set_yearly_target),
        )
        .route(
            "/:id",
            get(entries::get_entry)
                .put(entries::update_entry)
                .delete(entries::delete_entry),
        )
}
