//! Route definitions for `/me`.

use axum::routing::get;
use axum::Router;
use crewhub_core::recruitment::RecruitmentStore;

use crate::handlers::me;
use crate::state::AppState;

/// Routes mounted at `/me`.
///
/// ```text
/// GET    /applications             -> my_applications
/// GET    /projects/applications    -> my_projects_applications
/// ```
pub fn router<S: RecruitmentStore + 'static>() -> Router<AppState<S>> {
    Router::new()
        .route("/applications", get(me::my_applications::<S>))
        .route(
            "/projects/applications",
            get(me::my_projects_applications::<S>),
        )
}
