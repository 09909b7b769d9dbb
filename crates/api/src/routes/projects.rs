//! Route definitions for the `/projects` resource.

use axum::routing::{get, post, put};
use axum::Router;
use crewhub_core::recruitment::RecruitmentStore;

use crate::handlers::projects;
use crate::state::AppState;

/// Routes mounted at `/projects`.
///
/// ```text
/// POST   /                       -> create
/// GET    /{id}                   -> get_overview
/// PUT    /{id}/status            -> update_status
/// POST   /{id}/applications      -> submit_application
/// ```
pub fn router<S: RecruitmentStore + 'static>() -> Router<AppState<S>> {
    Router::new()
        .route("/", post(projects::create::<S>))
        .route("/{id}", get(projects::get_overview::<S>))
        .route("/{id}/status", put(projects::update_status::<S>))
        .route(
            "/{id}/applications",
            post(projects::submit_application::<S>),
        )
}
