//! Route definitions for the `/applications` resource.

use axum::routing::{get, post};
use axum::Router;
use crewhub_core::recruitment::RecruitmentStore;

use crate::handlers::applications;
use crate::state::AppState;

/// Routes mounted at `/applications`.
///
/// ```text
/// GET    /{id}             -> get_by_id
/// POST   /{id}/withdraw    -> withdraw
/// POST   /{id}/review      -> review
/// ```
pub fn router<S: RecruitmentStore + 'static>() -> Router<AppState<S>> {
    Router::new()
        .route("/{id}", get(applications::get_by_id::<S>))
        .route("/{id}/withdraw", post(applications::withdraw::<S>))
        .route("/{id}/review", post(applications::review::<S>))
}
