pub mod applications;
pub mod health;
pub mod me;
pub mod projects;

use axum::Router;
use crewhub_core::recruitment::RecruitmentStore;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /projects                                create (auth)
/// /projects/{id}                           public overview
/// /projects/{id}/status                    change stored status (owner/admin)
/// /projects/{id}/applications              submit application (auth)
///
/// /applications/{id}                       get (applicant, owner, admin)
/// /applications/{id}/withdraw              withdraw (applicant)
/// /applications/{id}/review                accept / reject (owner, admin)
///
/// /me/applications                         applicant view, paginated
/// /me/projects/applications                owner view, paginated
/// ```
pub fn api_routes<S: RecruitmentStore + 'static>() -> Router<AppState<S>> {
    Router::new()
        .nest("/projects", projects::router())
        .nest("/applications", applications::router())
        .nest("/me", me::router())
}
