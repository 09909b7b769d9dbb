//! Per-user dashboards: the applicant view and the owner view.

use axum::extract::{Query, State};
use axum::Json;
use crewhub_core::pagination::Page;
use crewhub_core::recruitment::{ApplicantApplicationView, OwnerProjectView, RecruitmentStore};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::PageParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/me/applications
pub async fn my_applications<S: RecruitmentStore + 'static>(
    user: AuthUser,
    State(state): State<AppState<S>>,
    Query(params): Query<PageParams>,
) -> AppResult<Json<DataResponse<Page<ApplicantApplicationView>>>> {
    let page = state
        .service
        .list_applications_for_applicant(user.user_id, params.into())
        .await
        .map_err(AppError::from_store)?;
    Ok(Json(DataResponse { data: page }))
}

/// GET /api/v1/me/projects/applications
pub async fn my_projects_applications<S: RecruitmentStore + 'static>(
    user: AuthUser,
    State(state): State<AppState<S>>,
    Query(params): Query<PageParams>,
) -> AppResult<Json<DataResponse<Page<OwnerProjectView>>>> {
    let page = state
        .service
        .list_projects_with_applications_for_owner(user.user_id, params.into())
        .await
        .map_err(AppError::from_store)?;
    Ok(Json(DataResponse { data: page }))
}
