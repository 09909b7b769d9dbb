//! Handlers for the `/projects` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use crewhub_core::application::ApplicationPayload;
use crewhub_core::recruitment::{
    Application, CreateProject, Project, ProjectOverview, RecruitmentStore, UpdateProjectStatus,
};
use crewhub_core::types::DbId;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/projects
pub async fn create<S: RecruitmentStore + 'static>(
    user: AuthUser,
    State(state): State<AppState<S>>,
    Json(input): Json<CreateProject>,
) -> AppResult<(StatusCode, Json<DataResponse<Project>>)> {
    let project = state
        .service
        .create_project(&user.actor(), input)
        .await
        .map_err(AppError::from_store)?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: project })))
}

/// GET /api/v1/projects/{id}
///
/// Public: no token required.
pub async fn get_overview<S: RecruitmentStore + 'static>(
    State(state): State<AppState<S>>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<ProjectOverview>>> {
    let overview = state
        .service
        .get_project_overview(id)
        .await
        .map_err(AppError::from_store)?;
    Ok(Json(DataResponse { data: overview }))
}

/// PUT /api/v1/projects/{id}/status
pub async fn update_status<S: RecruitmentStore + 'static>(
    user: AuthUser,
    State(state): State<AppState<S>>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateProjectStatus>,
) -> AppResult<Json<DataResponse<Project>>> {
    let project = state
        .service
        .update_project_status(id, &user.actor(), input.status)
        .await
        .map_err(AppError::from_store)?;
    Ok(Json(DataResponse { data: project }))
}

/// POST /api/v1/projects/{id}/applications
///
/// The applicant is always the authenticated user.
pub async fn submit_application<S: RecruitmentStore + 'static>(
    user: AuthUser,
    State(state): State<AppState<S>>,
    Path(project_id): Path<DbId>,
    Json(payload): Json<ApplicationPayload>,
) -> AppResult<(StatusCode, Json<DataResponse<Application>>)> {
    let application = state
        .service
        .submit_application(project_id, user.user_id, payload)
        .await
        .map_err(AppError::from_store)?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: application })))
}
