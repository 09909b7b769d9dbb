//! Handlers for the `/applications` resource.

use axum::extract::{Path, State};
use axum::Json;
use crewhub_core::application::ReviewApplication;
use crewhub_core::recruitment::{Application, RecruitmentStore};
use crewhub_core::types::DbId;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/applications/{id}
pub async fn get_by_id<S: RecruitmentStore + 'static>(
    user: AuthUser,
    State(state): State<AppState<S>>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Application>>> {
    let application = state
        .service
        .get_application(id, &user.actor())
        .await
        .map_err(AppError::from_store)?;
    Ok(Json(DataResponse { data: application }))
}

/// POST /api/v1/applications/{id}/withdraw
pub async fn withdraw<S: RecruitmentStore + 'static>(
    user: AuthUser,
    State(state): State<AppState<S>>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Application>>> {
    let application = state
        .service
        .withdraw_application(id, &user.actor())
        .await
        .map_err(AppError::from_store)?;
    Ok(Json(DataResponse { data: application }))
}

/// POST /api/v1/applications/{id}/review
///
/// Body: `{ "decision": "accept" | "reject", "review_notes"?, "rejection_reason"? }`.
pub async fn review<S: RecruitmentStore + 'static>(
    user: AuthUser,
    State(state): State<AppState<S>>,
    Path(id): Path<DbId>,
    Json(input): Json<ReviewApplication>,
) -> AppResult<Json<DataResponse<Application>>> {
    let application = state
        .service
        .review_application(id, &user.actor(), input)
        .await
        .map_err(AppError::from_store)?;
    Ok(Json(DataResponse { data: application }))
}
