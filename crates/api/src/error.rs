use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use crewhub_core::error::CoreError;
use crewhub_core::recruitment::StoreError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and opaque storage failures.
/// Implements [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `crewhub_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A storage backend failure that carries no domain meaning.
    #[error("Storage error: {0}")]
    Store(Box<dyn std::error::Error + Send + Sync>),
}

impl AppError {
    /// Split a store error into its domain error, if any, or an opaque
    /// backend failure.
    ///
    /// ```ignore
    /// let page = state.service.list_applications_for_applicant(id, page)
    ///     .await
    ///     .map_err(AppError::from_store)?;
    /// ```
    pub fn from_store<E: StoreError>(err: E) -> Self {
        match err.into_core() {
            Ok(core) => AppError::Core(core),
            Err(backend) => AppError::Store(Box::new(backend)),
        }
    }
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => classify_core_error(core),

            // --- Storage errors ---
            AppError::Store(err) => {
                tracing::error!(error = %err, "Storage error");
                internal()
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Map a domain error to an HTTP status, error code, and message.
///
/// Capacity failures get their own code so clients can show
/// "position filled" without parsing the message.
fn classify_core_error(core: &CoreError) -> (StatusCode, &'static str, String) {
    match core {
        CoreError::NotFound { entity, id } => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            format!("{entity} with id {id} not found"),
        ),
        CoreError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
        CoreError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
        CoreError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone()),
        CoreError::DuplicateApplication { .. } => (
            StatusCode::CONFLICT,
            "DUPLICATE_APPLICATION",
            core.to_string(),
        ),
        CoreError::InvalidTransition { .. } => (
            StatusCode::CONFLICT,
            "INVALID_TRANSITION",
            core.to_string(),
        ),
        CoreError::NotAuthor { .. } => (StatusCode::FORBIDDEN, "NOT_AUTHOR", core.to_string()),
        CoreError::CapacityExceeded { .. } => (
            StatusCode::CONFLICT,
            "POSITION_FILLED",
            "This position has already been filled".to_string(),
        ),
        CoreError::ProjectClosed { .. } => {
            (StatusCode::CONFLICT, "PROJECT_CLOSED", core.to_string())
        }
        CoreError::DataIntegrity(detail) => {
            tracing::error!(detail = %detail, "Data integrity violation reached the API");
            internal()
        }
    }
}

fn internal() -> (StatusCode, &'static str, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "An internal error occurred".to_string(),
    )
}
