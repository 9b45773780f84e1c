use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};
use tracing::{error, warn};

use super::domain::{TestId, UserLevelsId};
use super::repository::{AssessmentRepository, RepositoryError};
use super::service::{AssessmentService, AssessmentServiceError};

/// Router builder exposing submission and retrieval endpoints.
pub fn assessment_router<R>(service: Arc<AssessmentService<R>>) -> Router
where
    R: AssessmentRepository + 'static,
{
    Router::new()
        .route("/api/v1/fitness-tests", post(submit_handler::<R>))
        .route("/api/v1/fitness-tests/:test_id", get(test_result_handler::<R>))
        .route(
            "/api/v1/user-levels/:user_levels_id",
            get(user_levels_handler::<R>),
        )
        .route(
            "/api/v1/users/:user_id/levels",
            get(user_history_handler::<R>),
        )
        .with_state(service)
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (status, axum::Json(json!({ "error": message }))).into_response()
}

pub(crate) async fn submit_handler<R>(
    State(service): State<Arc<AssessmentService<R>>>,
    body: Bytes,
) -> Response
where
    R: AssessmentRepository + 'static,
{
    if body.is_empty() {
        warn!("missing request body");
        return error_response(StatusCode::BAD_REQUEST, "Missing request body");
    }

    let payload: Value = match serde_json::from_slice(&body) {
        Ok(payload) => payload,
        Err(err) => {
            warn!(%err, "request body is not valid json");
            return error_response(StatusCode::BAD_REQUEST, "Invalid JSON in request body");
        }
    };

    match service.submit(&payload) {
        Ok(receipt) => (StatusCode::OK, axum::Json(receipt)).into_response(),
        Err(AssessmentServiceError::Validation(err)) => {
            warn!(field = err.field(), %err, "validation error");
            error_response(StatusCode::BAD_REQUEST, &err.to_string())
        }
        Err(other) => {
            error!(err = %other, "assessment submission failed");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
        }
    }
}

pub(crate) async fn test_result_handler<R>(
    State(service): State<Arc<AssessmentService<R>>>,
    Path(test_id): Path<String>,
) -> Response
where
    R: AssessmentRepository + 'static,
{
    let id = TestId(test_id);
    match service.test_result(&id) {
        Ok(record) => (StatusCode::OK, axum::Json(record)).into_response(),
        Err(err) => lookup_failure(err, "test result"),
    }
}

pub(crate) async fn user_levels_handler<R>(
    State(service): State<Arc<AssessmentService<R>>>,
    Path(user_levels_id): Path<String>,
) -> Response
where
    R: AssessmentRepository + 'static,
{
    let id = UserLevelsId(user_levels_id);
    match service.user_levels(&id) {
        Ok(record) => (StatusCode::OK, axum::Json(record)).into_response(),
        Err(err) => lookup_failure(err, "user levels"),
    }
}

pub(crate) async fn user_history_handler<R>(
    State(service): State<Arc<AssessmentService<R>>>,
    Path(user_id): Path<String>,
) -> Response
where
    R: AssessmentRepository + 'static,
{
    match service.levels_for_user(&user_id) {
        Ok(records) => {
            let payload = json!({
                "user_id": user_id,
                "levels": records,
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(err) => lookup_failure(err, "user level history"),
    }
}

fn lookup_failure(err: AssessmentServiceError, resource: &str) -> Response {
    match err {
        AssessmentServiceError::Repository(RepositoryError::NotFound) => {
            error_response(StatusCode::NOT_FOUND, &format!("{resource} not found"))
        }
        other => {
            error!(err = %other, resource, "lookup failed");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
        }
    }
}
