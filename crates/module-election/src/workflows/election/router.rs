use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Router,
};
use serde_json::json;

use super::catalog::ModuleCatalog;
use super::domain::StudentId;
use super::intake::ElectionSubmission;
use super::repository::{ElectionNotifier, ElectionRepository, RepositoryError};
use super::service::{ElectionService, ElectionServiceError};

/// Router builder exposing HTTP endpoints for election preview, submission, and lookup.
pub fn election_router<C, R, N>(service: Arc<ElectionService<C, R, N>>) -> Router
where
    C: ModuleCatalog + 'static,
    R: ElectionRepository + 'static,
    N: ElectionNotifier + 'static,
{
    Router::new()
        .route(
            "/api/v1/elections/validate",
            post(preview_handler::<C, R, N>),
        )
        .route("/api/v1/elections", put(submit_handler::<C, R, N>))
        .route(
            "/api/v1/elections/:student_id",
            get(status_handler::<C, R, N>),
        )
        .with_state(service)
}

pub(crate) async fn preview_handler<C, R, N>(
    State(service): State<Arc<ElectionService<C, R, N>>>,
    axum::Json(submission): axum::Json<ElectionSubmission>,
) -> Response
where
    C: ModuleCatalog + 'static,
    R: ElectionRepository + 'static,
    N: ElectionNotifier + 'static,
{
    match service.preview(submission) {
        Ok(status) => (StatusCode::OK, axum::Json(status)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn submit_handler<C, R, N>(
    State(service): State<Arc<ElectionService<C, R, N>>>,
    axum::Json(submission): axum::Json<ElectionSubmission>,
) -> Response
where
    C: ModuleCatalog + 'static,
    R: ElectionRepository + 'static,
    N: ElectionNotifier + 'static,
{
    match service.submit(submission) {
        Ok(record) => (StatusCode::ACCEPTED, axum::Json(record.status_view())).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn status_handler<C, R, N>(
    State(service): State<Arc<ElectionService<C, R, N>>>,
    Path(student_id): Path<String>,
) -> Response
where
    C: ModuleCatalog + 'static,
    R: ElectionRepository + 'static,
    N: ElectionNotifier + 'static,
{
    let id = StudentId(student_id);
    match service.get(&id) {
        Ok(record) => (StatusCode::OK, axum::Json(record.status_view())).into_response(),
        Err(ElectionServiceError::Repository(RepositoryError::NotFound)) => {
            let payload = json!({
                "student_id": id.0,
                "error": "no election stored for student",
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(error) => error_response(error),
    }
}

fn error_response(error: ElectionServiceError) -> Response {
    let status = match &error {
        ElectionServiceError::Intake(_) | ElectionServiceError::Election(_) => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        ElectionServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        ElectionServiceError::Repository(_) | ElectionServiceError::Notify(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    let payload = json!({
        "error": error.to_string(),
    });
    (status, axum::Json(payload)).into_response()
}
