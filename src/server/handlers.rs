use axum::{
    body::Bytes,
    extract::{
        multipart::{MultipartError, MultipartRejection},
        Multipart, Path, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
};

use super::state::AppState;
use crate::domain::model::Operation;
use crate::utils::error::{EngineError, Result};

/// Form field carrying the uploaded matrix.
const FILE_FIELD: &str = "file";

/// Health check endpoint
pub async fn health() -> impl IntoResponse {
    "matrix-csv is running"
}

/// Evaluate the uploaded matrix with the operation named in the path.
pub async fn evaluate(
    State(state): State<AppState>,
    Path(operation): Path<String>,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> Response {
    let operation = match operation.parse::<Operation>() {
        Ok(operation) => operation,
        Err(e) => return (StatusCode::NOT_FOUND, format!("error {}", e)).into_response(),
    };

    match evaluate_upload(&state, operation, multipart).await {
        Ok(body) => {
            tracing::info!(%operation, bytes = body.len(), "Request completed");
            (StatusCode::OK, body).into_response()
        }
        Err(e) => {
            tracing::warn!(%operation, category = ?e.category(), "Request rejected: {}", e);
            e.into_response()
        }
    }
}

async fn evaluate_upload(
    state: &AppState,
    operation: Operation,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> Result<String> {
    let multipart = multipart.map_err(|rejection| {
        upload_failure(rejection.status(), rejection.body_text())
    })?;
    let upload = read_upload(multipart).await?;

    let engine = *state.engine();
    tokio::task::spawn_blocking(move || engine.run(operation, &upload))
        .await
        .map_err(|e| EngineError::TaskError {
            message: e.to_string(),
        })?
}

async fn read_upload(mut multipart: Multipart) -> Result<Bytes> {
    while let Some(field) = multipart.next_field().await.map_err(upload_error)? {
        if field.name() == Some(FILE_FIELD) {
            return field.bytes().await.map_err(upload_error);
        }
    }

    Err(EngineError::UploadError {
        message: format!("missing '{}' field", FILE_FIELD),
    })
}

fn upload_error(e: MultipartError) -> EngineError {
    upload_failure(e.status(), e.body_text())
}

/// Body-limit failures keep their 413; everything else is a bad upload.
fn upload_failure(status: StatusCode, message: String) -> EngineError {
    if status == StatusCode::PAYLOAD_TOO_LARGE {
        EngineError::UploadTooLarge { message }
    } else {
        EngineError::UploadError { message }
    }
}
