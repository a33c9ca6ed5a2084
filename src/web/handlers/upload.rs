//! Upload handler.

use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use utoipa::ToSchema;

use crate::upload::{ResponsePayload, ResultCode};
use crate::web::error::ApiError;
use crate::web::handlers::AppState;
use crate::web::staging::StagingError;

/// Multipart form accepted by the upload endpoint (documentation only).
#[derive(Debug, ToSchema)]
pub struct UploadForm {
    /// Project directory segment.
    pub project: String,
    /// Category directory segment; `type` is accepted as an alias.
    pub category: String,
    /// Maximum size per file in bytes.
    pub max: u64,
    /// Comma-separated list of accepted content types.
    pub ext: String,
    /// One or more file parts.
    #[schema(value_type = Vec<String>)]
    pub file: Vec<Vec<u8>>,
}

/// POST /upload - Validate and store uploaded files.
///
/// Request body: multipart/form-data with `project`, `category` (or `type`),
/// `max`, `ext` text fields and one or more file parts.
#[utoipa::path(
    post,
    path = "/upload",
    tag = "upload",
    request_body(content = UploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Request processed; see per-file results", body = ResponsePayload),
        (status = 400, description = "Missing or invalid fields, or no files", body = ResponsePayload),
        (status = 413, description = "Body exceeds the server's size limit", body = ResponsePayload),
        (status = 500, description = "Upload could not be staged", body = ResponsePayload)
    )
)]
pub async fn upload(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<(StatusCode, Json<ResponsePayload>), ApiError> {
    let catalog = state.pipeline.catalog();

    let mut multipart = multipart.map_err(|e| {
        tracing::debug!("Rejected non-multipart upload: {}", e);
        ApiError::bad_request(catalog, ResultCode::MissingFields)
    })?;

    let request = state
        .stager
        .read_request(&mut multipart)
        .await
        .map_err(|e| match e {
            StagingError::Multipart(e) if e.status() == StatusCode::PAYLOAD_TOO_LARGE => {
                tracing::warn!("Upload body exceeds the configured limit: {}", e);
                ApiError::payload_too_large(catalog, ResultCode::FileTooLarge)
            }
            StagingError::Multipart(e) => {
                tracing::warn!("Failed to read multipart body: {}", e);
                ApiError::bad_request(catalog, ResultCode::MissingFields)
            }
            StagingError::Io(e) => {
                tracing::error!("Failed to stage upload: {}", e);
                ApiError::internal(catalog, ResultCode::StagingFailed)
            }
        })?;

    let payload = state.pipeline.process(request).await;
    let status = if payload.is_success() {
        StatusCode::OK
    } else {
        StatusCode::BAD_REQUEST
    };

    Ok((status, Json(payload)))
}
