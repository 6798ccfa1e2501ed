use axum::{body::Bytes, extract::State, Json};
use serde::Serialize;
use tracing::{info, instrument};

use crate::{
    authorization::{validate_content_type, ObjectKey, UploadRequest},
    state::AppState,
    types::AppError,
};

/// Successful upload authorization
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    /// Time-limited presigned PUT URL
    pub url: String,
    /// Object key the upload will land under
    pub key: String,
}

/// Issues a short-lived presigned PUT URL for an image upload.
///
/// The body is read raw and parsed leniently: a missing or malformed body
/// is handled as an empty request and rejected by content-type validation,
/// not reported as a distinct parse error.
#[instrument(skip(state, body))]
pub async fn create_upload_authorization(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<UploadResponse>, AppError> {
    let request = UploadRequest::from_body(&body);

    let content_type = validate_content_type(request.content_type.as_deref().unwrap_or(""))?;

    let key = ObjectKey::derive(content_type);

    let presigned = state
        .signer
        .presigned_upload_url(key.as_str(), content_type)
        .await?;

    info!(
        key = %key,
        content_type,
        expires_at = %presigned.expires_at,
        "Issued upload authorization"
    );

    Ok(Json(UploadResponse {
        url: presigned.url,
        key: key.into_string(),
    }))
}
