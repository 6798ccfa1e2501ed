//! Validation and object-key derivation for upload authorizations
//!
//! This module is transport-free: it takes the decoded request, decides
//! whether the upload may be authorized, and derives the storage key. HTTP
//! shaping (status codes, headers, body envelope) lives in the route layer.

use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::Deserialize;
use thiserror::Error;
use uuid::Uuid;

/// Content types accepted for upload, in the order reported to clients.
pub const ALLOWED_IMAGE_TYPES: [&str; 4] =
    ["image/jpeg", "image/png", "image/gif", "image/webp"];

/// Characters of the random identifier kept in the object key suffix.
const KEY_SUFFIX_LEN: usize = 6;

/// Incoming upload authorization request.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadRequest {
    /// Client-supplied file name hint. Accepted for wire compatibility but
    /// not used in key derivation.
    #[serde(default)]
    pub file_name: Option<String>,
    /// MIME type the client intends to upload.
    #[serde(default)]
    pub content_type: Option<String>,
}

impl UploadRequest {
    /// Parses a request body leniently.
    ///
    /// A missing or unparsable body yields the empty request: every field
    /// comes back absent and the request fails content-type validation
    /// downstream, rather than producing a distinct parse error.
    #[must_use]
    pub fn from_body(body: &[u8]) -> Self {
        serde_json::from_slice(body).unwrap_or_default()
    }
}

/// Rejection produced by upload validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The content type is missing or does not carry the `image/` prefix.
    #[error("Invalid contentType. Must start with \"image/\".")]
    NotAnImage,

    /// The content type is an image type outside the allowed set.
    #[error(
        "Unsupported image type: {0}. Allowed: image/jpeg, image/png, image/gif, image/webp"
    )]
    UnsupportedImageType(String),
}

/// Validates a requested content type.
///
/// Checks run in order and short-circuit: the `image/` prefix is required
/// before set membership is considered, so an absent content type reports
/// the prefix failure.
///
/// # Errors
///
/// Returns `ValidationError::NotAnImage` when the prefix is missing and
/// `ValidationError::UnsupportedImageType` when the type is outside
/// [`ALLOWED_IMAGE_TYPES`].
pub fn validate_content_type(content_type: &str) -> Result<&str, ValidationError> {
    if !content_type.starts_with("image/") {
        return Err(ValidationError::NotAnImage);
    }

    if !ALLOWED_IMAGE_TYPES.contains(&content_type) {
        return Err(ValidationError::UnsupportedImageType(
            content_type.to_owned(),
        ));
    }

    Ok(content_type)
}

/// Storage key under which an authorized upload will land.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectKey(String);

impl ObjectKey {
    /// Derives a fresh key for a validated content type.
    ///
    /// Format: `uploads/<unix-seconds>-<suffix>.<extension>`, where the
    /// suffix is the first [`KEY_SUFFIX_LEN`] characters of a v4 UUID and
    /// the extension is the subtype portion of the content type. Uniqueness
    /// is probabilistic; no collision detection is performed.
    #[must_use]
    pub fn derive(content_type: &str) -> Self {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |elapsed| elapsed.as_secs());

        let id = Uuid::new_v4().to_string();
        let suffix = &id[..KEY_SUFFIX_LEN];

        let extension = content_type
            .split_once('/')
            .map_or(content_type, |(_, subtype)| subtype);

        Self::from_parts(extension, timestamp, suffix)
    }

    /// Builds a key from explicit parts. [`ObjectKey::derive`] supplies
    /// fresh parts in production.
    #[must_use]
    pub fn from_parts(extension: &str, timestamp: u64, suffix: &str) -> Self {
        Self(format!("uploads/{timestamp}-{suffix}.{extension}"))
    }

    /// The key as a path string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the key, returning the underlying string.
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for ObjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
