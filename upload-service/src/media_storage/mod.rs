//! S3-backed presigned upload URLs

mod error;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use aws_sdk_s3::{presigning::PresigningConfig, Client as S3Client};
use chrono::{DateTime, Utc};
use tracing::debug;

pub use error::{BucketError, BucketResult};

/// Presigned URL with expiration information
#[derive(Debug, Clone)]
pub struct PresignedUrl {
    /// The presigned URL for PUT operations
    pub url: String,
    /// UTC timestamp after which the URL is no longer honored
    pub expires_at: DateTime<Utc>,
}

/// A source of time-limited, write-scoped upload URLs.
///
/// The production implementation signs against S3; tests substitute a stub
/// so handlers can be exercised without credentials or a bucket.
#[async_trait]
pub trait UploadUrlSigner: Send + Sync {
    /// Requests a presigned PUT URL for `key`, scoped to `content_type`.
    ///
    /// # Errors
    ///
    /// Returns a [`BucketError`] when the signing request cannot be built
    /// or the backend rejects it.
    async fn presigned_upload_url(
        &self,
        key: &str,
        content_type: &str,
    ) -> BucketResult<PresignedUrl>;
}

/// S3 client wrapper that issues presigned PUT URLs for derived upload keys
pub struct MediaStorage {
    s3_client: Arc<S3Client>,
    bucket_name: String,
    presigned_url_expiry_secs: u64,
}

impl MediaStorage {
    /// Creates a new media storage client
    ///
    /// # Arguments
    ///
    /// * `s3_client` - Pre-configured S3 client
    /// * `bucket_name` - S3 bucket name receiving the uploads
    /// * `presigned_url_expiry_secs` - Expiry time for presigned URLs in seconds
    #[must_use]
    pub const fn new(
        s3_client: Arc<S3Client>,
        bucket_name: String,
        presigned_url_expiry_secs: u64,
    ) -> Self {
        Self {
            s3_client,
            bucket_name,
            presigned_url_expiry_secs,
        }
    }
}

#[async_trait]
impl UploadUrlSigner for MediaStorage {
    /// Generates a presigned URL for PUT operations
    ///
    /// The PUT is scoped to the configured bucket, the given key and the
    /// given content type; an upload with a different content type fails
    /// signature verification at the bucket.
    ///
    /// # Errors
    ///
    /// Returns `BucketError::ConfigError` if presigning config creation fails
    /// Returns `BucketError::S3Error` if presigned URL generation fails
    async fn presigned_upload_url(
        &self,
        key: &str,
        content_type: &str,
    ) -> BucketResult<PresignedUrl> {
        debug!("Generating presigned URL for object: {key}");

        let presigned_config =
            PresigningConfig::expires_in(Duration::from_secs(self.presigned_url_expiry_secs))
                .map_err(|e| {
                    BucketError::ConfigError(format!("Failed to create presigning config: {e}"))
                })?;

        let presigned_url = self
            .s3_client
            .put_object()
            .bucket(&self.bucket_name)
            .key(key)
            .content_type(content_type)
            .presigned(presigned_config)
            .await
            .map_err(|e| BucketError::S3Error(format!("Failed to generate presigned URL: {e}")))?;

        let expires_at: DateTime<Utc> =
            Utc::now() + Duration::from_secs(self.presigned_url_expiry_secs);

        debug!("Generated presigned URL for object: {key} expires at: {expires_at}");

        Ok(PresignedUrl {
            url: presigned_url.uri().to_string(),
            expires_at,
        })
    }
}
