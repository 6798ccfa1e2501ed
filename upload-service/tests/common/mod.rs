// Not every util is used in every test, so we allow dead code
#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::{body::Body, http::Request, response::Response, Router};
use chrono::{Duration, Utc};
use tower::ServiceExt;
use upload_service::{
    media_storage::{BucketError, BucketResult, PresignedUrl, UploadUrlSigner},
    server,
};

/// Signer stub that mints a deterministic URL without touching AWS.
pub struct StubSigner;

#[async_trait]
impl UploadUrlSigner for StubSigner {
    async fn presigned_upload_url(
        &self,
        key: &str,
        content_type: &str,
    ) -> BucketResult<PresignedUrl> {
        Ok(PresignedUrl {
            url: format!(
                "https://upload-service-media.s3.amazonaws.com/{key}?X-Amz-Expires=120&content-type={content_type}"
            ),
            expires_at: Utc::now() + Duration::seconds(120),
        })
    }
}

/// Signer stub whose backend always faults.
pub struct FailingSigner;

#[async_trait]
impl UploadUrlSigner for FailingSigner {
    async fn presigned_upload_url(
        &self,
        _key: &str,
        _content_type: &str,
    ) -> BucketResult<PresignedUrl> {
        Err(BucketError::S3Error("connection reset by peer".to_string()))
    }
}

/// Test harness around the full router, stub-backed by default.
pub struct TestContext {
    pub router: Router,
}

impl TestContext {
    pub fn new() -> Self {
        Self::with_signer(Arc::new(StubSigner))
    }

    pub fn with_signer(signer: Arc<dyn UploadUrlSigner>) -> Self {
        Self {
            router: server::router(signer),
        }
    }

    pub async fn send_post_request(
        &self,
        route: &str,
        payload: serde_json::Value,
    ) -> Result<Response, Box<dyn std::error::Error>> {
        let request = Request::builder()
            .uri(route)
            .method("POST")
            .header("Content-Type", "application/json")
            .body(Body::from(payload.to_string()))?;

        let response = self.router.clone().oneshot(request).await?;
        Ok(response)
    }

    /// POST with an arbitrary (possibly empty or non-JSON) body and no
    /// Content-Type header, for the lenient-parsing cases.
    pub async fn send_raw_post_request(
        &self,
        route: &str,
        body: impl Into<Body>,
    ) -> Result<Response, Box<dyn std::error::Error>> {
        let request = Request::builder()
            .uri(route)
            .method("POST")
            .body(body.into())?;

        let response = self.router.clone().oneshot(request).await?;
        Ok(response)
    }

    pub async fn send_get_request(
        &self,
        route: &str,
    ) -> Result<Response, Box<dyn std::error::Error>> {
        let request = Request::builder()
            .uri(route)
            .method("GET")
            .body(Body::empty())?;
        let response = self.router.clone().oneshot(request).await?;
        Ok(response)
    }
}

/// Parse response body to JSON
pub async fn parse_response_body(response: Response) -> serde_json::Value {
    use http_body_util::BodyExt;

    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

/// Asserts the permissive cross-origin headers the contract requires on
/// every response, regardless of status.
pub fn assert_cors_headers(response: &Response) {
    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .expect("missing Access-Control-Allow-Origin")
            .to_str()
            .unwrap(),
        "*"
    );
    assert_eq!(
        response
            .headers()
            .get("access-control-allow-headers")
            .expect("missing Access-Control-Allow-Headers")
            .to_str()
            .unwrap()
            .to_lowercase(),
        "content-type"
    );
}
