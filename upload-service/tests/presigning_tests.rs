//! Presigning is a local SigV4 computation against resolved credentials:
//! no network traffic is involved, so it can be exercised with hardcoded
//! test credentials against a real S3 client.

use std::sync::Arc;

use aws_credential_types::Credentials;
use aws_sdk_s3::{
    config::{BehaviorVersion, Region},
    Client as S3Client,
};
use upload_service::media_storage::{MediaStorage, UploadUrlSigner};

fn test_storage(expire_secs: u64) -> MediaStorage {
    let config = aws_sdk_s3::Config::builder()
        .behavior_version(BehaviorVersion::latest())
        .region(Region::new("eu-north-1"))
        .credentials_provider(Credentials::from_keys(
            "AKIDEXAMPLE",
            "wJalrXUtnFEMI/K7MDENG+bPxRfiCYEXAMPLEKEY",
            None,
        ))
        .build();

    MediaStorage::new(
        Arc::new(S3Client::from_conf(config)),
        "upload-service-media".to_string(),
        expire_secs,
    )
}

#[tokio::test]
async fn presigned_url_embeds_bucket_key_and_expiry() {
    let storage = test_storage(120);

    let presigned = storage
        .presigned_upload_url("uploads/1700000000-a1b2c3.png", "image/png")
        .await
        .expect("presigning should not fail with valid credentials");

    assert!(presigned.url.contains("upload-service-media"));
    assert!(presigned.url.contains("uploads/1700000000-a1b2c3.png"));
    assert!(presigned.url.contains("X-Amz-Expires=120"));
    assert!(presigned.expires_at > chrono::Utc::now());
}

#[tokio::test]
async fn presigned_url_honors_configured_expiry() {
    let storage = test_storage(900);

    let presigned = storage
        .presigned_upload_url("uploads/1700000000-d4e5f6.webp", "image/webp")
        .await
        .expect("presigning should not fail with valid credentials");

    assert!(presigned.url.contains("X-Amz-Expires=900"));
}

#[tokio::test]
async fn presigned_url_signs_the_content_type() {
    let storage = test_storage(120);

    let presigned = storage
        .presigned_upload_url("uploads/1700000000-a1b2c3.gif", "image/gif")
        .await
        .expect("presigning should not fail with valid credentials");

    // The content type participates in the signature, so an upload with a
    // different type is rejected by the bucket.
    assert!(presigned
        .url
        .to_lowercase()
        .contains("x-amz-signedheaders=content-type"));
}
