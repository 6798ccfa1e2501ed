use std::sync::Arc;

use aws_sdk_s3::Client as S3Client;
use tracing_subscriber::{fmt, EnvFilter};
use upload_service::{
    media_storage::MediaStorage,
    server,
    types::{Environment, LogFormat},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let environment = Environment::from_env();

    // Configure logging format based on environment
    // Use JSON format for staging/production log pipelines, regular format for development
    match environment.log_format() {
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(EnvFilter::from_default_env())
                .init();
        }
        LogFormat::Human => {
            fmt().with_env_filter(EnvFilter::from_default_env()).init();
        }
    }

    let s3_client = Arc::new(S3Client::from_conf(environment.s3_client_config().await));
    let media_storage = Arc::new(MediaStorage::new(
        s3_client,
        environment.bucket_name().to_owned(),
        environment.signed_url_expire_secs(),
    ));

    server::start(environment, media_storage).await
}
