//! Environment configuration loaded once at startup

use std::env;
use std::time::Duration;

use aws_config::{retry::RetryConfig, timeout::TimeoutConfig, BehaviorVersion, Region};

/// Default presigned URL validity window in seconds
const DEFAULT_SIGNED_URL_EXPIRE_SECS: u64 = 120;

/// Maximum retry attempts for AWS operations
const MAX_RETRIES: u32 = 3;

/// Log output format, selected by `APP_ENV`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Structured JSON lines for staging/production log pipelines
    Json,
    /// Human-readable output for development
    Human,
}

/// Process-wide configuration, loaded once at startup and immutable thereafter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Environment {
    region: String,
    bucket_name: String,
    signed_url_expire_secs: u64,
    endpoint_url_override: Option<String>,
    log_format: LogFormat,
}

impl Environment {
    /// Reads configuration from the process environment.
    ///
    /// `SIGNED_URL_EXPIRE` falls back to the default when unset or
    /// unparsable.
    ///
    /// # Panics
    ///
    /// Panics if `REGION` or `BUCKET_NAME` is not set, or if `APP_ENV`
    /// holds an unknown value. The process fails fast rather than serving
    /// requests it cannot sign.
    #[must_use]
    pub fn from_env() -> Self {
        let region = env::var("REGION").expect("REGION environment variable is not set");
        let bucket_name =
            env::var("BUCKET_NAME").expect("BUCKET_NAME environment variable is not set");

        let signed_url_expire_secs = env::var("SIGNED_URL_EXPIRE")
            .ok()
            .and_then(|val| val.parse::<u64>().ok())
            .unwrap_or(DEFAULT_SIGNED_URL_EXPIRE_SECS);

        // LocalStack in development, regular AWS endpoints otherwise
        let endpoint_url_override = env::var("AWS_ENDPOINT_URL").ok();

        let app_env = env::var("APP_ENV")
            .unwrap_or_else(|_| "development".to_string())
            .trim()
            .to_lowercase();

        let log_format = match app_env.as_str() {
            "production" | "staging" => LogFormat::Json,
            "development" => LogFormat::Human,
            _ => panic!("Invalid environment: {app_env}"),
        };

        Self {
            region,
            bucket_name,
            signed_url_expire_secs,
            endpoint_url_override,
            log_format,
        }
    }

    /// Target bucket for all derived keys
    #[must_use]
    pub fn bucket_name(&self) -> &str {
        &self.bucket_name
    }

    /// Presigned URL expiry time in seconds
    #[must_use]
    pub const fn signed_url_expire_secs(&self) -> u64 {
        self.signed_url_expire_secs
    }

    /// Log output format for this deployment
    #[must_use]
    pub const fn log_format(&self) -> LogFormat {
        self.log_format
    }

    /// AWS configuration with retry and timeout settings
    pub async fn aws_config(&self) -> aws_config::SdkConfig {
        let retry_config = RetryConfig::standard()
            .with_max_attempts(MAX_RETRIES)
            .with_initial_backoff(Duration::from_millis(50));

        let timeout_config = TimeoutConfig::builder()
            .operation_timeout(Duration::from_secs(30))
            .build();

        let mut config_builder = aws_config::load_defaults(BehaviorVersion::latest())
            .await
            .to_builder()
            .region(Region::new(self.region.clone()))
            .retry_config(retry_config)
            .timeout_config(timeout_config);

        if let Some(endpoint_url) = &self.endpoint_url_override {
            config_builder = config_builder.endpoint_url(endpoint_url);
        }

        config_builder.build()
    }

    /// AWS S3 service configuration
    pub async fn s3_client_config(&self) -> aws_sdk_s3::Config {
        let aws_config = self.aws_config().await;
        let s3_config: aws_sdk_s3::Config = (&aws_config).into();
        let mut builder = s3_config.to_builder();

        // Override "force path style" to true for compatibility with LocalStack
        // https://github.com/awslabs/aws-sdk-rust/discussions/874
        if self.endpoint_url_override.is_some() {
            builder.set_force_path_style(Some(true));
        }

        builder.build()
    }
}
