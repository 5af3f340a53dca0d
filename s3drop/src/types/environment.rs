//! Environment configuration for the target storage endpoint

use std::env;
use std::time::Duration;

use aws_config::{timeout::TimeoutConfig, BehaviorVersion, SdkConfig};
use aws_sdk_s3::config::Region;

/// Connect timeout for every storage request
const CONNECT_TIMEOUT_SECS: u64 = 10;

/// Variable holding a custom S3-compatible endpoint
pub const ENDPOINT_URL_VAR: &str = "S3DROP_ENDPOINT_URL";

/// Variable selecting the log output format
pub const LOG_FORMAT_VAR: &str = "S3DROP_LOG_FORMAT";

/// Storage environment configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    /// Regular AWS S3 endpoints
    Aws,
    /// S3-compatible endpoint such as `LocalStack`
    Local {
        /// Endpoint all requests are sent to
        endpoint_url: String,
    },
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human readable lines
    Plain,
    /// One JSON object per event
    Json,
}

impl Environment {
    /// Creates an Environment from the `S3DROP_ENDPOINT_URL` environment variable
    #[must_use]
    pub fn from_env() -> Self {
        match env::var(ENDPOINT_URL_VAR) {
            Ok(url) if !url.trim().is_empty() => Self::Local {
                endpoint_url: url.trim().to_string(),
            },
            _ => Self::Aws,
        }
    }

    /// Returns the endpoint URL to use instead of the AWS defaults
    #[must_use]
    pub fn override_aws_endpoint_url(&self) -> Option<&str> {
        match self {
            Self::Aws => None,
            Self::Local { endpoint_url } => Some(endpoint_url),
        }
    }

    /// AWS configuration from the default provider chain
    ///
    /// Uses the named profile when one is given.
    pub async fn aws_config(&self, profile: Option<&str>) -> SdkConfig {
        let timeout_config = TimeoutConfig::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .build();

        let mut loader =
            aws_config::defaults(BehaviorVersion::latest()).timeout_config(timeout_config);

        if let Some(profile) = profile {
            loader = loader.profile_name(profile);
        }

        if let Some(endpoint_url) = self.override_aws_endpoint_url() {
            loader = loader.endpoint_url(endpoint_url);
        }

        loader.load().await
    }

    /// AWS S3 service configuration, optionally pinned to `region`
    #[must_use]
    pub fn s3_client_config(
        &self,
        sdk_config: &SdkConfig,
        region: Option<Region>,
    ) -> aws_sdk_s3::Config {
        let mut builder = aws_sdk_s3::config::Builder::from(sdk_config);

        if let Some(region) = region {
            builder.set_region(Some(region));
        }

        // Custom endpoints rarely resolve virtual-hosted bucket names
        if matches!(self, Self::Local { .. }) {
            builder.set_force_path_style(Some(true));
        }

        builder.build()
    }
}

impl LogFormat {
    /// Reads the format from `S3DROP_LOG_FORMAT`, defaulting to plain
    #[must_use]
    pub fn from_env() -> Self {
        match env::var(LOG_FORMAT_VAR) {
            Ok(value) if value.trim().eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Plain,
        }
    }
}
