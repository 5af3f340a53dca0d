// Not every helper is used in every test, so we allow dead code
#![allow(dead_code)]

mod fake_s3;
pub use fake_s3::*;

use aws_config::{retry::RetryConfig, BehaviorVersion, Region, SdkConfig};
use aws_credential_types::{provider::SharedCredentialsProvider, Credentials};
use s3drop::types::Environment;

/// Initialize tracing for tests
pub fn setup_test_tracing() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init()
        .ok();
}

/// SDK configuration pointed at `endpoint_url` with static test credentials
pub fn test_sdk_config(endpoint_url: &str, region: &str) -> SdkConfig {
    sdk_config_with_credentials(
        endpoint_url,
        region,
        Some(SharedCredentialsProvider::new(Credentials::new(
            "test", "test", None, None, "fake-s3",
        ))),
    )
}

/// SDK configuration with the given provider and retries off, so 5xx answers surface at once
pub fn sdk_config_with_credentials(
    endpoint_url: &str,
    region: &str,
    credentials: Option<SharedCredentialsProvider>,
) -> SdkConfig {
    let mut builder = SdkConfig::builder()
        .behavior_version(BehaviorVersion::latest())
        .region(Region::new(region.to_string()))
        .endpoint_url(endpoint_url)
        .retry_config(RetryConfig::disabled());
    builder.set_credentials_provider(credentials);
    builder.build()
}

/// Environment sending requests to the fake server
pub fn local_environment(endpoint_url: &str) -> Environment {
    Environment::Local {
        endpoint_url: endpoint_url.to_string(),
    }
}

/// Unique bucket name for a test run
pub fn unique_bucket_name(prefix: &str) -> String {
    format!("{prefix}-{}", &uuid::Uuid::new_v4().simple().to_string()[..12])
}
