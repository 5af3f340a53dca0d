//! Drop zone naming rules

use std::sync::LazyLock;

use regex::Regex;

use super::{BucketError, BucketResult};

static BUCKET_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z0-9][a-z0-9.\-]*[a-z0-9]$").expect("bucket name pattern is valid")
});

/// Checks `name` against the S3 bucket naming rules
///
/// # Errors
///
/// Returns `BucketError::InvalidBucketName` describing the first rule broken
pub fn validate_drop_zone_name(name: &str) -> BucketResult<()> {
    if name.is_empty() {
        return Err(BucketError::InvalidBucketName(
            "name cannot be empty".to_string(),
        ));
    }

    if !(3..=63).contains(&name.len()) {
        return Err(BucketError::InvalidBucketName(format!(
            "'{name}' must be between 3 and 63 characters"
        )));
    }

    if !BUCKET_NAME.is_match(name) {
        return Err(BucketError::InvalidBucketName(format!(
            "'{name}' can only contain lowercase letters, numbers, hyphens, and periods, \
             and must start and end with a letter or number"
        )));
    }

    if name.contains("..") {
        return Err(BucketError::InvalidBucketName(format!(
            "'{name}' cannot contain two adjacent periods"
        )));
    }

    Ok(())
}
