//! Error types for bucket operations

use std::path::PathBuf;

use aws_sdk_s3::{
    config::http::HttpResponse,
    error::{DisplayErrorContext, ProvideErrorMetadata, SdkError},
    operation::{head_object::HeadObjectError, put_object::PutObjectError},
};
use thiserror::Error;

/// Result type for bucket operations
pub type BucketResult<T> = Result<T, BucketError>;

/// Errors that can occur during bucket operations
#[derive(Error, Debug)]
pub enum BucketError {
    /// No credentials could be resolved from the provider chain
    #[error("AWS credentials not found: {0}")]
    MissingCredentials(String),

    /// The drop zone does not exist and auto-creation is disabled
    #[error("Drop zone '{0}' does not exist")]
    BucketNotFound(String),

    /// The bucket name is owned by another account
    #[error("Drop zone name '{0}' is already taken globally")]
    BucketNameTaken(String),

    /// The caller may not create or configure the bucket
    #[error("Permission denied: cannot create drop zone '{0}'")]
    PermissionDenied(String),

    /// Creating or securing the bucket failed for another reason
    #[error("Failed to create drop zone: {0}")]
    CreateFailed(String),

    /// The bucket name breaks the S3 naming rules
    #[error("Invalid drop zone name: {0}")]
    InvalidBucketName(String),

    /// Local file to drop is missing
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// Reading or sending the local file failed
    #[error("Drop failed: {0}")]
    UploadFailed(String),

    /// Object to share is missing from the bucket
    #[error("File not found in drop zone: {0}")]
    ObjectNotFound(String),

    /// S3 service error
    #[error("S3 service error: {0}")]
    S3Error(String),

    /// AWS SDK error
    #[error("AWS SDK error: {0}")]
    AwsError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Upstream service error (5xx from S3)
    #[error("Upstream service error: {0}")]
    UpstreamError(String),
}

impl BucketError {
    /// Remedial suggestions shown after the error message
    #[must_use]
    pub fn hints(&self) -> Vec<String> {
        match self {
            Self::MissingCredentials(_) => vec!["Run: aws configure".to_string()],
            Self::BucketNotFound(_) => vec![
                "Run: s3drop setup".to_string(),
                "Or run without --no-auto-create to create it automatically".to_string(),
            ],
            Self::BucketNameTaken(name) => vec![
                "Try a different name (must be globally unique)".to_string(),
                "Suggestion: add your company name or year".to_string(),
                format!("Example: {name}-mycompany or {name}-2024"),
            ],
            Self::PermissionDenied(_) => vec![
                "Check your AWS permissions for S3 bucket creation".to_string(),
                "Required permissions: s3:CreateBucket, s3:PutBucketPublicAccessBlock, s3:PutBucketVersioning"
                    .to_string(),
            ],
            Self::CreateFailed(_) => {
                vec!["Alternative: create the drop zone with: s3drop setup".to_string()]
            }
            Self::InvalidBucketName(_) => {
                vec!["Use 3-63 lowercase letters, numbers, hyphens and periods".to_string()]
            }
            Self::ObjectNotFound(_) => {
                vec!["Run: s3drop <bucket> list to see available files".to_string()]
            }
            Self::FileNotFound(_)
            | Self::UploadFailed(_)
            | Self::S3Error(_)
            | Self::AwsError(_)
            | Self::ConfigError(_)
            | Self::UpstreamError(_) => Vec::new(),
        }
    }
}

/// Returns the service error code (`NoSuchBucket`, `AccessDenied`, ...) if any
pub(crate) fn service_error_code<E, R>(error: &SdkError<E, R>) -> Option<&str>
where
    E: ProvideErrorMetadata,
{
    error.as_service_error().and_then(ProvideErrorMetadata::code)
}

/// Maps an SDK failure of `operation` onto the generic variants
pub(crate) fn from_sdk_error<E>(operation: &str, error: &SdkError<E, HttpResponse>) -> BucketError
where
    E: std::error::Error + 'static,
{
    let message = format!("{operation} failed: {}", DisplayErrorContext(error));
    match error {
        SdkError::ServiceError(service_err) if service_err.raw().status().as_u16() >= 500 => {
            BucketError::UpstreamError(message)
        }
        SdkError::ServiceError(_) => BucketError::S3Error(message),
        _ => BucketError::AwsError(message),
    }
}

impl From<SdkError<HeadObjectError>> for BucketError {
    fn from(error: SdkError<HeadObjectError>) -> Self {
        match error {
            SdkError::ServiceError(err) => Self::S3Error(format!("{:?}", err.err())),
            _ => Self::AwsError(error.to_string()),
        }
    }
}

impl From<SdkError<PutObjectError>> for BucketError {
    fn from(error: SdkError<PutObjectError>) -> Self {
        match error {
            SdkError::ServiceError(err) => {
                let message = err
                    .err()
                    .message()
                    .map_or_else(|| format!("{:?}", err.err()), ToString::to_string);
                Self::UploadFailed(message)
            }
            _ => Self::UploadFailed(error.to_string()),
        }
    }
}
