//! Errors surfaced at the command boundary

use thiserror::Error;

use crate::bucket::BucketError;

/// Application error returned by the commands
#[derive(Error, Debug)]
pub enum AppError {
    /// Bucket operation failed
    #[error(transparent)]
    Bucket(#[from] BucketError),

    /// drop, share and list need a bucket argument
    #[error("Bucket name is required")]
    MissingBucket,

    /// Reading interactive input or writing output failed
    #[error("Failed to read input: {0}")]
    Input(#[from] std::io::Error),
}

impl AppError {
    /// Remedial suggestions shown after the error message
    #[must_use]
    pub fn hints(&self) -> Vec<String> {
        match self {
            Self::Bucket(err) => err.hints(),
            Self::MissingBucket => vec!["Usage: s3drop <bucket-name> <command>".to_string()],
            Self::Input(_) => Vec::new(),
        }
    }

    /// Records the error at a level matching its cause
    pub fn log(&self) {
        match self {
            Self::Bucket(
                BucketError::S3Error(msg)
                | BucketError::AwsError(msg)
                | BucketError::UpstreamError(msg)
                | BucketError::ConfigError(msg),
            ) => tracing::error!("S3/AWS error: {msg}"),
            _ => tracing::debug!("Command failed: {self}"),
        }
    }
}
