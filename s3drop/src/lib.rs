//! S3Drop: drop files into an S3 bucket and share them with expiring links

/// S3 bucket operations
pub mod bucket;

/// Command line definitions
pub mod cli;

/// Command sequencing
pub mod commands;

/// Share link expiration parsing
pub mod expiration;

/// User-facing output
pub mod report;

/// Shared application types
pub mod types;

/// Share link verification
pub mod verify;
