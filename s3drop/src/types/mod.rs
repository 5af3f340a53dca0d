//! Shared application types

/// Environment configuration
pub mod environment;

/// Command boundary errors
pub mod error;

pub use environment::{Environment, LogFormat};
pub use error::AppError;
