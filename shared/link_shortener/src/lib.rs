//! URL shortening through public shortening services
//!
//! Shortening is best effort: [`LinkShortener::shorten`] never fails and hands
//! back the original URL when the selected service cannot produce a short one.

#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    dead_code
)]

mod error;
mod service;
mod shortener;

pub use error::{ShortenError, ShortenResult};
pub use service::ShortenerService;
pub use shortener::{LinkShortener, ShortenedLink};
