//! Reachability check for share links

use std::time::Duration;

use reqwest::{header::CONTENT_LENGTH, Client, StatusCode};
use tracing::{debug, warn};

/// Timeout for the verification request
const VERIFY_TIMEOUT_SECS: u64 = 10;

/// Result of probing a share link
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkCheck {
    /// The link answered 200
    Verified {
        /// Object size reported by the response, if any
        content_length: Option<u64>,
    },
    /// The link answered with another status
    Rejected {
        /// Status returned
        status: StatusCode,
    },
    /// The request did not complete
    Unreachable {
        /// Transport error description
        reason: String,
    },
}

impl LinkCheck {
    /// Whether the link was confirmed to work
    #[must_use]
    pub const fn is_verified(&self) -> bool {
        matches!(self, Self::Verified { .. })
    }
}

/// Issues HEAD requests against share links
#[derive(Debug, Clone)]
pub struct LinkVerifier {
    client: Client,
}

impl LinkVerifier {
    /// Creates a verifier with a 10 second timeout
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built
    pub fn new() -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(Duration::from_secs(VERIFY_TIMEOUT_SECS))
            .user_agent(format!("s3drop/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client })
    }

    /// Probes `url` with a HEAD request, following redirects
    ///
    /// Failures are reported in the returned [`LinkCheck`], never as errors.
    pub async fn check(&self, url: &str) -> LinkCheck {
        debug!("Verifying share link");

        match self.client.head(url).send().await {
            Ok(response) if response.status() == StatusCode::OK => {
                let content_length = response
                    .headers()
                    .get(CONTENT_LENGTH)
                    .and_then(|value| value.to_str().ok())
                    .and_then(|value| value.parse().ok());
                LinkCheck::Verified { content_length }
            }
            Ok(response) => {
                warn!("Share link verification returned HTTP {}", response.status());
                LinkCheck::Rejected {
                    status: response.status(),
                }
            }
            Err(e) => {
                warn!("Share link verification failed: {e}");
                LinkCheck::Unreachable {
                    reason: e.to_string(),
                }
            }
        }
    }
}
