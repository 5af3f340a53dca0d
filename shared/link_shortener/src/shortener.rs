//! HTTP client for the shortening services

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::{ShortenError, ShortenResult, ShortenerService};

/// Timeout applied to every shortening request
const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Response body returned by the 1pt.co create endpoint
#[derive(Debug, Deserialize)]
struct OnePtResponse {
    status: Option<String>,
    short: Option<String>,
    msg: Option<String>,
}

/// Outcome of a best-effort shortening attempt
#[derive(Debug)]
pub struct ShortenedLink {
    /// The short link, or the original URL when shortening failed
    pub url: String,
    /// Why the original URL was kept, if it was
    pub fallback: Option<ShortenError>,
}

impl ShortenedLink {
    /// Whether `url` is a short link produced by the service
    #[must_use]
    pub const fn is_shortened(&self) -> bool {
        self.fallback.is_none()
    }
}

/// Client for the public URL shortening services
#[derive(Debug, Clone)]
pub struct LinkShortener {
    client: Client,
    base_url_override: Option<String>,
}

impl LinkShortener {
    /// Creates a shortener talking to the public service endpoints
    ///
    /// # Errors
    ///
    /// Returns `ShortenError::Http` if the HTTP client cannot be built
    pub fn new() -> ShortenResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .user_agent(format!("s3drop/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url_override: None,
        })
    }

    /// Sends every service's requests to `base_url` instead of its public host
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url_override = Some(base_url.into());
        self
    }

    fn base_url(&self, service: ShortenerService) -> &str {
        self.base_url_override
            .as_deref()
            .unwrap_or(service.base_url())
            .trim_end_matches('/')
    }

    fn endpoint(&self, service: ShortenerService) -> String {
        format!("{}{}", self.base_url(service), service.create_path())
    }

    /// Shortens `long_url`, keeping the original on any failure
    pub async fn shorten(&self, long_url: &str, service: ShortenerService) -> ShortenedLink {
        match self.try_shorten(long_url, service).await {
            Ok(url) => ShortenedLink {
                url,
                fallback: None,
            },
            Err(e) => {
                warn!("Shortening with {service} failed, keeping original URL: {e}");
                ShortenedLink {
                    url: long_url.to_string(),
                    fallback: Some(e),
                }
            }
        }
    }

    /// Shortens `long_url` with the given service
    ///
    /// # Errors
    ///
    /// Returns `ShortenError::Http` for transport failures and non-success statuses
    /// Returns `ShortenError::Rejected` if the service did not return a short link
    pub async fn try_shorten(
        &self,
        long_url: &str,
        service: ShortenerService,
    ) -> ShortenResult<String> {
        debug!("Shortening URL with {service}");

        let short_url = match service {
            ShortenerService::TinyUrl => {
                self.shorten_with_text_api(service, &[("url", long_url)])
                    .await?
            }
            ShortenerService::IsGd | ShortenerService::VGd => {
                self.shorten_with_text_api(service, &[("format", "simple"), ("url", long_url)])
                    .await?
            }
            ShortenerService::OnePtCo => self.shorten_with_one_pt(long_url).await?,
        };

        debug!("Shortened URL with {service}: {short_url}");
        Ok(short_url)
    }

    /// Services answering a GET with the short link as plain text
    async fn shorten_with_text_api(
        &self,
        service: ShortenerService,
        query: &[(&str, &str)],
    ) -> ShortenResult<String> {
        let body = self
            .client
            .get(self.endpoint(service))
            .query(query)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        let short_url = body.trim();
        if short_url.starts_with("http") {
            Ok(short_url.to_string())
        } else {
            Err(ShortenError::Rejected {
                service,
                message: short_url.to_string(),
            })
        }
    }

    async fn shorten_with_one_pt(&self, long_url: &str) -> ShortenResult<String> {
        let service = ShortenerService::OnePtCo;
        let response: OnePtResponse = self
            .client
            .post(self.endpoint(service))
            .form(&[("long", long_url)])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        match (response.status.as_deref(), response.short.as_deref()) {
            (Some("success"), Some(short)) if !short.trim().is_empty() => {
                let short = short.trim();
                if short.starts_with("http") {
                    Ok(short.to_string())
                } else {
                    // The service answers with a bare code
                    Ok(format!(
                        "{}/{}",
                        self.base_url(service),
                        short.trim_start_matches('/')
                    ))
                }
            }
            _ => Err(ShortenError::Rejected {
                service,
                message: response.msg.unwrap_or_else(|| "Unknown error".to_string()),
            }),
        }
    }
}
