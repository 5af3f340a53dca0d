use link_shortener::{LinkShortener, ShortenResult, ShortenedLink, ShortenerService};
use tracing::warn;

use crate::bucket::{BucketClient, ShareLink};
use crate::cli::{LinkArgs, ShareArgs};
use crate::report;
use crate::types::AppError;
use crate::verify::{LinkCheck, LinkVerifier};

pub(super) async fn run(client: &BucketClient, args: &ShareArgs) -> Result<(), AppError> {
    deliver_share_link(client, &args.key, &args.link).await?;
    Ok(())
}

/// Signs a link for `key`, then verifies and shortens it as requested
///
/// Verification and shortening failures never fail the command, including
/// an HTTP client that cannot be built. The unverified, unshortened link is
/// still printed.
///
/// # Errors
///
/// Returns an error if the object is missing or the link cannot be signed
pub async fn deliver_share_link(
    client: &BucketClient,
    key: &str,
    options: &LinkArgs,
) -> Result<ShareLink, AppError> {
    let link = client.generate_share_link(key, options.expires).await?;
    println!("🔗 Generated secure share link for: {key}");
    println!("⏰ Link expires: {}", report::format_timestamp(link.expires_at));

    if options.verify {
        verify(&link.url).await;
    }

    let final_url = if options.short {
        shorten(&link.url, options.short_service).await
    } else {
        link.url.clone()
    };

    print!("{}", report::share_summary(&link, &final_url));
    Ok(link)
}

async fn verify(url: &str) {
    println!("🔍 Verifying share link...");
    match check_link(LinkVerifier::new(), url).await {
        LinkCheck::Verified {
            content_length: Some(size),
        } => println!("✅ Link verified! File size: {}", report::format_megabytes(size)),
        LinkCheck::Verified {
            content_length: None,
        } => println!("✅ Link verified!"),
        LinkCheck::Rejected { status } => {
            println!("❌ Link verification failed: HTTP {}", status.as_u16());
            println!("💡 Note: Link may still work for recipients");
        }
        LinkCheck::Unreachable { reason } => {
            println!("❌ Link verification failed: {reason}");
            println!("💡 Note: Link may still work for recipients");
        }
    }
}

/// Probes `url`, reporting a verifier that could not be built as unreachable
async fn check_link(verifier: Result<LinkVerifier, reqwest::Error>, url: &str) -> LinkCheck {
    match verifier {
        Ok(verifier) => verifier.check(url).await,
        Err(e) => {
            warn!("Could not build HTTP client for verification: {e}");
            LinkCheck::Unreachable {
                reason: format!("could not build HTTP client: {e}"),
            }
        }
    }
}

async fn shorten(url: &str, service: ShortenerService) -> String {
    println!("🔗 Shortening URL with {}...", service.label());
    let shortened = shorten_link(LinkShortener::new(), url, service).await;
    match &shortened.fallback {
        None => println!("✅ URL shortened successfully!"),
        Some(reason) => {
            println!("⚠️ URL shortening failed: {reason}");
            println!("💡 Using original URL");
        }
    }

    shortened.url
}

/// Shortens `url`, keeping it unchanged when the shortener could not be built
async fn shorten_link(
    shortener: ShortenResult<LinkShortener>,
    url: &str,
    service: ShortenerService,
) -> ShortenedLink {
    match shortener {
        Ok(shortener) => shortener.shorten(url, service).await,
        Err(e) => {
            warn!("Could not build HTTP client for shortening: {e}");
            ShortenedLink {
                url: url.to_string(),
                fallback: Some(e),
            }
        }
    }
}
