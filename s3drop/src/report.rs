//! User-facing output formatting

use std::fmt::Write as _;

use chrono::{DateTime, Local, Utc};

use crate::bucket::{ObjectSummary, ShareLink};

/// Banner shown when no command is given
pub const BANNER: &str = r"
  ____ _____ ____
 / ___|___ /|  _ \ _ __ ___  _ __
 \___ \ |_ \| | | | '__/ _ \| '_ \
  ___) |__) | |_| | | | (_) | |_) |
 |____/____/|____/|_|  \___/| .__/
                            |_|
 Secure file sharing, simplified.
";

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Renders a byte count as megabytes with two decimals
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn format_megabytes(bytes: u64) -> String {
    format!("{:.2} MB", bytes as f64 / BYTES_PER_MB)
}

/// Local wall-clock rendering of a UTC instant
#[must_use]
pub fn format_timestamp(instant: DateTime<Utc>) -> String {
    instant
        .with_timezone(&Local)
        .format("%Y-%m-%d %H:%M:%S")
        .to_string()
}

/// Closing block printed once a share link is ready
///
/// `final_url` is the link handed to recipients, shortened or not.
#[must_use]
pub fn share_summary(link: &ShareLink, final_url: &str) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "\n🔗 Secure Share Link:");
    let _ = writeln!(out, "{final_url}");

    if final_url != link.url {
        let original = link.url.len();
        let shortened = final_url.len();
        let _ = writeln!(out, "\n📏 Original URL length: {original} characters");
        let _ = writeln!(out, "📏 Shortened URL length: {shortened} characters");
        let _ = writeln!(
            out,
            "💾 Saved: {} characters",
            original.saturating_sub(shortened)
        );
    }

    let _ = writeln!(out, "\n📧 Share this link with your recipients!");
    let _ = writeln!(
        out,
        "⏰ Expires: {}",
        link.expires_at
            .with_timezone(&Local)
            .format("%Y-%m-%d at %H:%M")
    );

    out
}

/// Listing of the drop zone contents
#[must_use]
pub fn file_listing(bucket: &str, objects: &[ObjectSummary]) -> String {
    if objects.is_empty() {
        return "📁 Drop zone is empty\n".to_string();
    }

    let mut out = String::new();
    let _ = writeln!(out, "📁 Files in your drop zone (s3://{bucket}):");
    let _ = writeln!(out, "{}", "-".repeat(60));

    for object in objects {
        let modified = object.last_modified.map_or_else(
            || "unknown".to_string(),
            |time| time.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string(),
        );
        let _ = writeln!(out, "📄 {}", object.key);
        let _ = writeln!(
            out,
            "   Size: {} | Modified: {modified}",
            format_megabytes(object.size)
        );
    }

    out
}

/// Commands suggested after a successful setup
#[must_use]
pub fn quick_start(bucket: &str) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "🚀 Quick Start Commands:");
    let _ = writeln!(out, "   s3drop {bucket} drop myfile.pdf --share");
    let _ = writeln!(out, "   s3drop {bucket} share existing-file.pdf");
    let _ = writeln!(out, "   s3drop {bucket} list");
    let _ = writeln!(out);
    let _ = writeln!(out, "💡 Tips:");
    let _ = writeln!(out, "   - Use --expires 48h for longer access (up to 7d)");
    let _ = writeln!(out, "   - Use --verify to test links before sharing");
    let _ = writeln!(out, "   - Use --short for links that fit in a chat message");
    let _ = writeln!(out, "   - Only people with share links can download files");

    out
}
