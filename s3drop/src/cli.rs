//! Command line definitions using clap
//!
//! Commands:
//! - s3drop <bucket> drop <file> [--share] [--expires 24h] [--verify] [--short]
//! - s3drop <bucket> share <key> [--expires 24h] [--verify] [--short]
//! - s3drop <bucket> list
//! - s3drop setup

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use link_shortener::ShortenerService;

use crate::expiration::Expiration;

const EXAMPLES: &str = "\
Examples:
  s3drop my-drops drop video.mp4 --share
  s3drop my-drops drop video.mp4 --share --short
  s3drop my-drops share video.mp4 --expires 48h --short
  s3drop my-drops list
  s3drop setup";

/// S3Drop - Secure file sharing via AWS S3 presigned URLs
#[derive(Parser, Debug)]
#[command(name = "s3drop", version, about, long_about = None, after_help = EXAMPLES)]
pub struct Cli {
    /// Drop zone (S3 bucket) name
    pub bucket: Option<String>,

    /// AWS profile to use
    #[arg(long, global = true)]
    pub profile: Option<String>,

    /// Disable automatic drop zone creation
    #[arg(long, global = true)]
    pub no_auto_create: bool,

    /// Log SDK and HTTP activity to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Set up a new drop zone for dropping files
    Setup(SetupArgs),
    /// Drop a file into your drop zone
    Drop(DropArgs),
    /// Generate a share link for an existing file
    Share(ShareArgs),
    /// List files in your drop zone
    List,
}

/// Options shared by every command producing a share link
#[derive(Args, Debug, Clone)]
pub struct LinkArgs {
    /// Link expiration (e.g., 24h, 2d, 48h)
    #[arg(long, default_value_t = Expiration::default())]
    pub expires: Expiration,

    /// Verify the share link works
    #[arg(long)]
    pub verify: bool,

    /// Create a shortened URL for easier sharing
    #[arg(long)]
    pub short: bool,

    /// URL shortening service
    #[arg(long, value_enum, default_value_t = ShortenerService::TinyUrl)]
    pub short_service: ShortenerService,
}

#[derive(Args, Debug, Clone)]
pub struct DropArgs {
    /// Local file path to drop
    pub file: PathBuf,

    /// Custom object key (defaults to the file name)
    #[arg(long)]
    pub key: Option<String>,

    /// Generate a share link after dropping
    #[arg(long)]
    pub share: bool,

    #[command(flatten)]
    pub link: LinkArgs,
}

#[derive(Args, Debug, Clone)]
pub struct ShareArgs {
    /// Object key to share
    pub key: String,

    #[command(flatten)]
    pub link: LinkArgs,
}

#[derive(Args, Debug, Clone, Default)]
pub struct SetupArgs {
    /// Drop zone name (prompted when omitted)
    #[arg(long)]
    pub name: Option<String>,

    /// AWS region (prompted when omitted)
    #[arg(long)]
    pub region: Option<String>,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).expect("arguments should parse")
    }

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_drop_with_share_options() {
        let cli = parse(&[
            "s3drop",
            "my-drops",
            "drop",
            "video.mp4",
            "--share",
            "--short",
            "--expires",
            "2d",
        ]);

        assert_eq!(cli.bucket.as_deref(), Some("my-drops"));
        let Some(Command::Drop(args)) = cli.command else {
            panic!("expected drop command");
        };
        assert_eq!(args.file, PathBuf::from("video.mp4"));
        assert!(args.share);
        assert!(args.key.is_none());
        assert!(args.link.short);
        assert!(!args.link.verify);
        assert_eq!(args.link.expires.hours(), 48);
        assert_eq!(args.link.short_service, ShortenerService::TinyUrl);
    }

    #[test]
    fn test_share_defaults() {
        let cli = parse(&["s3drop", "my-drops", "share", "report.pdf"]);

        let Some(Command::Share(args)) = cli.command else {
            panic!("expected share command");
        };
        assert_eq!(args.key, "report.pdf");
        assert_eq!(args.link.expires, Expiration::default());
        assert!(!args.link.short);
    }

    #[test]
    fn test_short_service_names() {
        let cli = parse(&[
            "s3drop",
            "my-drops",
            "share",
            "report.pdf",
            "--short",
            "--short-service",
            "1ptco",
        ]);

        let Some(Command::Share(args)) = cli.command else {
            panic!("expected share command");
        };
        assert_eq!(args.link.short_service, ShortenerService::OnePtCo);

        assert!(Cli::try_parse_from([
            "s3drop",
            "my-drops",
            "share",
            "report.pdf",
            "--short-service",
            "bitly",
        ])
        .is_err());
    }

    #[test]
    fn test_setup_needs_no_bucket() {
        let cli = parse(&["s3drop", "setup"]);
        assert!(cli.bucket.is_none());
        assert!(matches!(cli.command, Some(Command::Setup(_))));

        let cli = parse(&["s3drop", "setup", "--name", "my-drops", "--region", "eu-west-1"]);
        let Some(Command::Setup(args)) = cli.command else {
            panic!("expected setup command");
        };
        assert_eq!(args.name.as_deref(), Some("my-drops"));
        assert_eq!(args.region.as_deref(), Some("eu-west-1"));
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = parse(&["s3drop", "my-drops", "list", "--no-auto-create", "--profile", "work"]);
        assert!(cli.no_auto_create);
        assert_eq!(cli.profile.as_deref(), Some("work"));
        assert!(matches!(cli.command, Some(Command::List)));
    }

    #[test]
    fn test_no_command() {
        let cli = parse(&["s3drop"]);
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_invalid_expiration_is_rejected() {
        assert!(Cli::try_parse_from(["s3drop", "b", "share", "k", "--expires", "2w"]).is_err());
        assert!(Cli::try_parse_from(["s3drop", "b", "share", "k", "--expires", "30d"]).is_err());
    }
}
