//! Command sequencing for the CLI

mod drop;
mod list;
mod setup;
mod share;

use clap::CommandFactory;

use crate::bucket::BucketClient;
use crate::cli::{Cli, Command};
use crate::report;
use crate::types::{AppError, Environment};

pub use share::deliver_share_link;

/// Runs the parsed command line against `environment`
///
/// # Errors
///
/// Returns the first failure of the selected command
pub async fn run(cli: Cli, environment: &Environment) -> Result<(), AppError> {
    let Some(command) = cli.command else {
        println!("{}", report::BANNER);
        Cli::command().print_help()?;
        return Ok(());
    };

    let profile = cli.profile.as_deref();
    let auto_create = !cli.no_auto_create;

    match command {
        Command::Setup(args) => setup::run(&args, profile, environment).await,
        Command::Drop(args) => {
            let client = connect(cli.bucket.as_deref(), profile, auto_create, environment).await?;
            drop::run(&client, &args).await
        }
        Command::Share(args) => {
            let client = connect(cli.bucket.as_deref(), profile, auto_create, environment).await?;
            share::run(&client, &args).await
        }
        Command::List => {
            let client = connect(cli.bucket.as_deref(), profile, auto_create, environment).await?;
            list::run(&client).await
        }
    }
}

async fn connect(
    bucket: Option<&str>,
    profile: Option<&str>,
    auto_create: bool,
    environment: &Environment,
) -> Result<BucketClient, AppError> {
    let bucket = bucket.ok_or(AppError::MissingBucket)?;

    let sdk_config = environment.aws_config(profile).await;
    let client = BucketClient::connect(&sdk_config, environment, bucket, auto_create).await?;

    if client.was_created() {
        println!("🪣 Drop zone '{bucket}' was not found, so it was created");
        println!("🔐 Your drop zone is private and secure (public access blocked, versioning on)");
    }
    println!("🌍 Connected to bucket in region: {}", client.region());

    Ok(client)
}
