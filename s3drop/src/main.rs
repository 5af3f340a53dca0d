use std::process::ExitCode;

use clap::Parser;
use s3drop::{
    cli::Cli,
    commands,
    types::{Environment, LogFormat},
};
use tracing_subscriber::{fmt, EnvFilter};

/// Directives applied with `--verbose`, overriding `RUST_LOG`
const VERBOSE_DIRECTIVES: &str = "warn,s3drop=debug,link_shortener=debug";

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // Help and version requests are not failures
            let code = if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
            e.print().ok();
            return code;
        }
    };

    if let Err(e) = init_tracing(cli.verbose) {
        eprintln!("⚠️ {e:#}");
    }

    let environment = Environment::from_env();
    tracing::debug!("Running with {environment:?}");

    tokio::select! {
        result = commands::run(cli, &environment) => match result {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                e.log();
                eprintln!("❌ {e}");
                for hint in e.hints() {
                    eprintln!("💡 {hint}");
                }
                ExitCode::FAILURE
            }
        },
        _ = tokio::signal::ctrl_c() => {
            println!("\n👋 Operation cancelled by user");
            ExitCode::SUCCESS
        }
    }
}

/// Installs the stderr subscriber, JSON when `S3DROP_LOG_FORMAT=json`
fn init_tracing(verbose: bool) -> anyhow::Result<()> {
    let filter = if verbose {
        EnvFilter::new(VERBOSE_DIRECTIVES)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    let builder = fmt().with_env_filter(filter).with_writer(std::io::stderr);
    let installed = match LogFormat::from_env() {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Plain => builder.try_init(),
    };

    installed.map_err(|e| anyhow::anyhow!("failed to install tracing subscriber: {e}"))
}
