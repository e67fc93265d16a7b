//! Videoflix CLI - command line client for the Videoflix API

mod commands;
mod config;
mod logging;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use commands::Commands;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{Level, error, info};
use videoflix_http::ClientContext;

#[derive(Parser)]
#[command(name = "videoflix")]
#[command(about = "Command line client for the Videoflix streaming API")]
#[command(version)]
struct Cli {
    /// Set logging level
    #[arg(short = 'l', long, global = true, default_value = "warn")]
    log_level: LogLevel,

    /// Data directory for configuration and logs
    #[arg(short = 'd', long, global = true)]
    data_dir: Option<PathBuf>,

    /// Configuration file (TOML)
    #[arg(short = 'c', long, global = true)]
    config: Option<PathBuf>,

    /// API base URL, overrides the configuration
    #[arg(long, global = true, env = "VIDEOFLIX_BASE_URL")]
    base_url: Option<String>,

    /// Timeout for the whole command in seconds (0 = no timeout)
    #[arg(short = 't', long, global = true, default_value = "30")]
    timeout: u64,

    /// Disable file logging (only log to stderr)
    #[arg(long, global = true)]
    no_file_log: bool,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let data_dir = config::data_dir(cli.data_dir);
    logging::init_logging(cli.log_level.into(), &data_dir, cli.no_file_log)?;

    let client_config = config::load_client_config(cli.config.as_deref(), &data_dir, cli.base_url)?;
    info!(base_url = %client_config.api.base_url, "Starting Videoflix CLI");
    let ctx = ClientContext::new(client_config)?;

    let outcome = if cli.timeout == 0 {
        Some(cli.command.execute(ctx).await)
    } else {
        let timeout_duration = Duration::from_secs(cli.timeout);
        tokio::time::timeout(timeout_duration, cli.command.execute(ctx))
            .await
            .ok()
    };

    match outcome {
        Some(Ok(())) => {
            info!("Command completed successfully");
            Ok(())
        }
        Some(Err(e)) => {
            error!("Command failed: {e}");
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
        None => {
            error!("Command timed out after {} seconds", cli.timeout);
            std::process::exit(1);
        }
    }
}

#[derive(Clone, Debug, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for Level {
    fn from(log_level: LogLevel) -> Self {
        match log_level {
            LogLevel::Error => Self::ERROR,
            LogLevel::Warn => Self::WARN,
            LogLevel::Info => Self::INFO,
            LogLevel::Debug => Self::DEBUG,
            LogLevel::Trace => Self::TRACE,
        }
    }
}
