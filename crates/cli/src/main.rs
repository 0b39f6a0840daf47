//! Folha CLI - payroll administration from the terminal

mod commands;
mod config;
mod logging;
mod output;
mod state_dir;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use commands::{Commands, Context};
use folha_http::{ClientError, LogoutReason, SessionEvent};
use std::path::PathBuf;
use std::time::Duration;
use tokio::sync::broadcast;
use tracing::{Level, debug, error, warn};

use crate::config::Settings;
use crate::state_dir::StateDir;

#[derive(Parser)]
#[command(name = "folha")]
#[command(about = "Administration client for the Folha payroll system")]
#[command(version)]
struct Cli {
    /// Set logging level
    #[arg(short = 'l', long, global = true, default_value = "warn")]
    log_level: LogLevel,

    /// Configuration file (defaults to folha.toml in the config directory)
    #[arg(short = 'c', long, global = true, env = "FOLHA_CONFIG")]
    config: Option<PathBuf>,

    /// Directory for configuration, session and logs
    #[arg(short = 'd', long, global = true)]
    data_dir: Option<PathBuf>,

    /// Timeout for the whole command in seconds (0 = no timeout)
    #[arg(short = 't', long, global = true, default_value = "60")]
    timeout: u64,

    /// Disable file logging (only log to stderr)
    #[arg(long, global = true)]
    no_file_log: bool,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let state_dir = cli
        .data_dir
        .clone()
        .map_or_else(StateDir::new, StateDir::with_override);
    logging::init_logging(cli.log_level.into(), &state_dir.log_file(), cli.no_file_log)?;

    let settings = Settings::load(cli.config.as_deref(), &state_dir)?;
    debug!(base_url = %settings.api.base_url, "Starting Folha CLI");

    let ctx = Context {
        settings,
        state_dir,
        config_path: cli.config,
        json: cli.json,
    };
    let client = ctx.client()?;
    let mut events = client.session().subscribe();
    let local = cli.command.is_local();

    let run = cli.command.execute(&ctx, &client);
    let result = if cli.timeout == 0 {
        run.await
    } else {
        match tokio::time::timeout(Duration::from_secs(cli.timeout), run).await {
            Ok(result) => result,
            Err(_) => Err(anyhow::anyhow!(
                "Command timed out after {} seconds",
                cli.timeout
            )),
        }
    };

    if !local {
        report_session_events(&mut events);
    }

    if let Err(e) = result {
        error!("Command failed: {e:#}");
        if e.downcast_ref::<ClientError>()
            .is_some_and(ClientError::requires_login)
        {
            eprintln!("Run `folha login` to start a new session.");
        }
        std::process::exit(1);
    }

    Ok(())
}

/// Surface sessions that ended on their own while the command ran
fn report_session_events(events: &mut broadcast::Receiver<SessionEvent>) {
    while let Ok(event) = events.try_recv() {
        match event {
            SessionEvent::LoggedOut {
                reason: LogoutReason::RefreshExpired,
            } => warn!("Session expired and was cleared"),
            SessionEvent::LoggedOut {
                reason: LogoutReason::RefreshFailed(cause),
            } => warn!(%cause, "Session refresh failed and the session was cleared"),
            other => debug!(?other, "Session event"),
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
            LogLevel::Error => Level::ERROR,
            LogLevel::Warn => Level::WARN,
            LogLevel::Info => Level::INFO,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Trace => Level::TRACE,
        }
    }
}
