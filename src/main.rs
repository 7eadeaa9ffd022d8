//! Post messages to Slack from the command line.
//!
//! `slackpost login` stores an access token; `slackpost postMessage` uses it.
//! Every run prints exactly one line to stdout describing what happened.

use cli::Command;
use config::Settings;
use credentials::FileStore;
use dotenvy::dotenv;
use error::Failure;
use prompt::TerminalPrompt;
use slack::api::SlackClient;
use std::{env, process::ExitCode};
use tracing::{debug, Level};

mod cli;
mod commands;
mod config;
mod credentials;
mod de;
mod error;
mod prompt;
mod slack;

/// Application entrypoint. Parses arguments, initialises tracing, loads
/// settings, and runs the chosen command.
#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = match cli::parse(env::args_os()) {
        Ok(cli) => cli,
        // `--help` and `--version`.
        Err(e) if !e.use_stderr() => e.exit(),
        Err(e) => {
            println!("{}", cli::usage_error(&e));
            return ExitCode::FAILURE;
        }
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level(cli.verbose))
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    if dotenv().is_err() {
        debug!("No .env found");
    }

    match run(&cli.command).await {
        Ok(msg) => {
            println!("{}", msg);
            ExitCode::SUCCESS
        }
        Err(e) => {
            println!("{}", e);
            ExitCode::FAILURE
        }
    }
}

/// Wire up the production collaborators and dispatch `cmd`.
async fn run(cmd: &Command) -> Result<String, Failure> {
    let settings = Settings::from_env()?;
    debug!(?settings, "loaded settings");

    let store = FileStore::new(&settings.config_dir);
    debug!(path = %store.path().display(), "credential file");

    let deps = commands::Deps {
        slack_client: SlackClient::new(settings.api_base),
        store: &store,
        prompt: &TerminalPrompt,
    };

    commands::dispatch(cmd, &deps).await
}

/// Map the count of `-v` flags to the most verbose level logged.
fn log_level(verbosity: u8) -> Level {
    match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}
