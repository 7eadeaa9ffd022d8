//! Command-line surface: the registry of commands and the parsing of raw
//! arguments into one of them.

use crate::{error::Failure, slack::channel::{ChannelName, DEFAULT_CHANNEL}};
use clap::{
    error::{ContextKind, ContextValue, ErrorKind},
    ArgAction, CommandFactory, Parser, Subcommand,
};
use std::ffi::OsString;

/// Post messages to Slack from the command line
#[derive(Parser, Debug)]
#[command(name = "slackpost", version, about, long_about = None)]
#[command(disable_help_subcommand = true)]
pub struct Cli {
    /// Log more to stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Every command the tool knows, with the options each accepts.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Store a Slack access token for later commands
    Login,

    /// Post a message to a channel
    #[command(name = "postMessage")]
    PostMessage {
        /// Text of the message. Put `--` before text that starts with `-`
        #[arg(allow_negative_numbers = true)]
        message: String,

        /// Channel name or ID, with or without a leading `#`
        #[arg(short, long, default_value = DEFAULT_CHANNEL)]
        channel: ChannelName,
    },
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::Login => "login",
            Command::PostMessage { .. } => "postMessage",
        }
    }
}

/// Parse a full argument list, program name first.
///
/// Errors include `--help` and `--version`, which clap reports as errors that
/// don't [use stderr](clap::Error::use_stderr).
pub fn parse<I, T>(args: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    Cli::try_parse_from(args)
}

/// Names of all registered commands, in declaration order.
pub fn known_commands() -> Vec<String> {
    Cli::command()
        .get_subcommands()
        .map(|c| c.get_name().to_owned())
        .collect()
}

/// Turn a parse error into a user-facing [Failure::Usage].
pub fn usage_error(e: &clap::Error) -> Failure {
    let available = format!("Available commands: {}", known_commands().join(", "));
    let usage = Cli::command().render_usage();

    let text = match e.kind() {
        ErrorKind::InvalidSubcommand => {
            let name = match e.get(ContextKind::InvalidSubcommand) {
                Some(ContextValue::String(s)) => s.as_str(),
                _ => "",
            };
            format!("Unknown command '{}'. {}\n\n{}", name, available, usage)
        }
        ErrorKind::MissingSubcommand | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
            format!("No command given. {}\n\n{}", available, usage)
        }
        _ => e.render().to_string().trim_end().to_owned(),
    };

    Failure::Usage(text)
}
