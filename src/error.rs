use crate::{
    config::ConfigError, credentials::CredentialError, prompt::PromptError, slack::error::SlackError,
};
use thiserror::Error;

/// Sum type representing every possible unexceptional fail state. Each is
/// reported to the user as a single line.
#[derive(Error, Debug)]
pub enum Failure {
    /// Bad or missing arguments. Carries the full text to show, usage
    /// included.
    #[error("{0}")]
    Usage(String),

    #[error("You must be logged in. Run `slackpost login` first.")]
    NotLoggedIn,

    #[error(transparent)]
    Slack(#[from] SlackError),

    #[error(transparent)]
    Credentials(#[from] CredentialError),

    #[error("could not read input: {0}")]
    Prompt(#[from] PromptError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
