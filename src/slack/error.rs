use thiserror::Error;

/// Every way a call to Slack can fail once it's been attempted.
#[derive(Error, Debug)]
pub enum SlackError {
    /// Transport failures and bodies we couldn't make sense of.
    #[error("Slack API request failed: {0}")]
    APIRequestFailed(#[from] reqwest::Error),

    /// Slack answered `{"ok": false}`; holds its error code verbatim.
    #[error("Slack API returned error: {0}")]
    APIResponseError(String),
}
