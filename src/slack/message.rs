//! Send plain-text messages to any given Slack channel.

use super::{api::*, auth::SlackAccessToken, channel::ChannelName, error::SlackError};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// <https://api.slack.com/methods/chat.postMessage#args>
#[derive(Serialize)]
pub struct MessageRequest<'a> {
    pub channel: &'a ChannelName,
    pub text: &'a str,
}

/// <https://api.slack.com/methods/chat.postMessage#examples>
#[derive(Deserialize)]
pub struct MessageResponse {
    #[allow(dead_code)]
    #[serde(deserialize_with = "crate::de::only_true")]
    ok: bool,
    /// Slack's identifier for the posted message.
    pub ts: Option<String>,
}

impl SlackClient {
    /// Post a message in a channel. A single attempt; Slack's error code is
    /// handed back untouched on failure.
    pub async fn post_message(
        &self,
        msg: &MessageRequest<'_>,
        token: &SlackAccessToken,
    ) -> Result<MessageResponse, SlackError> {
        let res: APIResult<MessageResponse> = self
            .post("/chat.postMessage", token)
            .json(msg)
            .send()
            .await?
            .json()
            .await?;

        match res {
            APIResult::Ok(res) => {
                debug!(ts = ?res.ts, "message accepted");
                Ok(res)
            }
            APIResult::Err(res) => Err(SlackError::APIResponseError(res.error)),
        }
    }
}
