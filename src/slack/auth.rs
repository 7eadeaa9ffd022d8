//! Helpers around Slack's use of OAuth Bearer Authentication.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A newtype wrapper around Slack access tokens.
#[derive(PartialEq, Eq, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SlackAccessToken(pub String);

/// Tokens are secrets; keep them out of logs and panics.
impl fmt::Debug for SlackAccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SlackAccessToken(<redacted>)")
    }
}

/// Convert a Slack access token to a `Bearer` `Authorization` header value.
pub fn to_auth_header_val(t: &SlackAccessToken) -> String {
    format!("Bearer {}", t.0)
}
