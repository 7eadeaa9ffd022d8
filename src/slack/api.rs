//! Type definitions and helpers for the Slack API.

use super::auth::*;
use serde::Deserialize;
use tracing::debug;

/// The base URL of the Slack API.
pub const API_BASE: &str = "https://slack.com/api";

/// A client bound to one API base, so tests can point it at a mock server.
pub struct SlackClient {
    base: String,
    // Holds a connection pool internally, as per [reqwest::Client].
    http: reqwest::Client,
}

impl SlackClient {
    pub fn new(base: String) -> Self {
        Self {
            base,
            http: reqwest::Client::new(),
        }
    }

    /// Create a POST request to any Slack API endpoint, handling authentication.
    pub fn post<T: ToString>(&self, path: T, token: &SlackAccessToken) -> reqwest::RequestBuilder {
        let url = self.base.to_owned() + &path.to_string();
        debug!(%url, "POST");

        self.http
            .post(url)
            .header(reqwest::header::AUTHORIZATION, to_auth_header_val(token))
    }
}

/// Slack's API returns a common "untagged" response, representing whether a
/// request was successful.
///
/// ```json
/// {
///     "ok": true,
///     "channel": "C123ABC456"
/// }
/// ```
///
/// ```json
/// {
///     "ok": false,
///     "error": "invalid_auth"
/// }
/// ```
#[derive(Deserialize)]
#[serde(untagged)]
pub enum APIResult<T> {
    Ok(T),
    Err(ErrorResponse),
}

/// The universal response in case of an unsuccessful request.
// The `ok` field is checked here, and should be checked on responses too,
// so that an otherwise empty successful response can't match both variants.
#[derive(Deserialize)]
pub struct ErrorResponse {
    #[allow(dead_code)]
    #[serde(deserialize_with = "crate::de::only_false")]
    ok: bool,
    pub error: String,
}
