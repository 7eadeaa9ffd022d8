//! Channel names as accepted on the command line.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::{fmt, str::FromStr};

/// Where messages go when no `--channel` is given.
pub const DEFAULT_CHANNEL: &str = "general";

/// Anything Slack could plausibly route: a single word of at most 80
/// characters. Whether it exists is for Slack to say.
static DESTINATION: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\S{1,80}$").unwrap());

/// A channel name, channel ID or user ID as visible in the Slack UI, stored
/// without the leading hash. `chat.postMessage` accepts any of them.
///
/// ```
/// let with: ChannelName = "#playground".parse().unwrap();
/// let without: ChannelName = "playground".parse().unwrap();
/// assert_eq!(with, without);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ChannelName(String);

impl FromStr for ChannelName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Channel names can't contain hashes, so by doing this we can support
        // users supplying (or not) a leading hash.
        let normalised = s.trim_start_matches('#');

        if DESTINATION.is_match(normalised) {
            Ok(ChannelName(normalised.into()))
        } else {
            Err(format!("invalid channel name: {:?}", s))
        }
    }
}

/// Format without the surrounding newtype wrapper.
impl fmt::Display for ChannelName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
