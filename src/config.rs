//! Runtime settings, read from the environment (and `.env`, via dotenvy, by
//! the time this runs).
//!
//! - `SLACKPOST_API_BASE`: Slack API base URL, defaults to [API_BASE].
//! - `SLACKPOST_CONFIG_DIR`: where credentials live, defaults to the
//!   platform config directory for `slackpost`.

use crate::slack::api::API_BASE;
use directories::ProjectDirs;
use std::{env, path::PathBuf};
use thiserror::Error;
use url::Url;

pub const API_BASE_VAR: &str = "SLACKPOST_API_BASE";
pub const CONFIG_DIR_VAR: &str = "SLACKPOST_CONFIG_DIR";

/// Application identity the credential directory is keyed by.
pub const APP_NAME: &str = "slackpost";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("$SLACKPOST_API_BASE is not a valid URL: {0}")]
    InvalidApiBase(#[from] url::ParseError),

    #[error("could not determine a config directory; set $SLACKPOST_CONFIG_DIR")]
    NoConfigDir,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Without a trailing slash, ready for `/method.name` to be appended.
    pub api_base: String,
    pub config_dir: PathBuf,
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|k| env::var(k).ok())
    }

    /// Build settings from an arbitrary variable source. Empty values count
    /// as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |k: &str| lookup(k).filter(|v| !v.trim().is_empty());

        let api_base = match var(API_BASE_VAR) {
            Some(raw) => {
                Url::parse(&raw)?;
                raw.trim_end_matches('/').to_owned()
            }
            None => API_BASE.to_owned(),
        };

        let config_dir = match var(CONFIG_DIR_VAR) {
            Some(dir) => PathBuf::from(dir),
            None => ProjectDirs::from("", "", APP_NAME)
                .map(|dirs| dirs.config_dir().to_path_buf())
                .ok_or(ConfigError::NoConfigDir)?,
        };

        Ok(Settings {
            api_base,
            config_dir,
        })
    }
}
