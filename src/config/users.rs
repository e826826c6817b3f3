//! User configuration loading from config.toml
//!
//! Session tokens and the identities they resolve to are listed under `[[users]]`.
//! Issuing tokens and checking passwords belong to the credential service; this file is only
//! the lookup table the static authenticator is built from.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Known users and their session tokens
    #[serde(default)]
    pub users: Vec<UserConfig>,
}

/// Configuration for a single user
#[derive(Debug, Deserialize, Clone)]
pub struct UserConfig {
    /// Stable user identifier that owns pantry items
    pub user_id: String,
    /// Contact email
    pub email: String,
    /// Session token presented by the user's client
    pub session_token: String,
}

/// Loads user configuration from a TOML file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
/// - Required fields are missing
/// - A user entry has a blank `user_id` or `session_token`
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read config file: {e}"),
    })?;

    parse_config(&contents)
}

/// Parses user configuration from TOML text.
pub fn parse_config(contents: &str) -> Result<Config> {
    let config: Config = toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })?;

    if let Some(user) = config
        .users
        .iter()
        .find(|u| u.user_id.trim().is_empty() || u.session_token.trim().is_empty())
    {
        return Err(Error::Config {
            message: format!(
                "User entry '{}' needs a non-empty user_id and session_token",
                user.email
            ),
        });
    }

    Ok(config)
}

/// Loads user configuration from `PANTRY_CONFIG`, or ./config.toml when unset.
pub fn load_default_config() -> Result<Config> {
    let path = std::env::var("PANTRY_CONFIG").unwrap_or_else(|_| "config.toml".to_string());
    load_config(path)
}
