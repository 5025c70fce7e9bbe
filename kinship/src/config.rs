//! Client configuration.
//!
//! Layered from defaults, an optional `kinship.toml`, then environment variables.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::errors::ClientError;

pub const DEFAULT_API_URL: &str = "http://localhost:5000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const CONFIG_FILE_NAME: &str = "kinship.toml";

pub const ENV_API_URL: &str = "API_URL";
pub const ENV_TIMEOUT: &str = "KINSHIP_TIMEOUT_SECS";
pub const ENV_SESSION: &str = "KINSHIP_SESSION";

/// Resolved configuration used to build a client.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub api_url: Url,
    pub timeout: Duration,
    pub session_path: PathBuf,
}

/// On-disk shape of `kinship.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub api: ApiSettings,
    #[serde(default)]
    pub session: SessionSettings,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiSettings {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionSettings {
    #[serde(default)]
    pub path: Option<String>,
}

impl ClientConfig {
    /// Loads from `file` (when given and present) and the process environment.
    pub fn load(file: Option<&Path>) -> Result<Self, ClientError> {
        Self::from_sources(file, |key| std::env::var(key).ok())
    }

    /// Same as [`ClientConfig::load`] with an injectable environment lookup.
    pub fn from_sources<F>(file: Option<&Path>, env: F) -> Result<Self, ClientError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let parsed = match file {
            Some(path) if path.exists() => {
                let content = std::fs::read_to_string(path)
                    .map_err(|err| ClientError::Config(format!("failed to read {}: {err}", path.display())))?;
                toml::from_str::<ConfigFile>(&content)
                    .map_err(|err| ClientError::Config(format!("failed to parse {}: {err}", path.display())))?
            }
            _ => ConfigFile::default(),
        };

        let raw_url = match env(ENV_API_URL) {
            Some(url) => url,
            None => match parsed.api.url {
                Some(url) => expand_env(&url, &env)?,
                None => DEFAULT_API_URL.to_string(),
            },
        };
        let api_url = Url::parse(raw_url.trim())
            .map_err(|err| ClientError::Config(format!("invalid API url '{raw_url}': {err}")))?;

        let timeout_secs = match env(ENV_TIMEOUT) {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .map_err(|_| ClientError::Config(format!("{ENV_TIMEOUT} must be a whole number of seconds")))?,
            None => parsed.api.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS),
        };

        let session_path = match env(ENV_SESSION) {
            Some(path) => PathBuf::from(path),
            None => match parsed.session.path {
                Some(path) => PathBuf::from(expand_env(&path, &env)?),
                None => default_session_path(&env),
            },
        };

        Ok(Self {
            api_url,
            timeout: Duration::from_secs(timeout_secs.max(1)),
            session_path,
        })
    }
}

fn default_session_path<F>(env: &F) -> PathBuf
where
    F: Fn(&str) -> Option<String>,
{
    env("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".kinship")
        .join("session.json")
}

/// Expands a whole-value `${VAR}` reference.
fn expand_env<F>(value: &str, env: &F) -> Result<String, ClientError>
where
    F: Fn(&str) -> Option<String>,
{
    match value.strip_prefix("${").and_then(|rest| rest.strip_suffix('}')) {
        Some(var_name) => env(var_name)
            .ok_or_else(|| ClientError::Config(format!("environment variable {var_name} not set"))),
        None => Ok(value.to_string()),
    }
}
