//! Settings and credential resolution for merakisync.
//!
//! Layered loading: built-in defaults, then an optional TOML file, then
//! `MERAKISYNC_*` environment variables. The bearer token
//! (`MERAKISYNC_API_KEY`) is held as a [`SecretString`] for the lifetime of
//! a reconciliation session and is never serialized back out.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use merakisync_api::{MerakiClient, TransportConfig};

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no API token configured (set MERAKISYNC_API_KEY or api_key in the config file)")]
    NoCredentials,

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Api(#[from] merakisync_api::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── Settings ────────────────────────────────────────────────────────

/// Connector settings resolved from defaults, file, and environment.
#[derive(Debug, Deserialize, Serialize)]
pub struct Settings {
    /// Bearer token for the Dashboard API. Skipped on serialization so the
    /// secret never lands in a written-out config.
    #[serde(default, skip_serializing)]
    pub api_key: Option<SecretString>,

    /// Base endpoint. Override for regional clouds or mock servers.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            timeout: default_timeout(),
        }
    }
}

fn default_base_url() -> String {
    merakisync_api::client::DEFAULT_BASE_URL.to_owned()
}

fn default_timeout() -> u64 {
    30
}

impl Settings {
    /// Default config file location (e.g. `~/.config/merakisync/config.toml`).
    pub fn default_config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "merakisync").map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Load settings: defaults, then the given TOML file (falling back to
    /// [`default_config_path`](Self::default_config_path)), then
    /// `MERAKISYNC_*` environment variables.
    pub fn load(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        let path = config_path
            .map(Path::to_path_buf)
            .or_else(Self::default_config_path);
        if let Some(path) = path {
            figment = figment.merge(Toml::file(path));
        }

        let settings: Self = figment.merge(Env::prefixed("MERAKISYNC_")).extract()?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        Url::parse(&self.base_url).map_err(|e| ConfigError::Validation {
            field: "base_url".into(),
            reason: e.to_string(),
        })?;

        if self.timeout == 0 {
            return Err(ConfigError::Validation {
                field: "timeout".into(),
                reason: "must be positive".into(),
            });
        }

        Ok(())
    }

    /// Build a ready [`MerakiClient`] from these settings.
    pub fn client(&self) -> Result<MerakiClient, ConfigError> {
        let api_key = self.api_key.as_ref().ok_or(ConfigError::NoCredentials)?;
        let transport = TransportConfig {
            timeout: Duration::from_secs(self.timeout),
        };
        Ok(MerakiClient::from_api_token_with_base(
            &self.base_url,
            api_key,
            &transport,
        )?)
    }
}
