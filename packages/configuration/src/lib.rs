//! Configuration data structures for [LAN Swarm](https://docs.rs/lanswarm).
//!
//! One file configures every role of the application: the tracker server,
//! the swarm cleanup policy and the peer (transfer server, tracker client and
//! downloader).
//!
//! The current version for configuration is [`v1`].
pub mod v1;
pub mod validator;

use std::env;
use std::sync::Arc;
use std::time::Duration;

use camino::Utf8PathBuf;
use derive_more::Constructor;
use lanswarm_located_error::{DynError, LocatedError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default timeout for outbound requests (tracker RPCs, probes, metadata
/// and chunk fetches).
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Path used when neither environment variable is set.
pub const DEFAULT_CONFIG_TOML_PATH: &str = "./share/default/config/lanswarm.toml";

/// Prefix of the environment variables that override single options, for
/// example `LANSWARM_PEER__DOWNLOAD__WORKERS=4`.
pub const ENV_VAR_PREFIX: &str = "LANSWARM_";

// Environment variables

/// The whole `lanswarm.toml` file content. It has priority over the config file.
const ENV_VAR_CONFIG_TOML: &str = "LANSWARM_CONFIG_TOML";

/// The `lanswarm.toml` file location.
pub const ENV_VAR_CONFIG_TOML_PATH: &str = "LANSWARM_CONFIG_TOML_PATH";

pub type Configuration = v1::Configuration;
pub type Core = v1::core::Core;
pub type Download = v1::peer::Download;
pub type Logging = v1::logging::Logging;
pub type Peer = v1::peer::Peer;
pub type Threshold = v1::logging::Threshold;
pub type TrackerServer = v1::tracker::TrackerServer;

/// How long the tracker keeps a peer that stopped announcing.
#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, Clone, Copy, Constructor)]
pub struct TrackerPolicy {
    /// Maximum time in seconds a peer can go without announcing before the
    /// cleanup job removes it from every swarm.
    #[serde(default = "TrackerPolicy::default_max_peer_timeout")]
    pub max_peer_timeout: u64,
}

impl Default for TrackerPolicy {
    fn default() -> Self {
        Self {
            max_peer_timeout: Self::default_max_peer_timeout(),
        }
    }
}

impl TrackerPolicy {
    fn default_max_peer_timeout() -> u64 {
        300
    }
}

/// Information required for loading config
#[derive(Debug, Default, Clone)]
pub struct Info {
    config_toml: Option<String>,
    config_toml_path: String,
}

impl Info {
    /// Reads the config sources from the environment.
    ///
    /// # Errors
    ///
    /// Will return `Err` if unable to obtain a configuration.
    #[allow(clippy::needless_pass_by_value)]
    pub fn new(default_config_toml_path: String) -> Result<Self, Error> {
        let config_toml = if let Ok(config_toml) = env::var(ENV_VAR_CONFIG_TOML) {
            println!("Loading extra configuration from environment variable:\n {config_toml}");
            Some(config_toml)
        } else {
            None
        };

        let config_toml_path = if let Ok(config_toml_path) = env::var(ENV_VAR_CONFIG_TOML_PATH) {
            println!("Loading extra configuration from file: `{config_toml_path}` ...");
            config_toml_path
        } else {
            println!("Loading extra configuration from default configuration file: `{default_config_toml_path}` ...");
            default_config_toml_path
        };

        Ok(Self {
            config_toml,
            config_toml_path,
        })
    }

    /// Sources given explicitly, without looking at the environment.
    #[cfg(test)]
    #[must_use]
    pub(crate) fn with(config_toml: Option<String>, config_toml_path: String) -> Self {
        Self {
            config_toml,
            config_toml_path,
        }
    }
}

/// Errors that can occur when loading the configuration.
#[derive(Error, Debug)]
pub enum Error {
    /// Unable to load the configuration from the configuration file.
    #[error("Failed processing the configuration: {source}")]
    ConfigError {
        source: LocatedError<'static, dyn std::error::Error + Send + Sync>,
    },

    /// The values parse but do not make sense together.
    #[error("Invalid configuration: {source}")]
    InvalidConfiguration {
        source: LocatedError<'static, dyn std::error::Error + Send + Sync>,
    },
}

impl From<figment::Error> for Error {
    #[track_caller]
    fn from(err: figment::Error) -> Self {
        Self::ConfigError {
            source: (Arc::new(err) as DynError).into(),
        }
    }
}

impl From<validator::SemanticValidationError> for Error {
    #[track_caller]
    fn from(err: validator::SemanticValidationError) -> Self {
        Self::InvalidConfiguration {
            source: (Arc::new(err) as DynError).into(),
        }
    }
}

/// Certificate and key used instead of a generated self-signed pair.
#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, Clone, Default)]
pub struct TslConfig {
    /// Path to the PEM certificate file.
    #[serde(default = "TslConfig::default_ssl_cert_path")]
    pub ssl_cert_path: Utf8PathBuf,

    /// Path to the PEM key file.
    #[serde(default = "TslConfig::default_ssl_key_path")]
    pub ssl_key_path: Utf8PathBuf,
}

impl TslConfig {
    fn default_ssl_cert_path() -> Utf8PathBuf {
        Utf8PathBuf::new()
    }

    fn default_ssl_key_path() -> Utf8PathBuf {
        Utf8PathBuf::new()
    }
}
