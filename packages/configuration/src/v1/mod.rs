//! Version `1` for [LAN Swarm](https://docs.rs/lanswarm) configuration data
//! structures.
//!
//! The configuration is loaded from a [TOML](https://toml.io/en/) file,
//! optionally completed with the whole TOML content given in the
//! `LANSWARM_CONFIG_TOML` environment variable, and finally with single
//! options overridden by `LANSWARM_` prefixed environment variables. Nested
//! sections are separated with a double underscore:
//!
//! ```text
//! LANSWARM_LOGGING__THRESHOLD=debug
//! LANSWARM_PEER__DOWNLOAD__WORKERS=4
//! ```
//!
//! Every option has a default, so an empty file (or no file at all) is a
//! valid configuration.
//!
//! ## Sections
//!
//! - [`Logging`](crate::v1::logging::Logging)
//! - [`Core`](crate::v1::core::Core): swarm expiry on the tracker.
//! - [`TrackerServer`](crate::v1::tracker::TrackerServer)
//! - [`Peer`](crate::v1::peer::Peer): transfer server, tracker client and downloader.
//!
//! ## Port binding
//!
//! Both servers can bind to a random port with port `0`.
//!
//! ## TSL support
//!
//! The peer transfer server always speaks HTTPS. Without `tsl_config` it
//! generates a self-signed certificate at start-up. The tracker speaks plain
//! HTTP unless `tsl_config` is set.
//!
//! ## Default configuration
//!
//! ```toml
//! [logging]
//! threshold = "info"
//!
//! [core]
//! inactive_peer_cleanup_interval = 60
//!
//! [core.tracker_policy]
//! max_peer_timeout = 300
//!
//! [tracker]
//! bind_address = "0.0.0.0:8080"
//!
//! [peer]
//! bind_address = "0.0.0.0:4040"
//! tracker_url = "http://127.0.0.1:8080/"
//! announce_interval = 120
//! request_timeout = 10
//!
//! [peer.download]
//! workers = 10
//! max_attempts = 3
//! retry_base_delay = 250
//! ```
pub mod core;
pub mod logging;
pub mod peer;
pub mod tracker;

use figment::providers::{Env, Format, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use self::core::Core;
use self::logging::Logging;
use self::peer::Peer;
use self::tracker::TrackerServer;
use crate::validator::{SemanticValidationError, Validator};
use crate::{Error, Info, ENV_VAR_PREFIX};

/// The whole application configuration.
#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, Clone, Default)]
pub struct Configuration {
    /// Logging configuration
    #[serde(default)]
    pub logging: Logging,

    /// Tracker swarm policy.
    #[serde(default)]
    pub core: Core,

    /// The tracker HTTP server.
    #[serde(default)]
    pub tracker: TrackerServer,

    /// The peer side: transfer server, tracker client and downloader.
    #[serde(default)]
    pub peer: Peer,
}

impl Configuration {
    /// Loads the configuration from the sources in `info`: the file, then
    /// the TOML given in the environment, then single option overrides.
    ///
    /// # Errors
    ///
    /// Will return `Err` if a source is malformed or the resulting
    /// configuration is not valid.
    pub fn load(info: &Info) -> Result<Configuration, Error> {
        let mut figment = Figment::new().merge(Toml::file(&info.config_toml_path));

        if let Some(config_toml) = &info.config_toml {
            figment = figment.merge(Toml::string(config_toml));
        }

        let figment = figment.merge(
            Env::prefixed(ENV_VAR_PREFIX)
                .ignore(&["CONFIG_TOML", "CONFIG_TOML_PATH"])
                .split("__"),
        );

        let config: Configuration = figment.extract()?;

        config.validate()?;

        Ok(config)
    }
}

impl Validator for Configuration {
    fn validate(&self) -> Result<(), SemanticValidationError> {
        let max_peer_timeout = self.core.tracker_policy.max_peer_timeout;
        let announce_interval = self.peer.announce_interval;

        if announce_interval >= max_peer_timeout {
            return Err(SemanticValidationError::AnnounceIntervalNotShorterThanPeerTimeout {
                announce_interval,
                max_peer_timeout,
            });
        }

        let must_be_positive = [
            ("peer.announce_interval", announce_interval),
            ("peer.request_timeout", self.peer.request_timeout),
            ("peer.download.max_attempts", u64::from(self.peer.download.max_attempts)),
        ];

        if let Some((option, _)) = must_be_positive.iter().find(|(_, value)| *value == 0) {
            return Err(SemanticValidationError::ZeroValue { option: *option });
        }

        if self.peer.download.workers == 0 {
            return Err(SemanticValidationError::ZeroValue {
                option: "peer.download.workers",
            });
        }

        Ok(())
    }
}
