//! Initialize configuration from file or env var.
//!
//! All environment variables are prefixed with `LANSWARM_`.
use lanswarm_configuration::{Configuration, Error, Info, DEFAULT_CONFIG_TOML_PATH};

/// It loads the application configuration from the environment.
///
/// There are three sources, each one overriding the previous:
///
/// 1. The config file: `LANSWARM_CONFIG_TOML_PATH` or the default
///    `./share/default/config/lanswarm.toml`.
/// 2. The environment variable `LANSWARM_CONFIG_TOML`, with the same
///    contents as a config file.
/// 3. Single options, like `LANSWARM_PEER__ANNOUNCE_INTERVAL=60`.
///
/// Refer to the [configuration documentation](https://docs.rs/lanswarm-configuration) for the configuration options.
///
/// # Errors
///
/// Will return an error if a source is malformed or the configuration is
/// not valid.
pub fn initialize_configuration() -> Result<Configuration, Error> {
    let info = Info::new(DEFAULT_CONFIG_TOML_PATH.to_string())?;

    Configuration::load(&info)
}
