//! Trait to validate semantic errors.
//!
//! Errors could involve more than one configuration option. Some configuration
//! combinations can be incompatible.
use thiserror::Error;

/// Errors that can occur validating the configuration.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SemanticValidationError {
    #[error("The peer announce interval ({announce_interval}s) must be shorter than the tracker max peer timeout ({max_peer_timeout}s), otherwise live peers expire between heartbeats.")]
    AnnounceIntervalNotShorterThanPeerTimeout { announce_interval: u64, max_peer_timeout: u64 },

    #[error("The {option} option must be greater than zero.")]
    ZeroValue { option: &'static str },
}

pub trait Validator {
    /// # Errors
    ///
    /// Will return an error if the configuration is invalid.
    fn validate(&self) -> Result<(), SemanticValidationError>;
}
