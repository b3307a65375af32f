//! Error returned by the core `Tracker`.
//!
//! Error | Context | Description
//! ---|---|---
//! `SwarmNotFound` | Want | No live peer has announced the requested content hash.
//!
use std::panic::Location;

use lanswarm_primitives::content_hash::ContentHash;

#[derive(thiserror::Error, Debug, Clone)]
pub enum Error {
    #[error("No peer is sharing {content_hash}, {location}")]
    SwarmNotFound {
        content_hash: ContentHash,
        location: &'static Location<'static>,
    },
}
