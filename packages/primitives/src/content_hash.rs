use std::panic::Location;

use thiserror::Error;

/// SHA-256 digest of a whole file. The canonical identifier of shared content.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Default, Debug, PartialOrd, Ord)]
pub struct ContentHash(pub [u8; 32]);

pub const CONTENT_HASH_BYTES_LEN: usize = 32;

/// Length of the hex representation.
pub const CONTENT_HASH_HEX_LEN: usize = CONTENT_HASH_BYTES_LEN * 2;

impl ContentHash {
    /// The first ten hex characters, for log lines.
    #[must_use]
    pub fn short(&self) -> String {
        let mut hex = self.to_string();
        hex.truncate(10);
        hex
    }
}

impl std::fmt::Display for ContentHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut chars = [0u8; CONTENT_HASH_HEX_LEN];
        let hex = binascii::bin2hex(&self.0, &mut chars).map_err(|_| std::fmt::Error)?;
        let hex = std::str::from_utf8(hex).map_err(|_| std::fmt::Error)?;
        f.write_str(hex)
    }
}

impl std::str::FromStr for ContentHash {
    type Err = ParseError;

    #[track_caller]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != CONTENT_HASH_HEX_LEN {
            return Err(ParseError::InvalidLength {
                location: Location::caller(),
                length: s.len(),
            });
        }

        let mut hash = Self([0u8; CONTENT_HASH_BYTES_LEN]);

        binascii::hex2bin(s.as_bytes(), &mut hash.0).map_err(|_| ParseError::InvalidCharacters {
            location: Location::caller(),
        })?;

        Ok(hash)
    }
}

impl From<[u8; 32]> for ContentHash {
    fn from(val: [u8; 32]) -> Self {
        ContentHash(val)
    }
}

/// Errors parsing a `ContentHash` from its hex representation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("a content hash is {CONTENT_HASH_HEX_LEN} hex characters long, got {length}, {location}")]
    InvalidLength {
        location: &'static Location<'static>,
        length: usize,
    },
    #[error("a content hash must only contain hex characters, {location}")]
    InvalidCharacters { location: &'static Location<'static> },
}

impl serde::ser::Serialize for ContentHash {
    fn serialize<S: serde::ser::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> serde::de::Deserialize<'de> for ContentHash {
    fn deserialize<D: serde::de::Deserializer<'de>>(des: D) -> Result<Self, D::Error> {
        des.deserialize_str(ContentHashVisitor)
    }
}

struct ContentHashVisitor;

impl<'v> serde::de::Visitor<'v> for ContentHashVisitor {
    type Value = ContentHash;

    fn expecting(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "a {CONTENT_HASH_HEX_LEN} character long hex string")
    }

    fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<Self::Value, E> {
        v.parse::<ContentHash>()
            .map_err(|_| serde::de::Error::invalid_value(serde::de::Unexpected::Str(v), &self))
    }
}
