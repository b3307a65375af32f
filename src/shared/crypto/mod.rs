//! Cryptographic primitives.
pub mod tls;
