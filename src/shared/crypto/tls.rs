//! TLS material for the HTTPS servers.
//!
//! The peer transfer server always speaks HTTPS. When no certificate is
//! configured it uses a self-signed one generated at start-up with
//! [`self_signed`]. Peers do not verify each other's certificates: the
//! transport is encrypted, and the content is authenticated afterwards by
//! its hash.
use std::sync::Once;

use axum_server::tls_rustls::RustlsConfig;
use lanswarm_located_error::{Located, LocatedError};
use rcgen::CertifiedKey;
use thiserror::Error;

static INSTALL_CRYPTO_PROVIDER: Once = Once::new();

/// Installs `ring` as the process wide `rustls` crypto provider.
///
/// More than one provider ends up compiled in, and `rustls` refuses to pick
/// one on its own. It must run before the first server TLS configuration is
/// built.
pub fn install_crypto_provider() {
    INSTALL_CRYPTO_PROVIDER.call_once(|| {
        // Only fails if a provider is already installed.
        if rustls::crypto::ring::default_provider().install_default().is_err() {
            tracing::debug!("A rustls crypto provider was already installed");
        }
    });
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("could not generate a self-signed certificate: {source}")]
    CertificateGeneration { source: LocatedError<'static, rcgen::Error> },

    #[error("could not build the TLS configuration: {source}")]
    BadTlsConfig { source: LocatedError<'static, std::io::Error> },
}

/// Generates a self-signed certificate for `subject_alt_names` and builds a
/// server configuration with it.
///
/// # Errors
///
/// Will return an error if the certificate cannot be generated or loaded.
pub async fn self_signed(subject_alt_names: Vec<String>) -> Result<RustlsConfig, Error> {
    install_crypto_provider();

    let CertifiedKey { cert, key_pair } =
        rcgen::generate_simple_self_signed(subject_alt_names).map_err(|e| Error::CertificateGeneration {
            source: Located(e).into(),
        })?;

    RustlsConfig::from_pem(cert.pem().into_bytes(), key_pair.serialize_pem().into_bytes())
        .await
        .map_err(|e| Error::BadTlsConfig {
            source: Located(e).into(),
        })
}
