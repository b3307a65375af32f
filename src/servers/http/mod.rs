//! Shared machinery of the HTTP services.
//!
//! Both the [tracker](crate::servers::tracker) and the
//! [peer transfer server](crate::servers::peer) are `axum` routers served by
//! `axum-server`, with or without TLS. This module contains the controller
//! that starts and stops them.
pub mod server;
