//! This module contains functions to handle signals.
use std::time::Duration;

use derive_more::Display;
use tokio::sync::oneshot;
use tracing::info;

/// Time the open connections get to finish once a server is told to halt.
pub const GRACEFUL_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(10);

/// This is the message that the "launcher" spawned task receives from the main
/// application process to notify the service to shutdown.
#[derive(Copy, Clone, Debug, Display)]
pub enum Halted {
    Normal,
}

/// Resolves on `ctrl_c` or the `terminate` signal.
///
/// # Panics
///
/// Will panic if the `ctrl_c` or `terminate` signal resolves with an error.
pub async fn global_shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c().await.expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {}
    }
}

/// Resolves when the `rx_halt` or the `global_shutdown_signal()` resolves.
///
/// A dropped sender counts as a halt: nobody is left to stop the service.
pub async fn shutdown_signal(rx_halt: oneshot::Receiver<Halted>) {
    tokio::select! {
        signal = rx_halt => match signal {
            Ok(signal) => info!("Halt signal processed: {}", signal),
            Err(_) => info!("Halt channel closed"),
        },
        () = global_shutdown_signal() => { info!("Global shutdown signal processed") }
    }
}

/// Same as `shutdown_signal()`, but shows a message when it resolves.
pub async fn shutdown_signal_with_message(rx_halt: oneshot::Receiver<Halted>, message: String) {
    shutdown_signal(rx_halt).await;

    info!("{message}");
}

/// Waits for the halt signal, then tells the server behind `handle` to stop
/// accepting connections and to drain the open ones.
pub async fn graceful_shutdown(handle: axum_server::Handle, rx_halt: oneshot::Receiver<Halted>, message: String) {
    shutdown_signal_with_message(rx_halt, message).await;

    info!(
        "Sending graceful shutdown signal, remaining alive connections: {}",
        handle.connection_count()
    );

    handle.graceful_shutdown(Some(GRACEFUL_SHUTDOWN_TIMEOUT));
}
