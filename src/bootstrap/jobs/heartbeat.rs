//! Job that keeps this peer alive on the tracker.
//!
//! The tracker forgets peers that do not announce for `max_peer_timeout`
//! seconds, so every peer re-announces all the content in its registry every
//! `announce_interval` seconds. The set is read from the registry on every
//! tick, so files downloaded later are announced too.
//!
//! A failed announce is logged and retried on the next tick.
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use crate::clients::tracker::TrackerClient;
use crate::registry::ContentRegistry;
use crate::servers::signals::{shutdown_signal, Halted};

/// It starts the announce heartbeat.
///
/// It stops when `rx_halt` fires or its sender is dropped, or on the global
/// shutdown signal.
#[must_use]
pub fn start_job(
    client: Arc<TrackerClient>,
    registry: Arc<ContentRegistry>,
    interval: Duration,
    rx_halt: oneshot::Receiver<Halted>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(interval);
        interval.tick().await;

        let halted = shutdown_signal(rx_halt);
        tokio::pin!(halted);

        loop {
            tokio::select! {
                () = &mut halted => {
                    tracing::info!("Stopping announce heartbeat job..");
                    break;
                }
                _ = interval.tick() => {
                    announce_all(&client, &registry).await;
                }
            }
        }
    })
}

async fn announce_all(client: &TrackerClient, registry: &ContentRegistry) {
    for content_hash in registry.hashes() {
        if let Err(err) = client.announce(&content_hash).await {
            tracing::warn!("Heartbeat announce of {} failed: {err}", content_hash.short());
        }
    }
}
