//! Job that runs a task on intervals to clean up swarms.
//!
//! It removes inactive peers and the swarms left without peers.
//!
//! **Inactive peers** are peers that have not announced for more than
//! `max_peer_timeout` seconds. `max_peer_timeout` is a customizable core
//! tracker option.
//!
//! Refer to [`lanswarm-configuration documentation`](https://docs.rs/lanswarm-configuration) for more info about those options.
use std::sync::Arc;

use chrono::Utc;
use lanswarm_configuration::Core;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use crate::core;
use crate::servers::signals::{shutdown_signal, Halted};

/// It starts a job for cleaning up the swarm data in the tracker.
///
/// The cleaning task is executed on an `inactive_peer_cleanup_interval`. It
/// stops when `rx_halt` fires, on the global shutdown signal or when the
/// tracker is dropped.
///
/// Refer to [`lanswarm-configuration documentation`](https://docs.rs/lanswarm-configuration) for more info about that option.
#[must_use]
pub fn start_job(config: &Core, tracker: &Arc<core::Tracker>, rx_halt: oneshot::Receiver<Halted>) -> JoinHandle<()> {
    let weak_tracker = std::sync::Arc::downgrade(tracker);
    let interval = config.inactive_peer_cleanup_interval;

    tokio::spawn(async move {
        let interval = std::time::Duration::from_secs(interval);
        let mut interval = tokio::time::interval(interval);
        interval.tick().await;

        let halted = shutdown_signal(rx_halt);
        tokio::pin!(halted);

        loop {
            tokio::select! {
                () = &mut halted => {
                    tracing::info!("Stopping swarm cleanup job..");
                    break;
                }
                _ = interval.tick() => {
                    if let Some(tracker) = weak_tracker.upgrade() {
                        let start_time = Utc::now().time();
                        tracing::info!("Cleaning up swarms..");
                        let removed = tracker.expire_stale();
                        let metrics = tracker.get_metrics();
                        tracing::info!(
                            "Cleaned up swarms in: {}ms. Removed {} peers and {} swarms, {} peers left in {} swarms",
                            (Utc::now().time() - start_time).num_milliseconds(),
                            removed.peers,
                            removed.swarms,
                            metrics.peers,
                            metrics.swarms
                        );
                    } else {
                        break;
                    }
                }
            }
        }
    })
}
