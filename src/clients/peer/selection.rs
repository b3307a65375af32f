//! Peer selection.
//!
//! Every candidate the tracker returned is probed concurrently, once. The
//! probe downloads a fixed payload and the throughput is measured in
//! megabits per second. Peers whose probe fails are left out. The ranking
//! is sorted from the fastest to the slowest peer; ties keep the candidate
//! order.
use std::time::Duration;

use futures::future::{join_all, BoxFuture};

use super::error::Error;
use super::PEER_CLIENT_LOG_TARGET;
use crate::servers::tracker::requests::PeerInfo;

/// The measured throughput of a peer.
#[derive(Debug, Clone, PartialEq)]
pub struct PeerSpeedSample {
    pub peer: PeerInfo,
    pub mbps: f64,
}

/// Measures the throughput of a peer, in megabits per second.
pub trait Probe: Sync {
    fn probe<'a>(&'a self, peer: &'a PeerInfo) -> BoxFuture<'a, Result<f64, Error>>;
}

/// Megabits per second for `bytes` received in `elapsed`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn mbps(bytes: usize, elapsed: Duration) -> f64 {
    let seconds = elapsed.as_secs_f64().max(f64::EPSILON);

    (bytes as f64 * 8.0) / f64::from(1024 * 1024) / seconds
}

/// Probes every candidate and ranks the ones that answered, fastest first.
///
/// # Errors
///
/// Will return `Error::NoPeersAvailable` if no probe succeeds.
pub async fn rank_peers<P: Probe>(probe: &P, candidates: &[PeerInfo]) -> Result<Vec<PeerSpeedSample>, Error> {
    let results = join_all(candidates.iter().map(|peer| probe.probe(peer))).await;

    let mut ranking: Vec<PeerSpeedSample> = candidates
        .iter()
        .zip(results)
        .filter_map(|(peer, result)| match result {
            Ok(mbps) => {
                tracing::info!(target: PEER_CLIENT_LOG_TARGET, "Peer {} @ {} speed: {mbps:.2} Mbps", peer.id, peer.addr());
                Some(PeerSpeedSample {
                    peer: peer.clone(),
                    mbps,
                })
            }
            Err(err) => {
                tracing::warn!(target: PEER_CLIENT_LOG_TARGET, "Speed test failed for peer {}: {err}", peer.id);
                None
            }
        })
        .collect();

    if ranking.is_empty() {
        return Err(Error::NoPeersAvailable);
    }

    // `sort_by` is stable: equal throughputs keep the candidate order.
    ranking.sort_by(|a, b| b.mbps.total_cmp(&a.mbps));

    Ok(ranking)
}
