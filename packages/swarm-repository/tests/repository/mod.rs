use std::time::Duration;

use lanswarm_primitives::content_hash::ContentHash;
use lanswarm_primitives::peer;
use lanswarm_primitives::swarm_metrics::SwarmsMetrics;
use lanswarm_swarm_repository::repository::{Removed, Repository as _};
use lanswarm_swarm_repository::SwarmsRwLockStd;
use rstest::{fixture, rstest};

use crate::common::swarm_peer_builder::{a_hash, a_peer, a_peer_seen_on};

type Announces = Vec<(ContentHash, peer::Peer)>;

#[fixture]
fn repo() -> SwarmsRwLockStd {
    SwarmsRwLockStd::default()
}

#[fixture]
fn empty() -> Announces {
    vec![]
}

#[fixture]
fn single() -> Announces {
    vec![(a_hash(1), a_peer(1))]
}

#[fixture]
fn one_swarm_three_peers() -> Announces {
    vec![(a_hash(1), a_peer(1)), (a_hash(1), a_peer(2)), (a_hash(1), a_peer(3))]
}

#[fixture]
fn three_swarms_one_shared_peer() -> Announces {
    vec![(a_hash(1), a_peer(1)), (a_hash(2), a_peer(1)), (a_hash(3), a_peer(1))]
}

#[fixture]
fn repeated() -> Announces {
    vec![(a_hash(1), a_peer(1)), (a_hash(1), a_peer(1)), (a_hash(1), a_peer(1))]
}

fn announce_all(repo: &SwarmsRwLockStd, announces: &Announces) {
    for (hash, peer) in announces {
        repo.upsert_peer(hash, peer);
    }
}

#[rstest]
#[case::empty(empty(), SwarmsMetrics { swarms: 0, peers: 0 })]
#[case::single(single(), SwarmsMetrics { swarms: 1, peers: 1 })]
#[case::one_swarm_three_peers(one_swarm_three_peers(), SwarmsMetrics { swarms: 1, peers: 3 })]
#[case::three_swarms_one_shared_peer(three_swarms_one_shared_peer(), SwarmsMetrics { swarms: 3, peers: 3 })]
#[case::repeated(repeated(), SwarmsMetrics { swarms: 1, peers: 1 })]
fn it_should_count_swarms_and_peers(repo: SwarmsRwLockStd, #[case] announces: Announces, #[case] expected: SwarmsMetrics) {
    announce_all(&repo, &announces);

    assert_eq!(repo.get_metrics(), expected);
}

#[rstest]
#[case::single(single())]
#[case::one_swarm_three_peers(one_swarm_three_peers())]
#[case::three_swarms_one_shared_peer(three_swarms_one_shared_peer())]
fn it_should_return_every_announced_peer_of_a_swarm(repo: SwarmsRwLockStd, #[case] announces: Announces) {
    announce_all(&repo, &announces);

    for (hash, peer) in &announces {
        let peers = repo.get_peers(hash).expect("it should have a swarm for an announced hash");

        assert!(peers.iter().any(|p| p.as_ref() == peer));
    }
}

#[rstest]
fn it_should_not_have_a_swarm_for_an_unknown_hash(repo: SwarmsRwLockStd) {
    announce_all(&repo, &single());

    assert!(repo.get_peers(&a_hash(9)).is_none());
}

#[rstest]
fn it_should_report_if_the_peer_is_new_to_the_swarm(repo: SwarmsRwLockStd) {
    assert!(repo.upsert_peer(&a_hash(1), &a_peer(1)));
    assert!(!repo.upsert_peer(&a_hash(1), &a_peer(1)));
    assert!(repo.upsert_peer(&a_hash(2), &a_peer(1)));
}

#[rstest]
fn it_should_remove_stale_peers_and_the_swarms_left_empty(repo: SwarmsRwLockStd) {
    let old = Duration::from_secs(100);
    let fresh = Duration::from_secs(1_000);
    let cutoff = Duration::from_secs(700);

    repo.upsert_peer(&a_hash(1), &a_peer_seen_on(1, old));
    repo.upsert_peer(&a_hash(2), &a_peer_seen_on(1, old));
    repo.upsert_peer(&a_hash(2), &a_peer_seen_on(2, fresh));

    let removed = repo.remove_inactive_peers(cutoff);

    assert_eq!(removed, Removed { peers: 2, swarms: 1 });
    assert!(repo.get_peers(&a_hash(1)).is_none());
    assert_eq!(repo.get_peers(&a_hash(2)).map(|peers| peers.len()), Some(1));
}

#[rstest]
fn a_refreshed_peer_should_survive_the_sweep(repo: SwarmsRwLockStd) {
    let cutoff = Duration::from_secs(700);

    repo.upsert_peer(&a_hash(1), &a_peer_seen_on(1, Duration::from_secs(100)));
    repo.upsert_peer(&a_hash(1), &a_peer_seen_on(1, Duration::from_secs(800)));

    assert_eq!(repo.remove_inactive_peers(cutoff), Removed::default());
    assert_eq!(repo.get_metrics(), SwarmsMetrics { swarms: 1, peers: 1 });
}
