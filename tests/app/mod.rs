//! A whole swarm in one process: a tracker, a peer sharing a file and a
//! peer getting it.
use lanswarm::app;
use lanswarm_configuration::Configuration;
use lanswarm_primitives::CHUNK_SIZE;
use lanswarm_test_helpers::{configuration, random};

use crate::common::fixtures::a_file_with;
use crate::servers::tracker::Started;

fn peer_configuration(tracker: &Started) -> Configuration {
    let mut config = configuration::ephemeral();

    config.peer.tracker_url = Some(tracker.url());

    config
}

#[tokio::test]
async fn a_shared_file_should_be_downloaded_verified_and_seeded_again() {
    let tracker = Started::new(&configuration::ephemeral()).await;
    let dir = tempfile::tempdir().unwrap();
    let content = random::bytes(2 * usize::try_from(CHUNK_SIZE).unwrap() + 3);
    let path = a_file_with(dir.path(), "movie.mkv", &content);

    let (content_hash, sharing) = app::share(&peer_configuration(&tracker), &path).await.unwrap();

    let output = dir.path().join("copy.mkv");
    let (metadata, getting) = app::get(&peer_configuration(&tracker), &content_hash, &output)
        .await
        .unwrap();

    assert_eq!(metadata.name, "movie.mkv");
    assert_eq!(std::fs::read(&output).unwrap(), content);
    assert_eq!(getting.registry.lookup(&content_hash), Some(output.clone()));

    // Both peers are in the swarm now.
    let mut ids: Vec<String> = tracker
        .tracker
        .want(&content_hash)
        .unwrap()
        .iter()
        .map(|peer| peer.id.to_string())
        .collect();
    ids.sort();
    let mut expected = vec![sharing.peer_info().id.to_string(), getting.peer_info().id.to_string()];
    expected.sort();
    assert_eq!(ids, expected);

    getting.jobs.stop().await;
    sharing.jobs.stop().await;
    tracker.stop().await;
}

#[tokio::test]
async fn sharing_a_missing_file_should_fail() {
    let tracker = Started::new(&configuration::ephemeral()).await;

    let result = app::share(&peer_configuration(&tracker), std::path::Path::new("/definitely/not/here.bin")).await;

    assert!(matches!(result, Err(app::Error::Registry { .. })));

    tracker.stop().await;
}

#[tokio::test]
async fn getting_content_nobody_shares_should_fail() {
    let tracker = Started::new(&configuration::ephemeral()).await;
    let dir = tempfile::tempdir().unwrap();

    let result = app::get(
        &peer_configuration(&tracker),
        &lanswarm_primitives::content_hash::ContentHash([2; 32]),
        &dir.path().join("nothing.bin"),
    )
    .await;

    assert!(matches!(
        result,
        Err(app::Error::Tracker {
            source: lanswarm::clients::tracker::Error::ContentNotFound { .. }
        })
    ));

    tracker.stop().await;
}

#[tokio::test]
async fn the_tracker_role_should_start_and_stop() {
    let config = configuration::ephemeral();
    let tracker = lanswarm::bootstrap::app::initialize_tracker(&config);

    let jobs = app::start_tracker(&config, tracker).await.unwrap();

    assert_eq!(jobs.bindings().len(), 1);

    jobs.stop().await;
}
