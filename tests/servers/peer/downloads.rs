//! Downloads from running peer servers, through the peer client.
use std::path::PathBuf;
use std::time::Duration;

use lanswarm::bootstrap::app::initialize_registry;
use lanswarm::clients::peer::{Downloader, PeerClient};
use lanswarm::servers::tracker::requests::PeerInfo;
use lanswarm_configuration::Configuration;
use lanswarm_primitives::content_hash::ContentHash;
use lanswarm_primitives::metadata::ContentMetadata;
use tempfile::TempDir;

struct Download {
    output: PathBuf,
    result: Result<ContentMetadata, lanswarm::clients::peer::Error>,
    registry: std::sync::Arc<lanswarm::registry::ContentRegistry>,
    _dir: TempDir,
}

async fn download(configuration: &Configuration, content_hash: &ContentHash, candidates: &[PeerInfo]) -> Download {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("downloaded.bin");
    let registry = initialize_registry();

    let client = PeerClient::new(Duration::from_secs(configuration.peer.request_timeout)).unwrap();

    let result = Downloader::new(client, registry.clone(), &configuration.peer.download)
        .download(content_hash, candidates, &output)
        .await;

    Download {
        output,
        result,
        registry,
        _dir: dir,
    }
}

mod a_file_downloaded_from_a_peer {
    use lanswarm_primitives::CHUNK_SIZE;
    use lanswarm_test_helpers::{configuration, random};
    use rstest::rstest;

    use super::download;
    use crate::servers::peer::Started;

    #[rstest]
    #[case::empty(0)]
    #[case::one_byte(1)]
    #[case::one_chunk(usize::try_from(CHUNK_SIZE).unwrap())]
    #[case::one_chunk_and_one_byte(usize::try_from(CHUNK_SIZE).unwrap() + 1)]
    #[tokio::test]
    async fn should_be_identical_to_the_shared_file(#[case] size: usize) {
        let cfg = configuration::ephemeral();
        let env = Started::new(&cfg).await;
        let content = random::bytes(size);
        let content_hash = env.share("file.bin", &content).await;

        let download = download(&cfg, &content_hash, &[env.peer_info("seeder")]).await;

        let metadata = download.result.unwrap();
        assert_eq!(metadata.size, size as u64);
        assert_eq!(std::fs::read(&download.output).unwrap(), content);

        env.stop().await;
    }

    #[tokio::test]
    async fn should_be_registered_so_it_is_seeded_afterwards() {
        let cfg = configuration::ephemeral();
        let env = Started::new(&cfg).await;
        let content_hash = env.share("file.bin", &random::bytes(1000)).await;

        let download = download(&cfg, &content_hash, &[env.peer_info("seeder")]).await;

        download.result.unwrap();
        assert_eq!(download.registry.lookup(&content_hash), Some(download.output.clone()));

        env.stop().await;
    }

    #[tokio::test]
    async fn should_not_depend_on_the_number_of_workers() {
        let env = Started::new(&configuration::ephemeral()).await;
        let size = 3 * usize::try_from(CHUNK_SIZE).unwrap() + 7;
        let content = random::bytes(size);
        let content_hash = env.share("file.bin", &content).await;

        let single = download(
            &configuration::ephemeral_with_workers(1),
            &content_hash,
            &[env.peer_info("seeder")],
        )
        .await;
        let parallel = download(
            &configuration::ephemeral_with_workers(10),
            &content_hash,
            &[env.peer_info("seeder")],
        )
        .await;

        single.result.unwrap();
        parallel.result.unwrap();
        assert_eq!(std::fs::read(&single.output).unwrap(), content);
        assert_eq!(std::fs::read(&parallel.output).unwrap(), content);

        env.stop().await;
    }
}

mod choosing_the_peer {
    use lanswarm::clients::peer::Error;
    use lanswarm_primitives::content_hash::ContentHash;
    use lanswarm_test_helpers::{configuration, random};

    use super::download;
    use crate::servers::peer::Started;

    #[tokio::test]
    async fn peers_that_do_not_answer_the_probe_should_be_skipped() {
        let cfg = configuration::ephemeral();
        let env = Started::new(&cfg).await;
        let content = random::bytes(5000);
        let content_hash = env.share("file.bin", &content).await;

        let gone = Started::new(&cfg).await;
        let gone_peer = gone.peer_info("gone");
        gone.stop().await;

        let download = download(&cfg, &content_hash, &[gone_peer, env.peer_info("seeder")]).await;

        download.result.unwrap();
        assert_eq!(std::fs::read(&download.output).unwrap(), content);

        env.stop().await;
    }

    #[tokio::test]
    async fn the_metadata_should_be_asked_to_the_next_peer_when_a_peer_does_not_have_the_content() {
        let cfg = configuration::ephemeral();
        let seeder = Started::new(&cfg).await;
        let content = random::bytes(5000);
        let content_hash = seeder.share("file.bin", &content).await;

        // Answers the probe, but knows nothing about the content.
        let empty = Started::new(&cfg).await;

        let download = download(&cfg, &content_hash, &[empty.peer_info("empty"), seeder.peer_info("seeder")]).await;

        download.result.unwrap();
        assert_eq!(std::fs::read(&download.output).unwrap(), content);

        empty.stop().await;
        seeder.stop().await;
    }

    #[tokio::test]
    async fn it_should_fail_when_no_peer_answers() {
        let cfg = configuration::ephemeral();
        let gone = Started::new(&cfg).await;
        let gone_peer = gone.peer_info("gone");
        gone.stop().await;

        let download = download(&cfg, &ContentHash([8; 32]), &[gone_peer]).await;

        assert!(matches!(download.result, Err(Error::NoPeersAvailable)));
        assert!(!download.output.exists());
    }

    #[tokio::test]
    async fn it_should_fail_when_no_peer_has_the_content() {
        let cfg = configuration::ephemeral();
        let empty = Started::new(&cfg).await;

        let download = download(&cfg, &ContentHash([8; 32]), &[empty.peer_info("empty")]).await;

        assert!(matches!(download.result, Err(Error::UnexpectedStatus { .. })));
        assert!(!download.output.exists());

        empty.stop().await;
    }
}
