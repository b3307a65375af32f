use lanswarm_test_helpers::configuration;

use crate::servers::peer::Started;

#[tokio::test]
async fn environment_should_be_started_and_stopped() {
    let env = Started::new(&configuration::ephemeral()).await;

    env.stop().await;
}

mod serving_metadata {
    use lanswarm::registry::hashing::hash_bytes;
    use lanswarm_primitives::content_hash::ContentHash;
    use lanswarm_primitives::metadata::ContentMetadata;
    use lanswarm_primitives::CHUNK_SIZE;
    use lanswarm_test_helpers::{configuration, random};
    use tracing::level_filters::LevelFilter;

    use crate::common::fixtures::invalid_content_hashes;
    use crate::common::logging::{tracing_stderr_init, INIT};
    use crate::servers::peer::client::Client;
    use crate::servers::peer::Started;

    #[tokio::test]
    async fn should_describe_a_shared_file() {
        INIT.call_once(|| {
            tracing_stderr_init(LevelFilter::ERROR);
        });

        let env = Started::new(&configuration::ephemeral()).await;
        let content = random::bytes(100);
        let content_hash = env.share("notes.txt", &content).await;

        let response = Client::new(*env.bind_address()).get(&format!("metadata/{content_hash}")).await;

        assert_eq!(response.status(), 200);
        assert_eq!(
            response.json::<ContentMetadata>().await.unwrap(),
            ContentMetadata::new("notes.txt".to_string(), 100, hash_bytes(&content), CHUNK_SIZE)
        );

        env.stop().await;
    }

    #[tokio::test]
    async fn should_return_not_found_for_content_it_does_not_share() {
        let env = Started::new(&configuration::ephemeral()).await;

        let response = Client::new(*env.bind_address())
            .get("metadata/9f86d081884c7d659a2feaa0c55ad015a3bf4f1b2b0b822cd15d6c15b0f00a08")
            .await;

        assert_eq!(response.status(), 404);

        env.stop().await;
    }

    #[tokio::test]
    async fn should_fail_when_the_hash_is_invalid() {
        let env = Started::new(&configuration::ephemeral()).await;
        let client = Client::new(*env.bind_address());

        for invalid_content_hash in &invalid_content_hashes() {
            let response = client.get(&format!("metadata/{invalid_content_hash}")).await;

            assert_eq!(response.status(), 400, "{invalid_content_hash}");
        }

        env.stop().await;
    }

    #[tokio::test]
    async fn should_describe_a_large_file_without_reading_it_again() {
        let mut cfg = configuration::ephemeral();
        cfg.peer.request_timeout = 1;
        let env = Started::new(&cfg).await;

        // Sparse: it takes no disk space but hashing it takes longer than the request timeout.
        let size = 4 * 1024 * 1024 * 1024;
        let path = env.dir.path().join("disk.img");
        std::fs::File::create(&path).unwrap().set_len(size).unwrap();

        let content_hash = ContentHash([6; 32]);
        env.registry.add_verified_file(content_hash, path).await.unwrap();

        let response = Client::new(*env.bind_address()).get(&format!("metadata/{content_hash}")).await;

        assert_eq!(response.status(), 200);
        let metadata = response.json::<ContentMetadata>().await.unwrap();
        assert_eq!(metadata.content_hash, content_hash);
        assert_eq!(metadata.size, size);

        env.stop().await;
    }
}

mod serving_chunks {
    use lanswarm_primitives::CHUNK_SIZE;
    use lanswarm_test_helpers::{configuration, random};

    use crate::servers::peer::client::Client;
    use crate::servers::peer::Started;

    #[tokio::test]
    async fn should_serve_full_chunks_and_a_shorter_last_one() {
        let env = Started::new(&configuration::ephemeral()).await;
        let size = usize::try_from(CHUNK_SIZE).unwrap() + 10;
        let content = random::bytes(size);
        let content_hash = env.share("file.bin", &content).await;
        let client = Client::new(*env.bind_address());

        let first = client.get(&format!("chunk/{content_hash}/0")).await;
        assert_eq!(first.status(), 200);
        assert_eq!(first.headers().get("content-type").unwrap(), "application/octet-stream");
        assert_eq!(first.bytes().await.unwrap(), content[..size - 10]);

        let last = client.get(&format!("chunk/{content_hash}/1")).await;
        assert_eq!(last.bytes().await.unwrap(), content[size - 10..]);

        env.stop().await;
    }

    #[tokio::test]
    async fn should_fail_when_the_index_is_out_of_range() {
        let env = Started::new(&configuration::ephemeral()).await;
        let content_hash = env.share("file.bin", &random::bytes(10)).await;

        let response = Client::new(*env.bind_address()).get(&format!("chunk/{content_hash}/1")).await;

        assert_eq!(response.status(), 400);

        env.stop().await;
    }

    #[tokio::test]
    async fn should_fail_when_the_index_is_not_a_number() {
        let env = Started::new(&configuration::ephemeral()).await;
        let content_hash = env.share("file.bin", &random::bytes(10)).await;

        let response = Client::new(*env.bind_address())
            .get(&format!("chunk/{content_hash}/first"))
            .await;

        assert_eq!(response.status(), 400);

        env.stop().await;
    }

    #[tokio::test]
    async fn should_return_not_found_for_content_it_does_not_share() {
        let env = Started::new(&configuration::ephemeral()).await;

        let response = Client::new(*env.bind_address())
            .get("chunk/9f86d081884c7d659a2feaa0c55ad015a3bf4f1b2b0b822cd15d6c15b0f00a08/0")
            .await;

        assert_eq!(response.status(), 404);

        env.stop().await;
    }
}

mod serving_the_speed_test {
    use lanswarm_primitives::PROBE_PAYLOAD_SIZE;
    use lanswarm_test_helpers::configuration;

    use crate::servers::peer::client::Client;
    use crate::servers::peer::Started;

    #[tokio::test]
    async fn should_return_the_probe_payload_without_caching() {
        let env = Started::new(&configuration::ephemeral()).await;

        let response = Client::new(*env.bind_address()).get("speedtest").await;

        assert_eq!(response.status(), 200);
        assert_eq!(response.headers().get("cache-control").unwrap(), "no-store");
        assert_eq!(response.bytes().await.unwrap().len(), PROBE_PAYLOAD_SIZE);

        env.stop().await;
    }
}
