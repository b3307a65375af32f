use lanswarm_test_helpers::configuration;

use crate::servers::tracker::Started;

#[tokio::test]
async fn environment_should_be_started_and_stopped() {
    let env = Started::new(&configuration::ephemeral()).await;

    env.stop().await;
}

mod receiving_an_announce_request {
    use lanswarm::servers::tracker::responses;
    use lanswarm_primitives::content_hash::ContentHash;
    use lanswarm_test_helpers::configuration;
    use serde_json::{json, Value};
    use tracing::level_filters::LevelFilter;

    use crate::common::fixtures::invalid_content_hashes;
    use crate::common::logging::{tracing_stderr_init, INIT};
    use crate::servers::tracker::client::Client;
    use crate::servers::tracker::Started;

    const CONTENT_HASH: &str = "9f86d081884c7d659a2feaa0c55ad015a3bf4f1b2b0b822cd15d6c15b0f00a08";

    fn announce(file_hash: &str, id: &str, port: u16) -> Value {
        json!({
            "file_hash": file_hash,
            "peer_info": { "id": id, "ip": "192.168.1.20", "port": port }
        })
    }

    async fn assert_bad_request(response: reqwest::Response) {
        assert_eq!(response.status(), 400);
        let body: responses::Error = response.json().await.unwrap();
        assert!(!body.error.is_empty());
    }

    #[tokio::test]
    async fn should_add_the_peer_to_the_swarm() {
        INIT.call_once(|| {
            tracing_stderr_init(LevelFilter::ERROR);
        });

        let env = Started::new(&configuration::ephemeral()).await;

        let response = Client::new(*env.bind_address())
            .announce(&announce(CONTENT_HASH, "peer-1", 4040))
            .await;

        assert_eq!(response.status(), 200);

        let peers = env.tracker.want(&CONTENT_HASH.parse::<ContentHash>().unwrap()).unwrap();
        assert_eq!(peers.len(), 1);
        assert_eq!(peers[0].id.as_str(), "peer-1");
        assert_eq!(peers[0].addr.to_string(), "192.168.1.20:4040");

        env.stop().await;
    }

    #[tokio::test]
    async fn announcing_twice_should_keep_a_single_record_for_the_peer() {
        let env = Started::new(&configuration::ephemeral()).await;
        let client = Client::new(*env.bind_address());

        client.announce(&announce(CONTENT_HASH, "peer-1", 4040)).await;
        client.announce(&announce(CONTENT_HASH, "peer-1", 4040)).await;

        let peers = env.tracker.want(&CONTENT_HASH.parse::<ContentHash>().unwrap()).unwrap();
        assert_eq!(peers.len(), 1);

        env.stop().await;
    }

    #[tokio::test]
    async fn should_fail_when_the_file_hash_is_missing() {
        let env = Started::new(&configuration::ephemeral()).await;

        let response = Client::new(*env.bind_address())
            .post_json(
                "announce",
                &json!({ "peer_info": { "id": "peer-1", "ip": "192.168.1.20", "port": 4040 } }),
            )
            .await;

        assert_bad_request(response).await;

        env.stop().await;
    }

    #[tokio::test]
    async fn should_fail_when_the_file_hash_is_invalid() {
        let env = Started::new(&configuration::ephemeral()).await;
        let client = Client::new(*env.bind_address());

        for invalid_content_hash in &invalid_content_hashes() {
            let response = client.announce(&announce(invalid_content_hash, "peer-1", 4040)).await;

            assert_bad_request(response).await;
        }

        env.stop().await;
    }

    #[tokio::test]
    async fn should_fail_when_the_peer_id_is_empty() {
        let env = Started::new(&configuration::ephemeral()).await;

        let response = Client::new(*env.bind_address())
            .announce(&announce(CONTENT_HASH, "", 4040))
            .await;

        assert_bad_request(response).await;

        env.stop().await;
    }

    #[tokio::test]
    async fn should_fail_when_the_peer_port_is_zero() {
        let env = Started::new(&configuration::ephemeral()).await;

        let response = Client::new(*env.bind_address())
            .announce(&announce(CONTENT_HASH, "peer-1", 0))
            .await;

        assert_bad_request(response).await;

        env.stop().await;
    }

    #[tokio::test]
    async fn should_fail_when_the_body_is_not_json() {
        let env = Started::new(&configuration::ephemeral()).await;

        let response = Client::new(*env.bind_address()).post_raw("announce", "{ not json").await;

        assert_bad_request(response).await;

        env.stop().await;
    }

    #[tokio::test]
    async fn should_not_store_anything_when_the_request_is_rejected() {
        let env = Started::new(&configuration::ephemeral()).await;

        Client::new(*env.bind_address())
            .announce(&announce(CONTENT_HASH, "peer-1", 0))
            .await;

        assert_eq!(env.tracker.get_metrics().peers, 0);

        env.stop().await;
    }
}

mod receiving_a_want_request {
    use std::net::{IpAddr, Ipv4Addr, SocketAddr};

    use lanswarm::servers::tracker::responses::{self, WantResponse};
    use lanswarm_primitives::content_hash::ContentHash;
    use lanswarm_primitives::peer::fixture::PeerBuilder;
    use lanswarm_test_helpers::configuration;
    use serde_json::json;

    use crate::servers::tracker::client::Client;
    use crate::servers::tracker::Started;

    const CONTENT_HASH: &str = "9f86d081884c7d659a2feaa0c55ad015a3bf4f1b2b0b822cd15d6c15b0f00a08";

    #[tokio::test]
    async fn should_return_every_distinct_peer_of_the_swarm() {
        let env = Started::new(&configuration::ephemeral()).await;
        let content_hash = CONTENT_HASH.parse::<ContentHash>().unwrap();

        for n in 1..=3u16 {
            env.add_swarm_peer(
                &content_hash,
                &PeerBuilder::default()
                    .with_id(&format!("peer-{n}"))
                    .with_addr(&SocketAddr::new(IpAddr::V4(Ipv4Addr::new(192, 168, 1, 20)), 4040 + n))
                    .build(),
            );
        }

        let response = Client::new(*env.bind_address()).want(CONTENT_HASH).await;

        assert_eq!(response.status(), 200);

        let want: WantResponse = response.json().await.unwrap();

        let mut ids: Vec<String> = want.peers.iter().map(|peer| peer.id.to_string()).collect();
        ids.sort();
        assert_eq!(ids, vec!["peer-1", "peer-2", "peer-3"]);

        for peer in &want.peers {
            assert!(peer.last_seen.is_some(), "every peer should have its last seen time");
        }

        env.stop().await;
    }

    #[tokio::test]
    async fn should_return_not_found_for_content_nobody_announced() {
        let env = Started::new(&configuration::ephemeral()).await;

        let response = Client::new(*env.bind_address()).want(CONTENT_HASH).await;

        assert_eq!(response.status(), 404);
        let body: responses::Error = response.json().await.unwrap();
        assert_eq!(body.error, format!("file not found: {CONTENT_HASH}"));

        env.stop().await;
    }

    #[tokio::test]
    async fn should_fail_when_the_file_hash_is_missing() {
        let env = Started::new(&configuration::ephemeral()).await;

        let response = Client::new(*env.bind_address()).post_json("want", &json!({})).await;

        assert_eq!(response.status(), 400);

        env.stop().await;
    }
}

mod using_the_tracker_client {
    use std::net::{IpAddr, Ipv4Addr};
    use std::time::Duration;

    use lanswarm::clients::tracker::{local_peer_info, Error, TrackerClient};
    use lanswarm_primitives::content_hash::ContentHash;
    use lanswarm_test_helpers::configuration;

    use crate::servers::tracker::Started;

    fn client(env: &Started, port: u16) -> TrackerClient {
        let peer_info = local_peer_info(Some(IpAddr::V4(Ipv4Addr::LOCALHOST)), port).unwrap();

        TrackerClient::new(env.url(), peer_info, Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn an_announced_peer_should_be_returned_to_other_peers() {
        let env = Started::new(&configuration::ephemeral()).await;
        let content_hash = ContentHash([5; 32]);

        let seeder = client(&env, 4040);
        seeder.announce(&content_hash).await.unwrap();

        let peers = client(&env, 4041).want(&content_hash).await.unwrap();

        assert_eq!(peers.len(), 1);
        assert_eq!(peers[0].id, seeder.peer_info().id);
        assert_eq!(peers[0].addr(), seeder.peer_info().addr());

        env.stop().await;
    }

    #[tokio::test]
    async fn wanting_unknown_content_should_fail_with_content_not_found() {
        let env = Started::new(&configuration::ephemeral()).await;

        let result = client(&env, 4040).want(&ContentHash([6; 32])).await;

        assert!(matches!(result, Err(Error::ContentNotFound { .. })));

        env.stop().await;
    }
}
