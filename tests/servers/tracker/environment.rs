use std::sync::Arc;

use futures::executor::block_on;
use lanswarm::bootstrap::app::initialize_tracker;
use lanswarm::bootstrap::jobs::make_rust_tls;
use lanswarm::core::Tracker;
use lanswarm::servers::http::server::{HttpServer, Launcher, Running, Stopped};
use lanswarm::servers::tracker::routes::router;
use lanswarm_configuration::{Configuration, TrackerServer};
use lanswarm_primitives::content_hash::ContentHash;
use lanswarm_primitives::peer;
use url::Url;

pub struct Environment<S> {
    pub config: Arc<TrackerServer>,
    pub tracker: Arc<Tracker>,
    pub server: HttpServer<S>,
}

impl<S> Environment<S> {
    /// Add a peer to the swarm of `content_hash`
    #[allow(dead_code)]
    pub fn add_swarm_peer(&self, content_hash: &ContentHash, peer: &peer::Peer) {
        self.tracker.announce(content_hash, &mut peer.clone());
    }
}

impl Environment<Stopped> {
    #[allow(dead_code)]
    pub fn new(configuration: &Configuration) -> Self {
        let tracker = initialize_tracker(configuration);

        let config = Arc::new(configuration.tracker.clone());

        let bind_to = config.bind_address;

        let tls = block_on(make_rust_tls(&config.tsl_config)).map(|tls| tls.expect("tls config failed"));

        let server = HttpServer::new(Launcher::new("tracker", bind_to, tls));

        Self { config, tracker, server }
    }

    #[allow(dead_code)]
    pub async fn start(self) -> Environment<Running> {
        let tracker = self.tracker.clone();

        Environment {
            config: self.config,
            tracker: self.tracker,
            server: self.server.start(move |addr| router(tracker, addr)).await.unwrap(),
        }
    }
}

impl Environment<Running> {
    pub async fn new(configuration: &Configuration) -> Self {
        Environment::<Stopped>::new(configuration).start().await
    }

    pub async fn stop(self) -> Environment<Stopped> {
        Environment {
            config: self.config,
            tracker: self.tracker,
            server: self.server.stop().await.unwrap(),
        }
    }

    pub fn bind_address(&self) -> &std::net::SocketAddr {
        &self.server.state.binding
    }

    #[allow(dead_code)]
    pub fn url(&self) -> Url {
        Url::parse(&format!("http://{}", self.bind_address())).unwrap()
    }
}
