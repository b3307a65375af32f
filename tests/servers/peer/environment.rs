use std::sync::Arc;
use std::time::Duration;

use lanswarm::bootstrap::app::initialize_registry;
use lanswarm::registry::ContentRegistry;
use lanswarm::servers::http::server::{HttpServer, Launcher, Running, Stopped};
use lanswarm::servers::peer::routes::router;
use lanswarm::servers::tracker::requests::PeerInfo;
use lanswarm::shared::crypto::tls::self_signed;
use lanswarm_configuration::{Configuration, Peer};
use lanswarm_primitives::content_hash::ContentHash;
use lanswarm_primitives::peer;
use tempfile::TempDir;

use crate::common::fixtures::a_file_with;

pub struct Environment<S> {
    pub config: Arc<Peer>,
    pub registry: Arc<ContentRegistry>,
    pub server: HttpServer<S>,
    /// Where the shared files live.
    pub dir: Arc<TempDir>,
}

impl<S> Environment<S> {
    /// Writes `content` to a new file and shares it.
    pub async fn share(&self, name: &str, content: &[u8]) -> ContentHash {
        let path = a_file_with(self.dir.path(), name, content);

        self.registry.add_file(&path).await.unwrap()
    }
}

impl Environment<Stopped> {
    #[allow(dead_code)]
    pub async fn new(configuration: &Configuration) -> Self {
        let registry = initialize_registry();

        let config = Arc::new(configuration.peer.clone());

        let tls = self_signed(vec!["localhost".to_string(), "127.0.0.1".to_string()])
            .await
            .expect("it should generate a certificate");

        let server = HttpServer::new(Launcher::new("peer server", config.bind_address, Some(tls)));

        Self {
            config,
            registry,
            server,
            dir: Arc::new(tempfile::tempdir().unwrap()),
        }
    }

    #[allow(dead_code)]
    pub async fn start(self) -> Environment<Running> {
        let registry = self.registry.clone();
        let timeout = Duration::from_secs(self.config.request_timeout);

        Environment {
            config: self.config,
            registry: self.registry,
            server: self.server.start(move |addr| router(registry, timeout, addr)).await.unwrap(),
            dir: self.dir,
        }
    }
}

impl Environment<Running> {
    pub async fn new(configuration: &Configuration) -> Self {
        Environment::<Stopped>::new(configuration).await.start().await
    }

    pub async fn stop(self) -> Environment<Stopped> {
        Environment {
            config: self.config,
            registry: self.registry,
            server: self.server.stop().await.unwrap(),
            dir: self.dir,
        }
    }

    pub fn bind_address(&self) -> &std::net::SocketAddr {
        &self.server.state.binding
    }

    /// This server as the tracker would list it.
    pub fn peer_info(&self, id: &str) -> PeerInfo {
        PeerInfo {
            id: peer::Id::new(id),
            ip: self.bind_address().ip(),
            port: self.bind_address().port(),
            last_seen: None,
        }
    }
}
