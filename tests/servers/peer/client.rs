use std::net::SocketAddr;

use reqwest::Response;

/// HTTPS client for raw peer transfer requests. It accepts the self-signed
/// certificate of the test server.
pub struct Client {
    server_addr: SocketAddr,
    reqwest: reqwest::Client,
}

impl Client {
    pub fn new(server_addr: SocketAddr) -> Self {
        Self {
            server_addr,
            reqwest: reqwest::Client::builder()
                .use_rustls_tls()
                .danger_accept_invalid_certs(true)
                .build()
                .unwrap(),
        }
    }

    pub async fn get(&self, path: &str) -> Response {
        self.reqwest
            .get(format!("https://{}/{path}", self.server_addr))
            .send()
            .await
            .unwrap()
    }
}
