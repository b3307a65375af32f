use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use serde::{Deserialize, Serialize};

use crate::TslConfig;

/// The tracker HTTP server.
#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, Clone)]
pub struct TrackerServer {
    /// The address the tracker will bind to.
    /// The format is `ip:port`, for example `0.0.0.0:8080`. If you want the
    /// operating system to choose a random port, use port `0`.
    #[serde(default = "TrackerServer::default_bind_address")]
    pub bind_address: SocketAddr,

    /// Serve HTTPS with these files. Plain HTTP when absent.
    #[serde(default = "TrackerServer::default_tsl_config")]
    pub tsl_config: Option<TslConfig>,
}

impl Default for TrackerServer {
    fn default() -> Self {
        Self {
            bind_address: Self::default_bind_address(),
            tsl_config: Self::default_tsl_config(),
        }
    }
}

impl TrackerServer {
    fn default_bind_address() -> SocketAddr {
        SocketAddr::new(IpAddr::V4(Ipv4Addr::new(0, 0, 0, 0)), 8080)
    }

    fn default_tsl_config() -> Option<TslConfig> {
        None
    }
}
