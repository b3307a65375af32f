use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use serde::{Deserialize, Serialize};
use url::Url;

use crate::TslConfig;

/// A peer: the transfer server it runs, how it reaches the tracker and how
/// it downloads.
#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, Clone)]
pub struct Peer {
    /// The address the peer transfer server binds to. Use port `0` to let the
    /// operating system choose.
    #[serde(default = "Peer::default_bind_address")]
    pub bind_address: SocketAddr,

    /// IP announced to the tracker. When absent the address of the interface
    /// used for the default route is detected at start-up.
    #[serde(default = "Peer::default_advertised_ip")]
    pub advertised_ip: Option<IpAddr>,

    /// Certificate for the transfer server. A self-signed certificate is
    /// generated when absent.
    #[serde(default = "Peer::default_tsl_config")]
    pub tsl_config: Option<TslConfig>,

    /// Where the tracker lives, for example `http://192.168.1.10:8080`.
    #[serde(default = "Peer::default_tracker_url")]
    pub tracker_url: Option<Url>,

    /// Seconds between two re-announces of every shared hash.
    #[serde(default = "Peer::default_announce_interval")]
    pub announce_interval: u64,

    /// Timeout in seconds of every outbound request.
    #[serde(default = "Peer::default_request_timeout")]
    pub request_timeout: u64,

    #[serde(default = "Peer::default_download")]
    pub download: Download,
}

impl Default for Peer {
    fn default() -> Self {
        Self {
            bind_address: Self::default_bind_address(),
            advertised_ip: Self::default_advertised_ip(),
            tsl_config: Self::default_tsl_config(),
            tracker_url: Self::default_tracker_url(),
            announce_interval: Self::default_announce_interval(),
            request_timeout: Self::default_request_timeout(),
            download: Self::default_download(),
        }
    }
}

impl Peer {
    fn default_bind_address() -> SocketAddr {
        SocketAddr::new(IpAddr::V4(Ipv4Addr::new(0, 0, 0, 0)), 4040)
    }

    fn default_advertised_ip() -> Option<IpAddr> {
        None
    }

    fn default_tsl_config() -> Option<TslConfig> {
        None
    }

    fn default_tracker_url() -> Option<Url> {
        Url::parse("http://127.0.0.1:8080").ok()
    }

    fn default_announce_interval() -> u64 {
        120
    }

    fn default_request_timeout() -> u64 {
        crate::DEFAULT_TIMEOUT.as_secs()
    }

    fn default_download() -> Download {
        Download::default()
    }
}

/// Parallel chunk download settings.
#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, Clone, Copy)]
pub struct Download {
    /// Number of concurrent chunk workers.
    #[serde(default = "Download::default_workers")]
    pub workers: usize,

    /// Attempts per chunk before the whole download fails.
    #[serde(default = "Download::default_max_attempts")]
    pub max_attempts: u32,

    /// Delay before the first retry of a chunk, in milliseconds. It doubles
    /// on every further retry.
    #[serde(default = "Download::default_retry_base_delay")]
    pub retry_base_delay: u64,
}

impl Default for Download {
    fn default() -> Self {
        Self {
            workers: Self::default_workers(),
            max_attempts: Self::default_max_attempts(),
            retry_base_delay: Self::default_retry_base_delay(),
        }
    }
}

impl Download {
    fn default_workers() -> usize {
        10
    }

    fn default_max_attempts() -> u32 {
        3
    }

    fn default_retry_base_delay() -> u64 {
        250
    }
}
