//! Online/offline indicator.
//!
//! `NetworkMonitor` periodically opens a TCP connection to the API host and
//! publishes the result. It is independent of the league cache: a failed
//! probe never triggers or suppresses a fetch.

use std::time::Duration;

use reqwest::Url;
use tokio::net::TcpStream;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// Upper bound on a single reachability probe.
const PROBE_TIMEOUT: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkStatus {
    Online,
    Offline,
}

impl NetworkStatus {
    pub fn label(&self) -> &'static str {
        match self {
            NetworkStatus::Online => "Online",
            NetworkStatus::Offline => "Offline",
        }
    }

    pub fn is_online(&self) -> bool {
        matches!(self, NetworkStatus::Online)
    }
}

/// `host:port` to probe for an endpoint URL.
pub fn probe_target(url: &Url) -> Option<String> {
    let host = url.host_str()?;
    let port = url.port_or_known_default()?;
    Some(format!("{}:{}", host, port))
}

/// Try to open a TCP connection to `target` within `timeout`.
pub async fn probe(target: &str, timeout: Duration) -> NetworkStatus {
    match tokio::time::timeout(timeout, TcpStream::connect(target)).await {
        Ok(Ok(_)) => NetworkStatus::Online,
        Ok(Err(e)) => {
            debug!(%target, error = %e, "Reachability probe failed");
            NetworkStatus::Offline
        }
        Err(_) => {
            debug!(%target, "Reachability probe timed out");
            NetworkStatus::Offline
        }
    }
}

/// Background task that keeps a [`NetworkStatus`] up to date.
/// The task is aborted when the monitor is dropped.
pub struct NetworkMonitor {
    status: watch::Receiver<NetworkStatus>,
    handle: JoinHandle<()>,
}

impl NetworkMonitor {
    /// Start probing `target` every `interval`. Reports `Online` until the
    /// first probe completes.
    pub fn spawn(target: String, interval: Duration) -> Self {
        let (tx, rx) = watch::channel(NetworkStatus::Online);

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                let status = probe(&target, PROBE_TIMEOUT.min(interval)).await;
                tx.send_if_modified(|current| {
                    if *current == status {
                        return false;
                    }
                    info!(%target, status = status.label(), "Network status changed");
                    *current = status;
                    true
                });
                if tx.is_closed() {
                    break;
                }
            }
        });

        Self { status: rx, handle }
    }

    pub fn status(&self) -> NetworkStatus {
        *self.status.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<NetworkStatus> {
        self.status.clone()
    }
}

impl Drop for NetworkMonitor {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
