//! HTTPS liveness probing.
//!
//! One GET per host against `https://{label}/`, with a hard per-request
//! timeout. A transport failure is not an error for the run; it maps to an
//! absent status code and the host surfaces in the report instead.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Semaphore;
use tracing::{error, info};

use watchman_common::host::ClassifiedHost;
use watchman_common::report::ProbeResult;

/// Upper bound on in-flight probes, so a large fleet does not fan out an
/// unbounded number of outbound connections.
pub const MAX_CONCURRENT_PROBES: usize = 12;

#[async_trait]
pub trait Prober: Send + Sync {
    /// Returns the observed HTTP status, or `None` when no response could
    /// be obtained at all.
    async fn probe(&self, label: &str) -> Option<u16>;
}

/// [`Prober`] backed by a shared reqwest client.
pub struct HttpProber {
    client: reqwest::Client,
}

impl HttpProber {
    pub fn new(timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Prober for HttpProber {
    async fn probe(&self, label: &str) -> Option<u16> {
        let url = format!("https://{label}/");
        match self.client.get(&url).send().await {
            Ok(response) => {
                let status = response.status().as_u16();
                info!("Response from {url}: {status}");
                Some(status)
            }
            Err(e) => {
                error!("Error checking URL {url}: {e}");
                None
            }
        }
    }
}

/// Probes every host with bounded concurrency. Results come back in input
/// order regardless of completion order, and hosts with an empty label are
/// never put on the wire.
pub async fn probe_all(prober: Arc<dyn Prober>, hosts: Vec<ClassifiedHost>) -> Vec<ProbeResult> {
    let limiter = Arc::new(Semaphore::new(MAX_CONCURRENT_PROBES));
    let mut handles = Vec::with_capacity(hosts.len());

    for host in hosts {
        let prober = prober.clone();
        let limiter = limiter.clone();
        handles.push(tokio::spawn(async move {
            if host.label().is_empty() {
                return ProbeResult { host, status: None };
            }
            let _permit = limiter.acquire_owned().await.ok();
            let status = prober.probe(host.label()).await;
            ProbeResult { host, status }
        }));
    }

    let mut results = Vec::with_capacity(handles.len());
    for handle in handles {
        if let Ok(result) = handle.await {
            results.push(result);
        }
    }
    results
}
