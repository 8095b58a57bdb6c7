use std::path::PathBuf;
use std::sync::Arc;

use alpha_shared::StatsFile;
use tokio::sync::RwLock;
use tracing::warn;

use crate::config::{
    server_id, site_dir, stats_output_path, upstream_connect_timeout, upstream_http_timeout,
};

#[derive(Clone)]
pub struct AppState {
    /// Latest generated stats, published by the widget poller.
    pub stats: Arc<RwLock<Option<StatsFile>>>,
    pub http_client: reqwest::Client,
    pub server_id: Option<String>,
    pub site_dir: PathBuf,
    pub stats_path: PathBuf,
}

impl AppState {
    pub fn from_env() -> Self {
        Self::new(server_id(), site_dir(), stats_output_path())
    }

    pub fn new(server_id: Option<String>, site_dir: PathBuf, stats_path: PathBuf) -> Self {
        let request_timeout = upstream_http_timeout();
        let connect_timeout = upstream_connect_timeout();
        let http_client = reqwest::Client::builder()
            .user_agent("alpha-community-site/0.1")
            .timeout(request_timeout)
            .connect_timeout(connect_timeout)
            .build()
            .unwrap_or_else(|e| {
                warn!(
                    error = %e,
                    "failed to build configured HTTP client, using defaults"
                );
                reqwest::Client::new()
            });
        Self {
            stats: Arc::new(RwLock::new(None)),
            http_client,
            server_id,
            site_dir,
            stats_path,
        }
    }
}
