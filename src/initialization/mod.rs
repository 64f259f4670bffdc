//! Process bring-up: logger and provider assembly.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use log::{info, LevelFilter};

use crate::config::Opt;
use crate::http::{default_http_client, ResilientClient};
use crate::providers::{IpinfoProvider, MmdbProvider};
use crate::topographer::{ProviderHandle, Topographer};

/// Initializes `env_logger`.
///
/// `RUST_LOG` is honored for per-module filtering; the CLI level overrides
/// the global default. The HTTP stack is kept at `info` so debug runs do
/// not drown in wire noise.
pub fn init_logger(level: LevelFilter) -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .filter_module("reqwest", LevelFilter::Info)
        .filter_module("hyper", LevelFilter::Info)
        .try_init()
        .context("cannot initialize a logger")
}

/// Builds the shared resilient HTTP client from CLI options.
pub fn init_http_client(opt: &Opt) -> Result<Arc<ResilientClient>> {
    let client = default_http_client(Duration::from_secs(opt.http_timeout))
        .context("cannot build an HTTP client")?;

    let resilient = ResilientClient::new(
        client,
        opt.user_agent.clone(),
        Duration::from_millis(opt.rate_limit_interval_ms),
        opt.rate_limit_burst,
    )
    .context("cannot build a resilient HTTP client")?;

    Ok(Arc::new(resilient))
}

/// Assembles the configured providers and brings the topographer up.
pub async fn init_topographer(opt: &Opt) -> Result<Topographer> {
    let http = init_http_client(opt)?;
    let mut providers = Vec::new();

    if let Some(url) = &opt.mmdb_url {
        info!(
            "mmdb provider enabled: {} every {}h under {}",
            opt.mmdb_edition,
            opt.mmdb_update_every_hours,
            opt.mmdb_dir.display()
        );
        providers.push(ProviderHandle::Offline(Arc::new(MmdbProvider::new(
            "mmdb",
            opt.mmdb_edition.clone(),
            url.clone(),
            Duration::from_secs(opt.mmdb_update_every_hours * 3600),
            opt.mmdb_dir.clone(),
            Arc::clone(&http),
        ))));
    }

    if opt.ipinfo_token.is_some() {
        info!("ipinfo provider enabled");
        providers.push(ProviderHandle::Online(Arc::new(IpinfoProvider::new(
            Arc::clone(&http),
            opt.ipinfo_token.clone(),
        )?)));
    }

    if providers.is_empty() {
        anyhow::bail!("at least one provider must be configured");
    }

    Topographer::new(providers, opt.worker_pool_size)
        .await
        .context("cannot initialize a topographer")
}
