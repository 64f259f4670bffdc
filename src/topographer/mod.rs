//! The orchestrator: provider management, worker-pool dispatch, and
//! consolidation of lookups.

mod consolidate;

pub use consolidate::consolidate;

use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use futures::stream::FuturesUnordered;
use futures::StreamExt;
use log::warn;
use serde::{Deserialize, Serialize};
use tokio::sync::{mpsc, RwLock, Semaphore};
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;

use crate::countries::CountryCode;
use crate::errors::TopographerError;
use crate::provider::{OfflineProvider, Provider};
use crate::stats::UsageStats;
use crate::updater::FsUpdater;

/// Default capacity of the worker pool.
///
/// A worker task is a single IP lookup across *all* selected providers, so
/// this bounds how many IPs are resolved concurrently. Useful for capacity
/// planning when providers sit behind rate-limited external APIs.
pub const DEFAULT_WORKER_POOL_SIZE: usize = 4096;

/// The elected country of a verdict. All four fields are empty strings when
/// no provider produced a known country.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedCountry {
    /// 2-letter ISO-3166 code, e.g. `RU`.
    pub alpha2_code: String,
    /// 3-letter ISO-3166 code, e.g. `RUS`.
    pub alpha3_code: String,
    /// Everyday name, e.g. `Russia`.
    pub common_name: String,
    /// Official name, e.g. `Russian Federation`.
    pub official_name: String,
}

/// One provider's raw answer, preserved in the output for transparency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolveResultDetail {
    /// The provider that produced this answer.
    pub provider_name: String,
    /// The provider's country vote; unknown when the lookup failed or the
    /// provider had no opinion.
    pub country_code: CountryCode,
    /// The provider's city vote, empty for no opinion.
    pub city: String,
}

/// The consolidated verdict for one IP.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolveResult {
    /// The resolved address (IPv4-mapped IPv6 input is canonicalized).
    pub ip: IpAddr,
    /// The elected country, empty if no provider knew one.
    pub country: ResolvedCountry,
    /// The elected city, empty if no votes existed.
    pub city: String,
    /// Raw per-provider answers. Unordered; do not depend on provider
    /// order.
    pub details: Vec<ResolveResultDetail>,
}

impl ResolveResult {
    /// True iff both a country and a city were elected.
    pub fn ok(&self) -> bool {
        !self.country.alpha2_code.is_empty() && !self.city.is_empty()
    }
}

/// A provider handed to [`Topographer::new`].
///
/// Offline providers are the same capability plus a refresh contract; the
/// topographer wraps them in an [`FsUpdater`] at insertion, so internal
/// storage stays a uniform name → provider map.
pub enum ProviderHandle {
    /// A source that answers lookups directly (usually a remote HTTP API).
    Online(Arc<dyn Provider>),
    /// A source backed by a periodically refreshed local database.
    Offline(Arc<dyn OfflineProvider>),
}

struct Inner {
    providers: HashMap<String, Arc<dyn Provider>>,
    stats: HashMap<String, Arc<UsageStats>>,
    pool: Arc<Semaphore>,
    tracker: TaskTracker,
    closed: RwLock<bool>,
}

/// The public entry point: owns the providers, their usage stats, the
/// worker pool, and shutdown.
pub struct Topographer {
    inner: Arc<Inner>,
}

impl std::fmt::Debug for Topographer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Topographer").finish_non_exhaustive()
    }
}

type SelectedProviders = Arc<Vec<(Arc<dyn Provider>, Arc<UsageStats>)>>;

impl Topographer {
    /// Builds a topographer over `providers`.
    ///
    /// Offline providers are brought up synchronously (initial cleanup,
    /// open-or-first-download); if any of them fails, everything already
    /// started is shut down again and the error is returned.
    pub async fn new(providers: Vec<ProviderHandle>, worker_pool_size: usize) -> Result<Self> {
        let pool_size = if worker_pool_size == 0 {
            DEFAULT_WORKER_POOL_SIZE
        } else {
            worker_pool_size
        };

        let mut provider_map: HashMap<String, Arc<dyn Provider>> = HashMap::new();
        let mut stats_map: HashMap<String, Arc<UsageStats>> = HashMap::new();

        for handle in providers {
            let (name, started): (String, Arc<dyn Provider>) = match handle {
                ProviderHandle::Online(provider) => {
                    let name = provider.name().to_string();
                    stats_map.insert(name.clone(), Arc::new(UsageStats::new(&name)));
                    (name, provider)
                }
                ProviderHandle::Offline(provider) => {
                    let name = provider.name().to_string();
                    let stats = Arc::new(UsageStats::new(&name));
                    stats_map.insert(name.clone(), Arc::clone(&stats));

                    let updater = match FsUpdater::start(provider, stats).await {
                        Ok(updater) => updater,
                        Err(err) => {
                            shutdown_providers(&provider_map).await;
                            return Err(err)
                                .with_context(|| format!("cannot start provider {name}"));
                        }
                    };

                    (name, Arc::new(updater))
                }
            };

            if provider_map.insert(name.clone(), started).is_some() {
                shutdown_providers(&provider_map).await;
                anyhow::bail!("provider {name} is registered twice");
            }
        }

        Ok(Topographer {
            inner: Arc::new(Inner {
                providers: provider_map,
                stats: stats_map,
                pool: Arc::new(Semaphore::new(pool_size)),
                tracker: TaskTracker::new(),
                closed: RwLock::new(false),
            }),
        })
    }

    /// Resolves the geolocation of a single IP.
    ///
    /// `provider_names` selects which providers to consult; an empty slice
    /// means all of them.
    pub async fn resolve(
        &self,
        cancel: &CancellationToken,
        ip: IpAddr,
        provider_names: &[String],
    ) -> Result<ResolveResult> {
        let closed = self.inner.closed.read().await;
        if *closed {
            return Err(TopographerError::Shutdown.into());
        }

        let providers = self.providers_to_use(provider_names)?;
        let ip = ip.to_canonical();

        let (tx, mut rx) = mpsc::channel(1);
        self.submit(cancel, ip, 0, &providers, &tx).await?;
        drop(tx);

        match rx.recv().await {
            Some((_, result)) => Ok(result),
            // The task observed the cancellation and bailed without sending.
            None => Err(TopographerError::Cancelled.into()),
        }
    }

    /// Concurrently resolves a batch of IPs; the output order matches the
    /// input order.
    pub async fn resolve_all(
        &self,
        cancel: &CancellationToken,
        ips: &[IpAddr],
        provider_names: &[String],
    ) -> Result<Vec<ResolveResult>> {
        let closed = self.inner.closed.read().await;
        if *closed {
            return Err(TopographerError::Shutdown.into());
        }

        let providers = self.providers_to_use(provider_names)?;

        let (tx, mut rx) = mpsc::channel(ips.len().max(1));
        let mut submit_error = None;

        for (index, ip) in ips.iter().enumerate() {
            let ip = ip.to_canonical();
            if let Err(err) = self.submit(cancel, ip, index, &providers, &tx).await {
                // Already-submitted tasks are still awaited below.
                submit_error = Some(err);
                break;
            }
        }
        drop(tx);

        let mut indexed = Vec::with_capacity(ips.len());
        while let Some(entry) = rx.recv().await {
            indexed.push(entry);
        }

        if let Some(err) = submit_error {
            return Err(err);
        }

        indexed.sort_by_key(|(index, _)| *index);
        Ok(indexed.into_iter().map(|(_, result)| result).collect())
    }

    /// Usage counters of every provider, sorted by provider name.
    pub fn usage_stats(&self) -> Vec<Arc<UsageStats>> {
        let mut stats: Vec<_> = self.inner.stats.values().cloned().collect();
        stats.sort_by(|a, b| a.name().cmp(b.name()));
        stats
    }

    /// Names of all configured providers, sorted.
    pub fn provider_names(&self) -> Vec<String> {
        let mut names: Vec<_> = self.inner.providers.keys().cloned().collect();
        names.sort();
        names
    }

    /// Stops accepting lookups, waits for in-flight work to drain, then
    /// shuts every provider down (offline ones cancel their updater first).
    /// Safe to call any number of times.
    pub async fn shutdown(&self) {
        let mut closed = self.inner.closed.write().await;
        if *closed {
            return;
        }
        *closed = true;

        self.inner.pool.close();
        self.inner.tracker.close();
        self.inner.tracker.wait().await;

        for provider in self.inner.providers.values() {
            provider.shutdown().await;
        }
    }

    fn providers_to_use(&self, names: &[String]) -> Result<SelectedProviders> {
        let mut selected = Vec::new();

        if names.is_empty() {
            for (name, provider) in &self.inner.providers {
                selected.push((Arc::clone(provider), Arc::clone(&self.inner.stats[name])));
            }
        } else {
            for name in names {
                let provider = self
                    .inner
                    .providers
                    .get(name)
                    .ok_or_else(|| TopographerError::UnknownProvider(name.clone()))?;
                selected.push((Arc::clone(provider), Arc::clone(&self.inner.stats[name])));
            }
        }

        Ok(Arc::new(selected))
    }

    /// Submits one per-IP task to the worker pool. Fails with `Cancelled`
    /// if the caller gives up while the pool is full and with `Shutdown` if
    /// the pool was closed underneath us.
    async fn submit(
        &self,
        cancel: &CancellationToken,
        ip: IpAddr,
        index: usize,
        providers: &SelectedProviders,
        tx: &mpsc::Sender<(usize, ResolveResult)>,
    ) -> Result<()> {
        let permit = tokio::select! {
            _ = cancel.cancelled() => return Err(TopographerError::Cancelled.into()),
            permit = Arc::clone(&self.inner.pool).acquire_owned() => {
                permit.map_err(|_| TopographerError::Shutdown)?
            }
        };

        let providers = Arc::clone(providers);
        let tx = tx.clone();
        let cancel = cancel.clone();

        self.inner.tracker.spawn(async move {
            let _permit = permit;

            if let Some(result) = resolve_ip(ip, &providers, &cancel).await {
                tokio::select! {
                    _ = cancel.cancelled() => {}
                    _ = tx.send((index, result)) => {}
                }
            }
        });

        Ok(())
    }
}

async fn shutdown_providers(providers: &HashMap<String, Arc<dyn Provider>>) {
    for provider in providers.values() {
        provider.shutdown().await;
    }
}

/// The per-IP task body: fan one lookup out to every selected provider,
/// collect the details, and consolidate. Returns `None` when cancelled.
async fn resolve_ip(
    ip: IpAddr,
    providers: &[(Arc<dyn Provider>, Arc<UsageStats>)],
    cancel: &CancellationToken,
) -> Option<ResolveResult> {
    let mut lookups = FuturesUnordered::new();

    for (provider, stats) in providers {
        lookups.push(async move {
            let mut detail = ResolveResultDetail {
                provider_name: provider.name().to_string(),
                country_code: CountryCode::UNKNOWN,
                city: String::new(),
            };

            match provider.lookup(ip).await {
                Ok(answer) => {
                    stats.notify_used(true);
                    detail.country_code = answer.country_code;
                    detail.city = answer.city;
                }
                Err(err) => {
                    stats.notify_used(false);
                    warn!("cannot resolve {ip} via {}: {err:#}", provider.name());
                }
            }

            detail
        });
    }

    let mut details = Vec::with_capacity(providers.len());
    loop {
        tokio::select! {
            _ = cancel.cancelled() => return None,
            next = lookups.next() => match next {
                Some(detail) => details.push(detail),
                None => break,
            },
        }
    }

    Some(consolidate(ip, details))
}
