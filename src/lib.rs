//! topographer: a lenient IP geolocation aggregator.
//!
//! A client submits one or more IP addresses and receives a consolidated
//! verdict per address (country + city) along with the raw answer of every
//! provider that was consulted. Lookups fan out across a pluggable set of
//! providers (remote HTTP APIs and locally held databases that are
//! downloaded and refreshed on a schedule), and a majority-style vote
//! reconciles their opinions into one answer.
//!
//! "Lenient" is a design statement: the verdict is the majority opinion of
//! the configured sources, not authoritative truth, and single-provider
//! failures degrade the answer instead of failing the request.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use tokio_util::sync::CancellationToken;
//! use topographer::{ProviderHandle, Topographer};
//!
//! # async fn example(provider: Arc<dyn topographer::Provider>) -> anyhow::Result<()> {
//! let topographer =
//!     Topographer::new(vec![ProviderHandle::Online(provider)], 0).await?;
//!
//! let verdict = topographer
//!     .resolve(&CancellationToken::new(), "81.2.69.142".parse()?, &[])
//!     .await?;
//! println!("{} is in {}", verdict.ip, verdict.country.common_name);
//!
//! topographer.shutdown().await;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod breaker;
pub mod config;
pub mod countries;
mod errors;
mod http;
pub mod initialization;
mod provider;
pub mod providers;
pub mod server;
mod stats;
mod topographer;
mod updater;

pub use breaker::{BreakerState, CallOutcome, CircuitBreaker};
pub use errors::TopographerError;
pub use http::{default_http_client, ResilientClient, DEFAULT_USER_AGENT};
pub use provider::{OfflineProvider, Provider, ProviderLookupResult};
pub use stats::UsageStats;
pub use topographer::{
    consolidate, ProviderHandle, ResolveResult, ResolveResultDetail, ResolvedCountry, Topographer,
    DEFAULT_WORKER_POOL_SIZE,
};
pub use updater::{tree_digest, FsUpdater, TARGET_DIR_PREFIX, TEMP_DIR_PREFIX};
