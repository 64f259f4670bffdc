//! The capability contract every geolocation source implements.
//!
//! Online sources implement [`Provider`] alone; sources backed by a locally
//! held database additionally implement [`OfflineProvider`] and get wrapped
//! in an updater that keeps the database fresh (see [`crate::updater`]).

use std::net::IpAddr;
use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;

use crate::countries::CountryCode;

/// The raw answer one provider gives for one IP.
///
/// Either field may be empty; consumers treat emptiness as "no opinion"
/// rather than as an error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProviderLookupResult {
    /// The country vote, [`CountryCode::UNKNOWN`] for no opinion.
    pub country_code: CountryCode,
    /// The city vote, empty for no opinion.
    pub city: String,
}

/// A source of IP geolocation data.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Stable unique identifier; doubles as the key callers use to select
    /// providers in a resolve request.
    fn name(&self) -> &str;

    /// Resolves one IP. May suspend for network or disk I/O; callers cancel
    /// by dropping the future.
    async fn lookup(&self, ip: IpAddr) -> anyhow::Result<ProviderLookupResult>;

    /// Releases held resources. Default is a no-op; wrappers that own
    /// background work override this.
    async fn shutdown(&self) {}
}

/// A provider whose database lives on the local filesystem and is refreshed
/// on a schedule.
///
/// The updater never interprets the downloaded tree: it only hashes,
/// renames, and hands directories to [`OfflineProvider::open`].
#[async_trait]
pub trait OfflineProvider: Provider {
    /// How often the database should be refreshed.
    fn update_every(&self) -> Duration;

    /// The directory this provider's database artifacts live under. Owned
    /// exclusively by the wrapping updater; nothing else writes there.
    fn base_directory(&self) -> &Path;

    /// Ingests a freshly promoted directory, swapping the in-memory reader.
    /// On failure the previous reader (if any) must remain usable.
    async fn open(&self, active_dir: &Path) -> anyhow::Result<()>;

    /// Populates `scratch_dir` with a complete, validated database. Any
    /// integrity checks (checksums, parseability) belong here: once this
    /// returns, the tree is taken as promotable.
    async fn download(&self, scratch_dir: &Path) -> anyhow::Result<()>;
}
