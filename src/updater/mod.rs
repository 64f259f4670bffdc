//! Background refresh of offline provider databases.
//!
//! Each offline provider gets wrapped in an [`FsUpdater`]: a background task
//! that periodically downloads a fresh database into a scratch directory,
//! content-addresses the tree, atomically promotes it to the single active
//! `target_<digest>` directory, swaps the provider's in-memory reader, and
//! garbage-collects everything else in the base directory.

mod digest;

pub use digest::tree_digest;

use std::net::IpAddr;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use async_trait::async_trait;
use log::{info, warn};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::errors::TopographerError;
use crate::provider::{OfflineProvider, Provider, ProviderLookupResult};
use crate::stats::UsageStats;

/// Prefix marking the active database directory of an offline provider.
/// Everything else under the base directory is fair game to delete.
pub const TARGET_DIR_PREFIX: &str = "target_";

/// Prefix for in-progress scratch directories.
pub const TEMP_DIR_PREFIX: &str = "tmp_";

/// Wraps one offline provider with its refresh loop.
///
/// The updater borrows lookup traffic (it forwards [`Provider::lookup`]
/// untouched) and exclusively owns the provider's base directory and the
/// cancellation handle of its background task.
pub struct FsUpdater {
    provider: Arc<dyn OfflineProvider>,
    stats: Arc<UsageStats>,
    cancel: CancellationToken,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl FsUpdater {
    /// Brings the wrapped provider into a usable state and starts the
    /// background refresh loop.
    ///
    /// Startup sequence: clean the base directory (exactly one surviving
    /// `target_*` is kept; ambiguity or junk is deleted), open the survivor
    /// if there is one, otherwise run one full update synchronously; a
    /// provider that cannot produce a database at all fails construction.
    pub async fn start(
        provider: Arc<dyn OfflineProvider>,
        stats: Arc<UsageStats>,
    ) -> Result<FsUpdater> {
        let base = provider.base_directory().to_path_buf();

        initial_cleanup(&base)
            .await
            .context("cannot do an initial cleaning")?;

        let cancel = CancellationToken::new();

        let mut have_active = false;
        if let Some(target) = find_target_dir(&base).await? {
            match provider.open(&target).await {
                Ok(()) => have_active = true,
                Err(err) => {
                    warn!(
                        "provider {}: cannot open surviving directory {}: {err:#}",
                        provider.name(),
                        target.display()
                    );
                    tokio::fs::remove_dir_all(&target)
                        .await
                        .with_context(|| format!("cannot delete {}", target.display()))?;
                }
            }
        }

        if !have_active {
            do_update(provider.as_ref(), &cancel)
                .await
                .context("cannot perform an initial update")?;
            stats.notify_updated();
        }

        let task = {
            let provider = Arc::clone(&provider);
            let stats = Arc::clone(&stats);
            let cancel = cancel.clone();

            tokio::spawn(async move {
                let period = provider.update_every();
                let mut ticker =
                    tokio::time::interval_at(tokio::time::Instant::now() + period, period);

                loop {
                    tokio::select! {
                        _ = cancel.cancelled() => return,
                        _ = ticker.tick() => {
                            match do_update(provider.as_ref(), &cancel).await {
                                Ok(()) => {
                                    stats.notify_updated();
                                    info!("provider {}: db has been updated", provider.name());
                                }
                                Err(err) => {
                                    warn!(
                                        "provider {}: cannot update db: {err:#}",
                                        provider.name()
                                    );
                                }
                            }
                        }
                    }
                }
            })
        };

        Ok(FsUpdater {
            provider,
            stats,
            cancel,
            task: Mutex::new(Some(task)),
        })
    }

    /// The stats instance shared with the owning topographer.
    pub fn stats(&self) -> &Arc<UsageStats> {
        &self.stats
    }
}

#[async_trait]
impl Provider for FsUpdater {
    fn name(&self) -> &str {
        self.provider.name()
    }

    async fn lookup(&self, ip: IpAddr) -> Result<ProviderLookupResult> {
        self.provider.lookup(ip).await
    }

    async fn shutdown(&self) {
        self.cancel.cancel();

        let task = self.task.lock().expect("updater task lock poisoned").take();
        if let Some(task) = task {
            let _ = task.await;
        }

        self.provider.shutdown().await;
    }
}

/// One download / promote / reopen cycle.
async fn do_update(provider: &dyn OfflineProvider, cancel: &CancellationToken) -> Result<()> {
    let base = provider.base_directory().to_path_buf();
    tokio::fs::create_dir_all(&base)
        .await
        .with_context(|| format!("cannot create base directory {}", base.display()))?;

    let scratch = {
        let base = base.clone();
        tokio::task::spawn_blocking(move || {
            tempfile::Builder::new()
                .prefix(TEMP_DIR_PREFIX)
                .tempdir_in(base)
        })
        .await
        .context("scratch directory task failed")?
        .context("cannot create a scratch directory")?
    };

    // A download can run for minutes; shutdown must not wait for it. The
    // scratch guard cleans up whichever way this ends.
    tokio::select! {
        _ = cancel.cancelled() => {
            return Err(TopographerError::Cancelled.into());
        }
        downloaded = provider.download(scratch.path()) => {
            downloaded.context("cannot download a database")?;
        }
    }

    let tree_hash = {
        let path = scratch.path().to_path_buf();
        tokio::task::spawn_blocking(move || tree_digest(&path))
            .await
            .context("digest task failed")?
            .context("cannot compute a tree digest")?
    };

    let target = base.join(format!("{TARGET_DIR_PREFIX}{tree_hash}"));

    // Equal digest means the download produced no new content: keep the
    // active directory, drop the scratch tree, skip the reopen.
    if tokio::fs::try_exists(&target)
        .await
        .with_context(|| format!("cannot stat {}", target.display()))?
    {
        return Ok(());
    }

    remove_all_targets(&base).await?;

    let scratch_path = scratch.into_path();
    if let Err(err) = tokio::fs::rename(&scratch_path, &target).await {
        let _ = tokio::fs::remove_dir_all(&scratch_path).await;
        return Err(err).with_context(|| {
            format!(
                "cannot rename {} to {}",
                scratch_path.display(),
                target.display()
            )
        });
    }

    if let Err(err) = provider.open(&target).await {
        // The provider stays dark until the next cycle; leaving a target it
        // cannot open around would wedge it on restart too.
        let _ = tokio::fs::remove_dir_all(&target).await;
        return Err(err.context("cannot open a promoted database"));
    }

    Ok(())
}

/// Deletes everything in `base` except a single surviving `target_*`
/// directory. Two or more targets are ambiguous and are all deleted.
async fn initial_cleanup(base: &Path) -> Result<()> {
    tokio::fs::create_dir_all(base)
        .await
        .with_context(|| format!("cannot create base directory {}", base.display()))?;

    let mut targets = Vec::new();
    let mut to_delete = Vec::new();

    let mut entries = tokio::fs::read_dir(base)
        .await
        .context("cannot read a base directory")?;
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if is_target_dir(&entry).await? {
            targets.push(path);
        } else {
            to_delete.push(path);
        }
    }

    if targets.len() > 1 {
        to_delete.append(&mut targets);
    }

    for path in to_delete {
        remove_entry(&path).await?;
    }

    Ok(())
}

/// The surviving active directory, if any. Call only after
/// [`initial_cleanup`] has enforced "at most one".
async fn find_target_dir(base: &Path) -> Result<Option<PathBuf>> {
    let mut entries = tokio::fs::read_dir(base)
        .await
        .context("cannot read a base directory")?;

    while let Some(entry) = entries.next_entry().await? {
        if is_target_dir(&entry).await? {
            return Ok(Some(entry.path()));
        }
    }

    Ok(None)
}

async fn remove_all_targets(base: &Path) -> Result<()> {
    let mut entries = tokio::fs::read_dir(base)
        .await
        .context("cannot read a base directory")?;

    while let Some(entry) = entries.next_entry().await? {
        if is_target_dir(&entry).await? {
            remove_entry(&entry.path()).await?;
        }
    }

    Ok(())
}

async fn is_target_dir(entry: &tokio::fs::DirEntry) -> Result<bool> {
    let file_type = entry.file_type().await?;
    Ok(file_type.is_dir()
        && entry
            .file_name()
            .to_string_lossy()
            .starts_with(TARGET_DIR_PREFIX))
}

async fn remove_entry(path: &Path) -> Result<()> {
    let metadata = tokio::fs::symlink_metadata(path)
        .await
        .with_context(|| format!("cannot stat {}", path.display()))?;

    let removed = if metadata.is_dir() {
        tokio::fs::remove_dir_all(path).await
    } else {
        tokio::fs::remove_file(path).await
    };

    removed.with_context(|| format!("cannot delete {}", path.display()))
}
