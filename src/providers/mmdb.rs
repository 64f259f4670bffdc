//! Offline provider reading MaxMind-format (`.mmdb`) databases.

use std::net::IpAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use maxminddb::Reader;
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;

use crate::errors::TopographerError;
use crate::http::ResilientClient;
use crate::provider::{OfflineProvider, Provider, ProviderLookupResult};

/// A provider backed by a periodically downloaded `.mmdb` database.
///
/// Works for MaxMind itself and for the MaxMind-compatible mirrors (DB-IP
/// and friends): anything that serves either a raw `.mmdb` file or the
/// usual `tar.gz` archive with the database inside.
///
/// The in-memory reader is a read-mostly resource: lookups share it behind
/// a read lock while the wrapping updater swaps it with a write lock.
pub struct MmdbProvider {
    name: String,
    edition: String,
    url: String,
    update_every: Duration,
    base_dir: PathBuf,
    http: Arc<ResilientClient>,
    reader: RwLock<Option<Reader<Vec<u8>>>>,
}

impl MmdbProvider {
    /// Creates the shell. `edition` is the database file stem (e.g.
    /// `GeoLite2-City`) used both to locate the file inside a downloaded
    /// archive and to name it in the active directory.
    pub fn new(
        name: impl Into<String>,
        edition: impl Into<String>,
        url: impl Into<String>,
        update_every: Duration,
        base_dir: impl Into<PathBuf>,
        http: Arc<ResilientClient>,
    ) -> Self {
        MmdbProvider {
            name: name.into(),
            edition: edition.into(),
            url: url.into(),
            update_every,
            base_dir: base_dir.into(),
            http,
            reader: RwLock::new(None),
        }
    }

    fn db_file_name(&self) -> String {
        format!("{}.mmdb", self.edition)
    }
}

#[async_trait]
impl Provider for MmdbProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn lookup(&self, ip: IpAddr) -> Result<ProviderLookupResult> {
        let guard = self.reader.read().await;
        let reader = guard
            .as_ref()
            .ok_or(TopographerError::DatabaseNotReady)?;

        let looked_up = reader
            .lookup(ip)
            .with_context(|| format!("cannot look up {ip}"))?;
        if !looked_up.has_data() {
            return Ok(ProviderLookupResult::default());
        }

        let city: maxminddb::geoip2::City = match looked_up
            .decode()
            .with_context(|| format!("cannot decode a record for {ip}"))?
        {
            Some(city) => city,
            None => return Ok(ProviderLookupResult::default()),
        };

        let country_code = city
            .country
            .iso_code
            .map(crate::countries::alpha2_to_code)
            .unwrap_or_default();
        let city_name = city
            .city
            .names
            .english
            .map(|name| name.to_string())
            .unwrap_or_default();

        Ok(ProviderLookupResult {
            country_code,
            city: city_name,
        })
    }

    async fn shutdown(&self) {
        *self.reader.write().await = None;
    }
}

#[async_trait]
impl OfflineProvider for MmdbProvider {
    fn update_every(&self) -> Duration {
        self.update_every
    }

    fn base_directory(&self) -> &Path {
        &self.base_dir
    }

    async fn open(&self, active_dir: &Path) -> Result<()> {
        let path = active_dir.join(self.db_file_name());
        let bytes = tokio::fs::read(&path)
            .await
            .with_context(|| format!("cannot read {}", path.display()))?;

        // Parse before swapping: a broken file must leave the previous
        // reader serving lookups.
        let reader = Reader::from_source(bytes)
            .with_context(|| format!("cannot parse {}", path.display()))?;

        *self.reader.write().await = Some(reader);

        Ok(())
    }

    async fn download(&self, scratch_dir: &Path) -> Result<()> {
        let request = self
            .http
            .request(reqwest::Method::GET, &self.url)
            .build()
            .context("cannot build a download request")?;

        let response = self
            .http
            .execute(request, &CancellationToken::new())
            .await
            .context("cannot download a database")?;

        let payload = response
            .bytes()
            .await
            .context("cannot read a database body")?;

        // MaxMind serves tar.gz archives; mirrors often serve the bare
        // file. Sniff the gzip magic rather than trusting the URL.
        let db_bytes = if payload.len() > 2 && payload[0] == 0x1f && payload[1] == 0x8b {
            extract_mmdb_from_tar_gz(&payload, &self.edition)?
        } else {
            payload.to_vec()
        };

        // The integrity check of the contract: never promote a tree the
        // reader cannot parse.
        Reader::from_source(db_bytes.clone()).context("downloaded database is not parseable")?;

        let path = scratch_dir.join(self.db_file_name());
        tokio::fs::write(&path, db_bytes)
            .await
            .with_context(|| format!("cannot write {}", path.display()))?;

        Ok(())
    }
}

/// Pulls `<edition>.mmdb` out of a MaxMind `tar.gz` archive.
fn extract_mmdb_from_tar_gz(tar_gz_bytes: &[u8], edition: &str) -> Result<Vec<u8>> {
    use std::io::Read;

    let decoder = flate2::read::GzDecoder::new(tar_gz_bytes);
    let mut archive = tar::Archive::new(decoder);

    let expected = format!("{edition}.mmdb");
    let entries = archive.entries().context("cannot read archive entries")?;

    for entry in entries {
        let mut entry = entry.context("cannot read an archive entry")?;
        let path = entry.path().context("cannot read an archive entry path")?;

        if path.file_name().map(|name| name.to_string_lossy() == expected.as_str()) == Some(true) {
            let mut bytes = Vec::new();
            entry
                .read_to_end(&mut bytes)
                .with_context(|| format!("cannot extract {expected}"))?;
            return Ok(bytes);
        }
    }

    anyhow::bail!("{expected} was not found in the archive")
}
