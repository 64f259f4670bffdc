//! Shared scripted providers for integration tests.

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::net::IpAddr;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tokio::sync::RwLock;

use topographer::countries::alpha2_to_code;
use topographer::{OfflineProvider, Provider, ProviderLookupResult};

/// Online provider answering every lookup with one canned `(country, city)`.
pub struct CannedOnline {
    name: &'static str,
    country: &'static str,
    city: &'static str,
}

impl CannedOnline {
    pub fn new(name: &'static str, country: &'static str, city: &'static str) -> Arc<Self> {
        Arc::new(CannedOnline {
            name,
            country,
            city,
        })
    }
}

#[async_trait]
impl Provider for CannedOnline {
    fn name(&self) -> &str {
        self.name
    }

    async fn lookup(&self, _ip: IpAddr) -> Result<ProviderLookupResult> {
        Ok(ProviderLookupResult {
            country_code: alpha2_to_code(self.country),
            city: self.city.to_string(),
        })
    }
}

/// Offline provider backed by a tiny CSV database on disk.
///
/// `download` writes the next scripted payload (the last one repeats) into
/// the scratch directory; `open` parses the promoted file into an in-memory
/// map behind a reader/writer lock, the same shape a real database-backed
/// provider has.
pub struct CsvOffline {
    name: &'static str,
    base: PathBuf,
    update_every: Duration,
    payloads: Mutex<VecDeque<String>>,
    table: RwLock<Option<HashMap<IpAddr, (String, String)>>>,
}

impl CsvOffline {
    pub fn new(
        name: &'static str,
        base: &Path,
        update_every: Duration,
        payloads: Vec<String>,
    ) -> Arc<Self> {
        Arc::new(CsvOffline {
            name,
            base: base.to_path_buf(),
            update_every,
            payloads: Mutex::new(payloads.into()),
            table: RwLock::new(None),
        })
    }

    /// A payload mapping each `(ip, country, city)` triple to one CSV row.
    pub fn payload(rows: &[(&str, &str, &str)]) -> String {
        rows.iter()
            .map(|(ip, country, city)| format!("{ip},{country},{city}"))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[async_trait]
impl Provider for CsvOffline {
    fn name(&self) -> &str {
        self.name
    }

    async fn lookup(&self, ip: IpAddr) -> Result<ProviderLookupResult> {
        let table = self.table.read().await;
        let table = table
            .as_ref()
            .ok_or(topographer::TopographerError::DatabaseNotReady)?;

        Ok(table
            .get(&ip)
            .map(|(country, city)| ProviderLookupResult {
                country_code: alpha2_to_code(country),
                city: city.clone(),
            })
            .unwrap_or_default())
    }

    async fn shutdown(&self) {
        *self.table.write().await = None;
    }
}

#[async_trait]
impl OfflineProvider for CsvOffline {
    fn update_every(&self) -> Duration {
        self.update_every
    }

    fn base_directory(&self) -> &Path {
        &self.base
    }

    async fn open(&self, active_dir: &Path) -> Result<()> {
        let raw = tokio::fs::read_to_string(active_dir.join("db.csv"))
            .await
            .context("cannot read db.csv")?;

        let mut table = HashMap::new();
        for line in raw.lines().filter(|line| !line.trim().is_empty()) {
            let mut fields = line.splitn(3, ',');
            let ip: IpAddr = fields
                .next()
                .context("missing ip field")?
                .trim()
                .parse()
                .context("malformed ip field")?;
            let country = fields.next().unwrap_or_default().trim().to_string();
            let city = fields.next().unwrap_or_default().trim().to_string();
            table.insert(ip, (country, city));
        }

        *self.table.write().await = Some(table);
        Ok(())
    }

    async fn download(&self, scratch_dir: &Path) -> Result<()> {
        let payload = {
            let mut payloads = self.payloads.lock().unwrap();
            if payloads.len() > 1 {
                payloads.pop_front().unwrap()
            } else {
                payloads
                    .front()
                    .cloned()
                    .context("scripted download failure")?
            }
        };

        tokio::fs::write(scratch_dir.join("db.csv"), payload)
            .await
            .context("cannot write db.csv")?;
        Ok(())
    }
}
