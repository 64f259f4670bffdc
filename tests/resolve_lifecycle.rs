//! End-to-end tests over the full topographer lifecycle: offline providers
//! behind a real filesystem updater, mixed with online ones.

mod helpers;

use std::net::IpAddr;
use std::sync::Arc;
use std::time::Duration;

use tempfile::TempDir;
use tokio_util::sync::CancellationToken;

use helpers::{CannedOnline, CsvOffline};
use topographer::{ProviderHandle, Topographer, TopographerError, TARGET_DIR_PREFIX};

fn ip(s: &str) -> IpAddr {
    s.parse().unwrap()
}

fn target_dirs(base: &std::path::Path) -> Vec<String> {
    std::fs::read_dir(base)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .filter(|name| name.starts_with(TARGET_DIR_PREFIX))
        .collect()
}

#[tokio::test]
async fn test_offline_provider_serves_lookups_after_startup() {
    let base = TempDir::new().unwrap();
    let offline = CsvOffline::new(
        "csvdb",
        base.path(),
        Duration::from_secs(3600),
        vec![CsvOffline::payload(&[
            ("81.2.69.142", "RU", "Nizhniy Novgorod"),
            ("1.2.3.4", "NL", "Amsterdam"),
        ])],
    );

    let topographer = Topographer::new(vec![ProviderHandle::Offline(offline)], 16)
        .await
        .unwrap();

    let result = topographer
        .resolve(&CancellationToken::new(), ip("81.2.69.142"), &[])
        .await
        .unwrap();

    assert_eq!(result.country.alpha2_code, "RU");
    assert_eq!(result.country.common_name, "Russia");
    assert_eq!(result.city, "Nizhniy Novgorod");
    assert!(result.ok());

    // Startup promoted exactly one content-addressed directory.
    assert_eq!(target_dirs(base.path()).len(), 1);

    topographer.shutdown().await;
}

#[tokio::test]
async fn test_mixed_providers_consolidate_by_majority() {
    let base = TempDir::new().unwrap();
    let offline = CsvOffline::new(
        "csvdb",
        base.path(),
        Duration::from_secs(3600),
        vec![CsvOffline::payload(&[(
            "81.2.69.142",
            "RU",
            "Nizhny Novgorod",
        )])],
    );

    let topographer = Topographer::new(
        vec![
            ProviderHandle::Offline(offline),
            ProviderHandle::Online(CannedOnline::new("alpha", "RU", "Nizhniy Novgorod")),
            ProviderHandle::Online(CannedOnline::new("beta", "UA", "Kyiv")),
        ],
        16,
    )
    .await
    .unwrap();

    let result = topographer
        .resolve(&CancellationToken::new(), ip("81.2.69.142"), &[])
        .await
        .unwrap();

    // Two RU votes beat one UA vote, and the two phonetically equal
    // spellings pool against Kyiv.
    assert_eq!(result.country.alpha2_code, "RU");
    assert!(result.city == "Nizhniy Novgorod" || result.city == "Nizhny Novgorod");
    assert_eq!(result.details.len(), 3);

    topographer.shutdown().await;
}

#[tokio::test]
async fn test_background_update_hot_swaps_the_database() {
    let base = TempDir::new().unwrap();
    let offline = CsvOffline::new(
        "csvdb",
        base.path(),
        Duration::from_millis(100),
        vec![
            CsvOffline::payload(&[("1.2.3.4", "DE", "Berlin")]),
            CsvOffline::payload(&[("1.2.3.4", "FR", "Paris")]),
        ],
    );

    let topographer = Topographer::new(vec![ProviderHandle::Offline(offline)], 16)
        .await
        .unwrap();
    let cancel = CancellationToken::new();

    let before = topographer.resolve(&cancel, ip("1.2.3.4"), &[]).await.unwrap();
    assert_eq!(before.country.alpha2_code, "DE");

    // Wait out at least one update tick, then watch the verdict flip.
    let mut flipped = false;
    for _ in 0..50 {
        tokio::time::sleep(Duration::from_millis(100)).await;
        let after = topographer.resolve(&cancel, ip("1.2.3.4"), &[]).await.unwrap();
        if after.country.alpha2_code == "FR" {
            flipped = true;
            break;
        }
    }
    assert!(flipped, "background update must swap the database in");

    // Still exactly one target directory after the swap.
    assert_eq!(target_dirs(base.path()).len(), 1);

    let stats = topographer.usage_stats();
    assert!(
        stats[0].snapshot().0.is_some(),
        "updates must be recorded in usage stats"
    );

    topographer.shutdown().await;
}

#[tokio::test]
async fn test_restart_reuses_the_promoted_database() {
    let base = TempDir::new().unwrap();
    let payloads = vec![CsvOffline::payload(&[("1.2.3.4", "NL", "Amsterdam")])];

    {
        let offline = CsvOffline::new("csvdb", base.path(), Duration::from_secs(3600), payloads);
        let topographer = Topographer::new(vec![ProviderHandle::Offline(offline)], 16)
            .await
            .unwrap();
        topographer.shutdown().await;
    }

    let survivors = target_dirs(base.path());
    assert_eq!(survivors.len(), 1);

    // Second start has no payloads at all: it must come up from the
    // surviving directory without downloading.
    let offline = CsvOffline::new("csvdb", base.path(), Duration::from_secs(3600), Vec::new());
    let topographer = Topographer::new(vec![ProviderHandle::Offline(offline)], 16)
        .await
        .unwrap();

    let result = topographer
        .resolve(&CancellationToken::new(), ip("1.2.3.4"), &[])
        .await
        .unwrap();
    assert_eq!(result.city, "Amsterdam");

    assert_eq!(target_dirs(base.path()), survivors);

    topographer.shutdown().await;
}

#[tokio::test]
async fn test_construction_fails_when_first_download_fails() {
    let base = TempDir::new().unwrap();
    // No payloads and no surviving target: the mandatory first update
    // cannot succeed.
    let offline = CsvOffline::new("csvdb", base.path(), Duration::from_secs(3600), Vec::new());

    let err = Topographer::new(vec![ProviderHandle::Offline(offline)], 16)
        .await
        .unwrap_err();

    assert!(err.to_string().contains("csvdb"), "error was: {err:#}");
}

#[tokio::test]
async fn test_resolve_all_orders_and_consults_offline_provider() {
    let base = TempDir::new().unwrap();
    let offline = CsvOffline::new(
        "csvdb",
        base.path(),
        Duration::from_secs(3600),
        vec![CsvOffline::payload(&[
            ("1.1.1.1", "AU", "Sydney"),
            ("2.2.2.2", "FR", "Paris"),
            ("3.3.3.3", "JP", "Tokyo"),
        ])],
    );

    let topographer = Topographer::new(vec![ProviderHandle::Offline(offline)], 2)
        .await
        .unwrap();

    let ips = vec![ip("3.3.3.3"), ip("1.1.1.1"), ip("9.9.9.9"), ip("2.2.2.2")];
    let results = topographer
        .resolve_all(&CancellationToken::new(), &ips, &[])
        .await
        .unwrap();

    assert_eq!(results.len(), 4);
    assert_eq!(results[0].city, "Tokyo");
    assert_eq!(results[1].city, "Sydney");
    assert!(!results[2].ok(), "an unlisted IP yields an empty verdict");
    assert_eq!(results[3].city, "Paris");

    topographer.shutdown().await;
}

#[tokio::test]
async fn test_shutdown_rejects_further_resolves_and_is_idempotent() {
    let base = TempDir::new().unwrap();
    let offline = CsvOffline::new(
        "csvdb",
        base.path(),
        Duration::from_secs(3600),
        vec![CsvOffline::payload(&[("1.2.3.4", "NL", "Amsterdam")])],
    );

    let topographer = Topographer::new(
        vec![
            ProviderHandle::Offline(offline),
            ProviderHandle::Online(CannedOnline::new("alpha", "RU", "Moscow")),
        ],
        16,
    )
    .await
    .unwrap();

    topographer.shutdown().await;
    topographer.shutdown().await;

    let err = topographer
        .resolve(&CancellationToken::new(), ip("1.2.3.4"), &[])
        .await
        .unwrap_err();
    assert_eq!(
        err.downcast_ref::<TopographerError>(),
        Some(&TopographerError::Shutdown)
    );
}

#[tokio::test]
async fn test_usage_stats_cover_all_providers_sorted() {
    let base = TempDir::new().unwrap();
    let offline = CsvOffline::new(
        "csvdb",
        base.path(),
        Duration::from_secs(3600),
        vec![CsvOffline::payload(&[("1.2.3.4", "NL", "Amsterdam")])],
    );

    let topographer = Topographer::new(
        vec![
            ProviderHandle::Online(CannedOnline::new("zeta", "RU", "Moscow")),
            ProviderHandle::Offline(offline),
            ProviderHandle::Online(CannedOnline::new("alpha", "UA", "Kyiv")),
        ],
        16,
    )
    .await
    .unwrap();

    topographer
        .resolve(&CancellationToken::new(), ip("1.2.3.4"), &[])
        .await
        .unwrap();

    let stats = topographer.usage_stats();
    let names: Vec<&str> = stats.iter().map(|s| s.name()).collect();
    assert_eq!(names, vec!["alpha", "csvdb", "zeta"]);

    for stat in &stats {
        let (_, last_used, ok, fail) = stat.snapshot();
        assert!(last_used.is_some());
        assert_eq!(ok + fail, 1, "exactly one counter bump per lookup");
    }

    topographer.shutdown().await;
}
