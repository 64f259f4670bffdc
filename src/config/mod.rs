//! Command-line options.

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::http::DEFAULT_USER_AGENT;
use crate::topographer::DEFAULT_WORKER_POOL_SIZE;

/// Logging verbosity.
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Command-line options of the topographer daemon.
#[derive(Debug, Parser)]
#[command(about = "Lenient IP geolocation aggregator", version)]
pub struct Opt {
    /// Address to serve the HTTP API on
    #[arg(long, default_value = "127.0.0.1:8000")]
    pub listen: SocketAddr,

    /// Worker pool capacity: how many IPs are resolved concurrently
    #[arg(long, default_value_t = DEFAULT_WORKER_POOL_SIZE)]
    pub worker_pool_size: usize,

    /// Log level
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,

    /// User agent for outbound provider calls
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Timeout for a single outbound HTTP request, in seconds
    #[arg(long, default_value_t = 10)]
    pub http_timeout: u64,

    /// Outbound rate limiter: milliseconds between replenished tokens
    #[arg(long, default_value_t = 1000)]
    pub rate_limit_interval_ms: u64,

    /// Outbound rate limiter: burst size
    #[arg(long, default_value_t = 10)]
    pub rate_limit_burst: u32,

    /// URL of an .mmdb database (or MaxMind tar.gz archive) to serve as an
    /// offline provider; omit to disable
    #[arg(long)]
    pub mmdb_url: Option<String>,

    /// Database edition inside the archive, e.g. GeoLite2-City
    #[arg(long, default_value = "GeoLite2-City")]
    pub mmdb_edition: String,

    /// Base directory the offline database is maintained under
    #[arg(long, default_value = "data/mmdb")]
    pub mmdb_dir: PathBuf,

    /// How often the offline database is refreshed, in hours
    #[arg(long, default_value_t = 24)]
    pub mmdb_update_every_hours: u64,

    /// ipinfo.io API token; enables the ipinfo provider
    #[arg(long, env = "IPINFO_TOKEN")]
    pub ipinfo_token: Option<String>,
}
