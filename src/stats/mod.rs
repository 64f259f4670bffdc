//! Per-provider usage counters.
//!
//! Operational visibility into which providers are pulling their weight:
//! when each one was last consulted, when its database was last refreshed,
//! and how its lookups split between success and failure.

use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

#[derive(Debug, Default)]
struct Counters {
    last_updated: Option<DateTime<Utc>>,
    last_used: Option<DateTime<Utc>>,
    success_count: u64,
    failure_count: u64,
}

/// Counters and timestamps for a single provider.
///
/// Mutation happens on every lookup, so the critical section is a handful of
/// stores under a plain mutex; there is no cross-provider contention because
/// each provider owns its own instance.
#[derive(Debug)]
pub struct UsageStats {
    name: String,
    counters: Mutex<Counters>,
}

impl UsageStats {
    /// Creates zeroed stats for the named provider.
    pub fn new(name: impl Into<String>) -> Self {
        UsageStats {
            name: name.into(),
            counters: Mutex::new(Counters::default()),
        }
    }

    /// The provider this instance belongs to.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Stamps `last_used` and bumps exactly one of the two counters.
    pub fn notify_used(&self, success: bool) {
        let now = Utc::now();
        let mut counters = self.counters.lock().expect("usage stats lock poisoned");

        counters.last_used = Some(now);
        if success {
            counters.success_count += 1;
        } else {
            counters.failure_count += 1;
        }
    }

    /// Stamps `last_updated`; called after a successful database refresh.
    pub fn notify_updated(&self) {
        let now = Utc::now();
        let mut counters = self.counters.lock().expect("usage stats lock poisoned");
        counters.last_updated = Some(now);
    }

    /// Point-in-time copy of the counters: `(last_updated, last_used,
    /// success_count, failure_count)`.
    pub fn snapshot(
        &self,
    ) -> (
        Option<DateTime<Utc>>,
        Option<DateTime<Utc>>,
        u64,
        u64,
    ) {
        let counters = self.counters.lock().expect("usage stats lock poisoned");
        (
            counters.last_updated,
            counters.last_used,
            counters.success_count,
            counters.failure_count,
        )
    }
}

impl Serialize for UsageStats {
    // Absent timestamps serialize as 0, not null, so downstream dashboards
    // can treat the field as a plain unix integer.
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let (last_updated, last_used, success_count, failure_count) = self.snapshot();

        let mut state = serializer.serialize_struct("UsageStats", 5)?;
        state.serialize_field("name", &self.name)?;
        state.serialize_field(
            "last_updated",
            &last_updated.map(|t| t.timestamp()).unwrap_or(0),
        )?;
        state.serialize_field("last_used", &last_used.map(|t| t.timestamp()).unwrap_or(0))?;
        state.serialize_field("success_count", &success_count)?;
        state.serialize_field("failure_count", &failure_count)?;
        state.end()
    }
}
