//! Concrete provider shells.
//!
//! These stay deliberately thin: the interesting machinery (updating,
//! resilience, consolidation) lives in the core, and a vendor integration
//! only has to satisfy the [`crate::provider`] contract. Shipped here are
//! one offline shell reading MaxMind-format databases and one online shell
//! for the ipinfo.io API.

mod ipinfo;
mod mmdb;

pub use ipinfo::IpinfoProvider;
pub use mmdb::MmdbProvider;
