//! Country code interning and normalization.
//!
//! Provider answers arrive as free-form alpha-2 (sometimes alpha-3) strings
//! with a handful of legacy aliases still in circulation in downloadable IP
//! databases. This module folds them into compact [`CountryCode`] ids backed
//! by a static ISO-3166 table, so consolidation can group votes by a cheap
//! `Copy` key instead of strings.

mod table;

use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

use serde::de::{self, Deserializer, Visitor};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

/// Immutable metadata for one ISO-3166 country.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountryMeta {
    /// 2-letter ISO-3166 code, e.g. `RU`.
    pub alpha2: &'static str,
    /// 3-letter ISO-3166 code, e.g. `RUS`.
    pub alpha3: &'static str,
    /// The everyday name, e.g. `Russia`.
    pub common_name: &'static str,
    /// The name used in official papers, e.g. `Russian Federation`.
    pub official_name: &'static str,
}

/// Interned country id. `0` means "unknown / no opinion"; any other value
/// round-trips losslessly to an uppercase alpha-2 code.
///
/// One byte is enough for the ISO-3166 set, and lookups stay a plain array
/// index, which matters because consolidation touches these on every vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct CountryCode(u8);

struct Registry {
    by_alpha2: HashMap<&'static str, CountryCode>,
    by_alpha3: HashMap<&'static str, CountryCode>,
}

// Immutable after first touch; shared freely across threads (same pattern as
// the process-wide reader caches elsewhere in the stack).
static REGISTRY: LazyLock<Registry> = LazyLock::new(|| {
    debug_assert!(table::COUNTRIES.len() < u8::MAX as usize);

    let mut by_alpha2 = HashMap::with_capacity(table::COUNTRIES.len());
    let mut by_alpha3 = HashMap::with_capacity(table::COUNTRIES.len());

    for (i, meta) in table::COUNTRIES.iter().enumerate() {
        let code = CountryCode(i as u8 + 1);
        by_alpha2.insert(meta.alpha2, code);
        by_alpha3.insert(meta.alpha3, code);
    }

    Registry {
        by_alpha2,
        by_alpha3,
    }
});

/// Maps an alpha-2 string to its legacy-free form.
///
/// The aliases come from the comment blocks of the downloadable CSV
/// databases: `ZZ`/`AP`/`EU` are reserved blocks without a country, `YU`,
/// `FX` and `UK` are codes that predate the current ISO assignments.
/// Anything that is not exactly two characters maps to the empty string.
pub fn normalize_alpha2(alpha2: &str) -> String {
    if alpha2.len() != 2 {
        return String::new();
    }

    let upper = alpha2.to_ascii_uppercase();

    match upper.as_str() {
        "ZZ" | "AP" | "EU" => String::new(),
        "YU" => "CS".to_string(),
        "FX" => "FR".to_string(),
        "UK" => "GB".to_string(),
        _ => upper,
    }
}

/// Interns a (possibly aliased) alpha-2 string. Unknown input maps to
/// [`CountryCode::UNKNOWN`].
pub fn alpha2_to_code(alpha2: &str) -> CountryCode {
    let normalized = normalize_alpha2(alpha2);
    REGISTRY
        .by_alpha2
        .get(normalized.as_str())
        .copied()
        .unwrap_or(CountryCode::UNKNOWN)
}

/// Interns an alpha-3 string. Unknown input maps to [`CountryCode::UNKNOWN`].
pub fn alpha3_to_code(alpha3: &str) -> CountryCode {
    if alpha3.len() != 3 {
        return CountryCode::UNKNOWN;
    }

    let upper = alpha3.to_ascii_uppercase();
    REGISTRY
        .by_alpha3
        .get(upper.as_str())
        .copied()
        .unwrap_or(CountryCode::UNKNOWN)
}

impl CountryCode {
    /// The absent / no-opinion code.
    pub const UNKNOWN: CountryCode = CountryCode(0);

    /// True for every code except [`CountryCode::UNKNOWN`].
    pub fn known(self) -> bool {
        self.0 != 0
    }

    /// The uppercase alpha-2 code, or `""` for the unknown code.
    pub fn alpha2(self) -> &'static str {
        self.details().map(|d| d.alpha2).unwrap_or("")
    }

    /// Full country metadata, `None` for the unknown code.
    pub fn details(self) -> Option<&'static CountryMeta> {
        if self.0 == 0 {
            None
        } else {
            table::COUNTRIES.get(self.0 as usize - 1)
        }
    }
}

impl fmt::Display for CountryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.alpha2())
    }
}

impl Serialize for CountryCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.alpha2())
    }
}

impl<'de> Deserialize<'de> for CountryCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct CodeVisitor;

        impl<'de> Visitor<'de> for CodeVisitor {
            type Value = CountryCode;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("an ISO-3166 alpha-2 country code")
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<CountryCode, E> {
                if value.is_empty() {
                    return Ok(CountryCode::UNKNOWN);
                }

                let code = alpha2_to_code(value);
                if code.known() {
                    Ok(code)
                } else {
                    Err(E::custom(format!("incorrect country code {value:?}")))
                }
            }
        }

        deserializer.deserialize_str(CodeVisitor)
    }
}
