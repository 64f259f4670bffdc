//! Majority-vote consolidation of per-provider answers.

use std::collections::{BTreeMap, HashMap};
use std::net::IpAddr;

use rphonetic::{DoubleMetaphone, Encoder};

use crate::countries::CountryCode;

use super::{ResolveResult, ResolveResultDetail, ResolvedCountry};

/// Reduces the raw per-provider details for one IP into a single verdict.
///
/// The country is elected by plain vote count over details with a known
/// country; the city is elected among the winning country's voters, with
/// Double Metaphone folding so that transliteration variants of the same
/// city ("Nizhniy Novgorod" / "Nizhny Novgorod") pool their votes. Ties
/// break toward the smaller country id and the smaller phonetic key, which
/// keeps the verdict a pure function of the detail multiset.
pub fn consolidate(ip: IpAddr, details: Vec<ResolveResultDetail>) -> ResolveResult {
    let mut votes: HashMap<CountryCode, u32> = HashMap::new();

    for detail in &details {
        if detail.country_code.known() {
            *votes.entry(detail.country_code).or_default() += 1;
        }
    }

    let elected_country = votes
        .into_iter()
        .max_by_key(|&(code, count)| (count, std::cmp::Reverse(code)))
        .map(|(code, _)| code);

    let city = elected_country
        .map(|country| elect_city(&details, country))
        .unwrap_or_default();

    let country = elected_country
        .and_then(|code| code.details())
        .map(|meta| ResolvedCountry {
            alpha2_code: meta.alpha2.to_string(),
            alpha3_code: meta.alpha3.to_string(),
            common_name: meta.common_name.to_string(),
            official_name: meta.official_name.to_string(),
        })
        .unwrap_or_default();

    ResolveResult {
        ip,
        country,
        city,
        details,
    }
}

struct CityBucket {
    count: u32,
    // Later spellings of the same phonetic key overwrite earlier ones; any
    // spelling from the bucket is an acceptable verdict.
    spelling: String,
}

fn elect_city(details: &[ResolveResultDetail], country: CountryCode) -> String {
    let encoder = DoubleMetaphone::default();
    let mut buckets: BTreeMap<String, CityBucket> = BTreeMap::new();

    for detail in details {
        if detail.country_code != country || detail.city.is_empty() {
            continue;
        }

        let key = encoder.encode(&detail.city);
        buckets
            .entry(key)
            .and_modify(|bucket| {
                bucket.count += 1;
                bucket.spelling = detail.city.clone();
            })
            .or_insert_with(|| CityBucket {
                count: 1,
                spelling: detail.city.clone(),
            });
    }

    // BTreeMap iteration is key-ordered, and a strict `>` keeps the first
    // (smallest) key on ties.
    let mut winner: Option<&CityBucket> = None;
    for bucket in buckets.values() {
        if winner.map(|best| bucket.count > best.count).unwrap_or(true) {
            winner = Some(bucket);
        }
    }

    winner.map(|bucket| bucket.spelling.clone()).unwrap_or_default()
}
