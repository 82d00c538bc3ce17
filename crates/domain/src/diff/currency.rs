//! Currency diff.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use serde_json::{Map, Value};

use crate::events::ChangeEvent;
use crate::value_objects::normalize_opt;

/// Coin denominations, highest first.
const DENOMINATIONS: [&str; 4] = ["pp", "gp", "sp", "cp"];

/// One event per denomination whose normalized amount changed.
///
/// Keys missing on either side count as zero. Events are ordered by
/// denomination (`pp`, `gp`, `sp`, `cp`), then any other keys by name.
pub fn diff_currency(
    actor: &str,
    old: &Map<String, Value>,
    new: &Map<String, Value>,
) -> Vec<ChangeEvent> {
    let unique: BTreeSet<&String> = old.keys().chain(new.keys()).collect();
    let mut keys: Vec<&String> = unique.into_iter().collect();
    keys.sort_by(|a, b| compare_denominations(a, b));

    keys.into_iter()
        .filter_map(|key| {
            let delta = normalize_opt(new.get(key)) - normalize_opt(old.get(key));
            (delta != 0.0).then(|| ChangeEvent::CurrencyChanged {
                actor: actor.to_string(),
                denomination: key.clone(),
                delta,
            })
        })
        .collect()
}

fn compare_denominations(a: &str, b: &str) -> Ordering {
    let rank = |key: &str| DENOMINATIONS.iter().position(|d| *d == key);
    match (rank(a), rank(b)) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}
