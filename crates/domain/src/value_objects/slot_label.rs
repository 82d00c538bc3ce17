//! Spell-rank slot labels.
//!
//! Casting entries store their slots under keys like `slot0` .. `slot10`.
//! Other keys can share the same map, so a label that does not match is
//! simply not a rank slot.

use once_cell::sync::Lazy;
use regex_lite::Regex;

static SLOT_LABEL: Lazy<Option<Regex>> = Lazy::new(|| Regex::new(r"^slot(\d+)$").ok());

/// Extract the spell rank from a `slot<N>` label.
///
/// Returns `None` for any other shape, including ranks too large for `u32`.
pub fn parse_slot_rank(label: &str) -> Option<u32> {
    let re = SLOT_LABEL.as_ref()?;
    let caps = re.captures(label)?;
    caps.get(1)?.as_str().parse().ok()
}
