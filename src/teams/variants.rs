//! Traveler placeholder expansion. The generic `traveler` roster entry is
//! replaced by every concrete elemental variant present in the catalog; this
//! runs before role classification so role buckets only ever hold
//! catalog-valid identifiers.

use std::collections::HashSet;

use crate::data::catalog::CharacterCatalog;
use crate::data::character::normalize_name;

pub const TRAVELER: &str = "traveler";

/// One variant per element the traveler can attune to.
pub const TRAVELER_VARIANTS: [&str; 6] = [
    "traveler-anemo",
    "traveler-geo",
    "traveler-electro",
    "traveler-dendro",
    "traveler-hydro",
    "traveler-pyro",
];

/// Expand a raw roster into normalized, catalog-valid identifiers.
/// Unknown names are dropped silently (unusable, not an error); duplicates
/// collapse to the first occurrence, preserving input order.
pub fn expand_roster(roster: &[String], catalog: &CharacterCatalog) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut expanded = Vec::new();
    let mut push = |id: String| {
        if seen.insert(id.clone()) {
            expanded.push(id);
        }
    };

    for raw in roster {
        let id = normalize_name(raw);
        if id == TRAVELER {
            for variant in TRAVELER_VARIANTS {
                if catalog.contains(variant) {
                    push(variant.to_string());
                }
            }
        } else if catalog.contains(&id) {
            push(id);
        }
    }

    expanded
}
