//! Role classification and tier ordering. A character can occupy several
//! buckets at once; each bucket is stably sorted by descending tier value,
//! so ties keep expansion order (deterministic for a fixed input, but not
//! otherwise specified).

use crate::data::catalog::CharacterCatalog;
use crate::data::character::Role;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoleBuckets {
    pub main_dps: Vec<String>,
    pub sub_dps: Vec<String>,
    pub support: Vec<String>,
}

/// Partition expanded, catalog-valid identifiers into role buckets.
pub fn classify_roles(expanded: &[String], catalog: &CharacterCatalog) -> RoleBuckets {
    let mut buckets = RoleBuckets::default();
    for id in expanded {
        let Some(character) = catalog.get(id) else {
            continue;
        };
        if character.has_role(Role::MainDps) {
            buckets.main_dps.push(id.clone());
        }
        if character.has_role(Role::SubDps) {
            buckets.sub_dps.push(id.clone());
        }
        if character.has_role(Role::Support) {
            buckets.support.push(id.clone());
        }
    }

    for bucket in [&mut buckets.main_dps, &mut buckets.sub_dps, &mut buckets.support] {
        sort_by_tier(bucket, catalog);
    }
    buckets
}

/// Stable descending sort by tier value. Identifiers absent from the catalog
/// rank lowest (value 0) rather than erroring.
pub fn tier_sort(identifiers: &[String], catalog: &CharacterCatalog) -> Vec<String> {
    let mut sorted = identifiers.to_vec();
    sort_by_tier(&mut sorted, catalog);
    sorted
}

fn sort_by_tier(identifiers: &mut [String], catalog: &CharacterCatalog) {
    identifiers.sort_by_key(|id| std::cmp::Reverse(catalog.tier_value(id)));
}
