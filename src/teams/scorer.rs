//! Team scoring: a deterministic, side-effect-free sum of five components
//! (tier base, elemental resonance/reactions, nightsoul clustering, off-field
//! coverage, rule-table synergy). Constants are tuning parameters taken from
//! the default rule table; none of them is load-bearing for correctness.

use std::collections::HashMap;

use crate::data::catalog::CharacterCatalog;
use crate::data::character::{Character, Element, Role};
use crate::data::rules::RuleSet;

use Element::{Anemo, Cryo, Dendro, Electro, Geo, Hydro, Pyro};

/// Per-element bonus when the element appears at least twice.
const RESONANCE_BONUSES: &[(Element, i64)] = &[
    (Pyro, 20),
    (Cryo, 20),
    (Hydro, 15),
    (Electro, 15),
    (Geo, 15),
    (Dendro, 15),
    (Anemo, 10),
];

const VAPORIZE_BONUS: i64 = 25;
const MELT_BONUS: i64 = 30;
const FREEZE_BONUS: i64 = 8;
const OVERLOAD_BONUS: i64 = 15;
const HYPERBLOOM_BONUS: i64 = 50;
const BURGEON_BONUS: i64 = 20;
const BLOOM_BONUS: i64 = 15;
const QUICKEN_BONUS: i64 = 8;
const CRYSTALLIZE_BONUS: i64 = 5;
const SWIRL_BONUS: i64 = 25;
/// Anemo scatters Geo constructs and Dendro cores instead of amplifying them.
const ANEMO_INTERFERENCE_PENALTY: i64 = -50;

const PREFERRED_ELEMENT_BONUS: i64 = 25;
const PREFERRED_TEAMMATE_BONUS: i64 = 50;
const EXCLUDED_ELEMENT_PENALTY: i64 = -100;
const INCOMPATIBLE_PAIR_PENALTY: i64 = -100;

/// Ephemeral per-team score components; computed fresh per candidate and
/// discarded after ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreBreakdown {
    pub base: i64,
    pub resonance: i64,
    pub resource: i64,
    pub off_field: i64,
    pub synergy: i64,
}

impl ScoreBreakdown {
    pub fn total(&self) -> i64 {
        self.base + self.resonance + self.resource + self.off_field + self.synergy
    }
}

/// Per-element head-counts within one team.
#[derive(Debug, Default)]
struct ElementCounts(HashMap<Element, usize>);

impl ElementCounts {
    fn from_members(members: &[&Character]) -> Self {
        let mut counts = HashMap::new();
        for member in members {
            *counts.entry(member.element).or_insert(0) += 1;
        }
        ElementCounts(counts)
    }

    fn count(&self, element: Element) -> usize {
        self.0.get(&element).copied().unwrap_or(0)
    }
}

pub fn score_team(members: &[String], catalog: &CharacterCatalog, rules: &RuleSet) -> i64 {
    score_breakdown(members, catalog, rules).total()
}

pub fn score_breakdown(
    members: &[String],
    catalog: &CharacterCatalog,
    rules: &RuleSet,
) -> ScoreBreakdown {
    // Identifiers missing from the catalog contribute nothing anywhere.
    let resolved: Vec<&Character> = members.iter().filter_map(|id| catalog.get(id)).collect();
    let counts = ElementCounts::from_members(&resolved);

    ScoreBreakdown {
        base: resolved.iter().map(|c| c.tier_value()).sum(),
        resonance: resonance_score(&resolved, &counts, rules),
        resource: nightsoul_score(&resolved),
        off_field: off_field_score(&resolved),
        synergy: synergy_score(members, &resolved, &counts, rules),
    }
}

fn resonance_score(members: &[&Character], counts: &ElementCounts, rules: &RuleSet) -> i64 {
    let mut score = 0;

    for (element, bonus) in RESONANCE_BONUSES {
        if counts.count(*element) >= 2 {
            score += bonus;
        }
    }

    let pyro = counts.count(Pyro);
    let hydro = counts.count(Hydro);
    let cryo = counts.count(Cryo);
    let electro = counts.count(Electro);
    let geo = counts.count(Geo);
    let anemo = counts.count(Anemo);
    let dendro = counts.count(Dendro);

    if hydro > 0 && pyro > 0 {
        score += VAPORIZE_BONUS;
    }
    if cryo > 0 && pyro > 0 {
        score += MELT_BONUS;
    }
    if cryo > 0 && hydro > 0 {
        score += FREEZE_BONUS;
    }
    if electro > 0 && pyro > 0 {
        score += OVERLOAD_BONUS;
    }

    // Hyperbloom needs an off-field Dendro member and no Pyro competing for
    // the cores; when it triggers, Bloom and Quicken are folded into it
    // rather than stacked on top.
    let dendro_off_field = members.iter().any(|c| c.element == Dendro && c.off_field);
    let hyperbloom = electro > 0 && hydro > 0 && dendro_off_field && pyro == 0;
    if hyperbloom {
        score += HYPERBLOOM_BONUS;
    } else {
        if hydro > 0 && dendro > 0 {
            score += BLOOM_BONUS;
        }
        if electro > 0 && dendro > 0 {
            score += QUICKEN_BONUS;
        }
    }
    if hydro > 0 && dendro > 0 && pyro > 0 {
        score += BURGEON_BONUS;
    }

    let has_trigger = hydro > 0 || pyro > 0 || electro > 0;
    if geo > 0 && has_trigger {
        score += CRYSTALLIZE_BONUS;
    }
    if anemo > 0 && has_trigger {
        score += SWIRL_BONUS;
    }
    if anemo > 0 && (geo > 0 || dendro > 0) {
        score += ANEMO_INTERFERENCE_PENALTY;
    }

    score += conditional_adjustments(members, counts, rules);

    score
}

/// Evaluate the declarative per-character adjustment table against this team.
fn conditional_adjustments(
    members: &[&Character],
    counts: &ElementCounts,
    rules: &RuleSet,
) -> i64 {
    let mut delta = 0;
    for member in members {
        for adjustment in &rules.adjustments {
            if adjustment.character != member.id {
                continue;
            }
            if adjustment.support_only && !member.has_role(Role::Support) {
                continue;
            }
            if adjustment.predicate.evaluate(|element| counts.count(element)) {
                delta += adjustment.delta;
            }
        }
    }
    delta
}

/// Clustering bonus for the energy-free resource system: rewarded from two
/// members up, with a monotonic step table.
fn nightsoul_score(members: &[&Character]) -> i64 {
    let count = members.iter().filter(|c| c.nightsoul).count();
    match count {
        0 | 1 => 0,
        2 => 20,
        3 => 25,
        _ => 30,
    }
}

fn off_field_score(members: &[&Character]) -> i64 {
    let count = members.iter().filter(|c| c.off_field).count();
    match count {
        2 => 10,
        3 => 15,
        _ => 0,
    }
}

fn synergy_score(
    member_ids: &[String],
    members: &[&Character],
    counts: &ElementCounts,
    rules: &RuleSet,
) -> i64 {
    let mut score = 0;

    for member in members {
        let Some(rule) = rules.synergy_rule(&member.id) else {
            continue;
        };
        for element in &rule.preferred_elements {
            if counts.count(*element) > 0 {
                score += PREFERRED_ELEMENT_BONUS;
            }
        }
        for teammate in &rule.preferred_teammates {
            if member_ids.iter().any(|id| id == teammate) {
                score += PREFERRED_TEAMMATE_BONUS;
            }
        }
        for element in &rule.excluded_elements {
            if counts.count(*element) > 0 {
                score += EXCLUDED_ELEMENT_PENALTY;
            }
        }
    }

    // One penalty per qualifying (main, incompatible member) pair; the main
    // itself is exempt from its own rule.
    for (main_id, incompatible) in &rules.incompatible_supports {
        if !member_ids.iter().any(|id| id == main_id) {
            continue;
        }
        for id in member_ids {
            if id != main_id && incompatible.contains(id) {
                score += INCOMPATIBLE_PAIR_PENALTY;
            }
        }
    }

    score
}
