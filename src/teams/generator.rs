//! Team enumeration: per Main-DPS candidate, three fixed 4-slot templates
//! are filled combinatorially, deduplicated against a per-call seen set,
//! scored, capped per candidate, pooled, and globally ranked. When no
//! template-valid team exists a single tier-sorted fallback quartet is
//! produced instead.

use std::collections::HashSet;

use serde::Serialize;

use crate::data::catalog::CharacterCatalog;
use crate::data::rules::RuleSet;
use crate::teams::roles::{classify_roles, tier_sort, RoleBuckets};
use crate::teams::scorer::score_team;
use crate::teams::variants::expand_roster;

pub const TEAM_SIZE: usize = 4;

/// Which role-slot template produced a team. Fallback marks the tier-sorted
/// quartet emitted when no template was satisfiable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TeamShape {
    /// Main DPS + 2 Sub-DPS + 1 Support.
    DoubleSubDps,
    /// Main DPS + 1 Sub-DPS + 2 Supports.
    DoubleSupport,
    /// Main DPS + 3 Supports (hyper-carry).
    TripleSupport,
    Fallback,
}

/// A recommended quartet. Members keep slot order: main first, then the
/// filled slots in template order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Team {
    pub members: Vec<String>,
    pub score: i64,
    pub shape: TeamShape,
}

impl Team {
    pub fn is_fallback(&self) -> bool {
        self.shape == TeamShape::Fallback
    }
}

#[derive(Debug, Clone, Copy)]
pub struct GeneratorConfig {
    /// Global cap on returned teams.
    pub result_count: usize,
    /// Cap on teams surviving per Main-DPS candidate before pooling.
    pub per_main_dps_cap: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig { result_count: 6, per_main_dps_cap: 2 }
    }
}

/// Generate ranked teams for a raw roster. Deterministic for fixed inputs;
/// holds no state beyond this call. Zero caps yield an empty result.
pub fn generate_teams(
    roster: &[String],
    catalog: &CharacterCatalog,
    rules: &RuleSet,
    config: &GeneratorConfig,
) -> Vec<Team> {
    if config.result_count == 0 || config.per_main_dps_cap == 0 {
        return Vec::new();
    }

    let expanded = expand_roster(roster, catalog);
    let buckets = classify_roles(&expanded, catalog);

    let mut seen: HashSet<Vec<String>> = HashSet::new();
    let mut pooled: Vec<Team> = Vec::new();

    for main in &buckets.main_dps {
        let mut teams_for_main =
            enumerate_for_main(main, &buckets, catalog, rules, &mut seen);
        sort_by_score(&mut teams_for_main);
        teams_for_main.truncate(config.per_main_dps_cap);
        pooled.extend(teams_for_main);
    }

    sort_by_score(&mut pooled);
    pooled.truncate(config.result_count);

    if pooled.is_empty() && expanded.len() >= TEAM_SIZE {
        let members: Vec<String> =
            tier_sort(&expanded, catalog).into_iter().take(TEAM_SIZE).collect();
        let score = score_team(&members, catalog, rules);
        pooled.push(Team { members, score, shape: TeamShape::Fallback });
    }

    pooled
}

/// All template-valid, not-yet-seen teams for one Main-DPS candidate.
fn enumerate_for_main(
    main: &str,
    buckets: &RoleBuckets,
    catalog: &CharacterCatalog,
    rules: &RuleSet,
    seen: &mut HashSet<Vec<String>>,
) -> Vec<Team> {
    let subs: Vec<&str> =
        buckets.sub_dps.iter().map(String::as_str).filter(|id| *id != main).collect();
    let supports: Vec<&str> =
        buckets.support.iter().map(String::as_str).filter(|id| *id != main).collect();

    let mut teams = Vec::new();
    let mut push = |members: Vec<String>, shape: TeamShape| {
        let mut key = members.clone();
        key.sort();
        if seen.insert(key) {
            let score = score_team(&members, catalog, rules);
            teams.push(Team { members, score, shape });
        }
    };

    // Main + 2 Sub-DPS + 1 Support.
    for (i, &s1) in subs.iter().enumerate() {
        for &s2 in subs.iter().skip(i + 1) {
            for &support in &supports {
                if support == s1 || support == s2 {
                    continue;
                }
                push(to_members(&[main, s1, s2, support]), TeamShape::DoubleSubDps);
            }
        }
    }

    // Main + 1 Sub-DPS + 2 Supports.
    for &sub in &subs {
        for (i, &p1) in supports.iter().enumerate() {
            if p1 == sub {
                continue;
            }
            for &p2 in supports.iter().skip(i + 1) {
                if p2 == sub {
                    continue;
                }
                push(to_members(&[main, sub, p1, p2]), TeamShape::DoubleSupport);
            }
        }
    }

    // Main + 3 Supports (hyper-carry).
    for (i, &p1) in supports.iter().enumerate() {
        for (j, &p2) in supports.iter().enumerate().skip(i + 1) {
            for &p3 in supports.iter().skip(j + 1) {
                push(to_members(&[main, p1, p2, p3]), TeamShape::TripleSupport);
            }
        }
    }

    teams
}

fn to_members(ids: &[&str]) -> Vec<String> {
    ids.iter().map(|id| id.to_string()).collect()
}

/// Descending by score; stable, so equal scores keep enumeration order.
fn sort_by_score(teams: &mut [Team]) {
    teams.sort_by(|left, right| right.score.cmp(&left.score));
}

#[cfg(test)]
mod tests {
    use super::{generate_teams, GeneratorConfig, TeamShape};
    use crate::data::catalog::CharacterCatalog;
    use crate::data::character::{Character, Element, Role, Tier};
    use crate::data::rules::RuleSet;

    fn character(id: &str, roles: &[Role], tier: Tier, element: Element) -> Character {
        Character {
            id: id.to_string(),
            roles: roles.to_vec(),
            tier,
            element,
            nightsoul: false,
            off_field: false,
        }
    }

    fn catalog() -> CharacterCatalog {
        CharacterCatalog::from_characters(vec![
            character("hu-tao", &[Role::MainDps], Tier::SS, Element::Pyro),
            character("xingqiu", &[Role::SubDps], Tier::S, Element::Hydro),
            character("yelan", &[Role::SubDps], Tier::SS, Element::Hydro),
            character("fischl", &[Role::SubDps, Role::Support], Tier::A, Element::Electro),
            character("bennett", &[Role::Support], Tier::SS, Element::Pyro),
            character("zhongli", &[Role::Support], Tier::SS, Element::Geo),
        ])
    }

    fn roster(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    fn all_ids() -> Vec<String> {
        roster(&["hu-tao", "xingqiu", "yelan", "fischl", "bennett", "zhongli"])
    }

    #[test]
    fn members_are_distinct_within_each_team() {
        let teams = generate_teams(
            &all_ids(),
            &catalog(),
            &RuleSet::default(),
            &GeneratorConfig { result_count: 50, per_main_dps_cap: 50 },
        );
        assert!(!teams.is_empty());
        for team in &teams {
            let mut members = team.members.clone();
            members.sort();
            members.dedup();
            assert_eq!(members.len(), 4, "team has a duplicate member: {:?}", team.members);
        }
    }

    #[test]
    fn dual_role_character_fills_only_one_slot() {
        // fischl is both Sub-DPS and Support; no team may contain her twice.
        let teams = generate_teams(
            &roster(&["hu-tao", "fischl", "xingqiu", "bennett"]),
            &catalog(),
            &RuleSet::default(),
            &GeneratorConfig { result_count: 50, per_main_dps_cap: 50 },
        );
        for team in &teams {
            let fischl_count = team.members.iter().filter(|m| *m == "fischl").count();
            assert!(fischl_count <= 1);
        }
    }

    #[test]
    fn teams_are_sorted_descending_by_score() {
        let teams = generate_teams(
            &all_ids(),
            &catalog(),
            &RuleSet::default(),
            &GeneratorConfig { result_count: 20, per_main_dps_cap: 20 },
        );
        for pair in teams.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
    }

    #[test]
    fn zero_caps_yield_empty_result() {
        let none = generate_teams(
            &all_ids(),
            &catalog(),
            &RuleSet::default(),
            &GeneratorConfig { result_count: 0, per_main_dps_cap: 2 },
        );
        assert!(none.is_empty());
        let none = generate_teams(
            &all_ids(),
            &catalog(),
            &RuleSet::default(),
            &GeneratorConfig { result_count: 6, per_main_dps_cap: 0 },
        );
        assert!(none.is_empty());
    }

    #[test]
    fn fallback_team_is_tier_sorted_quartet() {
        // Four supports: no template is satisfiable.
        let catalog = CharacterCatalog::from_characters(vec![
            character("diona", &[Role::Support], Tier::A, Element::Cryo),
            character("bennett", &[Role::Support], Tier::SS, Element::Pyro),
            character("gorou", &[Role::Support], Tier::B, Element::Geo),
            character("zhongli", &[Role::Support], Tier::SS, Element::Geo),
        ]);
        let teams = generate_teams(
            &roster(&["diona", "bennett", "gorou", "zhongli"]),
            &catalog,
            &RuleSet::default(),
            &GeneratorConfig::default(),
        );
        assert_eq!(teams.len(), 1);
        assert_eq!(teams[0].shape, TeamShape::Fallback);
        assert_eq!(teams[0].members, vec!["bennett", "zhongli", "diona", "gorou"]);
    }

    #[test]
    fn template_shapes_match_role_slots() {
        let catalog = catalog();
        let teams = generate_teams(
            &all_ids(),
            &catalog,
            &RuleSet::default(),
            &GeneratorConfig { result_count: 100, per_main_dps_cap: 100 },
        );
        for team in &teams {
            let roles: Vec<&Character> =
                team.members.iter().filter_map(|id| catalog.get(id)).collect();
            assert_eq!(roles.len(), 4);
            assert!(roles[0].is_main_dps());
            match team.shape {
                TeamShape::DoubleSubDps => {
                    assert!(roles[1].is_sub_dps() && roles[2].is_sub_dps());
                    assert!(roles[3].is_support());
                }
                TeamShape::DoubleSupport => {
                    assert!(roles[1].is_sub_dps());
                    assert!(roles[2].is_support() && roles[3].is_support());
                }
                TeamShape::TripleSupport => {
                    assert!(roles[1].is_support() && roles[2].is_support() && roles[3].is_support());
                }
                TeamShape::Fallback => panic!("template enumeration produced a fallback"),
            }
        }
    }
}
