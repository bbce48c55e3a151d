use std::collections::HashSet;

use teyvat::data::catalog::CharacterCatalog;
use teyvat::data::character::{Character, Element, Role, Tier};
use teyvat::data::rules::RuleSet;
use teyvat::teams::roles::tier_sort;
use teyvat::teams::variants::expand_roster;
use teyvat::teams::{generate_teams, GeneratorConfig, TeamShape};

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

/// Two main-DPS candidates, a handful of sub-DPS and supports, one
/// dual-role character.
fn fixture_catalog() -> CharacterCatalog {
    CharacterCatalog::from_characters(vec![
        character("hu-tao", &[Role::MainDps], Tier::SS, Element::Pyro),
        character("keqing", &[Role::MainDps], Tier::A, Element::Electro),
        character("xingqiu", &[Role::SubDps], Tier::S, Element::Hydro),
        character("yelan", &[Role::SubDps], Tier::SS, Element::Hydro),
        character("xiangling", &[Role::SubDps], Tier::S, Element::Pyro),
        character("fischl", &[Role::SubDps, Role::Support], Tier::A, Element::Electro),
        character("bennett", &[Role::Support], Tier::SS, Element::Pyro),
        character("zhongli", &[Role::Support], Tier::S, Element::Geo),
        character("diona", &[Role::Support], Tier::B, Element::Cryo),
    ])
}

fn fixture_roster() -> Vec<String> {
    [
        "hu-tao", "keqing", "xingqiu", "yelan", "xiangling", "fischl", "bennett", "zhongli",
        "diona",
    ]
    .iter()
    .map(|n| n.to_string())
    .collect()
}

#[test]
fn generation_is_deterministic() {
    let catalog = fixture_catalog();
    let rules = RuleSet::default();
    let config = GeneratorConfig::default();

    let first = generate_teams(&fixture_roster(), &catalog, &rules, &config);
    let second = generate_teams(&fixture_roster(), &catalog, &rules, &config);

    let first_json = serde_json::to_string(&first).expect("teams should serialize");
    let second_json = serde_json::to_string(&second).expect("teams should serialize");
    assert_eq!(first_json, second_json);
}

#[test]
fn no_two_teams_share_a_member_set() {
    let teams = generate_teams(
        &fixture_roster(),
        &fixture_catalog(),
        &RuleSet::default(),
        &GeneratorConfig { result_count: 100, per_main_dps_cap: 100 },
    );
    let mut seen = HashSet::new();
    for team in &teams {
        let mut key = team.members.clone();
        key.sort();
        assert!(seen.insert(key), "duplicate member set: {:?}", team.members);
    }
}

#[test]
fn every_generated_team_matches_its_template() {
    let catalog = fixture_catalog();
    let teams = generate_teams(
        &fixture_roster(),
        &catalog,
        &RuleSet::default(),
        &GeneratorConfig { result_count: 100, per_main_dps_cap: 100 },
    );
    assert!(!teams.is_empty());
    for team in &teams {
        assert_eq!(team.members.len(), 4);
        let resolved: Vec<&Character> =
            team.members.iter().map(|id| catalog.get(id).expect("member in catalog")).collect();
        assert!(resolved[0].is_main_dps(), "slot 0 must be a main DPS");
        match team.shape {
            TeamShape::DoubleSubDps => {
                assert!(resolved[1].is_sub_dps() && resolved[2].is_sub_dps());
                assert!(resolved[3].is_support());
            }
            TeamShape::DoubleSupport => {
                assert!(resolved[1].is_sub_dps());
                assert!(resolved[2].is_support() && resolved[3].is_support());
            }
            TeamShape::TripleSupport => {
                assert!(resolved[1].is_support());
                assert!(resolved[2].is_support());
                assert!(resolved[3].is_support());
            }
            TeamShape::Fallback => panic!("fixture roster should satisfy templates"),
        }
    }
}

#[test]
fn per_main_dps_cap_is_respected() {
    let cap = 2;
    let teams = generate_teams(
        &fixture_roster(),
        &fixture_catalog(),
        &RuleSet::default(),
        &GeneratorConfig { result_count: 100, per_main_dps_cap: cap },
    );
    let mut per_main: std::collections::HashMap<&str, usize> = std::collections::HashMap::new();
    for team in &teams {
        *per_main.entry(team.members[0].as_str()).or_insert(0) += 1;
    }
    for (main, count) in per_main {
        assert!(count <= cap, "main '{main}' kept {count} teams, cap {cap}");
    }
}

#[test]
fn result_count_bounds_output() {
    for count in [1, 3, 6] {
        let teams = generate_teams(
            &fixture_roster(),
            &fixture_catalog(),
            &RuleSet::default(),
            &GeneratorConfig { result_count: count, per_main_dps_cap: 4 },
        );
        assert!(teams.len() <= count);
    }
}

#[test]
fn ranking_is_globally_descending() {
    let teams = generate_teams(
        &fixture_roster(),
        &fixture_catalog(),
        &RuleSet::default(),
        &GeneratorConfig { result_count: 50, per_main_dps_cap: 50 },
    );
    for pair in teams.windows(2) {
        assert!(pair[0].score >= pair[1].score);
    }
}

#[test]
fn fallback_is_the_tier_sorted_quartet() {
    let catalog = CharacterCatalog::from_characters(vec![
        character("diona", &[Role::Support], Tier::A, Element::Cryo),
        character("bennett", &[Role::Support], Tier::SS, Element::Pyro),
        character("gorou", &[Role::Support], Tier::B, Element::Geo),
        character("zhongli", &[Role::Support], Tier::SS, Element::Geo),
    ]);
    let roster: Vec<String> =
        ["diona", "bennett", "gorou", "zhongli"].iter().map(|n| n.to_string()).collect();

    let teams =
        generate_teams(&roster, &catalog, &RuleSet::default(), &GeneratorConfig::default());

    assert_eq!(teams.len(), 1);
    assert!(teams[0].is_fallback());
    let expected: Vec<String> =
        tier_sort(&expand_roster(&roster, &catalog), &catalog).into_iter().take(4).collect();
    assert_eq!(teams[0].members, expected);
}

#[test]
fn insufficient_roster_yields_empty_result() {
    let teams = generate_teams(
        &["hu-tao".to_string(), "bennett".to_string(), "nobody".to_string()],
        &fixture_catalog(),
        &RuleSet::default(),
        &GeneratorConfig::default(),
    );
    assert!(teams.is_empty());
}

#[test]
fn traveler_placeholder_expands_to_present_variants() {
    let catalog = CharacterCatalog::from_characters(vec![
        character("traveler-anemo", &[Role::Support], Tier::B, Element::Anemo),
        character("traveler-pyro", &[Role::SubDps], Tier::B, Element::Pyro),
    ]);
    let expanded = expand_roster(&["Traveler".to_string()], &catalog);
    assert_eq!(expanded, vec!["traveler-anemo", "traveler-pyro"]);
}

#[test]
fn distinct_traveler_variants_stay_distinct_teams() {
    let catalog = CharacterCatalog::from_characters(vec![
        character("hu-tao", &[Role::MainDps], Tier::SS, Element::Pyro),
        character("xingqiu", &[Role::SubDps], Tier::S, Element::Hydro),
        character("yelan", &[Role::SubDps], Tier::SS, Element::Hydro),
        character("traveler-anemo", &[Role::Support], Tier::B, Element::Anemo),
        character("traveler-geo", &[Role::Support], Tier::B, Element::Geo),
    ]);
    let roster: Vec<String> = ["hu-tao", "xingqiu", "yelan", "traveler"]
        .iter()
        .map(|n| n.to_string())
        .collect();
    let teams = generate_teams(
        &roster,
        &catalog,
        &RuleSet::default(),
        &GeneratorConfig { result_count: 10, per_main_dps_cap: 10 },
    );
    let with_anemo = teams.iter().any(|t| t.members.contains(&"traveler-anemo".to_string()));
    let with_geo = teams.iter().any(|t| t.members.contains(&"traveler-geo".to_string()));
    assert!(with_anemo && with_geo, "both variants should field separate teams");
}

#[test]
fn unknown_roster_entries_degrade_instead_of_erroring() {
    let mut roster = fixture_roster();
    roster.push("definitely-not-real".to_string());
    let teams = generate_teams(
        &roster,
        &fixture_catalog(),
        &RuleSet::default(),
        &GeneratorConfig::default(),
    );
    assert!(!teams.is_empty());
    for team in &teams {
        assert!(!team.members.contains(&"definitely-not-real".to_string()));
    }
}
