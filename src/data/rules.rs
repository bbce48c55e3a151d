//! Rule-set feed: incompatible-support pairs and per-character synergy
//! preferences, loaded from `team_rules.json`. A missing or malformed file
//! degrades to empty tables so generation keeps working without it.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::data::adjustments::{default_adjustments, ConditionalAdjustment};
use crate::data::character::{normalize_name, Element};

pub const DEFAULT_RULES_PATH: &str = "data/team_rules.json";

#[derive(Debug)]
pub enum RulesError {
    Read(std::io::Error),
    Parse(serde_json::Error),
}

impl fmt::Display for RulesError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read(err) => write!(f, "failed to read rules file: {err}"),
            Self::Parse(err) => write!(f, "failed to parse rules JSON: {err}"),
        }
    }
}

impl std::error::Error for RulesError {}

/// Per-character synergy preferences. All identifiers normalized.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SynergyRule {
    pub preferred_elements: Vec<Element>,
    pub preferred_teammates: Vec<String>,
    pub excluded_elements: Vec<Element>,
}

/// External rule tables plus the built-in conditional adjustment table.
/// The two feed-backed tables are empty when the feed is absent; the
/// adjustment table is always present (it is engine data, not user data).
#[derive(Debug, Clone)]
pub struct RuleSet {
    /// Main-DPS identifier -> identifiers it must not be teamed with.
    pub incompatible_supports: HashMap<String, HashSet<String>>,
    pub synergy_rules: HashMap<String, SynergyRule>,
    pub adjustments: Vec<ConditionalAdjustment>,
}

impl Default for RuleSet {
    fn default() -> Self {
        RuleSet {
            incompatible_supports: HashMap::new(),
            synergy_rules: HashMap::new(),
            adjustments: default_adjustments(),
        }
    }
}

impl RuleSet {
    pub fn synergy_rule(&self, id: &str) -> Option<&SynergyRule> {
        self.synergy_rules.get(id)
    }
}

#[derive(Debug, Deserialize)]
struct RawRules {
    #[serde(default)]
    incompatible_supports: HashMap<String, Vec<String>>,
    #[serde(default)]
    synergy_rules: HashMap<String, RawSynergyRule>,
}

#[derive(Debug, Deserialize)]
struct RawSynergyRule {
    #[serde(default)]
    preferred_elements: Vec<String>,
    #[serde(default)]
    preferred: Vec<String>,
    #[serde(default)]
    excluded_elements: Vec<String>,
}

/// Load the rule set from a JSON file. Callers wanting the degrade-to-empty
/// contract use [load_rules_or_default].
pub fn load_rules(path: impl AsRef<Path>) -> Result<RuleSet, RulesError> {
    let raw = fs::read_to_string(path).map_err(RulesError::Read)?;
    parse_rules(&raw)
}

/// Missing file or malformed content degrades to empty rule tables with a
/// warning, never fails generation.
pub fn load_rules_or_default(path: impl AsRef<Path>) -> RuleSet {
    let path = path.as_ref();
    match load_rules(path) {
        Ok(rules) => rules,
        Err(err) => {
            eprintln!("rules: '{}': {err}; using empty rule tables", path.display());
            RuleSet::default()
        }
    }
}

pub fn parse_rules(raw: &str) -> Result<RuleSet, RulesError> {
    let parsed: RawRules = serde_json::from_str(raw).map_err(RulesError::Parse)?;

    let incompatible_supports = parsed
        .incompatible_supports
        .into_iter()
        .map(|(main, others)| {
            let others = others.iter().map(|name| normalize_name(name)).collect();
            (normalize_name(&main), others)
        })
        .collect();

    let synergy_rules = parsed
        .synergy_rules
        .into_iter()
        .map(|(id, raw_rule)| {
            let id = normalize_name(&id);
            let rule = SynergyRule {
                preferred_elements: parse_elements(&id, &raw_rule.preferred_elements),
                preferred_teammates: raw_rule.preferred.iter().map(|n| normalize_name(n)).collect(),
                excluded_elements: parse_elements(&id, &raw_rule.excluded_elements),
            };
            (id, rule)
        })
        .collect();

    Ok(RuleSet {
        incompatible_supports,
        synergy_rules,
        adjustments: default_adjustments(),
    })
}

fn parse_elements(rule_id: &str, raw: &[String]) -> Vec<Element> {
    raw.iter()
        .filter_map(|name| {
            let element = Element::parse(name);
            if element.is_none() {
                eprintln!("rules: '{rule_id}': unknown element '{name}'; dropping");
            }
            element
        })
        .collect()
}
