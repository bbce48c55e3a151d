pub mod generator;
pub mod roles;
pub mod scorer;
pub mod variants;

pub use generator::{generate_teams, GeneratorConfig, Team, TeamShape};

use crate::data::catalog::{load_catalog, CharacterCatalog, DEFAULT_CATALOG_PATH};
use crate::data::rules::{load_rules_or_default, DEFAULT_RULES_PATH};

/// Convenience path for the CLI and HTTP surface: load the shipped data
/// feeds (degrading to empty on failure) and run one generation call.
pub fn recommend_teams(roster: &[String], config: &GeneratorConfig) -> Vec<Team> {
    let catalog = load_default_catalog();
    let rules = load_rules_or_default(DEFAULT_RULES_PATH);
    generate_teams(roster, &catalog, &rules, config)
}

/// Load the shipped catalog; an unreadable feed degrades to an empty catalog
/// (generation then signals insufficient roster rather than failing).
pub fn load_default_catalog() -> CharacterCatalog {
    match load_catalog(DEFAULT_CATALOG_PATH) {
        Ok(catalog) => catalog,
        Err(err) => {
            eprintln!("catalog: '{DEFAULT_CATALOG_PATH}': {err}; using empty catalog");
            CharacterCatalog::default()
        }
    }
}
