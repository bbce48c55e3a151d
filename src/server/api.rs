//! JSON payload builders for the HTTP surface. Each function loads the data
//! feeds fresh, runs the synchronous engine, and serializes a response;
//! per-call state (seen teams, result accumulator) lives inside the engine
//! call, so concurrent requests cannot leak into each other.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::data::catalog::CharacterCatalog;
use crate::data::character::Character;
use crate::data::rules::{load_rules_or_default, DEFAULT_RULES_PATH};
use crate::teams::{generate_teams, load_default_catalog, GeneratorConfig, Team, TeamShape};

#[derive(Debug)]
pub enum GenerateError {
    Parse(serde_json::Error),
    Validation(String),
}

impl fmt::Display for GenerateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "{err}"),
            Self::Validation(msg) => f.write_str(msg),
        }
    }
}

impl std::error::Error for GenerateError {}

pub fn health_payload() -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&serde_json::json!({
        "status": "ok",
        "service": "teyvat-api",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

#[derive(Debug, Clone, Serialize)]
pub struct CharacterListItem {
    pub id: String,
    pub roles: Vec<&'static str>,
    pub element: &'static str,
    pub tier: &'static str,
    pub nightsoul: bool,
    pub off_field: bool,
}

impl CharacterListItem {
    fn from_character(character: &Character) -> Self {
        CharacterListItem {
            id: character.id.clone(),
            roles: character.roles.iter().map(|role| role.as_str()).collect(),
            element: character.element.as_str(),
            tier: character.tier.as_str(),
            nightsoul: character.nightsoul,
            off_field: character.off_field,
        }
    }
}

pub fn characters_payload() -> Result<String, serde_json::Error> {
    let catalog = load_default_catalog();
    let list: Vec<CharacterListItem> =
        catalog.iter().map(CharacterListItem::from_character).collect();
    serde_json::to_string_pretty(&serde_json::json!({ "characters": list }))
}

#[derive(Debug, Clone, Deserialize)]
pub struct GenerateRequest {
    pub characters: Vec<String>,
    pub count: Option<usize>,
    pub per_main_cap: Option<usize>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TeamMemberView {
    pub name: String,
    pub role: String,
    pub element: String,
    pub tier: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct TeamView {
    pub team_name: String,
    pub shape: TeamShape,
    pub score: i64,
    pub characters: Vec<TeamMemberView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GenerateResponse {
    pub status: &'static str,
    pub teams: Vec<TeamView>,
}

pub fn generate_payload(body: &str) -> Result<String, GenerateError> {
    let request: GenerateRequest =
        serde_json::from_str(body).map_err(GenerateError::Parse)?;
    if request.characters.is_empty() {
        return Err(GenerateError::Validation(
            "No characters provided in request body.".to_string(),
        ));
    }

    let defaults = GeneratorConfig::default();
    let config = GeneratorConfig {
        result_count: request.count.unwrap_or(defaults.result_count),
        per_main_dps_cap: request.per_main_cap.unwrap_or(defaults.per_main_dps_cap),
    };

    let catalog = load_default_catalog();
    let rules = load_rules_or_default(DEFAULT_RULES_PATH);
    let teams = generate_teams(&request.characters, &catalog, &rules, &config);

    let status = if teams.is_empty() { "insufficient_roster" } else { "success" };
    let views: Vec<TeamView> = teams
        .iter()
        .enumerate()
        .map(|(index, team)| team_view(index, team, &catalog))
        .collect();

    serde_json::to_string_pretty(&GenerateResponse { status, teams: views })
        .map_err(GenerateError::Parse)
}

fn team_view(index: usize, team: &Team, catalog: &CharacterCatalog) -> TeamView {
    let characters = team
        .members
        .iter()
        .map(|id| match catalog.get(id) {
            Some(character) => TeamMemberView {
                name: character.id.clone(),
                role: character
                    .roles
                    .iter()
                    .map(|role| role.as_str())
                    .collect::<Vec<_>>()
                    .join(", "),
                element: character.element.to_string(),
                tier: character.tier.to_string(),
            },
            None => TeamMemberView {
                name: id.clone(),
                role: "N/A".to_string(),
                element: "N/A".to_string(),
                tier: "N/A".to_string(),
            },
        })
        .collect();

    TeamView {
        team_name: format!("Team {}", index + 1),
        shape: team.shape,
        score: team.score,
        characters,
    }
}
