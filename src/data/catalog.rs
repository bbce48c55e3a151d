//! Catalog feed: static per-character attributes from a CSV table.
//!
//! Columns: `Character`, `Best Role` (slash-separated), `Role Tier`,
//! `Element`, `Nightsoul`, `Off-field`. Malformed rows are skipped with a
//! warning, never fatal; duplicate identifiers keep the first row.

use std::collections::HashMap;
use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use crate::data::character::{normalize_name, Character, Element, Role, Tier};

pub const DEFAULT_CATALOG_PATH: &str = "data/characters.csv";

#[derive(Debug)]
pub enum CatalogError {
    Read(std::io::Error),
    Csv(csv::Error),
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read(err) => write!(f, "failed to read catalog file: {err}"),
            Self::Csv(err) => write!(f, "failed to parse catalog CSV: {err}"),
        }
    }
}

impl std::error::Error for CatalogError {}

/// Read-only character table keyed by normalized identifier. Iteration order
/// is the feed's row order, which keeps tie-breaks deterministic.
#[derive(Debug, Clone, Default)]
pub struct CharacterCatalog {
    by_id: HashMap<String, Character>,
    order: Vec<String>,
}

impl CharacterCatalog {
    /// Build from already-validated characters. Duplicates keep the first
    /// occurrence, matching the CSV loader.
    pub fn from_characters(characters: Vec<Character>) -> Self {
        let mut catalog = CharacterCatalog::default();
        for character in characters {
            catalog.insert(character);
        }
        catalog
    }

    fn insert(&mut self, character: Character) {
        if self.by_id.contains_key(&character.id) {
            eprintln!(
                "catalog: duplicate character '{}'; keeping first occurrence",
                character.id
            );
            return;
        }
        self.order.push(character.id.clone());
        self.by_id.insert(character.id.clone(), character);
    }

    pub fn get(&self, id: &str) -> Option<&Character> {
        self.by_id.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Characters in feed order.
    pub fn iter(&self) -> impl Iterator<Item = &Character> {
        self.order.iter().filter_map(|id| self.by_id.get(id))
    }

    /// Tier value for an identifier; unknown identifiers rank lowest.
    pub fn tier_value(&self, id: &str) -> i64 {
        self.by_id.get(id).map_or(0, Character::tier_value)
    }
}

#[derive(Debug, Deserialize)]
struct CatalogRow {
    #[serde(rename = "Character", default)]
    character: Option<String>,
    #[serde(rename = "Best Role", default)]
    best_role: Option<String>,
    #[serde(rename = "Role Tier", default)]
    role_tier: Option<String>,
    #[serde(rename = "Element", default)]
    element: Option<String>,
    #[serde(rename = "Nightsoul", default)]
    nightsoul: Option<String>,
    #[serde(rename = "Off-field", default)]
    off_field: Option<String>,
}

/// Load the catalog from a CSV file. Row-level problems warn and skip;
/// only an unreadable file or broken CSV framing is an error.
pub fn load_catalog(path: impl AsRef<Path>) -> Result<CharacterCatalog, CatalogError> {
    let file = File::open(path).map_err(CatalogError::Read)?;
    read_catalog(file)
}

/// CSV-parse a catalog from any reader. Used by [load_catalog] and tests.
pub fn read_catalog<R: Read>(reader: R) -> Result<CharacterCatalog, CatalogError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut catalog = CharacterCatalog::default();

    for (index, record) in csv_reader.deserialize::<CatalogRow>().enumerate() {
        let row = match record {
            Ok(row) => row,
            Err(err) => {
                if is_framing_error(&err) {
                    return Err(CatalogError::Csv(err));
                }
                eprintln!("catalog: row {}: unreadable record ({err}); skipping", index + 2);
                continue;
            }
        };
        if let Some(character) = parse_row(row, index + 2) {
            catalog.insert(character);
        }
    }

    Ok(catalog)
}

fn is_framing_error(err: &csv::Error) -> bool {
    matches!(err.kind(), csv::ErrorKind::Io(_))
}

fn parse_row(row: CatalogRow, line: usize) -> Option<Character> {
    let id = match row.character.as_deref().map(normalize_name) {
        Some(id) if !id.is_empty() => id,
        _ => {
            eprintln!("catalog: row {line}: missing character name; skipping");
            return None;
        }
    };

    let roles = parse_roles(row.best_role.as_deref().unwrap_or(""));
    if roles.is_empty() {
        eprintln!("catalog: row {line}: '{id}' has no recognizable role; skipping");
        return None;
    }

    let Some(tier) = row.role_tier.as_deref().and_then(Tier::parse) else {
        eprintln!(
            "catalog: row {line}: '{id}' has unparseable tier '{}'; skipping",
            row.role_tier.as_deref().unwrap_or("")
        );
        return None;
    };

    let element = match row.element.as_deref() {
        Some(raw) => Element::parse(raw).unwrap_or_else(|| {
            eprintln!("catalog: row {line}: '{id}' has unknown element '{raw}'");
            Element::Unknown
        }),
        None => Element::Unknown,
    };

    let Some(nightsoul) = parse_flag(row.nightsoul.as_deref()) else {
        eprintln!("catalog: row {line}: '{id}' has unparseable Nightsoul flag; skipping");
        return None;
    };
    let Some(off_field) = parse_flag(row.off_field.as_deref()) else {
        eprintln!("catalog: row {line}: '{id}' has unparseable Off-field flag; skipping");
        return None;
    };

    Some(Character { id, roles, tier, element, nightsoul, off_field })
}

fn parse_roles(raw: &str) -> Vec<Role> {
    let mut roles = Vec::new();
    for part in raw.split('/') {
        if part.trim().is_empty() {
            continue;
        }
        if let Some(role) = Role::parse(part) {
            if !roles.contains(&role) {
                roles.push(role);
            }
        }
    }
    roles
}

/// Missing flag cells default to false; present cells must parse.
fn parse_flag(raw: Option<&str>) -> Option<bool> {
    let Some(raw) = raw else {
        return Some(false);
    };
    match raw.trim().to_lowercase().as_str() {
        "" | "false" | "0" | "no" => Some(false),
        "true" | "1" | "yes" => Some(true),
        _ => None,
    }
}
