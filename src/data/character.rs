use std::fmt;

use serde::Serialize;

/// Normalize a character name for lookup: trim, lowercase, whitespace runs
/// become single hyphens. "Kujou Sara" -> "kujou-sara".
pub fn normalize_name(raw: &str) -> String {
    raw.trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Role {
    MainDps,
    SubDps,
    Support,
}

impl Role {
    pub fn parse(raw: &str) -> Option<Role> {
        match raw.trim().to_lowercase().as_str() {
            "main dps" | "main-dps" => Some(Role::MainDps),
            "sub-dps" | "sub dps" => Some(Role::SubDps),
            "support" => Some(Role::Support),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::MainDps => "Main DPS",
            Role::SubDps => "Sub-DPS",
            Role::Support => "Support",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coarse power ranking. Drives the base score; SS highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Tier {
    SS,
    S,
    A,
    B,
    C,
}

impl Tier {
    pub fn parse(raw: &str) -> Option<Tier> {
        match raw.trim().to_uppercase().as_str() {
            "SS" => Some(Tier::SS),
            "S" => Some(Tier::S),
            "A" => Some(Tier::A),
            "B" => Some(Tier::B),
            "C" => Some(Tier::C),
            _ => None,
        }
    }

    /// Integer value used by the base score and tier_sort.
    pub fn value(&self) -> i64 {
        match self {
            Tier::SS => 100,
            Tier::S => 80,
            Tier::A => 50,
            Tier::B => 20,
            Tier::C => 10,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::SS => "SS",
            Tier::S => "S",
            Tier::A => "A",
            Tier::B => "B",
            Tier::C => "C",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Elemental tag. Physical carries no resonance or reaction rows; Unknown is
/// the loader's bucket for unrecognized element strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Element {
    Pyro,
    Hydro,
    Cryo,
    Electro,
    Geo,
    Anemo,
    Dendro,
    Physical,
    Unknown,
}

impl Element {
    pub fn parse(raw: &str) -> Option<Element> {
        match raw.trim().to_lowercase().as_str() {
            "pyro" => Some(Element::Pyro),
            "hydro" => Some(Element::Hydro),
            "cryo" => Some(Element::Cryo),
            "electro" => Some(Element::Electro),
            "geo" => Some(Element::Geo),
            "anemo" => Some(Element::Anemo),
            "dendro" => Some(Element::Dendro),
            "physical" => Some(Element::Physical),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Element::Pyro => "Pyro",
            Element::Hydro => "Hydro",
            Element::Cryo => "Cryo",
            Element::Electro => "Electro",
            Element::Geo => "Geo",
            Element::Anemo => "Anemo",
            Element::Dendro => "Dendro",
            Element::Physical => "Physical",
            Element::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Static per-character attributes, loaded once from the catalog feed.
#[derive(Debug, Clone, PartialEq)]
pub struct Character {
    /// Normalized identifier, unique within the catalog.
    pub id: String,
    /// Non-empty; the loader drops rows it cannot classify.
    pub roles: Vec<Role>,
    pub tier: Tier,
    pub element: Element,
    /// Shares the energy-free "nightsoul" resource system.
    pub nightsoul: bool,
    /// Designed to contribute while off-field.
    pub off_field: bool,
}

impl Character {
    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    pub fn is_main_dps(&self) -> bool {
        self.has_role(Role::MainDps)
    }

    pub fn is_sub_dps(&self) -> bool {
        self.has_role(Role::SubDps)
    }

    pub fn is_support(&self) -> bool {
        self.has_role(Role::Support)
    }

    pub fn tier_value(&self) -> i64 {
        self.tier.value()
    }
}
