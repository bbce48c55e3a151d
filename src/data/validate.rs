//! Strict validation of the catalog feed for the `validate` CLI command.
//! Unlike the loader, which silently skips bad rows, this reports every
//! problem it finds so feed authors can fix the file in one pass.

use std::collections::HashSet;
use std::fmt;
use std::path::Path;

use crate::data::character::{normalize_name, Element, Role, Tier};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ValidationSeverity {
    Error,
    Warning,
}

impl ValidationSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
        }
    }
}

impl fmt::Display for ValidationSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationDiagnostic {
    pub severity: ValidationSeverity,
    pub context: String,
    pub message: String,
}

impl fmt::Display for ValidationDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.severity, self.context, self.message)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    pub diagnostics: Vec<ValidationDiagnostic>,
}

impl ValidationReport {
    fn push(
        &mut self,
        severity: ValidationSeverity,
        context: impl Into<String>,
        message: impl Into<String>,
    ) {
        self.diagnostics.push(ValidationDiagnostic {
            severity,
            context: context.into(),
            message: message.into(),
        });
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|diag| diag.severity == ValidationSeverity::Error)
    }
}

const REQUIRED_COLUMNS: &[&str] =
    &["Character", "Best Role", "Role Tier", "Element", "Nightsoul", "Off-field"];

pub fn validate_character_dataset(path: impl AsRef<Path>) -> Result<ValidationReport, String> {
    let path = path.as_ref();
    let mut reader = csv::Reader::from_path(path)
        .map_err(|err| format!("unable to read '{}': {err}", path.display()))?;

    let headers = reader
        .headers()
        .map_err(|err| format!("unable to read headers of '{}': {err}", path.display()))?
        .clone();

    let mut report = ValidationReport::default();
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|header| header == *column) {
            report.push(
                ValidationSeverity::Error,
                "header",
                format!("missing required column '{column}'"),
            );
        }
    }

    let indices: Vec<Option<usize>> = REQUIRED_COLUMNS
        .iter()
        .map(|column| headers.iter().position(|header| header == *column))
        .collect();

    let mut seen_ids = HashSet::new();
    for (row_number, record) in reader.records().enumerate() {
        let context = format!("row {}", row_number + 2);
        let record = match record {
            Ok(record) => record,
            Err(err) => {
                report.push(
                    ValidationSeverity::Error,
                    context,
                    format!("unreadable record: {err}"),
                );
                continue;
            }
        };
        let cell =
            |column: usize| indices[column].and_then(|i| record.get(i)).unwrap_or("").trim();

        let name = cell(0);
        if name.is_empty() {
            report.push(ValidationSeverity::Error, context.as_str(), "missing character name");
        } else {
            let id = normalize_name(name);
            if !seen_ids.insert(id.clone()) {
                report.push(
                    ValidationSeverity::Error,
                    context.as_str(),
                    format!("duplicate character '{id}'"),
                );
            }
        }

        let role_parts: Vec<&str> = cell(1)
            .split('/')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect();
        if role_parts.is_empty() {
            report.push(ValidationSeverity::Error, context.as_str(), "empty role set");
        }
        for part in role_parts {
            if Role::parse(part).is_none() {
                report.push(
                    ValidationSeverity::Error,
                    context.as_str(),
                    format!("unknown role tag '{part}'"),
                );
            }
        }

        let tier = cell(2);
        if Tier::parse(tier).is_none() {
            report.push(ValidationSeverity::Error, context.as_str(), format!("invalid tier '{tier}'"));
        }

        let element = cell(3);
        if !element.is_empty() && Element::parse(element).is_none() {
            report.push(
                ValidationSeverity::Warning,
                context.as_str(),
                format!("unknown element '{element}' (loader will treat as Unknown)"),
            );
        }

        for (label, value) in [("Nightsoul", cell(4)), ("Off-field", cell(5))] {
            let recognized = matches!(
                value.to_lowercase().as_str(),
                "" | "true" | "false" | "1" | "0" | "yes" | "no"
            );
            if !recognized {
                report.push(
                    ValidationSeverity::Error,
                    context.as_str(),
                    format!("invalid {label} flag '{value}'"),
                );
            }
        }
    }

    Ok(report)
}
