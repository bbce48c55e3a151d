use std::env;

use crate::data::catalog::DEFAULT_CATALOG_PATH;
use crate::data::validate::validate_character_dataset;
use crate::server;
use crate::teams::{recommend_teams, GeneratorConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Serve,
    Generate,
    Validate,
}

pub fn parse_command(args: &[String]) -> Option<Command> {
    match args.get(1).map(String::as_str) {
        Some("serve") => Some(Command::Serve),
        Some("generate") => Some(Command::Generate),
        Some("validate") => Some(Command::Validate),
        _ => None,
    }
}

pub fn run_with_args(args: &[String]) -> i32 {
    match parse_command(args) {
        Some(Command::Serve) => handle_serve(),
        Some(Command::Generate) => handle_generate(args),
        Some(Command::Validate) => handle_validate(args),
        None => {
            eprintln!("usage: teyvat <serve|generate|validate>");
            2
        }
    }
}

fn handle_serve() -> i32 {
    let bind_addr = env::var("TEYVAT_BIND").unwrap_or_else(|_| "127.0.0.1:3000".to_string());
    match server::run_server(&bind_addr) {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("server error: {err}");
            1
        }
    }
}

fn handle_generate(args: &[String]) -> i32 {
    let Some(raw_roster) = args.get(2) else {
        eprintln!("usage: teyvat generate <name,name,...> [count] [per_main_cap]");
        return 2;
    };

    let roster: Vec<String> = raw_roster
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect();

    let defaults = GeneratorConfig::default();
    let config = GeneratorConfig {
        result_count: parse_usize_arg(args.get(3), "count", defaults.result_count),
        per_main_dps_cap: parse_usize_arg(args.get(4), "per_main_cap", defaults.per_main_dps_cap),
    };

    let teams = recommend_teams(&roster, &config);
    match serde_json::to_string_pretty(&teams) {
        Ok(payload) => {
            println!("{payload}");
            0
        }
        Err(err) => {
            eprintln!("failed to serialize teams: {err}");
            1
        }
    }
}

fn handle_validate(args: &[String]) -> i32 {
    let path = args.get(2).map(String::as_str).unwrap_or(DEFAULT_CATALOG_PATH);

    match validate_character_dataset(path) {
        Ok(report) if !report.has_errors() => {
            for diagnostic in &report.diagnostics {
                eprintln!("- {diagnostic}");
            }
            println!("validation passed: {path}");
            0
        }
        Ok(report) => {
            eprintln!("validation failed: {} issue(s)", report.diagnostics.len());
            for diagnostic in &report.diagnostics {
                eprintln!("- {diagnostic}");
            }
            1
        }
        Err(err) => {
            eprintln!("validation failed: {err}");
            1
        }
    }
}

fn parse_usize_arg(raw: Option<&String>, name: &str, default: usize) -> usize {
    raw.and_then(|value| value.parse::<usize>().ok()).unwrap_or_else(|| {
        if let Some(value) = raw {
            eprintln!("invalid {name} '{value}', defaulting to {default}");
        }
        default
    })
}
