use std::process::Command;

fn bin() -> &'static str {
    env!("CARGO_BIN_EXE_teyvat")
}

#[test]
fn missing_command_prints_usage() {
    let output = Command::new(bin()).output().expect("binary should run");
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("usage: teyvat <serve|generate|validate>"));
}

#[test]
fn generate_command_emits_ranked_teams_json() {
    let output = Command::new(bin())
        .args(["generate", "Hu Tao,Xingqiu,Yelan,Fischl,Bennett,Zhongli", "4"])
        .output()
        .expect("generate should run");

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    let payload: serde_json::Value =
        serde_json::from_str(&stdout).expect("generate should emit json");
    let teams = payload.as_array().expect("payload should be an array");
    assert!(!teams.is_empty());
    assert!(teams.len() <= 4);
    assert_eq!(teams[0]["members"].as_array().map(Vec::len), Some(4));
}

#[test]
fn generate_command_requires_a_roster() {
    let output = Command::new(bin()).arg("generate").output().expect("generate should run");
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("usage: teyvat generate"));
}

#[test]
fn generate_command_with_unusable_roster_emits_empty_array() {
    let output = Command::new(bin())
        .args(["generate", "Nobody,Also Nobody"])
        .output()
        .expect("generate should run");

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    let payload: serde_json::Value =
        serde_json::from_str(&stdout).expect("generate should emit json");
    assert_eq!(payload.as_array().map(Vec::len), Some(0));
}

#[test]
fn validate_command_passes_on_shipped_catalog() {
    let output = Command::new(bin()).arg("validate").output().expect("validate should run");
    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("validation passed"));
}

#[test]
fn validate_command_fails_on_missing_file() {
    let output = Command::new(bin())
        .args(["validate", "does/not/exist.csv"])
        .output()
        .expect("validate should run");
    assert_eq!(output.status.code(), Some(1));
}
