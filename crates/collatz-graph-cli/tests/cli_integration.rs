//! Integration tests for the cg CLI.
//!
//! Every test points `CG_CONFIG` at a temporary file so the user's real
//! settings are never read or written.
//!
//! Run with: `cargo test --package collatz-graph-cli --test cli_integration`

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

/// Run cg inside `dir` with an isolated config file.
fn run_cg_in_dir(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_cg"))
        .current_dir(dir)
        .env("CG_CONFIG", config_path(dir))
        .env_remove("CG_LAYOUT")
        .env_remove("CG_SEED")
        .env_remove("CG_NODE_RADIUS")
        .args(args)
        .output()
        .expect("Failed to execute cg command")
}

fn config_path(dir: &Path) -> PathBuf {
    dir.join("settings").join("config.json")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn generate_json(dir: &Path, args: &[&str]) -> serde_json::Value {
    let output = run_cg_in_dir(dir, args);
    assert!(
        output.status.success(),
        "cg generate failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_str(&stdout(&output)).expect("stdout should be JSON")
}

// =============================================================================
// Sequence Command Tests
// =============================================================================

#[test]
fn test_sequence_prints_trajectory() {
    let temp = TempDir::new().unwrap();
    let output = run_cg_in_dir(temp.path(), &["sequence", "6"]);
    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.starts_with("6 3 10 5 16 8 4 2 1"), "{text}");
    assert!(text.contains("8 steps"));
}

#[test]
fn test_sequence_rejects_zero() {
    let temp = TempDir::new().unwrap();
    let output = run_cg_in_dir(temp.path(), &["sequence", "0"]);
    assert!(!output.status.success());
}

// =============================================================================
// Generate Command Tests
// =============================================================================

#[test]
fn test_generate_writes_json_to_stdout() {
    let temp = TempDir::new().unwrap();
    let json = generate_json(temp.path(), &["generate", "--end", "10", "--seed", "4"]);
    assert_eq!(json["layout"], "standard");
    let nodes = json["nodes"].as_array().unwrap();
    assert_eq!(json["stats"]["node_count"], nodes.len());
    assert!(nodes.iter().any(|n| n["value"] == 1));
}

#[test]
fn test_generate_explicit_starts_and_layout() {
    let temp = TempDir::new().unwrap();
    let json = generate_json(
        temp.path(),
        &["generate", "--starts", "8,3", "--layout", "spiral", "--seed", "1"],
    );
    assert_eq!(json["layout"], "spiral");
    // 8 4 2 1 and 3 10 5 16 8 4 2 1 share 8 4 2 1.
    assert_eq!(json["nodes"].as_array().unwrap().len(), 8);
}

#[test]
fn test_generate_same_seed_same_output() {
    let temp = TempDir::new().unwrap();
    let args = ["generate", "--end", "15", "--layout", "galaxy", "--seed", "77"];
    let a = run_cg_in_dir(temp.path(), &args);
    let b = run_cg_in_dir(temp.path(), &args);
    assert!(a.status.success() && b.status.success());
    assert_eq!(a.stdout, b.stdout);
}

#[test]
fn test_generate_output_file() {
    let temp = TempDir::new().unwrap();
    let out = temp.path().join("out").join("graph.json");
    let output = run_cg_in_dir(
        temp.path(),
        &["generate", "--end", "6", "--seed", "2", "-o", out.to_str().unwrap()],
    );
    assert!(output.status.success());
    let contents = fs::read_to_string(&out).unwrap();
    let json: serde_json::Value = serde_json::from_str(&contents).unwrap();
    assert!(json["canvas"]["width"].as_f64().unwrap() > 0.0);
}

#[test]
fn test_generate_summary() {
    let temp = TempDir::new().unwrap();
    let output = run_cg_in_dir(
        temp.path(),
        &["generate", "--end", "12", "--seed", "3", "--summary"],
    );
    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("Nodes:"));
    assert!(text.contains("Depth histogram:"));
    assert!(text.contains("Seed:        3"));
}

#[test]
fn test_generate_rejects_unknown_layout() {
    let temp = TempDir::new().unwrap();
    let output = run_cg_in_dir(temp.path(), &["generate", "--layout", "force"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid --layout"), "{stderr}");
}

#[test]
fn test_env_overrides_config_file() {
    let temp = TempDir::new().unwrap();
    let path = config_path(temp.path());
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, r#"{ "end": 5, "graph": { "layout": "spiral", "seed": 1 } }"#).unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_cg"))
        .current_dir(temp.path())
        .env("CG_CONFIG", &path)
        .env("CG_LAYOUT", "radial")
        .args(["generate"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json["layout"], "radial_layers");
}

// =============================================================================
// Config Command Tests
// =============================================================================

#[test]
fn test_config_path_honours_override() {
    let temp = TempDir::new().unwrap();
    let output = run_cg_in_dir(temp.path(), &["config", "path"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("config.json"));
}

#[test]
fn test_config_init_then_show() {
    let temp = TempDir::new().unwrap();
    let output = run_cg_in_dir(temp.path(), &["config", "init"]);
    assert!(output.status.success());
    assert!(config_path(temp.path()).exists());

    // A second init refuses to clobber the file.
    let again = run_cg_in_dir(temp.path(), &["config", "init"]);
    assert!(!again.status.success());
    let forced = run_cg_in_dir(temp.path(), &["config", "init", "--force"]);
    assert!(forced.status.success());

    let show = run_cg_in_dir(temp.path(), &["config", "show"]);
    assert!(show.status.success());
    assert!(stdout(&show).contains("Layout:          standard"));
}

#[test]
fn test_config_reset_recovers_broken_file() {
    let temp = TempDir::new().unwrap();
    let path = config_path(temp.path());
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, "not json").unwrap();

    let broken = run_cg_in_dir(temp.path(), &["config", "show"]);
    assert!(!broken.status.success());

    let reset = run_cg_in_dir(temp.path(), &["config", "reset"]);
    assert!(reset.status.success());
    let contents = fs::read_to_string(&path).unwrap();
    assert!(serde_json::from_str::<serde_json::Value>(&contents).is_ok());
}
