use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;

fn repo_path(relative: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .join(relative)
}

fn data_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/data")
        .join(name)
}

#[test]
fn evaluate_prints_table_and_writes_csv() {
    let tmp = tempdir().unwrap();
    let out = tmp.path().join("results.csv");
    let input = data_path("lines.csv");

    Command::cargo_bin("linestress")
        .unwrap()
        .args([
            "evaluate",
            input.to_str().unwrap(),
            "--strategy",
            "simplified",
            "--temperature",
            "25",
            "-o",
            out.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("STRESS %"))
        .stdout(predicate::str::contains("critical-overload"))
        .stdout(predicate::str::contains("4 lines (measured flows)"));

    let written = fs::read_to_string(&out).unwrap();
    assert!(written.starts_with("line_id,"));
    assert!(written.contains("L1,200.0,100.0,50.0,caution,simplified,measured"));
    assert_eq!(written.lines().count(), 5);
}

#[test]
fn evaluate_grid37_synthesizes_flows() {
    let input = repo_path("test_data/grid37/lines.csv");

    Command::cargo_bin("linestress")
        .unwrap()
        .args(["evaluate", input.to_str().unwrap(), "-t", "30", "-w", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("45 lines (synthetic flows)"));
}

#[test]
fn evaluate_with_separate_flow_table() {
    let lines = repo_path("test_data/grid37/lines.csv");
    let flows = repo_path("test_data/grid37/flows.csv");

    Command::cargo_bin("linestress")
        .unwrap()
        .args([
            "evaluate",
            lines.to_str().unwrap(),
            "--flows",
            flows.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("45 lines (measured flows)"));
}

#[test]
fn evaluate_json_output_is_a_report() {
    let input = data_path("lines.csv");

    let output = Command::cargo_bin("linestress")
        .unwrap()
        .args([
            "evaluate",
            input.to_str().unwrap(),
            "--strategy",
            "simplified",
            "--format",
            "json",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let doc: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert!(doc["generated_at"].is_string());
    assert_eq!(doc["results"].as_array().unwrap().len(), 4);
    assert_eq!(doc["results"][0]["line_id"], "L1");
    assert_eq!(doc["environment"]["ambient_temperature_c"], 25.0);
}

#[test]
fn evaluate_physical_uses_conductor_columns() {
    let input = repo_path("test_data/grid37/conductors.csv");

    Command::cargo_bin("linestress")
        .unwrap()
        .args([
            "evaluate",
            input.to_str().unwrap(),
            "--strategy",
            "auto",
            "-t",
            "20",
            "-w",
            "1",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("physical"));
}

#[test]
fn evaluate_reports_defaulted_rating_on_stderr() {
    let input = data_path("lines.csv");

    Command::cargo_bin("linestress")
        .unwrap()
        .args(["evaluate", input.to_str().unwrap(), "--strategy", "simplified"])
        .assert()
        .success()
        .stderr(predicate::str::contains("L4"));
}

#[test]
fn classify_detects_fractions() {
    let input = data_path("stress_fractions.csv");

    Command::cargo_bin("linestress")
        .unwrap()
        .args(["classify", input.to_str().unwrap(), "--scheme", "map"])
        .assert()
        .success()
        .stdout(predicate::str::contains("values read as fractions"))
        .stdout(predicate::str::contains("COARSE"))
        .stdout(predicate::str::contains("critical-overload"));
}

#[test]
fn sweep_writes_grid_to_stdout() {
    let input = data_path("lines.csv");

    Command::cargo_bin("linestress")
        .unwrap()
        .args([
            "sweep",
            input.to_str().unwrap(),
            "--temperatures",
            "0:40:3",
            "--winds",
            "0:4:2",
            "--strategy",
            "simplified",
        ])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "ambient_temperature_c,wind_speed_mps,nominal",
        ))
        .stdout(predicate::str::contains("critical-overload"));
}

#[test]
fn sweep_accepts_sub_zero_temperatures() {
    let input = repo_path("test_data/grid37/lines.csv");

    let output = Command::cargo_bin("linestress")
        .unwrap()
        .args([
            "sweep",
            input.to_str().unwrap(),
            "--temperatures",
            "-10:10:3",
            "--winds",
            "0",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let text = String::from_utf8(output.stdout).unwrap();
    let rows: Vec<&str> = text.lines().skip(1).collect();
    assert_eq!(rows.len(), 3);
    assert!(rows[0].starts_with("-10,0,"));
}

#[test]
fn evaluate_treats_negative_wind_as_calm() {
    let input = data_path("lines.csv");

    Command::cargo_bin("linestress")
        .unwrap()
        .args([
            "evaluate",
            input.to_str().unwrap(),
            "--strategy",
            "simplified",
            "-w",
            "-2",
        ])
        .assert()
        .success()
        .stderr(predicate::str::contains("degenerate-environment"))
        .stderr(predicate::str::contains("treated as calm"));
}

#[test]
fn sweep_writes_grid_file() {
    let tmp = tempdir().unwrap();
    let out = tmp.path().join("sweep.csv");
    let input = data_path("lines.csv");

    Command::cargo_bin("linestress")
        .unwrap()
        .args([
            "sweep",
            input.to_str().unwrap(),
            "--temperatures",
            "10:30:3",
            "--winds",
            "1",
            "-o",
            out.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote 3 grid points"));

    let written = fs::read_to_string(&out).unwrap();
    assert_eq!(written.lines().count(), 4);
}

#[test]
fn buses_prints_worst_incident_stress() {
    let tmp = tempdir().unwrap();
    let out = tmp.path().join("buses.csv");
    let input = data_path("lines.csv");

    Command::cargo_bin("linestress")
        .unwrap()
        .args([
            "buses",
            input.to_str().unwrap(),
            "--strategy",
            "simplified",
            "--scheme",
            "node",
            "-o",
            out.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("BUS"))
        .stdout(predicate::str::contains("B3"));

    assert!(out.exists());
}

#[test]
fn config_file_changes_engine_constants() {
    let tmp = tempdir().unwrap();
    let config = tmp.path().join("engine.toml");
    fs::write(
        &config,
        "[rating]\nk_wind = 0.05\n\n[environment]\nlatitude_deg = 45.0\n",
    )
    .unwrap();
    let input = data_path("lines.csv");

    Command::cargo_bin("linestress")
        .unwrap()
        .args([
            "--config",
            config.to_str().unwrap(),
            "evaluate",
            input.to_str().unwrap(),
            "--strategy",
            "simplified",
        ])
        .assert()
        .success();
}

#[test]
fn missing_line_table_fails() {
    Command::cargo_bin("linestress")
        .unwrap()
        .args(["evaluate", "does/not/exist.csv"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("opening line table"));
}

#[test]
fn unknown_strategy_is_rejected() {
    let input = data_path("lines.csv");

    Command::cargo_bin("linestress")
        .unwrap()
        .args(["evaluate", input.to_str().unwrap(), "--strategy", "magic"])
        .assert()
        .failure();
}
