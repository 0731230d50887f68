//! Integration tests for the --format and --output flags
#![allow(deprecated)] // suppress assert_cmd::Command::cargo_bin deprecation in tests

use predicates::prelude::*;
use std::path::PathBuf;

const VARIANTS: &str = "OPENJDK_8,GRAALVM_CE_8,GRAALVM_EE_8";

fn fixture() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/jvm_results.toml")
}

fn benchmatrix() -> assert_cmd::Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("benchmatrix");
    cmd.arg("--variants").arg(VARIANTS);
    cmd
}

#[test]
fn test_text_is_default_format() {
    benchmatrix()
        .arg(fixture())
        .assert()
        .success()
        .stdout(predicate::str::contains("H2 STARTUP\n95% confidence level"))
        .stdout(predicate::str::contains("TOTAL STEADY_STATE"))
        .stdout(predicate::str::contains("Ranking: "))
        .stdout(predicate::str::contains(
            "SUNFLOW STARTUP at 95% confidence level\nSample size: 50",
        ))
        .stdout(predicate::str::contains("baseline band"));
}

#[test]
fn test_json_output_parses() {
    let output = benchmatrix()
        .arg("--format")
        .arg("json")
        .arg(fixture())
        .output()
        .unwrap();
    assert!(output.status.success());

    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(parsed["format"], "benchmatrix-json-v1");
    assert_eq!(parsed["summary"]["heatmaps"], 6);
    assert_eq!(parsed["summary"]["charts"], 4);

    let heatmaps = parsed["heatmaps"].as_array().unwrap();
    let total = heatmaps
        .iter()
        .find(|h| h["name"] == "TOTAL_STARTUP_heatmap")
        .expect("startup total present");
    assert_eq!(
        total["values"],
        serde_json::json!([[0, 1, -1], [-1, 0, -2], [1, 2, 0]])
    );
    assert_eq!(total["valid"], true);
    assert_eq!(
        total["ranking"],
        serde_json::json!([["GRAALVM_EE_8", 3], ["OPENJDK_8", 0], ["GRAALVM_CE_8", -3]])
    );
    assert_eq!(
        total["labels"],
        serde_json::json!(["OPENJDK_8", "GRAALVM_CE_8", "GRAALVM_EE_8"])
    );
}

#[test]
fn test_json_chart_normalized_to_baseline() {
    let output = benchmatrix()
        .arg("--format")
        .arg("json")
        .arg("--baseline")
        .arg("GRAALVM_EE_8")
        .arg("--phases")
        .arg("STEADY_STATE")
        .arg(fixture())
        .output()
        .unwrap();
    assert!(output.status.success());

    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let chart = parsed["charts"]
        .as_array()
        .unwrap()
        .iter()
        .find(|c| c["name"] == "H2_STEADY_STATE")
        .expect("H2 chart present");
    assert_eq!(chart["series"]["baseline"], "GRAALVM_EE_8");
    assert_eq!(chart["series"]["points"][2]["mean"], 1.0);
    assert_eq!(chart["series"]["points"][0]["mean"], 1.25);
}

#[test]
fn test_csv_header() {
    benchmatrix()
        .arg("--format")
        .arg("csv")
        .arg(fixture())
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "artifact,kind,row,column,value,mean,error,min,max\n",
        ))
        .stdout(predicate::str::contains(
            "H2_STARTUP_heatmap,heatmap,OPENJDK_8,GRAALVM_EE_8,-1,,,,",
        ))
        .stdout(predicate::str::contains(
            "TOTAL_STARTUP_heatmap,total,GRAALVM_EE_8,GRAALVM_CE_8,2,,,,",
        ));
}

#[test]
fn test_html_written_to_output_file() {
    let dir = tempfile::tempdir().unwrap();
    let report = dir.path().join("report.html");

    benchmatrix()
        .arg("--format")
        .arg("html")
        .arg("--output")
        .arg(&report)
        .arg(fixture())
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let html = std::fs::read_to_string(&report).unwrap();
    assert!(html.contains("<!DOCTYPE html>"));
    assert!(html.contains("id=\"TOTAL_STEADY_STATE_heatmap\""));
    assert!(html.contains("id=\"SUNFLOW_STARTUP\""));
    assert!(html.contains("<svg"));
}

#[test]
fn test_svg_writes_one_file_per_artifact() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("plots");

    benchmatrix()
        .arg("--format")
        .arg("svg")
        .arg("-o")
        .arg(&out)
        .arg(fixture())
        .assert()
        .success()
        .stdout(predicate::str::contains("H2_STARTUP_heatmap.svg"));

    for name in [
        "H2_STARTUP_heatmap",
        "SUNFLOW_STEADY_STATE_heatmap",
        "TOTAL_STARTUP_heatmap",
        "TOTAL_STEADY_STATE_heatmap",
        "H2_STARTUP",
        "SUNFLOW_STEADY_STATE",
    ] {
        assert!(out.join(format!("{}.svg", name)).exists(), "{} missing", name);
    }
    assert_eq!(std::fs::read_dir(&out).unwrap().count(), 10);
}

#[test]
fn test_svg_requires_output_dir() {
    benchmatrix()
        .arg("--format")
        .arg("svg")
        .arg(fixture())
        .assert()
        .failure()
        .stderr(predicate::str::contains("--format svg requires --output"));
}

#[test]
fn test_matrices_only_skips_charts() {
    let output = benchmatrix()
        .arg("--format")
        .arg("json")
        .arg("--matrices-only")
        .arg(fixture())
        .output()
        .unwrap();
    assert!(output.status.success());

    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(parsed["summary"]["charts"], 0);
    assert_eq!(parsed["summary"]["heatmaps"], 6);
}

#[test]
fn test_print_records() {
    benchmatrix()
        .arg("--print-records")
        .arg("--charts-only")
        .arg(fixture())
        .assert()
        .success()
        .stdout(predicate::str::contains("Phase : Steady state"))
        .stdout(predicate::str::contains("Confidence interval lower : 4280.0000"));
}
