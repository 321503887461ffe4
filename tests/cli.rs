use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

const DATA: &str = r#"{
  "EXP": {
    "2024": [{"name": "Brazil", "us_value": 2000000000}],
    "2025": [{"name": "Brazil", "us_value": 5000000000}, {"name": "Chile", "us_value": 1234560000}]
  },
  "IMP": {"2025": [{"name": "Brazil", "us_value": 3000000000}]},
  "BAL": {"2025": [{"name": "Brazil", "us_value": 2000000000}]}
}"#;

fn write_data(dir: &Path) -> PathBuf {
    let path = dir.join("data.json");
    fs::write(&path, DATA).unwrap();
    path
}

#[test]
fn cli_shows_help() {
    let mut cmd = Command::cargo_bin("tmon").unwrap();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("tmon"));
}

#[test]
fn map_prints_comma_amounts() {
    let dir = tempfile::tempdir().unwrap();
    let data = write_data(dir.path());
    let mut cmd = Command::cargo_bin("tmon").unwrap();
    cmd.args(["map", "--data"]).arg(&data).args(["--year", "2025"]);
    cmd.assert()
        .success()
        .stdout(predicate::eq("Brazil\t5,0\nChile\t1,2\n"));
}

#[test]
fn series_fills_missing_years_with_zero() {
    let dir = tempfile::tempdir().unwrap();
    let data = write_data(dir.path());
    let mut cmd = Command::cargo_bin("tmon").unwrap();
    cmd.args(["series", "--data"])
        .arg(&data)
        .args(["--country", "Chile"]);
    cmd.assert()
        .success()
        .stdout(predicate::eq("2024\t0,0\n2025\t1,2\n"));
}

#[test]
fn series_saves_json() {
    let dir = tempfile::tempdir().unwrap();
    let data = write_data(dir.path());
    let out = dir.path().join("brazil.json");
    let mut cmd = Command::cargo_bin("tmon").unwrap();
    cmd.args(["series", "--metric", "imp", "--country", "Brazil", "--data"])
        .arg(&data)
        .arg("--out")
        .arg(&out);
    cmd.assert().success();
    let v: serde_json::Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(v["years"], serde_json::json!(["2025"]));
    assert_eq!(v["values"], serde_json::json!([3.0]));
}

#[test]
fn render_writes_options_and_page() {
    let dir = tempfile::tempdir().unwrap();
    let data = write_data(dir.path());
    let out_dir = dir.path().join("out");
    let mut cmd = Command::cargo_bin("tmon").unwrap();
    cmd.args(["render", "--country", "Brazil", "--events", "metric:BAL", "--data"])
        .arg(&data)
        .arg("--out-dir")
        .arg(&out_dir);
    cmd.assert().success();

    let map: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(out_dir.join("map.json")).unwrap()).unwrap();
    assert_eq!(map["title"]["text"], "Volume de Balança Comercial (2025)");
    let line: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(out_dir.join("line.json")).unwrap()).unwrap();
    assert_eq!(line["title"]["text"], "Totais por ano (Brazil)");
    let html = fs::read_to_string(out_dir.join("dashboard.html")).unwrap();
    assert!(html.contains("echarts.init"));
    assert!(html.contains(r#"mapChart.on("click""#));
    assert!(html.contains(r#"<option value="BAL" selected>"#));
    assert!(html.contains(r#""lines":{"Brazil":{"#));
    assert!(html.contains(r#""Chile":{"title":{"text":"Totais por ano (Chile)""#));
}

#[test]
fn render_without_click_skips_line() {
    let dir = tempfile::tempdir().unwrap();
    let data = write_data(dir.path());
    let mut cmd = Command::cargo_bin("tmon").unwrap();
    cmd.args(["render", "--data"])
        .arg(&data)
        .arg("--out-dir")
        .arg(dir.path());
    cmd.assert().success();
    assert!(dir.path().join("map.json").exists());
    assert!(!dir.path().join("line.json").exists());
}

#[test]
fn rerender_without_click_removes_old_line() {
    let dir = tempfile::tempdir().unwrap();
    let data = write_data(dir.path());
    let line = dir.path().join("line.json");

    let mut cmd = Command::cargo_bin("tmon").unwrap();
    cmd.args(["render", "--country", "Chile", "--data"])
        .arg(&data)
        .arg("--out-dir")
        .arg(dir.path());
    cmd.assert().success();
    assert!(line.exists());

    let mut cmd = Command::cargo_bin("tmon").unwrap();
    cmd.args(["render", "--data"])
        .arg(&data)
        .arg("--out-dir")
        .arg(dir.path());
    cmd.assert().success();
    assert!(!line.exists());
    assert!(dir.path().join("dashboard.html").exists());
}

#[test]
fn bad_event_and_missing_file_fail() {
    let dir = tempfile::tempdir().unwrap();
    let data = write_data(dir.path());
    let mut cmd = Command::cargo_bin("tmon").unwrap();
    cmd.args(["render", "--events", "zoom:3", "--data"])
        .arg(&data)
        .arg("--out-dir")
        .arg(dir.path());
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("invalid event"));

    let mut cmd = Command::cargo_bin("tmon").unwrap();
    cmd.args(["map", "--data"]).arg(dir.path().join("missing.json"));
    cmd.assert().failure();
}
