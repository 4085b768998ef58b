use assert_cmd::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::{tempdir, TempDir};

const HEADER: &str = "commit,file,line,type,depth,length,author,date,time,timezone,datetime\n";

fn write_csv(dir: &Path, rows: &str) -> PathBuf {
    let path = dir.join("loc.csv");
    fs::write(&path, format!("{HEADER}{rows}")).unwrap();
    path
}

/// The two-commit fixture: `a1` with two ts lines at 09:00, `b2` with one css line at 15:30.
fn fixture() -> (TempDir, PathBuf, PathBuf) {
    let dir = tempdir().unwrap();
    let data = write_csv(
        dir.path(),
        "a1,src/main.ts,1,ts,1,20,kim,2024-01-01,09:00:00+00:00,+00:00,2024-01-01T09:00:00+00:00\n\
         a1,src/main.ts,2,ts,1,18,kim,2024-01-01,09:00:00+00:00,+00:00,2024-01-01T09:00:00+00:00\n\
         b2,style.css,1,css,0,12,kim,2024-01-02,15:30:00+00:00,+00:00,2024-01-02T15:30:00+00:00\n",
    );
    let config = dir.path().join("config.toml");
    fs::write(
        &config,
        "theme = \"dark\"\n[site]\ncommit_url_base = \"https://example.com/commit\"\n",
    )
    .unwrap();
    (dir, data, config)
}

fn locmeta(data: &Path, config: &Path) -> Command {
    let mut cmd = Command::cargo_bin("locmeta").unwrap();
    cmd.arg("--data").arg(data).arg("--config").arg(config);
    cmd
}

fn json_of(cmd: &mut Command) -> serde_json::Value {
    let output = cmd.output().unwrap();
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn stats_json_reports_dataset_summary() {
    let (_dir, data, config) = fixture();
    let v = json_of(locmeta(&data, &config).args(["stats", "--json"]));
    assert_eq!(v["version"], 1);
    assert_eq!(v["stats"]["commits"], 2);
    assert_eq!(v["stats"]["total_loc"], 3);
    assert_eq!(v["stats"]["files"], 2);
    assert_eq!(v["stats"]["max_depth"], 1);
}

#[test]
fn commits_json_is_time_ordered_with_urls() {
    let (_dir, data, config) = fixture();
    let v = json_of(locmeta(&data, &config).args(["commits", "--json"]));
    let commits = v["commits"].as_array().unwrap();
    assert_eq!(commits.len(), 2);
    assert_eq!(commits[0]["id"], "a1");
    assert_eq!(commits[0]["total_lines"], 2);
    assert_eq!(commits[0]["hour_frac"], 9.0);
    assert_eq!(commits[0]["url"], "https://example.com/commit/a1");
    assert_eq!(commits[1]["hour_frac"], 15.5);
}

#[test]
fn commits_until_cuts_at_cursor() {
    let (_dir, data, config) = fixture();
    let v = json_of(locmeta(&data, &config).args([
        "commits",
        "--json",
        "--until",
        "2024-01-01T12:00:00Z",
    ]));
    assert_eq!(v["commits"].as_array().unwrap().len(), 1);
    assert_eq!(v["until"], "2024-01-01T12:00:00Z");
}

#[test]
fn commits_ndjson_has_one_line_per_commit() {
    let (_dir, data, config) = fixture();
    let output = locmeta(&data, &config)
        .args(["commits", "--ndjson"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(stdout.lines().count(), 2);
    for line in stdout.lines() {
        let _: serde_json::Value = serde_json::from_str(line).unwrap();
    }
}

#[test]
fn breakdown_without_selection_falls_back_to_all() {
    let (_dir, data, config) = fixture();
    let v = json_of(locmeta(&data, &config).args(["breakdown", "--json"]));
    assert_eq!(v["mode"], "idle");
    assert_eq!(v["selection_label"], "No commits selected");
    assert_eq!(v["fallback_to_full_dataset"], true);
    assert_eq!(v["breakdown"]["total_lines"], 3);
    assert_eq!(v["breakdown"]["languages"][0]["language"], "ts");
    assert_eq!(v["breakdown"]["languages"][0]["count"], 2);
}

#[test]
fn breakdown_of_full_brush_selects_everything() {
    let (_dir, data, config) = fixture();
    let v = json_of(locmeta(&data, &config).args([
        "breakdown",
        "--json",
        "--brush",
        "0,0,1000,600",
    ]));
    assert_eq!(v["mode"], "brush");
    assert_eq!(v["selection_count"], 2);
    assert_eq!(v["selection_label"], "2 commits selected");
    assert_eq!(v["fallback_to_full_dataset"], false);
}

#[test]
fn breakdown_with_cursor_before_all_commits() {
    let (_dir, data, config) = fixture();
    let v = json_of(locmeta(&data, &config).args([
        "breakdown",
        "--json",
        "--until",
        "2023-12-31",
    ]));
    assert_eq!(v["mode"], "cursor");
    assert_eq!(v["visible_count"], 0);
    assert_eq!(v["fallback_to_full_dataset"], true);
    assert_eq!(v["breakdown"]["total_lines"], 3);
}

#[test]
fn zero_width_brush_selects_nothing() {
    let (_dir, data, config) = fixture();
    let v = json_of(locmeta(&data, &config).args([
        "breakdown",
        "--json",
        "--brush",
        "5,5,5,100",
    ]));
    assert_eq!(v["mode"], "brush");
    assert_eq!(v["selection_count"], 0);
    assert_eq!(v["selection_label"], "No commits selected");
    assert_eq!(v["fallback_to_full_dataset"], true);
}

#[test]
fn malformed_brush_is_rejected_by_the_parser() {
    let (_dir, data, config) = fixture();
    locmeta(&data, &config)
        .args(["breakdown", "--brush", "5,5,100"])
        .assert()
        .failure();
}

#[test]
fn plot_writes_svg_file() {
    let (dir, data, config) = fixture();
    let out = dir.path().join("plot.svg");
    locmeta(&data, &config)
        .args(["plot", "--brush", "0,0,1000,600", "--out"])
        .arg(&out)
        .assert()
        .success();
    let svg = fs::read_to_string(&out).unwrap();
    assert!(svg.starts_with("<svg"));
    assert_eq!(svg.matches("<circle").count(), 2);
    assert!(svg.contains("color-scheme: dark"));
    assert!(svg.contains("2 commits selected"));
}

#[test]
fn story_json_has_one_step_per_commit() {
    let (_dir, data, config) = fixture();
    let v = json_of(locmeta(&data, &config).args(["story", "--json"]));
    let steps = v["steps"].as_array().unwrap();
    assert_eq!(steps.len(), 2);
    let first = steps[0]["text"].as_str().unwrap();
    assert!(first.contains("my first commit, and it was glorious"));
    assert!(first.contains("I edited 2 lines across 1 files"));
    assert!(steps[1]["text"].as_str().unwrap().contains("another glorious commit"));
}

#[test]
fn files_json_groups_lines_by_file() {
    let (_dir, data, config) = fixture();
    let v = json_of(locmeta(&data, &config).args(["files", "--json"]));
    let files = v["files"].as_array().unwrap();
    assert_eq!(files.len(), 2);
    assert_eq!(files[0]["name"], "src/main.ts");
    assert_eq!(files[0]["lines"], 2);
    assert_eq!(files[0]["swatches"].as_array().unwrap().len(), 2);
}

#[test]
fn load_fails_on_missing_commit_id() {
    let dir = tempdir().unwrap();
    let data = write_csv(
        dir.path(),
        "a1,a.ts,1,ts,0,1,kim,2024-01-01,09:00,Z,2024-01-01T09:00\n\
         ,b.ts,1,ts,0,1,kim,2024-01-01,09:00,Z,2024-01-01T09:00\n",
    );
    let config = dir.path().join("config.toml");
    fs::write(&config, "").unwrap();
    let output = locmeta(&data, &config).args(["stats"]).output().unwrap();
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("missing required field `commit`"), "stderr: {stderr}");
}

#[test]
fn missing_data_file_is_an_error() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("config.toml");
    fs::write(&config, "").unwrap();
    locmeta(&dir.path().join("absent.csv"), &config)
        .args(["stats"])
        .assert()
        .failure();
}

#[test]
fn projects_json_sorts_and_filters() {
    let dir = tempdir().unwrap();
    let source = dir.path().join("projects.json");
    fs::write(
        &source,
        r#"[{"title": "Lab 1", "year": "2023"}, {"title": "Lab 2", "year": 2024}, {"year": "2022"}]"#,
    )
    .unwrap();

    let mut cmd = Command::cargo_bin("locmeta").unwrap();
    cmd.args(["projects", "--json", "--source"]).arg(&source);
    let v = json_of(&mut cmd);
    let projects = v["projects"].as_array().unwrap();
    assert_eq!(projects.len(), 3);
    assert_eq!(projects[0]["title"], "Lab 2");
    assert_eq!(projects[2]["title"], "Untitled");
    assert_eq!(v["slices"].as_array().unwrap().len(), 3);

    let mut cmd = Command::cargo_bin("locmeta").unwrap();
    cmd.args(["projects", "--json", "--query", "lab", "--year", "2023", "--source"])
        .arg(&source);
    let v = json_of(&mut cmd);
    assert_eq!(v["projects"].as_array().unwrap().len(), 1);
    assert_eq!(v["slices"].as_array().unwrap().len(), 2);
}

#[test]
fn projects_from_missing_source_is_empty() {
    let dir = tempdir().unwrap();
    let mut cmd = Command::cargo_bin("locmeta").unwrap();
    cmd.args(["projects", "--json", "--source"])
        .arg(dir.path().join("nope.json"));
    let v = json_of(&mut cmd);
    assert!(v["projects"].as_array().unwrap().is_empty());
}

#[test]
fn profile_reads_counters_from_users_endpoint() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("kim"),
        r#"{"login": "kim", "public_repos": 12, "followers": 3, "following": 4, "public_gists": 1}"#,
    )
    .unwrap();

    let mut cmd = Command::cargo_bin("locmeta").unwrap();
    cmd.args(["profile", "kim", "--json", "--api"]).arg(dir.path());
    let v = json_of(&mut cmd);
    assert_eq!(v["profile"]["public_repos"], 12);
    assert_eq!(v["profile"]["followers"], 3);

    let mut cmd = Command::cargo_bin("locmeta").unwrap();
    cmd.args(["profile", "nobody", "--json", "--api"]).arg(dir.path());
    let v = json_of(&mut cmd);
    assert!(v["profile"].is_null());
}

#[test]
fn theme_is_persisted_to_config() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("config.toml");
    fs::write(&config, "[plot]\nwidth = 800\n").unwrap();

    let mut cmd = Command::cargo_bin("locmeta").unwrap();
    cmd.arg("--config").arg(&config).args(["theme", "light"]);
    cmd.assert().success();

    let saved = fs::read_to_string(&config).unwrap();
    assert!(saved.contains("theme = \"light\""));
    assert!(saved.contains("width = 800"));

    let output = Command::cargo_bin("locmeta")
        .unwrap()
        .arg("--config")
        .arg(&config)
        .arg("theme")
        .output()
        .unwrap();
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "light");
}
