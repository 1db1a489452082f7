use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("snip-babel")
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn copy_fixtures(dir: &Path, names: &[&str]) {
    for name in names {
        fs::copy(fixture_path(name), dir.join(name)).unwrap();
    }
}

#[test]
fn converts_tmsnippet_to_cson() {
    let out = tempdir().unwrap();
    let mut cmd = cargo_bin_cmd!("snip");
    cmd.arg(fixture_path("log.tmSnippet")).arg("-d").arg(out.path());

    cmd.assert()
        .success()
        .stderr(predicate::str::contains("Writing 'log.cson'"));

    let cson = fs::read_to_string(out.path().join("log.cson")).unwrap();
    assert!(cson.starts_with("# Generated with snip"));
    assert!(cson.contains("'prefix': 'log'"));
}

#[test]
fn split_json_writes_one_file_per_snippet() {
    let out = tempdir().unwrap();
    let mut cmd = cargo_bin_cmd!("snip");
    cmd.arg(fixture_path("console.sublime-completions"))
        .args(["-o", "json", "--split", "-d"])
        .arg(out.path());

    cmd.assert().success();

    assert!(out.path().join("foo.json").is_file());
    assert!(out.path().join("bar.json").is_file());
}

#[test]
fn directory_input_uses_package_layout() {
    let input = tempdir().unwrap();
    copy_fixtures(input.path(), &["log.tmSnippet", "warn.tmSnippet"]);
    let out = tempdir().unwrap();

    let mut cmd = cargo_bin_cmd!("snip");
    cmd.arg(input.path()).arg("--merge").arg("-d").arg(out.path());

    cmd.assert().success();

    assert!(out.path().join("snippets").join("snippets.cson").is_file());
}

#[test]
fn glob_pattern_selects_inputs() {
    let input = tempdir().unwrap();
    copy_fixtures(input.path(), &["log.tmSnippet", "warn.tmSnippet", "if.sublime-snippet"]);
    let out = tempdir().unwrap();

    let mut cmd = cargo_bin_cmd!("snip");
    cmd.arg(format!("{}/*.tmSnippet", input.path().display()))
        .arg("-d")
        .arg(out.path());

    cmd.assert().success();

    assert!(out.path().join("log.cson").is_file());
    assert!(out.path().join("warn.cson").is_file());
    assert!(!out.path().join("if.cson").exists());
}

#[test]
fn strict_duplicates_fail_the_run() {
    let out = tempdir().unwrap();
    let mut cmd = cargo_bin_cmd!("snip");
    cmd.arg(fixture_path("log.tmSnippet"))
        .arg(fixture_path("log-verbose.tmSnippet"))
        .args(["--merge", "--strict-dupes", "-d"])
        .arg(out.path());

    cmd.assert()
        .code(1)
        .stderr(predicate::str::contains("Duplicate trigger"));

    assert!(fs::read_dir(out.path()).unwrap().next().is_none());
}

#[test]
fn invalid_input_reports_error() {
    let out = tempdir().unwrap();
    let mut cmd = cargo_bin_cmd!("snip");
    cmd.arg(fixture_path("broken.sublime-snippet"))
        .arg("-d")
        .arg(out.path());

    cmd.assert()
        .code(1)
        .stderr(predicate::str::contains("Error:").and(predicate::str::contains("broken")));
}

#[test]
fn silent_mode_prints_nothing_on_failure() {
    let out = tempdir().unwrap();
    let mut cmd = cargo_bin_cmd!("snip");
    cmd.arg(fixture_path("broken.sublime-snippet"))
        .arg("--silent")
        .arg("-d")
        .arg(out.path());

    cmd.assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::is_empty());
}

#[test]
fn no_validation_turns_malformed_input_into_parse_error() {
    let out = tempdir().unwrap();
    let mut cmd = cargo_bin_cmd!("snip");
    cmd.arg(fixture_path("broken.sublime-snippet"))
        .args(["--no-validation", "-d"])
        .arg(out.path());

    cmd.assert().code(1).stderr(
        predicate::str::contains("Could not parse")
            .and(predicate::str::contains("Invalid XML").not()),
    );
}

#[test]
fn config_file_sets_output_format() {
    let work = tempdir().unwrap();
    let config = work.path().join("snip.toml");
    fs::write(&config, "[convert]\noutput_format = \"json\"\n").unwrap();

    let mut cmd = cargo_bin_cmd!("snip");
    cmd.arg(fixture_path("warn.tmSnippet"))
        .arg("-c")
        .arg(&config)
        .arg("-d")
        .arg(work.path());

    cmd.assert().success();

    assert!(work.path().join("warn.json").is_file());
}

#[test]
fn merge_with_split_writes_one_file_per_merged_entry() {
    let out = tempdir().unwrap();
    let mut cmd = cargo_bin_cmd!("snip");
    cmd.arg(fixture_path("log.tmSnippet"))
        .arg(fixture_path("warn.tmSnippet"))
        .args(["--merge", "--split", "-d"])
        .arg(out.path());

    cmd.assert().success();

    let mut names: Vec<_> = fs::read_dir(out.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    assert_eq!(names, vec!["log.cson", "warn.cson"]);
}

#[test]
fn local_config_file_is_picked_up() {
    let work = tempdir().unwrap();
    fs::write(
        work.path().join("snip.toml"),
        "[convert]\noutput_format = \"json\"\n",
    )
    .unwrap();

    let mut cmd = cargo_bin_cmd!("snip");
    cmd.current_dir(work.path())
        .arg(fixture_path("warn.tmSnippet"))
        .arg("-d")
        .arg(work.path());

    cmd.assert().success();

    assert!(work.path().join("warn.json").is_file());
}

#[test]
fn list_formats_shows_readers_and_writers() {
    let mut cmd = cargo_bin_cmd!("snip");
    cmd.arg("--list-formats");

    let output_pred = predicate::str::contains("textmate (input)")
        .and(predicate::str::contains("json (input, output)"))
        .and(predicate::str::contains("cson (output)"));

    cmd.assert().success().stdout(output_pred);
}
