//! CLI integration tests for lucene commands.
//!
//! These tests focus on exit codes, JSON output and basic behavioral verification rather
//! than exact human-readable formatting.

// Integration tests live outside cfg(test) by design
#![allow(clippy::tests_outside_test_module)]

use std::{fs, path::Path};

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;

/// Helper to create a temp directory for tests.
fn temp_dir() -> tempfile::TempDir {
    tempfile::tempdir().unwrap()
}

/// Helper to get a lucene command.
fn lucene() -> Command {
    #[allow(deprecated)]
    Command::cargo_bin("lucene").unwrap()
}

/// Helper to run `lucene` in `dir` with HOME isolated to it.
fn lucene_in(dir: &Path) -> Command {
    let mut cmd = lucene();
    cmd.env("HOME", dir).env_remove("RUST_LOG").current_dir(dir);
    cmd
}

/// Runs `lucene` with `args` in `dir` and parses stdout as JSON.
fn json_output(dir: &Path, args: &[&str]) -> Value {
    let output = lucene_in(dir).args(args).output().unwrap();
    assert!(output.status.success(), "{output:?}");
    serde_json::from_slice(&output.stdout).unwrap()
}

/// Strips ANSI escape sequences from a string.
fn strip_ansi(input: &str) -> String {
    let mut output = String::with_capacity(input.len());
    let mut chars = input.chars();

    while let Some(ch) = chars.next() {
        if ch == '\u{1b}' {
            for c in chars.by_ref() {
                if c == 'm' {
                    break;
                }
            }
        } else {
            output.push(ch);
        }
    }

    output
}

/// A schema with a status field.
const STATUS_CONFIG: &str = r#"
root = true

[[field]]
key = "status"
values = ["active", "inactive", "pending"]
"#;

mod tokenize {
    use super::*;

    #[test]
    fn json_tokens() {
        let dir = temp_dir();
        let tokens = json_output(dir.path(), &["tokenize", "title:test", "--json"]);

        assert_eq!(
            tokens,
            serde_json::json!([
                {"kind": "field", "text": "title", "start": 0, "end": 5},
                {"kind": "operator", "text": ":", "start": 5, "end": 6},
                {"kind": "value", "text": "test", "start": 6, "end": 10},
            ])
        );
    }

    #[test]
    fn table_output() {
        let dir = temp_dir();
        lucene_in(dir.path())
            .args(["tokenize", "date:[2023-01-01 TO 2023-12-31]"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Range"))
            .stdout(predicate::str::contains("[2023-01-01 TO 2023-12-31]"));
    }

    #[test]
    fn empty_query() {
        let dir = temp_dir();
        let tokens = json_output(dir.path(), &["tokenize", "", "--json"]);
        assert_eq!(tokens, serde_json::json!([]));
    }
}

mod context {
    use super::*;

    #[test]
    fn range_context() {
        let dir = temp_dir();
        let out = json_output(
            dir.path(),
            &["context", "date:[2023-01-01 TO 2023-12-31]", "--cursor", "15", "--json"],
        );

        assert_eq!(out["cursor"], 15);
        assert_eq!(out["context"]["is_in_range"], true);
        assert_eq!(out["context"]["is_in_field"], false);
        assert_eq!(out["context"]["current_node"], Value::Null);
    }

    #[test]
    fn field_after_comparison() {
        let dir = temp_dir();
        let out = json_output(dir.path(), &["context", "score>=", "--json"]);

        assert_eq!(out["field"]["field_name"], "score");
        assert_eq!(out["field"]["is_after_comparison"], true);
        assert_eq!(out["field"]["is_after_colon"], false);
    }

    #[test]
    fn cursor_past_end_fails() {
        let dir = temp_dir();
        lucene_in(dir.path())
            .args(["context", "abc", "--cursor", "4"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("error: cursor 4"));
    }

    #[test]
    fn human_output() {
        let dir = temp_dir();
        let output = lucene_in(dir.path())
            .args(["context", "status:"])
            .output()
            .unwrap();
        assert!(output.status.success());
        let stdout = strip_ansi(&String::from_utf8_lossy(&output.stdout));
        assert!(stdout.contains("field:            status"));
        assert!(stdout.contains("after colon:      yes"));
    }
}

mod complete {
    use super::*;

    /// Labels of JSON completion items.
    fn labels(items: &Value) -> Vec<&str> {
        items
            .as_array()
            .unwrap()
            .iter()
            .map(|i| i["label"].as_str().unwrap())
            .collect()
    }

    #[test]
    fn schema_values_after_colon() {
        let dir = temp_dir();
        fs::write(dir.path().join(".lucene.toml"), STATUS_CONFIG).unwrap();

        let items = json_output(dir.path(), &["complete", "status:", "--json", "--no-snippets"]);

        let values: Vec<_> = items
            .as_array()
            .unwrap()
            .iter()
            .filter(|i| i["kind"] == "value")
            .map(|i| i["label"].as_str().unwrap())
            .collect();
        assert_eq!(values, vec!["active", "inactive", "pending"]);
        assert!(labels(&items).contains(&"\\:"));
        assert!(!labels(&items).contains(&"AND"));
    }

    #[test]
    fn empty_query_without_config() {
        let dir = temp_dir();
        let items = json_output(dir.path(), &["complete", "", "--json"]);

        let items = items.as_array().unwrap();
        let count = |kind: &str| items.iter().filter(|i| i["kind"] == kind).count();
        assert_eq!(count("field"), 12);
        assert_eq!(count("operator"), 13 + 2);
        assert_eq!(count("snippet"), 8);
        assert_eq!(count("text"), 19);
    }

    #[test]
    fn config_can_disable_snippets() {
        let dir = temp_dir();
        fs::write(
            dir.path().join(".lucene.toml"),
            "root = true\n[editor]\nsnippets = false\n",
        )
        .unwrap();

        let items = json_output(dir.path(), &["complete", "", "--json"]);

        assert!(!labels(&items).contains(&"regex"));
    }

    #[test]
    fn range_keywords_inside_range() {
        let dir = temp_dir();
        let items = json_output(
            dir.path(),
            &["complete", "date:[1 TO 5]", "--cursor", "8", "--json"],
        );

        assert_eq!(labels(&items), vec!["TO", "*"]);
    }

    #[test]
    fn explicit_word() {
        let dir = temp_dir();
        let items = json_output(
            dir.path(),
            &["complete", "a AND ", "--word", "", "--json", "--no-snippets"],
        );

        assert!(labels(&items).contains(&"title"));
    }

    #[test]
    fn invalid_config_fails() {
        let dir = temp_dir();
        fs::write(dir.path().join(".lucene.toml"), "root = = true").unwrap();

        lucene_in(dir.path())
            .args(["complete", "x"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("failed to load configuration"));
    }
}

mod highlight {
    use super::*;

    #[test]
    fn json_scopes() {
        let dir = temp_dir();
        let spans = json_output(dir.path(), &["highlight", "title:\"a b\"~2", "--json"]);

        let scopes: Vec<_> = spans
            .as_array()
            .unwrap()
            .iter()
            .map(|s| s["scope"].as_str().unwrap())
            .collect();
        assert_eq!(scopes, vec!["field", "delimiter.colon", "string.proximity"]);
    }

    #[test]
    fn colored_output_keeps_text() {
        let dir = temp_dir();
        let output = lucene_in(dir.path())
            .args(["highlight", "a AND [1 TO *]"])
            .output()
            .unwrap();
        assert!(output.status.success());
        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(stdout.contains('\u{1b}'));
        assert_eq!(strip_ansi(&stdout), "a AND [1 TO *]\n");
    }
}

mod schema {
    use super::*;

    #[test]
    fn shows_effective_fields() {
        let dir = temp_dir();
        fs::write(dir.path().join(".lucene.toml"), STATUS_CONFIG).unwrap();

        let output = lucene_in(dir.path()).arg("schema").output().unwrap();
        assert!(output.status.success());
        let stdout = strip_ansi(&String::from_utf8_lossy(&output.stdout));
        assert!(stdout.contains("[[field]]"));
        assert!(stdout.contains("key = \"status\""));
        assert!(stdout.contains("snippets = true"));
    }
}

mod check {
    use super::*;

    #[test]
    fn no_config_is_ok() {
        let dir = temp_dir();
        lucene_in(dir.path())
            .arg("check")
            .assert()
            .success()
            .stdout(predicate::str::contains("No configuration files found."));
    }

    #[test]
    fn valid_config() {
        let dir = temp_dir();
        fs::write(dir.path().join(".lucene.toml"), STATUS_CONFIG).unwrap();

        lucene_in(dir.path())
            .arg("check")
            .assert()
            .success()
            .stdout(predicate::str::contains("No issues found."));
    }

    #[test]
    fn warnings_fail() {
        let dir = temp_dir();
        fs::write(
            dir.path().join(".lucene.toml"),
            "root = true\n[[field]]\nkey = \"first-name\"\n",
        )
        .unwrap();

        let output = lucene_in(dir.path()).arg("check").output().unwrap();
        assert!(!output.status.success());
        let stdout = strip_ansi(&String::from_utf8_lossy(&output.stdout));
        assert!(stdout.contains("Warnings (2):"));
        assert!(stdout.contains("field 'first-name' has no values"));
        assert!(stdout.contains("Hints:"));
    }
}

mod init {
    use super::*;

    #[test]
    fn creates_config_file() {
        let dir = temp_dir();

        lucene_in(dir.path()).arg("init").assert().success();

        let contents = fs::read_to_string(dir.path().join(".lucene.toml")).unwrap();
        assert!(contents.contains("# [[field]]"));
    }

    #[test]
    fn fails_if_config_exists() {
        let dir = temp_dir();
        fs::write(dir.path().join(".lucene.toml"), "existing").unwrap();

        lucene_in(dir.path())
            .arg("init")
            .assert()
            .failure()
            .stderr(predicate::str::contains("use --force to overwrite"));
    }

    #[test]
    fn force_overwrites_existing() {
        let dir = temp_dir();
        fs::write(dir.path().join(".lucene.toml"), "old content").unwrap();

        lucene_in(dir.path())
            .args(["init", "--force"])
            .assert()
            .success();

        let contents = fs::read_to_string(dir.path().join(".lucene.toml")).unwrap();
        assert!(contents.contains("# [[field]]"));
    }

    #[test]
    fn init_succeeds_with_broken_config() {
        let dir = temp_dir();
        fs::write(dir.path().join(".lucene.toml"), "root = = true").unwrap();

        lucene_in(dir.path())
            .args(["init", "--force"])
            .assert()
            .success();
    }

    #[test]
    fn check_after_init_reports_no_fields() {
        let dir = temp_dir();
        lucene_in(dir.path()).arg("init").assert().success();

        lucene_in(dir.path())
            .arg("check")
            .assert()
            .failure()
            .stdout(predicate::str::contains("no fields are defined"));
    }
}

mod logging {
    use super::*;

    #[test]
    fn verbose_logs_to_stderr() {
        let dir = temp_dir();
        fs::write(dir.path().join(".lucene.toml"), STATUS_CONFIG).unwrap();

        let output = lucene_in(dir.path())
            .args(["-v", "complete", "status:", "--json"])
            .output()
            .unwrap();
        assert!(output.status.success());
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("found config file"));
        serde_json::from_slice::<Value>(&output.stdout).unwrap();
    }

    #[test]
    fn quiet_by_default() {
        let dir = temp_dir();
        lucene_in(dir.path())
            .args(["complete", "x", "--json"])
            .assert()
            .success()
            .stderr(predicate::str::is_empty());
    }
}
