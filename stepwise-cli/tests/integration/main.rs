// Copyright (c) The stepwise Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the `stepwise` binary.
//!
//! Each test writes trace files (and optionally a config file) into a temporary project directory,
//! runs the binary against them, and checks its stdout, stderr and exit code.

use camino::{Utf8Path, Utf8PathBuf};
use camino_tempfile::Utf8TempDir;
use indoc::{formatdoc, indoc};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use stepwise_cli::StepwiseExitCode;

mod fixtures;

use fixtures::StepwiseCli;

struct TempProject {
    dir: Utf8TempDir,
}

impl TempProject {
    fn new() -> Self {
        let dir = camino_tempfile::tempdir().expect("created temp dir");
        Self { dir }
    }

    fn root(&self) -> &Utf8Path {
        self.dir.path()
    }

    /// Writes a trace for a test at `tests/<name>.test`, and returns the trace file's path.
    fn write_trace(&self, name: &str, steps: Value) -> Utf8PathBuf {
        let trace = json!({
            "test": {
                "name": name,
                "path": self.root().join("tests").join(format!("{name}.test")).to_string(),
            },
            "steps": steps,
        });
        self.write_file(&format!("traces/{name}.json"), &trace.to_string())
    }

    fn write_config(&self, contents: &str) -> Utf8PathBuf {
        self.write_file(".config/stepwise.toml", contents)
    }

    fn write_file(&self, rel_path: &str, contents: &str) -> Utf8PathBuf {
        let path = self.root().join(rel_path);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("created parent dir");
        }
        std::fs::write(&path, contents).expect("wrote file");
        path
    }

    fn render<P: AsRef<Utf8Path>>(&self, traces: &[P]) -> StepwiseCli {
        let mut cli = StepwiseCli::new();
        cli.args(["render", "--project-root", self.root().as_str()])
            .args(traces.iter().map(|trace| trace.as_ref().as_str()));
        cli
    }
}

fn passing_steps() -> Value {
    json!([
        {
            "name": "open home page",
            "status": "passed",
            "completed_statement_lines": [
                {
                    "passed": true,
                    "statement": {
                        "type": "encapsulating",
                        "source": "open \"https://test.dev/\"",
                        "relation": "resolved",
                        "inner": { "type": "plain", "source": "open $data.url" }
                    }
                },
                {
                    "passed": true,
                    "statement": {
                        "type": "plain",
                        "source": "$page.title is \"Home\"",
                        "kind": { "assertion": "is" }
                    }
                }
            ]
        }
    ])
}

fn data_driven_failure() -> Value {
    json!([
        {
            "name": "verify page is open",
            "status": "failed",
            "current_data_set": {
                "index": 1,
                "name": "other page",
                "values": { "pattern": "/example/", "title": "Example" }
            },
            "completed_statement_lines": [
                {
                    "passed": true,
                    "statement": { "type": "plain", "source": "wait for $page" }
                }
            ],
            "failed_statement_line": {
                "passed": false,
                "statement": {
                    "type": "encapsulating",
                    "source": "$page.url matches /example/",
                    "kind": { "assertion": "matches" },
                    "relation": "resolved",
                    "inner": {
                        "type": "plain",
                        "source": "$page.url matches $data.pattern",
                        "kind": { "assertion": "matches" }
                    }
                }
            },
            "expected": "/example/",
            "actual": "https://test.dev/other",
            "last_exception": {
                "type": "unknown",
                "category": "AssertionError",
                "message": "url did not match"
            }
        }
    ])
}

#[test]
fn render_passing_trace() {
    let project = TempProject::new();
    let trace = project.write_trace("home", passing_steps());

    let output = project.render(&[&trace]).output();

    assert_eq!(output.exit_code(), Some(StepwiseExitCode::OK));
    assert_eq!(
        output.stdout_as_str(),
        indoc! {r#"
            tests/home.test

            ✔ open home page
                ✔ open "https://test.dev/"
                  > resolved from: open $data.url
                ✔ $page.title is "Home"
        "#}
    );
    assert_eq!(output.stderr_as_str(), "");
}

#[test]
fn render_data_driven_failure() {
    let project = TempProject::new();
    let trace = project.write_trace("search", data_driven_failure());

    let output = project.render(&[&trace]).unchecked(true).output();

    assert_eq!(output.exit_code(), Some(StepwiseExitCode::STEPS_FAILED));
    assert_eq!(
        output.stdout_as_str(),
        indoc! {r#"
            tests/search.test

            ✖ verify page is open: other page
                $pattern: /example/
                $title: Example

                ✔ wait for $page

                ✖ $page.url matches /example/
                  > resolved from: $page.url matches $data.pattern
                expected "https://test.dev/other" to match /example/
              • An unknown exception has occurred:
                • AssertionError
                • url did not match
        "#}
    );
    assert!(
        output.stderr_as_str().contains("error: 1 step failed"),
        "{output}"
    );
}

#[test]
fn render_without_summary() {
    let project = TempProject::new();
    let trace = project.write_trace("search", data_driven_failure());

    let output = project
        .render(&[&trace])
        .arg("--no-summary")
        .unchecked(true)
        .output();

    assert_eq!(output.exit_code(), Some(StepwiseExitCode::STEPS_FAILED));
    assert!(!output.stdout_as_str().contains("to match"), "{output}");
}

#[test]
fn render_multiple_traces() {
    let project = TempProject::new();
    let home = project.write_trace("home", passing_steps());
    let search = project.write_trace("search", data_driven_failure());

    let output = project.render(&[&home, &search]).unchecked(true).output();

    assert_eq!(output.exit_code(), Some(StepwiseExitCode::STEPS_FAILED));
    let stdout = output.stdout_as_str();
    let home_at = stdout.find("tests/home.test").expect("home header present");
    let search_at = stdout.find("tests/search.test").expect("search header present");
    assert!(home_at < search_at, "{output}");
    assert!(
        stdout.contains("✔ $page.title is \"Home\"\n\ntests/search.test\n"),
        "{output}"
    );
}

#[test]
fn relative_project_root() {
    let project = TempProject::new();
    let trace = project.write_trace("home", passing_steps());

    let output = StepwiseCli::new()
        .args(["render", "--project-root", ".", trace.as_str()])
        .current_dir(project.root())
        .output();

    assert!(
        output.stdout_as_str().starts_with("tests/home.test\n"),
        "{output}"
    );
}

#[test]
fn color_output() {
    let project = TempProject::new();
    let trace = project.write_trace("home", passing_steps());

    let output = project.render(&[&trace]).color("always").output();

    let stdout = output.stdout_as_str();
    assert!(stdout.contains("\x1b["), "{output}");
    assert!(!stdout.contains("[[stepwise:header]]"), "{output}");
    assert!(!stdout.contains("[[/stepwise:header]]"), "{output}");
}

#[test]
fn missing_trace_file() {
    let project = TempProject::new();
    let missing = project.root().join("traces/missing.json");

    let output = project.render(&[&missing]).unchecked(true).output();

    assert_eq!(
        output.exit_code(),
        Some(StepwiseExitCode::TRACE_READ_FAILED)
    );
    assert_eq!(output.stdout_as_str(), "");
    let stderr = output.stderr_as_str();
    assert!(
        stderr.contains(&format!("error: failed to read trace file `{missing}`")),
        "{output}"
    );
    assert!(stderr.contains("Caused by:"), "{output}");
}

#[test]
fn invalid_trace_file() {
    let project = TempProject::new();
    let trace = project.write_trace(
        "broken",
        json!([{ "name": "never finished", "status": "failed" }]),
    );

    let output = project.render(&[&trace]).unchecked(true).output();

    assert_eq!(output.exit_code(), Some(StepwiseExitCode::INVALID_TRACE));
    assert!(
        output
            .stderr_as_str()
            .contains("step `never finished` failed, but has no failed statement"),
        "{output}"
    );
}

#[test]
fn invalid_config_is_a_setup_error() {
    let project = TempProject::new();
    let trace = project.write_trace("home", passing_steps());
    project.write_config("[report]\nsummaries = \"sometimes\"\n");

    let output = project.render(&[&trace]).unchecked(true).output();

    assert_eq!(output.exit_code(), Some(StepwiseExitCode::SETUP_ERROR));
    assert!(
        output
            .stderr_as_str()
            .contains("error: failed to parse config file"),
        "{output}"
    );
}

#[test]
fn unknown_config_keys_warn() {
    let project = TempProject::new();
    let trace = project.write_trace("home", passing_steps());
    let config = project.write_config("[report]\nsummaries = true\npaging = \"auto\"\n");

    let output = project.render(&[&trace]).output();

    assert_eq!(
        output.stderr_as_str(),
        format!(
            "warning: in config file {config}, ignoring unknown configuration key: report.paging\n"
        )
    );
}

#[test]
fn explicit_config_file() {
    let project = TempProject::new();
    let config = project.write_file(
        "custom.toml",
        indoc! {r#"
            [styles.header]
            fg = "yellow"
        "#},
    );

    let output = StepwiseCli::new()
        .args([
            "show-config",
            "--project-root",
            project.root().as_str(),
            "--config",
            config.as_str(),
        ])
        .output();

    assert_eq!(
        output.stdout_as_str(),
        formatdoc! {r#"
            # config file: {config}
            [report]
            summaries = true

            [styles.pass]
            fg = "green"

            [styles.fail]
            fg = "red"

            [styles.comment]
            fg = "yellow"

            [styles.failure-highlight]
            fg = "white"
            bg = "red"

            [styles.header]
            fg = "yellow"
        "#,
            config = config,
        }
    );
}

#[test]
fn missing_explicit_config_file() {
    let project = TempProject::new();
    let missing = project.root().join("missing.toml");

    let output = StepwiseCli::new()
        .args(["show-config", "--config", missing.as_str()])
        .unchecked(true)
        .output();

    assert_eq!(output.exit_code(), Some(StepwiseExitCode::SETUP_ERROR));
}

#[test]
fn log_level_from_env() {
    let project = TempProject::new();
    let trace = project.write_trace("home", passing_steps());

    let output = project
        .render(&[&trace])
        .env("STEPWISE_LOG", "debug")
        .output();

    assert!(
        output.stderr_as_str().contains("debug: loaded trace"),
        "{output}"
    );
}
