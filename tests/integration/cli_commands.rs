use std::process::{Command, Output};

use serde_json::Value;

use crate::common::{StubProject, BINARY_PATH};

const TASK_FILE_BODY: &str = r#"
if [ "$DRY" = 1 ]; then
  echo "echo $TARGET"
  exit 0
fi
printf '\033[45m%-20s\033[0m %s\n' help 'Prints this help'
"#;

fn run(args: &[&str]) -> Output {
    Command::new(BINARY_PATH)
        .args(args)
        .env("RUST_LOG", "warn")
        .output()
        .expect("taskfile-check should run")
}

#[test]
fn resolve_prints_task_file_path() {
    let output = run(&["resolve", "Foo\\BarTest"]);
    assert!(output.status.success(), "resolve should succeed");
    assert_eq!(String::from_utf8_lossy(&output.stdout), "resources/Foo/bar.mk\n");
}

#[test]
fn render_help_prints_colored_listing() {
    let output = run(&[
        "--config",
        "/nonexistent/taskfile-check.toml",
        "render-help",
        "help",
        "test",
    ]);
    assert!(output.status.success(), "render-help should succeed");
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "\u{1b}[45mhelp                \u{1b}[0m Prints this help\n\
         \u{1b}[45mtest                \u{1b}[0m Test the codebase\n"
    );
}

#[test]
fn verify_prints_json_summary_and_exit_status() {
    let project = StubProject::new();
    project.write_task_file("resources/Foo/bar.mk", TASK_FILE_BODY);
    let config = project.write_config(
        r#"
[[fixture]]
identity = 'Foo\BarTest'

[[fixture.command]]
name = "help"
lines = ["echo help"]
"#,
    );
    let config = config.to_string_lossy().into_owned();

    let output = run(&["--config", &config, "verify"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success(), "verify should pass, stdout: {stdout}");
    let summary: Value = serde_json::from_str(&stdout).expect("summary is JSON");
    assert_eq!(summary["passed"], 1);
    assert_eq!(summary["fixtures"][0]["status"], "passed");
    assert_eq!(summary["fixtures"][0]["task_file"], "resources/Foo/bar.mk");

    project.write_task_file(
        "resources/Foo/bar.mk",
        &TASK_FILE_BODY.replace("echo \"echo $TARGET\"", "echo \"echo other\""),
    );
    let output = run(&["--config", &config, "verify", "--fixture", "Foo/BarTest"]);
    assert!(!output.status.success(), "mismatch must fail the run");
    let summary: Value =
        serde_json::from_str(&String::from_utf8_lossy(&output.stdout)).expect("summary is JSON");
    assert_eq!(summary["failed"], 1);
    assert_eq!(summary["fixtures"][0]["error_kind"], "mismatch");
}

#[test]
fn verify_unknown_fixture_is_an_error() {
    let project = StubProject::new();
    let config = project.write_config(
        r#"
[[fixture]]
identity = 'Foo\BarTest'

[[fixture.command]]
name = "help"
lines = []
"#,
    );

    let output = run(&[
        "--config",
        &config.to_string_lossy(),
        "verify",
        "--fixture",
        "Foo\\MissingTest",
    ]);
    assert!(!output.status.success());
    assert!(
        String::from_utf8_lossy(&output.stderr).contains("no fixture `Foo\\MissingTest`"),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
}
