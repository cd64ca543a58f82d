use taskfile_check::{
    checks::{advertised_commands, check_help, HelpCatalog, Suite, TaskRunner},
    lib::{
        errors::{ErrorKind, HarnessError},
        paths::TaskFileIdentity,
        platform::Platform,
    },
};

use crate::common::StubProject;

const TASK_FILE: &str = "resources/Foo/bar.mk";

/// Advertises `help` and `test`; dry runs print root and home based paths between blank lines.
const HELP_AND_TEST: &str = r#"
if [ "$DRY" = 1 ]; then
  case "$TARGET" in
    help) echo "grep $SIGWIN_INFRA_ROOT/Foo/bar.mk"; echo ""; echo "" ;;
    test) echo ""; echo "vendor/bin/phpunit --cache-directory $HOME/.cache" ;;
    dist) echo "make analyze test" ;;
    *) exit 2 ;;
  esac
  exit 0
fi
case "$TARGET" in
  help) printf '\033[45m%-20s\033[0m %s\n' help 'Prints this help' test 'Test the codebase' ;;
  *) exit 2 ;;
esac
"#;

const MATCHING_FIXTURE: &str = r#"
[[fixture]]
identity = 'Foo\BarTest'

[[fixture.command]]
name = "help"
lines = ["grep $ROOT/resources/Foo/bar.mk"]

[[fixture.command]]
name = "test"
lines = ["vendor/bin/phpunit --cache-directory $HOME/.cache"]
"#;

#[test]
fn matching_task_file_passes_every_check() {
    let project = StubProject::new();
    project.write_task_file(TASK_FILE, HELP_AND_TEST);
    let config = project.load_config(MATCHING_FIXTURE);

    let report = Suite::new(&config).run(&config.fixtures);

    assert!(report.is_success(), "report: {report:#?}");
    assert_eq!(report.passed, 1);
    assert_eq!(report.fixtures[0].dry_runs_checked, 2);
    assert_eq!(
        project.invocations(),
        vec![
            "help|dry=0|home=/home/user",
            "help|dry=1|home=/home/user",
            "test|dry=1|home=/home/user",
        ]
    );
}

#[test]
fn runner_returns_colored_output_verbatim() {
    let project = StubProject::new();
    project.write_task_file(TASK_FILE, HELP_AND_TEST);
    let config = project.load_config(MATCHING_FIXTURE);
    let runner = TaskRunner::new(&config.harness);
    let task_file = TaskFileIdentity::new("Foo", "BarTest")
        .resolve()
        .expect("identity is valid");

    let raw = runner
        .execute(&task_file, Some("help"), &[])
        .expect("help succeeds");

    assert!(raw.starts_with("\u{1b}[45mhelp "), "raw: {raw:?}");
    assert_eq!(
        advertised_commands(&raw).expect("well formed"),
        vec!["help", "test"]
    );

    let lines = runner
        .dry_run(&task_file, Some("help"), &[])
        .expect("dry run succeeds");
    assert_eq!(lines.len(), 1, "blank lines are dropped: {lines:?}");
}

#[test]
fn permuted_help_order_is_a_mismatch() {
    let project = StubProject::new();
    project.write_task_file(TASK_FILE, HELP_AND_TEST);
    let config = project.load_config(MATCHING_FIXTURE);
    let runner = TaskRunner::new(&config.harness);
    let task_file = config.fixtures[0].task_file.clone();

    check_help(&runner, &task_file, &["help", "test"], &HelpCatalog::default())
        .expect("declared order matches");
    let error = check_help(&runner, &task_file, &["test", "help"], &HelpCatalog::default())
        .expect_err("permuted order must not match");

    match error {
        HarnessError::HelpMismatch { expected, actual } => {
            assert!(expected.starts_with("\u{1b}[45mtest "));
            assert!(actual.starts_with("\u{1b}[45mhelp "));
        }
        other => panic!("Unexpected error: {other:?}"),
    }
}

#[test]
fn failing_dry_run_halts_the_fixture() {
    let project = StubProject::new();
    project.write_task_file(
        TASK_FILE,
        &HELP_AND_TEST.replace(
            "test) echo \"\"; echo",
            "test) echo 'partial'; exit 3; echo",
        ),
    );
    let fixture = MATCHING_FIXTURE.replace(
        "identity = 'Foo\\BarTest'",
        "identity = 'Foo\\BarTest'\nhelp = [\"help\", \"test\"]",
    );
    let config = project.load_config(&format!(
        "{fixture}\n[[fixture.command]]\nname = \"dist\"\nlines = [\"make analyze test\"]\n"
    ));
    let suite = Suite::new(&config);

    let error = suite
        .verify_fixture(&config.fixtures[0])
        .expect_err("exit 3 must fail the fixture");
    match &error {
        HarnessError::ProcessFailed { exit_code, .. } => assert_eq!(*exit_code, Some(3)),
        other => panic!("Unexpected error: {other:?}"),
    }
    assert!(
        !project.invocations().iter().any(|line| line.starts_with("dist")),
        "no check may run after the failure: {:?}",
        project.invocations()
    );

    let report = suite.run(&config.fixtures);
    assert!(!report.is_success());
    assert_eq!(report.fixtures[0].error_kind, Some(ErrorKind::Process));
}

#[test]
fn undeclared_advertised_command_fails_before_any_dry_run() {
    let project = StubProject::new();
    project.write_task_file(TASK_FILE, HELP_AND_TEST);
    let config = project.load_config(
        r#"
[[fixture]]
identity = 'Foo\BarTest'
help = ["help", "test"]

[[fixture.command]]
name = "help"
lines = ["grep $ROOT/resources/Foo/bar.mk"]
"#,
    );

    let error = Suite::new(&config)
        .verify_fixture(&config.fixtures[0])
        .expect_err("test has no expectation");

    assert!(
        matches!(error, HarnessError::MissingExpectation { ref command } if command == "test"),
        "error: {error:?}"
    );
    assert_eq!(error.kind(), ErrorKind::Setup);
    assert_eq!(project.invocations(), vec!["help|dry=0|home=/home/user"]);
}

#[test]
fn dry_run_mismatch_reports_normalized_lines() {
    let project = StubProject::new();
    project.write_task_file(TASK_FILE, HELP_AND_TEST);
    let config = project.load_config(
        &MATCHING_FIXTURE.replace("--cache-directory $HOME/.cache", "--no-cache"),
    );

    let error = Suite::new(&config)
        .verify_fixture(&config.fixtures[0])
        .expect_err("lines differ");

    match error {
        HarnessError::DryRunMismatch {
            command,
            expected,
            actual,
        } => {
            assert_eq!(command, "test");
            assert_eq!(expected, vec!["vendor/bin/phpunit --no-cache"]);
            assert_eq!(
                actual,
                vec!["vendor/bin/phpunit --cache-directory $HOME/.cache"]
            );
        }
        other => panic!("Unexpected error: {other:?}"),
    }
}

#[test]
fn missing_task_file_is_reported_without_running() {
    let project = StubProject::new();
    let config = project.load_config(MATCHING_FIXTURE);

    let error = Suite::new(&config)
        .verify_fixture(&config.fixtures[0])
        .expect_err("task file is absent");

    assert!(matches!(error, HarnessError::MissingTaskFile { .. }));
    assert!(project.invocations().is_empty());
}

/// Same targets as `HELP_AND_TEST`, printed with `\r\n` line endings.
const CRLF_HELP_AND_TEST: &str = r#"
if [ "$DRY" = 1 ]; then
  case "$TARGET" in
    help) printf 'grep %s/Foo/bar.mk\r\n\r\n' "$SIGWIN_INFRA_ROOT" ;;
    test) printf 'vendor/bin/phpunit\r\n' ;;
    *) exit 2 ;;
  esac
  exit 0
fi
case "$TARGET" in
  help) printf '\033[45m%-20s\033[0m %s\r\n' help 'Prints this help' test 'Test the codebase' ;;
  *) exit 2 ;;
esac
"#;

const CRLF_FIXTURE: &str = r#"
[[fixture]]
identity = 'Foo\BarTest'

[[fixture.command]]
name = "help"
lines = ["grep $ROOT/resources/Foo/bar.mk"]

[[fixture.command]]
name = "test"
lines = ["vendor/bin/phpunit"]
"#;

#[test]
fn windows_help_ignores_colors_and_crlf() {
    let project = StubProject::new();
    project.write_task_file(TASK_FILE, CRLF_HELP_AND_TEST);
    let config = project.load_config_for(Platform::Windows, CRLF_FIXTURE);
    let runner = TaskRunner::new(&config.harness);
    let task_file = config.fixtures[0].task_file.clone();

    let help = check_help(&runner, &task_file, &["help", "test"], &HelpCatalog::default())
        .expect("colored CRLF listing matches on Windows");
    assert_eq!(
        advertised_commands(&help).expect("well formed"),
        vec!["help", "test"]
    );

    let checked = Suite::new(&config)
        .verify_fixture(&config.fixtures[0])
        .expect("dry runs match once line endings are canonical");
    assert_eq!(checked, 2);
}

#[test]
fn windows_help_order_still_matters() {
    let project = StubProject::new();
    project.write_task_file(TASK_FILE, CRLF_HELP_AND_TEST);
    let config = project.load_config_for(Platform::Windows, CRLF_FIXTURE);
    let runner = TaskRunner::new(&config.harness);
    let task_file = config.fixtures[0].task_file.clone();

    let error = check_help(&runner, &task_file, &["test", "help"], &HelpCatalog::default())
        .expect_err("permuted order must not match");

    match error {
        HarnessError::HelpMismatch { expected, actual } => {
            assert!(expected.starts_with("test "), "expected: {expected:?}");
            assert!(actual.starts_with("help "), "actual: {actual:?}");
            assert!(!actual.contains('\r'), "actual: {actual:?}");
        }
        other => panic!("Unexpected error: {other:?}"),
    }
}

#[test]
fn carriage_return_is_significant_off_windows() {
    let project = StubProject::new();
    project.write_task_file(TASK_FILE, CRLF_HELP_AND_TEST);
    let config = project.load_config_for(Platform::Linux, CRLF_FIXTURE);
    let runner = TaskRunner::new(&config.harness);

    let lines = runner
        .dry_run(&config.fixtures[0].task_file, Some("test"), &[])
        .expect("dry run succeeds");
    assert_eq!(lines, vec!["vendor/bin/phpunit\r"]);
}
