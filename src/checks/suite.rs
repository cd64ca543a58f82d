use serde::Serialize;

use crate::{
    config::{ExpectedLine, FixtureConfig, HarnessConfig},
    lib::{
        errors::{ErrorKind, HarnessError},
        telemetry::FixtureSpan,
    },
};

use super::{
    advertised_commands, check_dry_runs, check_help, ExpectedPathGenerator, ExpectedPaths,
    HelpCatalog, TaskRunner,
};

/// Result of verifying one fixture.
#[derive(Debug, Clone, Serialize)]
pub struct FixtureOutcome {
    pub identity: String,
    pub task_file: String,
    pub status: &'static str,
    pub dry_runs_checked: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<ErrorKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Summary of a suite run.
#[derive(Debug, Clone, Serialize)]
pub struct SuiteReport {
    pub platform: &'static str,
    pub passed: usize,
    pub failed: usize,
    pub fixtures: Vec<FixtureOutcome>,
}

impl SuiteReport {
    pub fn is_success(&self) -> bool {
        self.failed == 0
    }
}

/// Verifies fixtures against one configured project.
pub struct Suite<'a> {
    catalog: &'a HelpCatalog,
    runner: TaskRunner,
    generator: ExpectedPathGenerator,
}

impl<'a> Suite<'a> {
    pub fn new(config: &'a HarnessConfig) -> Self {
        let runner = TaskRunner::new(&config.harness);
        let generator = ExpectedPathGenerator::new(
            config.harness.platform,
            &config.harness.root,
            runner.normalizer().clone(),
        )
        .with_qa_image(config.harness.qa_image.clone());
        Self {
            catalog: &config.catalog,
            runner,
            generator,
        }
    }

    pub fn runner(&self) -> &TaskRunner {
        &self.runner
    }

    /// Materialize the declared expectations, generating platform specific lines.
    pub fn expected_paths(&self, fixture: &FixtureConfig) -> ExpectedPaths {
        let mut paths = ExpectedPaths::new();
        for command in &fixture.commands {
            let lines = command
                .lines
                .iter()
                .map(|line| match line {
                    ExpectedLine::Literal(text) => text.clone(),
                    ExpectedLine::HelpPipeline(files) => self.generator.help_execution_path(files),
                    ExpectedLine::QaTool(tool) => self.generator.qa_tool_execution_path(tool),
                })
                .collect();
            paths.declare(command.name.clone(), lines);
        }
        paths
    }

    /// Task file exists, help matches, then every dry run matches; stops at the first failure.
    pub fn verify_fixture(&self, fixture: &FixtureConfig) -> Result<usize, HarnessError> {
        let location = self.runner.task_file_location(&fixture.task_file);
        if !location.is_file() {
            return Err(HarnessError::MissingTaskFile { path: location });
        }

        let help = check_help(
            &self.runner,
            &fixture.task_file,
            &fixture.expected_help(),
            self.catalog,
        )?;
        let advertised = advertised_commands(&help)?;
        let expected = self.expected_paths(fixture);
        check_dry_runs(&self.runner, &fixture.task_file, &advertised, &expected)
    }

    /// Verify each fixture independently and collect the outcomes.
    pub fn run<'f>(&self, fixtures: impl IntoIterator<Item = &'f FixtureConfig>) -> SuiteReport {
        let mut outcomes = Vec::new();
        for fixture in fixtures {
            let identity = fixture.identity.to_string();
            let task_file = fixture.task_file.to_string();
            let span = FixtureSpan::start(&identity, &task_file);
            let result = span.span().in_scope(|| self.verify_fixture(fixture));

            let outcome = match result {
                Ok(dry_runs_checked) => {
                    span.finish("passed", None);
                    FixtureOutcome {
                        identity,
                        task_file,
                        status: "passed",
                        dry_runs_checked,
                        error_kind: None,
                        message: None,
                    }
                }
                Err(err) => {
                    let kind = err.kind();
                    span.finish("failed", Some(kind.as_str()));
                    FixtureOutcome {
                        identity,
                        task_file,
                        status: "failed",
                        dry_runs_checked: 0,
                        error_kind: Some(kind),
                        message: Some(err.to_string()),
                    }
                }
            };
            outcomes.push(outcome);
        }

        let passed = outcomes.iter().filter(|o| o.error_kind.is_none()).count();
        SuiteReport {
            platform: self.runner.platform().as_str(),
            passed,
            failed: outcomes.len() - passed,
            fixtures: outcomes,
        }
    }
}
