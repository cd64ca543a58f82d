use tracing::info;

use crate::lib::{errors::HarnessError, paths::TaskFilePath};

use super::TaskRunner;

/// Lines a command is expected to print when dry-run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpectedPath {
    pub command: String,
    pub lines: Vec<String>,
}

/// Expected dry-run output per command, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpectedPaths {
    entries: Vec<ExpectedPath>,
}

impl ExpectedPaths {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare (or replace) the expected lines for `command`.
    pub fn declare(&mut self, command: impl Into<String>, lines: Vec<String>) -> &mut Self {
        let command = command.into();
        match self.entries.iter_mut().find(|entry| entry.command == command) {
            Some(entry) => entry.lines = lines,
            None => self.entries.push(ExpectedPath { command, lines }),
        }
        self
    }

    pub fn get(&self, command: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|entry| entry.command == command)
            .map(|entry| entry.lines.as_slice())
    }

    pub fn command_names(&self) -> Vec<&str> {
        self.entries.iter().map(|entry| entry.command.as_str()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ExpectedPath> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Every advertised command must have a declared expectation.
    pub fn ensure_covers<S: AsRef<str>>(&self, advertised: &[S]) -> Result<(), HarnessError> {
        for command in advertised {
            let command = command.as_ref();
            if self.get(command).is_none() {
                return Err(HarnessError::MissingExpectation {
                    command: command.to_string(),
                });
            }
        }
        Ok(())
    }
}

/// Dry-run every declared command and compare its normalized lines.
///
/// Coverage of `advertised` is checked before the first dry run; the first failure stops the run.
pub fn check_dry_runs<S: AsRef<str>>(
    runner: &TaskRunner,
    task_file: &TaskFilePath,
    advertised: &[S],
    expected: &ExpectedPaths,
) -> Result<usize, HarnessError> {
    expected.ensure_covers(advertised)?;

    for entry in expected.iter() {
        let actual = runner
            .dry_run(task_file, Some(entry.command.as_str()), &[])?
            .iter()
            .map(|line| runner.normalizer().normalize(line))
            .collect::<Vec<_>>();

        if actual != entry.lines {
            return Err(HarnessError::DryRunMismatch {
                command: entry.command.clone(),
                expected: entry.lines.clone(),
                actual,
            });
        }

        info!(
            target: "taskfile_check::suite",
            task_file = %task_file,
            command = %entry.command,
            lines = actual.len(),
            "Dry run matches"
        );
    }

    Ok(expected.len())
}
