use std::{
    collections::HashSet,
    path::{Path, PathBuf},
};

use serde::Deserialize;

use crate::lib::{
    errors::ConfigError,
    paths::{TaskFileIdentity, TaskFilePath},
};

/// One expected dry-run line, either literal or generated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpectedLine {
    Literal(String),
    /// Generated help pipeline scanning these files (relative to the root).
    HelpPipeline(Vec<PathBuf>),
    /// Generated containerized QA tool invocation.
    QaTool(String),
}

/// Expected dry-run output of one command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandExpectation {
    pub name: String,
    pub lines: Vec<ExpectedLine>,
}

/// A task file under test and everything it is expected to print.
#[derive(Debug, Clone)]
pub struct FixtureConfig {
    pub identity: TaskFileIdentity,
    pub task_file: TaskFilePath,
    /// Explicit help order; defaults to the command declaration order.
    pub help: Option<Vec<String>>,
    pub commands: Vec<CommandExpectation>,
}

impl FixtureConfig {
    pub fn command_names(&self) -> Vec<&str> {
        self.commands.iter().map(|c| c.name.as_str()).collect()
    }

    /// Command names the help listing must show, in order.
    pub fn expected_help(&self) -> Vec<&str> {
        match &self.help {
            Some(help) => help.iter().map(String::as_str).collect(),
            None => self.command_names(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RawFixtureSection {
    pub identity: Option<String>,
    pub group: Option<String>,
    pub name: Option<String>,
    pub help: Option<Vec<String>>,
    pub command: Option<Vec<RawCommandSection>>,
}

#[derive(Debug, Deserialize)]
pub struct RawCommandSection {
    pub name: Option<String>,
    pub lines: Option<Vec<RawExpectedLine>>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum RawExpectedLine {
    Literal(String),
    HelpPipeline { help_pipeline: Vec<PathBuf> },
    QaTool { qa_tool: String },
}

impl From<RawExpectedLine> for ExpectedLine {
    fn from(value: RawExpectedLine) -> Self {
        match value {
            RawExpectedLine::Literal(line) => ExpectedLine::Literal(line),
            RawExpectedLine::HelpPipeline { help_pipeline } => {
                ExpectedLine::HelpPipeline(help_pipeline)
            }
            RawExpectedLine::QaTool { qa_tool } => ExpectedLine::QaTool(qa_tool),
        }
    }
}

pub fn parse_fixture_sections(
    raw: Option<Vec<RawFixtureSection>>,
    namespace: Option<&str>,
    path: &Path,
) -> Result<Vec<FixtureConfig>, ConfigError> {
    let sections = raw
        .filter(|sections| !sections.is_empty())
        .ok_or(ConfigError::MissingField {
            path: path.to_path_buf(),
            field: "fixture",
        })?;

    let mut seen = HashSet::new();
    let mut fixtures = Vec::with_capacity(sections.len());
    for section in sections {
        let fixture = parse_fixture(section, namespace, path)?;
        if !seen.insert(fixture.task_file.clone()) {
            return Err(ConfigError::InvalidField {
                path: path.to_path_buf(),
                field: "fixture.identity",
                message: format!("Task file {} is declared twice", fixture.task_file),
            });
        }
        fixtures.push(fixture);
    }
    Ok(fixtures)
}

fn parse_fixture(
    raw: RawFixtureSection,
    namespace: Option<&str>,
    path: &Path,
) -> Result<FixtureConfig, ConfigError> {
    let identity = match (raw.identity, raw.name) {
        (Some(identity), _) => TaskFileIdentity::parse(&identity, namespace),
        (None, Some(name)) => TaskFileIdentity::new(raw.group.unwrap_or_default(), name),
        (None, None) => {
            return Err(ConfigError::MissingField {
                path: path.to_path_buf(),
                field: "fixture.identity",
            })
        }
    };
    let task_file = identity
        .resolve()
        .map_err(|err| ConfigError::InvalidField {
            path: path.to_path_buf(),
            field: "fixture.identity",
            message: err.to_string(),
        })?;

    let raw_commands = raw.command.ok_or(ConfigError::MissingField {
        path: path.to_path_buf(),
        field: "fixture.command",
    })?;
    let mut names = HashSet::new();
    let mut commands = Vec::with_capacity(raw_commands.len());
    for command in raw_commands {
        let name = command
            .name
            .filter(|name| !name.trim().is_empty())
            .ok_or(ConfigError::MissingField {
                path: path.to_path_buf(),
                field: "fixture.command.name",
            })?;
        if !names.insert(name.clone()) {
            return Err(ConfigError::InvalidField {
                path: path.to_path_buf(),
                field: "fixture.command.name",
                message: format!("Command `{name}` is declared twice for {identity}"),
            });
        }
        commands.push(CommandExpectation {
            name,
            lines: command
                .lines
                .unwrap_or_default()
                .into_iter()
                .map(ExpectedLine::from)
                .collect(),
        });
    }

    Ok(FixtureConfig {
        identity,
        task_file,
        help: raw.help,
        commands,
    })
}
