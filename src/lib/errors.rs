use std::{io, path::PathBuf};

use config::ConfigError as ConfigLoaderError;
use serde::Serialize;
use thiserror::Error;

/// Errors that can occur while loading or validating configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to build (read) the configuration file.
    #[error("Failed to read configuration file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: ConfigLoaderError,
    },
    /// Failed to deserialize TOML into a struct.
    #[error("Failed to parse configuration file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ConfigLoaderError,
    },
    /// Required field is missing.
    #[error("Configuration file {path} is missing `{field}`")]
    MissingField { path: PathBuf, field: &'static str },
    /// Field failed validation.
    #[error("Configuration file {path} has invalid `{field}`: {message}")]
    InvalidField {
        path: PathBuf,
        field: &'static str,
        message: String,
    },
}

impl ConfigError {
    /// Helper to wrap `config::ConfigError` as a read failure.
    pub fn from_read_error(path: PathBuf, source: ConfigLoaderError) -> Self {
        Self::FileRead { path, source }
    }

    /// Helper to wrap `config::ConfigError` as a parse failure.
    pub fn from_parse_error(path: PathBuf, source: ConfigLoaderError) -> Self {
        Self::Parse { path, source }
    }
}

/// Broad failure category, used for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The fixture itself is wrong; detected before any comparison.
    Setup,
    /// The task runner could not be started or exited non-zero.
    Process,
    /// Normalized output differs from the expectation.
    Mismatch,
    /// No normalization or generation rule exists for the platform.
    UnsupportedPlatform,
}

impl ErrorKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Setup => "setup",
            ErrorKind::Process => "process",
            ErrorKind::Mismatch => "mismatch",
            ErrorKind::UnsupportedPlatform => "unsupported_platform",
        }
    }
}

/// Failures raised while verifying a task file.
#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("Invalid task file identity `{identity}`: {reason}")]
    InvalidIdentity {
        identity: String,
        reason: &'static str,
    },
    #[error("Task file {path} does not exist")]
    MissingTaskFile { path: PathBuf },
    #[error("No expected execution path defined for command \"{command}\"")]
    MissingExpectation { command: String },
    #[error("Help output line has no description separator: {line:?}")]
    MalformedHelp { line: String },
    #[error("Failed to start `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },
    #[error("`{command_line}` exited abnormally (exit={exit_code:?}): {stderr}")]
    ProcessFailed {
        command_line: String,
        exit_code: Option<i32>,
        stderr: String,
    },
    #[error("Help output does not match\n--- expected\n{expected}\n--- actual\n{actual}")]
    HelpMismatch { expected: String, actual: String },
    #[error(
        "Dry run of `{command}` does not match\n--- expected\n{expected:#?}\n--- actual\n{actual:#?}"
    )]
    DryRunMismatch {
        command: String,
        expected: Vec<String>,
        actual: Vec<String>,
    },
    #[error("Unknown OS family `{name}`")]
    UnsupportedPlatform { name: String },
}

impl HarnessError {
    /// Classify the error for reporting.
    pub fn kind(&self) -> ErrorKind {
        match self {
            HarnessError::InvalidIdentity { .. }
            | HarnessError::MissingTaskFile { .. }
            | HarnessError::MissingExpectation { .. }
            | HarnessError::MalformedHelp { .. } => ErrorKind::Setup,
            HarnessError::Spawn { .. } | HarnessError::ProcessFailed { .. } => ErrorKind::Process,
            HarnessError::HelpMismatch { .. } | HarnessError::DryRunMismatch { .. } => {
                ErrorKind::Mismatch
            }
            HarnessError::UnsupportedPlatform { .. } => ErrorKind::UnsupportedPlatform,
        }
    }
}
