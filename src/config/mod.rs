//! Load and validate harness configuration.
use std::{env, path::PathBuf};

use serde::Deserialize;
use tracing::{error, info};

use crate::{checks::HelpCatalog, lib::errors::ConfigError};

pub mod fixtures;
pub mod harness;
pub mod help;
pub mod telemetry;

pub use fixtures::{
    parse_fixture_sections, CommandExpectation, ExpectedLine, FixtureConfig, RawCommandSection,
    RawExpectedLine, RawFixtureSection,
};
pub use harness::{
    parse_harness_section, HarnessSection, RawHarnessSection, DEFAULT_HOME, DEFAULT_RESOURCES_ENV,
    DEFAULT_RUNNER,
};
pub use help::{parse_help_section, RawHelpEntry};

pub const CONFIG_ENV_KEY: &str = "TASKFILE_CHECK_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "taskfile-check.toml";

/// Top-level configuration container.
#[derive(Debug, Clone)]
pub struct HarnessConfig {
    pub harness: HarnessSection,
    pub catalog: HelpCatalog,
    pub fixtures: Vec<FixtureConfig>,
    pub source_path: PathBuf,
}

#[derive(Debug, Deserialize)]
struct RawHarnessConfig {
    harness: Option<RawHarnessSection>,
    help: Option<Vec<RawHelpEntry>>,
    fixture: Option<Vec<RawFixtureSection>>,
}

impl HarnessConfig {
    /// Prefer `TASKFILE_CHECK_CONFIG` if set; otherwise read `taskfile-check.toml`.
    pub fn load_from_env_or_default() -> Result<Self, ConfigError> {
        let (path, from_env) = match env::var(CONFIG_ENV_KEY) {
            Ok(value) if !value.trim().is_empty() => (PathBuf::from(value), true),
            _ => (PathBuf::from(DEFAULT_CONFIG_PATH), false),
        };

        telemetry::log_env_source(&path, from_env);
        Self::load_from_path(path)
    }

    /// Load configuration from a specific path.
    pub fn load_from_path(path: PathBuf) -> Result<Self, ConfigError> {
        info!(
            target: "taskfile_check::config",
            path = %path.display(),
            "Starting configuration load"
        );

        let builder = config::Config::builder().add_source(config::File::from(path.clone()));
        let document = builder.build().map_err(|err| {
            let error = ConfigError::from_read_error(path.clone(), err);
            error!(
                target: "taskfile_check::config",
                path = %path.display(),
                reason = %error,
                "Failed to read configuration file"
            );
            error
        })?;

        let raw: RawHarnessConfig = document.try_deserialize().map_err(|err| {
            let error = ConfigError::from_parse_error(path.clone(), err);
            error!(
                target: "taskfile_check::config",
                path = %path.display(),
                reason = %error,
                "Failed to parse configuration file"
            );
            error
        })?;

        let config = Self::from_raw(raw, path.clone()).map_err(|err| {
            error!(
                target: "taskfile_check::config",
                path = %path.display(),
                reason = %err,
                "Failed to validate configuration file"
            );
            err
        })?;

        telemetry::log_loaded(&config);
        Ok(config)
    }

    fn from_raw(raw: RawHarnessConfig, path: PathBuf) -> Result<Self, ConfigError> {
        let harness = parse_harness_section(raw.harness, &path)?;
        let catalog = parse_help_section(raw.help, &path)?;
        let fixtures = parse_fixture_sections(raw.fixture, harness.namespace.as_deref(), &path)?;

        Ok(Self {
            harness,
            catalog,
            fixtures,
            source_path: path,
        })
    }

    /// Find a fixture by identity (`Group/NameTest` or the compound form).
    pub fn fixture(&self, identity: &str) -> Option<&FixtureConfig> {
        let wanted = crate::lib::paths::TaskFileIdentity::parse(
            identity,
            self.harness.namespace.as_deref(),
        );
        self.fixtures
            .iter()
            .find(|fixture| fixture.identity == wanted)
    }
}
