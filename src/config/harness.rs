use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::{
    checks::DEFAULT_QA_IMAGE,
    lib::{
        errors::ConfigError,
        paths::{is_nonempty_absolute, real_path},
        platform::Platform,
    },
};

pub const DEFAULT_RUNNER: &str = "make";
pub const DEFAULT_RESOURCES_ENV: &str = "SIGWIN_INFRA_ROOT";
pub const DEFAULT_HOME: &str = "/home/user";

/// Where and how the task runner is invoked.
#[derive(Debug, Clone)]
pub struct HarnessSection {
    /// Project root; absolute and canonical.
    pub root: PathBuf,
    pub runner: PathBuf,
    pub resources_env: String,
    /// `HOME` given to the runner on non-Windows hosts.
    pub home: String,
    pub platform: Platform,
    pub working_dir: PathBuf,
    /// Namespace stripped from compound fixture identities.
    pub namespace: Option<String>,
    pub qa_image: String,
}

#[derive(Debug, Deserialize, Default)]
pub struct RawHarnessSection {
    pub root: Option<PathBuf>,
    pub runner: Option<PathBuf>,
    pub resources_env: Option<String>,
    pub home: Option<String>,
    pub platform: Option<String>,
    pub working_dir: Option<PathBuf>,
    pub namespace: Option<String>,
    pub qa_image: Option<String>,
}

pub fn parse_harness_section(
    raw: Option<RawHarnessSection>,
    path: &Path,
) -> Result<HarnessSection, ConfigError> {
    let raw = raw.unwrap_or_default();
    let base_dir = config_dir(path);

    let root = match raw.root {
        Some(root) => base_dir.join(root),
        None => base_dir.clone(),
    };
    if !root.is_dir() {
        return Err(ConfigError::InvalidField {
            path: path.to_path_buf(),
            field: "harness.root",
            message: format!("Directory does not exist: {}", root.display()),
        });
    }
    let root = real_path(&root);

    let runner = raw
        .runner
        .unwrap_or_else(|| PathBuf::from(DEFAULT_RUNNER));
    if runner.as_os_str().is_empty() {
        return Err(ConfigError::InvalidField {
            path: path.to_path_buf(),
            field: "harness.runner",
            message: "Runner cannot be empty".into(),
        });
    }

    let resources_env = raw
        .resources_env
        .unwrap_or_else(|| DEFAULT_RESOURCES_ENV.to_string());
    validate_env_name(path, &resources_env)?;

    let home = raw.home.unwrap_or_else(|| DEFAULT_HOME.to_string());
    if home.trim().is_empty() {
        return Err(ConfigError::InvalidField {
            path: path.to_path_buf(),
            field: "harness.home",
            message: "Home override cannot be empty".into(),
        });
    }

    let platform = match raw.platform {
        Some(name) => name.parse::<Platform>(),
        None => Platform::current(),
    }
    .map_err(|err| ConfigError::InvalidField {
        path: path.to_path_buf(),
        field: "harness.platform",
        message: err.to_string(),
    })?;

    let working_dir = match raw.working_dir {
        Some(dir) => real_path(&root.join(dir)),
        None => root.clone(),
    };
    if !is_nonempty_absolute(&working_dir) || !working_dir.is_dir() {
        return Err(ConfigError::InvalidField {
            path: path.to_path_buf(),
            field: "harness.working_dir",
            message: format!("Directory does not exist: {}", working_dir.display()),
        });
    }

    let namespace = raw.namespace.filter(|ns| !ns.trim().is_empty());
    let qa_image = raw
        .qa_image
        .unwrap_or_else(|| DEFAULT_QA_IMAGE.to_string());

    Ok(HarnessSection {
        root,
        runner,
        resources_env,
        home,
        platform,
        working_dir,
        namespace,
        qa_image,
    })
}

/// Directory relative paths in the file are resolved against.
fn config_dir(path: &Path) -> PathBuf {
    let dir = path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));
    real_path(&dir)
}

fn validate_env_name(path: &Path, name: &str) -> Result<(), ConfigError> {
    let valid = !name.is_empty()
        && !name.starts_with(|c: char| c.is_ascii_digit())
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
    if valid {
        return Ok(());
    }

    Err(ConfigError::InvalidField {
        path: path.to_path_buf(),
        field: "harness.resources_env",
        message: format!("Not a valid environment variable name: {name}"),
    })
}
