//! RunProfile and config path resolution.
use std::{env, path::PathBuf};

use anyhow::{Context, Result};

use super::CliCommand;
use crate::config::{CONFIG_ENV_KEY, DEFAULT_CONFIG_PATH};

/// Resolved invocation.
#[derive(Debug, Clone)]
pub struct RunProfile {
    pub config_path: PathBuf,
    pub command: CliCommand,
}

/// Resolve config path in the order: CLI override → env var → default.
pub fn resolve_config_path(override_path: Option<PathBuf>) -> Result<PathBuf> {
    let path = override_path
        .or_else(|| {
            env::var_os(CONFIG_ENV_KEY)
                .filter(|value| !value.is_empty())
                .map(PathBuf::from)
        })
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));

    if path.is_absolute() {
        return Ok(path);
    }

    let cwd = env::current_dir().context("failed to obtain current directory")?;
    Ok(cwd.join(path))
}
