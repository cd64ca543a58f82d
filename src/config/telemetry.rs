use tracing::{debug, info};

use super::{HarnessConfig, CONFIG_ENV_KEY, DEFAULT_CONFIG_PATH};

pub fn log_env_source(path: &std::path::Path, from_env: bool) {
    if from_env {
        info!(
            target: "taskfile_check::config",
            path = %path.display(),
            "Loading configuration using TASKFILE_CHECK_CONFIG environment variable"
        );
    } else {
        debug!(
            target: "taskfile_check::config",
            path = %path.display(),
            env = CONFIG_ENV_KEY,
            default = DEFAULT_CONFIG_PATH,
            "TASKFILE_CHECK_CONFIG not set; using default taskfile-check.toml"
        );
    }
}

pub fn log_loaded(config: &HarnessConfig) {
    info!(
        target: "taskfile_check::config",
        path = %config.source_path.display(),
        root = %config.harness.root.display(),
        runner = %config.harness.runner.display(),
        platform = %config.harness.platform,
        help_entries = config.catalog.len(),
        fixtures = config.fixtures.len(),
        "Configuration file loaded successfully"
    );
}
