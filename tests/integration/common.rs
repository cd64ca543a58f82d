use std::{
    fs,
    os::unix::fs::PermissionsExt,
    path::{Path, PathBuf},
};

use taskfile_check::{config::HarnessConfig, lib::paths::real_path, lib::platform::Platform};
use tempfile::TempDir;

pub const BINARY_PATH: &str = env!("CARGO_BIN_EXE_taskfile-check");

/// Stand-in runner: sources the task file with `TARGET` and `DRY` set, logging every call.
const STUB_RUNNER: &str = r#"#!/bin/sh
file="$2"
shift 2
DRY=0
if [ "$1" = "--dry-run" ]; then
  DRY=1
  shift
fi
TARGET="$1"
echo "$*|dry=$DRY|home=$HOME" >> "$SIGWIN_INFRA_ROOT/../invocations.log"
. "$file"
"#;

/// Temporary project with a stub runner and `resources/` tree.
pub struct StubProject {
    _dir: TempDir,
    pub root: PathBuf,
    pub runner: PathBuf,
}

impl StubProject {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("can create temporary directory");
        let root = real_path(dir.path());
        fs::create_dir_all(root.join("resources/Common")).expect("can create resources");

        let runner = root.join("stub-make");
        fs::write(&runner, STUB_RUNNER).expect("can write stub runner");
        let mut permissions = fs::metadata(&runner)
            .expect("stub runner exists")
            .permissions();
        permissions.set_mode(0o755);
        fs::set_permissions(&runner, permissions).expect("can make stub runner executable");

        Self {
            _dir: dir,
            root,
            runner,
        }
    }

    pub fn write_task_file(&self, relative: &str, body: &str) {
        let path = self.root.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("can create task file directory");
        }
        fs::write(path, body).expect("can write task file");
    }

    /// Write `taskfile-check.toml` with a `[harness]` section pointing at the stub runner.
    pub fn write_config(&self, fixtures: &str) -> PathBuf {
        self.write_config_for(host_platform(), fixtures)
    }

    pub fn write_config_for(&self, platform: Platform, fixtures: &str) -> PathBuf {
        let path = self.root.join("taskfile-check.toml");
        let content = format!(
            "[harness]\nrunner = '{}'\nplatform = '{}'\nhome = '/home/user'\n\n{fixtures}",
            self.runner.display(),
            platform.as_str()
        );
        fs::write(&path, content).expect("can write config");
        path
    }

    pub fn load_config(&self, fixtures: &str) -> HarnessConfig {
        self.load_config_for(host_platform(), fixtures)
    }

    /// Load a config normalizing for `platform` regardless of the host.
    pub fn load_config_for(&self, platform: Platform, fixtures: &str) -> HarnessConfig {
        HarnessConfig::load_from_path(self.write_config_for(platform, fixtures))
            .expect("config loads")
    }

    /// Runner invocations as `<args>|dry=<0|1>|home=<HOME>`, task file path elided.
    pub fn invocations(&self) -> Vec<String> {
        let log = self.root.join("invocations.log");
        if !Path::new(&log).exists() {
            return Vec::new();
        }
        fs::read_to_string(log)
            .expect("can read invocations")
            .lines()
            .map(str::to_string)
            .collect()
    }
}

pub fn host_platform() -> Platform {
    Platform::current().expect("tests run on a supported platform")
}
