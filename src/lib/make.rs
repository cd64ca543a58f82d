//! Shared helpers for building task runner commands.

use std::{
    ffi::OsStr,
    path::{Path, PathBuf},
    process::Command,
};

use crate::lib::platform::Platform;

/// Flag asking the runner to print recipes instead of executing them.
pub const DRY_RUN_FLAG: &str = "--dry-run";
/// Variables a parent `make` leaks into children; they change the child's output.
const INHERITED_MAKE_VARS: &[&str] = &["MAKEFLAGS", "MFLAGS", "MAKELEVEL"];

pub struct TaskRunnerCommandConfig<'a> {
    pub runner: &'a Path,
    pub working_dir: &'a Path,
    pub platform: Platform,
    pub resources_env: &'a str,
    pub resources_dir: &'a Path,
    pub home: &'a str,
}

pub struct TaskRunnerRequest<'a> {
    pub task_file: &'a Path,
    pub sub_command: Option<&'a str>,
    pub extra_args: &'a [String],
}

/// Build a runner invocation: `<runner> -f <task_file> [extra_args...] [sub_command]`.
pub fn build_task_runner_command(
    config: TaskRunnerCommandConfig<'_>,
    request: TaskRunnerRequest<'_>,
) -> Command {
    let mut command = Command::new(config.runner);
    command.current_dir(config.working_dir);
    for key in INHERITED_MAKE_VARS {
        command.env_remove(key);
    }
    command.env(config.resources_env, config.resources_dir);
    if !config.platform.is_windows() {
        command.env("HOME", config.home);
    }

    command.arg("-f").arg(request.task_file);
    for arg in request.extra_args {
        command.arg(arg);
    }
    if let Some(sub_command) = request.sub_command {
        command.arg(sub_command);
    }

    command
}

/// Render a command as a single shell-like line for diagnostics.
pub fn describe_command(command: &Command) -> String {
    std::iter::once(command.get_program())
        .chain(command.get_args())
        .map(OsStr::to_string_lossy)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Join a task file path onto `root`, accepting either separator in the relative part.
pub fn task_file_under_root(root: &Path, task_file: &Path) -> PathBuf {
    let relative = task_file.to_string_lossy();
    let trimmed = relative.trim_start_matches(['/', '\\']);
    let mut path = root.to_path_buf();
    for segment in trimmed.split(['/', '\\']).filter(|s| !s.is_empty()) {
        path.push(segment);
    }
    path
}
