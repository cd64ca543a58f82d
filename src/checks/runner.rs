use std::path::PathBuf;

use tracing::{debug, error, info};

use crate::{
    config::HarnessSection,
    lib::{
        errors::HarnessError,
        make::{self as make_helpers, DRY_RUN_FLAG},
        normalize::{canonicalize_line_endings, Normalizer},
        paths::TaskFilePath,
        platform::Platform,
    },
};

/// Invokes the task runner against task files under a project root.
#[derive(Debug, Clone)]
pub struct TaskRunner {
    runner: PathBuf,
    root: PathBuf,
    working_dir: PathBuf,
    platform: Platform,
    resources_env: String,
    home: String,
    normalizer: Normalizer,
}

impl TaskRunner {
    pub fn new(settings: &HarnessSection) -> Self {
        let normalizer = Normalizer::new(
            settings.platform,
            &settings.root.to_string_lossy(),
            &settings.home,
        );
        Self {
            runner: settings.runner.clone(),
            root: settings.root.clone(),
            working_dir: settings.working_dir.clone(),
            platform: settings.platform,
            resources_env: settings.resources_env.clone(),
            home: settings.home.clone(),
            normalizer,
        }
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    /// Absolute location of a task file.
    pub fn task_file_location(&self, task_file: &TaskFilePath) -> PathBuf {
        make_helpers::task_file_under_root(&self.root, task_file.as_path())
    }

    /// Run the task file and return stdout verbatim.
    ///
    /// A non-zero exit is always an error; the output is not inspected further.
    pub fn execute(
        &self,
        task_file: &TaskFilePath,
        sub_command: Option<&str>,
        extra_args: &[String],
    ) -> Result<String, HarnessError> {
        let task_file_path = self.task_file_location(task_file);
        let resources_dir = self.root.join(crate::lib::paths::RESOURCES_DIR);
        let mut command = make_helpers::build_task_runner_command(
            make_helpers::TaskRunnerCommandConfig {
                runner: &self.runner,
                working_dir: &self.working_dir,
                platform: self.platform,
                resources_env: &self.resources_env,
                resources_dir: &resources_dir,
                home: &self.home,
            },
            make_helpers::TaskRunnerRequest {
                task_file: &task_file_path,
                sub_command,
                extra_args,
            },
        );
        let command_line = make_helpers::describe_command(&command);

        debug!(
            target: "taskfile_check::runner",
            command = %command_line,
            working_dir = %self.working_dir.display(),
            "Starting task runner"
        );

        let output = command.output().map_err(|source| HarnessError::Spawn {
            program: self.runner.display().to_string(),
            source,
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim_end().to_string();
            error!(
                target: "taskfile_check::runner",
                command = %command_line,
                exit_code = output.status.code(),
                "Task runner exited abnormally"
            );
            return Err(HarnessError::ProcessFailed {
                command_line,
                exit_code: output.status.code(),
                stderr,
            });
        }

        info!(
            target: "taskfile_check::runner",
            command = %command_line,
            stdout_bytes = output.stdout.len(),
            "Task runner finished"
        );
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    /// Run with the dry-run flag appended and return the non-empty output lines.
    ///
    /// Line endings are canonicalized first on Windows only; elsewhere a trailing `\r` is kept.
    pub fn dry_run(
        &self,
        task_file: &TaskFilePath,
        sub_command: Option<&str>,
        extra_args: &[String],
    ) -> Result<Vec<String>, HarnessError> {
        let mut args = extra_args.to_vec();
        args.push(DRY_RUN_FLAG.to_string());
        let output = self.execute(task_file, sub_command, &args)?;
        if self.platform.is_windows() {
            return Ok(non_empty_lines(&canonicalize_line_endings(&output)));
        }
        Ok(non_empty_lines(&output))
    }
}

/// Split output on `\n`, dropping the empty lines.
pub fn non_empty_lines(output: &str) -> Vec<String> {
    output
        .split('\n')
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
