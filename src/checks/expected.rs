//! Generators for platform specific lines expected in dry-run output.

use std::path::{Path, PathBuf};

use crate::lib::{
    normalize::Normalizer,
    paths::{real_path, RESOURCES_DIR},
    platform::Platform,
};

/// Image used by the containerized QA tool targets.
pub const DEFAULT_QA_IMAGE: &str = "jakzal/phpqa:1.79.1-php8.1.12-alpine";

const HELP_GREP_PATTERN: &str = r"'^ *[-a-zA-Z0-9_/]+ *:.*## '";
const HELP_AWK_FORMATTER: &str =
    r#"awk 'BEGIN {FS = ":.*?## "}; {printf "\033[45m%-20s\033[0m %s\n", $1, $2}'"#;
const HELP_SELECT_STRING_PATTERN: &str = r"'^ *(?<name>[-a-zA-Z0-9_/]+) *:.*## *(?<help>.+)'";
const HELP_WRITE_HOST_FORMATTER: &str = r#"ForEach-Object{"{0, -20}" -f $_.Matches[0].Groups["name"] | Write-Host -NoNewline -BackgroundColor Magenta -ForegroundColor White; " {0}" -f $_.Matches[0].Groups["help"] | Write-Host -ForegroundColor White}"#;

/// Builds expected dry-run lines for one project root and platform.
#[derive(Debug, Clone)]
pub struct ExpectedPathGenerator {
    platform: Platform,
    root: PathBuf,
    normalizer: Normalizer,
    qa_image: String,
}

impl ExpectedPathGenerator {
    pub fn new(platform: Platform, root: &Path, normalizer: Normalizer) -> Self {
        Self {
            platform,
            root: root.to_path_buf(),
            normalizer,
            qa_image: DEFAULT_QA_IMAGE.to_string(),
        }
    }

    pub fn with_qa_image(mut self, image: impl Into<String>) -> Self {
        self.qa_image = image.into();
        self
    }

    /// Files every help listing scans in addition to the task file's own.
    pub fn common_help_files(&self) -> Vec<PathBuf> {
        let common = self.root.join(RESOURCES_DIR).join("Common");
        vec![
            common.join("default.mk"),
            common
                .join("Platform")
                .join(self.platform.as_str())
                .join("default.mk"),
        ]
    }

    /// Pipeline the `help` target prints in dry-run mode.
    ///
    /// `files` are scanned before the common ones; relative paths are taken from the root.
    pub fn help_execution_path(&self, files: &[PathBuf]) -> String {
        let files = files
            .iter()
            .map(|file| self.root.join(file))
            .chain(self.common_help_files())
            .map(|file| real_path(&file).to_string_lossy().into_owned())
            .collect::<Vec<_>>();

        let command = match self.platform {
            Platform::Linux => linux_help_pipeline(&files),
            Platform::Darwin => darwin_help_pipeline(&files),
            Platform::Windows => windows_help_pipeline(&files, &self.normalizer),
        };
        self.normalizer.normalize(&command)
    }

    /// Containerized QA tool invocation printed by the analysis targets.
    pub fn qa_tool_execution_path(&self, command: &str) -> String {
        self.normalizer
            .normalize(&qa_tool_command(&self.qa_image, command, current_uid()))
    }
}

fn linux_help_pipeline(files: &[String]) -> String {
    format!(
        "grep -h -E {HELP_GREP_PATTERN} {} | sort | {HELP_AWK_FORMATTER}",
        files.join(" ")
    )
}

fn darwin_help_pipeline(files: &[String]) -> String {
    format!(
        "grep --no-filename --extended-regexp {HELP_GREP_PATTERN}  {} | sort | {HELP_AWK_FORMATTER}",
        files.join(" ")
    )
}

fn windows_help_pipeline(files: &[String], normalizer: &Normalizer) -> String {
    let files = files
        .iter()
        .enumerate()
        .map(|(index, file)| {
            if index == 0 {
                return file.clone();
            }
            normalizer
                .normalize(file)
                .replace('\\', "/")
                .replace("$ROOT/resources", "$ROOT\\resources")
        })
        .collect::<Vec<_>>();
    format!(
        "Select-String -Pattern {HELP_SELECT_STRING_PATTERN} {} | {HELP_WRITE_HOST_FORMATTER}",
        files.join(",")
    )
}

fn qa_tool_command(image: &str, command: &str, uid: u32) -> String {
    format!(
        "sh -c \"docker run --init --interactive  --rm --env \"COMPOSER_CACHE_DIR=/composer/cache\" --user \"{uid}:{uid}\" --volume \"$ROOT/var/phpqa:/cache\" --volume \"$ROOT:/project\" --volume \"$HOME/.composer:/composer\" --workdir /project {image} {command}\""
    )
}

/// Numeric user id of the current process (0 where there is none).
pub fn current_uid() -> u32 {
    #[cfg(unix)]
    {
        // SAFETY: getuid has no preconditions and cannot fail.
        unsafe { libc::getuid() }
    }
    #[cfg(not(unix))]
    {
        0
    }
}
