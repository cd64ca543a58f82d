//! Expected help listing rendering and the help comparison.

use std::collections::BTreeMap;

use tracing::info;

use crate::lib::{
    errors::HarnessError,
    normalize::{canonicalize_line_endings, strip_coloring},
    paths::TaskFilePath,
};

use super::TaskRunner;

/// Column width of the command name in the help listing.
pub const HELP_NAME_WIDTH: usize = 20;
const HELP_COLOR_START: &str = "\u{1b}[45m";
const HELP_COLOR_END: &str = "\u{1b}[0m";

/// Descriptions every task file shares.
pub const DEFAULT_HELP_ENTRIES: &[(&str, &str)] = &[
    ("analyze", "Analyze the codebase"),
    ("dist", "Prepare the codebase for commit"),
    ("help", "Prints this help"),
    ("sh/php", "Run PHP shell"),
    ("test", "Test the codebase"),
];

/// Command name to description lookup used to synthesize the expected help.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelpCatalog {
    entries: BTreeMap<String, String>,
}

impl Default for HelpCatalog {
    fn default() -> Self {
        Self::from_entries(
            DEFAULT_HELP_ENTRIES
                .iter()
                .map(|(name, description)| (name.to_string(), description.to_string())),
        )
    }
}

impl HelpCatalog {
    pub fn empty() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    pub fn from_entries(entries: impl IntoIterator<Item = (String, String)>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    /// Add or override descriptions.
    pub fn extend(&mut self, entries: impl IntoIterator<Item = (String, String)>) {
        self.entries.extend(entries);
    }

    /// Description for `name`; unknown commands have an empty description.
    pub fn describe(&self, name: &str) -> &str {
        self.entries.get(name).map(String::as_str).unwrap_or("")
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Render the listing the task runner is expected to print, in the given order.
pub fn render_help_listing<S: AsRef<str>>(names: &[S], catalog: &HelpCatalog) -> String {
    let lines = names
        .iter()
        .map(|name| {
            let name = name.as_ref();
            format!(
                "{HELP_COLOR_START}{name:<width$}{HELP_COLOR_END} {}",
                catalog.describe(name),
                width = HELP_NAME_WIDTH
            )
        })
        .collect::<Vec<_>>();
    format!("{}\n", lines.join("\n"))
}

/// Command names advertised by a help listing.
pub fn advertised_commands(help_output: &str) -> Result<Vec<String>, HarnessError> {
    strip_coloring(help_output)
        .trim()
        .split('\n')
        .map(|line| match line.find(' ') {
            Some(index) => Ok(line[..index].to_string()),
            None => Err(HarnessError::MalformedHelp {
                line: line.to_string(),
            }),
        })
        .collect()
}

/// Run `help` and compare it byte for byte with the rendered expectation.
///
/// Returns the path-normalized help output so callers can derive the advertised commands.
pub fn check_help<S: AsRef<str>>(
    runner: &TaskRunner,
    task_file: &TaskFilePath,
    expected_names: &[S],
    catalog: &HelpCatalog,
) -> Result<String, HarnessError> {
    let raw = runner.execute(task_file, Some("help"), &[])?;
    let actual = runner.normalizer().normalize_paths(&raw);
    let expected = render_help_listing(expected_names, catalog);

    let (expected, compared) = if runner.platform().is_windows() {
        (
            canonicalize_line_endings(&strip_coloring(&expected)),
            strip_coloring(&actual),
        )
    } else {
        (expected, actual.clone())
    };

    if expected != compared {
        return Err(HarnessError::HelpMismatch {
            expected,
            actual: compared,
        });
    }

    info!(
        target: "taskfile_check::suite",
        task_file = %task_file,
        commands = expected_names.len(),
        "Help listing matches"
    );
    Ok(actual)
}
