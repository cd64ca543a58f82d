//! Output normalization: color stripping, placeholder substitution and line endings.

use std::{borrow::Cow, sync::OnceLock};

use regex::{Captures, Regex};

use crate::lib::platform::Platform;

pub const ROOT_PLACEHOLDER: &str = "$ROOT";
pub const HOME_PLACEHOLDER: &str = "$HOME";
pub const PLATFORM_PLACEHOLDER: &str = "$PLATFORM";
/// Resource path fragment that carries the OS family name.
pub const PLATFORM_FRAGMENT: &str = "Common/Platform/";

fn coloring_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\x1b\[\d+m").expect("color regex"))
}

fn line_ending_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\r\n|\r").expect("line ending regex"))
}

/// Remove terminal color sequences (`ESC [ digits m`).
pub fn strip_coloring(input: &str) -> String {
    coloring_pattern().replace_all(input, "").into_owned()
}

/// Canonicalize `\r\n` and `\r` to `\n`.
pub fn canonicalize_line_endings(input: &str) -> String {
    line_ending_pattern().replace_all(input, "\n").into_owned()
}

/// Rewrites environment specific text into portable placeholders.
#[derive(Debug, Clone)]
pub struct Normalizer {
    platform: Platform,
    substitutions: Vec<(String, String)>,
    pattern: Regex,
}

impl Normalizer {
    pub fn new(platform: Platform, root: &str, home: &str) -> Self {
        let platform_placeholder = format!("{PLATFORM_FRAGMENT}{PLATFORM_PLACEHOLDER}");
        let mut substitutions: Vec<(String, String)> = vec![
            (root.to_string(), ROOT_PLACEHOLDER.to_string()),
            (home.to_string(), HOME_PLACEHOLDER.to_string()),
            (
                format!("{PLATFORM_FRAGMENT}{}", platform.as_str()),
                platform_placeholder.clone(),
            ),
        ];
        substitutions.retain(|(needle, _)| !needle.is_empty());
        // Placeholders map to themselves so a root like `/` cannot match inside them.
        for placeholder in [
            ROOT_PLACEHOLDER.to_string(),
            HOME_PLACEHOLDER.to_string(),
            platform_placeholder,
        ] {
            substitutions.push((placeholder.clone(), placeholder));
        }
        // Alternation is leftmost-first; longer needles must be tried first.
        substitutions.sort_by(|a, b| b.0.len().cmp(&a.0.len()));
        substitutions.dedup_by(|a, b| a.0 == b.0);

        let alternation = substitutions
            .iter()
            .map(|(needle, _)| regex::escape(needle))
            .collect::<Vec<_>>()
            .join("|");
        let pattern = Regex::new(&alternation).expect("escaped literals always compile");

        Self {
            platform,
            substitutions,
            pattern,
        }
    }

    /// Full normalization: colors removed, placeholders substituted, line endings canonicalized on Windows.
    pub fn normalize(&self, input: &str) -> String {
        self.normalize_paths(&strip_coloring(input))
    }

    /// Placeholder substitution and line endings only; colors are kept.
    pub fn normalize_paths(&self, input: &str) -> String {
        let replaced = self.substitute(input);
        if self.platform.is_windows() {
            canonicalize_line_endings(&replaced)
        } else {
            replaced.into_owned()
        }
    }

    fn substitute<'a>(&self, input: &'a str) -> Cow<'a, str> {
        self.pattern.replace_all(input, |caps: &Captures<'_>| {
            let matched = &caps[0];
            self.substitutions
                .iter()
                .find(|(needle, _)| needle == matched)
                .map(|(_, replacement)| replacement.clone())
                .unwrap_or_else(|| matched.to_string())
        })
    }
}
