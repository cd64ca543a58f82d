//! Task file identity and the on-disk path derived from it.

use std::{
    fmt, fs,
    path::{Path, PathBuf},
};

use crate::lib::errors::HarnessError;

/// Directory holding every task file, relative to the project root.
pub const RESOURCES_DIR: &str = "resources";
/// Suffix every fixture name must carry.
pub const IDENTITY_SUFFIX: &str = "Test";
/// Task file extension.
pub const TASK_FILE_EXTENSION: &str = "mk";

/// Logical identity of a fixture: a group (directory) and a name ending in `Test`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TaskFileIdentity {
    /// Slash separated group, e.g. `Library/Symfony`; may be empty.
    pub group: String,
    pub name: String,
}

impl TaskFileIdentity {
    pub fn new(group: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            name: name.into(),
        }
    }

    /// Parse the compound form `Group\Sub\NameTest` (or `/` separated).
    ///
    /// A leading `namespace` prefix is stripped when present.
    pub fn parse(qualified: &str, namespace: Option<&str>) -> Self {
        let mut rest = qualified.trim_matches(|c| c == '\\' || c == '/');
        if let Some(prefix) = namespace.map(|ns| ns.trim_matches(|c| c == '\\' || c == '/')) {
            if !prefix.is_empty() {
                if let Some(stripped) = rest.strip_prefix(prefix) {
                    if let Some(stripped) = stripped.strip_prefix(['\\', '/']) {
                        rest = stripped;
                    }
                }
            }
        }

        let segments: Vec<&str> = rest.split(['\\', '/']).filter(|s| !s.is_empty()).collect();
        match segments.split_last() {
            Some((name, group)) => Self::new(group.join("/"), *name),
            None => Self::new("", ""),
        }
    }

    /// Resolve the task file path (`resources/<group>/<name>.mk`).
    pub fn resolve(&self) -> Result<TaskFilePath, HarnessError> {
        let stem = self
            .name
            .strip_suffix(IDENTITY_SUFFIX)
            .filter(|stem| !stem.is_empty());
        let Some(stem) = stem else {
            return Err(HarnessError::InvalidIdentity {
                identity: self.to_string(),
                reason: "expected the name to end with \"Test\"",
            });
        };

        let mut path = PathBuf::from(RESOURCES_DIR);
        for segment in self.group.split('/').filter(|s| !s.is_empty()) {
            path.push(segment);
        }
        path.push(format!("{}.{TASK_FILE_EXTENSION}", stem.to_lowercase()));
        Ok(TaskFilePath(path))
    }
}

impl fmt::Display for TaskFileIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.group.is_empty() {
            f.write_str(&self.name)
        } else {
            write!(f, "{}/{}", self.group, self.name)
        }
    }
}

/// Task file location relative to the project root.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TaskFilePath(PathBuf);

impl TaskFilePath {
    pub fn as_path(&self) -> &Path {
        &self.0
    }

    /// Absolute location under `root`.
    pub fn absolute(&self, root: &Path) -> PathBuf {
        root.join(&self.0)
    }
}

impl AsRef<Path> for TaskFilePath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl fmt::Display for TaskFilePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

/// Returns true if the path is non-empty and absolute.
pub fn is_nonempty_absolute(path: &Path) -> bool {
    !path.as_os_str().is_empty() && path.is_absolute()
}

/// Canonical path when it exists, otherwise the path unchanged.
///
/// Windows verbatim prefixes (`\\?\`) are dropped so the result matches what tools print.
pub fn real_path(path: &Path) -> PathBuf {
    match fs::canonicalize(path) {
        Ok(resolved) => strip_verbatim_prefix(resolved),
        Err(_) => path.to_path_buf(),
    }
}

fn strip_verbatim_prefix(path: PathBuf) -> PathBuf {
    let stripped = path
        .to_str()
        .and_then(|text| text.strip_prefix(r"\\?\"))
        .filter(|rest| !rest.starts_with("UNC\\"))
        .map(PathBuf::from);
    stripped.unwrap_or(path)
}
