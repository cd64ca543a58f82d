use std::{collections::HashSet, path::Path};

use serde::Deserialize;

use crate::{checks::HelpCatalog, lib::errors::ConfigError};

/// One `[[help]]` entry; the name is kept verbatim.
#[derive(Debug, Deserialize)]
pub struct RawHelpEntry {
    pub name: Option<String>,
    pub description: Option<String>,
}

/// Merge `[[help]]` descriptions over the default catalog.
pub fn parse_help_section(
    raw: Option<Vec<RawHelpEntry>>,
    path: &Path,
) -> Result<HelpCatalog, ConfigError> {
    let mut catalog = HelpCatalog::default();
    let Some(entries) = raw else {
        return Ok(catalog);
    };

    let mut seen = HashSet::new();
    let mut parsed = Vec::with_capacity(entries.len());
    for entry in entries {
        let name = entry.name.ok_or(ConfigError::MissingField {
            path: path.to_path_buf(),
            field: "help.name",
        })?;
        if name.trim().is_empty() || name.contains(char::is_whitespace) {
            return Err(ConfigError::InvalidField {
                path: path.to_path_buf(),
                field: "help.name",
                message: format!("Command names cannot be empty or contain spaces: {name:?}"),
            });
        }
        if !seen.insert(name.clone()) {
            return Err(ConfigError::InvalidField {
                path: path.to_path_buf(),
                field: "help.name",
                message: format!("Command `{name}` is described twice"),
            });
        }
        parsed.push((name, entry.description.unwrap_or_default()));
    }

    catalog.extend(parsed);
    Ok(catalog)
}
