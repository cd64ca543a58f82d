//! OS family selection for normalization and expected-path generation.
use std::{env, fmt, str::FromStr};

use serde::{Deserialize, Deserializer};

use crate::lib::errors::HarnessError;

/// OS families the harness knows how to normalize and generate pipelines for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    Linux,
    Darwin,
    Windows,
}

impl Platform {
    /// Platform of the running host.
    pub fn current() -> Result<Self, HarnessError> {
        Self::from_target_os(env::consts::OS)
    }

    /// Map a Rust `target_os` value to an OS family.
    pub fn from_target_os(os: &str) -> Result<Self, HarnessError> {
        match os {
            "linux" => Ok(Platform::Linux),
            "macos" => Ok(Platform::Darwin),
            "windows" => Ok(Platform::Windows),
            other => Err(HarnessError::UnsupportedPlatform { name: other.into() }),
        }
    }

    /// OS family name as it appears in resource paths (`Common/Platform/<name>`).
    pub const fn as_str(&self) -> &'static str {
        match self {
            Platform::Linux => "Linux",
            Platform::Darwin => "Darwin",
            Platform::Windows => "Windows",
        }
    }

    pub const fn is_windows(&self) -> bool {
        matches!(self, Platform::Windows)
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = HarnessError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "Linux" | "linux" => Ok(Platform::Linux),
            "Darwin" | "darwin" | "macos" => Ok(Platform::Darwin),
            "Windows" | "windows" => Ok(Platform::Windows),
            other => Err(HarnessError::UnsupportedPlatform { name: other.into() }),
        }
    }
}

impl<'de> Deserialize<'de> for Platform {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
