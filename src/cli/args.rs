//! CLI argument definitions and `RunProfile` construction.
use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};

use super::{resolve_config_path, RunProfile};

/// Top-level CLI commands.
#[derive(Debug, Clone, Subcommand)]
pub enum CliCommand {
    /// Verify help listings and dry-run paths of the configured task files.
    #[command(
        after_help = "Hint: use `taskfile-check verify --fixture 'Library\\SymfonyTest'` to check a single task file."
    )]
    Verify(VerifyArgs),
    /// Print the task file path derived from a fixture identity.
    Resolve(ResolveArgs),
    /// Print the help listing expected for the given command names.
    RenderHelp(RenderHelpArgs),
    /// Print the generated help pipeline expected in dry-run output.
    HelpPipeline(HelpPipelineArgs),
}

/// Arguments for `verify`.
#[derive(Debug, Clone, Args)]
pub struct VerifyArgs {
    /// Only verify this fixture (`Group\NameTest` or `Group/NameTest`).
    #[arg(long)]
    pub fixture: Option<String>,
}

/// Arguments for `resolve`.
#[derive(Debug, Clone, Args)]
pub struct ResolveArgs {
    /// Fixture identity, e.g. `Foo\BarTest`.
    pub identity: String,
    /// Namespace prefix to strip from the identity.
    #[arg(long)]
    pub namespace: Option<String>,
}

/// Arguments for `render-help`.
#[derive(Debug, Clone, Args)]
pub struct RenderHelpArgs {
    /// Command names in listing order.
    #[arg(required = true)]
    pub names: Vec<String>,
}

/// Arguments for `help-pipeline`.
#[derive(Debug, Clone, Args)]
pub struct HelpPipelineArgs {
    /// OS family (Linux, Darwin, Windows); defaults to the host.
    #[arg(long)]
    pub platform: Option<String>,
    /// Project root; defaults to the current directory.
    #[arg(long)]
    pub root: Option<PathBuf>,
    /// Home path replaced by `$HOME`.
    #[arg(long, default_value = crate::config::DEFAULT_HOME)]
    pub home: String,
    /// Task files scanned before the common ones.
    #[arg(value_name = "FILE")]
    pub files: Vec<PathBuf>,
}

/// Command-line arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    author,
    version,
    about = "Verify Makefile help listings and dry-run command paths",
    long_about = None
)]
pub struct CliArgs {
    /// Path to taskfile-check.toml (overrides TASKFILE_CHECK_CONFIG).
    #[arg(long = "config", global = true)]
    pub config_override: Option<PathBuf>,
    #[command(subcommand)]
    pub command: CliCommand,
}

impl CliArgs {
    /// Build a `RunProfile` from CLI args and environment variables.
    pub fn into_profile(self) -> Result<RunProfile> {
        let config_path = resolve_config_path(self.config_override)?;
        Ok(RunProfile {
            config_path,
            command: self.command,
        })
    }
}
