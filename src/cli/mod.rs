//! CLI entrypoint module structure.
use std::{env, path::Path, process::ExitCode};

use anyhow::{anyhow, Context, Error, Result};

use crate::{
    checks::{render_help_listing, ExpectedPathGenerator, HelpCatalog, Suite},
    config::HarnessConfig,
    lib::{
        normalize::Normalizer,
        paths::{real_path, TaskFileIdentity},
        platform::Platform,
    },
};

pub mod args;
pub mod profile;

pub use args::{
    CliArgs, CliCommand, HelpPipelineArgs, RenderHelpArgs, ResolveArgs, VerifyArgs,
};
pub use profile::{resolve_config_path, RunProfile};

/// Text to print and whether the command succeeded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub message: String,
    pub success: bool,
}

impl CommandOutput {
    fn ok(message: String) -> Self {
        Self {
            message,
            success: true,
        }
    }
}

/// Bundles a fatal error message with an exit code.
#[derive(Debug)]
pub struct CliExit {
    message: String,
    exit_code: ExitCode,
}

impl CliExit {
    pub fn from_error(err: impl Into<Error>) -> Self {
        let err = err.into();
        Self {
            message: format!("{err:?}"),
            exit_code: ExitCode::FAILURE,
        }
    }

    pub fn report(self) -> ExitCode {
        eprintln!("{}", self.message);
        self.exit_code
    }
}

/// Execute a CLI command and return the user-facing output.
pub fn execute_cli_command(profile: RunProfile) -> Result<CommandOutput> {
    match profile.command {
        CliCommand::Verify(args) => verify(&profile.config_path, args.fixture.as_deref()),
        CliCommand::Resolve(args) => {
            let identity = TaskFileIdentity::parse(&args.identity, args.namespace.as_deref());
            let path = identity.resolve()?;
            Ok(CommandOutput::ok(path.as_path().to_string_lossy().replace('\\', "/")))
        }
        CliCommand::RenderHelp(args) => {
            let catalog = catalog_for(&profile.config_path)?;
            Ok(CommandOutput::ok(render_help_listing(&args.names, &catalog)))
        }
        CliCommand::HelpPipeline(args) => help_pipeline(args),
    }
}

fn verify(config_path: &Path, fixture: Option<&str>) -> Result<CommandOutput> {
    let config = HarnessConfig::load_from_path(config_path.to_path_buf())?;
    let selected = match fixture {
        Some(identity) => vec![config
            .fixture(identity)
            .ok_or_else(|| anyhow!("no fixture `{identity}` in {}", config_path.display()))?],
        None => config.fixtures.iter().collect(),
    };

    let report = Suite::new(&config).run(selected);
    Ok(CommandOutput {
        message: serde_json::to_string_pretty(&report)?,
        success: report.is_success(),
    })
}

/// Catalog from the config file when one exists, otherwise the defaults.
fn catalog_for(config_path: &Path) -> Result<HelpCatalog> {
    if !config_path.is_file() {
        return Ok(HelpCatalog::default());
    }
    let config = HarnessConfig::load_from_path(config_path.to_path_buf())?;
    Ok(config.catalog)
}

fn help_pipeline(args: HelpPipelineArgs) -> Result<CommandOutput> {
    let platform = match args.platform.as_deref() {
        Some(name) => name.parse::<Platform>()?,
        None => Platform::current()?,
    };
    let root = match args.root {
        Some(root) => root,
        None => env::current_dir().context("failed to obtain current directory")?,
    };
    let root = real_path(&root);
    let normalizer = Normalizer::new(platform, &root.to_string_lossy(), &args.home);
    let generator = ExpectedPathGenerator::new(platform, &root, normalizer);
    Ok(CommandOutput::ok(generator.help_execution_path(&args.files)))
}
