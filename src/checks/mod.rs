//! Task file verification: running the task runner and comparing its output.
pub mod dry_run;
pub mod expected;
pub mod help;
pub mod runner;
pub mod suite;

pub use dry_run::{check_dry_runs, ExpectedPath, ExpectedPaths};
pub use expected::{current_uid, ExpectedPathGenerator, DEFAULT_QA_IMAGE};
pub use help::{
    advertised_commands, check_help, render_help_listing, HelpCatalog, DEFAULT_HELP_ENTRIES,
    HELP_NAME_WIDTH,
};
pub use runner::{non_empty_lines, TaskRunner};
pub use suite::{FixtureOutcome, Suite, SuiteReport};
