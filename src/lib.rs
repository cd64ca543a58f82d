//! Library crate root re-exporting the verification harness modules.

#[path = "lib/mod.rs"]
pub mod lib_mod;
pub use lib_mod as lib;
pub mod checks;
pub mod cli;
pub mod config;
