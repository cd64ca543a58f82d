//! Entry point for taskfile-check.
use std::process::ExitCode;

use clap::Parser;
use taskfile_check::{
    cli::{execute_cli_command, CliArgs, CliExit},
    lib::telemetry,
};

fn main() -> ExitCode {
    match bootstrap() {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(exit) => exit.report(),
    }
}

fn bootstrap() -> Result<bool, CliExit> {
    telemetry::init_tracing().map_err(CliExit::from_error)?;
    let args = CliArgs::parse();
    let profile = args.into_profile().map_err(CliExit::from_error)?;
    let output = execute_cli_command(profile).map_err(CliExit::from_error)?;

    if output.message.ends_with('\n') {
        print!("{}", output.message);
    } else {
        println!("{}", output.message);
    }
    Ok(output.success)
}
