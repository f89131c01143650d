//! `z2` command-line entry point.
//!
//! # Responsibility
//! - Parse arguments, start logging, open the store, dispatch one command.
//! - Turn any failure into an `Error:` line on stderr and exit code 1.

mod cli;
mod commands;
mod config;

use clap::Parser;
use cli::Cli;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();
    match commands::run(cli) {
        Ok(message) => {
            println!("{message}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}
