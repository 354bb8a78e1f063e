use clap::{CommandFactory, Parser};
use colored::*;
use mplus_converter::cli::{args::Args, commands};
use std::process;

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // If no subcommand was provided, show help
    let Some(command) = args.command else {
        let _ = Args::command().print_help();
        process::exit(0);
    };

    let failed = match commands::run(&command) {
        // Per-file errors have already been reported by the command
        Ok(stats) => stats.has_failures(),
        Err(error) => {
            eprintln!("{} {:#}", "Error:".bright_red().bold(), error);
            true
        }
    };

    if failed && command.session().wait {
        commands::shared::wait_for_enter();
    }

    process::exit(if failed { 1 } else { 0 });
}
