// ============================================================================
// avsplice-cli/src/main.rs
// ============================================================================
//
// AVSPLICE CLI: Main Entry Point
//
// Parses the command line, installs logging, dispatches to the selected
// command and reports failures.
//
// Exit codes: 0 on success, 1 when a command fails, 2 for argument errors
// (reported by clap before anything runs).

use avsplice_cli::error::EXIT_FAILURE;
use avsplice_cli::logging::init_logging;
use avsplice_cli::terminal::{self, print_error};
use avsplice_cli::{Cli, Commands, run_info, run_merge};

use std::process;

fn main() {
    let cli = Cli::parse_checked();

    let use_color = terminal::color_wanted(cli.no_color);
    terminal::set_color(use_color);

    if let Err(e) = init_logging(cli.verbose, cli.log_dir.as_deref(), use_color) {
        print_error(&e);
        process::exit(EXIT_FAILURE);
    }

    let result = match cli.command {
        Some(Commands::Merge(args)) => run_merge(args),
        Some(Commands::Info(args)) => run_info(args),
        None => run_merge(cli.merge),
    };

    if let Err(e) = result {
        log::info!("Command failed: {} ({})", e, e.classification());
        print_error(&e);
        process::exit(EXIT_FAILURE);
    }
}
