//! mach-azure-minimal CLI entry point
//!
//! Parses the command line, runs the selected command and prints failures with
//! details and suggestions.

use clap::Parser;
use mach_azure_minimal::cli;
use mach_azure_minimal::core::user_friendly_error;

fn main() {
    let cli = cli::Cli::parse();

    // Set up colored output for Windows
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    if let Err(e) = cli.execute() {
        let error_ctx = user_friendly_error(e);
        error_ctx.display();
        std::process::exit(1);
    }
}
