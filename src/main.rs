//! pagetools CLI entry point
//!
//! Parses arguments, runs the selected command and prints failures through
//! [`user_friendly_error`].

use clap::Parser;
use pagetools::cli;
use pagetools::core::user_friendly_error;

fn main() {
    let cli = cli::Cli::parse();

    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    if let Err(e) = cli.execute() {
        let error_ctx = user_friendly_error(e);
        error_ctx.display();
        std::process::exit(1);
    }
}
