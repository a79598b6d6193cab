//! Command-line interface for pagetools.
//!
//! # Commands
//!
//! - `render <path>` - render a page (with error fallback) to stdout or a file
//! - `hierarchy <path>` - show the layout chain of a page
//! - `list` - list page and standalone templates
//!
//! # Global options
//!
//! - `--config <file>` - settings file (default `pagetools.toml`, env `PAGETOOLS_CONFIG`)
//! - `--verbose` - debug logging
//! - `--quiet` - errors only
//!
//! Without either flag, `RUST_LOG` is honored and defaults to `warn`.
//!
//! ```bash
//! pagetools render blog/posts/hello --data post.yaml --output hello.html
//! pagetools --verbose hierarchy blog/posts/hello
//! pagetools list --json
//! ```

mod hierarchy;
mod list;
mod render;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::config::{DEFAULT_CONFIG_FILE, RenderConfig};

pub use hierarchy::HierarchyCommand;
pub use list::ListCommand;
pub use render::RenderCommand;

/// Top-level arguments.
#[derive(Parser, Debug)]
#[command(
    name = "pagetools",
    about = "Render hierarchical page templates with error-page fallback",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to the settings file
    #[arg(
        short,
        long,
        global = true,
        env = "PAGETOOLS_CONFIG",
        default_value = DEFAULT_CONFIG_FILE
    )]
    config: PathBuf,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Render a page to stdout or a file
    Render(RenderCommand),
    /// Show the layout chain of a page
    Hierarchy(HierarchyCommand),
    /// List available templates
    List(ListCommand),
}

impl Cli {
    /// Installs logging, loads settings and runs the selected command.
    ///
    /// # Errors
    ///
    /// Returns an error when the settings file cannot be loaded, the
    /// renderer cannot be set up, or the command itself fails.
    pub fn execute(self) -> Result<()> {
        init_logging(self.log_filter());

        let config = RenderConfig::load_from(&self.config)?;
        match self.command {
            Commands::Render(cmd) => cmd.execute(config),
            Commands::Hierarchy(cmd) => cmd.execute(config),
            Commands::List(cmd) => cmd.execute(config),
        }
    }

    /// The filter implied by the verbosity flags.
    fn log_filter(&self) -> EnvFilter {
        if self.verbose {
            EnvFilter::new("pagetools=debug")
        } else if self.quiet {
            EnvFilter::new("error")
        } else {
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
        }
    }
}

/// Sends tracing output to stderr. Later calls are ignored.
pub fn init_logging(filter: EnvFilter) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
