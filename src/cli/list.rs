//! `pagetools list`: list page and standalone templates.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use serde::Serialize;

use crate::config::RenderConfig;
use crate::templating::{Renderer, is_private};

/// Arguments of `pagetools list`.
#[derive(Args, Debug)]
pub struct ListCommand {
    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct Listing<'a> {
    pages: Vec<&'a str>,
    standalone: Vec<&'a str>,
}

impl ListCommand {
    /// Prints every template name known to the renderer.
    ///
    /// # Errors
    ///
    /// Fails when the renderer cannot be set up.
    pub fn execute(self, config: RenderConfig) -> Result<()> {
        let renderer = Renderer::setup(config)?;
        let listing = Listing {
            pages: renderer.page_names().collect(),
            standalone: renderer.standalone_names().collect(),
        };

        if self.json {
            println!("{}", serde_json::to_string_pretty(&listing)?);
            return Ok(());
        }

        println!("{}", "Pages:".bold());
        for name in &listing.pages {
            if is_private(name) {
                println!("  {} {}", name, "(private)".dimmed());
            } else {
                println!("  {name}");
            }
        }
        println!("{}", "Standalone:".bold());
        for name in &listing.standalone {
            println!("  {name}");
        }
        Ok(())
    }
}
