//! `pagetools hierarchy`: show which templates a page render would run.

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use crate::config::RenderConfig;
use crate::templating::{Renderer, normalize_page_path, template_hierarchy};

/// Arguments of `pagetools hierarchy`.
#[derive(Args, Debug)]
pub struct HierarchyCommand {
    /// Page path, for example `blog/posts/hello`
    pub path: String,
}

impl HierarchyCommand {
    /// Prints the layout chain root first, marking templates that don't exist.
    ///
    /// # Errors
    ///
    /// Fails when the renderer cannot be set up.
    pub fn execute(self, config: RenderConfig) -> Result<()> {
        let renderer = Renderer::setup(config)?;
        let Some(page) = normalize_page_path(&self.path) else {
            println!("{} '{}' is not a renderable page path", "!".red(), self.path);
            return Ok(());
        };

        for (depth, name) in template_hierarchy(page).iter().enumerate() {
            let indent = "  ".repeat(depth);
            if renderer.has_page(name) {
                println!("{indent}{}", name.green());
            } else {
                println!("{indent}{} {}", name.dimmed(), "(missing)".dimmed());
            }
        }
        Ok(())
    }
}
