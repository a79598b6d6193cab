//! `pagetools render`: render one page to stdout or a file.

use anyhow::{Context, Result, bail};
use clap::Args;
use colored::Colorize;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::config::RenderConfig;
use crate::templating::{RenderData, Renderer};

/// Arguments of `pagetools render`.
#[derive(Args, Debug)]
pub struct RenderCommand {
    /// Page path, for example `blog/posts/hello`
    pub path: String,

    /// JSON or YAML file whose top-level object becomes the render data
    #[arg(short, long)]
    pub data: Option<PathBuf>,

    /// Write the output here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Render a single page template without layouts or fallback
    #[arg(long, conflicts_with = "standalone")]
    pub isolated: bool,

    /// Render a standalone template without fallback
    #[arg(long)]
    pub standalone: bool,

    /// Exit with an error when an error page was rendered instead of the page
    #[arg(long)]
    pub strict: bool,
}

impl RenderCommand {
    /// Runs the command against `config`.
    ///
    /// # Errors
    ///
    /// Fails when setup fails, the data file is unusable, an isolated render
    /// fails, the output cannot be written, or `--strict` is set and the page
    /// fell back to an error page.
    pub fn execute(self, config: RenderConfig) -> Result<()> {
        let renderer = Renderer::setup(config)?;
        let mut data = match &self.data {
            Some(path) => load_data(path)?,
            None => RenderData::new(),
        };

        let body = if self.isolated {
            renderer.render_isolated(&self.path, &mut data)?
        } else if self.standalone {
            renderer.render_standalone(&self.path, &mut data)?
        } else {
            let rendered = renderer.render(&self.path, &mut data);
            if let Some(error) = &rendered.error {
                eprintln!("{} {} {}", "status".yellow().bold(), rendered.status(), error);
                if self.strict {
                    bail!("Rendering '{}' fell back to an error page: {}", self.path, error);
                }
            }
            rendered.body
        };

        self.write_output(&body)
    }

    fn write_output(&self, body: &[u8]) -> Result<()> {
        match &self.output {
            Some(path) => std::fs::write(path, body)
                .with_context(|| format!("Failed to write output to {}", path.display())),
            None => {
                let mut stdout = std::io::stdout().lock();
                stdout.write_all(body).context("Failed to write output")?;
                stdout.flush().context("Failed to write output")
            }
        }
    }
}

/// Reads render data from a JSON or YAML file, chosen by extension.
pub fn load_data(path: &Path) -> Result<RenderData> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read data file {}", path.display()))?;

    let is_yaml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"));
    let value: serde_json::Value = if is_yaml {
        serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse YAML data from {}", path.display()))?
    } else {
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse JSON data from {}", path.display()))?
    };

    match RenderData::from_json(value) {
        Some(data) => Ok(data),
        None => bail!("Data file {} must contain an object at the top level", path.display()),
    }
}
