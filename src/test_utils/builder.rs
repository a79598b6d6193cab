//! Fluent builder for on-disk template trees used in tests.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::config::{DEFAULT_CONFIG_FILE, RenderConfig};
use crate::templating::{RenderData, Rendered, Renderer};

/// Directory holding page templates inside a test site.
pub const PAGES_DIR: &str = "pages";
/// Directory holding standalone templates inside a test site.
pub const PARTIALS_DIR: &str = "partials";
/// Directory holding inline files inside a test site.
pub const STATIC_DIR: &str = "static";

/// Builds a temporary site and a renderer over it.
///
/// ```rust,no_run
/// use pagetools::test_utils::SiteBuilder;
///
/// let site = SiteBuilder::new()
///     .unwrap()
///     .page("index", "<main>{{ content | safe }}</main>")
///     .page("about", "About")
///     .build()
///     .unwrap();
/// assert_eq!(site.render("about").text(), "<main>About</main>");
/// ```
pub struct SiteBuilder {
    temp_dir: TempDir,
    files: Vec<(PathBuf, String)>,
    config: RenderConfig,
}

impl SiteBuilder {
    /// Creates a builder over a fresh temporary directory.
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let root = temp_dir.path();
        let config = RenderConfig::default()
            .with_page_dir(root.join(PAGES_DIR))
            .with_standalone_dir(root.join(PARTIALS_DIR))
            .with_inline_dir(root.join(STATIC_DIR));

        Ok(Self {
            temp_dir,
            files: Vec::new(),
            config,
        })
    }

    /// Adds a page template; `name` gets an `.html` extension.
    pub fn page(mut self, name: &str, content: &str) -> Self {
        self.files.push((Path::new(PAGES_DIR).join(format!("{name}.html")), content.to_string()));
        self
    }

    /// Adds a standalone template; `name` gets an `.html` extension.
    pub fn partial(mut self, name: &str, content: &str) -> Self {
        self.files.push((Path::new(PARTIALS_DIR).join(format!("{name}.html")), content.to_string()));
        self
    }

    /// Adds an inline file at `path` (extension included).
    pub fn inline_file(mut self, path: &str, content: &str) -> Self {
        self.files.push((Path::new(STATIC_DIR).join(path), content.to_string()));
        self
    }

    /// Adjusts the renderer configuration.
    pub fn configure(mut self, f: impl FnOnce(RenderConfig) -> RenderConfig) -> Self {
        self.config = f(self.config);
        self
    }

    /// Writes every file and sets up the renderer.
    pub fn build(self) -> Result<Site> {
        let root = self.temp_dir.path();
        for dir in [PAGES_DIR, PARTIALS_DIR, STATIC_DIR] {
            std::fs::create_dir_all(root.join(dir))?;
        }
        for (path, content) in &self.files {
            write_file(&root.join(path), content)?;
        }

        let renderer = Renderer::setup(self.config)?;
        Ok(Site {
            temp_dir: self.temp_dir,
            renderer,
        })
    }
}

/// A built test site. The directory lives as long as this value.
pub struct Site {
    /// Backing temporary directory
    pub temp_dir: TempDir,
    /// Renderer over the site's directories
    pub renderer: Renderer,
}

impl Site {
    /// Root of the site.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Renders `path` with fresh data.
    pub fn render(&self, path: &str) -> Rendered {
        self.renderer.render(path, &mut RenderData::new())
    }

    /// Overwrites an inline file after setup.
    pub fn write_inline_file(&self, path: &str, content: &str) -> Result<()> {
        write_file(&self.root().join(STATIC_DIR).join(path), content)
    }

    /// Writes a `pagetools.toml` with directories relative to the site root.
    pub fn write_config(&self) -> Result<PathBuf> {
        let config = RenderConfig::default()
            .with_page_dir(PAGES_DIR)
            .with_standalone_dir(PARTIALS_DIR)
            .with_inline_dir(STATIC_DIR);
        let path = self.root().join(DEFAULT_CONFIG_FILE);
        write_file(&path, &config.to_toml()?)?;
        Ok(path)
    }
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    std::fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))
}
