//! Renderer settings loaded from TOML or built in code.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::hooks::Hooks;

/// Payload sent when even the 500 page cannot be rendered.
pub const DEFAULT_ULTIMATE_FAILURE: &str = "500 internal server error";

/// Default file name looked up by the command-line front end.
pub const DEFAULT_CONFIG_FILE: &str = "pagetools.toml";

/// Configuration consumed by [`Renderer::setup`](crate::templating::Renderer::setup).
///
/// The plain settings round-trip through TOML:
///
/// ```toml
/// page_dir = "pages"
/// standalone_dir = "partials"
/// inline_dir = "static"
/// delimiters = ["[[", "]]"]
/// ultimate_failure = "Something went very wrong"
/// autoescape = true
/// dev_mode = false
/// ```
///
/// Callbacks are attached in code through [`Hooks`] and the `with_*` builders.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Directory with hierarchical page templates.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_dir: Option<PathBuf>,

    /// Directory with standalone templates rendered in isolation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub standalone_dir: Option<PathBuf>,

    /// Directory with files read into memory for inlining.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inline_dir: Option<PathBuf>,

    /// Custom expression delimiters replacing `{{` and `}}`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delimiters: Option<(String, String)>,

    /// Bytes sent when rendering fails completely.
    ///
    /// Defaults to [`DEFAULT_ULTIMATE_FAILURE`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ultimate_failure: Option<String>,

    /// Escape every `{{ }}` expression unless marked `| safe`.
    #[serde(default = "default_autoescape")]
    pub autoescape: bool,

    /// Re-read inline files on each use when no dev checker hook is set.
    #[serde(default)]
    pub dev_mode: bool,

    /// Callbacks; never serialized.
    #[serde(skip)]
    pub hooks: Hooks,
}

const fn default_autoescape() -> bool {
    true
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            page_dir: None,
            standalone_dir: None,
            inline_dir: None,
            delimiters: None,
            ultimate_failure: None,
            autoescape: default_autoescape(),
            dev_mode: false,
            hooks: Hooks::default(),
        }
    }
}

impl RenderConfig {
    /// Loads settings from a TOML file.
    ///
    /// Relative directories are resolved against the directory containing the
    /// file, so a config can be used from any working directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid TOML for
    /// this schema.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        let mut config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;

        if let Some(base) = path.parent() {
            config.resolve_relative_to(base);
        }
        tracing::debug!("Loaded render config from {}", path.display());
        Ok(config)
    }

    /// Serializes the plain settings back to TOML.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize render config")
    }

    /// Makes relative directories absolute with respect to `base`.
    pub fn resolve_relative_to(&mut self, base: &Path) {
        for dir in [&mut self.page_dir, &mut self.standalone_dir, &mut self.inline_dir]
            .into_iter()
            .flatten()
        {
            if dir.is_relative() {
                *dir = base.join(&*dir);
            }
        }
    }

    /// The payload used when every fallback page failed.
    pub fn ultimate_failure_bytes(&self) -> Vec<u8> {
        match &self.ultimate_failure {
            Some(payload) if !payload.is_empty() => payload.as_bytes().to_vec(),
            _ => DEFAULT_ULTIMATE_FAILURE.as_bytes().to_vec(),
        }
    }

    /// Evaluates the development-mode predicate.
    pub fn is_dev(&self) -> bool {
        match &self.hooks.dev_checker {
            Some(checker) => checker(),
            None => self.dev_mode,
        }
    }

    /// Sets the page template directory.
    #[must_use]
    pub fn with_page_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.page_dir = Some(dir.into());
        self
    }

    /// Sets the standalone template directory.
    #[must_use]
    pub fn with_standalone_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.standalone_dir = Some(dir.into());
        self
    }

    /// Sets the inline file directory.
    #[must_use]
    pub fn with_inline_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.inline_dir = Some(dir.into());
        self
    }

    /// Replaces the `{{ }}` expression delimiters.
    #[must_use]
    pub fn with_delimiters(mut self, left: impl Into<String>, right: impl Into<String>) -> Self {
        self.delimiters = Some((left.into(), right.into()));
        self
    }

    /// Sets the payload for complete rendering failure.
    #[must_use]
    pub fn with_ultimate_failure(mut self, payload: impl Into<String>) -> Self {
        self.ultimate_failure = Some(payload.into());
        self
    }

    /// Turns autoescaping on or off.
    #[must_use]
    pub fn with_autoescape(mut self, enabled: bool) -> Self {
        self.autoescape = enabled;
        self
    }

    /// Installs a status-code-to-path mapping.
    #[must_use]
    pub fn with_code_path(mut self, f: impl Fn(u16) -> String + Send + Sync + 'static) -> Self {
        self.hooks.code_path = Some(Arc::new(f));
        self
    }

    /// Installs a logger for internal failures.
    #[must_use]
    pub fn with_logger(mut self, f: impl Fn(&str) + Send + Sync + 'static) -> Self {
        self.hooks.logger = Some(Arc::new(f));
        self
    }

    /// Installs a development-mode predicate.
    #[must_use]
    pub fn with_dev_checker(mut self, f: impl Fn() -> bool + Send + Sync + 'static) -> Self {
        self.hooks.dev_checker = Some(Arc::new(f));
        self
    }

    /// Adds an extra template function.
    #[must_use]
    pub fn with_function(
        mut self,
        name: impl Into<String>,
        f: impl Fn(&HashMap<String, tera::Value>) -> tera::Result<tera::Value>
        + Send
        + Sync
        + 'static,
    ) -> Self {
        self.hooks.functions.insert(name.into(), Arc::new(f));
        self
    }
}
