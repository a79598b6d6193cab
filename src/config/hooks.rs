//! Programmatic hooks that cannot live in a TOML file.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;

/// Maps a status code to the page path rendered for it.
pub type CodePathFn = Arc<dyn Fn(u16) -> String + Send + Sync>;

/// Receives messages about internal rendering failures.
pub type LoggerFn = Arc<dyn Fn(&str) + Send + Sync>;

/// Decides, per inline call, whether files should be re-read from disk.
pub type DevCheckerFn = Arc<dyn Fn() -> bool + Send + Sync>;

/// An extra function made available to every template.
pub type TemplateFn =
    Arc<dyn Fn(&HashMap<String, tera::Value>) -> tera::Result<tera::Value> + Send + Sync>;

/// Callbacks consulted by the renderer.
///
/// All hooks are optional. Without `code_path` the decimal code is used
/// (`404` -> `"404"`); without `logger` failures only go to `tracing`; without
/// `dev_checker` the `dev_mode` setting decides.
#[derive(Clone, Default)]
pub struct Hooks {
    /// Status-code-to-path mapping for error pages
    pub code_path: Option<CodePathFn>,
    /// Extra sink for internal failure messages
    pub logger: Option<LoggerFn>,
    /// Development-mode predicate for inline refresh
    pub dev_checker: Option<DevCheckerFn>,
    /// Extra template functions keyed by name
    pub functions: BTreeMap<String, TemplateFn>,
}

impl fmt::Debug for Hooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hooks")
            .field("code_path", &self.code_path.is_some())
            .field("logger", &self.logger.is_some())
            .field("dev_checker", &self.dev_checker.is_some())
            .field("functions", &self.functions.keys().collect::<Vec<_>>())
            .finish()
    }
}
