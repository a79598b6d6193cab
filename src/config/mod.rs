//! Renderer configuration.
//!
//! [`RenderConfig`] holds the settings that can live in a `pagetools.toml`
//! file (directories, delimiters, fallback payload, flags). [`Hooks`] holds the
//! callbacks that can only be supplied in code: status-to-path mapping, logger,
//! development-mode predicate and extra template functions.
//!
//! # Examples
//!
//! ```rust,no_run
//! use pagetools::config::RenderConfig;
//!
//! let config = RenderConfig::default()
//!     .with_page_dir("site/pages")
//!     .with_inline_dir("site/static")
//!     .with_code_path(|code| format!("errors/{code}"))
//!     .with_logger(|message| eprintln!("{message}"));
//! ```

mod hooks;
mod settings;

pub use hooks::{CodePathFn, DevCheckerFn, Hooks, LoggerFn, TemplateFn};
pub use settings::{DEFAULT_CONFIG_FILE, DEFAULT_ULTIMATE_FAILURE, RenderConfig};
