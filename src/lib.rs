//! pagetools - hierarchical page rendering with error-page fallback
//!
//! Pages are templates in a directory tree. Rendering a page path such as
//! `blog/posts/hello` executes the page, then wraps its output in every
//! `index` layout found in the enclosing directories up to the root. When
//! anything fails, a page named after the error's status code is rendered
//! instead, and a fixed payload is sent if even that fails, so a caller always
//! has bytes to return.
//!
//! # Modules
//!
//! - [`templating`] - template sets, the renderer, and template functions
//! - [`config`] - renderer settings (TOML) and programmatic hooks
//! - [`core`] - setup errors and user-facing error formatting
//! - [`utils`] - status code helpers and path utilities
//! - [`cli`] - the `pagetools` command-line front end
//!
//! # Example
//!
//! ```rust,no_run
//! use pagetools::config::RenderConfig;
//! use pagetools::templating::{RenderData, Renderer};
//!
//! # fn main() -> anyhow::Result<()> {
//! let renderer = Renderer::setup(RenderConfig::load_from("pagetools.toml".as_ref())?)?;
//!
//! let mut data = RenderData::new();
//! data.insert("user", "ada");
//! let rendered = renderer.render("blog/posts/hello", &mut data);
//! println!("status {}", rendered.status());
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod templating;
pub mod utils;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
