//! Hierarchical page templating.
//!
//! Pages live in a directory tree. Each directory may contain an `index`
//! template acting as the layout for every page beneath it, so rendering
//! `blog/posts/hello` runs
//!
//! ```text
//! blog/posts/hello -> blog/posts/index -> blog/index -> index
//! ```
//!
//! with each step receiving the previous output as `content`. Layouts are
//! optional; the requested page is not.
//!
//! # Template syntax
//!
//! Templates are [Tera](https://keats.github.io/tera/) templates. Output is
//! escaped by default, so layouts insert the inner page with
//! `{{ content | safe }}`. A custom pair of expression delimiters can replace
//! `{{ }}` (see [`Delimiters`]).
//!
//! # Reserved data keys
//!
//! - `content`: output of the inner level
//! - `path`: the first template executed for this data
//! - `title`: accumulated by `title(text=...)`
//!
//! # Built-in functions
//!
//! - `title(text=...)` appends to the title (`"A | B"`)
//! - `import_once(path=...)` renders a standalone template once per data
//! - `inline(path=...)`, `inline_style(path=...)`, `inline_script(path=...)`
//!   embed a file from the inline directory once per data
//! - `active(href=..., class=...)`, `active_prefix(href=..., class=...)`
//!   return the class when the current path matches `href`
//!
//! # Error pages
//!
//! [`Renderer::render`] falls back to a page named after the error's status
//! code (`404`, `500`, or whatever the configured mapping returns), and to a
//! fixed payload when even the 500 page fails.
//!
//! # Examples
//!
//! ```rust,no_run
//! use pagetools::config::RenderConfig;
//! use pagetools::templating::{RenderData, Renderer};
//!
//! # fn example() -> anyhow::Result<()> {
//! let renderer = Renderer::setup(
//!     RenderConfig::default()
//!         .with_page_dir("site/pages")
//!         .with_standalone_dir("site/partials")
//!         .with_inline_dir("site/static"),
//! )?;
//!
//! let mut data = RenderData::new();
//! let rendered = renderer.render("/about/", &mut data);
//! assert!(rendered.status() == 200 || rendered.error.is_some());
//! # Ok(())
//! # }
//! ```

pub mod data;
pub mod delimiters;
pub mod error;
mod functions;
pub mod hierarchy;
pub mod inline;
pub mod registry;
pub mod renderer;


pub use data::{CONTENT_KEY, PATH_KEY, RenderData, TITLE_KEY, TITLE_SEPARATOR};
pub use delimiters::Delimiters;
pub use error::{RenderError, STATUS_NOT_FOUND, format_tera_error};
pub use functions::DEFAULT_ACTIVE_CLASS;
pub use hierarchy::{LAYOUT_NAME, PRIVATE_MARKER, is_private, normalize_page_path, template_hierarchy};
pub use inline::InlineFiles;
pub use registry::TemplateSet;
pub use renderer::{Rendered, Renderer};
