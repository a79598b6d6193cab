//! Page rendering through nested layouts, with error-page fallback.
//!
//! A [`Renderer`] is built once from a [`RenderConfig`] and then only read.
//! Each render call enters its [`RenderData`] as the current scope of the
//! built-in template functions; nothing about one render leaks into the next
//! except what the caller keeps in its data.
//!
//! Templates see a snapshot of the data taken when they start. Values that
//! functions write while a template runs, such as the title, are visible to
//! the next level of the chain, or within the same template through
//! `page_title()`.

use std::collections::BTreeSet;
use std::fmt;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;

use tera::Tera;

use super::data::{AdoptedData, RenderData, SharedData, TITLE_KEY};
use super::delimiters::Delimiters;
use super::error::RenderError;
use super::functions::Scope;
use super::hierarchy::{is_private, normalize_page_path, template_hierarchy, trim_path};
use super::inline::InlineFiles;
use super::registry::{LoadOptions, TemplateSet};
use crate::config::RenderConfig;
use crate::core::SetupError;
use crate::utils::{self, STATUS_INTERNAL, STATUS_OK, error_code};

/// Bytes to send plus the error that produced them, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    /// Response body
    pub body: Vec<u8>,
    /// The error that caused a fallback page to be rendered
    pub error: Option<RenderError>,
}

impl Rendered {
    /// Status to report: `200` on success, otherwise the error's code.
    pub fn status(&self) -> u16 {
        self.error.as_ref().map_or(STATUS_OK, RenderError::status_code)
    }

    /// True when the requested page rendered without falling back.
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    /// The body as text, replacing invalid UTF-8.
    pub fn text(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }
}

struct Inner {
    pages: TemplateSet,
    standalone: TemplateSet,
    inline: InlineFiles,
    config: RenderConfig,
}

/// Hierarchical template renderer.
///
/// Cloning is cheap; clones share the loaded templates and inline cache.
///
/// # Examples
///
/// ```rust,no_run
/// use pagetools::config::RenderConfig;
/// use pagetools::templating::{RenderData, Renderer};
///
/// # fn example() -> anyhow::Result<()> {
/// let config = RenderConfig::default().with_page_dir("site/pages");
/// let renderer = Renderer::setup(config)?;
///
/// let mut data = RenderData::new();
/// data.insert("user", "ada");
/// let rendered = renderer.render("blog/posts/hello", &mut data);
/// println!("{} {}", rendered.status(), rendered.text());
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Renderer {
    inner: Arc<Inner>,
}

impl Renderer {
    /// Loads every template set and the inline cache described by `config`.
    ///
    /// Directories left unset produce empty sets.
    ///
    /// # Errors
    ///
    /// Returns a [`SetupError`] when a directory cannot be walked, a file
    /// cannot be read, a template does not parse, two files map to the same
    /// template name, or the delimiters are invalid.
    pub fn setup(config: RenderConfig) -> Result<Self, SetupError> {
        let delimiters = config
            .delimiters
            .as_ref()
            .map(|(left, right)| Delimiters::new(left, right))
            .transpose()?;
        let options = LoadOptions {
            delimiters: delimiters.as_ref(),
            autoescape: config.autoescape,
            hooks: &config.hooks,
        };

        let pages = match &config.page_dir {
            Some(dir) => TemplateSet::load(dir, options)?,
            None => TemplateSet::empty(options),
        };
        let standalone = match &config.standalone_dir {
            Some(dir) => TemplateSet::load(dir, options)?,
            None => TemplateSet::empty(options),
        };
        let inline = match &config.inline_dir {
            Some(dir) => InlineFiles::load(dir)?,
            None => InlineFiles::default(),
        };

        tracing::debug!(
            "Renderer ready: {} page template(s), {} standalone template(s), {} inline file(s)",
            pages.len(),
            standalone.len(),
            inline.len()
        );

        Ok(Self {
            inner: Arc::new(Inner {
                pages,
                standalone,
                inline,
                config,
            }),
        })
    }

    /// Renders `path`, falling back to error pages on failure.
    ///
    /// Always returns bytes. On failure [`Rendered::error`] holds the error
    /// that triggered the fallback.
    pub fn render(&self, path: &str, data: &mut RenderData) -> Rendered {
        match self.render_page(path, data) {
            Ok(body) => Rendered {
                body,
                error: None,
            },
            Err(e) => {
                let (body, error) = self.render_error(e, data);
                Rendered {
                    body,
                    error: Some(error),
                }
            }
        }
    }

    /// Renders a page and wraps it in every existing layout above it.
    ///
    /// The page runs first; its trimmed output becomes `content` for the
    /// nearest `index` layout, whose output becomes `content` for the next,
    /// up to the root `index`. Missing layouts are skipped.
    ///
    /// # Errors
    ///
    /// [`RenderError::NotFound`] when the path is empty, private, or not a
    /// registered page. [`RenderError::Rendering`] when any level fails; no
    /// partial output is returned.
    pub fn render_page(&self, path: &str, data: &mut RenderData) -> Result<Vec<u8>, RenderError> {
        self.with_shared(data, |shared| self.render_page_shared(path, shared))
            .map(String::into_bytes)
    }

    /// Renders one page template with no layouts.
    ///
    /// Private (`$`) templates are allowed here.
    ///
    /// # Errors
    ///
    /// [`RenderError::NotFound`] for unknown names, [`RenderError::Rendering`]
    /// when execution fails.
    pub fn render_isolated(&self, name: &str, data: &mut RenderData) -> Result<Vec<u8>, RenderError> {
        self.with_shared(data, |shared| self.render_single(&self.inner.pages, name, shared))
            .map(String::into_bytes)
    }

    /// Renders one standalone template.
    ///
    /// # Errors
    ///
    /// [`RenderError::NotFound`] for unknown names, [`RenderError::Rendering`]
    /// when execution fails.
    pub fn render_standalone(&self, name: &str, data: &mut RenderData) -> Result<Vec<u8>, RenderError> {
        self.with_shared(data, |shared| self.render_standalone_shared(name, shared))
            .map(String::into_bytes)
    }

    /// Renders the error page for `error`, escalating to the 500 page and
    /// finally to the configured failure payload.
    ///
    /// Every status code is tried at most once. If an error page fails with
    /// a code that was already tried, the 500 page is tried instead; once the
    /// 500 page has failed too the failure payload is returned together with
    /// [`RenderError::InternalFallback`]. On success the original `error` is
    /// returned with the error page bytes.
    pub fn render_error(&self, error: RenderError, data: &mut RenderData) -> (Vec<u8>, RenderError) {
        let mut attempted: BTreeSet<u16> = BTreeSet::new();
        let mut current = error.clone();

        loop {
            let mut code = current.status_code();
            if attempted.contains(&code) {
                if attempted.contains(&STATUS_INTERNAL) {
                    break;
                }
                code = STATUS_INTERNAL;
            }
            attempted.insert(code);

            let page = self.code_path(code);
            tracing::debug!("Rendering error page '{}' for status {}", page, code);
            match self.render_page(&page, data) {
                Ok(body) => return (body, error),
                Err(e) => {
                    tracing::debug!("Error page '{}' failed: {}", page, e);
                    current = e;
                }
            }
        }

        let message = format!("internal rendering error: {current}");
        tracing::error!("{}", message);
        if let Some(logger) = &self.inner.config.hooks.logger {
            logger(&message);
        }
        (self.inner.config.ultimate_failure_bytes(), RenderError::InternalFallback)
    }

    /// Page path of the error page for any error, through the configured mapping.
    pub fn error_path(&self, error: &dyn fmt::Display) -> String {
        self.code_path(error_code(error))
    }

    /// Page path rendered for a status code.
    pub fn code_path(&self, code: u16) -> String {
        match &self.inner.config.hooks.code_path {
            Some(mapping) => mapping(code),
            None => utils::code_path(code),
        }
    }

    /// True when a page template with this exact name exists.
    pub fn has_page(&self, name: &str) -> bool {
        self.inner.pages.contains(trim_path(name))
    }

    /// True when a standalone template with this exact name exists.
    pub fn has_standalone(&self, name: &str) -> bool {
        self.inner.standalone.contains(trim_path(name))
    }

    /// Page template names in sorted order.
    pub fn page_names(&self) -> impl Iterator<Item = &str> {
        self.inner.pages.names()
    }

    /// Standalone template names in sorted order.
    pub fn standalone_names(&self) -> impl Iterator<Item = &str> {
        self.inner.standalone.names()
    }

    /// The configuration this renderer was built from.
    pub fn config(&self) -> &RenderConfig {
        &self.inner.config
    }

    /// Evaluates the development-mode predicate.
    pub fn is_dev(&self) -> bool {
        self.inner.config.is_dev()
    }

    pub(crate) fn inline_files(&self) -> &InlineFiles {
        &self.inner.inline
    }

    /// Renders a standalone template against data already shared with a render.
    pub(crate) fn render_standalone_shared(&self, name: &str, shared: &SharedData) -> Result<String, RenderError> {
        self.render_single(&self.inner.standalone, name, shared)
    }

    /// Lends `data` to the template functions for the duration of `f`.
    fn with_shared<T>(&self, data: &mut RenderData, f: impl FnOnce(&SharedData) -> T) -> T {
        let adopted = AdoptedData::new(data);
        let _scope = Scope {
            renderer: self.clone(),
            data: adopted.shared().clone(),
        }
        .enter();
        f(adopted.shared())
    }

    fn render_page_shared(&self, path: &str, shared: &SharedData) -> Result<String, RenderError> {
        let pages = &self.inner.pages;
        let Some(page) = normalize_page_path(path) else {
            return Err(RenderError::not_found(trim_path(path), Vec::new()));
        };
        if !pages.contains(page) {
            return Err(self.missing(pages, page));
        }

        let tera = pages.tera();
        let mut content = String::new();
        for name in template_hierarchy(page).iter().rev() {
            if !pages.contains(name) {
                tracing::trace!("No layout '{}' for '{}'", name, page);
                continue;
            }
            content = execute(tera, name, shared)?.trim().to_string();
            shared.lock().set_content(content.clone());
        }
        Ok(content)
    }

    fn render_single(&self, set: &TemplateSet, name: &str, shared: &SharedData) -> Result<String, RenderError> {
        let name = trim_path(name);
        if name.is_empty() || !set.contains(name) {
            return Err(self.missing(set, name));
        }
        execute(set.tera(), name, shared)
    }

    fn missing(&self, set: &TemplateSet, name: &str) -> RenderError {
        let suggestions = set.suggestions(name).into_iter().filter(|s| !is_private(s)).collect();
        RenderError::not_found(name, suggestions)
    }
}

impl fmt::Debug for Renderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Renderer")
            .field("pages", &self.inner.pages.len())
            .field("standalone", &self.inner.standalone.len())
            .field("inline", &self.inner.inline.len())
            .field("config", &self.inner.config)
            .finish()
    }
}

/// Executes one template against the current data.
///
/// Records `name` as the data's path if none is set yet. `title` is always
/// defined, empty until a `title()` call has run. A panicking template
/// function becomes a [`RenderError::Rendering`].
fn execute(tera: &Tera, name: &str, shared: &SharedData) -> Result<String, RenderError> {
    let context = {
        let mut data = shared.lock();
        data.mark_path(name);
        let mut context = data.to_context();
        if !context.contains_key(TITLE_KEY) {
            context.insert(TITLE_KEY, "");
        }
        context
    };

    tracing::debug!("Executing template '{}'", name);
    match catch_unwind(AssertUnwindSafe(|| tera.render(name, &context))) {
        Ok(result) => result.map_err(|e| RenderError::from_tera(name, &e)),
        Err(payload) => {
            tracing::error!("Template function panicked while executing '{}'", name);
            Err(RenderError::panicked(name, &*payload))
        }
    }
}
