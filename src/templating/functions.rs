//! Built-in template functions.
//!
//! The functions are registered once per template set. While a render runs,
//! its [`RenderData`] is entered as the current [`Scope`] of the calling
//! thread, so a function reads and updates the data of the render that
//! called it. All functions take keyword arguments:
//!
//! ```text
//! {{ title(text="Blog") }}
//! <title>{{ page_title() }}</title>
//! {{ import_once(path="nav") }}
//! {{ inline_style(path="css/site.css") }}
//! <a class="{{ active(href="/about") }}" href="/about">About</a>
//! ```
//!
//! [`RenderData`]: super::RenderData

use std::cell::RefCell;
use std::collections::HashMap;
use tera::{Function, Tera, Value};

use super::data::SharedData;
use super::hierarchy::{LAYOUT_NAME, trim_path};
use super::renderer::Renderer;

/// Class returned by `active` and `active_prefix` when none is given.
pub const DEFAULT_ACTIVE_CLASS: &str = "active";

thread_local! {
    static SCOPES: RefCell<Vec<Scope>> = const { RefCell::new(Vec::new()) };
}

/// What the functions of one render act on.
#[derive(Clone)]
pub(crate) struct Scope {
    pub renderer: Renderer,
    pub data: SharedData,
}

impl Scope {
    /// Makes this the current scope of the thread until the guard drops.
    ///
    /// Scopes nest: a render started from inside a template function gets its
    /// own scope and the outer one is current again once it finishes.
    pub(crate) fn enter(self) -> EnteredScope {
        SCOPES.with_borrow_mut(|scopes| scopes.push(self));
        EnteredScope(())
    }

    fn current(function: &str) -> tera::Result<Self> {
        SCOPES
            .with_borrow(|scopes| scopes.last().cloned())
            .ok_or_else(|| tera::Error::msg(format!("Function `{function}` can only be called while rendering")))
    }
}

/// Leaves the scope entered by [`Scope::enter`], also when unwinding.
pub(crate) struct EnteredScope(());

impl Drop for EnteredScope {
    fn drop(&mut self) {
        SCOPES.with_borrow_mut(|scopes| {
            scopes.pop();
        });
    }
}

/// Registers every built-in function on `tera`.
pub(crate) fn register(tera: &mut Tera) {
    tera.register_function("title", Title);
    tera.register_function("page_title", PageTitle);
    tera.register_function("import_once", ImportOnce);
    tera.register_function("inline", Inline(InlineKind::Plain));
    tera.register_function("inline_style", Inline(InlineKind::Style));
    tera.register_function("inline_script", Inline(InlineKind::Script));
    tera.register_function("active", Active { prefix: false });
    tera.register_function("active_prefix", Active { prefix: true });
}

fn required_str<'a>(args: &'a HashMap<String, Value>, function: &str, key: &str) -> tera::Result<&'a str> {
    match args.get(key) {
        Some(Value::String(value)) => Ok(value.as_str()),
        Some(other) => Err(tera::Error::msg(format!(
            "Function `{function}` expected a string for `{key}`, got {other}"
        ))),
        None => Err(tera::Error::msg(format!("Function `{function}` requires a `{key}` argument"))),
    }
}

fn empty() -> Value {
    Value::String(String::new())
}

/// `title(text=...)`: appends to the accumulated page title.
struct Title;

impl Function for Title {
    fn call(&self, args: &HashMap<String, Value>) -> tera::Result<Value> {
        let text = required_str(args, "title", "text")?;
        Scope::current("title")?.data.lock().push_title(text);
        Ok(empty())
    }
}

/// `page_title()`: the title accumulated so far, including calls made
/// earlier in the same template.
struct PageTitle;

impl Function for PageTitle {
    fn call(&self, _args: &HashMap<String, Value>) -> tera::Result<Value> {
        let scope = Scope::current("page_title")?;
        let data = scope.data.lock();
        Ok(Value::String(data.title().unwrap_or_default().to_string()))
    }
}

/// `import_once(path=...)`: renders a standalone template once per render data.
struct ImportOnce;

impl Function for ImportOnce {
    fn call(&self, args: &HashMap<String, Value>) -> tera::Result<Value> {
        let path = required_str(args, "import_once", "path")?;
        let scope = Scope::current("import_once")?;
        let first = scope.data.lock().mark_imported(path);
        if !first {
            tracing::trace!("Skipping repeated import of '{}'", path);
            return Ok(empty());
        }

        match scope.renderer.render_standalone_shared(path, &scope.data) {
            Ok(output) => Ok(Value::String(output)),
            Err(e) => {
                tracing::warn!("Failed to import '{}': {}", path, e);
                Ok(empty())
            }
        }
    }

    fn is_safe(&self) -> bool {
        true
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InlineKind {
    Plain,
    Style,
    Script,
}

impl InlineKind {
    fn name(self) -> &'static str {
        match self {
            Self::Plain => "inline",
            Self::Style => "inline_style",
            Self::Script => "inline_script",
        }
    }

    fn wrap(self, content: String) -> String {
        if content.is_empty() {
            return content;
        }
        match self {
            Self::Plain => content,
            Self::Style => format!("<style>\n{content}\n</style>"),
            Self::Script => format!("<script type=\"text/javascript\">\n{content}\n</script>"),
        }
    }
}

/// `inline(path=...)` and its wrapped variants: embeds a file once per render data.
struct Inline(InlineKind);

impl Function for Inline {
    fn call(&self, args: &HashMap<String, Value>) -> tera::Result<Value> {
        let kind = self.0;
        let path = required_str(args, kind.name(), "path")?;
        let scope = Scope::current(kind.name())?;
        {
            let mut data = scope.data.lock();
            if data.is_inlined(path) {
                return Ok(empty());
            }
            data.mark_inlined(path);
        }

        let renderer = &scope.renderer;
        let content = renderer.inline_files().fetch(path, renderer.is_dev()).unwrap_or_else(|| {
            tracing::debug!("No inline file named '{}'", path);
            String::new()
        });
        Ok(Value::String(kind.wrap(content)))
    }

    fn is_safe(&self) -> bool {
        true
    }
}

/// `active(href=..., class=...)` and `active_prefix(...)`: navigation highlighting.
struct Active {
    prefix: bool,
}

impl Function for Active {
    fn call(&self, args: &HashMap<String, Value>) -> tera::Result<Value> {
        let name = if self.prefix { "active_prefix" } else { "active" };
        let href = required_str(args, name, "href")?;
        let class = match args.get("class") {
            Some(_) => required_str(args, name, "class")?,
            None => DEFAULT_ACTIVE_CLASS,
        };

        let scope = Scope::current(name)?;
        let data = scope.data.lock();
        let path = data.path().unwrap_or_default();
        Ok(if is_active(path, href, self.prefix) {
            Value::String(class.to_string())
        } else {
            empty()
        })
    }
}

/// Compares a page path with a link target, both slash-trimmed.
///
/// `/` links to the root page. Prefix matches stop at segment boundaries,
/// so `/blog` covers `blog` and `blog/post` but not `blogroll`.
fn is_active(path: &str, href: &str, prefix: bool) -> bool {
    let path = trim_path(path);
    let href = match trim_path(href) {
        "" => LAYOUT_NAME,
        href => href,
    };
    if path == href {
        return true;
    }
    prefix && path.strip_prefix(href).is_some_and(|rest| rest.starts_with('/'))
}
