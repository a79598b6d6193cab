//! The per-render data map threaded through a layout chain.
//!
//! A [`RenderData`] is created by the caller for one top-level render and
//! handed to every template of the chain. Besides user values it carries a few
//! reserved keys and the private de-duplication sets used by template
//! functions:
//!
//! | Key | Written by | Rule |
//! |-----|------------|------|
//! | `content` | page renderer | overwritten at every layout level |
//! | `path` | template executor | set once, on the first execution |
//! | `title` | `title()` | cumulative, `" | "` separated |
//!
//! The `imported` and `inlined` sets are not template variables; only
//! `import_once()` and `inline*()` read or write them.

use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Key holding the output of the inner layout level.
pub const CONTENT_KEY: &str = "content";

/// Key holding the first executed template name.
pub const PATH_KEY: &str = "path";

/// Key holding the accumulated page title.
pub const TITLE_KEY: &str = "title";

/// Separator placed between title fragments.
pub const TITLE_SEPARATOR: &str = " | ";

/// Mutable string-keyed data for one render call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderData {
    values: Map<String, Value>,
    imported: BTreeSet<String>,
    inlined: BTreeSet<String>,
}

impl RenderData {
    /// Creates an empty data map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates data from a JSON object; other JSON values yield `None`.
    pub fn from_json(value: Value) -> Option<Self> {
        match value {
            Value::Object(values) => Some(Self {
                values,
                ..Self::default()
            }),
            _ => None,
        }
    }

    /// Inserts a value, replacing any previous one.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(key.into(), value.into());
    }

    /// Serializes and inserts a value.
    ///
    /// # Errors
    ///
    /// Returns the serialization error when `value` cannot become JSON.
    pub fn try_insert<T: Serialize + ?Sized>(
        &mut self,
        key: impl Into<String>,
        value: &T,
    ) -> serde_json::Result<()> {
        let value = serde_json::to_value(value)?;
        self.values.insert(key.into(), value);
        Ok(())
    }

    /// Returns the value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Returns the value under `key` when it is a string.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.values.get(key).and_then(Value::as_str)
    }

    /// Removes and returns the value under `key`.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.values.remove(key)
    }

    /// True when `key` holds a value.
    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// The rendered output of the last completed level.
    pub fn content(&self) -> Option<&str> {
        self.get_str(CONTENT_KEY)
    }

    /// The first template executed with this data.
    pub fn path(&self) -> Option<&str> {
        self.get_str(PATH_KEY)
    }

    /// The accumulated title.
    pub fn title(&self) -> Option<&str> {
        self.get_str(TITLE_KEY)
    }

    /// All user-visible values.
    pub fn values(&self) -> &Map<String, Value> {
        &self.values
    }

    /// Builds the tera context for one template execution.
    pub fn to_context(&self) -> tera::Context {
        let mut context = tera::Context::new();
        for (key, value) in &self.values {
            context.insert(key.as_str(), value);
        }
        context
    }

    /// Records `name` as the requested path unless one is already set.
    pub(crate) fn mark_path(&mut self, name: &str) {
        let unset = self.path().is_none_or(str::is_empty);
        if unset {
            self.insert(PATH_KEY, name);
        }
    }

    pub(crate) fn set_content(&mut self, content: String) {
        self.insert(CONTENT_KEY, content);
    }

    /// Appends a fragment to the title.
    pub(crate) fn push_title(&mut self, fragment: &str) {
        let title = match self.title() {
            Some(current) if !current.is_empty() => {
                format!("{current}{TITLE_SEPARATOR}{fragment}")
            }
            _ => fragment.to_string(),
        };
        self.insert(TITLE_KEY, title);
    }

    /// Registers an import; false when `path` was already imported.
    pub(crate) fn mark_imported(&mut self, path: &str) -> bool {
        self.imported.insert(path.to_string())
    }

    pub(crate) fn is_inlined(&self, path: &str) -> bool {
        self.inlined.contains(path)
    }

    pub(crate) fn mark_inlined(&mut self, path: &str) {
        self.inlined.insert(path.to_string());
    }
}

impl From<Map<String, Value>> for RenderData {
    fn from(values: Map<String, Value>) -> Self {
        Self {
            values,
            ..Self::default()
        }
    }
}

/// A [`RenderData`] shared between the renderer and the template functions.
///
/// The data is moved in for the duration of a render and moved back out when
/// it finishes. The lock is only held for short reads and writes, never while
/// tera executes a template.
#[derive(Debug, Clone, Default)]
pub(crate) struct SharedData(Arc<Mutex<RenderData>>);

impl SharedData {
    /// Takes the caller's data, leaving an empty map in its place.
    pub(crate) fn adopt(data: &mut RenderData) -> Self {
        Self(Arc::new(Mutex::new(std::mem::take(data))))
    }

    pub(crate) fn lock(&self) -> MutexGuard<'_, RenderData> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Caller data lent to a [`SharedData`] for one render.
///
/// Dropping the guard moves the data back, also when a template function
/// panics halfway through the render.
pub(crate) struct AdoptedData<'a> {
    data: &'a mut RenderData,
    shared: SharedData,
}

impl<'a> AdoptedData<'a> {
    pub(crate) fn new(data: &'a mut RenderData) -> Self {
        let shared = SharedData::adopt(data);
        Self { data, shared }
    }

    pub(crate) fn shared(&self) -> &SharedData {
        &self.shared
    }
}

impl Drop for AdoptedData<'_> {
    fn drop(&mut self) {
        *self.data = std::mem::take(&mut *self.shared.lock());
    }
}
