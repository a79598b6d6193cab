//! Template sets loaded from a directory tree.
//!
//! A [`TemplateSet`] owns one tera instance holding every template found
//! under a root directory. Template names are file paths relative to the root
//! with `/` separators and the final extension removed, so
//! `pages/blog/post.html` registers as `blog/post`.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use strsim::levenshtein;
use tera::Tera;
use walkdir::WalkDir;

use super::delimiters::Delimiters;
use super::error::format_tera_error;
use super::functions;
use crate::config::Hooks;
use crate::core::SetupError;
use crate::utils::{is_hidden, template_name};

/// Maximum edit distance for suggestions, as a percentage of the name length.
const SIMILARITY_THRESHOLD_PERCENT: usize = 50;

/// How many suggestions a not-found error carries at most.
const MAX_SUGGESTIONS: usize = 3;

/// Options shared by every template set of a renderer.
#[derive(Debug, Clone, Copy)]
pub(crate) struct LoadOptions<'a> {
    pub delimiters: Option<&'a Delimiters>,
    pub autoescape: bool,
    pub hooks: &'a Hooks,
}

/// Parsed templates plus the files they came from.
#[derive(Clone)]
pub struct TemplateSet {
    tera: Tera,
    sources: BTreeMap<String, PathBuf>,
}

impl TemplateSet {
    /// Creates a set with no templates.
    pub(crate) fn empty(options: LoadOptions<'_>) -> Self {
        Self {
            tera: base_tera(options),
            sources: BTreeMap::new(),
        }
    }

    /// Walks `dir` and parses every non-hidden file as a template.
    pub(crate) fn load(dir: &Path, options: LoadOptions<'_>) -> Result<Self, SetupError> {
        let mut sources: BTreeMap<String, PathBuf> = BTreeMap::new();
        let mut raw = Vec::new();

        for entry in WalkDir::new(dir).follow_links(true).sort_by_file_name() {
            let entry = entry.map_err(|source| SetupError::Walk {
                path: dir.to_path_buf(),
                source,
            })?;
            let path = entry.path();
            if !entry.file_type().is_file() || is_hidden(path) {
                continue;
            }
            let Some(name) = template_name(dir, path) else {
                tracing::warn!("Skipping template with unusable name: {}", path.display());
                continue;
            };

            if let Some(first) = sources.get(&name) {
                return Err(SetupError::DuplicateName {
                    name,
                    first: first.clone(),
                    second: path.to_path_buf(),
                });
            }

            let content = std::fs::read_to_string(path).map_err(|source| SetupError::Read {
                path: path.to_path_buf(),
                source,
            })?;
            let content = match options.delimiters {
                Some(delimiters) => delimiters.translate(&content, path)?,
                None => content,
            };

            tracing::trace!("Registered template '{}' from {}", name, path.display());
            raw.push((name.clone(), content));
            sources.insert(name, path.to_path_buf());
        }

        let mut tera = base_tera(options);
        tera.add_raw_templates(raw).map_err(|e| SetupError::Parse {
            dir: dir.to_path_buf(),
            message: format_tera_error(&e),
        })?;

        tracing::debug!("Loaded {} template(s) from {}", sources.len(), dir.display());
        Ok(Self {
            tera,
            sources,
        })
    }

    /// The underlying tera instance.
    pub(crate) fn tera(&self) -> &Tera {
        &self.tera
    }

    /// True when a template named exactly `name` exists.
    pub fn contains(&self, name: &str) -> bool {
        self.sources.contains_key(name)
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.sources.keys().map(String::as_str)
    }

    /// The file a template was loaded from.
    pub fn source_of(&self, name: &str) -> Option<&Path> {
        self.sources.get(name).map(PathBuf::as_path)
    }

    /// Number of templates.
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    /// True when the set holds no templates.
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Names close to `target`, closest first.
    pub fn suggestions(&self, target: &str) -> Vec<String> {
        let limit = target.len() * SIMILARITY_THRESHOLD_PERCENT / 100;
        let mut scored: Vec<(usize, &str)> = self
            .names()
            .map(|name| (levenshtein(target, name), name))
            .filter(|(distance, _)| *distance <= limit)
            .collect();
        scored.sort();
        scored.into_iter().take(MAX_SUGGESTIONS).map(|(_, name)| name.to_string()).collect()
    }
}

impl std::fmt::Debug for TemplateSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TemplateSet").field("sources", &self.sources).finish()
    }
}

/// A tera instance with escaping, user functions and built-ins configured.
///
/// Built-ins are registered last and win over user functions of the same name.
fn base_tera(options: LoadOptions<'_>) -> Tera {
    let mut tera = Tera::default();
    // An empty suffix matches every name, extension or not.
    tera.autoescape_on(if options.autoescape { vec![""] } else { vec![] });

    for (name, function) in &options.hooks.functions {
        let function = function.clone();
        tera.register_function(name, move |args: &std::collections::HashMap<String, tera::Value>| {
            function(args)
        });
    }
    functions::register(&mut tera);
    tera
}
