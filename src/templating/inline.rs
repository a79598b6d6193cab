//! In-memory cache of files embedded into pages by the `inline*` functions.
//!
//! Files are keyed by their path relative to the inline directory, with `/`
//! separators and the extension kept (`css/site.css`). The cache is filled at
//! setup. In development mode each lookup re-reads the file first so edits
//! show up without restarting; a failed re-read keeps the cached copy.

use dashmap::DashMap;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::core::SetupError;
use crate::utils::{is_contained, is_hidden, to_slash_path};

/// Inline files of one renderer.
#[derive(Debug, Default)]
pub struct InlineFiles {
    dir: Option<PathBuf>,
    files: DashMap<String, String>,
}

impl InlineFiles {
    /// Reads every non-hidden file under `dir` into memory.
    pub(crate) fn load(dir: &Path) -> Result<Self, SetupError> {
        let files = DashMap::new();

        for entry in WalkDir::new(dir).follow_links(true).sort_by_file_name() {
            let entry = entry.map_err(|source| SetupError::Walk {
                path: dir.to_path_buf(),
                source,
            })?;
            let path = entry.path();
            if !entry.file_type().is_file() || is_hidden(path) {
                continue;
            }
            let Some(key) = path.strip_prefix(dir).ok().and_then(to_slash_path) else {
                continue;
            };
            let content = read_text(path).map_err(|source| SetupError::Read {
                path: path.to_path_buf(),
                source,
            })?;
            files.insert(key, content);
        }

        tracing::debug!("Loaded {} inline file(s) from {}", files.len(), dir.display());
        Ok(Self {
            dir: Some(dir.to_path_buf()),
            files,
        })
    }

    /// Returns the content of `path`, refreshing it from disk first when `refresh` is set.
    pub fn fetch(&self, path: &str, refresh: bool) -> Option<String> {
        if refresh {
            self.refresh(path);
        }
        self.files.get(path).map(|entry| entry.value().clone())
    }

    /// Number of cached files.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// True when nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    fn refresh(&self, path: &str) {
        let Some(dir) = &self.dir else {
            return;
        };
        if !is_contained(path) {
            tracing::warn!("Refusing to inline '{}': path leaves the inline directory", path);
            return;
        }
        match read_text(&dir.join(path)) {
            Ok(content) => {
                self.files.insert(path.to_string(), content);
            }
            Err(e) => tracing::warn!("Failed to refresh inline file '{}': {}", path, e),
        }
    }
}

/// Reads a file as text, replacing invalid UTF-8 sequences.
fn read_text(path: &Path) -> std::io::Result<String> {
    let bytes = std::fs::read(path)?;
    Ok(match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => {
            tracing::warn!("Inline file {} is not valid UTF-8; using lossy conversion", path.display());
            String::from_utf8_lossy(e.as_bytes()).into_owned()
        }
    })
}
