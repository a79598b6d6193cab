//! Path helpers shared by template loading and file inlining.

use std::path::{Component, Path};

/// Joins the components of a relative path with `/`, whatever the platform.
///
/// Returns `None` when the path contains anything other than normal
/// components (root, prefix, `.` or `..`) or a component that is not UTF-8.
pub fn to_slash_path(path: &Path) -> Option<String> {
    let mut parts = Vec::new();
    for component in path.components() {
        match component {
            Component::Normal(part) => parts.push(part.to_str()?),
            _ => return None,
        }
    }
    Some(parts.join("/"))
}

/// Builds a template name from a file path relative to its root directory.
///
/// The final extension is removed: `blog/posts/my-post.html` becomes
/// `blog/posts/my-post`. Files without an extension keep their name.
///
/// # Examples
///
/// ```
/// use pagetools::utils::template_name;
/// use std::path::Path;
///
/// let name = template_name(Path::new("/site/pages"), Path::new("/site/pages/blog/post.html"));
/// assert_eq!(name.as_deref(), Some("blog/post"));
/// ```
pub fn template_name(root: &Path, file: &Path) -> Option<String> {
    let relative = file.strip_prefix(root).ok()?;
    let stem = relative.file_stem()?;
    let without_ext = match relative.parent() {
        Some(parent) => parent.join(stem),
        None => stem.into(),
    };
    to_slash_path(&without_ext).filter(|name| !name.is_empty())
}

/// Checks that a path requested from a template stays inside its root.
///
/// Absolute paths and `..` components that climb above the root are rejected.
/// `.` components are ignored. Mirrors the traversal check used for project
/// files so that templates cannot reach outside the inline directory.
pub fn is_contained(path: &str) -> bool {
    let mut depth: i32 = 0;
    for component in Path::new(path).components() {
        match component {
            Component::Normal(_) => depth += 1,
            Component::CurDir => {}
            Component::ParentDir => {
                depth -= 1;
                if depth < 0 {
                    return false;
                }
            }
            Component::RootDir | Component::Prefix(_) => return false,
        }
    }
    depth > 0
}

/// Returns true for dot-files such as `.DS_Store` or editor swap files.
pub fn is_hidden(path: &Path) -> bool {
    path.file_name().and_then(|name| name.to_str()).is_some_and(|name| name.starts_with('.'))
}
