//! Page path validation and layout chain construction.
//!
//! Directory nesting maps onto layout nesting: every directory may hold an
//! `index` template that wraps all pages below it, and the root `index` wraps
//! everything. For `blog/posts/my-post` the chain is
//!
//! ```text
//! index -> blog/index -> blog/posts/index -> blog/posts/my-post
//! ```
//!
//! Pages whose final segment starts with `$` are private: they exist for
//! isolated rendering (partials, fragments) and can't be requested as pages.

/// Name of the layout template of a directory.
pub const LAYOUT_NAME: &str = "index";

/// Leading character of private template names.
pub const PRIVATE_MARKER: char = '$';

/// Strips leading and trailing slashes from a requested path.
pub fn trim_path(path: &str) -> &str {
    path.trim_matches('/')
}

/// True when the final segment of `name` is private.
pub fn is_private(name: &str) -> bool {
    name.rsplit('/').next().is_some_and(|last| last.starts_with(PRIVATE_MARKER))
}

/// Normalizes a requested page path.
///
/// Returns `None` when the path is empty after trimming slashes or names a
/// private template. Existence is checked by the caller.
pub fn normalize_page_path(path: &str) -> Option<&str> {
    let trimmed = trim_path(path);
    if trimmed.is_empty() || is_private(trimmed) {
        return None;
    }
    Some(trimmed)
}

/// Builds the ordered template chain for a normalized page path, root first.
///
/// The page itself comes last unless its final segment is already the layout
/// name, in which case it is not listed twice. Render the chain in reverse so
/// that the page runs first and each layout wraps the previous output.
///
/// # Examples
///
/// ```
/// use pagetools::templating::template_hierarchy;
///
/// assert_eq!(template_hierarchy("about"), ["index", "about"]);
/// assert_eq!(template_hierarchy("a/b/c"), ["index", "a/index", "a/b/index", "a/b/c"]);
/// assert_eq!(template_hierarchy("docs/index"), ["index", "docs/index"]);
/// ```
pub fn template_hierarchy(path: &str) -> Vec<String> {
    let segments: Vec<&str> = path.split('/').collect();

    let mut chain = Vec::with_capacity(segments.len() + 1);
    chain.push(LAYOUT_NAME.to_string());
    for depth in 1..segments.len() {
        chain.push(format!("{}/{LAYOUT_NAME}", segments[..depth].join("/")));
    }

    if segments.last() != Some(&LAYOUT_NAME) {
        chain.push(path.to_string());
    }
    chain
}
