//! Custom expression delimiters.
//!
//! Tera only understands `{{ }}` for expressions. A site can pick another
//! pair (say `[[ ]]`) to avoid clashing with client-side frameworks; sources
//! are rewritten once at load time so tera never sees the custom pair.
//! Statement tags (`{% %}`) and comments (`{# #}`) keep their usual syntax.

use std::path::Path;

use crate::core::SetupError;

const NATIVE_LEFT: &str = "{{";
const NATIVE_RIGHT: &str = "}}";
const ESCAPED_LEFT: &str = "{% raw %}{{{% endraw %}";
const ESCAPED_BRACE: &str = "{% raw %}{{% endraw %}";

/// A validated pair of expression delimiters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delimiters {
    left: String,
    right: String,
}

impl Delimiters {
    /// Validates a delimiter pair.
    ///
    /// # Errors
    ///
    /// Returns [`SetupError::InvalidDelimiters`] when either side is empty or
    /// contains whitespace.
    pub fn new(left: &str, right: &str) -> Result<Self, SetupError> {
        for (side, value) in [("left", left), ("right", right)] {
            if value.is_empty() {
                return Err(SetupError::InvalidDelimiters {
                    reason: format!("{side} delimiter is empty"),
                });
            }
            if value.chars().any(char::is_whitespace) {
                return Err(SetupError::InvalidDelimiters {
                    reason: format!("{side} delimiter '{value}' contains whitespace"),
                });
            }
        }
        Ok(Self {
            left: left.to_string(),
            right: right.to_string(),
        })
    }

    /// True for the pair tera already uses, where no rewriting is needed.
    pub fn is_native(&self) -> bool {
        self.left == NATIVE_LEFT && self.right == NATIVE_RIGHT
    }

    /// Rewrites a template source from the custom pair to tera syntax.
    ///
    /// Every `left ... right` span becomes `{{ ... }}`. A literal `{{`
    /// outside of spans is wrapped in a raw block so it prints as text, and
    /// so is a lone `{` right before a span.
    ///
    /// # Errors
    ///
    /// Returns [`SetupError::UnterminatedDelimiter`] when a span is never
    /// closed. `path` only labels the error.
    pub fn translate(&self, source: &str, path: &Path) -> Result<String, SetupError> {
        if self.is_native() {
            return Ok(source.to_string());
        }

        let mut out = String::with_capacity(source.len());
        let mut rest = source;
        while let Some(start) = rest.find(&self.left) {
            push_text(&mut out, &rest[..start], true);

            let inner = &rest[start + self.left.len()..];
            let end = inner.find(&self.right).ok_or_else(|| SetupError::UnterminatedDelimiter {
                path: path.to_path_buf(),
                delimiter: self.left.clone(),
            })?;

            out.push_str(NATIVE_LEFT);
            out.push_str(&inner[..end]);
            out.push_str(NATIVE_RIGHT);
            rest = &inner[end + self.right.len()..];
        }
        push_text(&mut out, rest, false);
        Ok(out)
    }
}

fn push_text(out: &mut String, text: &str, before_span: bool) {
    let escaped = text.replace(NATIVE_LEFT, ESCAPED_LEFT);
    match escaped.strip_suffix('{') {
        Some(head) if before_span => {
            out.push_str(head);
            out.push_str(ESCAPED_BRACE);
        }
        _ => out.push_str(&escaped),
    }
}
