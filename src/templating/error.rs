//! Render-time errors carrying status codes.
//!
//! Each variant's message starts with the status code it stands for, so
//! [`error_code`](crate::utils::error_code) recovers the same value as
//! [`RenderError::status_code`] from the text alone.

use regex::Regex;
use std::fmt::Display;
use std::sync::OnceLock;
use thiserror::Error;

use crate::utils::{STATUS_INTERNAL, normalize_code, split_status};

/// Status code of a missing page.
pub const STATUS_NOT_FOUND: u16 = 404;

/// Errors returned by the render entry points.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// The requested template is absent, empty, or private.
    #[error("404 template not found: {path}")]
    NotFound {
        /// Requested path after normalization
        path: String,
        /// Registered names close to the requested one
        suggestions: Vec<String>,
    },

    /// Tera failed while executing a template.
    #[error("500 template rendering error in '{template}': {message}")]
    Rendering {
        /// Template being executed
        template: String,
        /// Cleaned tera error chain
        message: String,
        /// Line reported by tera, when present
        line: Option<usize>,
    },

    /// A caller-supplied error with an explicit status.
    #[error("{code} {message}")]
    Status {
        /// Status code, always within `400..=599`
        code: u16,
        /// Message without the leading code
        message: String,
    },

    /// Every fallback page failed and the hardcoded payload was sent.
    #[error("500 internal server error")]
    InternalFallback,
}

impl RenderError {
    /// Builds a [`RenderError::Status`], clamping the code into `400..=599`.
    pub fn status(code: u16, message: impl Into<String>) -> Self {
        Self::Status {
            code: normalize_code(Some(u32::from(code))),
            message: message.into(),
        }
    }

    /// Wraps any displayable error, reading its status from the leading digits.
    ///
    /// `"403 unauthorised"` becomes status 403 with message `"unauthorised"`;
    /// a message without a code becomes status 500.
    pub fn from_error(error: &dyn Display) -> Self {
        let text = error.to_string();
        let (code, message) = split_status(&text);
        Self::Status {
            code: normalize_code(code),
            message: message.to_string(),
        }
    }

    pub(crate) fn not_found(path: impl Into<String>, suggestions: Vec<String>) -> Self {
        Self::NotFound {
            path: path.into(),
            suggestions,
        }
    }

    pub(crate) fn from_tera(template: &str, error: &tera::Error) -> Self {
        Self::Rendering {
            template: template.to_string(),
            message: format_tera_error(error),
            line: extract_line(error),
        }
    }

    /// A template function panicked while `template` was executing.
    pub(crate) fn panicked(template: &str, payload: &(dyn std::any::Any + Send)) -> Self {
        let reason = payload
            .downcast_ref::<&str>()
            .copied()
            .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
            .unwrap_or("unknown cause");
        Self::Rendering {
            template: template.to_string(),
            message: format!("template function panicked: {reason}"),
            line: None,
        }
    }

    /// The status code this error maps to.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::NotFound { .. } => STATUS_NOT_FOUND,
            Self::Rendering { .. } | Self::InternalFallback => STATUS_INTERNAL,
            Self::Status { code, .. } => *code,
        }
    }

    /// True for [`RenderError::NotFound`].
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Flattens a tera error and its sources into one readable message.
///
/// Tera nests the useful part ("Variable `x` not found", "Function call
/// 'inline' failed") under generic wrappers; every distinct message in the
/// chain is kept, joined with ` -> `.
pub fn format_tera_error(error: &tera::Error) -> String {
    use std::error::Error;

    let mut messages: Vec<String> = Vec::new();
    let mut current: Option<&dyn Error> = Some(error);
    while let Some(err) = current {
        let text = err.to_string().trim().to_string();
        if !text.is_empty() && !messages.contains(&text) {
            messages.push(text);
        }
        current = err.source();
    }

    if messages.is_empty() {
        "unknown template error".to_string()
    } else {
        messages.join(" -> ")
    }
}

/// Pulls a `line:column` position out of a tera error, if it has one.
fn extract_line(error: &tera::Error) -> Option<usize> {
    static POSITION: OnceLock<Option<Regex>> = OnceLock::new();
    let re = POSITION.get_or_init(|| Regex::new(r"(\d+):(\d+)").ok()).as_ref()?;
    let text = format!("{error:?}");
    re.captures(&text)?.get(1)?.as_str().parse().ok()
}
