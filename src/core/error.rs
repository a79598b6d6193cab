//! Setup errors and user-facing error reporting.
//!
//! Two layers, following the same split as the rest of the crate:
//! - [`SetupError`] - strongly typed failures raised while building a
//!   [`Renderer`](crate::templating::Renderer) from disk
//! - [`ErrorContext`] - an error plus optional details and a suggestion, used
//!   by the command-line front end to print something actionable
//!
//! Render-time failures live in [`crate::templating::RenderError`] because they
//! carry status codes and are recovered by the error-page fallback.

use colored::Colorize;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

use crate::templating::RenderError;

/// Failures that can occur while loading templates and inline files.
#[derive(Error, Debug)]
pub enum SetupError {
    /// A configured directory could not be traversed.
    #[error("Failed to walk directory {path}")]
    Walk {
        /// Directory being walked
        path: PathBuf,
        /// Underlying walk error
        #[source]
        source: walkdir::Error,
    },

    /// A template or inline file could not be read.
    #[error("Failed to read file {path}")]
    Read {
        /// File that failed to read
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// Tera rejected the templates of a directory.
    #[error("Failed to parse templates in {dir}: {message}")]
    Parse {
        /// Template root directory
        dir: PathBuf,
        /// Cleaned tera error chain
        message: String,
    },

    /// Two files collapse to the same template name once extensions are removed.
    #[error("Template name '{name}' is defined by both {first} and {second}")]
    DuplicateName {
        /// Colliding template name
        name: String,
        /// File registered first
        first: PathBuf,
        /// File that collided with it
        second: PathBuf,
    },

    /// A template opens a custom delimiter without closing it.
    #[error("Unterminated delimiter '{delimiter}' in {path}")]
    UnterminatedDelimiter {
        /// Template file
        path: PathBuf,
        /// The opening delimiter left unclosed
        delimiter: String,
    },

    /// The configured delimiter pair is unusable.
    #[error("Invalid delimiters: {reason}")]
    InvalidDelimiters {
        /// Why the pair was rejected
        reason: String,
    },
}

/// An error enriched with details and a suggestion for the user.
#[derive(Debug)]
pub struct ErrorContext {
    /// Main error message
    pub message: String,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Creates a context with only a message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            suggestion: None,
            details: None,
        }
    }

    /// Adds a suggestion line.
    #[must_use]
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Adds a details line.
    #[must_use]
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Prints the error to stderr with colors.
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.message);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Converts any error into an [`ErrorContext`] with hints for known failures.
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    if let Some(setup) = error.downcast_ref::<SetupError>() {
        return setup_error_context(setup);
    }

    if let Some(render) = error.downcast_ref::<RenderError>() {
        let ctx = ErrorContext::new(render.to_string());
        return match render {
            RenderError::NotFound { suggestions, .. } if !suggestions.is_empty() => {
                ctx.with_suggestion(format!("Did you mean: {}?", suggestions.join(", ")))
            }
            RenderError::Rendering { line: Some(line), .. } => {
                ctx.with_details(format!("Reported at line {line}"))
            }
            _ => ctx,
        };
    }

    let missing_file = error
        .downcast_ref::<std::io::Error>()
        .is_some_and(|io_error| io_error.kind() == std::io::ErrorKind::NotFound);
    if missing_file {
        return ErrorContext::new(format!("{error:#}"))
            .with_suggestion("Check that the file or directory exists and the path is correct");
    }

    ErrorContext::new(format!("{error:#}"))
}

fn setup_error_context(error: &SetupError) -> ErrorContext {
    let ctx = ErrorContext::new(error.to_string());
    match error {
        SetupError::Walk { source, .. } => ctx
            .with_details(source.to_string())
            .with_suggestion("Check that the configured template directories exist"),
        SetupError::Read { source, .. } => ctx.with_details(source.to_string()),
        SetupError::DuplicateName { .. } => {
            ctx.with_suggestion("Rename one of the files; template names ignore extensions")
        }
        SetupError::UnterminatedDelimiter { .. } => {
            ctx.with_suggestion("Close every custom delimiter or remove `delimiters` from the config")
        }
        SetupError::Parse { .. } | SetupError::InvalidDelimiters { .. } => ctx,
    }
}
