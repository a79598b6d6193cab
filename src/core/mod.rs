//! Core error types shared by setup and the command-line front end.

pub mod error;

pub use error::{ErrorContext, SetupError, user_friendly_error};
