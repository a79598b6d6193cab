//! Utilities shared across the crate.
//!
//! - [`status`] - status codes embedded in error messages
//! - [`paths`] - template naming and path containment checks

pub mod paths;
pub mod status;

pub use paths::{is_contained, is_hidden, template_name, to_slash_path};
pub use status::{
    STATUS_INTERNAL, STATUS_OK, code_path, error_code, normalize_code, split_status,
    status_code_of,
};
