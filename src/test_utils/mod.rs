//! Test utilities for pagetools
//!
//! Helpers shared by unit and integration tests: a one-time tracing setup
//! and a builder for temporary template trees.
//!
//! # Example
//!
//! ```rust,no_run
//! use pagetools::test_utils::{SiteBuilder, init_test_logging};
//!
//! init_test_logging(None);
//! let site = SiteBuilder::new()
//!     .unwrap()
//!     .page("about", "About")
//!     .build()
//!     .unwrap();
//! assert_eq!(site.render("about").status(), 200);
//! ```

pub mod builder;

pub use builder::{PAGES_DIR, PARTIALS_DIR, STATIC_DIR, Site, SiteBuilder};

use std::sync::Once;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Uses `level` when given, otherwise `RUST_LOG`. With neither, logging
/// stays off. Safe to call from every test.
///
/// ```bash
/// RUST_LOG=pagetools=debug cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .try_init();
    });
}
