//! Integration test suite for pagetools
//!
//! End-to-end tests over real template trees on disk, plus the command-line
//! front end.
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! - **rendering**: layout nesting, isolated renders, shared renderers
//! - **fallback**: error pages, escalation and the failure payload
//! - **functions**: title, import, inline and navigation helpers
//! - **cli**: the `pagetools` binary

mod cli;
mod fallback;
mod functions;
mod rendering;
