//! Common test utilities and helpers
//!
//! This module provides shared functionality for integration tests:
//! - A build directory laid out next to a `source/` manifest directory
//! - A fake `size` tool that replays canned reports
//!
//! # Usage
//!
//! ```rust,no_run
//! mod common;
//! use common::fixtures::BuildDir;
//!
//! let build = BuildDir::new().unwrap();
//! build.manifest("EncryptCode: cipher\nDecryptCode: cipher").unwrap();
//! ```

pub mod fixtures;

/// Check if running in CI environment
#[allow(dead_code)]
pub fn is_ci() -> bool {
    std::env::var("CI").is_ok() || std::env::var("GITHUB_ACTIONS").is_ok()
}
