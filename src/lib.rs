#![warn(missing_docs)]
#![warn(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

//! code-size library
//!
//! This library measures the ROM footprint of compiled object files, grouped
//! the way an implementation manifest describes. It can be used
//! programmatically in addition to the CLI interface.
//!
//! # Basic Example
//!
//! Parsing a manifest and a detailed size report:
//!
//! ```
//! use code_size::config::{DuplicateSymbolPolicy, GroupKey, DEFAULT_SECTIONS};
//! use code_size::manifest::ImplementationSpec;
//! use code_size::size::DetailedReportParser;
//! use std::path::Path;
//!
//! let spec = ImplementationSpec::parse(
//!     "EncryptCode: cipher, tables!.rodata\nDecryptCode: cipher",
//!     &GroupKey::defaults(),
//!     Path::new("implementation.info"),
//! )?;
//! assert_eq!(spec.distinct_files(), vec!["cipher", "tables"]);
//!
//! let sections: Vec<String> = DEFAULT_SECTIONS.iter().map(|s| s.to_string()).collect();
//! let parser = DetailedReportParser::new(&sections)?;
//! let sizes = parser.parse(
//!     ".text 120 0\n.text.round 40 120\n.bss 8 0\n",
//!     DuplicateSymbolPolicy::Overwrite,
//!     "cipher.o",
//! )?;
//! assert_eq!(sizes[".text"], 120);
//! assert_eq!(sizes["round"], 40);
//! # Ok::<(), code_size::error::CodeSizeError>(())
//! ```
//!
//! # Advanced Example: Reconciliation
//!
//! The detailed report must account for at least the summary's bytes, and
//! compiler clones fold into their base symbol:
//!
//! ```
//! use code_size::reconcile::{check_consistency, normalize_clones};
//! use code_size::size::SectionSizeMap;
//!
//! let mut sizes = SectionSizeMap::from([
//!     ("mix".to_string(), 30),
//!     ("mix.constprop.0".to_string(), 12),
//! ]);
//!
//! let sections = vec!["text".to_string()];
//! assert_eq!(check_consistency("cipher.o", &sizes, 40, &sections)?, 42);
//! assert!(check_consistency("cipher.o", &sizes, 50, &sections).is_err());
//!
//! normalize_clones(&mut sizes);
//! assert_eq!(sizes["mix"], 42);
//! # Ok::<(), code_size::error::CodeSizeError>(())
//! ```

/// Aggregation of per-file sizes into group totals
pub mod aggregate;
/// Command handlers for CLI operations
pub mod cmd;
/// Configuration file management
pub mod config;
/// Error types with contextual suggestions
pub mod error;
/// Shared formatting utilities
pub mod fmt;
/// Infrastructure traits for filesystem and command execution
pub mod infra;
/// Implementation manifest parsing
pub mod manifest;
/// Measurement pipeline orchestration
pub mod pipeline;
/// Consistency check and clone normalization
pub mod reconcile;
/// Size tool invocation and report parsing
pub mod size;
