//! Error types with contextual suggestions
//!
//! Every failure aborts the whole run: nothing is written to the output path
//! unless all groups and the total were computed. Each error carries an
//! actionable suggestion and a sysexits-style exit code for CI.
//!
//! # Examples
//!
//! ```
//! use code_size::error::CodeSizeError;
//!
//! let error = CodeSizeError::InvalidCodeSize {
//!     file: "cipher.o".to_string(),
//!     actual: 95,
//!     expected: 110,
//!     sections: vec!["text".to_string(), "data".to_string()],
//! };
//!
//! assert_eq!(error.exit_code(), 78);
//! assert!(error.suggestion().unwrap().contains("15 bytes"));
//! ```

use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::size::SizeToolError;

/// code-size errors with contextual suggestions
#[derive(Error, Debug)]
pub enum CodeSizeError {
    /// Manifest lacks a group key
    #[error("Manifest {} is missing required field '{field}'", .manifest.display())]
    MissingField {
        /// Missing manifest key
        field: String,
        /// Manifest path
        manifest: PathBuf,
    },

    /// Manifest file could not be read
    #[error("Manifest not found: {}", .path.display())]
    ManifestNotFound {
        /// Manifest path
        path: PathBuf,
        #[source]
        /// IO error source
        source: std::io::Error,
    },

    /// The size tool could not run or reported failure for an object file
    #[error("Size inspection failed for {file}")]
    ToolInvocation {
        /// Object file identifier
        file: String,
        #[source]
        /// Underlying tool failure
        source: SizeToolError,
    },

    /// The detailed report accounts for fewer bytes than the summary report
    #[error(
        "Invalid code size for {file}: detailed sections sum to {actual} bytes, \
         summary reports {expected} bytes"
    )]
    InvalidCodeSize {
        /// Object file identifier
        file: String,
        /// Sum of the detailed report
        actual: u64,
        /// Sum of the summary report's core columns
        expected: u64,
        /// Recognized section families at the time of the check
        sections: Vec<String>,
    },

    /// Two sections of one object file define the same symbol
    #[error("Symbol '{symbol}' is defined by more than one section in {file}")]
    DuplicateSymbol {
        /// Object file identifier
        file: String,
        /// Offending effective name
        symbol: String,
    },

    /// A grouped file has no measurement
    #[error("No size measurement for {file}")]
    MissingMeasurement {
        /// Object file identifier
        file: String,
    },

    /// Configuration values cannot be used
    #[error("Invalid configuration: {reason}")]
    InvalidConfig {
        /// What is wrong
        reason: String,
    },

    /// Generic I/O error with context
    #[error("I/O error: {context}")]
    Io {
        /// Context about where the error occurred
        context: String,
        #[source]
        /// IO error source
        source: std::io::Error,
    },
}

impl CodeSizeError {
    /// Get actionable suggestion for resolving this error.
    pub fn suggestion(&self) -> Option<String> {
        match self {
            Self::MissingField { field, manifest } => Some(format!(
                "Add a '{}: NAME, NAME!SECTION, ...' line to {}",
                field,
                manifest.display()
            )),
            Self::ManifestNotFound { path, .. } => Some(format!(
                "Run from the build directory or pass --manifest (looked for {})",
                path.display()
            )),
            Self::ToolInvocation { source, .. } => Some(source.suggestion()),
            Self::InvalidCodeSize {
                file,
                actual,
                expected,
                sections,
            } => Some(format!(
                "{} bytes of {} are not covered by the recognized section families ({}).\n\
                 Run 'code-size inspect {}' and add the missing families to `sections` in code-size.toml",
                expected.saturating_sub(*actual),
                file,
                sections.join(", "),
                Path::new(file)
                    .file_stem()
                    .map(|stem| stem.to_string_lossy())
                    .unwrap_or_default(),
            )),
            Self::DuplicateSymbol { .. } => Some(
                "Set duplicate-symbols = \"overwrite\" in code-size.toml to keep the last definition"
                    .to_string(),
            ),
            Self::MissingMeasurement { file } => Some(format!(
                "Ensure {} is listed in the manifest before aggregating",
                file
            )),
            Self::InvalidConfig { .. } => {
                Some("Fix code-size.toml or remove it to use the defaults".to_string())
            }
            Self::Io { context, .. } => Some(format!(
                "Check file permissions and that {} is accessible",
                context
            )),
        }
    }

    /// Get appropriate exit code for this error, following sysexits.h conventions.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::MissingField { .. } => 65,     // EX_DATAERR
            Self::ManifestNotFound { .. } => 66, // EX_NOINPUT
            Self::ToolInvocation { source, .. } => source.exit_code(),
            Self::InvalidCodeSize { .. } => 78, // EX_CONFIG: recognized sections need extending
            Self::DuplicateSymbol { .. } => 65, // EX_DATAERR
            Self::MissingMeasurement { .. } => 70, // EX_SOFTWARE
            Self::InvalidConfig { .. } => 78,   // EX_CONFIG
            Self::Io { .. } => 74,              // EX_IOERR
        }
    }
}

/// Error formatter with colors and structured output
pub struct ErrorFormatter;

impl ErrorFormatter {
    /// Format error with its cause chain and suggestion
    pub fn format(error: &anyhow::Error) -> String {
        use console::style;

        let mut output = String::new();

        output.push_str(&format!("{} {}\n", style("error:").red().bold(), error));

        let mut source = error.source();
        let mut indent = 1;
        while let Some(err) = source {
            output.push_str(&format!(
                "{}{} {}\n",
                "  ".repeat(indent),
                style("caused by:").yellow(),
                err
            ));
            source = err.source();
            indent += 1;
        }

        let suggestion = if let Some(cs_error) = error.downcast_ref::<CodeSizeError>() {
            cs_error.suggestion()
        } else {
            error
                .downcast_ref::<SizeToolError>()
                .map(SizeToolError::suggestion)
        };

        if let Some(suggestion) = suggestion {
            output.push_str(&format!(
                "\n{} {}\n",
                style("help:").cyan().bold(),
                suggestion
            ));
        }

        output
    }

    /// Get exit code from error
    pub fn exit_code(error: &anyhow::Error) -> i32 {
        if let Some(cs_error) = error.downcast_ref::<CodeSizeError>() {
            cs_error.exit_code()
        } else if let Some(tool_error) = error.downcast_ref::<SizeToolError>() {
            tool_error.exit_code()
        } else {
            1
        }
    }
}
