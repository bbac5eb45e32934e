//! Error types for size tool invocation

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Which of the two reports was requested from the size tool
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportMode {
    /// Berkeley-style column summary
    Summary,
    /// SysV-style per-section listing
    Detailed,
}

impl fmt::Display for ReportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Summary => f.write_str("summary"),
            Self::Detailed => f.write_str("detailed"),
        }
    }
}

/// Errors that can occur while obtaining or reading size reports
#[derive(Error, Debug)]
pub enum SizeToolError {
    /// I/O error while spawning the tool
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Size tool is not on PATH
    #[error("Size tool not installed: {tool}")]
    ToolMissing {
        /// Tool binary name
        tool: String,
    },

    /// Object file does not exist
    #[error("Object file not found: {}", .0.display())]
    ObjectNotFound(PathBuf),

    /// Tool exited with a failure status
    #[error("{tool} {mode} report for {} failed with status {status}: {stderr}", .file.display())]
    CommandFailed {
        /// Tool binary name
        tool: String,
        /// Requested report
        mode: ReportMode,
        /// Object file passed to the tool
        file: PathBuf,
        /// Exit status (-1 when killed by a signal)
        status: i32,
        /// Trimmed stderr of the tool
        stderr: String,
    },

    /// Summary report does not have the expected two-line shape
    #[error("Malformed summary report for {}: {reason}", .file.display())]
    MalformedSummary {
        /// Object file passed to the tool
        file: PathBuf,
        /// What did not parse
        reason: String,
    },
}

impl SizeToolError {
    /// Get actionable suggestion for resolving this error.
    pub fn suggestion(&self) -> String {
        match self {
            Self::Io(_) => "Check that the size tool can be executed".to_string(),
            Self::ToolMissing { tool } => format!(
                "Install binutils for the target (providing '{}') or set size-tool in code-size.toml",
                tool
            ),
            Self::ObjectNotFound(path) => format!(
                "Build the implementation first or pass --objects-dir (looked for {})",
                path.display()
            ),
            Self::CommandFailed { tool, .. } => format!(
                "Check that {} understands the object format of the target architecture",
                tool
            ),
            Self::MalformedSummary { .. } => {
                "The size tool must print a header line and a values line in its default mode"
                    .to_string()
            }
        }
    }

    /// Get appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Io(_) => 74,                 // EX_IOERR
            Self::ToolMissing { .. } => 127,   // Command not found
            Self::ObjectNotFound(_) => 66,     // EX_NOINPUT
            Self::CommandFailed { .. } => 69,  // EX_UNAVAILABLE
            Self::MalformedSummary { .. } => 65, // EX_DATAERR
        }
    }
}
