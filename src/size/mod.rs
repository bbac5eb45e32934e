//! Size report module
//!
//! Obtains the two reports of a binutils-style `size` tool for one object file
//! and parses them:
//!
//! - the summary report (Berkeley format, default mode) gives the expected size
//!   as the sum of the core columns
//! - the detailed report (SysV format, `-A`) gives a per-section and
//!   per-symbol breakdown
//!
//! # Examples
//!
//! ```no_run
//! use code_size::config::ConfigFile;
//! use code_size::size::{parse_summary, DetailedReportParser, SizeInspector, SizeTool};
//! use std::path::Path;
//!
//! let config = ConfigFile::default();
//! let tool = SizeTool::from_config(&config);
//! let object = Path::new("cipher.o");
//!
//! let expected = parse_summary(&tool.summary_report(object)?, &config.core_columns, object)?;
//! let parser = DetailedReportParser::new(&config.sections)?;
//! let sizes = parser.parse(&tool.detailed_report(object)?, config.duplicate_symbols, "cipher.o")?;
//! println!("expected {} bytes, detailed {:?}", expected, sizes);
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod error;
pub mod executor;
pub mod parser;

pub use error::{ReportMode, SizeToolError};
pub use parser::{parse_summary, DetailedReportParser, SectionEntry};

use crate::config::ConfigFile;
use crate::infra::{CommandExecutor, RealCommandExecutor};
use std::collections::BTreeMap;
use std::path::Path;

/// Byte count per effective section name, for one object file
pub type SectionSizeMap = BTreeMap<String, u64>;

/// Source of the two size reports for an object file
///
/// The process-backed implementation is [`SizeTool`]; tests substitute
/// in-memory fixtures.
pub trait SizeInspector: Sync {
    /// Summary (column) report text
    fn summary_report(&self, object: &Path) -> Result<String, SizeToolError>;

    /// Detailed (all sections) report text
    fn detailed_report(&self, object: &Path) -> Result<String, SizeToolError>;
}

/// Size inspection backed by an external `size` binary
#[derive(Debug, Clone)]
pub struct SizeTool<CE: CommandExecutor = RealCommandExecutor> {
    tool: String,
    detailed_flag: String,
    cmd_executor: CE,
}

impl SizeTool {
    /// Create a size tool running `tool` with the given detailed-mode flag
    pub fn new(tool: impl Into<String>, detailed_flag: impl Into<String>) -> Self {
        Self::with_executor(tool, detailed_flag, RealCommandExecutor)
    }

    /// Create a size tool from the configured binary and flag
    pub fn from_config(config: &ConfigFile) -> Self {
        Self::new(&config.size_tool, &config.detailed_flag)
    }
}

impl<CE: CommandExecutor> SizeTool<CE> {
    /// Create a size tool with a custom command executor
    pub fn with_executor(
        tool: impl Into<String>,
        detailed_flag: impl Into<String>,
        cmd_executor: CE,
    ) -> Self {
        Self {
            tool: tool.into(),
            detailed_flag: detailed_flag.into(),
            cmd_executor,
        }
    }

    /// Tool binary name
    pub fn tool(&self) -> &str {
        &self.tool
    }

    /// Fail with `ToolMissing` unless the tool can be found on PATH
    pub fn ensure_installed(&self) -> Result<(), SizeToolError> {
        match which::which(&self.tool) {
            Ok(path) => {
                log::debug!("using {} at {}", self.tool, path.display());
                Ok(())
            }
            Err(_) => Err(SizeToolError::ToolMissing {
                tool: self.tool.clone(),
            }),
        }
    }
}
