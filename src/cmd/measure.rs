//! Measure command implementation
//!
//! Handles `code-size measure`: reads the manifest, measures every listed
//! object file and writes the group sizes line. The output file is written
//! only after every group and the total were computed.

use anyhow::Result;
use console::style;
use std::path::PathBuf;

use super::ConfigOverrides;
use crate::fmt::CHECKMARK;
use crate::infra::RealFileSystem;
use crate::manifest::ImplementationSpec;
use crate::pipeline::{CodeSizePipeline, PipelineConfig, ResultFormatter};
use crate::size::SizeTool;

/// Options of the measure command
#[derive(Debug, Clone)]
pub struct MeasureOptions {
    /// File receiving the `"<group>... <total>"` line
    pub output: PathBuf,
    /// Config file and path overrides
    pub overrides: ConfigOverrides,
    /// Measurement threads: 1 is sequential, 0 lets rayon decide
    pub jobs: usize,
    /// Print the full report as JSON instead of the summary
    pub json: bool,
}

/// Measure all object files of the manifest and write the result line
///
/// # Examples
///
/// ```no_run
/// use code_size::cmd::{cmd_measure, ConfigOverrides, MeasureOptions};
/// use std::path::PathBuf;
///
/// cmd_measure(&MeasureOptions {
///     output: PathBuf::from("code_size.txt"),
///     overrides: ConfigOverrides::default(),
///     jobs: 1,
///     json: false,
/// })?;
/// # Ok::<(), anyhow::Error>(())
/// ```
///
/// # Errors
///
/// Returns an error if:
/// - The manifest is missing or lacks a group key
/// - The size tool is missing or fails on an object file
/// - A detailed report accounts for fewer bytes than its summary report
/// - The output file cannot be written
pub fn cmd_measure(options: &MeasureOptions) -> Result<()> {
    let config = options.overrides.resolve()?;

    let spec = ImplementationSpec::load(&config.manifest, &config.groups)?;

    let tool = SizeTool::from_config(&config);
    tool.ensure_installed()?;

    let pipeline_config = PipelineConfig {
        jobs: options.jobs,
        ..PipelineConfig::from(&config)
    };
    let pipeline = CodeSizePipeline::new(pipeline_config, tool)?;
    let report = pipeline.run(&spec)?;

    ResultFormatter::write_line(&RealFileSystem, &options.output, &report)?;

    if options.json {
        println!("{}", ResultFormatter::to_json(&report)?);
    } else {
        ResultFormatter::print_summary(&report);
        println!(
            "\n{} Wrote {}",
            CHECKMARK,
            style(options.output.display()).bold()
        );
    }

    Ok(())
}
