//! Inspect command implementation
//!
//! Handles `code-size inspect`, which shows how individual object files are
//! broken down. Unlike `measure` it does not fail when the detailed report
//! falls short of the summary; it shows the shortfall instead, which is how
//! missing section families are found.

use anyhow::Result;

use super::ConfigOverrides;
use crate::pipeline::{CodeSizePipeline, FileMeasurement, PipelineConfig, ResultFormatter};
use crate::size::SizeTool;

/// Show the parsed sections of each named object file
///
/// # Examples
///
/// ```no_run
/// use code_size::cmd::{cmd_inspect, ConfigOverrides};
///
/// cmd_inspect(&["cipher".to_string()], &ConfigOverrides::default(), false)?;
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn cmd_inspect(
    names: &[String],
    overrides: &ConfigOverrides,
    json_output: bool,
) -> Result<()> {
    let config = overrides.resolve()?;

    let tool = SizeTool::from_config(&config);
    tool.ensure_installed()?;

    let pipeline = CodeSizePipeline::new(PipelineConfig::from(&config), tool)?;

    let measurements = names
        .iter()
        .map(|name| pipeline.inspect_file(name))
        .collect::<Result<Vec<FileMeasurement>, _>>()?;

    if json_output {
        println!("{}", ResultFormatter::to_json(&measurements)?);
    } else {
        for measurement in &measurements {
            ResultFormatter::print_measurement(measurement);
        }
    }

    Ok(())
}
