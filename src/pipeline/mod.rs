//! Measurement pipeline
//!
//! Turns an implementation manifest into group sizes:
//! 1. derive the work list of distinct object files from the manifest
//! 2. for each file, obtain both size reports, check them against each other
//!    and fold clones into their base entries
//! 3. aggregate the per-file maps into group totals
//!
//! Files are independent of each other in step 2, so it runs either
//! sequentially or on a rayon thread pool with identical results.

pub mod config;
pub mod result_formatter;

pub use config::PipelineConfig;
pub use result_formatter::ResultFormatter;

use crate::aggregate::{aggregate, GroupTotals};
use crate::error::CodeSizeError;
use crate::infra::{FileSystem, RealFileSystem};
use crate::manifest::ImplementationSpec;
use crate::reconcile::{check_consistency, normalize_clones};
use crate::size::{
    parse_summary, DetailedReportParser, SectionSizeMap, SizeInspector, SizeToolError,
};
use rayon::prelude::*;
use serde::Serialize;
use std::collections::HashMap;
use std::path::PathBuf;

/// Reconciled sizes of one object file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileMeasurement {
    /// File identifier as named in the manifest
    pub name: String,
    /// Object file that was inspected
    pub object: PathBuf,
    /// Core-column total of the summary report
    pub expected: u64,
    /// Total of the detailed report
    pub actual: u64,
    /// Normalized effective name -> size
    pub sections: SectionSizeMap,
}

/// Everything a measurement run produced
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CodeSizeReport {
    /// Group sizes and total
    pub totals: GroupTotals,
    /// Per-file measurements, in work-list order
    pub files: Vec<FileMeasurement>,
}

impl CodeSizeReport {
    /// Output line: group sizes in order, then the total
    pub fn to_line(&self) -> String {
        self.totals.to_line()
    }
}

/// Measures object files and aggregates them
///
/// # Examples
///
/// ```no_run
/// use code_size::config::{ConfigFile, GroupKey};
/// use code_size::manifest::ImplementationSpec;
/// use code_size::pipeline::{CodeSizePipeline, PipelineConfig};
/// use code_size::size::SizeTool;
/// use std::path::Path;
///
/// let config = ConfigFile::default();
/// let spec = ImplementationSpec::load(Path::new("../source/implementation.info"), &GroupKey::defaults())?;
/// let pipeline = CodeSizePipeline::new(PipelineConfig::from(&config), SizeTool::from_config(&config))?;
///
/// let report = pipeline.run(&spec)?;
/// println!("{}", report.to_line());
/// # Ok::<(), anyhow::Error>(())
/// ```
pub struct CodeSizePipeline<I: SizeInspector, FS: FileSystem = RealFileSystem> {
    config: PipelineConfig,
    parser: DetailedReportParser,
    inspector: I,
    fs: FS,
}

impl<I: SizeInspector> CodeSizePipeline<I> {
    /// Create a pipeline over the real filesystem
    pub fn new(config: PipelineConfig, inspector: I) -> Result<Self, CodeSizeError> {
        Self::with_fs(config, inspector, RealFileSystem)
    }
}

impl<I: SizeInspector, FS: FileSystem + Sync> CodeSizePipeline<I, FS> {
    /// Create a pipeline with a custom filesystem implementation
    pub fn with_fs(config: PipelineConfig, inspector: I, fs: FS) -> Result<Self, CodeSizeError> {
        let parser = DetailedReportParser::new(&config.sections)?;
        Ok(Self {
            config,
            parser,
            inspector,
            fs,
        })
    }

    /// Pipeline settings
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Read and parse both reports of one object file, without checking or
    /// normalizing them
    pub fn inspect_file(&self, name: &str) -> Result<FileMeasurement, CodeSizeError> {
        let object = self.config.object_path(name);
        let label = self.config.object_file_name(name);
        let tool_error = |source| CodeSizeError::ToolInvocation {
            file: label.clone(),
            source,
        };

        if !self.fs.is_file(&object) {
            return Err(tool_error(SizeToolError::ObjectNotFound(object)));
        }

        let summary = self.inspector.summary_report(&object).map_err(tool_error)?;
        let expected =
            parse_summary(&summary, &self.config.core_columns, &object).map_err(tool_error)?;

        let detailed = self.inspector.detailed_report(&object).map_err(tool_error)?;
        let sections = self
            .parser
            .parse(&detailed, self.config.duplicate_symbols, &label)?;

        Ok(FileMeasurement {
            name: name.to_string(),
            object,
            expected,
            actual: sections.values().sum(),
            sections,
        })
    }

    /// Measure one object file: both reports, consistency check, clone folding
    pub fn measure_file(&self, name: &str) -> Result<FileMeasurement, CodeSizeError> {
        let label = self.config.object_file_name(name);
        let mut measurement = self.inspect_file(name)?;

        check_consistency(
            &label,
            &measurement.sections,
            measurement.expected,
            self.parser.sections(),
        )?;
        normalize_clones(&mut measurement.sections);

        log::debug!(
            "{}: expected {} bytes, detailed {} bytes, {} entries",
            label,
            measurement.expected,
            measurement.actual,
            measurement.sections.len()
        );

        Ok(measurement)
    }

    /// Measure every file of the work list; the first failure aborts
    pub fn measure_all(&self, files: &[&str]) -> Result<Vec<FileMeasurement>, CodeSizeError> {
        if self.config.jobs == 1 || files.len() < 2 {
            return files.iter().map(|f| self.measure_file(f)).collect();
        }

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.config.jobs)
            .build()
            .map_err(|e| CodeSizeError::InvalidConfig {
                reason: format!("cannot start {} measurement threads: {}", self.config.jobs, e),
            })?;

        pool.install(|| files.par_iter().map(|f| self.measure_file(f)).collect())
    }

    /// Measure all files of `spec` and compute the group totals
    pub fn run(&self, spec: &ImplementationSpec) -> Result<CodeSizeReport, CodeSizeError> {
        let work_list = spec.distinct_files();
        log::info!(
            "measuring {} object files in {}",
            work_list.len(),
            self.config.objects_dir.display()
        );

        let files = self.measure_all(&work_list)?;

        let sizes: HashMap<String, SectionSizeMap> = files
            .iter()
            .map(|m| (m.name.clone(), m.sections.clone()))
            .collect();
        let totals = aggregate(spec, &sizes)?;

        log::info!("group sizes: {}", totals.to_line());

        Ok(CodeSizeReport { totals, files })
    }
}
