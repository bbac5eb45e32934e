//! Result formatting and output

use console::style;
use std::path::Path;

use super::{CodeSizeReport, FileMeasurement};
use crate::error::CodeSizeError;
use crate::fmt::{format_bytes, CHART, MICROSCOPE};
use crate::infra::FileSystem;

/// Formats, displays and writes measurement results
pub struct ResultFormatter;

impl ResultFormatter {
    /// Write the `"<group>... <total>"` line to `path`
    pub fn write_line<FS: FileSystem>(
        fs: &FS,
        path: &Path,
        report: &CodeSizeReport,
    ) -> Result<(), CodeSizeError> {
        fs.write(path, report.to_line())
            .map_err(|source| CodeSizeError::Io {
                context: format!("writing {}", path.display()),
                source,
            })
    }

    /// Serialize any report as pretty JSON
    pub fn to_json<T: serde::Serialize>(value: &T) -> anyhow::Result<String> {
        use anyhow::Context;
        serde_json::to_string_pretty(value).context("Failed to serialize size report to JSON")
    }

    /// Print a colored summary of group sizes
    pub fn print_summary(report: &CodeSizeReport) {
        println!("\n{} {}", CHART, style("Code size").bold());

        for group in &report.totals.groups {
            println!(
                "   {} {:<12} {:>10}  ({})",
                style("→").dim(),
                group.name,
                style(group.bytes).green().bold(),
                format_bytes(group.bytes)
            );
            for file in &group.files {
                if file.excluded_bytes > 0 {
                    println!(
                        "       {} {} excludes {} bytes",
                        style("·").dim(),
                        file.file,
                        file.excluded_bytes
                    );
                }
            }
        }

        println!(
            "   {} {:<12} {:>10}  ({})",
            style("→").dim(),
            crate::aggregate::TOTAL_GROUP,
            style(report.totals.total).cyan().bold(),
            format_bytes(report.totals.total)
        );
    }

    /// Print one file's normalized section sizes, largest first
    pub fn print_measurement(measurement: &FileMeasurement) {
        println!(
            "\n{} {} ({})",
            MICROSCOPE,
            style(&measurement.name).bold(),
            measurement.object.display()
        );
        if measurement.actual < measurement.expected {
            println!(
                "   summary {} bytes, detailed {} bytes ({})",
                measurement.expected,
                measurement.actual,
                style(format!(
                    "{} bytes outside the recognized sections",
                    measurement.expected - measurement.actual
                ))
                .red()
            );
        } else {
            println!(
                "   summary {} bytes, detailed {} bytes (+{})",
                measurement.expected,
                measurement.actual,
                measurement.actual - measurement.expected
            );
        }

        let mut entries: Vec<_> = measurement.sections.iter().collect();
        entries.sort_by(|a, b| b.1.cmp(a.1).then(a.0.cmp(b.0)));
        for (name, size) in entries {
            println!("   {:>10}  {}", size, name);
        }
    }
}
