//! Size Report Parsing Benchmarks
//!
//! **Purpose:** Measure performance of parsing `size` tool reports and folding
//! compiler clones
//!
//! **Regression Threshold:** >20% slower than baseline
//!
//! **How to Run:**
//! ```bash
//! cargo bench --bench size_report_parsing
//! cargo bench --bench size_report_parsing -- --save-baseline main
//! cargo bench --bench size_report_parsing -- --baseline main
//! ```
//!
//! **What's Being Measured:**
//! 1. `parse summary report` - Berkeley column format, one file
//! 2. `parse detailed report (N sections)` - SysV format with per-symbol sections
//! 3. `normalize clones (N entries)` - Folding `.constprop`/`.isra` clones
//!
//! **Performance Notes:**
//! - Detailed parsing is dominated by the section regex
//! - Lines of unrecognized sections are rejected by the regex anchor early
//! - Linear scaling with section count

use code_size::config::{DuplicateSymbolPolicy, DEFAULT_CORE_COLUMNS, DEFAULT_SECTIONS};
use code_size::reconcile::normalize_clones;
use code_size::size::{parse_summary, DetailedReportParser};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::fmt::Write as _;
use std::hint::black_box;
use std::path::Path;

const SAMPLE_SUMMARY: &str = "   text\t   data\t    bss\t    dec\t    hex\tfilename
   1826\t     12\t      4\t   1842\t    732\tcipher.o
";

/// Synthetic `-A` report from a `-ffunction-sections -fdata-sections` build
fn detailed_report(symbols: usize) -> String {
    let mut report = String::with_capacity(symbols * 48);
    report.push_str("cipher.o  :\nsection                          size   addr\n");
    for i in 0..symbols {
        let section = match i % 4 {
            0 => "text",
            1 => "rodata",
            2 => "data",
            _ => "bss",
        };
        let suffix = if i % 7 == 0 { ".constprop.0" } else { "" };
        writeln!(report, ".{}.sym_{}{}   {}   0", section, i, suffix, 16 + i % 200)
            .expect("writing to a String cannot fail");
    }
    report.push_str(".comment                           42      0\nTotal                            9999\n");
    report
}

fn default_sections() -> Vec<String> {
    DEFAULT_SECTIONS.iter().map(|s| s.to_string()).collect()
}

fn bench_summary_parsing(c: &mut Criterion) {
    let columns: Vec<String> = DEFAULT_CORE_COLUMNS.iter().map(|s| s.to_string()).collect();
    let object = Path::new("cipher.o");

    c.bench_function("parse summary report", |b| {
        b.iter(|| parse_summary(black_box(SAMPLE_SUMMARY), &columns, object));
    });
}

fn bench_detailed_parsing(c: &mut Criterion) {
    let parser = DetailedReportParser::new(&default_sections()).expect("default sections are valid");
    let mut group = c.benchmark_group("parse detailed report");

    for symbols in [50, 500, 2000] {
        let report = detailed_report(symbols);
        group.bench_with_input(BenchmarkId::from_parameter(symbols), &report, |b, report| {
            b.iter(|| {
                parser.parse(
                    black_box(report),
                    DuplicateSymbolPolicy::Overwrite,
                    "cipher.o",
                )
            });
        });
    }

    group.finish();
}

fn bench_clone_normalization(c: &mut Criterion) {
    let parser = DetailedReportParser::new(&default_sections()).expect("default sections are valid");
    let mut group = c.benchmark_group("normalize clones");

    for symbols in [500, 2000] {
        let sizes = parser
            .parse(
                &detailed_report(symbols),
                DuplicateSymbolPolicy::Overwrite,
                "cipher.o",
            )
            .expect("synthetic report parses");
        group.bench_with_input(BenchmarkId::from_parameter(symbols), &sizes, |b, sizes| {
            b.iter(|| {
                let mut sizes = sizes.clone();
                normalize_clones(black_box(&mut sizes));
                sizes
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_summary_parsing,
    bench_detailed_parsing,
    bench_clone_normalization
);
criterion_main!(benches);
