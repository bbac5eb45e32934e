//! Size report parsing logic

use super::error::SizeToolError;
use super::SectionSizeMap;
use crate::config::DuplicateSymbolPolicy;
use crate::error::CodeSizeError;
use regex::Regex;
use std::path::Path;

/// Sum the core columns of a summary report into the expected size.
///
/// The report is a header line of column names followed by a values line:
///
/// ```text
///    text    data     bss     dec     hex filename
///     100      10       0     110      6e cipher.o
/// ```
///
/// # Examples
///
/// ```
/// use code_size::size::parse_summary;
/// use std::path::Path;
///
/// let report = "text data bss dec hex filename\n100 10 4 114 72 cipher.o\n";
/// let core = vec!["text".to_string(), "data".to_string()];
/// assert_eq!(parse_summary(report, &core, Path::new("cipher.o")).unwrap(), 110);
/// ```
pub fn parse_summary(
    report: &str,
    core_columns: &[String],
    file: &Path,
) -> Result<u64, SizeToolError> {
    let malformed = |reason: String| SizeToolError::MalformedSummary {
        file: file.to_path_buf(),
        reason,
    };

    let mut lines = report.lines().filter(|l| !l.trim().is_empty());
    let (Some(header), Some(values)) = (lines.next(), lines.next()) else {
        return Err(malformed("expected a header line and a values line".to_string()));
    };

    let header: Vec<&str> = header.split_whitespace().collect();
    let values: Vec<&str> = values.split_whitespace().collect();

    // The trailing filename column may contain spaces, so only a short values line is an error
    if values.len() < header.len() {
        return Err(malformed(format!(
            "{} columns in header but {} values",
            header.len(),
            values.len()
        )));
    }

    let mut expected = 0u64;
    for column in core_columns {
        let index = header
            .iter()
            .position(|h| h == column)
            .ok_or_else(|| malformed(format!("column '{}' not in header", column)))?;
        let value: u64 = values[index]
            .parse()
            .map_err(|_| malformed(format!("'{}' is not a size for column '{}'", values[index], column)))?;
        expected += value;
    }

    Ok(expected)
}

/// One matching line of a detailed report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionEntry {
    /// Section family with its leading dot (e.g. `.text`)
    pub section: String,
    /// Symbol suffix (e.g. `aes_encrypt` in `.text.aes_encrypt`)
    pub symbol: Option<String>,
    /// Size in bytes
    pub size: u64,
    /// Load address
    pub addr: u64,
}

impl SectionEntry {
    /// The symbol when present, otherwise the section name
    pub fn effective_name(&self) -> &str {
        self.symbol.as_deref().unwrap_or(&self.section)
    }
}

/// Parser for the detailed (`size -A`) report.
///
/// Lines have the shape `SECTION[.SYMBOL] SIZE ADDR` where `SECTION` is one of
/// the recognized families. Every other line (headers, `Total`, `.bss`,
/// `.comment`, debug sections...) is ignored.
#[derive(Debug, Clone)]
pub struct DetailedReportParser {
    pattern: Regex,
    sections: Vec<String>,
}

impl DetailedReportParser {
    /// Build a parser recognizing the given section families (with or without leading dot)
    pub fn new(sections: &[String]) -> Result<Self, CodeSizeError> {
        let mut families: Vec<&str> = sections
            .iter()
            .map(|s| s.trim().trim_start_matches('.'))
            .filter(|s| !s.is_empty())
            .collect();

        if families.is_empty() {
            return Err(CodeSizeError::InvalidConfig {
                reason: "no section families to recognize".to_string(),
            });
        }

        // Longest first so `.progmem.data` is never read as `.progmem` + symbol `data`
        families.sort_by(|a, b| b.len().cmp(&a.len()).then(a.cmp(b)));
        families.dedup();

        let alternation = families
            .iter()
            .map(|f| regex::escape(f))
            .collect::<Vec<_>>()
            .join("|");
        let pattern = Regex::new(&format!(
            r"^(?P<section>\.(?:{alternation}))(?:\.(?P<symbol>[\w.]+))?[ \t]+(?P<size>\d+)[ \t]+(?P<addr>\d+)$"
        ))
        .map_err(|e| CodeSizeError::InvalidConfig {
            reason: format!("cannot build section pattern: {}", e),
        })?;

        Ok(Self {
            pattern,
            sections: sections.to_vec(),
        })
    }

    /// Recognized section families, as configured
    pub fn sections(&self) -> &[String] {
        &self.sections
    }

    /// Parse a single report line
    pub fn parse_line(&self, line: &str) -> Option<SectionEntry> {
        let caps = self.pattern.captures(line.trim())?;

        Some(SectionEntry {
            section: caps["section"].to_string(),
            symbol: caps.name("symbol").map(|m| m.as_str().to_string()),
            size: caps["size"].parse().ok()?,
            addr: caps["addr"].parse().ok()?,
        })
    }

    /// Iterate over all recognized entries of a report
    pub fn entries<'a>(&'a self, report: &'a str) -> impl Iterator<Item = SectionEntry> + 'a {
        report.lines().filter_map(move |line| self.parse_line(line))
    }

    /// Collect a report into effective name -> size.
    ///
    /// Distinct sections are assumed not to define the same symbol. Under
    /// [`DuplicateSymbolPolicy::Overwrite`] a repeated name keeps the last size.
    pub fn parse(
        &self,
        report: &str,
        duplicates: DuplicateSymbolPolicy,
        file: &str,
    ) -> Result<SectionSizeMap, CodeSizeError> {
        let mut sizes = SectionSizeMap::new();

        for entry in self.entries(report) {
            let name = entry.effective_name().to_string();
            if let Some(previous) = sizes.insert(name.clone(), entry.size) {
                match duplicates {
                    DuplicateSymbolPolicy::Overwrite => log::debug!(
                        "{}: '{}' seen twice, {} bytes replaced by {}",
                        file,
                        name,
                        previous,
                        entry.size
                    ),
                    DuplicateSymbolPolicy::Reject => {
                        return Err(CodeSizeError::DuplicateSymbol {
                            file: file.to_string(),
                            symbol: name,
                        })
                    }
                }
            }
        }

        Ok(sizes)
    }
}
