//! Aggregation of per-file sizes into group totals
//!
//! A group's size is the sum, over its files, of each file's section sizes
//! minus the sections that file excludes within that group. The `total` covers
//! every distinct file once with nothing excluded: exceptions belong to a
//! group membership, not to the file.

use crate::error::CodeSizeError;
use crate::manifest::ImplementationSpec;
use crate::size::SectionSizeMap;
use serde::Serialize;
use std::collections::HashMap;

/// Name of the group covering all files
pub const TOTAL_GROUP: &str = "total";

/// A file's share of one group
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileContribution {
    /// Object file identifier
    pub file: String,
    /// Bytes counted toward the group
    pub bytes: u64,
    /// Bytes left out by the file's exceptions
    pub excluded_bytes: u64,
}

/// Size of one group
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupTotal {
    /// Group name
    pub name: String,
    /// Sum of the file contributions
    pub bytes: u64,
    /// Per-file breakdown, in manifest order
    pub files: Vec<FileContribution>,
}

/// Group sizes in configured order, plus the total
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupTotals {
    /// Configured groups
    pub groups: Vec<GroupTotal>,
    /// All distinct files, no exceptions
    pub total: u64,
}

impl GroupTotals {
    /// Size of a group by name; `"total"` gives the total
    pub fn get(&self, name: &str) -> Option<u64> {
        if name == TOTAL_GROUP {
            return Some(self.total);
        }
        self.groups.iter().find(|g| g.name == name).map(|g| g.bytes)
    }

    /// Group sizes in order, followed by the total
    pub fn values(&self) -> Vec<u64> {
        self.groups
            .iter()
            .map(|g| g.bytes)
            .chain(std::iter::once(self.total))
            .collect()
    }

    /// Space-separated values, e.g. `"1200 1100 1800"`
    ///
    /// ```
    /// use code_size::aggregate::GroupTotals;
    ///
    /// let totals = GroupTotals { groups: vec![], total: 42 };
    /// assert_eq!(totals.to_line(), "42");
    /// ```
    pub fn to_line(&self) -> String {
        self.values()
            .iter()
            .map(u64::to_string)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Compute every group's size and the total.
///
/// `sizes` maps each file identifier to its normalized section map; every file
/// named in `spec` must be present.
///
/// # Examples
///
/// ```
/// use code_size::aggregate::aggregate;
/// use code_size::config::GroupKey;
/// use code_size::manifest::ImplementationSpec;
/// use code_size::size::SectionSizeMap;
/// use std::collections::HashMap;
/// use std::path::Path;
///
/// let spec = ImplementationSpec::parse(
///     "EncryptCode: foo, bar!.rodata\nDecryptCode: bar",
///     &GroupKey::defaults(),
///     Path::new("implementation.info"),
/// )?;
///
/// let mut sizes = HashMap::new();
/// sizes.insert("foo".to_string(), SectionSizeMap::from([(".text".to_string(), 100)]));
/// sizes.insert(
///     "bar".to_string(),
///     SectionSizeMap::from([(".text".to_string(), 50), (".rodata".to_string(), 30)]),
/// );
///
/// let totals = aggregate(&spec, &sizes)?;
/// assert_eq!(totals.values(), vec![150, 80, 180]);
/// # Ok::<(), code_size::error::CodeSizeError>(())
/// ```
pub fn aggregate(
    spec: &ImplementationSpec,
    sizes: &HashMap<String, SectionSizeMap>,
) -> Result<GroupTotals, CodeSizeError> {
    let lookup = |file: &str| {
        sizes
            .get(file)
            .ok_or_else(|| CodeSizeError::MissingMeasurement {
                file: file.to_string(),
            })
    };

    let mut groups = Vec::with_capacity(spec.groups().len());
    for group in spec.groups() {
        let mut files = Vec::with_capacity(group.files.len());
        for file_spec in &group.files {
            let (mut bytes, mut excluded_bytes) = (0u64, 0u64);
            for (section, size) in lookup(&file_spec.name)? {
                if file_spec.is_excluded(section) {
                    excluded_bytes += size;
                } else {
                    bytes += size;
                }
            }
            files.push(FileContribution {
                file: file_spec.name.clone(),
                bytes,
                excluded_bytes,
            });
        }

        groups.push(GroupTotal {
            name: group.name.clone(),
            bytes: files.iter().map(|f| f.bytes).sum(),
            files,
        });
    }

    let mut total = 0u64;
    for file in spec.distinct_files() {
        total += lookup(file)?.values().sum::<u64>();
    }

    Ok(GroupTotals { groups, total })
}
