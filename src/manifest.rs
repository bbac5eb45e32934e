//! Implementation manifest parsing
//!
//! The manifest is a `Key: Value` text file naming which object files make up
//! each group:
//!
//! ```text
//! # implementation.info
//! EncryptCode: cipher, encrypt, constants!.rodata
//! DecryptCode: cipher, decrypt, constants
//! ```
//!
//! Each comma-separated token is `NAME` or `NAME!SECTION!SECTION...`; the
//! `!`-separated sections are left out of that file's contribution to the
//! group (but still count toward the total).

use crate::config::GroupKey;
use crate::error::CodeSizeError;
use crate::infra::{FileSystem, RealFileSystem};
use serde::Serialize;
use std::collections::{BTreeSet, HashMap, HashSet};
use std::path::Path;

/// Comment marker for manifest lines
pub const COMMENT_MARKER: char = '#';

/// A file's membership in one group
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileSpec {
    /// Object file identifier, without extension
    pub name: String,
    /// Sections excluded from this file's group contribution
    pub exceptions: BTreeSet<String>,
}

impl FileSpec {
    /// File spec without exceptions
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            exceptions: BTreeSet::new(),
        }
    }

    /// Add an excluded section
    pub fn except(mut self, section: impl Into<String>) -> Self {
        self.exceptions.insert(section.into());
        self
    }

    /// Parse a `NAME[!EXC!EXC...]` token; `None` for a blank name
    ///
    /// # Examples
    ///
    /// ```
    /// use code_size::manifest::FileSpec;
    ///
    /// let spec = FileSpec::parse(" constants ! .rodata ! sbox ").unwrap();
    /// assert_eq!(spec.name, "constants");
    /// assert!(spec.is_excluded(".rodata"));
    /// assert!(spec.is_excluded("sbox"));
    /// ```
    pub fn parse(token: &str) -> Option<Self> {
        let mut parts = token.split('!').map(str::trim);
        let name = parts.next().filter(|n| !n.is_empty())?;

        Some(Self {
            name: name.to_string(),
            exceptions: parts.filter(|p| !p.is_empty()).map(String::from).collect(),
        })
    }

    /// Whether `section` is left out of this file's group contribution
    pub fn is_excluded(&self, section: &str) -> bool {
        self.exceptions.contains(section)
    }
}

/// A named group and its files, in manifest order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Group {
    /// Group name (e.g. "encryption")
    pub name: String,
    /// Member files
    pub files: Vec<FileSpec>,
}

/// Groups of an implementation, in configured order
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ImplementationSpec {
    groups: Vec<Group>,
}

impl ImplementationSpec {
    /// Build a spec from already-parsed groups
    pub fn from_groups(groups: Vec<Group>) -> Self {
        Self { groups }
    }

    /// Read and parse the manifest at `path`
    pub fn load(path: &Path, keys: &[GroupKey]) -> Result<Self, CodeSizeError> {
        Self::load_with_fs(path, keys, &RealFileSystem)
    }

    /// Read and parse the manifest with a custom filesystem implementation
    pub fn load_with_fs<FS: FileSystem>(
        path: &Path,
        keys: &[GroupKey],
        fs: &FS,
    ) -> Result<Self, CodeSizeError> {
        let content = fs
            .read_to_string(path)
            .map_err(|source| CodeSizeError::ManifestNotFound {
                path: path.to_path_buf(),
                source,
            })?;
        Self::parse(&content, keys, path)
    }

    /// Parse manifest text; every configured key must be present.
    ///
    /// `manifest` is only used in error messages.
    ///
    /// # Examples
    ///
    /// ```
    /// use code_size::config::GroupKey;
    /// use code_size::manifest::ImplementationSpec;
    /// use std::path::Path;
    ///
    /// let content = "EncryptCode: foo, bar!.rodata\nDecryptCode: bar\n";
    /// let spec = ImplementationSpec::parse(content, &GroupKey::defaults(), Path::new("implementation.info"))?;
    ///
    /// assert_eq!(spec.distinct_files(), vec!["foo", "bar"]);
    /// assert!(spec.group("encryption").unwrap().files[1].is_excluded(".rodata"));
    /// # Ok::<(), code_size::error::CodeSizeError>(())
    /// ```
    pub fn parse(content: &str, keys: &[GroupKey], manifest: &Path) -> Result<Self, CodeSizeError> {
        let fields = parse_fields(content);

        let groups = keys
            .iter()
            .map(|key| {
                let value = fields
                    .get(key.key.as_str())
                    .ok_or_else(|| CodeSizeError::MissingField {
                        field: key.key.clone(),
                        manifest: manifest.to_path_buf(),
                    })?;

                Ok::<_, CodeSizeError>(Group {
                    name: key.name.clone(),
                    files: value.split(',').filter_map(FileSpec::parse).collect(),
                })
            })
            .collect::<Result<Vec<_>, CodeSizeError>>()?;

        Ok(Self { groups })
    }

    /// Groups in configured order
    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    /// Look up a group by name
    pub fn group(&self, name: &str) -> Option<&Group> {
        self.groups.iter().find(|g| g.name == name)
    }

    /// Every file named in any group, once, in order of first appearance.
    ///
    /// This is the measurement work list: each file is inspected once no matter
    /// how many groups list it.
    pub fn distinct_files(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.groups
            .iter()
            .flat_map(|g| g.files.iter())
            .map(|f| f.name.as_str())
            .filter(|name| seen.insert(*name))
            .collect()
    }
}

/// Split manifest text into trimmed key/value pairs; later keys win
fn parse_fields(content: &str) -> HashMap<&str, &str> {
    let mut fields = HashMap::new();

    for (index, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with(COMMENT_MARKER) {
            continue;
        }

        match line.split_once(':') {
            Some((key, value)) => {
                fields.insert(key.trim(), value.trim());
            }
            None => log::warn!("manifest line {} has no ':', skipping: {}", index + 1, line),
        }
    }

    fields
}
