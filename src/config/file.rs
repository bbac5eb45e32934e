//! Configuration file data structures

use crate::error::CodeSizeError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::PathBuf;

/// Configuration file name
pub const CONFIG_FILE_NAME: &str = "code-size.toml";

/// Section families recognized in the detailed report by default.
pub const DEFAULT_SECTIONS: &[&str] = &["text", "data", "rodata", "progmem.data", "eh_frame", "note"];

/// Summary report columns that make up the expected size by default.
pub const DEFAULT_CORE_COLUMNS: &[&str] = &["text", "data"];

/// code-size configuration file structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct ConfigFile {
    /// Size inspection binary (`size`, `avr-size`, `arm-none-eabi-size`...)
    pub size_tool: String,

    /// Flag that switches the size tool to its per-section report
    pub detailed_flag: String,

    /// Recognized section families, without the leading dot
    pub sections: Vec<String>,

    /// Summary report columns summed into the expected size
    pub core_columns: Vec<String>,

    /// Manifest location, relative to the working directory
    pub manifest: PathBuf,

    /// Directory holding the object files
    pub objects_dir: PathBuf,

    /// Object file extension, without the dot
    pub object_extension: String,

    /// What to do when two sections define the same symbol
    pub duplicate_symbols: DuplicateSymbolPolicy,

    /// Groups, in output order
    pub groups: Vec<GroupKey>,
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            size_tool: "size".to_string(),
            detailed_flag: "-A".to_string(),
            sections: DEFAULT_SECTIONS.iter().map(|s| s.to_string()).collect(),
            core_columns: DEFAULT_CORE_COLUMNS.iter().map(|s| s.to_string()).collect(),
            manifest: PathBuf::from("../source/implementation.info"),
            objects_dir: PathBuf::from("."),
            object_extension: "o".to_string(),
            duplicate_symbols: DuplicateSymbolPolicy::default(),
            groups: GroupKey::defaults(),
        }
    }
}

impl ConfigFile {
    /// Check the configuration before any measurement starts
    ///
    /// # Examples
    ///
    /// ```
    /// use code_size::config::ConfigFile;
    ///
    /// assert!(ConfigFile::default().validate().is_ok());
    ///
    /// let config = ConfigFile {
    ///     sections: vec![],
    ///     ..ConfigFile::default()
    /// };
    /// assert!(config.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<(), CodeSizeError> {
        let invalid = |reason: &str| CodeSizeError::InvalidConfig {
            reason: reason.to_string(),
        };

        if self.size_tool.trim().is_empty() {
            return Err(invalid("size-tool must not be empty"));
        }
        if self.sections.is_empty() || self.sections.iter().any(|s| s.trim().is_empty()) {
            return Err(invalid("sections must list at least one non-empty section family"));
        }
        if self.core_columns.is_empty() {
            return Err(invalid("core-columns must list at least one summary column"));
        }
        if self.groups.is_empty() {
            return Err(invalid("at least one group must be configured"));
        }

        let mut seen = HashSet::new();
        for group in &self.groups {
            if group.name.trim().is_empty() || group.key.trim().is_empty() {
                return Err(invalid("group name and manifest key must not be empty"));
            }
            if group.name == crate::aggregate::TOTAL_GROUP {
                return Err(invalid("'total' is reserved for the union of all files"));
            }
            if !seen.insert(group.name.as_str()) {
                return Err(CodeSizeError::InvalidConfig {
                    reason: format!("group '{}' is configured twice", group.name),
                });
            }
        }

        Ok(())
    }
}

/// Maps a group name to the manifest key that lists its files
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupKey {
    /// Group name used in reports (e.g. "encryption")
    pub name: String,
    /// Manifest key holding the group's file list (e.g. "EncryptCode")
    pub key: String,
}

impl GroupKey {
    /// Create a group mapping
    pub fn new(name: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            key: key.into(),
        }
    }

    /// The encryption and decryption groups
    pub fn defaults() -> Vec<Self> {
        vec![
            Self::new("encryption", "EncryptCode"),
            Self::new("decryption", "DecryptCode"),
        ]
    }
}

/// Behavior when the detailed report yields the same effective name twice
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DuplicateSymbolPolicy {
    /// Later entries silently replace earlier ones
    #[default]
    Overwrite,
    /// Abort with `DuplicateSymbol`
    Reject,
}
