//! Pipeline configuration types

use crate::config::{ConfigFile, DuplicateSymbolPolicy, DEFAULT_CORE_COLUMNS, DEFAULT_SECTIONS};
use std::path::PathBuf;

/// Settings for measuring a set of object files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Directory holding the object files
    pub objects_dir: PathBuf,
    /// Object file extension, without the dot (empty for none)
    pub object_extension: String,
    /// Summary report columns summed into the expected size
    pub core_columns: Vec<String>,
    /// Recognized section families of the detailed report
    pub sections: Vec<String>,
    /// What to do when two sections define the same symbol
    pub duplicate_symbols: DuplicateSymbolPolicy,
    /// Measurement threads: 1 is sequential, 0 lets rayon decide
    pub jobs: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            objects_dir: PathBuf::from("."),
            object_extension: "o".to_string(),
            core_columns: DEFAULT_CORE_COLUMNS.iter().map(|s| s.to_string()).collect(),
            sections: DEFAULT_SECTIONS.iter().map(|s| s.to_string()).collect(),
            duplicate_symbols: DuplicateSymbolPolicy::default(),
            jobs: 1,
        }
    }
}

impl From<&ConfigFile> for PipelineConfig {
    fn from(config: &ConfigFile) -> Self {
        Self {
            objects_dir: config.objects_dir.clone(),
            object_extension: config.object_extension.clone(),
            core_columns: config.core_columns.clone(),
            sections: config.sections.clone(),
            duplicate_symbols: config.duplicate_symbols,
            jobs: 1,
        }
    }
}

impl PipelineConfig {
    /// File name of the object for `name` (e.g. `cipher.o`)
    pub fn object_file_name(&self, name: &str) -> String {
        if self.object_extension.is_empty() {
            name.to_string()
        } else {
            format!("{}.{}", name, self.object_extension)
        }
    }

    /// Path of the object for `name`
    pub fn object_path(&self, name: &str) -> PathBuf {
        self.objects_dir.join(self.object_file_name(name))
    }
}
