//! Configuration file loading

use super::file::{ConfigFile, CONFIG_FILE_NAME};
use crate::infra::{FileSystem, RealFileSystem};
use anyhow::{Context, Result};
use std::path::Path;

/// Handles loading configuration files
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config from code-size.toml in the given directory
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use code_size::config::ConfigLoader;
    /// use std::path::Path;
    ///
    /// let config = ConfigLoader::load(Path::new("."))?;
    /// println!("Recognized sections: {:?}", config.sections);
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    pub fn load(dir: &Path) -> Result<ConfigFile> {
        Self::load_with_fs(dir, &RealFileSystem)
    }

    /// Load config with a custom filesystem implementation
    pub fn load_with_fs<FS: FileSystem>(dir: &Path, fs: &FS) -> Result<ConfigFile> {
        Self::load_file_with_fs(&dir.join(CONFIG_FILE_NAME), false, fs)
    }

    /// Load an explicitly named config file; a missing file is an error
    pub fn load_file(path: &Path) -> Result<ConfigFile> {
        Self::load_file_with_fs(path, true, &RealFileSystem)
    }

    fn load_file_with_fs<FS: FileSystem>(
        config_path: &Path,
        required: bool,
        fs: &FS,
    ) -> Result<ConfigFile> {
        // Read file atomically - no TOCTOU race window
        let contents = match fs.read_to_string(config_path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound && !required => {
                log::debug!("{} not found, using defaults", config_path.display());
                return Ok(ConfigFile::default());
            }
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("Failed to read {}", config_path.display()));
            }
        };

        let config: ConfigFile = toml_edit::de::from_str(&contents)
            .with_context(|| format!("Failed to parse {}", config_path.display()))?;

        config
            .validate()
            .with_context(|| format!("Invalid configuration in {}", config_path.display()))?;

        Ok(config)
    }
}
