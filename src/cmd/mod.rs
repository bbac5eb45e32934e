//! Command handlers for the code-size CLI
//!
//! Each submodule handles one subcommand. Settings shared by the measuring
//! subcommands are resolved here: `code-size.toml` first, then command-line
//! overrides on top.

pub mod completions;
pub mod inspect;
pub mod measure;

pub use completions::cmd_completions;
pub use inspect::cmd_inspect;
pub use measure::{cmd_measure, MeasureOptions};

use anyhow::Result;
use std::env;
use std::path::PathBuf;

use crate::config::{ConfigFile, ConfigLoader};

/// Command-line settings that take precedence over `code-size.toml`
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Explicit config file instead of `./code-size.toml`
    pub config: Option<PathBuf>,
    /// Implementation manifest path
    pub manifest: Option<PathBuf>,
    /// Directory holding the object files
    pub objects_dir: Option<PathBuf>,
    /// Size tool binary
    pub size_tool: Option<String>,
}

impl ConfigOverrides {
    /// Load the config file and apply the overrides
    pub fn resolve(&self) -> Result<ConfigFile> {
        let config = match &self.config {
            Some(path) => ConfigLoader::load_file(path)?,
            None => ConfigLoader::load(&env::current_dir()?)?,
        };
        Ok(self.apply(config))
    }

    fn apply(&self, mut config: ConfigFile) -> ConfigFile {
        if let Some(manifest) = &self.manifest {
            config.manifest = manifest.clone();
        }
        if let Some(objects_dir) = &self.objects_dir {
            config.objects_dir = objects_dir.clone();
        }
        if let Some(size_tool) = &self.size_tool {
            config.size_tool = size_tool.clone();
        }
        config
    }
}
