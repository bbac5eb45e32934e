//! Configuration for code-size
//!
//! The recognized section families, summary columns, size tool and group
//! definitions live in an optional `code-size.toml` so new target
//! architectures can be supported without touching the parsers.

pub mod file;
pub mod loader;

pub use file::{
    ConfigFile, DuplicateSymbolPolicy, GroupKey, CONFIG_FILE_NAME, DEFAULT_CORE_COLUMNS,
    DEFAULT_SECTIONS,
};
pub use loader::ConfigLoader;
