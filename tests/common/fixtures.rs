//! Test fixture helpers for creating build directories
//!
//! A fixture is a temporary directory with two children:
//! - `source/implementation.info`, the manifest
//! - `build/`, the working directory holding object files
//!
//! Each object `NAME.o` is an empty file accompanied by `NAME.o.berkeley` and
//! `NAME.o.sysv`, the reports the fake size tool prints for it.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Re-export anyhow for convenience
pub use anyhow;

/// Shell script standing in for binutils `size`
#[cfg(unix)]
const FAKE_SIZE_SCRIPT: &str = r#"#!/bin/sh
if [ "$1" = "-A" ]; then
    shift
    exec cat "$1.sysv"
fi
if [ -f "$1.fail" ]; then
    echo "size: $1: file format not recognized" >&2
    exit 1
fi
exec cat "$1.berkeley"
"#;

/// Temporary build directory next to a manifest directory
pub struct BuildDir {
    root: TempDir,
}

impl BuildDir {
    /// Create `source/` and `build/` under a fresh temp dir
    pub fn new() -> anyhow::Result<Self> {
        let root = TempDir::new()?;
        fs::create_dir(root.path().join("source"))?;
        fs::create_dir(root.path().join("build"))?;
        Ok(Self { root })
    }

    /// Working directory for the command
    pub fn build_dir(&self) -> PathBuf {
        self.root.path().join("build")
    }

    /// Path of `../source/implementation.info` as seen from the build dir
    pub fn manifest_path(&self) -> PathBuf {
        self.root.path().join("source").join("implementation.info")
    }

    /// Write the manifest
    pub fn manifest(&self, content: &str) -> anyhow::Result<()> {
        fs::write(self.manifest_path(), content)?;
        Ok(())
    }

    /// Add an object file with the reports the fake tool prints for it
    pub fn object(&self, name: &str, text: u64, data: u64, sysv: &str) -> anyhow::Result<()> {
        let object = self.build_dir().join(format!("{}.o", name));
        fs::write(&object, b"")?;
        fs::write(
            object.with_extension("o.berkeley"),
            berkeley_report(name, text, data),
        )?;
        fs::write(object.with_extension("o.sysv"), sysv)?;
        Ok(())
    }

    /// Make the fake tool fail on `name`'s summary report
    pub fn failing_object(&self, name: &str) -> anyhow::Result<()> {
        let object = self.build_dir().join(format!("{}.o", name));
        fs::write(&object, b"")?;
        fs::write(object.with_extension("o.fail"), b"")?;
        Ok(())
    }

    /// Install the fake size tool and return its absolute path
    #[cfg(unix)]
    pub fn fake_size_tool(&self) -> anyhow::Result<PathBuf> {
        use std::os::unix::fs::PermissionsExt;

        let path = self.root.path().join("fake-size");
        fs::write(&path, FAKE_SIZE_SCRIPT)?;
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755))?;
        Ok(path)
    }

    /// Read a file relative to the build dir
    pub fn read(&self, relative: impl AsRef<Path>) -> anyhow::Result<String> {
        Ok(fs::read_to_string(self.build_dir().join(relative))?)
    }
}

/// Berkeley-format summary as printed by `size NAME.o`
pub fn berkeley_report(name: &str, text: u64, data: u64) -> String {
    format!(
        "   text\t   data\t    bss\t    dec\t    hex\tfilename\n{:>7}\t{:>7}\t      0\t{:>7}\t{:>7x}\t./{}.o\n",
        text,
        data,
        text + data,
        text + data,
        name
    )
}

/// SysV-format detailed report from `(section, size)` pairs
pub fn sysv_report(name: &str, sections: &[(&str, u64)]) -> String {
    let mut report = format!("./{}.o  :\nsection           size   addr\n", name);
    for (section, size) in sections {
        report.push_str(&format!("{:<16} {:>5}      0\n", section, size));
    }
    let total: u64 = sections.iter().map(|(_, size)| size).sum();
    report.push_str(&format!("Total            {:>5}\n\n\n", total));
    report
}
