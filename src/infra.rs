//! Infrastructure traits for abstracting I/O operations.
//!
//! The manifest reader, the size tool and the output sink all go through these
//! traits so the measurement pipeline can run against in-memory fixtures.

use std::io;
use std::path::Path;
use std::process::{Command, Output};

/// Trait for abstracting filesystem operations.
pub trait FileSystem {
    /// Read the entire contents of a file into a string.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Write a slice of bytes to a file.
    fn write(&self, path: &Path, contents: impl AsRef<[u8]>) -> io::Result<()>;

    /// Whether `path` names an existing regular file.
    fn is_file(&self, path: &Path) -> bool;
}

/// Real filesystem implementation that delegates to std::fs.
#[derive(Debug, Clone, Copy, Default)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn write(&self, path: &Path, contents: impl AsRef<[u8]>) -> io::Result<()> {
        std::fs::write(path, contents)
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }
}

/// Trait for abstracting command execution.
///
/// Implementations must be shareable across threads because object files may be
/// measured concurrently.
pub trait CommandExecutor: Sync {
    /// Execute a command and return its output (stdout, stderr, status).
    fn output(&self, cmd: &mut Command) -> io::Result<Output>;

    /// Execute a command built with a closure and return its output.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use code_size::infra::{CommandExecutor, RealCommandExecutor};
    ///
    /// let executor = RealCommandExecutor;
    /// let output = executor.execute(|cmd| cmd.arg("-A").arg("cipher.o"), "size")?;
    /// # Ok::<(), std::io::Error>(())
    /// ```
    fn execute<F>(&self, builder: F, program: &str) -> io::Result<Output>
    where
        F: FnOnce(&mut Command) -> &mut Command,
    {
        let mut cmd = Command::new(program);
        builder(&mut cmd);
        self.output(&mut cmd)
    }
}

/// Real command executor that delegates to std::process::Command.
#[derive(Debug, Clone, Copy, Default)]
pub struct RealCommandExecutor;

impl CommandExecutor for RealCommandExecutor {
    fn output(&self, cmd: &mut Command) -> io::Result<Output> {
        cmd.output()
    }
}

/// Create an ExitStatus with the given exit code for use in test mocks.
///
/// This avoids spawning actual processes (like `Command::new("true")`) in tests.
#[cfg(all(test, unix))]
pub fn mock_exit_status(code: i32) -> std::process::ExitStatus {
    use std::os::unix::process::ExitStatusExt;
    std::process::ExitStatus::from_raw(code << 8) // Unix stores exit code in upper bits
}

#[cfg(all(test, windows))]
pub fn mock_exit_status(code: i32) -> std::process::ExitStatus {
    use std::os::windows::process::ExitStatusExt;
    std::process::ExitStatus::from_raw(code as u32)
}
