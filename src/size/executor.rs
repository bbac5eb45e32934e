//! Size tool execution logic

use super::error::{ReportMode, SizeToolError};
use super::{SizeInspector, SizeTool};
use crate::infra::CommandExecutor;
use std::path::Path;

impl<CE: CommandExecutor> SizeTool<CE> {
    fn run_report(&self, mode: ReportMode, object: &Path) -> Result<String, SizeToolError> {
        log::debug!("running {} ({} report) on {}", self.tool, mode, object.display());

        let output = self
            .cmd_executor
            .execute(
                |cmd| {
                    if mode == ReportMode::Detailed {
                        cmd.arg(&self.detailed_flag);
                    }
                    cmd.arg(object)
                },
                &self.tool,
            )
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    SizeToolError::ToolMissing {
                        tool: self.tool.clone(),
                    }
                } else {
                    SizeToolError::Io(e)
                }
            })?;

        if !output.status.success() {
            return Err(SizeToolError::CommandFailed {
                tool: self.tool.clone(),
                mode,
                file: object.to_path_buf(),
                status: output.status.code().unwrap_or(-1),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }
}

impl<CE: CommandExecutor> SizeInspector for SizeTool<CE> {
    fn summary_report(&self, object: &Path) -> Result<String, SizeToolError> {
        self.run_report(ReportMode::Summary, object)
    }

    fn detailed_report(&self, object: &Path) -> Result<String, SizeToolError> {
        self.run_report(ReportMode::Detailed, object)
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::infra::mock_exit_status;
    use std::io;
    use std::process::{Command, Output};
    use std::sync::Mutex;

    struct MockExecutor {
        exit_code: i32,
        stdout: &'static str,
        stderr: &'static str,
        spawn_error: Option<io::ErrorKind>,
        calls: Mutex<Vec<Vec<String>>>,
    }

    impl MockExecutor {
        fn succeeding(stdout: &'static str) -> Self {
            Self {
                exit_code: 0,
                stdout,
                stderr: "",
                spawn_error: None,
                calls: Mutex::new(Vec::new()),
            }
        }

        fn failing(exit_code: i32, stderr: &'static str) -> Self {
            Self {
                exit_code,
                stdout: "",
                stderr,
                spawn_error: None,
                calls: Mutex::new(Vec::new()),
            }
        }

        fn unspawnable(kind: io::ErrorKind) -> Self {
            Self {
                spawn_error: Some(kind),
                ..Self::succeeding("")
            }
        }
    }

    impl CommandExecutor for MockExecutor {
        fn output(&self, cmd: &mut Command) -> io::Result<Output> {
            let mut call = vec![cmd.get_program().to_string_lossy().to_string()];
            call.extend(cmd.get_args().map(|a| a.to_string_lossy().to_string()));
            self.calls.lock().unwrap().push(call);

            if let Some(kind) = self.spawn_error {
                return Err(io::Error::new(kind, "spawn failed"));
            }
            Ok(Output {
                status: mock_exit_status(self.exit_code),
                stdout: self.stdout.as_bytes().to_vec(),
                stderr: self.stderr.as_bytes().to_vec(),
            })
        }
    }

    #[test]
    fn test_summary_report_passes_only_object_file() {
        let tool = SizeTool::with_executor("avr-size", "-A", MockExecutor::succeeding("report"));
        let report = tool.summary_report(Path::new("cipher.o")).unwrap();

        assert_eq!(report, "report");
        let calls = tool.cmd_executor.calls.lock().unwrap();
        assert_eq!(calls[0], vec!["avr-size", "cipher.o"]);
    }

    #[test]
    fn test_detailed_report_passes_all_sections_flag() {
        let tool = SizeTool::with_executor("size", "-A", MockExecutor::succeeding("report"));
        tool.detailed_report(Path::new("build/cipher.o")).unwrap();

        let calls = tool.cmd_executor.calls.lock().unwrap();
        assert_eq!(calls[0], vec!["size", "-A", "build/cipher.o"]);
    }

    #[test]
    fn test_nonzero_exit_returns_command_failed() {
        let tool = SizeTool::with_executor(
            "size",
            "-A",
            MockExecutor::failing(1, "size: 'cipher.o': No such file\n"),
        );
        let err = tool.detailed_report(Path::new("cipher.o")).unwrap_err();

        match err {
            SizeToolError::CommandFailed {
                mode,
                status,
                stderr,
                ..
            } => {
                assert_eq!(mode, ReportMode::Detailed);
                assert_eq!(status, 1);
                assert_eq!(stderr, "size: 'cipher.o': No such file");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_spawn_not_found_returns_tool_missing() {
        let tool = SizeTool::with_executor(
            "msp430-size",
            "-A",
            MockExecutor::unspawnable(io::ErrorKind::NotFound),
        );
        let err = tool.summary_report(Path::new("cipher.o")).unwrap_err();
        assert!(matches!(err, SizeToolError::ToolMissing { .. }));
    }

    #[test]
    fn test_spawn_other_error_returns_io() {
        let tool = SizeTool::with_executor(
            "size",
            "-A",
            MockExecutor::unspawnable(io::ErrorKind::PermissionDenied),
        );
        let err = tool.summary_report(Path::new("cipher.o")).unwrap_err();
        assert!(matches!(err, SizeToolError::Io(_)));
    }
}
