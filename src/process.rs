// src/process.rs
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;

use crate::errors::{Result, RunnerError};

/// Exit status and fully buffered output of one finished process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessResult {
    exit_status: i32,
    stdout: Vec<u8>,
    stderr: Vec<u8>,
}

impl ProcessResult {
    pub fn new(exit_status: i32, stdout: impl Into<Vec<u8>>, stderr: impl Into<Vec<u8>>) -> Self {
        Self {
            exit_status,
            stdout: stdout.into(),
            stderr: stderr.into(),
        }
    }

    /// `-1` when the process was terminated by a signal.
    pub fn exit_status(&self) -> i32 {
        self.exit_status
    }

    pub fn success(&self) -> bool {
        self.exit_status == 0
    }

    pub fn stdout(&self) -> &[u8] {
        &self.stdout
    }

    pub fn stderr(&self) -> &[u8] {
        &self.stderr
    }

    pub fn stdout_lossy(&self) -> String {
        String::from_utf8_lossy(&self.stdout).into_owned()
    }

    pub fn stderr_lossy(&self) -> String {
        String::from_utf8_lossy(&self.stderr).into_owned()
    }
}

impl From<std::process::Output> for ProcessResult {
    fn from(output: std::process::Output) -> Self {
        Self {
            exit_status: output.status.code().unwrap_or(-1),
            stdout: output.stdout,
            stderr: output.stderr,
        }
    }
}

/// Runs an external executable to completion.
///
/// `argv[0]` names the executable, the rest are passed as arguments without a
/// shell in between. A non-zero exit status is not an error here; callers
/// decide what it means.
#[async_trait]
pub trait ProcessRunner: Send + Sync {
    async fn run(&self, argv: &[String]) -> Result<ProcessResult>;
}

/// Spawns real child processes on the tokio runtime.
#[derive(Debug, Clone, Default)]
pub struct SystemRunner {
    timeout: Option<Duration>,
}

impl SystemRunner {
    pub fn new(timeout: Option<Duration>) -> Self {
        Self { timeout }
    }
}

#[async_trait]
impl ProcessRunner for SystemRunner {
    async fn run(&self, argv: &[String]) -> Result<ProcessResult> {
        let (program, args) = argv.split_first().ok_or_else(|| RunnerError::Spawn {
            program: String::new(),
            source: std::io::Error::new(std::io::ErrorKind::InvalidInput, "empty argument vector"),
        })?;

        log::info!("Running command: {}", argv.join(" "));

        let child = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| RunnerError::Spawn {
                program: program.clone(),
                source,
            })?;

        // Dropping the wait future on timeout drops the child, which kills it.
        let wait = child.wait_with_output();
        let output = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, wait)
                .await
                .map_err(|_| RunnerError::Timeout {
                    program: program.clone(),
                    limit,
                })??,
            None => wait.await?,
        };

        let result = ProcessResult::from(output);
        log::debug!("`{}` exited with status {}", program, result.exit_status());
        Ok(result)
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    fn argv(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_captures_both_streams_and_exit_status() {
        let runner = SystemRunner::default();

        let result = runner
            .run(&argv(&["sh", "-c", "printf out; printf err >&2; exit 3"]))
            .await
            .unwrap();

        assert_eq!(result.exit_status(), 3);
        assert!(!result.success());
        assert_eq!(result.stdout(), b"out");
        assert_eq!(result.stderr(), b"err");
    }

    #[tokio::test]
    async fn test_arguments_are_not_shell_expanded() {
        let runner = SystemRunner::default();

        let result = runner.run(&argv(&["echo", "$HOME", "*"])).await.unwrap();

        assert!(result.success());
        assert_eq!(result.stdout_lossy(), "$HOME *\n");
    }

    #[tokio::test]
    async fn test_large_output_is_not_truncated() {
        let runner = SystemRunner::default();

        let result = runner
            .run(&argv(&["sh", "-c", "i=0; while [ $i -lt 20000 ]; do echo line$i; i=$((i+1)); done"]))
            .await
            .unwrap();

        let stdout = result.stdout_lossy();
        assert_eq!(stdout.lines().count(), 20000);
        assert!(stdout.ends_with("line19999\n"));
    }

    #[tokio::test]
    async fn test_missing_executable_is_a_spawn_error() {
        let runner = SystemRunner::default();

        let err = runner
            .run(&argv(&["definitely-not-an-installed-tool-8c1f"]))
            .await
            .unwrap_err();

        match err {
            RunnerError::Spawn { program, .. } => assert_eq!(program, "definitely-not-an-installed-tool-8c1f"),
            other => panic!("expected spawn error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_empty_argv_is_a_spawn_error() {
        let runner = SystemRunner::default();
        let err = runner.run(&[]).await.unwrap_err();
        assert!(matches!(err, RunnerError::Spawn { .. }));
    }

    #[tokio::test]
    async fn test_timeout_kills_long_running_process() {
        let runner = SystemRunner::new(Some(Duration::from_millis(200)));
        let started = std::time::Instant::now();

        let err = runner.run(&argv(&["sleep", "10"])).await.unwrap_err();

        assert!(matches!(err, RunnerError::Timeout { .. }));
        assert!(started.elapsed() < Duration::from_secs(5));
    }
}
