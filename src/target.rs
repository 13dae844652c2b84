//! Target host abstraction and subprocess plumbing
//!
//! The rendering engine is an external, opaque program reachable only through
//! its process boundary. `Renderable` captures the one capability the harness
//! needs from it (feed bytes in, get bytes out, bounded by a deadline) so the
//! scenario runner can be exercised against an in-process fake in tests.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::io::AsyncReadExt;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use crate::common::{Error, Result};

/// Captured output of a completed render
#[derive(Debug, Clone)]
pub struct RenderOutput {
    /// Exit code; None when the process was terminated by a signal
    pub exit_code: Option<i32>,
    /// Raw PCM bytes captured from stdout
    pub audio: Vec<u8>,
    /// Diagnostic text captured from stderr
    pub diagnostics: String,
}

/// A target that can render an input byte stream to audio within a deadline
///
/// Errors double as lifecycle classifications: `Error::LaunchFailed` means the
/// target never started, `Error::Timeout` means it was killed at the deadline.
/// Anything else is an unexpected harness-side failure.
#[async_trait]
pub trait Renderable: Send + Sync {
    async fn render(&self, args: &[String], input: &[u8], timeout: Duration)
        -> Result<RenderOutput>;
}

/// The real target: an executable spawned once per scenario
#[derive(Debug, Clone)]
pub struct ProcessTarget {
    path: PathBuf,
    envs: Vec<(String, String)>,
}

impl ProcessTarget {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            envs: Vec::new(),
        }
    }

    /// Add an environment variable for the spawned target
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.envs.push((key.into(), value.into()));
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl Renderable for ProcessTarget {
    async fn render(
        &self,
        args: &[String],
        input: &[u8],
        timeout: Duration,
    ) -> Result<RenderOutput> {
        let mut cmd = Command::new(&self.path);
        cmd.args(args)
            .envs(self.envs.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        // Keep the target off any console so batch runs never block on
        // window focus
        #[cfg(windows)]
        {
            const CREATE_NO_WINDOW: u32 = 0x0800_0000;
            cmd.creation_flags(CREATE_NO_WINDOW);
        }

        let mut child = cmd.spawn().map_err(|e| {
            Error::LaunchFailed(format!("failed to start {}: {}", self.path.display(), e))
        })?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| Error::LaunchFailed("failed to open target stdin".to_string()))?;
        let mut stdout = child
            .stdout
            .take()
            .ok_or_else(|| Error::LaunchFailed("failed to open target stdout".to_string()))?;
        let mut stderr = child
            .stderr
            .take()
            .ok_or_else(|| Error::LaunchFailed("failed to open target stderr".to_string()))?;

        tracing::debug!(target_path = %self.path.display(), ?args, "spawned target");

        // Feed input and drain both output pipes concurrently. The writer and
        // the readers must not wait on each other: a target blocked writing
        // into a full stdout pipe would otherwise deadlock against us blocked
        // writing its stdin.
        let input = input.to_vec();
        let stdin_task = tokio::spawn(async move {
            // A target that exits before consuming stdin closes the pipe;
            // that is its prerogative, not a harness failure.
            let _ = stdin.write_all(&input).await;
            let _ = stdin.shutdown().await;
        });

        let stdout_task = tokio::spawn(async move {
            let mut buf = Vec::new();
            stdout.read_to_end(&mut buf).await.map(|_| buf)
        });

        let stderr_task = tokio::spawn(async move {
            let mut buf = Vec::new();
            stderr.read_to_end(&mut buf).await.map(|_| buf)
        });

        let status = match tokio::time::timeout(timeout, child.wait()).await {
            Ok(status) => status?,
            Err(_) => {
                // Hard kill, then reap so no zombie outlives the scenario.
                // Partial output from a killed process is untrustworthy, so
                // the reader tasks are dropped along with their buffers.
                let _ = child.kill().await;
                stdin_task.abort();
                stdout_task.abort();
                stderr_task.abort();
                tracing::debug!(target_path = %self.path.display(), "target killed at deadline");
                return Err(Error::Timeout(timeout.as_secs()));
            }
        };

        let _ = stdin_task.await;
        let audio = stdout_task
            .await
            .map_err(|e| Error::LaunchFailed(format!("stdout reader failed: {e}")))??;
        let diagnostics = stderr_task
            .await
            .map_err(|e| Error::LaunchFailed(format!("stderr reader failed: {e}")))??;

        tracing::debug!(
            exit_code = ?status.code(),
            audio_bytes = audio.len(),
            "target completed"
        );

        Ok(RenderOutput {
            exit_code: status.code(),
            audio,
            diagnostics: String::from_utf8_lossy(&diagnostics).into_owned(),
        })
    }
}

#[cfg(test)]
#[cfg(unix)]
mod tests {
    use super::*;
    use std::time::Instant;

    fn sh(script: &str) -> Vec<String> {
        vec!["-c".to_string(), script.to_string()]
    }

    #[tokio::test]
    async fn test_render_captures_stdout_and_exit_code() {
        let target = ProcessTarget::new("/bin/sh");
        let out = target
            .render(&sh("cat"), b"hello", Duration::from_secs(5))
            .await
            .unwrap();

        assert_eq!(out.audio, b"hello");
        assert_eq!(out.exit_code, Some(0));
    }

    #[tokio::test]
    async fn test_render_captures_stderr_separately() {
        let target = ProcessTarget::new("/bin/sh");
        let out = target
            .render(
                &sh("echo diag >&2; printf audio"),
                b"",
                Duration::from_secs(5),
            )
            .await
            .unwrap();

        assert_eq!(out.audio, b"audio");
        assert_eq!(out.diagnostics.trim(), "diag");
    }

    #[tokio::test]
    async fn test_render_kills_at_deadline() {
        let target = ProcessTarget::new("/bin/sh");
        let start = Instant::now();
        let err = target
            .render(&sh("sleep 30"), b"", Duration::from_millis(200))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Timeout(_)));
        assert!(start.elapsed() < Duration::from_secs(5));
    }

    #[tokio::test]
    async fn test_render_reports_launch_failure() {
        let target = ProcessTarget::new("/nonexistent/synth-host");
        let err = target
            .render(&[], b"", Duration::from_secs(1))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::LaunchFailed(_)));
    }

    #[tokio::test]
    async fn test_render_survives_target_ignoring_stdin() {
        // Target exits without reading stdin; the writer must not wedge or
        // surface a broken-pipe error.
        let target = ProcessTarget::new("/bin/sh");
        let big_input = vec![0u8; 1 << 20];
        let out = target
            .render(&sh("exec true"), &big_input, Duration::from_secs(5))
            .await
            .unwrap();

        assert_eq!(out.exit_code, Some(0));
        assert!(out.audio.is_empty());
    }
}
