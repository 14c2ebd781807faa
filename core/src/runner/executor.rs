use std::path::{Path, PathBuf};
use std::process::{Output, Stdio};
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::process::{Child, ChildStdin, Command};
use tokio::sync::Semaphore;
use tokio_util::sync::CancellationToken;

use crate::config::ExecutorConfig;
use crate::error::ExecutorError;

use super::exit::normalize_exit;
use super::outcome::{classify, ExecutionOutcome, Interruption, EXIT_SUCCESS};

/// Runs the core binary once per call and classifies how it ended.
#[async_trait]
pub trait CoreExecutor: Send + Sync {
    async fn execute(&self, input: Option<&str>) -> Result<ExecutionOutcome, ExecutorError>;

    /// Stops admitting new runs. Runs already holding a slot finish normally.
    fn close(&self) {}
}

pub struct ProcessExecutor {
    binary: PathBuf,
    timeout: Option<Duration>,
    gate: Arc<Semaphore>,
}

impl ProcessExecutor {
    pub fn new(cfg: &ExecutorConfig) -> Self {
        Self {
            binary: cfg.resolved_binary_path(),
            timeout: cfg.timeout(),
            gate: Arc::new(Semaphore::new(cfg.max_concurrent.max(1))),
        }
    }

    pub fn binary(&self) -> &Path {
        &self.binary
    }

    /// Permits left in the admission gate.
    pub fn available_slots(&self) -> usize {
        self.gate.available_permits()
    }

    pub fn is_closed(&self) -> bool {
        self.gate.is_closed()
    }

    /// Like [`CoreExecutor::execute`], but `cancel` terminates the child and
    /// yields a cancelled outcome instead of waiting for it.
    #[tracing::instrument(skip_all, fields(binary = %self.binary.display()))]
    pub async fn execute_with_cancel(
        &self,
        input: Option<&str>,
        cancel: CancellationToken,
    ) -> Result<ExecutionOutcome, ExecutorError> {
        ensure_executable(&self.binary)?;

        let _permit = tokio::select! {
            permit = self.gate.acquire() => permit.map_err(|_| ExecutorError::GateClosed)?,
            _ = cancel.cancelled() => {
                tracing::warn!("cancelled while waiting for an execution slot");
                return Ok(ExecutionOutcome::timed_out(Interruption::Cancelled, ""));
            }
        };

        let started = Instant::now();
        let mut child = self.spawn(input.is_some())?;
        tracing::debug!(
            pid = child.id(),
            input_bytes = input.map_or(0, str::len),
            "core binary spawned"
        );

        let stdin = child.stdin.take();
        let timeout = self.timeout;
        let deadline = async move {
            match timeout {
                Some(after) => {
                    tokio::time::sleep(after).await;
                    after
                }
                None => std::future::pending().await,
            }
        };

        // Dropping the collecting future drops the child, and kill_on_drop
        // terminates it.
        let output = tokio::select! {
            res = collect(child, stdin, input) => res?,
            after = deadline => {
                tracing::warn!(timeout_ms = after.as_millis() as u64, "core binary timed out");
                return Ok(ExecutionOutcome::timed_out(Interruption::Deadline(after), ""));
            }
            _ = cancel.cancelled() => {
                tracing::warn!("core binary run cancelled");
                return Ok(ExecutionOutcome::timed_out(Interruption::Cancelled, ""));
            }
        };

        let exit_code = normalize_exit(output.status);
        tracing::debug!(
            exit_code,
            duration_ms = started.elapsed().as_millis() as u64,
            "core binary exited"
        );

        let stdout = if exit_code == EXIT_SUCCESS {
            String::from_utf8(output.stdout).map_err(ExecutorError::StdoutDecode)?
        } else {
            String::from_utf8_lossy(&output.stdout).into_owned()
        };
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

        Ok(classify(exit_code, stdout, stderr))
    }

    fn spawn(&self, with_input: bool) -> Result<Child, ExecutorError> {
        let stdin = if with_input {
            Stdio::piped()
        } else {
            Stdio::null()
        };

        Command::new(&self.binary)
            .stdin(stdin)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| ExecutorError::Spawn {
                program: self.binary.clone(),
                source,
            })
    }
}

#[async_trait]
impl CoreExecutor for ProcessExecutor {
    async fn execute(&self, input: Option<&str>) -> Result<ExecutionOutcome, ExecutorError> {
        self.execute_with_cancel(input, CancellationToken::new())
            .await
    }

    fn close(&self) {
        if !self.gate.is_closed() {
            self.gate.close();
            tracing::info!("core executor closed, queued runs are rejected");
        }
    }
}

/// Feeds stdin while both output pipes are drained, so a child that writes
/// before it finishes reading cannot deadlock against us.
async fn collect(
    child: Child,
    stdin: Option<ChildStdin>,
    input: Option<&str>,
) -> Result<Output, ExecutorError> {
    let write = async move {
        let (Some(mut pipe), Some(data)) = (stdin, input) else {
            return Ok(());
        };
        match pipe.write_all(data.as_bytes()).await {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::BrokenPipe => {
                tracing::debug!("core binary closed stdin before reading all input");
            }
            Err(source) => {
                return Err(ExecutorError::StreamIo {
                    stream: "stdin",
                    source,
                })
            }
        }
        // closes the pipe
        drop(pipe);
        Ok(())
    };

    let (written, output) = tokio::join!(write, child.wait_with_output());
    let output = output.map_err(|source| ExecutorError::StreamIo {
        stream: "stdout/stderr",
        source,
    })?;
    written?;
    Ok(output)
}

fn ensure_executable(path: &Path) -> Result<(), ExecutorError> {
    if is_executable(path) {
        Ok(())
    } else {
        tracing::debug!(path = %path.display(), "core binary unavailable");
        Err(ExecutorError::BinaryUnavailable {
            path: path.to_path_buf(),
        })
    }
}

fn is_executable(path: &Path) -> bool {
    let Ok(meta) = std::fs::metadata(path) else {
        return false;
    };
    if !meta.is_file() {
        return false;
    }
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        meta.permissions().mode() & 0o111 != 0
    }
    #[cfg(not(unix))]
    {
        true
    }
}
