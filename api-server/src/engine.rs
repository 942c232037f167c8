use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::process::Stdio;
use std::time::{Duration, Instant};
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Command;
use tracing::{debug, info, warn};

use crate::error::SolveError;

/// How the engine process ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineStatus {
    /// Process exited on its own. `None` when killed by a signal.
    Exited(Option<i32>),
    /// Process was killed after exceeding the time limit.
    TimedOut,
}

/// Everything captured from one engine run.
#[derive(Debug, Clone)]
pub struct EngineRawOutput {
    pub stdout: String,
    pub stderr: String,
    pub status: EngineStatus,
    pub elapsed_ms: f64,
}

/// The external search engine: one encoded state in, text out.
#[async_trait]
pub trait Engine: Send + Sync {
    /// Runs the engine once. Timeouts and non-zero exits are reported in the
    /// returned output; only failures to run the process at all are errors.
    async fn invoke(&self, encoded_state: &str) -> Result<EngineRawOutput, SolveError>;
}

/// Runs the engine executable as a child process per call.
#[derive(Debug, Clone)]
pub struct ProcessEngine {
    executable: PathBuf,
    work_dir: PathBuf,
    timeout: Duration,
}

impl ProcessEngine {
    pub fn new(executable: PathBuf, work_dir: PathBuf, timeout: Duration) -> Self {
        Self {
            executable,
            work_dir,
            timeout,
        }
    }

    pub fn executable(&self) -> &PathBuf {
        &self.executable
    }
}

#[async_trait]
impl Engine for ProcessEngine {
    async fn invoke(&self, encoded_state: &str) -> Result<EngineRawOutput, SolveError> {
        let start = Instant::now();
        info!(executable = %self.executable.display(), "Calling solver engine");

        // The engine loads its pattern database relative to its cwd.
        let mut child = Command::new(&self.executable)
            .arg(encoded_state)
            .current_dir(&self.work_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()?;

        let stdout_pipe = child.stdout.take();
        let stderr_pipe = child.stderr.take();

        // The bound covers draining too: anything the engine forks may keep
        // the pipes open after the engine itself has exited.
        let run = async {
            tokio::try_join!(child.wait(), drain(stdout_pipe), drain(stderr_pipe))
        };

        let finished = tokio::time::timeout(self.timeout, run).await;
        let (status, stdout, stderr) = match finished {
            Ok(result) => result?,
            Err(_) => {
                // kill() also waits, so the child is reaped once this returns.
                match child.kill().await {
                    Ok(()) => {}
                    // Already exited and reaped; only its descendants were left.
                    Err(e) if e.kind() == ErrorKind::InvalidInput => {}
                    Err(e) => return Err(e.into()),
                }
                let elapsed_ms = elapsed_ms(start);
                warn!(
                    timeout_secs = self.timeout.as_secs_f64(),
                    elapsed_ms, "Solver engine timed out and was terminated"
                );
                return Ok(EngineRawOutput {
                    stdout: String::new(),
                    stderr: String::new(),
                    status: EngineStatus::TimedOut,
                    elapsed_ms,
                });
            }
        };

        let elapsed_ms = elapsed_ms(start);

        if !status.success() {
            warn!(code = ?status.code(), "Solver engine exited with failure status");
        }
        if !stderr.trim().is_empty() {
            debug!(stderr = %stderr.trim(), "Solver engine stderr");
        }

        Ok(EngineRawOutput {
            stdout,
            stderr,
            status: EngineStatus::Exited(status.code()),
            elapsed_ms,
        })
    }
}

async fn drain<R: AsyncRead + Unpin>(pipe: Option<R>) -> std::io::Result<String> {
    let mut buf = Vec::new();
    if let Some(mut pipe) = pipe {
        pipe.read_to_end(&mut buf).await?;
    }
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Milliseconds since `start`, rounded to two decimals.
fn elapsed_ms(start: Instant) -> f64 {
    (start.elapsed().as_secs_f64() * 1000.0 * 100.0).round() / 100.0
}
