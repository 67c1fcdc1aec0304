use std::process::{ExitStatus, Stdio};
use std::time::Duration;

use serde::Serialize;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Command;
use tokio::sync::mpsc;

use super::clean::clean;
use super::plan::LaunchPlan;
use crate::error::{AppError, AppResult};

const READ_CHUNK: usize = 4096;
const MAX_PENDING: usize = 64 * 1024;
const OUTPUT_GRACE: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stream {
    Stdout,
    Stderr,
}

impl Stream {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Stdout => "stdout",
            Self::Stderr => "stderr",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessEvent {
    Output { stream: Stream, text: String },
    Exited(ExitReport),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ExitReport {
    pub code: Option<i32>,
    pub signal: Option<i32>,
}

impl ExitReport {
    pub fn normal(&self) -> bool {
        self.code.is_some()
    }

    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

impl From<ExitStatus> for ExitReport {
    fn from(status: ExitStatus) -> Self {
        #[cfg(unix)]
        let signal = {
            use std::os::unix::process::ExitStatusExt;
            status.signal()
        };
        #[cfg(not(unix))]
        let signal = None;

        Self {
            code: status.code(),
            signal,
        }
    }
}

/// Handle on a started child. Events arrive in the order output was read,
/// with [`ProcessEvent::Exited`] last unless a descendant keeps a pipe open
/// past the grace period.
#[derive(Debug)]
pub struct RunningProcess {
    program: String,
    pid: Option<u32>,
    events: mpsc::UnboundedReceiver<ProcessEvent>,
}

impl RunningProcess {
    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn pid(&self) -> Option<u32> {
        self.pid
    }

    pub async fn next_event(&mut self) -> Option<ProcessEvent> {
        self.events.recv().await
    }

    pub async fn wait(mut self) -> AppResult<ExitReport> {
        while let Some(event) = self.next_event().await {
            match event {
                ProcessEvent::Output { stream, text } => {
                    tracing::info!(target: "awu::child", stream = stream.as_str(), "{text}");
                }
                ProcessEvent::Exited(report) => {
                    log_exit(&self.program, &report);
                    return Ok(report);
                }
            }
        }

        Err(AppError::Io(std::io::Error::other(format!(
            "lost track of {} before it exited",
            self.program
        ))))
    }
}

fn log_exit(program: &str, report: &ExitReport) {
    match (report.code, report.signal) {
        (Some(code), _) => {
            tracing::info!(program, code, "process finished with exit code {code}");
        }
        (None, Some(signal)) => {
            tracing::warn!(program, signal, "process terminated by signal {signal}");
        }
        (None, None) => tracing::warn!(program, "process terminated abnormally"),
    }
}

pub fn spawn(plan: &LaunchPlan) -> AppResult<RunningProcess> {
    tracing::debug!(
        program = %plan.program,
        args = ?plan.args,
        cwd = %plan.current_dir.display(),
        "starting process"
    );

    let mut child = Command::new(&plan.program)
        .args(&plan.args)
        .current_dir(&plan.current_dir)
        .env_clear()
        .envs(&plan.env)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|source| {
            tracing::error!(program = %plan.program, "failed to start: {source}");
            AppError::Spawn {
                program: plan.program.clone(),
                source,
            }
        })?;

    let pid = child.id();
    tracing::info!(program = %plan.program, pid, "process started");

    let (tx, events) = mpsc::unbounded_channel();
    let stdout = child
        .stdout
        .take()
        .map(|pipe| tokio::spawn(pump(pipe, Stream::Stdout, tx.clone())));
    let stderr = child
        .stderr
        .take()
        .map(|pipe| tokio::spawn(pump(pipe, Stream::Stderr, tx.clone())));

    let program = plan.program.clone();
    tokio::spawn(async move {
        let report = match child.wait().await {
            Ok(status) => ExitReport::from(status),
            Err(err) => {
                tracing::error!(program = %program, "failed to wait for process: {err}");
                return;
            }
        };

        let readers = async {
            for reader in [stdout, stderr].into_iter().flatten() {
                let _ = reader.await;
            }
        };
        if tokio::time::timeout(OUTPUT_GRACE, readers).await.is_err() {
            tracing::debug!(program = %program, "output still open after exit, not waiting for it");
        }

        let _ = tx.send(ProcessEvent::Exited(report));
    });

    Ok(RunningProcess {
        program: plan.program.clone(),
        pid,
        events,
    })
}

async fn pump<R>(mut reader: R, stream: Stream, tx: mpsc::UnboundedSender<ProcessEvent>)
where
    R: AsyncRead + Unpin,
{
    let mut buf = [0u8; READ_CHUNK];
    let mut pending = Vec::new();
    loop {
        let read = match reader.read(&mut buf).await {
            Ok(0) => break,
            Ok(read) => read,
            Err(err) => {
                tracing::debug!(stream = stream.as_str(), "read failed: {err}");
                break;
            }
        };

        pending.extend_from_slice(&buf[..read]);
        let Some(chunk) = take_complete_lines(&mut pending) else {
            continue;
        };
        if !send_cleaned(&tx, stream, &chunk) {
            return;
        }
    }

    if !pending.is_empty() {
        send_cleaned(&tx, stream, &pending);
    }
}

/// Splits off everything up to the last newline so escape sequences and
/// multi-byte characters are never cut in half. Without a newline the buffer
/// is only released once it exceeds `MAX_PENDING`.
fn take_complete_lines(pending: &mut Vec<u8>) -> Option<Vec<u8>> {
    match pending.iter().rposition(|&byte| byte == b'\n') {
        Some(end) => {
            let rest = pending.split_off(end + 1);
            Some(std::mem::replace(pending, rest))
        }
        None if pending.len() > MAX_PENDING => Some(std::mem::take(pending)),
        None => None,
    }
}

fn send_cleaned(tx: &mpsc::UnboundedSender<ProcessEvent>, stream: Stream, raw: &[u8]) -> bool {
    let text = clean(raw);
    if text.is_empty() {
        return true;
    }
    tx.send(ProcessEvent::Output { stream, text }).is_ok()
}
