use serde::Serialize;
use tokio::process::Command;

use crate::config::settings::DEFAULT_SHELL;
use crate::error::{AppError, AppResult};

pub const KILL_PIPELINE: &str = r"ls -l /proc/*/exe 2>/dev/null | grep -E 'wine(64)?-preloader|wineserver' | perl -pe 's;^.*/proc/(\d+)/exe.*$;$1;g;' | xargs -n 1 kill | killall -s9 winedevice.exe";

#[derive(Debug, Clone)]
pub struct KillSweep {
    shell: String,
    script: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SweepReport {
    /// Exit status of the last pipeline stage. Non-zero usually just means
    /// there was nothing left to kill.
    pub status: Option<i32>,
}

impl Default for KillSweep {
    fn default() -> Self {
        Self::new(DEFAULT_SHELL)
    }
}

impl KillSweep {
    pub fn new(shell: impl Into<String>) -> Self {
        Self::with_script(shell, KILL_PIPELINE)
    }

    pub fn with_script(shell: impl Into<String>, script: impl Into<String>) -> Self {
        Self {
            shell: shell.into(),
            script: script.into(),
        }
    }

    pub async fn run(&self) -> AppResult<SweepReport> {
        tracing::debug!(shell = %self.shell, script = %self.script, "running kill sweep");

        let output = Command::new(&self.shell)
            .arg("-c")
            .arg(&self.script)
            .output()
            .await
            .map_err(|err| {
                tracing::error!("failed to execute the kill sweep: {err}");
                AppError::KillSweep(format!("{}: {err}", self.shell))
            })?;

        let report = SweepReport {
            status: output.status.code(),
        };
        tracing::info!(status = ?report.status, "kill sweep finished");
        Ok(report)
    }
}
