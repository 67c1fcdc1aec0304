pub mod clean;
pub mod env;
pub mod kill;
pub mod plan;
pub mod process;

use std::path::PathBuf;

pub use clean::clean;
pub use env::{Environment, build_environment};
pub use kill::{KillSweep, SweepReport};
pub use plan::LaunchPlan;
pub use process::{ExitReport, ProcessEvent, RunningProcess, Stream};

use crate::config::profile;
use crate::config::{AppPaths, Settings};
use crate::error::AppResult;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LaunchRequest {
    pub profile_file: String,
    pub command_text: String,
}

#[derive(Debug, Clone)]
pub struct Launcher {
    profiles_dir: PathBuf,
    home_dir: PathBuf,
    bin_dir: PathBuf,
    launcher: String,
}

impl Launcher {
    pub fn new(paths: &AppPaths, settings: &Settings) -> Self {
        Self {
            profiles_dir: paths.profiles_dir().to_path_buf(),
            home_dir: paths.home_dir().to_path_buf(),
            bin_dir: paths.bin_dir(),
            launcher: settings.launcher().to_string(),
        }
    }

    pub fn game_plan(&self, request: &LaunchRequest, base: Environment) -> AppResult<LaunchPlan> {
        let prefix = profile::read_prefix(&self.profiles_dir.join(&request.profile_file))?;
        tracing::debug!(prefix = %prefix.display(), "resolved prefix");

        let env = build_environment(base, &prefix, &self.bin_dir);
        Ok(plan::game_plan(
            &request.command_text,
            &self.launcher,
            &request.profile_file,
            &self.profiles_dir,
            env,
        ))
    }

    pub fn task_plan(
        &self,
        command: &str,
        profile_file: &str,
        base: Environment,
    ) -> AppResult<Option<LaunchPlan>> {
        if profile_file.is_empty() {
            tracing::info!("no game selected");
            return Ok(None);
        }

        let prefix = profile::read_prefix(&self.profiles_dir.join(profile_file))?;
        tracing::debug!(prefix = %prefix.display(), "resolved prefix");

        let env = env::with_prefix(base, &prefix);
        Ok(Some(plan::task_plan(command, &self.home_dir, env)))
    }

    pub fn run_game(&self, request: &LaunchRequest) -> AppResult<RunningProcess> {
        tracing::info!(profile = %request.profile_file, "launching game");
        let plan = self.game_plan(request, env::inherited())?;
        process::spawn(&plan)
    }

    pub fn run_task(&self, command: &str, profile_file: &str) -> AppResult<Option<RunningProcess>> {
        let Some(plan) = self.task_plan(command, profile_file, env::inherited())? else {
            return Ok(None);
        };

        tracing::info!(profile = profile_file, "starting {command}, close it manually when finished");
        process::spawn(&plan).map(Some)
    }
}
