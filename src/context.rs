use std::path::PathBuf;

use crate::config::{self, AppPaths, ProfileEntry, ProfileRegistry, Settings};
use crate::error::{AppError, AppResult};
use crate::launcher::Launcher;
use crate::output::Output;

#[derive(Debug)]
pub struct AppContext {
    pub verbose: u8,
    pub paths: AppPaths,
    pub settings: Settings,
    pub launcher: Launcher,
    pub output: Output,
}

impl AppContext {
    pub fn bootstrap(config_root: Option<PathBuf>, json: bool, verbose: u8) -> AppResult<Self> {
        let paths = AppPaths::discover(config_root)?;
        paths.ensure()?;
        let settings = config::load_settings(&paths)?;
        let launcher = Launcher::new(&paths, &settings);
        let output = Output::new(json);

        Ok(Self {
            verbose,
            paths,
            settings,
            launcher,
            output,
        })
    }

    pub fn profiles(&self) -> AppResult<ProfileRegistry> {
        ProfileRegistry::discover(self.paths.profiles_dir())
    }

    pub fn select_profile(&self, query: &str) -> AppResult<ProfileEntry> {
        let registry = self.profiles()?;
        registry
            .resolve(query)
            .cloned()
            .ok_or_else(|| AppError::UnknownProfile(format!("{query}. run `awu list` to see profiles")))
    }
}
