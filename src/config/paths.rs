use std::env;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{AppError, AppResult};

const APP_DIR: &str = "awu";
const PROFILES_DIR: &str = "umu-conf";
const PROTON_DIR: &str = "proton";

#[derive(Debug, Clone)]
pub struct AppPaths {
    config_root: PathBuf,
    app_dir: PathBuf,
    profiles_dir: PathBuf,
    proton_dir: PathBuf,
    home_dir: PathBuf,
}

impl AppPaths {
    pub fn discover(config_root: Option<PathBuf>) -> AppResult<Self> {
        let home_dir = dirs::home_dir()
            .ok_or_else(|| AppError::Config("unable to resolve home directory".to_string()))?;
        let config_root = match config_root {
            Some(root) => root,
            None => config_root_from(|key| env::var_os(key)).ok_or_else(|| {
                AppError::Config("neither XDG_CONFIG_HOME nor HOME is set".to_string())
            })?,
        };

        Ok(Self::new(config_root, home_dir))
    }

    pub fn new(config_root: PathBuf, home_dir: PathBuf) -> Self {
        let app_dir = config_root.join(APP_DIR);
        let profiles_dir = app_dir.join(PROFILES_DIR);
        let proton_dir = app_dir.join(PROTON_DIR);

        Self {
            config_root,
            app_dir,
            profiles_dir,
            proton_dir,
            home_dir,
        }
    }

    pub fn ensure(&self) -> AppResult<()> {
        for dir in [&self.app_dir, &self.profiles_dir, &self.proton_dir] {
            if !dir.is_dir() {
                tracing::debug!(dir = %dir.display(), "creating directory");
                fs::create_dir_all(dir)?;
            }
        }
        Ok(())
    }

    pub fn profile_file(&self, file_name: &str) -> PathBuf {
        self.profiles_dir.join(file_name)
    }

    pub fn settings_file(&self) -> PathBuf {
        self.app_dir.join("settings.json")
    }

    pub fn bin_dir(&self) -> PathBuf {
        self.config_root.join(".local").join("bin")
    }

    pub fn config_root(&self) -> &Path {
        &self.config_root
    }

    pub fn profiles_dir(&self) -> &Path {
        &self.profiles_dir
    }

    pub fn proton_dir(&self) -> &Path {
        &self.proton_dir
    }

    pub fn home_dir(&self) -> &Path {
        &self.home_dir
    }
}

pub fn config_root_from<F>(lookup: F) -> Option<PathBuf>
where
    F: Fn(&str) -> Option<OsString>,
{
    let non_empty = |key: &str| lookup(key).filter(|value| !value.is_empty());

    if let Some(xdg) = non_empty("XDG_CONFIG_HOME") {
        return Some(PathBuf::from(xdg));
    }

    non_empty("HOME").map(|home| PathBuf::from(home).join(".config"))
}
