use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::AppResult;

pub const DEFAULT_LAUNCHER: &str = "umu-run";
pub const DEFAULT_SHELL: &str = "/bin/bash";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub launcher: Option<String>,
    #[serde(default)]
    pub shell: Option<String>,
}

impl Settings {
    pub fn launcher(&self) -> &str {
        non_blank(self.launcher.as_deref()).unwrap_or(DEFAULT_LAUNCHER)
    }

    pub fn shell(&self) -> &str {
        non_blank(self.shell.as_deref()).unwrap_or(DEFAULT_SHELL)
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

pub fn load(path: &Path) -> AppResult<Settings> {
    if !path.exists() {
        return Ok(Settings::default());
    }

    let raw = fs::read_to_string(path)?;
    let settings = serde_json::from_str(&raw)?;
    Ok(settings)
}
