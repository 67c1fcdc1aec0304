use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("unable to read profile {}: {source}", path.display())]
    ProfileUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("profile {} has no `{field}` entry", path.display())]
    FieldMissing { path: PathBuf, field: &'static str },
    #[error("unable to scan profile directory {}: {source}", path.display())]
    ProfileDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("unknown profile: {0}")]
    UnknownProfile(String),
    #[error("failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },
    #[error("kill sweep failed: {0}")]
    KillSweep(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
