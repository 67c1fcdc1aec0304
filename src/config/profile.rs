use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::{AppError, AppResult};

pub const NAME_FIELD: &str = "name";
pub const PREFIX_FIELD: &str = "prefix";
pub const ARGS_FIELD: &str = "awu_args";

const NO_ARGS: &str = "none";
const PROFILE_EXTENSION: &str = "toml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "value", rename_all = "snake_case")]
pub enum ArgsSetting {
    Missing,
    NoArgs,
    Text(String),
}

impl ArgsSetting {
    pub fn from_value(value: Option<String>) -> Self {
        match value {
            None => Self::Missing,
            Some(value) if value == NO_ARGS => Self::NoArgs,
            Some(value) => Self::Text(value),
        }
    }

    pub fn command_text(&self) -> &str {
        match self {
            Self::Text(text) => text,
            Self::Missing | Self::NoArgs => "",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileEntry {
    pub name: String,
    pub file_name: String,
}

impl ProfileEntry {
    fn stem(&self) -> &str {
        self.file_name
            .strip_suffix(".toml")
            .unwrap_or(&self.file_name)
    }
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct ProfileRegistry {
    entries: Vec<ProfileEntry>,
}

impl ProfileRegistry {
    pub fn discover(dir: &Path) -> AppResult<Self> {
        let profile_dir_error = |source| AppError::ProfileDir {
            path: dir.to_path_buf(),
            source,
        };

        let mut files = Vec::new();
        for entry in fs::read_dir(dir).map_err(profile_dir_error)? {
            let entry = entry.map_err(profile_dir_error)?;
            let path = entry.path();
            let is_profile = path.extension().is_some_and(|ext| ext == PROFILE_EXTENSION);
            if is_profile && path.is_file() {
                files.push(path);
            }
        }
        files.sort();

        let mut entries = Vec::with_capacity(files.len());
        for path in files {
            let Some(file_name) = path.file_name().and_then(|name| name.to_str()) else {
                tracing::warn!(path = %path.display(), "skipping profile with non utf-8 file name");
                continue;
            };

            match read_field(&path, NAME_FIELD) {
                Ok(Some(name)) => entries.push(ProfileEntry {
                    name,
                    file_name: file_name.to_string(),
                }),
                Ok(None) => {
                    tracing::debug!(file = file_name, "skipping profile without a name line");
                }
                Err(err) => tracing::warn!("skipping profile: {err}"),
            }
        }

        Ok(Self { entries })
    }

    pub fn resolve(&self, query: &str) -> Option<&ProfileEntry> {
        let query = query.trim();
        self.entries
            .iter()
            .find(|entry| entry.name == query)
            .or_else(|| self.entries.iter().find(|entry| entry.file_name == query))
            .or_else(|| self.entries.iter().find(|entry| entry.stem() == query))
    }

    pub fn entries(&self) -> &[ProfileEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Reads the first `field = "value"` line of a profile file.
///
/// Only the key before the first `=` is compared; the value is trimmed and
/// stripped of every `"`. Absent fields are `Ok(None)`, unreadable files are
/// [`AppError::ProfileUnreadable`].
pub fn read_field(path: &Path, field: &str) -> AppResult<Option<String>> {
    let unreadable = |source| AppError::ProfileUnreadable {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = BufReader::new(File::open(path).map_err(unreadable)?);
    let mut buf = Vec::new();
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf).map_err(unreadable)? == 0 {
            return Ok(None);
        }

        // Non UTF-8 comments must not hide the keys after them.
        if let Some(value) = field_value(&String::from_utf8_lossy(&buf), field) {
            return Ok(Some(value));
        }
    }
}

fn field_value(line: &str, field: &str) -> Option<String> {
    let line = line.trim();
    if !line.starts_with(field) {
        return None;
    }

    let (key, value) = line.split_once('=')?;
    if key.trim() != field {
        return None;
    }

    Some(value.trim().replace('"', ""))
}

pub fn read_args(path: &Path) -> AppResult<ArgsSetting> {
    read_field(path, ARGS_FIELD).map(ArgsSetting::from_value)
}

pub fn read_prefix(path: &Path) -> AppResult<PathBuf> {
    read_field(path, PREFIX_FIELD)?
        .filter(|prefix| !prefix.is_empty())
        .map(PathBuf::from)
        .ok_or_else(|| AppError::FieldMissing {
            path: path.to_path_buf(),
            field: PREFIX_FIELD,
        })
}
