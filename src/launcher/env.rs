use std::collections::BTreeMap;
use std::env;
use std::ffi::OsString;
use std::path::Path;

pub const WINEPREFIX: &str = "WINEPREFIX";
pub const PATH: &str = "PATH";

pub type Environment = BTreeMap<OsString, OsString>;

pub fn inherited() -> Environment {
    env::vars_os().collect()
}

pub fn with_prefix(mut base: Environment, prefix: &Path) -> Environment {
    base.insert(WINEPREFIX.into(), prefix.as_os_str().to_owned());
    base
}

pub fn build_environment(base: Environment, prefix: &Path, extra_path_segment: &Path) -> Environment {
    let mut env = with_prefix(base, prefix);

    let path = match env.remove(&OsString::from(PATH)) {
        Some(mut path) if !path.is_empty() => {
            path.push(":");
            path.push(extra_path_segment);
            path
        }
        _ => extra_path_segment.as_os_str().to_owned(),
    };
    env.insert(PATH.into(), path);

    env
}
