pub mod paths;
pub mod profile;
pub mod settings;

pub use paths::AppPaths;
pub use profile::{ArgsSetting, ProfileEntry, ProfileRegistry};
pub use settings::Settings;

use crate::error::AppResult;

pub fn load_settings(paths: &AppPaths) -> AppResult<Settings> {
    settings::load(&paths.settings_file())
}
