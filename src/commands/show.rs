use serde::Serialize;

use crate::cli::ShowArgs;
use crate::config::{ArgsSetting, profile};
use crate::context::AppContext;
use crate::error::{AppError, AppResult};

#[derive(Debug, Serialize)]
struct ProfileView {
    name: String,
    file_name: String,
    prefix: Option<String>,
    awu_args: ArgsSetting,
}

pub fn run(ctx: &AppContext, args: ShowArgs) -> AppResult<()> {
    let entry = ctx.select_profile(&args.profile)?;
    let path = ctx.paths.profile_file(&entry.file_name);

    let prefix = match profile::read_prefix(&path) {
        Ok(prefix) => Some(prefix.to_string_lossy().into_owned()),
        Err(AppError::FieldMissing { .. }) => None,
        Err(err) => return Err(err),
    };
    let awu_args = profile::read_args(&path)?;

    let lines = [
        format!("name: {}", entry.name),
        format!("file: {}", path.display()),
        format!("prefix: {}", prefix.as_deref().unwrap_or("(missing)")),
        format!("command: {}", describe_args(&awu_args)),
    ];
    let view = ProfileView {
        name: entry.name,
        file_name: entry.file_name,
        prefix,
        awu_args,
    };
    ctx.output.emit_lines(lines, &view)
}

fn describe_args(setting: &ArgsSetting) -> &str {
    match setting {
        ArgsSetting::Missing | ArgsSetting::NoArgs => "(none)",
        ArgsSetting::Text(text) => text,
    }
}
