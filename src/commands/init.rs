use serde::Serialize;

use crate::context::AppContext;
use crate::error::AppResult;

#[derive(Debug, Serialize)]
struct InitView<'a> {
    config_root: &'a str,
    profiles_dir: &'a str,
    proton_dir: &'a str,
}

pub fn run(ctx: &AppContext) -> AppResult<()> {
    let config_root = ctx.paths.config_root().to_string_lossy();
    let profiles_dir = ctx.paths.profiles_dir().to_string_lossy();
    let proton_dir = ctx.paths.proton_dir().to_string_lossy();

    let lines = [
        format!("config root: {config_root}"),
        format!("profiles: {profiles_dir}"),
        format!("proton: {proton_dir}"),
    ];
    let view = InitView {
        config_root: &config_root,
        profiles_dir: &profiles_dir,
        proton_dir: &proton_dir,
    };
    ctx.output.emit_lines(lines, &view)
}
