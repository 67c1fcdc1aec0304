use crate::config::ProfileRegistry;
use crate::context::AppContext;
use crate::error::AppResult;
use crate::output::OutputMode;

pub fn run(ctx: &AppContext) -> AppResult<()> {
    let registry = ctx.profiles()?;

    if ctx.output.mode() == OutputMode::Text && registry.is_empty() {
        println!(
            "0 profiles in {}",
            ctx.paths.profiles_dir().display()
        );
        return Ok(());
    }

    ctx.output.emit_lines(format_entries(&registry), &registry)
}

fn format_entries(registry: &ProfileRegistry) -> Vec<String> {
    registry
        .entries()
        .iter()
        .enumerate()
        .map(|(index, entry)| format!("{}. {} ({})", index + 1, entry.name, entry.file_name))
        .collect()
}
