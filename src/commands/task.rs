use crate::cli::TaskArgs;
use crate::context::AppContext;
use crate::error::{AppError, AppResult};

pub async fn run(ctx: &AppContext, args: TaskArgs) -> AppResult<()> {
    let command = args.command.trim();
    if command.is_empty() {
        return Err(AppError::InvalidInput("task command must not be empty".to_string()));
    }

    let entry = ctx.select_profile(&args.profile)?;
    let Some(process) = ctx.launcher.run_task(command, &entry.file_name)? else {
        return Ok(());
    };
    let report = process.wait().await?;

    let text = match report.code {
        Some(code) => format!("{command} finished with exit code {code}"),
        None => format!("{command} terminated abnormally"),
    };
    ctx.output.emit(&text, &report)
}
