use crate::cli::LaunchArgs;
use crate::config::{ArgsSetting, profile};
use crate::context::AppContext;
use crate::error::AppResult;
use crate::launcher::LaunchRequest;

pub async fn run(ctx: &AppContext, args: LaunchArgs) -> AppResult<()> {
    let entry = ctx.select_profile(&args.profile)?;
    let defaults = profile::read_args(&ctx.paths.profile_file(&entry.file_name))?;

    let request = LaunchRequest {
        command_text: command_text(args.command.as_deref(), &defaults),
        profile_file: entry.file_name,
    };
    let process = ctx.launcher.run_game(&request)?;
    let report = process.wait().await?;

    let text = format!("{}: {}", entry.name, describe_exit(report.code, report.signal));
    ctx.output.emit(&text, &report)
}

fn command_text(explicit: Option<&str>, defaults: &ArgsSetting) -> String {
    match explicit {
        Some(text) => text.trim().to_string(),
        None => defaults.command_text().to_string(),
    }
}

fn describe_exit(code: Option<i32>, signal: Option<i32>) -> String {
    match (code, signal) {
        (Some(0), _) => "exited normally".to_string(),
        (Some(code), _) => format!("exited with code {code}"),
        (None, Some(signal)) => format!("terminated by signal {signal}"),
        (None, None) => "terminated abnormally".to_string(),
    }
}
