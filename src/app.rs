use crate::cli::{Cli, Command};
use crate::commands;
use crate::context::AppContext;
use crate::error::AppResult;

pub async fn run(cli: Cli) -> AppResult<()> {
    let Cli {
        config_root,
        json,
        verbose,
        command,
    } = cli;

    let ctx = AppContext::bootstrap(config_root, json, verbose)?;

    match command {
        Command::Init => commands::init::run(&ctx),
        Command::List => commands::list::run(&ctx),
        Command::Show(args) => commands::show::run(&ctx, args),
        Command::Launch(args) => commands::launch::run(&ctx, args).await,
        Command::Task(args) => commands::task::run(&ctx, args).await,
        Command::Kill => commands::kill::run(&ctx).await,
    }
}
