use crate::context::AppContext;
use crate::error::AppResult;
use crate::launcher::KillSweep;

pub async fn run(ctx: &AppContext) -> AppResult<()> {
    let report = KillSweep::new(ctx.settings.shell()).run().await?;
    ctx.output.emit("kill sweep completed", &report)
}
