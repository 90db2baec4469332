use crate::app::AppContext;
use crate::output::Output;
use color_eyre::eyre::eyre;
use color_eyre::Result;

pub fn run_clear(output: &Output) -> Result<()> {
    let ctx = AppContext::open()?;
    let log_file = ctx.paths.operation_log_file();

    ctx.log
        .clear()
        .map_err(|e| eyre!("Failed to clear operation log at {}: {}", log_file.display(), e))?;
    output.success(format!("Cleared operation log: {}", log_file.display()));
    Ok(())
}
