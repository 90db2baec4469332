use crate::app::AppContext;
use crate::output::Output;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use serde_json::json;
use watchsync_core::SyncError;

fn describe_abort(e: &SyncError) -> String {
    match e {
        SyncError::InvalidConfig(_) => format!("{}. Run `watchsync config set` first.", e),
        SyncError::ConfigUnavailable(_) => e.to_string(),
    }
}

pub async fn run_sync(item_delay_ms: u64, output: &Output) -> Result<()> {
    tracing::debug!("Sync command started");

    let ctx = AppContext::open()?;
    let runner = ctx.runner(item_delay_ms)?;

    let counters = match runner.run_exclusive().await {
        Some(Ok(counters)) => counters,
        Some(Err(e)) => {
            output.error(describe_abort(&e));
            return Err(eyre!("Sync did not run"));
        }
        None => return Err(eyre!("Sync already in progress")),
    };

    if output.is_human() {
        output.success(format!(
            "Sync complete: {} processed, {} added, {} skipped",
            counters.processed, counters.added, counters.skipped
        ));
    } else {
        output.json(&json!({
            "type": "sync_complete",
            "processed": counters.processed,
            "added": counters.added,
            "skipped": counters.skipped,
        }));
    }
    Ok(())
}
