use crate::api::{self, ApiState};
use crate::app::AppContext;
use crate::output::Output;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use std::net::SocketAddr;
use tokio_cron_scheduler::{Job, JobScheduler};
use tracing::{error, info, warn};
use watchsync_core::{SyncRunner, TriggerOutcome};

/// Cron-driven passes through the shared runner
pub struct Scheduler {
    scheduler: JobScheduler,
}

impl Scheduler {
    pub async fn new(runner: SyncRunner, schedule: &str) -> Result<Self> {
        let scheduler = JobScheduler::new().await?;

        let job = Job::new_async(schedule, move |_uuid, _lock| {
            let runner = runner.clone();
            Box::pin(async move {
                info!(operation = "scheduled_sync_start", "Starting scheduled sync");
                match runner.run_exclusive().await {
                    Some(Ok(counters)) => info!(
                        operation = "scheduled_sync_complete",
                        processed = counters.processed,
                        added = counters.added,
                        skipped = counters.skipped,
                        "Scheduled sync completed"
                    ),
                    Some(Err(e)) => warn!(
                        operation = "scheduled_sync_aborted",
                        error = %e,
                        "Scheduled sync did not run"
                    ),
                    None => warn!(
                        operation = "scheduled_sync_skipped",
                        "Previous sync still running, skipping scheduled tick"
                    ),
                }
            })
        })
        .map_err(|e| eyre!("Invalid schedule '{}': {}", schedule, e))?;

        scheduler.add(job).await?;
        Ok(Self { scheduler })
    }

    pub async fn start(&self) -> Result<()> {
        self.scheduler.start().await?;
        Ok(())
    }

    pub async fn shutdown(&mut self) -> Result<()> {
        self.scheduler.shutdown().await?;
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!(operation = "daemon_shutdown", "Shutdown signal received");
}

pub async fn run_daemon(
    bind: SocketAddr,
    schedule: String,
    no_startup_sync: bool,
    item_delay_ms: u64,
    output: &Output,
) -> Result<()> {
    let ctx = AppContext::open()?;
    let runner = ctx.runner(item_delay_ms)?;
    runner.log().info("Application starting...");

    info!(
        operation = "daemon_start",
        bind = %bind,
        schedule = %schedule,
        config_dir = %ctx.paths.config_dir().display(),
        "Starting daemon"
    );

    let mut scheduler = Scheduler::new(runner.clone(), &schedule).await?;
    scheduler.start().await?;

    if !no_startup_sync {
        info!(operation = "scheduler_startup", "Running initial sync on startup");
        if runner.trigger() == TriggerOutcome::AlreadyRunning {
            warn!("Initial sync skipped, a pass is already running");
        }
    }

    let state = ApiState {
        config_store: ctx.config_store.clone(),
        runner: runner.clone(),
    };
    let listener = tokio::net::TcpListener::bind(bind)
        .await
        .map_err(|e| eyre!("Failed to bind {}: {}", bind, e))?;
    output.success(format!("Control surface listening on http://{}", bind));

    axum::serve(listener, api::router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    scheduler.shutdown().await?;
    if runner.is_running() {
        warn!("Exiting while a sync pass is in flight");
    }
    Ok(())
}

