pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod reminders;
pub mod tasks;
pub mod util;

use crate::config::Config;
use crate::error::Result;
use crate::reminders::{ReminderRepository, SqliteReminderRepository};
use crate::tasks::ReminderScheduler;
use crate::util::SystemClock;
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::watch;

/// Shared state handed to every request handler.
pub struct Data {
    pub repository: Arc<dyn ReminderRepository>,
    pub app_version: String,
    pub environment: String,
}

/// Opens the store, starts the scheduler and serves the API until
/// `shutdown` resolves, then stops the scheduler between passes.
pub async fn run_with_shutdown<F>(config: Config, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let repository: Arc<dyn ReminderRepository> =
        Arc::new(SqliteReminderRepository::connect(&config.database_url).await?);
    let listener = TcpListener::bind(&config.bind_addr).await?;

    let clock = Arc::new(SystemClock::new(config.utc_offset));
    let scheduler = ReminderScheduler::new(repository.clone(), clock, config.poll_interval);
    let (stop_tx, stop_rx) = watch::channel(false);
    let scheduler_handle = tokio::spawn(scheduler.task_handler(stop_rx));

    let data = Arc::new(Data {
        repository,
        app_version: config.app_version.clone(),
        environment: config.environment.clone(),
    });
    tracing::info!(addr = %config.bind_addr, environment = %config.environment, "Reminder API listening");
    let served = axum::serve(listener, commands::router(data))
        .with_graceful_shutdown(shutdown)
        .await;

    let _ = stop_tx.send(true);
    if let Err(err) = scheduler_handle.await {
        tracing::warn!("scheduler task ended abnormally: {err}");
    }
    served?;
    Ok(())
}
