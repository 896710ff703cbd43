use crate::error::Result;
use crate::reminders::ReminderRepository;
use crate::util::Clock;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, watch};
use tokio::time::interval;

pub use reminders::{check_reminders, PassReport, TriggerEvent};

mod reminders;

const EVENT_CAPACITY: usize = 64;
const MIN_POLL_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    /// Sleeping until the next tick.
    Idle,
    /// Running a poll pass.
    Polling,
}

/// The single background loop that fires due reminders.
///
/// It shares nothing with the API in-process; both sides only meet in the
/// store through the repository.
pub struct ReminderScheduler {
    repository: Arc<dyn ReminderRepository>,
    clock: Arc<dyn Clock>,
    poll_interval: Duration,
    events: broadcast::Sender<TriggerEvent>,
    state: watch::Sender<SchedulerState>,
}

impl ReminderScheduler {
    pub fn new(
        repository: Arc<dyn ReminderRepository>, clock: Arc<dyn Clock>, poll_interval: Duration,
    ) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        let (state, _) = watch::channel(SchedulerState::Idle);
        // a zero period would make `interval` panic
        let poll_interval = poll_interval.max(MIN_POLL_INTERVAL);
        Self { repository, clock, poll_interval, events, state }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<TriggerEvent> {
        self.events.subscribe()
    }

    pub fn state(&self) -> watch::Receiver<SchedulerState> {
        self.state.subscribe()
    }

    /// Runs one pass, `Idle -> Polling -> Idle` whatever the outcome.
    pub async fn poll_pass(&self) -> Result<PassReport> {
        self.state.send_replace(SchedulerState::Polling);
        let report = check_reminders(self.repository.as_ref(), self.clock.as_ref(), &self.events).await;
        self.state.send_replace(SchedulerState::Idle);
        report
    }

    /// Polls once per interval until `stop` flips to `true` or its sender is
    /// dropped. A failed pass is logged and the next tick is the retry.
    pub async fn task_handler(self, mut stop: watch::Receiver<bool>) {
        let mut reminder_interval = interval(self.poll_interval);
        tracing::info!(interval_secs = self.poll_interval.as_secs(), "reminder scheduler started");
        loop {
            if *stop.borrow_and_update() {
                break;
            }
            tokio::select! {
                _ = reminder_interval.tick() => {}
                changed = stop.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    continue;
                }
            }

            match self.poll_pass().await {
                Ok(report) if !report.fired.is_empty() => tracing::debug!(
                    as_of = %report.as_of,
                    fired = report.fired.len(),
                    mark_failures = report.mark_failures.len(),
                    "poll pass finished"
                ),
                Ok(_) => {}
                Err(err) => tracing::warn!("poll pass aborted, retrying next tick: {err}"),
            }
        }
        tracing::info!("reminder scheduler stopped");
    }
}
