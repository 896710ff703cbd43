use crate::error::Result;
use crate::reminders::{RemindTime, ReminderRepository};
use crate::util::Clock;
use chrono::{DateTime, FixedOffset};
use serde::Serialize;
use tokio::sync::broadcast;
use tracing;

/// Emitted once per reminder the moment it fires.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TriggerEvent {
    pub id: i64,
    pub message: String,
    pub remind_time: RemindTime,
    pub fired_at: DateTime<FixedOffset>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassReport {
    pub as_of: RemindTime,
    /// Every reminder a trigger event was emitted for, in selection order.
    pub fired: Vec<i64>,
    /// Fired reminders whose triggered flag could not be written.
    pub mark_failures: Vec<i64>,
}

/// One poll pass: fire everything due at the current minute.
///
/// A failure to select aborts the pass before anything is touched. Each
/// reminder after that is its own unit of work, so a failed mark is logged
/// and the rest of the batch still fires.
pub async fn check_reminders(
    repository: &dyn ReminderRepository, clock: &dyn Clock,
    events: &broadcast::Sender<TriggerEvent>,
) -> Result<PassReport> {
    let now = clock.now();
    let as_of = RemindTime::from_datetime(&now);
    let due = repository.select_due_untriggered(as_of).await?;

    let mut report = PassReport { as_of, fired: Vec::with_capacity(due.len()), mark_failures: Vec::new() };
    for reminder in due {
        tracing::info!(
            reminder_id = reminder.id,
            remind_time = %reminder.remind_time,
            "Reminder triggered: {}",
            reminder.message
        );
        // nobody listening is fine, the log line is the event of record
        let _ = events.send(TriggerEvent {
            id: reminder.id,
            message: reminder.message,
            remind_time: reminder.remind_time,
            fired_at: now,
        });
        report.fired.push(reminder.id);

        if let Err(err) = repository.mark_triggered(reminder.id).await {
            tracing::warn!(reminder_id = reminder.id, "{err}, reminder will not be marked as triggered");
            report.mark_failures.push(reminder.id);
        }
    }
    Ok(report)
}
