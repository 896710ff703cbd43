use super::{NewReminder, RemindTime, Reminder};
use crate::error::{ReminderError, Result};
use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{query, query_as, FromRow, SqlitePool};
use std::str::FromStr;

/// The only way the API and the scheduler touch the reminders table.
///
/// Every method is a single statement against the store, so callers on
/// either side of the concurrency boundary never observe a half-written row.
#[async_trait]
pub trait ReminderRepository: Send + Sync {
    /// Validates and persists a new, untriggered reminder.
    async fn insert(&self, message: &str, remind_time: &str) -> Result<i64> {
        let reminder = NewReminder::validate(message, remind_time)?;
        self.insert_new(reminder).await
    }

    async fn insert_new(&self, reminder: NewReminder) -> Result<i64>;

    async fn list_all(&self) -> Result<Vec<Reminder>>;

    /// Reminders whose minute is exactly `as_of` and which have not fired.
    /// A minute that no poll pass observes is never caught up on.
    async fn select_due_untriggered(&self, as_of: RemindTime) -> Result<Vec<Reminder>>;

    async fn mark_triggered(&self, id: i64) -> Result<()>;

    async fn ping(&self) -> Result<()>;
}

#[derive(FromRow)]
struct ReminderRow {
    id: i64,
    message: String,
    remind_time: String,
    triggered: bool,
    created_at: String,
}

#[derive(Debug, Clone)]
pub struct SqliteReminderRepository {
    pool: SqlitePool,
}

impl SqliteReminderRepository {
    pub async fn connect(database_url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new().connect_with(options).await?;
        Self::from_pool(pool).await
    }

    pub async fn from_pool(pool: SqlitePool) -> Result<Self> {
        sqlx::migrate!().run(&pool).await?;
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl ReminderRepository for SqliteReminderRepository {
    async fn insert_new(&self, reminder: NewReminder) -> Result<i64> {
        let remind_time = reminder.remind_time.to_string();
        let id = query("INSERT INTO reminders (message, remind_time) VALUES (?, ?)")
            .bind(&reminder.message)
            .bind(&remind_time)
            .execute(&self.pool)
            .await?
            .last_insert_rowid();
        tracing::debug!(id, %remind_time, "reminder stored");
        Ok(id)
    }

    async fn list_all(&self) -> Result<Vec<Reminder>> {
        let rows = query_as::<_, ReminderRow>(
            "SELECT id, message, remind_time, triggered, created_at FROM reminders ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(readable_rows(rows))
    }

    async fn select_due_untriggered(&self, as_of: RemindTime) -> Result<Vec<Reminder>> {
        let rows = query_as::<_, ReminderRow>(
            "SELECT id, message, remind_time, triggered, created_at FROM reminders \
            WHERE remind_time = ? AND triggered = 0 ORDER BY id",
        )
        .bind(as_of.to_string())
        .fetch_all(&self.pool)
        .await?;
        Ok(readable_rows(rows))
    }

    async fn mark_triggered(&self, id: i64) -> Result<()> {
        let updated = query("UPDATE reminders SET triggered = 1 WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected();
        if updated == 0 {
            return Err(ReminderError::NotFound(id));
        }
        Ok(())
    }

    async fn ping(&self) -> Result<()> {
        query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

/// Drops rows that were not written through `insert`, e.g. unpadded
/// `2030-1-1 9:00` times left in an older `reminders.db`.
fn readable_rows(rows: Vec<ReminderRow>) -> Vec<Reminder> {
    rows.into_iter()
        .filter_map(|row| match map_row(row) {
            Ok(reminder) => Some(reminder),
            Err(err) => {
                tracing::warn!("skipping stored reminder: {err}");
                None
            }
        })
        .collect()
}

fn map_row(row: ReminderRow) -> Result<Reminder> {
    let remind_time = RemindTime::parse(&row.remind_time)
        .map_err(|_| ReminderError::Corrupt { id: row.id, value: row.remind_time.clone() })?;
    Ok(Reminder {
        id: row.id,
        message: row.message,
        remind_time,
        triggered: row.triggered,
        created_at: row.created_at,
    })
}
