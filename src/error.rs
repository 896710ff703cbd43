use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReminderError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("reminder {0} not found")]
    NotFound(i64),
    #[error("reminder {id} has unreadable remind_time `{value}`")]
    Corrupt { id: i64, value: String },
    #[error("storage unavailable: {0}")]
    StorageUnavailable(#[from] sqlx::Error),
    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
    #[error("configuration error: {0}")]
    Config(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ReminderError>;
