mod check_reminders;

pub use check_reminders::{check_reminders, PassReport, TriggerEvent};
