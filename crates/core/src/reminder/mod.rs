pub mod delete_reminder;
pub mod reminder_set;
pub mod toggle_reminder;

pub use delete_reminder::DeleteReminderUseCase;
pub use reminder_set::ReminderSet;
pub use toggle_reminder::ToggleReminderUseCase;
