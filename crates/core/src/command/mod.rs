pub mod add_reminder;

pub use add_reminder::AddReminderUseCase;
