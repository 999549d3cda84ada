use crate::shared::usecase::{Subscriber, UseCase};
use murmur_domain::{parse_voice_command, ReminderRecord};
use murmur_infra::MurmurContext;
use tracing::info;

/// Turns one spoken transcript into a persisted `ReminderRecord`. The
/// reminder set picks the new record up through the store's change feed,
/// never from here.
#[derive(Debug)]
pub struct AddReminderUseCase {
    pub user_id: String,
    pub transcript: String,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseErrors {
    /// Nothing was left for a title once the time phrase and keywords were
    /// stripped. Recoverable: prompt the user to speak again.
    NoTitleHeard,
    StorageError,
}

#[async_trait::async_trait]
impl UseCase for AddReminderUseCase {
    type Response = ReminderRecord;

    type Errors = UseCaseErrors;

    async fn execute(&mut self, ctx: &MurmurContext) -> Result<Self::Response, Self::Errors> {
        let command = parse_voice_command(&self.transcript, ctx.sys.now());
        if command.title.is_empty() {
            return Err(UseCaseErrors::NoTitleHeard);
        }

        let reminder = ReminderRecord::new(
            self.user_id.clone(),
            command.title,
            command.trigger_time,
            command.repeat,
        );

        ctx.repos
            .reminders
            .insert(&reminder)
            .await
            .map_err(|_| UseCaseErrors::StorageError)?;

        Ok(reminder)
    }

    fn subscribers() -> Vec<Box<dyn Subscriber<Self>>> {
        vec![Box::new(ConfirmScheduledReminder)]
    }
}

/// Spoken/visual confirmation is presenter territory; the core only logs
struct ConfirmScheduledReminder;

#[async_trait::async_trait]
impl Subscriber<AddReminderUseCase> for ConfirmScheduledReminder {
    async fn notify(&self, reminder: &ReminderRecord, _ctx: &MurmurContext) {
        info!(
            "Scheduled reminder \"{}\" for {}",
            reminder.title, reminder.trigger_time
        );
    }
}
