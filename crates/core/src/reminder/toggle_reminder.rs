use crate::shared::usecase::UseCase;
use murmur_domain::{ReminderRecord, ID};
use murmur_infra::MurmurContext;

/// Flips a reminder between active and dormant
#[derive(Debug)]
pub struct ToggleReminderUseCase {
    pub reminder_id: ID,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseErrors {
    NotFound(ID),
    StorageError,
}

#[async_trait::async_trait]
impl UseCase for ToggleReminderUseCase {
    type Response = ReminderRecord;

    type Errors = UseCaseErrors;

    async fn execute(&mut self, ctx: &MurmurContext) -> Result<Self::Response, Self::Errors> {
        let mut reminder = ctx
            .repos
            .reminders
            .find(&self.reminder_id)
            .await
            .ok_or_else(|| UseCaseErrors::NotFound(self.reminder_id.clone()))?;

        reminder.is_active = !reminder.is_active;

        ctx.repos
            .reminders
            .save(&reminder)
            .await
            .map_err(|_| UseCaseErrors::StorageError)?;

        Ok(reminder)
    }
}
