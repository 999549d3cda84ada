use crate::shared::usecase::UseCase;
use murmur_domain::{ReminderRecord, ID};
use murmur_infra::MurmurContext;

/// Removes a reminder from the store. Connected clients observe the delete
/// through the change feed.
#[derive(Debug)]
pub struct DeleteReminderUseCase {
    pub reminder_id: ID,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseErrors {
    NotFound(ID),
}

#[async_trait::async_trait]
impl UseCase for DeleteReminderUseCase {
    type Response = ReminderRecord;

    type Errors = UseCaseErrors;

    async fn execute(&mut self, ctx: &MurmurContext) -> Result<Self::Response, Self::Errors> {
        ctx.repos
            .reminders
            .delete(&self.reminder_id)
            .await
            .ok_or_else(|| UseCaseErrors::NotFound(self.reminder_id.clone()))
    }
}
