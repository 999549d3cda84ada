use murmur_domain::ReminderRecord;

/// Renders the ringing alarm to the user: sound, speech synthesis, a modal,
/// whatever the client owns. External collaborator: the core depends only
/// on this contract and a presenter failure never affects the alarm state.
#[async_trait::async_trait]
pub trait AlarmPresenter: Send + Sync {
    /// Invoked at most once per ringing episode
    async fn on_alarm(&self, reminder: &ReminderRecord) -> anyhow::Result<()>;
}

/// Presenter for running headless: alarms only show up in the logs
#[derive(Debug, Default)]
pub struct TracingAlarmPresenter;

#[async_trait::async_trait]
impl AlarmPresenter for TracingAlarmPresenter {
    async fn on_alarm(&self, reminder: &ReminderRecord) -> anyhow::Result<()> {
        tracing::info!("Reminder: {}", reminder.title);
        Ok(())
    }
}
