pub mod alarm;
pub mod command;
mod error;
mod job_schedulers;
pub mod reminder;
pub mod shared;

pub use alarm::{AlarmPresenter, AlarmScheduler, AlarmState, TracingAlarmPresenter};
pub use command::AddReminderUseCase;
pub use error::CoreError;
pub use job_schedulers::JobHandles;
pub use reminder::{DeleteReminderUseCase, ReminderSet, ToggleReminderUseCase};
pub use shared::usecase::execute;

use job_schedulers::start_job_schedulers;
use murmur_infra::MurmurContext;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Wires the alarm scheduler to the store and starts the background jobs
pub struct Application {
    scheduler: Arc<Mutex<AlarmScheduler>>,
    jobs: JobHandles,
}

impl Application {
    pub async fn new(context: MurmurContext, presenter: Arc<dyn AlarmPresenter>) -> Self {
        let scheduler = Arc::new(Mutex::new(AlarmScheduler::new(
            context.config.shared_user_id.clone(),
        )));
        scheduler.lock().await.refresh(&context).await;

        let jobs = start_job_schedulers(context, scheduler.clone(), presenter);

        Self { scheduler, jobs }
    }

    /// The scheduler behind its single mutual-exclusion domain. Presenters
    /// call `dismiss` through this handle.
    pub fn scheduler(&self) -> Arc<Mutex<AlarmScheduler>> {
        self.scheduler.clone()
    }

    /// Stops the poll timer and the change feed consumer as one atomic
    /// teardown step. No callback runs after this returns.
    pub fn shutdown(self) {
        self.jobs.shutdown();
    }
}
