use crate::alarm::{AlarmPresenter, AlarmScheduler};
use chrono::Duration;
use murmur_infra::MurmurContext;
use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::interval;
use tracing::{error, warn};

/// Handles to the two background jobs
pub struct JobHandles {
    poll_job: JoinHandle<()>,
    sync_job: JoinHandle<()>,
}

impl JobHandles {
    /// Stops the poll timer and the change feed consumer as a single
    /// teardown step. No callback runs after this returns.
    pub fn shutdown(self) {
        self.poll_job.abort();
        self.sync_job.abort();
    }
}

pub fn start_job_schedulers(
    ctx: MurmurContext,
    scheduler: Arc<Mutex<AlarmScheduler>>,
    presenter: Arc<dyn AlarmPresenter>,
) -> JobHandles {
    let poll_job = start_alarm_poll_job(ctx.clone(), scheduler.clone(), presenter);
    let sync_job = start_reminder_sync_job(ctx, scheduler);
    JobHandles { poll_job, sync_job }
}

/// Evaluates due-ness on a fixed cadence. Due reminders are detected within
/// one cadence period of becoming due.
fn start_alarm_poll_job(
    ctx: MurmurContext,
    scheduler: Arc<Mutex<AlarmScheduler>>,
    presenter: Arc<dyn AlarmPresenter>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut poll_interval =
            interval(std::time::Duration::from_secs(ctx.config.poll_interval_secs));
        let detection_window = Duration::seconds(ctx.config.detection_window_secs);
        loop {
            poll_interval.tick().await;

            let now = ctx.sys.now();
            let due = scheduler.lock().await.poll_tick(now, detection_window);

            // The presenter runs outside the lock. A failing presenter is
            // cosmetic and must not affect the ringing state.
            if let Some(reminder) = due {
                if let Err(e) = presenter.on_alarm(&reminder).await {
                    warn!("Alarm presenter failed for \"{}\": {:?}", reminder.title, e);
                }
            }
        }
    })
}

/// Applies store events to the reminder set in delivery order. A lagged or
/// closed feed is compensated with a full refresh.
fn start_reminder_sync_job(
    ctx: MurmurContext,
    scheduler: Arc<Mutex<AlarmScheduler>>,
) -> JoinHandle<()> {
    // Subscribe before spawning: events published between startup and the
    // task's first poll must be buffered, not dropped.
    let mut events = ctx.repos.reminders.subscribe();
    tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(event) => scheduler.lock().await.apply_event(&event),
                Err(RecvError::Lagged(missed)) => {
                    error!(
                        "Reminder event feed lagged, {} events were missed. Refreshing.",
                        missed
                    );
                    scheduler.lock().await.refresh(&ctx).await;
                }
                Err(RecvError::Closed) => {
                    error!("Reminder event feed closed unexpectedly. Refreshing.");
                    scheduler.lock().await.refresh(&ctx).await;
                    break;
                }
            }
        }
    })
}
