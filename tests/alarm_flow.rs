use chrono::{Duration, NaiveDate, NaiveDateTime};
use murmur_core::{execute, AddReminderUseCase, AlarmPresenter, AlarmState, Application};
use murmur_domain::ReminderRecord;
use murmur_infra::{setup_context, FixedTimeSys, MurmurContext};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::time::{sleep, timeout, Duration as StdDuration};

/// Presenter that forwards every fired alarm to the test
struct ChannelPresenter {
    fired: mpsc::UnboundedSender<ReminderRecord>,
}

#[async_trait::async_trait]
impl AlarmPresenter for ChannelPresenter {
    async fn on_alarm(&self, reminder: &ReminderRecord) -> anyhow::Result<()> {
        let _ = self.fired.send(reminder.clone());
        Ok(())
    }
}

fn clock() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2023, 6, 12)
        .unwrap()
        .and_hms_opt(9, 0, 10)
        .unwrap()
}

async fn fast_context(user_id: &str) -> MurmurContext {
    let mut ctx = setup_context().await;
    ctx.config.shared_user_id = user_id.into();
    ctx.config.poll_interval_secs = 1;
    ctx.sys = Arc::new(FixedTimeSys(clock()));
    ctx
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn voice_command_rings_once_and_reschedules_on_dismissal() {
    let now = clock();
    let ctx = fast_context("integration-user").await;

    let (tx, mut fired) = mpsc::unbounded_channel();
    let app = Application::new(ctx.clone(), Arc::new(ChannelPresenter { fired: tx })).await;

    // no time phrase: the reminder triggers immediately
    let reminder = execute(
        AddReminderUseCase {
            user_id: "integration-user".into(),
            transcript: "take pills every day".into(),
        },
        &ctx,
    )
    .await
    .unwrap();

    let ringing = timeout(StdDuration::from_secs(5), fired.recv())
        .await
        .expect("alarm should fire within one poll cadence")
        .unwrap();
    assert_eq!(ringing.id, reminder.id);
    assert_eq!(ringing.title, "Take pills every day");

    // while ringing, subsequent poll ticks must not fire a second alarm
    assert!(timeout(StdDuration::from_millis(2500), fired.recv())
        .await
        .is_err());

    let scheduler = app.scheduler();
    let updated = scheduler.lock().await.dismiss(&ctx).await.unwrap().unwrap();
    assert_eq!(updated.trigger_time, now + Duration::days(1));
    assert!(updated.is_active);
    assert_eq!(updated.last_triggered, Some(now));

    // the reschedule flows back through the change feed into the set
    sleep(StdDuration::from_millis(200)).await;
    {
        let guard = scheduler.lock().await;
        assert_eq!(guard.state(), &AlarmState::Idle);
        let reminders = guard.reminder_set().reminders();
        assert_eq!(reminders.len(), 1);
        assert_eq!(reminders[0].trigger_time, now + Duration::days(1));
    }

    // tomorrow's occurrence is not due today, so the scheduler stays quiet
    assert!(timeout(StdDuration::from_millis(1500), fired.recv())
        .await
        .is_err());

    app.shutdown();
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn reminder_created_right_after_startup_reaches_the_set() {
    let ctx = fast_context("startup-user").await;

    let (tx, _fired) = mpsc::unbounded_channel();
    let app = Application::new(ctx.clone(), Arc::new(ChannelPresenter { fired: tx })).await;

    // no settling period: the change feed must already be subscribed when
    // `Application::new` returns
    let reminder = execute(
        AddReminderUseCase {
            user_id: "startup-user".into(),
            transcript: "stretch".into(),
        },
        &ctx,
    )
    .await
    .unwrap();

    sleep(StdDuration::from_millis(300)).await;
    {
        let scheduler = app.scheduler();
        let guard = scheduler.lock().await;
        let reminders = guard.reminder_set().reminders();
        assert_eq!(reminders.len(), 1);
        assert_eq!(reminders[0].id, reminder.id);
    }

    app.shutdown();
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn shutdown_stops_polling_and_event_delivery() {
    let ctx = fast_context("teardown-user").await;

    let (tx, mut fired) = mpsc::unbounded_channel();
    let app = Application::new(ctx.clone(), Arc::new(ChannelPresenter { fired: tx })).await;

    app.shutdown();

    // a reminder that would be due right now must not ring after teardown
    execute(
        AddReminderUseCase {
            user_id: "teardown-user".into(),
            transcript: "stretch".into(),
        },
        &ctx,
    )
    .await
    .unwrap();

    // either the timer never fires again, or the channel is already gone
    let res = timeout(StdDuration::from_millis(1500), fired.recv()).await;
    assert!(matches!(res, Err(_) | Ok(None)));
}
