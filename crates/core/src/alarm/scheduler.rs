use crate::error::CoreError;
use crate::reminder::reminder_set::ReminderSet;
use chrono::{Duration, NaiveDateTime};
use murmur_domain::ReminderRecord;
use murmur_infra::{MurmurContext, ReminderEvent};

/// Whether an alarm is ringing. At most one reminder rings at any instant,
/// process wide.
#[derive(Debug, Clone, PartialEq)]
pub enum AlarmState {
    Idle,
    Ringing(ReminderRecord),
}

/// Owns the reminder set and the single ringing slot. Both live behind one
/// mutual-exclusion domain (the caller's mutex) so a poll tick and an
/// incoming store event can never interleave.
///
/// The scheduler never mutates the reminder set on its own writes; it
/// persists through the gateway and waits for the corresponding update
/// event, keeping the store the single source of truth.
#[derive(Debug)]
pub struct AlarmScheduler {
    reminder_set: ReminderSet,
    state: AlarmState,
}

impl AlarmScheduler {
    pub fn new(user_id: String) -> Self {
        Self {
            reminder_set: ReminderSet::new(user_id),
            state: AlarmState::Idle,
        }
    }

    pub fn state(&self) -> &AlarmState {
        &self.state
    }

    pub fn reminder_set(&self) -> &ReminderSet {
        &self.reminder_set
    }

    pub async fn refresh(&mut self, ctx: &MurmurContext) {
        self.reminder_set.refresh(ctx).await;
    }

    pub fn apply_event(&mut self, event: &ReminderEvent) {
        self.reminder_set.apply_event(event);
    }

    /// One poll tick. When idle and some active reminder is due, moves to
    /// `Ringing` and returns the record to hand to the presenter. While
    /// ringing nothing is returned, no matter how many reminders qualify.
    pub fn poll_tick(
        &mut self,
        now: NaiveDateTime,
        detection_window: Duration,
    ) -> Option<ReminderRecord> {
        if let AlarmState::Ringing(_) = self.state {
            return None;
        }

        let due = self
            .reminder_set
            .reminders()
            .iter()
            .find(|r| r.is_due_at(now, detection_window))?
            .clone();

        self.state = AlarmState::Ringing(due.clone());
        Some(due)
    }

    /// Dismisses the ringing alarm: back to `Idle`, next record state per
    /// the repetition class, stamped and persisted through the gateway. A
    /// failed write is surfaced but does not roll back the transition nor
    /// retry; the alarm stays dismissed locally and the caller may retry
    /// the write. Calling this while idle is a no-op.
    pub async fn dismiss(
        &mut self,
        ctx: &MurmurContext,
    ) -> Result<Option<ReminderRecord>, CoreError> {
        let mut reminder = match std::mem::replace(&mut self.state, AlarmState::Idle) {
            AlarmState::Idle => return Ok(None),
            AlarmState::Ringing(reminder) => reminder,
        };

        reminder.register_dismissal(ctx.sys.now());

        ctx.repos
            .reminders
            .save(&reminder)
            .await
            .map_err(CoreError::StoreUnavailable)?;

        Ok(Some(reminder))
    }
}
