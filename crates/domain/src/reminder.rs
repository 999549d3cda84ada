use crate::shared::entity::{Entity, ID};
use chrono::{Duration, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

/// How a `ReminderRecord` re-arms itself after its alarm is dismissed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepeatPolicy {
    Once,
    Daily,
    Weekly,
    Indefinite,
}

/// A `ReminderRecord` is a scheduled alarm owned by one shared identity.
/// The serialized field names are a contract with the external store and
/// must not change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderRecord {
    pub id: ID,
    /// Identity under which the record was created. Only used to filter
    /// the change feed, never for access control.
    pub user_id: String,
    pub title: String,
    /// Absolute wall-clock timestamp at which the alarm is due
    pub trigger_time: NaiveDateTime,
    pub repeat: RepeatPolicy,
    /// Dormant reminders must never fire
    pub is_active: bool,
    /// Informational only, stamped on every dismissal
    pub last_triggered: Option<NaiveDateTime>,
}

impl Entity for ReminderRecord {
    fn id(&self) -> &ID {
        &self.id
    }
}

impl ReminderRecord {
    pub fn new(
        user_id: String,
        title: String,
        trigger_time: NaiveDateTime,
        repeat: RepeatPolicy,
    ) -> Self {
        Self {
            id: ID::new(),
            user_id,
            title,
            trigger_time,
            repeat,
            is_active: true,
            last_triggered: None,
        }
    }

    /// A reminder is due when the clock and the trigger fall on the same
    /// calendar date, hour and minute, and their absolute difference is
    /// inside the detection window.
    pub fn is_due_at(&self, now: NaiveDateTime, detection_window: Duration) -> bool {
        if !self.is_active {
            return false;
        }
        let delta = now.signed_duration_since(self.trigger_time);
        now.date() == self.trigger_time.date()
            && now.hour() == self.trigger_time.hour()
            && now.minute() == self.trigger_time.minute()
            && delta.num_seconds().abs() < detection_window.num_seconds()
    }

    /// Computes the state after a dismissal: daily and indefinite reminders
    /// re-arm one day ahead, weekly ones seven days ahead, one-shot
    /// reminders keep their trigger time but go dormant.
    pub fn register_dismissal(&mut self, dismissed_at: NaiveDateTime) {
        match self.repeat {
            RepeatPolicy::Daily | RepeatPolicy::Indefinite => {
                self.trigger_time = self.trigger_time + Duration::days(1);
            }
            RepeatPolicy::Weekly => {
                self.trigger_time = self.trigger_time + Duration::days(7);
            }
            RepeatPolicy::Once => {
                self.is_active = false;
            }
        }
        self.last_triggered = Some(dismissed_at);
    }
}
