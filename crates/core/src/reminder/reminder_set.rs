use murmur_domain::ReminderRecord;
use murmur_infra::{MurmurContext, ReminderEvent, ReminderEventKind};
use tracing::{debug, error};

/// In-memory projection of one identity's reminders, ordered ascending by
/// trigger time. Two input channels keep it consistent with the store: a
/// periodic full refresh and the incremental change feed. All mutations go
/// through a single writer (the scheduler mutex) so the channels cannot
/// race each other.
#[derive(Debug)]
pub struct ReminderSet {
    user_id: String,
    reminders: Vec<ReminderRecord>,
}

impl ReminderSet {
    pub fn new(user_id: String) -> Self {
        Self {
            user_id,
            reminders: Vec::new(),
        }
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn reminders(&self) -> &[ReminderRecord] {
        &self.reminders
    }

    /// Replaces the whole set from the store. Fails soft: when the fetch
    /// errors the previous contents are kept and the error is logged.
    pub async fn refresh(&mut self, ctx: &MurmurContext) {
        match ctx
            .repos
            .reminders
            .find_for_user(&self.user_id, ctx.config.reminder_page_limit)
            .await
        {
            Ok(reminders) => self.reminders = reminders,
            Err(e) => error!("Failed to refresh reminders: {:?}", e),
        }
    }

    /// Applies one change feed event. Events are applied strictly in
    /// delivery order; events for a foreign identity are discarded.
    pub fn apply_event(&mut self, event: &ReminderEvent) {
        if event.record.user_id != self.user_id {
            debug!(
                "Discarding reminder event for foreign identity: {}",
                event.record.user_id
            );
            return;
        }

        match event.kind {
            ReminderEventKind::Created => {
                // idempotent against duplicate delivery
                if self.reminders.iter().any(|r| r.id == event.record.id) {
                    return;
                }
                self.reminders.push(event.record.clone());
                self.sort();
            }
            ReminderEventKind::Updated => {
                if let Some(existing) =
                    self.reminders.iter_mut().find(|r| r.id == event.record.id)
                {
                    *existing = event.record.clone();
                    self.sort();
                }
            }
            ReminderEventKind::Deleted => {
                self.reminders.retain(|r| r.id != event.record.id);
            }
        }
    }

    fn sort(&mut self) {
        self.reminders.sort_by_key(|r| r.trigger_time);
    }
}
