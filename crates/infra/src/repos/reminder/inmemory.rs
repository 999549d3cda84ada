use super::{IReminderRepo, ReminderEvent, ReminderEventKind};
use crate::repos::shared::inmemory_repo::*;
use murmur_domain::{ReminderRecord, ID};
use std::sync::Mutex;
use tokio::sync::broadcast;

const EVENT_CHANNEL_CAPACITY: usize = 256;

pub struct InMemoryReminderRepo {
    reminders: Mutex<Vec<ReminderRecord>>,
    events: broadcast::Sender<ReminderEvent>,
}

impl InMemoryReminderRepo {
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            reminders: Mutex::new(vec![]),
            events,
        }
    }

    fn publish(&self, kind: ReminderEventKind, record: &ReminderRecord) {
        // Send only fails when nobody is subscribed
        let _ = self.events.send(ReminderEvent {
            kind,
            record: record.clone(),
        });
    }
}

impl Default for InMemoryReminderRepo {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl IReminderRepo for InMemoryReminderRepo {
    async fn insert(&self, reminder: &ReminderRecord) -> anyhow::Result<()> {
        insert(reminder, &self.reminders);
        self.publish(ReminderEventKind::Created, reminder);
        Ok(())
    }

    async fn save(&self, reminder: &ReminderRecord) -> anyhow::Result<()> {
        save(reminder, &self.reminders);
        self.publish(ReminderEventKind::Updated, reminder);
        Ok(())
    }

    async fn find(&self, reminder_id: &ID) -> Option<ReminderRecord> {
        find(reminder_id, &self.reminders)
    }

    async fn find_for_user(
        &self,
        user_id: &str,
        limit: usize,
    ) -> anyhow::Result<Vec<ReminderRecord>> {
        let mut reminders = find_by(&self.reminders, |r: &ReminderRecord| r.user_id == user_id);
        reminders.sort_by_key(|r| r.trigger_time);
        reminders.truncate(limit);
        Ok(reminders)
    }

    async fn delete(&self, reminder_id: &ID) -> Option<ReminderRecord> {
        let deleted = delete(reminder_id, &self.reminders);
        if let Some(record) = &deleted {
            self.publish(ReminderEventKind::Deleted, record);
        }
        deleted
    }

    fn subscribe(&self) -> broadcast::Receiver<ReminderEvent> {
        self.events.subscribe()
    }
}
