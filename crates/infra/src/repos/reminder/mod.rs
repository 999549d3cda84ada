mod inmemory;

pub use inmemory::InMemoryReminderRepo;
use murmur_domain::{ReminderRecord, ID};
use tokio::sync::broadcast;

/// One change to a `ReminderRecord` as observed by the store, mirrored to
/// every subscribed client.
#[derive(Debug, Clone, PartialEq)]
pub enum ReminderEventKind {
    Created,
    Updated,
    Deleted,
}

#[derive(Debug, Clone)]
pub struct ReminderEvent {
    pub kind: ReminderEventKind,
    pub record: ReminderRecord,
}

/// Gateway to the reminder store. The store is authoritative for persisted
/// state; consumers keep their in-memory view consistent through
/// `subscribe` and full refetches via `find_for_user`.
#[async_trait::async_trait]
pub trait IReminderRepo: Send + Sync {
    async fn insert(&self, reminder: &ReminderRecord) -> anyhow::Result<()>;
    async fn save(&self, reminder: &ReminderRecord) -> anyhow::Result<()>;
    async fn find(&self, reminder_id: &ID) -> Option<ReminderRecord>;
    /// All reminders for the given identity, ascending by trigger time,
    /// capped at `limit`
    async fn find_for_user(
        &self,
        user_id: &str,
        limit: usize,
    ) -> anyhow::Result<Vec<ReminderRecord>>;
    /// Returns the removed record, or `None` when no such record exists
    async fn delete(&self, reminder_id: &ID) -> Option<ReminderRecord>;
    /// Live feed of create/update/delete events, in delivery order.
    /// Dropping the receiver unsubscribes immediately.
    fn subscribe(&self) -> broadcast::Receiver<ReminderEvent>;
}
