use chrono::{DateTime, Duration, Utc};

/// Default lifetime of a notification before it is dismissed automatically.
pub const NOTIFICATION_TTL_MS: i64 = 5_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: u64,
    pub kind: NotificationKind,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

/// Transient notifications, newest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationStack {
    entries: Vec<Notification>,
    next_id: u64,
    ttl: Duration,
}

impl Default for NotificationStack {
    fn default() -> Self {
        Self::new(Duration::milliseconds(NOTIFICATION_TTL_MS))
    }
}

impl NotificationStack {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: Vec::new(),
            next_id: 0,
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Add a notification on top of the stack and return its id.
    pub fn push(&mut self, kind: NotificationKind, message: impl Into<String>, now: DateTime<Utc>) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.entries.insert(
            0,
            Notification {
                id,
                kind,
                message: message.into(),
                created_at: now,
            },
        );
        id
    }

    pub fn dismiss(&mut self, id: u64) -> bool {
        let before = self.entries.len();
        self.entries.retain(|n| n.id != id);
        self.entries.len() != before
    }

    /// Drop every notification older than the lifetime. Returns how many went.
    pub fn expire(&mut self, now: DateTime<Utc>) -> usize {
        let before = self.entries.len();
        let ttl = self.ttl;
        self.entries.retain(|n| now - n.created_at < ttl);
        before - self.entries.len()
    }

    pub fn entries(&self) -> &[Notification] {
        &self.entries
    }

    pub fn latest(&self) -> Option<&Notification> {
        self.entries.first()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
