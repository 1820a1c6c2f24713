use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Severity level for transient, user-visible notifications (toasts).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Info,
    Error,
}

/// A transient notification raised alongside the message thread.
#[derive(Debug, Clone)]
pub struct Notification {
    pub level: NotificationLevel,
    pub text: String,
    pub created_at: Instant,
    pub ttl: Duration,
}

impl Notification {
    /// Creates a success notification with a 4-second TTL.
    pub fn success(text: impl Into<String>) -> Self {
        Self::with_level(NotificationLevel::Success, text, Duration::from_secs(4))
    }

    /// Creates an info notification with a 5-second TTL.
    pub fn info(text: impl Into<String>) -> Self {
        Self::with_level(NotificationLevel::Info, text, Duration::from_secs(5))
    }

    /// Creates an error notification with a 10-second TTL.
    pub fn error(text: impl Into<String>) -> Self {
        Self::with_level(NotificationLevel::Error, text, Duration::from_secs(10))
    }

    fn with_level(level: NotificationLevel, text: impl Into<String>, ttl: Duration) -> Self {
        Self {
            level,
            text: text.into(),
            created_at: Instant::now(),
            ttl,
        }
    }

    /// Returns `true` if this notification has exceeded its TTL.
    pub fn is_expired(&self) -> bool {
        self.created_at.elapsed() >= self.ttl
    }
}

/// A bounded queue of notifications that auto-evicts expired entries.
#[derive(Debug)]
pub struct NotificationQueue {
    items: VecDeque<Notification>,
    capacity: usize,
}

impl NotificationQueue {
    /// Creates a new queue with the given maximum capacity.
    pub fn new(capacity: usize) -> Self {
        Self {
            items: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Pushes a notification, evicting expired entries first.
    /// If still at capacity after eviction, the oldest entry is removed.
    pub fn push(&mut self, notification: Notification) {
        self.evict_expired();
        if self.items.len() >= self.capacity {
            self.items.pop_front();
        }
        self.items.push_back(notification);
    }

    /// Removes and returns every non-expired notification, oldest first.
    pub fn drain(&mut self) -> Vec<Notification> {
        self.evict_expired();
        self.items.drain(..).collect()
    }

    fn evict_expired(&mut self) {
        self.items.retain(|n| !n.is_expired());
    }
}

impl Default for NotificationQueue {
    fn default() -> Self {
        Self::new(16)
    }
}
