//! Transient toast messages shown over the shell.

use std::time::{Duration, Instant};

/// How long a notification stays up
pub const NOTIFICATION_LIFETIME: Duration = Duration::from_secs(5);

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum NotificationKind {
    Info,
    Success,
    Error,
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Notification {
    pub message: String,
    pub kind: NotificationKind,
    pub created: Instant,
}

/// Queue of live notifications, oldest first
#[derive(Debug, Clone)]
pub struct Notifications {
    items: Vec<Notification>,
    lifetime: Duration,
}

impl Default for Notifications {
    fn default() -> Self {
        Self::new(NOTIFICATION_LIFETIME)
    }
}

impl Notifications {
    pub fn new(lifetime: Duration) -> Self {
        Self {
            items: Vec::new(),
            lifetime,
        }
    }

    pub fn push(&mut self, message: impl Into<String>, kind: NotificationKind, now: Instant) {
        self.items.push(Notification {
            message: message.into(),
            kind,
            created: now,
        });
    }

    /// Drops every notification older than the lifetime
    pub fn expire(&mut self, now: Instant) {
        let lifetime = self.lifetime;
        self.items
            .retain(|n| now.saturating_duration_since(n.created) < lifetime);
    }

    /// Removes the most recent notification, if any
    pub fn dismiss_newest(&mut self) -> Option<Notification> {
        self.items.pop()
    }

    /// Oldest first; `.rev()` walks newest first
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Notification> {
        self.items.iter()
    }

    pub fn latest(&self) -> Option<&Notification> {
        self.items.last()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
