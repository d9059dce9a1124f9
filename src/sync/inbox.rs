// src/sync/inbox.rs

//! In-memory notification inbox.
//!
//! Notifications are kept newest-first. The unread counter is maintained
//! in lockstep with every list mutation rather than recomputed, so every
//! mutation path below adjusts both together.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::events::{ChangeAction, EntityKind};

/// One entry in the notification inbox.
#[derive(Debug, Clone)]
pub struct Notification {
    /// Session-unique id, `<millis>-<random>`.
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub read: bool,
    pub title: String,
    pub message: String,
    pub action: ChangeAction,
    pub kind: EntityKind,
    pub entity_id: String,
    /// Parent request id, present only for detail-level events.
    pub request_id: Option<String>,
}

impl Notification {
    pub fn new(
        title: impl Into<String>,
        message: impl Into<String>,
        action: ChangeAction,
        kind: EntityKind,
        entity_id: impl Into<String>,
        request_id: Option<String>,
    ) -> Self {
        let now = Utc::now();
        let suffix = Uuid::new_v4().simple().to_string();
        Self {
            id: format!("{}-{}", now.timestamp_millis(), &suffix[..8]),
            timestamp: now,
            read: false,
            title: title.into(),
            message: message.into(),
            action,
            kind,
            entity_id: entity_id.into(),
            request_id,
        }
    }
}

/// Newest-first notification list with an unread counter.
#[derive(Debug, Default)]
pub struct NotificationInbox {
    notifications: Vec<Notification>,
    unread_count: usize,
}

impl NotificationInbox {
    pub fn new() -> Self {
        Self::default()
    }

    /// Notifications, newest first.
    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn unread_count(&self) -> usize {
        self.unread_count
    }

    pub fn len(&self) -> usize {
        self.notifications.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notifications.is_empty()
    }

    /// Prepend a notification and bump the unread counter.
    pub fn push(&mut self, notification: Notification) {
        debug_assert!(!notification.read);
        self.notifications.insert(0, notification);
        self.unread_count += 1;
    }

    /// Mark one notification read.
    ///
    /// The counter moves only on the unread-to-read transition, so
    /// repeated calls cannot double-decrement.
    pub fn mark_as_read(&mut self, id: &str) {
        if let Some(notification) = self.notifications.iter_mut().find(|n| n.id == id) {
            if !notification.read {
                notification.read = true;
                self.unread_count = self.unread_count.saturating_sub(1);
            }
        }
    }

    /// Mark everything read and zero the counter.
    pub fn mark_all_as_read(&mut self) {
        for notification in &mut self.notifications {
            notification.read = true;
        }
        self.unread_count = 0;
    }

    /// Drop all notifications and zero the counter.
    pub fn clear_all(&mut self) {
        self.notifications.clear();
        self.unread_count = 0;
    }
}
