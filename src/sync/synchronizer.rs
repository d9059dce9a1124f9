// src/sync/synchronizer.rs

//! Event processing: one inbound frame patches the query cache, feeds
//! the notification inbox, and surfaces a transient toast.
//!
//! Processing is run-to-completion per frame; the synchronizer is the
//! single owner of both the cache and the inbox, so no locking is
//! involved. Failures here are never fatal: bad frames are logged and
//! dropped.

use crate::models::{LocaleConfig, RequestDetail, StaffRequest};
use crate::utils::log;
use crate::utils::truncate_graphemes;

use super::cache::QueryCache;
use super::events::{parse_event, ChangeAction, ChangeEvent, EntityKind};
use super::inbox::{Notification, NotificationInbox};

/// Maximum toast body length in grapheme clusters.
const TOAST_MAX_GRAPHEMES: usize = 120;

/// What became of one inbound frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// Cache patched, notification recorded, toast shown.
    Applied,
    /// The event bounced back from this client's own mutation.
    SelfEcho,
    /// Unparseable or malformed; logged and dropped.
    Discarded,
}

/// Reconciles the query cache and notification inbox from the stream.
pub struct Synchronizer {
    origin: String,
    locale: LocaleConfig,
    cache: QueryCache,
    inbox: NotificationInbox,
    applied: usize,
}

impl Synchronizer {
    /// Create a synchronizer suppressing events whose origin matches
    /// `origin` (this client's own marker).
    pub fn new(origin: impl Into<String>, locale: LocaleConfig) -> Self {
        Self {
            origin: origin.into(),
            locale,
            cache: QueryCache::new(),
            inbox: NotificationInbox::new(),
            applied: 0,
        }
    }

    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }

    /// Mutable cache access, used only to warm partitions from fetches.
    pub fn cache_mut(&mut self) -> &mut QueryCache {
        &mut self.cache
    }

    pub fn inbox(&self) -> &NotificationInbox {
        &self.inbox
    }

    pub fn inbox_mut(&mut self) -> &mut NotificationInbox {
        &mut self.inbox
    }

    /// Number of frames applied so far.
    pub fn applied(&self) -> usize {
        self.applied
    }

    /// Process one raw frame, run to completion.
    pub fn handle_frame(&mut self, raw: &str) -> SyncOutcome {
        let event = match parse_event(raw) {
            Ok(event) => event,
            Err(e) => {
                log::debug(&format!("Dropping unparseable event frame: {e}"));
                return SyncOutcome::Discarded;
            }
        };

        // Best-effort self-echo suppression by origin marker.
        if !self.origin.is_empty() && event.origin == self.origin {
            log::debug(&format!(
                "Suppressing self-echo ({:?} {:?})",
                event.action, event.kind
            ));
            return SyncOutcome::SelfEcho;
        }

        match event.kind {
            EntityKind::Request => self.handle_request_event(&event),
            EntityKind::RequestDetail => self.handle_detail_event(&event),
        }
    }

    fn handle_request_event(&mut self, event: &ChangeEvent) -> SyncOutcome {
        let entity: StaffRequest = match serde_json::from_value(event.message.clone()) {
            Ok(entity) => entity,
            Err(e) => {
                log::error(&format!("Dropping malformed request event: {e}"));
                return SyncOutcome::Discarded;
            }
        };
        if entity.id.trim().is_empty() || entity.faculty_id.trim().is_empty() {
            log::error("Dropping request event with empty id or facultyId");
            return SyncOutcome::Discarded;
        }

        let toasts = &self.locale.toasts;
        let title = match event.action {
            ChangeAction::Create => toasts.request_created.clone(),
            ChangeAction::Update => toasts.request_updated.clone(),
            ChangeAction::Delete => toasts.request_deleted.clone(),
        };
        let body = toasts
            .request_body
            .replace("{id}", &entity.id)
            .replace("{faculty}", &entity.faculty_id);
        let body = truncate_graphemes(&body, TOAST_MAX_GRAPHEMES);

        let entity_id = entity.id.clone();
        self.cache.apply_request(event.action, entity);
        self.record(Notification::new(
            &title,
            &body,
            event.action,
            EntityKind::Request,
            entity_id,
            None,
        ));
        SyncOutcome::Applied
    }

    fn handle_detail_event(&mut self, event: &ChangeEvent) -> SyncOutcome {
        let entity: RequestDetail = match serde_json::from_value(event.message.clone()) {
            Ok(entity) => entity,
            Err(e) => {
                log::error(&format!("Dropping malformed session event: {e}"));
                return SyncOutcome::Discarded;
            }
        };
        if entity.id.trim().is_empty() || entity.request_id.trim().is_empty() {
            log::error("Dropping session event with empty id or requestId");
            return SyncOutcome::Discarded;
        }

        let toasts = &self.locale.toasts;
        let title = match event.action {
            ChangeAction::Create => toasts.session_created.clone(),
            ChangeAction::Update => toasts.session_updated.clone(),
            ChangeAction::Delete => toasts.session_deleted.clone(),
        };
        let body = toasts
            .session_body
            .replace("{id}", &entity.id)
            .replace("{request}", &entity.request_id);
        let body = truncate_graphemes(&body, TOAST_MAX_GRAPHEMES);

        let entity_id = entity.id.clone();
        let request_id = entity.request_id.clone();
        self.cache.apply_detail(event.action, entity);
        self.record(Notification::new(
            &title,
            &body,
            event.action,
            EntityKind::RequestDetail,
            entity_id,
            Some(request_id),
        ));
        SyncOutcome::Applied
    }

    /// Record a notification and show the transient toast.
    fn record(&mut self, notification: Notification) {
        log::success(&format!(
            "{}: {}",
            notification.title, notification.message
        ));
        self.inbox.push(notification);
        self.applied += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_sync() -> Synchronizer {
        Synchronizer::new("self-origin", LocaleConfig::default())
    }

    fn request_frame(action: &str, id: &str, faculty: &str, origin: &str) -> String {
        format!(
            r#"{{"message":{{"id":"{id}","facultyId":"{faculty}"}},"action":"{action}","type":"request","origin":"{origin}"}}"#
        )
    }

    fn detail_frame(action: &str, id: &str, request: &str, origin: &str) -> String {
        format!(
            r#"{{"message":{{"id":"{id}","requestId":"{request}","session":"lab"}},"action":"{action}","type":"request-detail","origin":"{origin}"}}"#
        )
    }

    #[test]
    fn test_create_patches_cache_and_inbox() {
        let mut sync = make_sync();
        let outcome = sync.handle_frame(&request_frame("create", "r1", "f1", "other"));

        assert_eq!(outcome, SyncOutcome::Applied);
        assert_eq!(sync.cache().requests("f1").len(), 1);
        assert_eq!(sync.inbox().len(), 1);
        assert_eq!(sync.inbox().unread_count(), 1);
        assert_eq!(sync.inbox().notifications()[0].entity_id, "r1");
        assert!(sync.inbox().notifications()[0].request_id.is_none());
    }

    #[test]
    fn test_self_echo_is_suppressed() {
        let mut sync = make_sync();
        let outcome = sync.handle_frame(&request_frame("create", "r1", "f1", "self-origin"));

        assert_eq!(outcome, SyncOutcome::SelfEcho);
        assert!(sync.cache().is_empty());
        assert!(sync.inbox().is_empty());
    }

    #[test]
    fn test_duplicate_create_does_not_duplicate_entity() {
        let mut sync = make_sync();
        sync.handle_frame(&request_frame("create", "r1", "f1", "a"));
        sync.handle_frame(&request_frame("create", "r1", "f1", "b"));

        // The cache insert is idempotent, but each event still notifies.
        assert_eq!(sync.cache().requests("f1").len(), 1);
        assert_eq!(sync.inbox().len(), 2);
    }

    #[test]
    fn test_update_absent_id_leaves_cache_unchanged() {
        let mut sync = make_sync();
        let outcome = sync.handle_frame(&request_frame("update", "r9", "f1", "other"));

        assert_eq!(outcome, SyncOutcome::Applied);
        assert!(sync.cache().requests("f1").is_empty());
        assert_eq!(sync.inbox().len(), 1);
    }

    #[test]
    fn test_delete_removes_entity() {
        let mut sync = make_sync();
        sync.handle_frame(&request_frame("create", "r1", "f1", "other"));
        sync.handle_frame(&request_frame("delete", "r1", "f1", "other"));

        assert!(sync.cache().requests("f1").is_empty());
        assert_eq!(sync.inbox().len(), 2);
    }

    #[test]
    fn test_detail_events_route_by_request_id() {
        let mut sync = make_sync();
        let outcome = sync.handle_frame(&detail_frame("create", "d1", "r7", "other"));

        assert_eq!(outcome, SyncOutcome::Applied);
        assert_eq!(sync.cache().details("r7").len(), 1);
        assert_eq!(
            sync.inbox().notifications()[0].request_id.as_deref(),
            Some("r7")
        );
    }

    #[test]
    fn test_unparseable_frame_is_discarded() {
        let mut sync = make_sync();
        assert_eq!(sync.handle_frame("garbage"), SyncOutcome::Discarded);
        assert!(sync.inbox().is_empty());
    }

    #[test]
    fn test_missing_id_is_discarded() {
        let mut sync = make_sync();
        let frame = r#"{"message":{"facultyId":"f1"},"action":"create","type":"request","origin":"o"}"#;
        assert_eq!(sync.handle_frame(frame), SyncOutcome::Discarded);
        assert!(sync.cache().is_empty());
        assert!(sync.inbox().is_empty());
    }

    #[test]
    fn test_empty_id_is_discarded() {
        let mut sync = make_sync();
        let frame = request_frame("create", "", "f1", "other");
        assert_eq!(sync.handle_frame(&frame), SyncOutcome::Discarded);
        assert!(sync.cache().is_empty());
    }

    #[test]
    fn test_missing_partition_key_is_discarded() {
        let mut sync = make_sync();
        let frame = r#"{"message":{"id":"d1","session":"lab"},"action":"create","type":"request-detail","origin":"o"}"#;
        assert_eq!(sync.handle_frame(frame), SyncOutcome::Discarded);
        assert!(sync.cache().is_empty());
    }

    #[test]
    fn test_applied_counter() {
        let mut sync = make_sync();
        sync.handle_frame(&request_frame("create", "r1", "f1", "other"));
        sync.handle_frame("garbage");
        sync.handle_frame(&detail_frame("create", "d1", "r1", "other"));
        assert_eq!(sync.applied(), 2);
    }
}
