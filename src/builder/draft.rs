//! Draft section data structures.

use serde::Serialize;
use uuid::Uuid;

use crate::models::SessionKind;
use crate::utils::period_id;

/// Per-kind session counts for one draft section.
///
/// All four kinds are always present, zero-initialized. Decrements clamp
/// at zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionCounts([u32; 4]);

impl SessionCounts {
    /// Current count for a kind.
    pub fn get(&self, kind: SessionKind) -> u32 {
        self.0[kind.index()]
    }

    /// Replace the count for a kind.
    pub fn set(&mut self, kind: SessionKind, count: u32) {
        self.0[kind.index()] = count;
    }

    /// Add a signed delta to the count for a kind, clamping at zero.
    pub fn add(&mut self, kind: SessionKind, delta: i64) {
        let current = self.0[kind.index()] as i64;
        self.0[kind.index()] = (current + delta).clamp(0, u32::MAX as i64) as u32;
    }

    /// Sum of all counts.
    pub fn total(&self) -> u32 {
        self.0.iter().sum()
    }
}

/// An unsaved, client-only section draft pending batch submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftSection {
    /// Opaque client-side identifier, also used as the group id on submit.
    pub id: String,
    /// Period token `"<periodId>-<label>"`; `None` means unassigned.
    pub period: Option<String>,
    /// Positive integer, unique across the draft list.
    pub section_number: u32,
    /// Sessions to create per kind.
    pub counts: SessionCounts,
}

impl DraftSection {
    /// Create an empty draft with the given section number.
    pub fn new(section_number: u32) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            period: None,
            section_number,
            counts: SessionCounts::default(),
        }
    }

    /// The id portion of the assigned period token, if any.
    pub fn period_id(&self) -> Option<&str> {
        self.period.as_deref().and_then(period_id)
    }
}

/// One unit of section creation, sent to the batch-create endpoint.
///
/// Requesting n sessions of a kind yields n identical records; units are
/// distinguishable only by position in the batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionCreationRequest {
    pub period_id: String,
    pub session: SessionKind,
    pub code: u32,
    pub group_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_clamp_at_zero() {
        let mut counts = SessionCounts::default();
        counts.add(SessionKind::Lab, -5);
        assert_eq!(counts.get(SessionKind::Lab), 0);

        counts.add(SessionKind::Lab, 3);
        counts.add(SessionKind::Lab, -7);
        assert_eq!(counts.get(SessionKind::Lab), 0);
    }

    #[test]
    fn test_counts_total() {
        let mut counts = SessionCounts::default();
        counts.set(SessionKind::Lecture, 2);
        counts.add(SessionKind::Workshop, 1);
        assert_eq!(counts.total(), 3);
    }

    #[test]
    fn test_draft_period_id() {
        let mut draft = DraftSection::new(1);
        assert_eq!(draft.period_id(), None);

        draft.period = Some("2026A-First Term".to_string());
        assert_eq!(draft.period_id(), Some("2026A"));

        draft.period = Some(String::new());
        assert_eq!(draft.period_id(), None);
    }

    #[test]
    fn test_draft_ids_are_unique() {
        let a = DraftSection::new(1);
        let b = DraftSection::new(2);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_creation_request_wire_shape() {
        let request = SectionCreationRequest {
            period_id: "2026A".to_string(),
            session: SessionKind::Lecture,
            code: 3,
            group_id: "g-1".to_string(),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["periodId"], "2026A");
        assert_eq!(json["session"], "lecture");
        assert_eq!(json["code"], 3);
        assert_eq!(json["groupId"], "g-1");
    }
}
