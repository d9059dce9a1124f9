//! Change event types and parser.
//!
//! The notification feed delivers one JSON object per frame with the
//! shape `{"message": <entity>, "action": ..., "type": ..., "origin":
//! ...}`. This module deserializes frames into a strongly-typed
//! [`ChangeEvent`].

use serde::{Deserialize, Serialize};

/// What happened to the entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeAction {
    Create,
    Update,
    Delete,
}

impl ChangeAction {
    /// Past-tense label for display.
    pub fn label(&self) -> &'static str {
        match self {
            ChangeAction::Create => "created",
            ChangeAction::Update => "updated",
            ChangeAction::Delete => "deleted",
        }
    }
}

/// Which entity kind the event concerns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    #[serde(rename = "request")]
    Request,
    #[serde(rename = "request-detail")]
    RequestDetail,
}

/// One inbound change event frame.
#[derive(Debug, Clone, Deserialize)]
pub struct ChangeEvent {
    /// Raw entity payload; deserialized per [`EntityKind`] downstream.
    pub message: serde_json::Value,
    pub action: ChangeAction,
    #[serde(rename = "type")]
    pub kind: EntityKind,
    /// Origin marker of the client whose mutation triggered the event.
    #[serde(default)]
    pub origin: String,
}

/// Parse a raw stream frame into a typed event.
///
/// Returns `Err` for malformed JSON or unknown `action`/`type` values.
/// Callers log and drop such frames.
pub fn parse_event(text: &str) -> Result<ChangeEvent, serde_json::Error> {
    serde_json::from_str(text)
}
