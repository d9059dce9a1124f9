//! Session kind enumeration.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The four kinds of class meeting a section can schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionKind {
    Lecture,
    Tutoring,
    Workshop,
    Lab,
}

impl SessionKind {
    /// All kinds in canonical order. Count expansion iterates this order.
    pub const ALL: [SessionKind; 4] = [
        SessionKind::Lecture,
        SessionKind::Tutoring,
        SessionKind::Workshop,
        SessionKind::Lab,
    ];

    /// Wire name (lowercase).
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionKind::Lecture => "lecture",
            SessionKind::Tutoring => "tutoring",
            SessionKind::Workshop => "workshop",
            SessionKind::Lab => "lab",
        }
    }

    /// Display label.
    pub fn label(&self) -> &'static str {
        match self {
            SessionKind::Lecture => "Lecture",
            SessionKind::Tutoring => "Tutoring",
            SessionKind::Workshop => "Workshop",
            SessionKind::Lab => "Lab",
        }
    }

    /// Positional index into count arrays.
    pub(crate) fn index(&self) -> usize {
        match self {
            SessionKind::Lecture => 0,
            SessionKind::Tutoring => 1,
            SessionKind::Workshop => 2,
            SessionKind::Lab => 3,
        }
    }
}

impl fmt::Display for SessionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SessionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "lecture" => Ok(SessionKind::Lecture),
            "tutoring" => Ok(SessionKind::Tutoring),
            "workshop" => Ok(SessionKind::Workshop),
            "lab" => Ok(SessionKind::Lab),
            other => Err(format!("Unknown session kind: {other}")),
        }
    }
}
