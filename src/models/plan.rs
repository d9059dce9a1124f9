// src/models/plan.rs

//! Section plan files.
//!
//! A plan is the scripted front end to the offer builder: a TOML file
//! naming the subject and the draft sections to compose. Counts and
//! numbers from the plan are replayed through the builder operations,
//! which own the clamping and collision rules.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::models::SessionKind;

/// A section creation plan for one subject.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Plan {
    /// Subject (course offering) id the sections belong to.
    pub subject: String,

    /// Draft section entries, in order.
    #[serde(default)]
    pub sections: Vec<PlanSection>,
}

/// One draft section entry in a plan.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanSection {
    /// Period token `"<periodId>-<label>"`; empty means unassigned.
    pub period: String,

    /// Explicit section number request; collisions resolve to the
    /// closest available number.
    pub number: Option<u32>,

    pub lectures: i64,
    pub tutorings: i64,
    pub workshops: i64,
    pub labs: i64,
}

impl PlanSection {
    /// Counts paired with their session kind, in canonical order.
    pub fn counts(&self) -> [(SessionKind, i64); 4] {
        [
            (SessionKind::Lecture, self.lectures),
            (SessionKind::Tutoring, self.tutorings),
            (SessionKind::Workshop, self.workshops),
            (SessionKind::Lab, self.labs),
        ]
    }
}

impl Plan {
    /// Load a plan from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content =
            fs::read_to_string(path).map_err(|e| AppError::plan(path.display().to_string(), e))?;
        let plan: Plan =
            toml::from_str(&content).map_err(|e| AppError::plan(path.display().to_string(), e))?;
        Ok(plan)
    }

    /// Validate plan values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.subject.trim().is_empty() {
            return Err(AppError::validation("plan subject is empty"));
        }
        for (i, section) in self.sections.iter().enumerate() {
            if section.number == Some(0) {
                return Err(AppError::validation(format!(
                    "sections[{i}]: section number must be positive"
                )));
            }
            for (kind, count) in section.counts() {
                if count < 0 {
                    return Err(AppError::validation(format!(
                        "sections[{i}]: negative {} count",
                        kind.as_str()
                    )));
                }
            }
        }
        Ok(())
    }
}
