// src/builder/offer.rs

//! In-memory composition of draft sections for one subject.
//!
//! The builder owns the draft list and guarantees two invariants: section
//! numbers stay unique across the list, and session counts never go
//! negative. Everything here is pure state transformation; the network
//! submission lives in the commands layer.

use std::collections::HashSet;

use crate::error::{AppError, Result};
use crate::models::SessionKind;
use crate::utils::parse_count;

use super::draft::{DraftSection, SectionCreationRequest, SessionCounts};

/// Builder for the draft sections of one subject offer.
#[derive(Debug, Clone)]
pub struct OfferBuilder {
    sections: Vec<DraftSection>,
}

impl OfferBuilder {
    /// Create a builder holding a single fresh empty draft.
    pub fn new() -> Self {
        Self {
            sections: vec![DraftSection::new(1)],
        }
    }

    /// Current draft sections, in insertion order.
    pub fn sections(&self) -> &[DraftSection] {
        &self.sections
    }

    /// Look up a draft by id.
    pub fn get(&self, section_id: &str) -> Option<&DraftSection> {
        self.sections.iter().find(|s| s.id == section_id)
    }

    /// Look up a draft by its section number.
    pub fn find_by_number(&self, number: u32) -> Option<&DraftSection> {
        self.sections.iter().find(|s| s.section_number == number)
    }

    /// Append a new draft with the smallest unused positive number.
    ///
    /// Returns the new draft's id.
    pub fn add_section(&mut self) -> String {
        let used = self.used_numbers(None);
        let section = DraftSection::new(first_gap(&used));
        let id = section.id.clone();
        self.sections.push(section);
        id
    }

    /// Reassign a draft's section number, resolving collisions.
    ///
    /// A requested number unused by any *other* draft is taken verbatim.
    /// On collision, candidates are probed outward from the request
    /// (offset 1, 2, ...), lower candidate first at each offset and
    /// non-positive candidates skipped, bounded at `len + 1` offsets with
    /// the first-gap rule as fallback. Returns the number actually
    /// assigned, or `None` for an unknown id.
    pub fn update_section_number(&mut self, section_id: &str, requested: u32) -> Option<u32> {
        self.get(section_id)?;
        let requested = requested.max(1);
        let others = self.used_numbers(Some(section_id));
        let assigned = closest_available(requested, &others, self.sections.len() + 1);

        let section = self.section_mut(section_id)?;
        section.section_number = assigned;
        Some(assigned)
    }

    /// Delete a draft. Other drafts keep their numbers.
    pub fn remove_section(&mut self, section_id: &str) {
        self.sections.retain(|s| s.id != section_id);
    }

    /// Set a draft's period token verbatim.
    pub fn update_section_period(&mut self, section_id: &str, period: &str) {
        if let Some(section) = self.section_mut(section_id) {
            section.period = Some(period.to_string());
        }
    }

    /// Add a signed delta to one session count, clamping at zero.
    pub fn update_session_count(&mut self, section_id: &str, kind: SessionKind, delta: i64) {
        if let Some(section) = self.section_mut(section_id) {
            section.counts.add(kind, delta);
        }
    }

    /// Replace one session count from raw text input.
    ///
    /// Empty or non-numeric text parses to 0; negatives clamp to 0.
    pub fn set_session_count(&mut self, section_id: &str, kind: SessionKind, raw: &str) {
        if let Some(section) = self.section_mut(section_id) {
            section.counts.set(kind, parse_count(raw));
        }
    }

    /// Derive the flat batch of creation requests.
    ///
    /// Pure: one record per unit of count, kinds expanded in
    /// [`SessionKind::ALL`] order. Drafts without a period contribute
    /// nothing.
    pub fn creation_requests(&self) -> Vec<SectionCreationRequest> {
        let mut requests = Vec::new();
        for section in &self.sections {
            let Some(period_id) = section.period_id() else {
                continue;
            };
            for kind in SessionKind::ALL {
                for _ in 0..section.counts.get(kind) {
                    requests.push(SectionCreationRequest {
                        period_id: period_id.to_string(),
                        session: kind,
                        code: section.section_number,
                        group_id: section.id.clone(),
                    });
                }
            }
        }
        requests
    }

    /// Per-kind totals across all drafts.
    pub fn totals(&self) -> SessionCounts {
        let mut totals = SessionCounts::default();
        for section in &self.sections {
            for kind in SessionKind::ALL {
                totals.add(kind, section.counts.get(kind) as i64);
            }
        }
        totals
    }

    /// Check the draft list is submittable.
    ///
    /// Refused when no draft carries a period, or when the derived batch
    /// is empty. Callers surface this as a no-op, not a failure.
    pub fn validate_for_submit(&self) -> Result<()> {
        if !self.sections.iter().any(|s| s.period_id().is_some()) {
            return Err(AppError::validation(
                "no draft section has a period assigned",
            ));
        }
        if self.creation_requests().is_empty() {
            return Err(AppError::validation("derived request batch is empty"));
        }
        Ok(())
    }

    /// Drop drafts that carry neither a period nor any counts.
    pub fn prune_empty(&mut self) {
        let empty_ids: Vec<String> = self
            .sections
            .iter()
            .filter(|s| s.period_id().is_none() && s.counts.total() == 0)
            .map(|s| s.id.clone())
            .collect();
        for id in empty_ids {
            self.remove_section(&id);
        }
    }

    /// Replace the whole draft list with a single fresh empty draft.
    pub fn reset(&mut self) {
        self.sections = vec![DraftSection::new(1)];
    }

    fn section_mut(&mut self, section_id: &str) -> Option<&mut DraftSection> {
        self.sections.iter_mut().find(|s| s.id == section_id)
    }

    fn used_numbers(&self, exclude_id: Option<&str>) -> HashSet<u32> {
        self.sections
            .iter()
            .filter(|s| Some(s.id.as_str()) != exclude_id)
            .map(|s| s.section_number)
            .collect()
    }
}

impl Default for OfferBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Smallest positive integer not in `used` (first gap or one past the end).
fn first_gap(used: &HashSet<u32>) -> u32 {
    let mut sorted: Vec<u32> = used.iter().copied().collect();
    sorted.sort_unstable();

    let mut expected = 1;
    for number in sorted {
        if number > expected {
            break;
        }
        if number == expected {
            expected += 1;
        }
    }
    expected
}

/// Closest number to `requested` not in `used`, lower candidate winning
/// ties, probing at most `max_offsets` offsets before falling back to
/// [`first_gap`].
fn closest_available(requested: u32, used: &HashSet<u32>, max_offsets: usize) -> u32 {
    if !used.contains(&requested) {
        return requested;
    }
    for offset in 1..=max_offsets as i64 {
        let lower = requested as i64 - offset;
        if lower >= 1 && !used.contains(&(lower as u32)) {
            return lower as u32;
        }
        let upper = requested as i64 + offset;
        if upper <= u32::MAX as i64 && !used.contains(&(upper as u32)) {
            return upper as u32;
        }
    }
    first_gap(used)
}
