// src/sync/cache.rs

//! Partitioned in-memory query cache.
//!
//! Cached collections are keyed by the entity's own foreign key: staffing
//! requests by `facultyId`, request details by `requestId`. All mutation
//! funnels through [`QueryCache::apply_request`] and
//! [`QueryCache::apply_detail`]; no other code path touches the
//! collections.

use std::collections::HashMap;

use crate::models::{RequestDetail, StaffRequest};

use super::events::ChangeAction;

/// An entity that can live in a cached collection.
pub trait CacheEntity {
    /// Unique entity id within its collection.
    fn entity_id(&self) -> &str;
}

impl CacheEntity for StaffRequest {
    fn entity_id(&self) -> &str {
        &self.id
    }
}

impl CacheEntity for RequestDetail {
    fn entity_id(&self) -> &str {
        &self.id
    }
}

/// In-memory store of server entity collections.
#[derive(Debug, Default)]
pub struct QueryCache {
    requests_by_faculty: HashMap<String, Vec<StaffRequest>>,
    details_by_request: HashMap<String, Vec<RequestDetail>>,
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the request partition for a faculty from a fetch result.
    pub fn seed_requests(&mut self, faculty_id: &str, requests: Vec<StaffRequest>) {
        self.requests_by_faculty
            .insert(faculty_id.to_string(), requests);
    }

    /// Seed the detail partition for a request from a fetch result.
    pub fn seed_details(&mut self, request_id: &str, details: Vec<RequestDetail>) {
        self.details_by_request
            .insert(request_id.to_string(), details);
    }

    /// Cached requests for a faculty (empty when never seeded).
    pub fn requests(&self, faculty_id: &str) -> &[StaffRequest] {
        self.requests_by_faculty
            .get(faculty_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Cached details for a request (empty when never seeded).
    pub fn details(&self, request_id: &str) -> &[RequestDetail] {
        self.details_by_request
            .get(request_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Patch the request partition keyed by the entity's faculty.
    pub fn apply_request(&mut self, action: ChangeAction, entity: StaffRequest) {
        let partition = self
            .requests_by_faculty
            .entry(entity.faculty_id.clone())
            .or_default();
        patch(partition, action, entity);
    }

    /// Patch the detail partition keyed by the entity's request.
    pub fn apply_detail(&mut self, action: ChangeAction, entity: RequestDetail) {
        let partition = self
            .details_by_request
            .entry(entity.request_id.clone())
            .or_default();
        patch(partition, action, entity);
    }

    /// Total number of cached entities across all partitions.
    pub fn len(&self) -> usize {
        let requests: usize = self.requests_by_faculty.values().map(Vec::len).sum();
        let details: usize = self.details_by_request.values().map(Vec::len).sum();
        requests + details
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Apply one action to a cached collection.
///
/// Create is an idempotent insert (existing ids are left alone). Update
/// replaces a matching id and leaves the collection unchanged when the
/// id is absent (no upsert). Delete removes a matching id.
fn patch<T: CacheEntity>(collection: &mut Vec<T>, action: ChangeAction, entity: T) {
    match action {
        ChangeAction::Create => {
            let exists = collection
                .iter()
                .any(|e| e.entity_id() == entity.entity_id());
            if !exists {
                collection.push(entity);
            }
        }
        ChangeAction::Update => {
            if let Some(slot) = collection
                .iter_mut()
                .find(|e| e.entity_id() == entity.entity_id())
            {
                *slot = entity;
            }
        }
        ChangeAction::Delete => {
            collection.retain(|e| e.entity_id() != entity.entity_id());
        }
    }
}
