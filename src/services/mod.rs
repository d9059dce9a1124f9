//! Service layer for the offerdesk client.
//!
//! [`ScheduleApi`] is the seam over the scheduling service's REST
//! contract; [`ApiClient`] is the reqwest-backed implementation.
//! Commands depend on the trait so tests can substitute a stub.

mod api;

use async_trait::async_trait;

use crate::builder::SectionCreationRequest;
use crate::error::Result;
use crate::models::{
    Faculty, Module, NewStaffRequest, Period, Professor, RequestDetail, Section, StaffRequest,
    Subject,
};

pub use api::ApiClient;

/// The REST operations consumed by this client.
#[async_trait]
pub trait ScheduleApi: Send + Sync {
    async fn fetch_faculties(&self) -> Result<Vec<Faculty>>;

    async fn fetch_periods(&self) -> Result<Vec<Period>>;

    async fn fetch_professors(&self) -> Result<Vec<Professor>>;

    async fn fetch_modules(&self) -> Result<Vec<Module>>;

    /// Course offerings (plan files name sections by subject id).
    async fn fetch_subjects(&self) -> Result<Vec<Subject>>;

    /// Staffing requests owned by one faculty.
    async fn fetch_requests(&self, faculty_id: &str) -> Result<Vec<StaffRequest>>;

    /// Per-session staffing lines under one request.
    async fn fetch_request_details(&self, request_id: &str) -> Result<Vec<RequestDetail>>;

    /// Batch-create sections for a subject. One creation request per
    /// session unit; returns the created sections.
    async fn create_sections(
        &self,
        subject_id: &str,
        batch: &[SectionCreationRequest],
    ) -> Result<Vec<Section>>;

    async fn create_request(&self, request: &NewStaffRequest) -> Result<StaffRequest>;

    async fn delete_request(&self, request_id: &str) -> Result<()>;

    /// This client's origin marker, echoed back on the change feed.
    fn origin(&self) -> &str;
}
