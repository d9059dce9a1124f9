// src/commands/requests.rs

//! Staffing request create/delete.

use crate::error::Result;
use crate::models::{LocaleConfig, NewStaffRequest};
use crate::services::ScheduleApi;
use crate::utils::log;

/// Create a staffing request for a subject under a faculty.
pub async fn run_request_create(
    api: &dyn ScheduleApi,
    locale: &LocaleConfig,
    faculty_id: &str,
    subject_id: &str,
    professor_id: Option<&str>,
) -> Result<()> {
    let body = NewStaffRequest {
        faculty_id: faculty_id.to_string(),
        subject_id: subject_id.to_string(),
        professor_id: professor_id.map(str::to_string),
    };

    let created = api.create_request(&body).await?;
    log::success(
        &locale
            .messages
            .request_create_success
            .replace("{id}", &created.id)
            .replace("{faculty}", &created.faculty_id),
    );
    Ok(())
}

/// Delete a staffing request by id.
pub async fn run_request_delete(
    api: &dyn ScheduleApi,
    locale: &LocaleConfig,
    request_id: &str,
) -> Result<()> {
    api.delete_request(request_id).await?;
    log::success(
        &locale
            .messages
            .request_delete_success
            .replace("{id}", request_id),
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use crate::builder::SectionCreationRequest;
    use crate::models::{
        Faculty, Module, Period, Professor, RequestDetail, Section, StaffRequest, Subject,
    };

    use super::*;

    #[derive(Default)]
    struct StubApi {
        deleted: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl ScheduleApi for StubApi {
        async fn fetch_faculties(&self) -> Result<Vec<Faculty>> {
            Ok(Vec::new())
        }

        async fn fetch_periods(&self) -> Result<Vec<Period>> {
            Ok(Vec::new())
        }

        async fn fetch_professors(&self) -> Result<Vec<Professor>> {
            Ok(Vec::new())
        }

        async fn fetch_modules(&self) -> Result<Vec<Module>> {
            Ok(Vec::new())
        }

        async fn fetch_subjects(&self) -> Result<Vec<Subject>> {
            Ok(Vec::new())
        }

        async fn fetch_requests(&self, _faculty_id: &str) -> Result<Vec<StaffRequest>> {
            Ok(Vec::new())
        }

        async fn fetch_request_details(&self, _request_id: &str) -> Result<Vec<RequestDetail>> {
            Ok(Vec::new())
        }

        async fn create_sections(
            &self,
            _subject_id: &str,
            _batch: &[SectionCreationRequest],
        ) -> Result<Vec<Section>> {
            Ok(Vec::new())
        }

        async fn create_request(&self, request: &NewStaffRequest) -> Result<StaffRequest> {
            Ok(StaffRequest {
                id: "r-new".to_string(),
                faculty_id: request.faculty_id.clone(),
                subject_id: Some(request.subject_id.clone()),
                professor_id: request.professor_id.clone(),
                status: Some("pending".to_string()),
            })
        }

        async fn delete_request(&self, request_id: &str) -> Result<()> {
            self.deleted.lock().unwrap().push(request_id.to_string());
            Ok(())
        }

        fn origin(&self) -> &str {
            "stub-origin"
        }
    }

    #[tokio::test]
    async fn test_request_create_round_trips() {
        let api = StubApi::default();
        run_request_create(
            &api,
            &LocaleConfig::default(),
            "f1",
            "subj-1",
            Some("prof-2"),
        )
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn test_request_delete_calls_api() {
        let api = StubApi::default();
        run_request_delete(&api, &LocaleConfig::default(), "r9")
            .await
            .unwrap();
        assert_eq!(*api.deleted.lock().unwrap(), vec!["r9".to_string()]);
    }
}
