// src/services/api.rs

//! REST client for the scheduling service.
//!
//! Thin typed wrapper over the service's JSON endpoints. Mutating calls
//! carry the client's origin marker so the server can stamp it onto the
//! change feed, which is what makes self-echo suppression possible.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

use crate::builder::SectionCreationRequest;
use crate::error::{AppError, Result};
use crate::models::{
    Config, Faculty, Module, NewStaffRequest, Period, Professor, RequestDetail, Section,
    StaffRequest, Subject,
};
use crate::utils::http::create_async_client;
use crate::utils::{origin_marker, truncate_graphemes};

use super::ScheduleApi;

/// Header carrying the origin marker on mutating calls.
const ORIGIN_HEADER: &str = "X-Client-Origin";

/// Maximum length of an error body carried into an [`AppError::Api`].
const ERROR_BODY_MAX_GRAPHEMES: usize = 200;

/// Reqwest-backed implementation of [`ScheduleApi`].
pub struct ApiClient {
    config: Arc<Config>,
    client: Client,
    origin: String,
}

impl ApiClient {
    /// Create a client with a fresh per-process origin marker.
    pub fn new(config: Arc<Config>) -> Result<Self> {
        let client = create_async_client(&config.api)?;
        Ok(Self {
            config,
            client,
            origin: origin_marker(),
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        let base = Url::parse(&self.config.api.base_url)?;
        Ok(base.join(path)?)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.endpoint(path)?;
        let response = self.client.get(url).send().await?;
        Self::decode(response).await
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.endpoint(path)?;
        let response = self
            .client
            .post(url)
            .header(ORIGIN_HEADER, self.origin.as_str())
            .json(body)
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::api(
                status.as_u16(),
                truncate_graphemes(body.trim(), ERROR_BODY_MAX_GRAPHEMES),
            ));
        }
        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl ScheduleApi for ApiClient {
    async fn fetch_faculties(&self) -> Result<Vec<Faculty>> {
        self.get_json("faculties").await
    }

    async fn fetch_periods(&self) -> Result<Vec<Period>> {
        self.get_json("periods").await
    }

    async fn fetch_professors(&self) -> Result<Vec<Professor>> {
        self.get_json("professors").await
    }

    async fn fetch_modules(&self) -> Result<Vec<Module>> {
        self.get_json("modules").await
    }

    async fn fetch_subjects(&self) -> Result<Vec<Subject>> {
        self.get_json("subjects").await
    }

    async fn fetch_requests(&self, faculty_id: &str) -> Result<Vec<StaffRequest>> {
        self.get_json(&format!("requests/by-faculty/{faculty_id}"))
            .await
    }

    async fn fetch_request_details(&self, request_id: &str) -> Result<Vec<RequestDetail>> {
        self.get_json(&format!("requests/{request_id}/details")).await
    }

    async fn create_sections(
        &self,
        subject_id: &str,
        batch: &[SectionCreationRequest],
    ) -> Result<Vec<Section>> {
        self.post_json(
            &format!("sections/create-massive-by-subject/{subject_id}"),
            batch,
        )
        .await
    }

    async fn create_request(&self, request: &NewStaffRequest) -> Result<StaffRequest> {
        self.post_json("requests", request).await
    }

    async fn delete_request(&self, request_id: &str) -> Result<()> {
        let url = self.endpoint(&format!("requests/{request_id}"))?;
        let response = self
            .client
            .delete(url)
            .header(ORIGIN_HEADER, self.origin.as_str())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::api(
                status.as_u16(),
                truncate_graphemes(body.trim(), ERROR_BODY_MAX_GRAPHEMES),
            ));
        }
        Ok(())
    }

    fn origin(&self) -> &str {
        &self.origin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_client() -> ApiClient {
        ApiClient::new(Arc::new(Config::default())).unwrap()
    }

    #[test]
    fn test_endpoint_joins_relative_paths() {
        let client = make_client();
        let url = client.endpoint("periods").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/api/periods");

        let url = client
            .endpoint("sections/create-massive-by-subject/subj-1")
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8080/api/sections/create-massive-by-subject/subj-1"
        );
    }

    #[test]
    fn test_origin_marker_is_stable_per_client() {
        let client = make_client();
        assert_eq!(client.origin(), client.origin());
        assert!(!client.origin().is_empty());
    }

    #[test]
    fn test_clients_get_distinct_origins() {
        let a = make_client();
        let b = make_client();
        assert_ne!(a.origin(), b.origin());
    }
}
