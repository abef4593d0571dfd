//! One-shot request client for the SIRAJ backend.
//!
//! Each operation performs a single request/response call and returns its
//! own `Result`, so concurrent calls never share loading or error state.
//! No call is retried; the caller decides whether to try again.

use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use tracing::debug;

use siraj_core::error::{Result, SirajError};

use crate::config::ClientConfig;
use crate::types::{
    AnalyticsReport, AnalyticsRequest, ArchetypeCatalog, CurriculumAlignment, CurriculumRequest,
    CurriculumStandard, EducationalRequest, EducationalResponse, HomeworkFeedback,
    HomeworkSubmission, ProgressAck, ProgressUpdate, StandardsEnvelope, StudentProgressReport,
    SystemHealth,
};

/// HTTP client for the backend's one-shot operations.
#[derive(Clone)]
pub struct SirajApiClient {
    client: Client,
    base_url: String,
}

impl SirajApiClient {
    /// Creates a client from the endpoint configuration.
    ///
    /// # Errors
    ///
    /// Returns a config error if the underlying HTTP client cannot be built.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| SirajError::config(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            base_url: config.api_url.trim_end_matches('/').to_string(),
        })
    }

    /// Checks backend health.
    pub async fn health(&self) -> Result<SystemHealth> {
        self.get("/health").await
    }

    /// Fetches the backend's archetype catalog.
    pub async fn list_archetypes(&self) -> Result<ArchetypeCatalog> {
        self.get("/council/archetypes").await
    }

    /// Submits a non-streamed question to the full council.
    pub async fn process_question(
        &self,
        request: &EducationalRequest,
    ) -> Result<EducationalResponse> {
        self.post("/api/education/process", request).await
    }

    /// Submits homework for multi-archetype feedback.
    pub async fn submit_homework(&self, submission: &HomeworkSubmission) -> Result<HomeworkFeedback> {
        self.post("/api/education/homework", submission).await
    }

    /// Fetches the analytics report for a timeframe.
    pub async fn fetch_analytics(&self, request: &AnalyticsRequest) -> Result<AnalyticsReport> {
        self.post("/api/analytics/fetch", request).await
    }

    /// Generates a council-driven curriculum alignment.
    pub async fn align_curriculum(&self, request: &CurriculumRequest) -> Result<CurriculumAlignment> {
        self.post("/api/curriculum/align", request).await
    }

    /// Lists the curriculum standards the backend can align against.
    pub async fn curriculum_standards(&self) -> Result<HashMap<String, CurriculumStandard>> {
        let envelope: StandardsEnvelope = self.get("/api/curriculum/standards").await?;
        Ok(envelope.standards)
    }

    /// Records a student progress update.
    pub async fn update_progress(&self, update: &ProgressUpdate) -> Result<ProgressAck> {
        self.post("/api/progress/update", update).await
    }

    /// Fetches a student's progress report.
    pub async fn student_progress(
        &self,
        student_id: &str,
        timeframe: &str,
    ) -> Result<StudentProgressReport> {
        let path = format!("/api/progress/student/{student_id}?timeframe={timeframe}");
        self.get(&path).await
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        debug!(path, "GET");
        let response = self
            .client
            .get(format!("{}{}", self.base_url, path))
            .send()
            .await
            .map_err(transport_error)?;
        Self::decode(response).await
    }

    async fn post<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        debug!(path, "POST");
        let response = self
            .client
            .post(format!("{}{}", self.base_url, path))
            .json(body)
            .send()
            .await
            .map_err(transport_error)?;
        Self::decode(response).await
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error body".to_string());
            return Err(map_http_error(status, &body));
        }
        response
            .json()
            .await
            .map_err(|e| SirajError::parse(format!("Failed to decode backend response: {e}")))
    }
}

fn transport_error(err: reqwest::Error) -> SirajError {
    SirajError::request(None, format!("Backend request failed: {err}"))
}

/// FastAPI error envelope; non-2xx bodies carry a human-readable `detail`.
#[derive(Deserialize)]
struct ErrorEnvelope {
    detail: String,
}

fn map_http_error(status: StatusCode, body: &str) -> SirajError {
    let message = serde_json::from_str::<ErrorEnvelope>(body)
        .map(|envelope| envelope.detail)
        .unwrap_or_else(|_| {
            if body.is_empty() {
                status.to_string()
            } else {
                body.to_string()
            }
        });
    SirajError::request(Some(status.as_u16()), message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_error_prefers_detail_field() {
        let err = map_http_error(
            StatusCode::SERVICE_UNAVAILABLE,
            r#"{"detail":"Multi-instance router unavailable"}"#,
        );
        assert_eq!(err.status(), Some(503));
        assert_eq!(
            err.to_string(),
            "Request error: Multi-instance router unavailable"
        );
    }

    #[test]
    fn http_error_falls_back_to_raw_body() {
        let err = map_http_error(StatusCode::BAD_GATEWAY, "upstream hiccup");
        assert_eq!(err.status(), Some(502));
        assert_eq!(err.to_string(), "Request error: upstream hiccup");
    }

    #[test]
    fn http_error_with_empty_body_uses_status_line() {
        let err = map_http_error(StatusCode::NOT_FOUND, "");
        assert_eq!(err.status(), Some(404));
        assert!(err.to_string().contains("404"));
    }

    #[test]
    fn base_url_trailing_slash_is_normalized() {
        let config = ClientConfig {
            api_url: "http://localhost:8000/".to_string(),
            ..ClientConfig::default()
        };
        let client = SirajApiClient::new(&config).unwrap();
        assert_eq!(client.base_url, "http://localhost:8000");
    }
}
