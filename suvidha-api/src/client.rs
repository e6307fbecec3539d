//! Async client for the external complaint service.

use crate::error::{ApiError, Result};
use crate::model::{Complaint, CreateComplaintResponse, NewComplaint, StatusUpdate};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::time::Duration;
use suvidha_core::KioskConfig;
use tracing::{debug, warn};

/// Operations against the complaint service, as a seam so the kiosk engine
/// can run against a test double.
#[async_trait]
pub trait ComplaintApi: Send + Sync {
    async fn create_complaint(&self, complaint: &NewComplaint) -> Result<CreateComplaintResponse>;
    async fn get_complaint(&self, id: u64) -> Result<Complaint>;
    async fn update_status(&self, id: u64, update: &StatusUpdate) -> Result<Complaint>;
}

/// reqwest-backed implementation. One attempt per call; retries are a user
/// action, never automatic.
pub struct ComplaintClient {
    http: reqwest::Client,
    base_url: String,
}

impl ComplaintClient {
    pub fn new(cfg: &KioskConfig) -> Result<ComplaintClient> {
        ComplaintClient::with_base_url(
            &cfg.api_base_url,
            Duration::from_millis(cfg.request_timeout_ms),
        )
    }

    pub fn with_base_url(base_url: &str, timeout: Duration) -> Result<ComplaintClient> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ApiError::Network)?;
        Ok(ComplaintClient {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn decode<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T> {
        let status = resp.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound);
        }
        if !status.is_success() {
            warn!(status = status.as_u16(), "complaint service returned an error");
            return Err(ApiError::Server { status: status.as_u16() });
        }
        resp.json::<T>().await.map_err(ApiError::Decode)
    }
}

#[async_trait]
impl ComplaintApi for ComplaintClient {
    async fn create_complaint(&self, complaint: &NewComplaint) -> Result<CreateComplaintResponse> {
        let url = self.endpoint("/complaints/");
        debug!(%url, issue_type = %complaint.issue_type, "submitting complaint");
        let resp = self
            .http
            .post(&url)
            .json(complaint)
            .send()
            .await
            .map_err(ApiError::Network)?;
        Self::decode(resp).await
    }

    async fn get_complaint(&self, id: u64) -> Result<Complaint> {
        let url = self.endpoint(&format!("/complaints/{id}/"));
        debug!(%url, "fetching complaint");
        let resp = self.http.get(&url).send().await.map_err(ApiError::Network)?;
        Self::decode(resp).await
    }

    async fn update_status(&self, id: u64, update: &StatusUpdate) -> Result<Complaint> {
        let url = self.endpoint(&format!("/complaints/{id}/"));
        debug!(%url, status = %update.status, "updating complaint status");
        let resp = self
            .http
            .patch(&url)
            .json(update)
            .send()
            .await
            .map_err(ApiError::Network)?;
        Self::decode(resp).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_without_duplicate_slashes() {
        let client =
            ComplaintClient::with_base_url("http://kiosk.local/api/", Duration::from_secs(5))
                .unwrap();
        assert_eq!(client.endpoint("/complaints/"), "http://kiosk.local/api/complaints/");
        assert_eq!(client.endpoint("/complaints/7/"), "http://kiosk.local/api/complaints/7/");
    }
}
