//! HTTP client for the management controller.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, header::LOCATION};
use serde_json::Value;
use tracing::debug;

use super::models::{ImportRequest, JobHandle, JobStatusSnapshot};
use super::{IMPORT_ACTION_PATH, MANAGER_PATH, RedfishError, TASKS_PATH};
use crate::core::poller::JobStatusSource;

/// Basic-auth credentials for the controller.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

pub struct RedfishClient {
    base_url: String,
    credentials: Credentials,
    client: Client,
}

impl RedfishClient {
    /// Create a client for the controller at `base_url`, e.g. `https://192.0.2.1`.
    ///
    /// Controllers ship with self-signed certificates, so certificate
    /// validation for the management API is always off.
    pub fn new(
        base_url: &str,
        credentials: Credentials,
        timeout: Duration,
    ) -> Result<Self, RedfishError> {
        let client = Client::builder()
            .danger_accept_invalid_certs(true)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            credentials,
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Submit the import action and return the job created for it.
    ///
    /// Anything other than `202 Accepted` with a `JID_...` in the `Location`
    /// header is an error.
    pub async fn import_system_configuration(
        &self,
        request: &ImportRequest,
    ) -> Result<JobHandle, RedfishError> {
        let url = format!("{}{}", self.base_url, IMPORT_ACTION_PATH);
        let response = self
            .client
            .post(&url)
            .basic_auth(&self.credentials.username, Some(&self.credentials.password))
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let location = response
            .headers()
            .get(LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        let body = response.text().await.unwrap_or_default();

        debug!(status = %status, location = ?location, "Import action response");

        if status != StatusCode::ACCEPTED {
            return Err(RedfishError::SubmissionRejected {
                status: status.as_u16(),
                body,
            });
        }

        location
            .as_deref()
            .and_then(JobHandle::extract)
            .ok_or(RedfishError::MissingJobId { body })
    }

    /// Fetch the current state of a job.
    pub async fn get_job_status(&self, job: &JobHandle) -> Result<JobStatusSnapshot, RedfishError> {
        let url = format!("{}{}/{}", self.base_url, TASKS_PATH, job);
        let response = self
            .client
            .get(&url)
            .basic_auth(&self.credentials.username, Some(&self.credentials.password))
            .send()
            .await?;

        let status = response.status();
        if !(status.is_success() || status.is_redirection()) {
            return Err(RedfishError::PollFailed {
                job_id: job.to_string(),
                status: status.as_u16(),
            });
        }

        let document: Value = response.json().await?;
        JobStatusSnapshot::from_value(&document)
    }

    /// Fetch the manager resource, which advertises the import action's
    /// allowable parameter values.
    pub async fn get_manager(&self) -> Result<Value, RedfishError> {
        let url = format!("{}{}", self.base_url, MANAGER_PATH);
        let response = self
            .client
            .get(&url)
            .basic_auth(&self.credentials.username, Some(&self.credentials.password))
            .send()
            .await?
            .error_for_status()?;

        Ok(response.json().await?)
    }
}

#[async_trait]
impl JobStatusSource for RedfishClient {
    async fn job_status(&self, job: &JobHandle) -> Result<JobStatusSnapshot, RedfishError> {
        self.get_job_status(job).await
    }
}
