//! Contact submission transport
//!
//! The form hands a validated payload to a `ContactTransport` and gets back a
//! `SubmissionResult`. `Http` posts to a contact backend; `Mock` answers
//! locally and records what it was sent (used by tests and `--mock`).

use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{Context, Result};

use super::ValidContact;

/// Shown when the backend gives no usable reason
pub const DEFAULT_FAILURE_MESSAGE: &str = "Failed to submit request";

/// Path of the submit route, relative to the endpoint
pub const CONTACT_PATH: &str = "/api/contact";

/// JSON body of `POST /api/contact`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub email: String,
    pub message: String,
}

impl From<ValidContact> for ContactRequest {
    fn from(valid: ValidContact) -> Self {
        Self {
            name: valid.name,
            email: valid.email,
            message: valid.message,
        }
    }
}

/// 200 response body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitResponse {
    pub success: bool,
}

/// 4xx/5xx response body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
}

/// Outcome of one submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionResult {
    pub success: bool,
    pub message: Option<String>,
}

impl SubmissionResult {
    pub fn ok() -> Self {
        Self {
            success: true,
            message: None,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
        }
    }

    /// Human-readable failure reason
    pub fn error_message(&self) -> &str {
        self.message
            .as_deref()
            .filter(|m| !m.trim().is_empty())
            .unwrap_or(DEFAULT_FAILURE_MESSAGE)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Transports
// ─────────────────────────────────────────────────────────────────────────────

/// Where submissions go
#[derive(Debug, Clone)]
pub enum ContactTransport {
    Http(HttpTransport),
    Mock(MockTransport),
}

impl ContactTransport {
    pub async fn submit(&self, request: &ContactRequest) -> SubmissionResult {
        match self {
            ContactTransport::Http(http) => http.submit(request).await,
            ContactTransport::Mock(mock) => mock.submit(request).await,
        }
    }

    /// Short label for logs and the banner
    pub fn describe(&self) -> String {
        match self {
            ContactTransport::Http(http) => http.url.clone(),
            ContactTransport::Mock(_) => "mock (local)".to_string(),
        }
    }
}

/// Posts JSON to `{endpoint}/api/contact`
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    url: String,
}

impl HttpTransport {
    pub fn new(endpoint: &str) -> Result<Self> {
        // No request timeout: the form stays in Submitting until the backend answers
        let client = reqwest::Client::builder()
            .user_agent(concat!("pitchdeck/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            url: format!("{}{}", endpoint.trim_end_matches('/'), CONTACT_PATH),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    async fn submit(&self, request: &ContactRequest) -> SubmissionResult {
        let response = match self.client.post(&self.url).json(request).send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(url = %self.url, error = %e, "contact submission failed to send");
                return SubmissionResult::failed(DEFAULT_FAILURE_MESSAGE);
            }
        };

        let status = response.status();
        if status.is_success() {
            // Older backends may answer 200 with an empty body
            let success = response
                .json::<SubmitResponse>()
                .await
                .map(|body| body.success)
                .unwrap_or(true);
            tracing::info!(%status, success, "contact submission answered");
            return if success {
                SubmissionResult::ok()
            } else {
                SubmissionResult::failed(DEFAULT_FAILURE_MESSAGE)
            };
        }

        let message = response
            .json::<ErrorResponse>()
            .await
            .map(|body| body.message)
            .unwrap_or_else(|_| DEFAULT_FAILURE_MESSAGE.to_string());
        tracing::warn!(%status, %message, "contact submission rejected");
        SubmissionResult::failed(message)
    }
}

/// In-process transport with a fixed answer
#[derive(Debug, Clone)]
pub struct MockTransport {
    outcome: SubmissionResult,
    delay: Duration,
    received: Arc<Mutex<Vec<ContactRequest>>>,
}

impl MockTransport {
    pub fn succeeding() -> Self {
        Self::with_outcome(SubmissionResult::ok())
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self::with_outcome(SubmissionResult::failed(message))
    }

    pub fn with_outcome(outcome: SubmissionResult) -> Self {
        Self {
            outcome,
            delay: Duration::ZERO,
            received: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Simulated round-trip time
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Requests seen so far (shared between clones)
    pub fn received(&self) -> Vec<ContactRequest> {
        self.received
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }

    async fn submit(&self, request: &ContactRequest) -> SubmissionResult {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        if let Ok(mut received) = self.received.lock() {
            received.push(request.clone());
        }
        tracing::debug!(success = self.outcome.success, "mock contact submission");
        self.outcome.clone()
    }
}
