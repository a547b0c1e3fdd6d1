//! Webhook submission.
//!
//! The payload is POSTed as JSON to the n8n webhook configured for its form
//! type. The transport sits behind [`WebhookTransport`] so sessions can be
//! driven without a network.

use std::time::Duration;

use serde::Serialize;

use healthplex_payload::StructuredPayload;

use crate::config::is_configured;
use crate::error::SubmitError;

/// Response bodies longer than this are cut when shown as an error.
pub const ERROR_BODY_LIMIT: usize = 200;

pub const SUCCESS_MESSAGE: &str = "Form submitted successfully";

pub const DRAFT_PRESERVED_NOTICE: &str =
    "Your information has been saved locally. Please try submitting again.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    /// `None` when the body could not be read.
    pub body: Option<String>,
}

pub trait WebhookTransport {
    fn post_json(
        &self,
        url: &str,
        body: &str,
        timeout: Duration,
    ) -> Result<TransportResponse, SubmitError>;
}

/// Blocking HTTP via ureq. A fresh agent is built per request so each call
/// gets its own overall timeout.
#[derive(Debug, Clone, Copy, Default)]
pub struct UreqTransport;

impl WebhookTransport for UreqTransport {
    fn post_json(
        &self,
        url: &str,
        body: &str,
        timeout: Duration,
    ) -> Result<TransportResponse, SubmitError> {
        let config = ureq::Agent::config_builder()
            .timeout_global(Some(timeout))
            .http_status_as_error(false)
            .build();
        let agent = ureq::Agent::new_with_config(config);

        let mut response = agent
            .post(url)
            .header("Content-Type", "application/json")
            .send(body)
            .map_err(|e| match e {
                ureq::Error::Timeout(_) => SubmitError::Timeout,
                other => SubmitError::Transport(other.to_string()),
            })?;

        let status = response.status().as_u16();
        let body = response.body_mut().read_to_string().ok();
        Ok(TransportResponse { status, body })
    }
}

/// Outcome of a submission as shown to the user. Never an error: every
/// failure becomes `success: false` with a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionResult {
    pub success: bool,
    pub message: String,
    /// The form data is still saved as a draft and can be resubmitted.
    pub draft_preserved: bool,
}

impl SubmissionResult {
    pub fn succeeded() -> Self {
        Self {
            success: true,
            message: SUCCESS_MESSAGE.to_string(),
            draft_preserved: false,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            draft_preserved: false,
        }
    }

    /// Reassurance shown under a failure message when the draft was kept.
    pub fn notice(&self) -> Option<&'static str> {
        (!self.success && self.draft_preserved).then_some(DRAFT_PRESERVED_NOTICE)
    }
}

pub struct Submitter {
    transport: Box<dyn WebhookTransport>,
    timeout: Duration,
}

impl Submitter {
    pub fn new(transport: Box<dyn WebhookTransport>, timeout: Duration) -> Self {
        Self { transport, timeout }
    }

    /// ureq-backed submitter with the given request timeout.
    pub fn http(timeout: Duration) -> Self {
        Self::new(Box::new(UreqTransport), timeout)
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn submit(&self, url: &str, payload: &StructuredPayload) -> SubmissionResult {
        self.submit_within(url, payload, self.timeout)
    }

    /// Submit with a tighter limit than the configured one.
    pub fn submit_within(
        &self,
        url: &str,
        payload: &StructuredPayload,
        limit: Duration,
    ) -> SubmissionResult {
        let form = payload.form_type().key();
        match self.try_submit(url, payload, limit.min(self.timeout)) {
            Ok(()) => {
                tracing::info!(form, "submission accepted");
                SubmissionResult::succeeded()
            }
            Err(e) => {
                tracing::warn!(form, error = %e, "submission failed");
                SubmissionResult::failed(e.to_string())
            }
        }
    }

    pub fn try_submit(
        &self,
        url: &str,
        payload: &StructuredPayload,
        timeout: Duration,
    ) -> Result<(), SubmitError> {
        if !is_configured(url) {
            return Err(SubmitError::NotConfigured);
        }
        let body = payload.to_json()?;
        tracing::debug!(url, bytes = body.len(), "posting payload");

        let response = self.transport.post_json(url, &body, timeout)?;
        if (200..300).contains(&response.status) {
            return Ok(());
        }
        Err(SubmitError::Rejected {
            status: response.status,
            message: rejection_message(response.status, response.body.as_deref()),
        })
    }
}

/// The first [`ERROR_BODY_LIMIT`] characters of a non-empty body, else a
/// generic status line.
fn rejection_message(status: u16, body: Option<&str>) -> String {
    match body.map(str::trim) {
        Some(text) if !text.is_empty() => text.chars().take(ERROR_BODY_LIMIT).collect(),
        _ => format!("Submission failed (status {status})"),
    }
}
