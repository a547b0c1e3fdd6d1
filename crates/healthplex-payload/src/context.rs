use serde::Serialize;

use healthplex_core::FormType;

/// Everything about a submission that does not come from the form itself.
///
/// Captured once per attempt and passed in, so the same data and context
/// always build the same JSON.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionContext {
    pub submitted_at: jiff::Timestamp,
    /// IANA zone name of the submitting device.
    pub timezone: String,
    pub user_agent: String,
}

impl SubmissionContext {
    pub fn new(
        submitted_at: jiff::Timestamp,
        timezone: impl Into<String>,
        user_agent: impl Into<String>,
    ) -> Self {
        Self {
            submitted_at,
            timezone: timezone.into(),
            user_agent: user_agent.into(),
        }
    }

    /// Context for a submission made right now from this machine.
    pub fn now() -> Self {
        let tz = jiff::tz::TimeZone::system();
        Self {
            submitted_at: jiff::Timestamp::now(),
            timezone: tz.iana_name().unwrap_or("UTC").to_string(),
            user_agent: format!("healthplex-forms/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    /// RFC 3339 with millisecond precision, e.g. `2025-03-04T15:20:00.000Z`.
    pub fn submitted_at_rfc3339(&self) -> String {
        format!("{:.3}", self.submitted_at)
    }

    /// UTC calendar date of the submission, `YYYY-MM-DD`.
    pub fn submitted_on(&self) -> String {
        self.submitted_at.strftime("%Y-%m-%d").to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Meta {
    pub form_type: FormType,
    pub form_name: String,
    pub submitted_at: String,
    pub timezone: String,
    pub user_agent: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_steps: Option<Vec<u8>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_time_minutes: Option<i64>,
}

impl Meta {
    pub fn new(form_type: FormType, ctx: &SubmissionContext) -> Self {
        Self {
            form_type,
            form_name: form_type.display_name().to_string(),
            submitted_at: ctx.submitted_at_rfc3339(),
            timezone: ctx.timezone.clone(),
            user_agent: ctx.user_agent.clone(),
            completed_steps: None,
            total_time_minutes: None,
        }
    }
}
