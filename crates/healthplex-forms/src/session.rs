//! A single-page form being filled in: live state, autosaved drafts and
//! submission.

use std::time::{Duration, Instant};

use healthplex_core::schema::FormSchema;
use healthplex_core::state::FormState;
use healthplex_core::validate::{validate_form, FieldError};
use healthplex_core::{FlatFormData, FormType};
use healthplex_payload::{build_payload, StructuredPayload, SubmissionContext};

use crate::config::{FormSettings, FormsConfig};
use crate::draft::{self, DraftStore};
use crate::error::FormsError;
use crate::webhook::{SubmissionResult, Submitter};

pub const REQUIRED_FIELDS_MESSAGE: &str = "Please fill out all required fields.";

pub struct FormSession {
    form_type: FormType,
    state: FormState,
    settings: FormSettings,
    webhook_url: String,
    drafts: Box<dyn DraftStore>,
    submitter: Submitter,
    last_saved: Option<Instant>,
}

impl FormSession {
    /// Open a form, restoring its draft when draft saving is enabled.
    pub fn open(
        form_type: FormType,
        config: &FormsConfig,
        drafts: Box<dyn DraftStore>,
        submitter: Submitter,
    ) -> Result<Self, FormsError> {
        let mut session = Self {
            form_type,
            state: FormState::new(FormSchema::for_form(form_type)),
            settings: config.settings.clone(),
            webhook_url: config.webhook_url(form_type).to_string(),
            drafts,
            submitter,
            last_saved: None,
        };
        if session.settings.enable_draft_saving {
            session.restore_draft()?;
        }
        Ok(session)
    }

    pub fn form_type(&self) -> FormType {
        self.form_type
    }

    pub fn settings(&self) -> &FormSettings {
        &self.settings
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn schema(&self) -> &FormSchema {
        self.state.schema()
    }

    pub fn data(&self) -> FlatFormData {
        self.state.collect()
    }

    pub(crate) fn drafts(&self) -> &dyn DraftStore {
        self.drafts.as_ref()
    }

    /// Set a text, number, select or radio control. Saves the draft.
    pub fn set_value(&mut self, name: &str, value: impl Into<String>) -> Result<(), FormsError> {
        self.state.set_value(name, value)?;
        self.autosave()
    }

    /// Tick or untick a checkbox. Saves the draft.
    pub fn set_checked(&mut self, name: &str, checked: bool) -> Result<(), FormsError> {
        self.state.set_checked(name, checked)?;
        self.autosave()
    }

    pub fn validate(&self) -> Vec<FieldError> {
        validate_form(self.schema(), &self.data())
    }

    /// Returns whether a draft was found.
    pub fn restore_draft(&mut self) -> Result<bool, FormsError> {
        let Some(saved) = draft::load_draft(self.drafts(), self.form_type)? else {
            return Ok(false);
        };
        self.state.restore(&saved);
        tracing::info!(form = self.form_type.key(), "draft restored");
        Ok(true)
    }

    pub fn save_draft(&mut self) -> Result<(), FormsError> {
        draft::save_draft(self.drafts.as_ref(), self.form_type, &self.state.collect())?;
        self.last_saved = Some(Instant::now());
        Ok(())
    }

    pub fn clear_draft(&mut self) -> Result<(), FormsError> {
        draft::clear_draft(self.drafts.as_ref(), self.form_type)?;
        self.last_saved = None;
        Ok(())
    }

    /// Periodic autosave. Saves when the draft interval has passed since the
    /// last save; returns whether it did.
    pub fn tick(&mut self, now: Instant) -> Result<bool, FormsError> {
        if !self.settings.enable_draft_saving {
            return Ok(false);
        }
        let due = self.last_saved.is_none_or(|at| {
            now.saturating_duration_since(at) >= self.settings.draft_save_interval()
        });
        if due {
            self.save_draft()?;
            self.last_saved = Some(now);
        }
        Ok(due)
    }

    fn autosave(&mut self) -> Result<(), FormsError> {
        if self.settings.enable_draft_saving {
            self.save_draft()?;
        }
        Ok(())
    }

    pub fn build(&self, ctx: &SubmissionContext) -> Result<StructuredPayload, FormsError> {
        Ok(build_payload(self.form_type, &self.data(), ctx)?)
    }

    /// Validate, build and send the form.
    pub fn submit(&mut self, ctx: &SubmissionContext) -> SubmissionResult {
        let errors = self.validate();
        if !errors.is_empty() {
            tracing::debug!(form = self.form_type.key(), errors = errors.len(), "validation failed");
            return SubmissionResult::failed(REQUIRED_FIELDS_MESSAGE);
        }
        let payload = match self.build(ctx) {
            Ok(payload) => payload,
            Err(e) => return SubmissionResult::failed(e.to_string()),
        };
        let timeout = self.submitter.timeout();
        self.send(&payload, timeout)
    }

    /// POST an already built payload. On success the draft is cleared; on
    /// failure it is saved so the user can retry.
    pub(crate) fn send(&mut self, payload: &StructuredPayload, limit: Duration) -> SubmissionResult {
        let mut result = self.submitter.submit_within(&self.webhook_url, payload, limit);
        if result.success {
            if let Err(e) = self.clear_draft() {
                tracing::warn!(error = %e, "failed to clear draft after submission");
            }
        } else if self.settings.enable_draft_saving {
            match self.save_draft() {
                Ok(()) => result.draft_preserved = true,
                Err(e) => tracing::warn!(error = %e, "failed to save draft after failed submission"),
            }
        }
        result
    }

    /// Clear every control.
    pub fn reset(&mut self) {
        self.state.reset();
    }
}
