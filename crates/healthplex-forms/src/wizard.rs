//! The eight-step intake wizard.
//!
//! Steps are validated on the way forward. A step can only be reached by
//! jump once the step before it has been validated. Optional steps 3 to 7
//! warn once when left blank; the user may continue anyway.

use std::collections::{BTreeMap, BTreeSet};
use std::time::{Duration, Instant};

use serde::Serialize;

use healthplex_core::collect::ControlKind;
use healthplex_core::field::is_question_field;
use healthplex_core::schema::{step, SPOUSE_ATTENDANCE_CONFIRM, WIZARD_DURATION};
use healthplex_core::validate::{validate_step, FieldError};
use healthplex_core::{FieldValue, FlatFormData, FormType};
use healthplex_export::render::render_review_summary;
use healthplex_export::{build_attachment, SnapshotRenderer};
use healthplex_payload::SubmissionContext;

use crate::config::FormsConfig;
use crate::draft::{DraftStore, WizardProgress};
use crate::error::FormsError;
use crate::session::{FormSession, REQUIRED_FIELDS_MESSAGE};
use crate::webhook::{SubmissionResult, Submitter};

pub const SUBMISSION_TIMEOUT_MESSAGE: &str =
    "Submission timed out. Please check your internet connection and try again.";

pub const BLANK_SYMPTOMS_WARNING: &str = "All symptoms on this page are currently rated as 0 \
     (Never). If that's accurate you can continue, otherwise please take a moment to review \
     your responses.";

pub const BLANK_STEP_WARNING: &str = "It looks like you haven't filled in any fields on this \
     page. Would you like to take a moment to double-check before continuing?";

/// Steps that may be left blank after a warning.
const OPTIONAL_STEPS: std::ops::RangeInclusive<u8> =
    step::COMMITMENT_AND_VISION..=step::HORMONES;

/// Result of asking to move to the next step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "camelCase")]
pub enum StepOutcome {
    /// Now on `step`.
    Advanced { step: u8 },
    /// Already on the last step.
    AtEnd,
    /// The step has errors and the wizard stays put.
    Invalid { errors: Vec<FieldError> },
    /// The step is blank. Call [`IntakeWizard::continue_anyway`] to proceed.
    BlankWarning { step: u8, message: &'static str },
}

pub struct IntakeWizard {
    session: FormSession,
    current_step: u8,
    step_validation: BTreeMap<u8, bool>,
    blank_dismissed: BTreeSet<u8>,
    start_time: jiff::Timestamp,
    renderer: Option<Box<dyn SnapshotRenderer>>,
    submission_timeout: Duration,
}

impl IntakeWizard {
    /// Begin a fresh wizard. Any stored progress and draft are discarded.
    pub fn start(
        config: &FormsConfig,
        drafts: Box<dyn DraftStore>,
        submitter: Submitter,
        renderer: Option<Box<dyn SnapshotRenderer>>,
        now: jiff::Timestamp,
    ) -> Result<Self, FormsError> {
        WizardProgress::clear(drafts.as_ref())?;
        crate::draft::clear_draft(drafts.as_ref(), FormType::IntakeWizard)?;
        Self::open(config, drafts, submitter, renderer, now)
    }

    /// Pick up where the user left off: the draft is restored and, when
    /// progress was saved, the step and validation marks too.
    pub fn resume(
        config: &FormsConfig,
        drafts: Box<dyn DraftStore>,
        submitter: Submitter,
        renderer: Option<Box<dyn SnapshotRenderer>>,
        now: jiff::Timestamp,
    ) -> Result<Self, FormsError> {
        let progress = WizardProgress::load(drafts.as_ref())?;
        let mut wizard = Self::open(config, drafts, submitter, renderer, now)?;
        if let Some(progress) = progress {
            wizard.current_step = progress.current_step.clamp(1, step::TOTAL);
            wizard.step_validation = progress.step_validation;
            wizard.start_time = progress.start_time;
            tracing::info!(step = wizard.current_step, "wizard progress restored");
        }
        Ok(wizard)
    }

    fn open(
        config: &FormsConfig,
        drafts: Box<dyn DraftStore>,
        submitter: Submitter,
        renderer: Option<Box<dyn SnapshotRenderer>>,
        now: jiff::Timestamp,
    ) -> Result<Self, FormsError> {
        let session = FormSession::open(FormType::IntakeWizard, config, drafts, submitter)?;
        Ok(Self {
            session,
            current_step: step::PATIENT_INFORMATION,
            step_validation: BTreeMap::new(),
            blank_dismissed: BTreeSet::new(),
            start_time: now,
            renderer,
            submission_timeout: config.settings.submission_timeout(),
        })
    }

    pub fn session(&self) -> &FormSession {
        &self.session
    }

    pub fn current_step(&self) -> u8 {
        self.current_step
    }

    pub fn step_name(&self) -> &'static str {
        step::name(self.current_step)
    }

    pub fn is_step_validated(&self, n: u8) -> bool {
        self.step_validation.get(&n).copied().unwrap_or(false)
    }

    pub fn start_time(&self) -> jiff::Timestamp {
        self.start_time
    }

    /// `(current, total)` for the progress indicator, when enabled.
    pub fn progress(&self) -> Option<(u8, u8)> {
        self.session
            .settings()
            .show_progress_indicator
            .then_some((self.current_step, step::TOTAL))
    }

    pub fn set_value(&mut self, name: &str, value: impl Into<String>) -> Result<(), FormsError> {
        self.session.set_value(name, value)
    }

    pub fn set_checked(&mut self, name: &str, checked: bool) -> Result<(), FormsError> {
        self.session.set_checked(name, checked)
    }

    pub fn tick(&mut self, now: Instant) -> Result<bool, FormsError> {
        self.session.tick(now)
    }

    pub fn validate_current_step(&self) -> Vec<FieldError> {
        validate_step(self.session.schema(), &self.session.data(), self.current_step)
    }

    pub fn next_step(&mut self) -> Result<StepOutcome, FormsError> {
        let errors = self.validate_current_step();
        if !errors.is_empty() {
            return Ok(StepOutcome::Invalid { errors });
        }
        self.step_validation.insert(self.current_step, true);
        self.save_progress()?;

        let step = self.current_step;
        if OPTIONAL_STEPS.contains(&step)
            && !self.blank_dismissed.contains(&step)
            && self.is_step_blank(step)
        {
            tracing::debug!(step, "blank step warning");
            return Ok(StepOutcome::BlankWarning {
                step,
                message: blank_warning(step),
            });
        }
        self.advance()
    }

    /// Dismiss the blank-step warning for the current step and move on.
    pub fn continue_anyway(&mut self) -> Result<StepOutcome, FormsError> {
        self.blank_dismissed.insert(self.current_step);
        self.advance()
    }

    fn advance(&mut self) -> Result<StepOutcome, FormsError> {
        if self.current_step >= step::TOTAL {
            return Ok(StepOutcome::AtEnd);
        }
        self.current_step += 1;
        self.save_progress()?;
        Ok(StepOutcome::Advanced {
            step: self.current_step,
        })
    }

    /// Returns whether the wizard moved.
    pub fn prev_step(&mut self) -> Result<bool, FormsError> {
        if self.current_step <= 1 {
            return Ok(false);
        }
        self.current_step -= 1;
        self.save_progress()?;
        Ok(true)
    }

    /// Jump to step `n`. Allowed backwards, and forwards only when the step
    /// before `n` has been validated.
    pub fn go_to_step(&mut self, n: u8) -> Result<bool, FormsError> {
        if !(1..=step::TOTAL).contains(&n) {
            return Ok(false);
        }
        if n > self.current_step && !self.is_step_validated(n - 1) {
            return Ok(false);
        }
        self.current_step = n;
        self.save_progress()?;
        Ok(true)
    }

    /// Whether the user entered nothing on an optional step. Symptom steps
    /// count as blank when every rating is "0".
    pub fn is_step_blank(&self, n: u8) -> bool {
        let data = self.session.data();
        let schema = self.session.schema();
        let mut fields = schema.step_fields(n);
        match n {
            step::COMMITMENT_AND_VISION => !fields.any(|spec| {
                let counts = match spec.kind {
                    ControlKind::Checkbox => spec.name != SPOUSE_ATTENDANCE_CONFIRM,
                    ControlKind::TextArea | ControlKind::Radio => true,
                    _ => false,
                };
                counts && is_filled(&data, &spec.name)
            }),
            step::FAMILY_HISTORY => !fields.any(|spec| {
                matches!(
                    spec.kind,
                    ControlKind::Checkbox | ControlKind::Number | ControlKind::Text
                ) && is_filled(&data, &spec.name)
            }),
            step::DIGESTIVE_HEALTH | step::METABOLISM_AND_ADRENAL | step::HORMONES => {
                !fields.any(|spec| is_question_field(&spec.name) && is_rated(&data, &spec.name))
            }
            _ => false,
        }
    }

    pub fn review_summary(&self) -> Result<String, FormsError> {
        Ok(render_review_summary(&self.session.data())?)
    }

    /// Whole minutes from wizard start to `now`, rounded.
    pub fn duration_minutes(&self, now: jiff::Timestamp) -> i64 {
        let seconds = now.as_second() - self.start_time.as_second();
        (seconds as f64 / 60.0).round() as i64
    }

    fn save_progress(&self) -> Result<(), FormsError> {
        if !self.session.settings().enable_draft_saving {
            return Ok(());
        }
        WizardProgress {
            current_step: self.current_step,
            step_validation: self.step_validation.clone(),
            start_time: self.start_time,
        }
        .save(self.session.drafts())
    }

    /// Drop saved progress and the draft, and start over on step 1.
    pub fn clear_progress(&mut self, now: jiff::Timestamp) -> Result<(), FormsError> {
        WizardProgress::clear(self.session.drafts())?;
        self.session.clear_draft()?;
        self.session.reset();
        self.current_step = step::PATIENT_INFORMATION;
        self.step_validation.clear();
        self.blank_dismissed.clear();
        self.start_time = now;
        tracing::info!("wizard progress cleared");
        Ok(())
    }

    /// Submit the wizard.
    ///
    /// The whole attempt, snapshot included, is bounded by the submission
    /// timeout; the webhook request gets whatever budget is left. A snapshot
    /// that fails to render is left out of the payload.
    pub fn submit(&mut self, ctx: &SubmissionContext) -> SubmissionResult {
        let deadline = Instant::now() + self.submission_timeout;

        if !self.validate_current_step().is_empty() || !self.session.validate().is_empty() {
            return SubmissionResult::failed(REQUIRED_FIELDS_MESSAGE);
        }
        for n in 1..=step::TOTAL {
            self.step_validation.insert(n, true);
        }

        let minutes = self.duration_minutes(ctx.submitted_at);
        if let Err(e) = self.session.set_value(WIZARD_DURATION, minutes.to_string()) {
            return SubmissionResult::failed(e.to_string());
        }

        let mut payload = match self.session.build(ctx) {
            Ok(payload) => payload,
            Err(e) => return SubmissionResult::failed(e.to_string()),
        };

        if let Some(renderer) = &self.renderer {
            match build_attachment(renderer.as_ref(), &payload, &ctx.submitted_on()) {
                Ok(attachment) => payload = payload.with_attachment(attachment),
                Err(e) => tracing::warn!(error = %e, "snapshot failed, submitting without it"),
            }
        }

        let remaining = deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            tracing::warn!("submission deadline passed before sending");
            let mut result = SubmissionResult::failed(SUBMISSION_TIMEOUT_MESSAGE);
            if self.session.settings().enable_draft_saving {
                result.draft_preserved = self.session.save_draft().is_ok();
            }
            return result;
        }

        let result = self.session.send(&payload, remaining);
        if result.success
            && let Err(e) = WizardProgress::clear(self.session.drafts())
        {
            tracing::warn!(error = %e, "failed to clear wizard progress");
        }
        result
    }
}

fn is_filled(data: &FlatFormData, name: &str) -> bool {
    data.get(name).is_some_and(FieldValue::is_filled)
}

/// A symptom rated above "0 (Never)".
fn is_rated(data: &FlatFormData, name: &str) -> bool {
    match data.get(name) {
        Some(FieldValue::Text(v)) => !matches!(v.trim(), "" | "0"),
        _ => false,
    }
}

fn blank_warning(n: u8) -> &'static str {
    match n {
        step::DIGESTIVE_HEALTH | step::METABOLISM_AND_ADRENAL | step::HORMONES => {
            BLANK_SYMPTOMS_WARNING
        }
        _ => BLANK_STEP_WARNING,
    }
}
