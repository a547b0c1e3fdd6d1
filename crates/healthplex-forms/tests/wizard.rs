mod common;

use std::rc::Rc;
use std::time::Duration;

use healthplex_core::FormType;
use healthplex_export::{DocxSnapshot, ExportError, SnapshotRenderer};
use healthplex_forms::draft::{MemoryDraftStore, WizardProgress, load_draft};
use healthplex_forms::wizard::{
    BLANK_STEP_WARNING, BLANK_SYMPTOMS_WARNING, StepOutcome, SUBMISSION_TIMEOUT_MESSAGE,
};
use healthplex_forms::{FormsConfig, IntakeWizard};
use healthplex_payload::StructuredPayload;

use common::{config, ctx, stub_submitter, Stub};

fn ts(s: &str) -> jiff::Timestamp {
    s.parse().unwrap()
}

fn start_with(
    config: &FormsConfig,
    store: &Rc<MemoryDraftStore>,
    renderer: Option<Box<dyn SnapshotRenderer>>,
) -> (IntakeWizard, Stub) {
    let (submitter, stub) = stub_submitter(200);
    let wizard = IntakeWizard::start(
        config,
        Box::new(Rc::clone(store)),
        submitter,
        renderer,
        ts("2025-03-04T15:00:00Z"),
    )
    .unwrap();
    (wizard, stub)
}

fn start(store: &Rc<MemoryDraftStore>) -> (IntakeWizard, Stub) {
    start_with(&config(), store, None)
}

fn fill_patient_information(wizard: &mut IntakeWizard) {
    wizard.set_value("firstName", "Ada").unwrap();
    wizard.set_value("lastName", "Lovelace").unwrap();
    wizard.set_value("email", "ada@example.com").unwrap();
    wizard.set_value("phone", "(555) 123-4567").unwrap();
}

/// Walk forward to `target`, leaving optional steps blank.
fn walk_to(wizard: &mut IntakeWizard, target: u8) {
    fill_patient_information(wizard);
    wizard.set_checked("spouseAttendanceConfirm", true).unwrap();
    while wizard.current_step() < target {
        match wizard.next_step().unwrap() {
            StepOutcome::Advanced { .. } => {}
            StepOutcome::BlankWarning { .. } => {
                wizard.continue_anyway().unwrap();
            }
            other => panic!("unexpected outcome {other:?}"),
        }
    }
}

fn walk_to_review(wizard: &mut IntakeWizard) {
    walk_to(wizard, 8);
}

#[test]
fn invalid_step_stays_put() {
    let store = Rc::new(MemoryDraftStore::new());
    let (mut wizard, _) = start(&store);

    let StepOutcome::Invalid { errors } = wizard.next_step().unwrap() else {
        panic!("expected validation errors");
    };
    let fields: Vec<_> = errors.iter().map(|e| e.field.as_str()).collect();
    assert_eq!(fields, ["firstName", "lastName", "email", "phone"]);
    assert_eq!(wizard.current_step(), 1);
    assert!(!wizard.is_step_validated(1));
}

#[test]
fn blank_optional_step_warns_once() {
    let store = Rc::new(MemoryDraftStore::new());
    let (mut wizard, _) = start(&store);
    fill_patient_information(&mut wizard);

    assert_eq!(wizard.next_step().unwrap(), StepOutcome::Advanced { step: 2 });
    // Health concerns is not an optional step, so no warning.
    assert_eq!(wizard.next_step().unwrap(), StepOutcome::Advanced { step: 3 });

    wizard.set_checked("spouseAttendanceConfirm", true).unwrap();
    assert_eq!(
        wizard.next_step().unwrap(),
        StepOutcome::BlankWarning {
            step: 3,
            message: BLANK_STEP_WARNING
        }
    );
    assert_eq!(wizard.current_step(), 3);
    assert!(wizard.is_step_validated(3));

    assert_eq!(wizard.continue_anyway().unwrap(), StepOutcome::Advanced { step: 4 });
    assert!(wizard.prev_step().unwrap());
    assert_eq!(wizard.next_step().unwrap(), StepOutcome::Advanced { step: 4 });
}

#[test]
fn filled_optional_steps_advance_without_warning() {
    let store = Rc::new(MemoryDraftStore::new());
    let (mut wizard, _) = start(&store);
    fill_patient_information(&mut wizard);
    wizard.next_step().unwrap();
    wizard.next_step().unwrap();

    wizard.set_checked("spouseAttendanceConfirm", true).unwrap();
    wizard.set_value("importance", "8").unwrap();
    assert_eq!(wizard.next_step().unwrap(), StepOutcome::Advanced { step: 4 });

    wizard.set_value("age_mother", "70").unwrap();
    assert_eq!(wizard.next_step().unwrap(), StepOutcome::Advanced { step: 5 });
}

#[test]
fn all_zero_symptoms_count_as_blank() {
    let store = Rc::new(MemoryDraftStore::new());
    let (mut wizard, _) = start(&store);
    walk_to(&mut wizard, 5);

    for id in 1..=42 {
        wizard.set_value(&format!("q{id}"), "0").unwrap();
    }
    assert!(wizard.is_step_blank(5));
    assert_eq!(
        wizard.next_step().unwrap(),
        StepOutcome::BlankWarning {
            step: 5,
            message: BLANK_SYMPTOMS_WARNING
        }
    );

    wizard.set_value("q7", "1").unwrap();
    assert!(!wizard.is_step_blank(5));
}

#[test]
fn spouse_confirmation_alone_leaves_step_blank() {
    let store = Rc::new(MemoryDraftStore::new());
    let (mut wizard, _) = start(&store);
    wizard.set_checked("spouseAttendanceConfirm", true).unwrap();
    assert!(wizard.is_step_blank(3));
    wizard.set_value("barriers", "Time").unwrap();
    assert!(!wizard.is_step_blank(3));
    assert!(!wizard.is_step_blank(8));
}

#[test]
fn jumping_ahead_needs_the_previous_step_validated() {
    let store = Rc::new(MemoryDraftStore::new());
    let (mut wizard, _) = start(&store);
    assert!(!wizard.go_to_step(3).unwrap());
    assert!(!wizard.go_to_step(0).unwrap());
    assert!(!wizard.go_to_step(9).unwrap());

    fill_patient_information(&mut wizard);
    wizard.next_step().unwrap();
    wizard.next_step().unwrap();
    assert_eq!(wizard.current_step(), 3);

    assert!(wizard.go_to_step(1).unwrap());
    assert!(wizard.go_to_step(3).unwrap());
    assert!(!wizard.go_to_step(4).unwrap());
    assert!(wizard.prev_step().unwrap());
    assert_eq!(wizard.current_step(), 2);
}

#[test]
fn progress_survives_a_restart() {
    let store = Rc::new(MemoryDraftStore::new());
    {
        let (mut wizard, _) = start(&store);
        fill_patient_information(&mut wizard);
        wizard.next_step().unwrap();
        wizard.next_step().unwrap();
    }

    let saved = WizardProgress::load(store.as_ref()).unwrap().unwrap();
    assert_eq!(saved.current_step, 3);
    assert_eq!(saved.start_time, ts("2025-03-04T15:00:00Z"));

    let (submitter, _) = stub_submitter(200);
    let resumed = IntakeWizard::resume(
        &config(),
        Box::new(Rc::clone(&store)),
        submitter,
        None,
        ts("2025-03-04T16:00:00Z"),
    )
    .unwrap();
    assert_eq!(resumed.current_step(), 3);
    assert!(resumed.is_step_validated(2));
    assert_eq!(resumed.start_time(), ts("2025-03-04T15:00:00Z"));
    assert_eq!(resumed.session().data().text("firstName").unwrap(), Some("Ada"));
}

#[test]
fn start_discards_previous_progress() {
    let store = Rc::new(MemoryDraftStore::new());
    {
        let (mut wizard, _) = start(&store);
        fill_patient_information(&mut wizard);
        wizard.next_step().unwrap();
    }
    let (wizard, _) = start(&store);
    assert_eq!(wizard.current_step(), 1);
    assert_eq!(wizard.session().data().text("firstName").unwrap(), Some(""));
}

#[test]
fn clear_progress_starts_over() {
    let store = Rc::new(MemoryDraftStore::new());
    let (mut wizard, _) = start(&store);
    fill_patient_information(&mut wizard);
    wizard.next_step().unwrap();

    wizard.clear_progress(ts("2025-03-04T15:30:00Z")).unwrap();
    assert_eq!(wizard.current_step(), 1);
    assert!(!wizard.is_step_validated(1));
    assert_eq!(wizard.start_time(), ts("2025-03-04T15:30:00Z"));
    assert_eq!(WizardProgress::load(store.as_ref()).unwrap(), None);
    assert_eq!(load_draft(store.as_ref(), FormType::IntakeWizard).unwrap(), None);
}

#[test]
fn duration_rounds_to_whole_minutes() {
    let store = Rc::new(MemoryDraftStore::new());
    let (wizard, _) = start(&store);
    assert_eq!(wizard.duration_minutes(ts("2025-03-04T15:12:29Z")), 12);
    assert_eq!(wizard.duration_minutes(ts("2025-03-04T15:12:30Z")), 13);
}

#[test]
fn review_summary_reads_current_answers() {
    let store = Rc::new(MemoryDraftStore::new());
    let (mut wizard, _) = start(&store);
    fill_patient_information(&mut wizard);
    wizard.set_value("complaint1", "Fatigue").unwrap();

    let summary = wizard.review_summary().unwrap();
    assert!(summary.contains("**Name:** Ada Lovelace"));
    assert!(summary.contains("**Main Complaint:** Fatigue"));
}

#[test]
fn progress_indicator_follows_settings() {
    let store = Rc::new(MemoryDraftStore::new());
    let (wizard, _) = start(&store);
    assert_eq!(wizard.progress(), Some((1, 8)));
    assert_eq!(wizard.step_name(), "Patient Information");

    let mut hidden = config();
    hidden.settings.show_progress_indicator = false;
    let (wizard, _) = start_with(&hidden, &store, None);
    assert_eq!(wizard.progress(), None);
}

#[test]
fn submission_carries_duration_and_snapshot() {
    let store = Rc::new(MemoryDraftStore::new());
    let (mut wizard, stub) = start_with(&config(), &store, Some(Box::new(DocxSnapshot::default())));
    walk_to_review(&mut wizard);
    wizard.set_value("sex", "female").unwrap();
    wizard.set_value("q124", "3").unwrap();

    let result = wizard.submit(&ctx("2025-03-04T15:20:00Z"));
    assert!(result.success, "{}", result.message);

    let json = stub.last_json();
    assert_eq!(json["_meta"]["formType"], "intakeWizard");
    assert_eq!(json["_meta"]["totalTimeMinutes"], 20);
    assert_eq!(json["_meta"]["completedSteps"], serde_json::json!([1, 2, 3, 4, 5, 6, 7, 8]));
    assert_eq!(json["rawData"]["_wizardDuration"], "20");
    assert!(json["rawData"].get("q124").is_none());
    assert_eq!(
        json["metabolicAssessment"]["genderSpecific"]["subtotal"],
        3
    );
    assert_eq!(
        json["pdfAttachment"]["filename"],
        "intake-form-Lovelace-2025-03-04.docx"
    );

    let timeout = stub.timeouts.borrow()[0];
    assert!(timeout <= Duration::from_secs(25));
    assert_eq!(WizardProgress::load(store.as_ref()).unwrap(), None);
    assert_eq!(load_draft(store.as_ref(), FormType::IntakeWizard).unwrap(), None);
    assert!((1..=8).all(|n| wizard.is_step_validated(n)));
}

struct BrokenSnapshot;

impl SnapshotRenderer for BrokenSnapshot {
    fn extension(&self) -> &str {
        "pdf"
    }

    fn mime_type(&self) -> &str {
        "application/pdf"
    }

    fn render(&self, _payload: &StructuredPayload) -> Result<Vec<u8>, ExportError> {
        Err(ExportError::Docx("renderer unavailable".to_string()))
    }
}

#[test]
fn snapshot_failure_does_not_block_submission() {
    let store = Rc::new(MemoryDraftStore::new());
    let (mut wizard, stub) = start_with(&config(), &store, Some(Box::new(BrokenSnapshot)));
    walk_to_review(&mut wizard);

    let result = wizard.submit(&ctx("2025-03-04T15:20:00Z"));
    assert!(result.success);
    assert!(stub.last_json().get("pdfAttachment").is_none());
}

#[test]
fn submission_deadline_keeps_the_draft() {
    let store = Rc::new(MemoryDraftStore::new());
    let mut config = config();
    config.settings.submission_timeout_secs = 0;
    let (mut wizard, stub) = start_with(&config, &store, None);
    walk_to_review(&mut wizard);

    let result = wizard.submit(&ctx("2025-03-04T15:20:00Z"));
    assert!(!result.success);
    assert_eq!(result.message, SUBMISSION_TIMEOUT_MESSAGE);
    assert!(result.draft_preserved);
    assert!(stub.bodies.borrow().is_empty());
    assert!(load_draft(store.as_ref(), FormType::IntakeWizard).unwrap().is_some());
}

#[test]
fn submission_deadline_without_draft_saving_keeps_nothing() {
    let store = Rc::new(MemoryDraftStore::new());
    let mut config = config();
    config.settings.submission_timeout_secs = 0;
    config.settings.enable_draft_saving = false;
    let (mut wizard, stub) = start_with(&config, &store, None);
    walk_to_review(&mut wizard);

    let result = wizard.submit(&ctx("2025-03-04T15:20:00Z"));
    assert!(!result.success);
    assert_eq!(result.message, SUBMISSION_TIMEOUT_MESSAGE);
    assert!(!result.draft_preserved);
    assert_eq!(result.notice(), None);
    assert!(stub.bodies.borrow().is_empty());
    assert!(load_draft(store.as_ref(), FormType::IntakeWizard).unwrap().is_none());
}

#[test]
fn rejected_wizard_submission_keeps_progress() {
    let store = Rc::new(MemoryDraftStore::new());
    let (submitter, _) = stub_submitter(500);
    let mut wizard = IntakeWizard::start(
        &config(),
        Box::new(Rc::clone(&store)),
        submitter,
        None,
        ts("2025-03-04T15:00:00Z"),
    )
    .unwrap();
    walk_to_review(&mut wizard);

    let result = wizard.submit(&ctx("2025-03-04T15:20:00Z"));
    assert_eq!(result.message, "Submission failed (status 500)");
    assert_eq!(
        result.notice(),
        Some("Your information has been saved locally. Please try submitting again.")
    );
    assert!(WizardProgress::load(store.as_ref()).unwrap().is_some());
}

#[test]
fn incomplete_wizard_is_not_sent() {
    let store = Rc::new(MemoryDraftStore::new());
    let (mut wizard, stub) = start(&store);
    let result = wizard.submit(&ctx("2025-03-04T15:20:00Z"));
    assert!(!result.success);
    assert_eq!(result.message, "Please fill out all required fields.");
    assert!(stub.bodies.borrow().is_empty());
}
