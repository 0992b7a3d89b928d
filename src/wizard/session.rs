//! Wizard controller - step transitions, submission and restart

use thiserror::Error;

use crate::core::catalog::Catalog;
use crate::core::draft::{Field, RegistrationDraft};
use crate::core::intake::{RegistrationIntake, SubmissionError, SubmissionReceipt};
use crate::core::step::WizardStep;
use crate::wizard::store::DraftStore;
use crate::wizard::validator::{StepValidator, ValidationErrors};

/// Where the hand-off to the intake stands
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SubmissionStatus {
    /// Nothing handed off yet
    #[default]
    Idle,
    /// Draft handed to the intake, no answer yet
    Pending,
    /// Intake accepted the registration
    Accepted(SubmissionReceipt),
    /// Intake refused; the draft is kept for another attempt
    Rejected(String),
}

/// Errors that can occur while driving the wizard
#[derive(Debug, Error)]
pub enum WizardError {
    #[error("{step} step has {} invalid field(s)", .errors.len())]
    Validation {
        step: WizardStep,
        errors: ValidationErrors,
    },

    #[error("submit is only available on the confirmation step (current: {current})")]
    NotInConfirmation { current: WizardStep },

    #[error("restart is only available after a submission (current: {current})")]
    NotSubmitted { current: WizardStep },

    #[error("a submission is already pending")]
    SubmissionPending,

    #[error("no submission is pending")]
    NoPendingSubmission,

    #[error("submission failed: {0}")]
    Submission(#[from] SubmissionError),
}

/// A single registration session
///
/// All state lives here and changes only through field edits and the four
/// controller actions: [`advance`](Self::advance), [`retreat`](Self::retreat),
/// [`submit`](Self::submit) and [`restart`](Self::restart).
#[derive(Debug, Clone)]
pub struct WizardSession {
    store: DraftStore,
    step: WizardStep,
    submission: SubmissionStatus,
    validator: StepValidator,
}

impl WizardSession {
    pub fn new(catalog: Catalog) -> Self {
        Self::with_draft(catalog, RegistrationDraft::default())
    }

    /// Start on the first step with a prefilled draft
    pub fn with_draft(catalog: Catalog, draft: RegistrationDraft) -> Self {
        Self {
            store: DraftStore::with_draft(draft),
            step: WizardStep::Personal,
            submission: SubmissionStatus::Idle,
            validator: StepValidator::new(catalog),
        }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn draft(&self) -> &RegistrationDraft {
        self.store.draft()
    }

    pub fn errors(&self) -> &ValidationErrors {
        self.store.current_errors()
    }

    pub fn submission(&self) -> &SubmissionStatus {
        &self.submission
    }

    pub fn catalog(&self) -> &Catalog {
        self.validator.catalog()
    }

    pub fn is_submitted(&self) -> bool {
        self.step.is_terminal()
    }

    /// Edits and navigation are ignored once submitted or while pending
    fn is_locked(&self) -> bool {
        self.step.is_terminal() || self.submission == SubmissionStatus::Pending
    }

    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        if self.is_locked() {
            tracing::warn!(field = %field, step = %self.step, "ignoring edit on locked session");
            return;
        }
        self.store.set_field(field, value);
    }

    pub fn set_checked(&mut self, field: Field, checked: bool) {
        if self.is_locked() {
            tracing::warn!(field = %field, step = %self.step, "ignoring edit on locked session");
            return;
        }
        self.store.set_checked(field, checked);
    }

    /// Validate the current step and move forward if it passes
    ///
    /// On failure the step's errors are recorded and the step is unchanged.
    /// At Confirmation, in Submitted, or while a submission is pending this
    /// does nothing.
    pub fn advance(&mut self) -> Result<WizardStep, WizardError> {
        if self.is_locked() {
            return Ok(self.step);
        }
        let Some(next) = self.step.next() else {
            return Ok(self.step);
        };

        let errors = self.validator.validate(self.step, self.store.draft());
        if !errors.is_empty() {
            tracing::debug!(step = %self.step, failing = errors.len(), "advance blocked");
            self.store.record_errors(self.step, errors.clone());
            return Err(WizardError::Validation {
                step: self.step,
                errors,
            });
        }

        self.store.clear_errors(self.step);
        tracing::debug!(from = %self.step, to = %next, "advanced");
        self.step = next;
        Ok(self.step)
    }

    /// Move back one step without validating or clearing errors
    pub fn retreat(&mut self) -> WizardStep {
        if self.is_locked() {
            return self.step;
        }
        if let Some(previous) = self.step.previous() {
            tracing::debug!(from = %self.step, to = %previous, "retreated");
            self.step = previous;
        }
        self.step
    }

    /// First half of a submission: validate Confirmation and mark pending
    ///
    /// Returns the payload to hand to the intake, with text fields trimmed
    /// the same way the rules read them. Pair with
    /// [`complete_submit`](Self::complete_submit).
    pub fn begin_submit(&mut self) -> Result<RegistrationDraft, WizardError> {
        if self.step != WizardStep::Confirmation {
            return Err(WizardError::NotInConfirmation { current: self.step });
        }
        if self.submission == SubmissionStatus::Pending {
            return Err(WizardError::SubmissionPending);
        }

        let errors = self
            .validator
            .validate(WizardStep::Confirmation, self.store.draft());
        if !errors.is_empty() {
            tracing::debug!(failing = errors.len(), "submit blocked");
            self.store.record_errors(WizardStep::Confirmation, errors.clone());
            return Err(WizardError::Validation {
                step: WizardStep::Confirmation,
                errors,
            });
        }

        self.store.clear_errors(WizardStep::Confirmation);
        self.submission = SubmissionStatus::Pending;
        Ok(self.store.draft().trimmed())
    }

    /// Second half of a submission: apply the intake's answer
    ///
    /// Acceptance moves to Submitted. Rejection keeps the session on
    /// Confirmation with the draft intact.
    pub fn complete_submit(
        &mut self,
        result: Result<SubmissionReceipt, SubmissionError>,
    ) -> Result<SubmissionReceipt, WizardError> {
        if self.submission != SubmissionStatus::Pending {
            return Err(WizardError::NoPendingSubmission);
        }

        match result {
            Ok(receipt) => {
                tracing::info!(id = %receipt.id, "registration submitted");
                self.submission = SubmissionStatus::Accepted(receipt.clone());
                self.step = WizardStep::Submitted;
                Ok(receipt)
            }
            Err(e) => {
                tracing::warn!(error = %e, "registration rejected");
                self.submission = SubmissionStatus::Rejected(e.to_string());
                Err(WizardError::Submission(e))
            }
        }
    }

    /// Validate, hand the draft to `intake`, and apply its answer
    pub fn submit<I>(&mut self, intake: &I) -> Result<SubmissionReceipt, WizardError>
    where
        I: RegistrationIntake + ?Sized,
    {
        let draft = self.begin_submit()?;
        let result = intake.submit(&draft);
        self.complete_submit(result)
    }

    /// Begin a new registration after a successful submission
    pub fn restart(&mut self) -> Result<(), WizardError> {
        if !self.step.is_terminal() {
            return Err(WizardError::NotSubmitted { current: self.step });
        }
        self.reset();
        Ok(())
    }

    /// Empty draft, no errors, first step, nothing submitted
    pub fn reset(&mut self) {
        self.store.reset();
        self.step = WizardStep::Personal;
        self.submission = SubmissionStatus::Idle;
    }
}

impl Default for WizardSession {
    fn default() -> Self {
        Self::new(Catalog::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    /// Intake that records what it was given
    #[derive(Default)]
    struct RecordingIntake {
        received: RefCell<Vec<RegistrationDraft>>,
    }

    impl RegistrationIntake for RecordingIntake {
        fn submit(&self, draft: &RegistrationDraft) -> Result<SubmissionReceipt, SubmissionError> {
            self.received.borrow_mut().push(draft.clone());
            Ok(SubmissionReceipt::new())
        }
    }

    /// Intake that refuses everything
    struct RejectingIntake;

    impl RegistrationIntake for RejectingIntake {
        fn submit(&self, _: &RegistrationDraft) -> Result<SubmissionReceipt, SubmissionError> {
            Err(SubmissionError::Rejected("intake offline".to_string()))
        }
    }

    fn fill_personal(session: &mut WizardSession) {
        session.set_field(Field::FullName, "Jane Doe");
        session.set_field(Field::Email, "jane@uni.edu");
        session.set_field(Field::University, "State U");
        session.set_field(Field::GraduationYear, "2025");
    }

    fn fill_workshop(session: &mut WizardSession) {
        session.set_field(Field::Workshop, "web-dev");
        session.set_field(Field::ExperienceLevel, "beginner");
        session.set_field(Field::SpecialRequirements, "Vegetarian lunch option, please.");
    }

    fn session_at_confirmation() -> WizardSession {
        let mut session = WizardSession::default();
        fill_personal(&mut session);
        session.advance().unwrap();
        fill_workshop(&mut session);
        session.advance().unwrap();
        assert_eq!(session.step(), WizardStep::Confirmation);
        session
    }

    #[test]
    fn test_valid_personal_advances_to_workshop() {
        let mut session = WizardSession::default();
        fill_personal(&mut session);

        assert_eq!(session.advance().unwrap(), WizardStep::Workshop);
        assert!(session.errors().is_empty());
    }

    #[test]
    fn test_invalid_email_blocks_advance() {
        let mut session = WizardSession::default();
        fill_personal(&mut session);
        session.set_field(Field::Email, "not-an-email");

        let err = session.advance().unwrap_err();

        assert!(matches!(err, WizardError::Validation { step: WizardStep::Personal, .. }));
        assert_eq!(session.step(), WizardStep::Personal);
        assert_eq!(session.errors().len(), 1);
        assert!(session.errors().contains(Field::Email));
    }

    #[test]
    fn test_fixing_field_clears_errors_on_advance() {
        let mut session = WizardSession::default();
        fill_personal(&mut session);
        session.set_field(Field::Email, "not-an-email");
        assert!(session.advance().is_err());

        session.set_field(Field::Email, "jane@uni.edu");
        // Edits alone do not clear errors
        assert!(session.errors().contains(Field::Email));

        session.advance().unwrap();
        assert!(session.errors().is_empty());
    }

    #[test]
    fn test_retreat_never_validates() {
        let mut session = WizardSession::default();
        fill_personal(&mut session);
        session.advance().unwrap();

        // Workshop fields still empty
        assert_eq!(session.retreat(), WizardStep::Personal);
        assert!(session.errors().is_empty());

        assert_eq!(session.advance().unwrap(), WizardStep::Workshop);
        assert!(session.errors().is_empty());

        assert!(session.advance().is_err());
        assert_eq!(session.step(), WizardStep::Workshop);
        assert!(session.errors().contains(Field::Workshop));
        assert!(session.errors().contains(Field::ExperienceLevel));
    }

    #[test]
    fn test_retreat_keeps_errors() {
        let mut session = WizardSession::default();
        fill_personal(&mut session);
        session.advance().unwrap();
        assert!(session.advance().is_err());

        session.retreat();
        assert_eq!(session.step(), WizardStep::Personal);
        assert_eq!(session.errors().len(), 2);
    }

    #[test]
    fn test_retreat_noop_on_first_step() {
        let mut session = WizardSession::default();
        assert_eq!(session.retreat(), WizardStep::Personal);
    }

    #[test]
    fn test_advance_noop_on_confirmation() {
        let mut session = session_at_confirmation();
        assert_eq!(session.advance().unwrap(), WizardStep::Confirmation);
        assert!(session.errors().is_empty());
    }

    #[test]
    fn test_submit_requires_terms() {
        let mut session = session_at_confirmation();
        let intake = RecordingIntake::default();

        for _ in 0..3 {
            let err = session.submit(&intake).unwrap_err();
            assert!(matches!(err, WizardError::Validation { .. }));
            assert_eq!(session.step(), WizardStep::Confirmation);
            assert!(session.errors().contains_key("terms"));
        }
        assert!(intake.received.borrow().is_empty());
        assert_eq!(*session.submission(), SubmissionStatus::Idle);
    }

    #[test]
    fn test_submit_outside_confirmation() {
        let mut session = WizardSession::default();
        let err = session.submit(&RecordingIntake::default()).unwrap_err();
        assert!(matches!(
            err,
            WizardError::NotInConfirmation {
                current: WizardStep::Personal
            }
        ));
    }

    #[test]
    fn test_full_flow_submit_and_restart() {
        let mut session = session_at_confirmation();
        let intake = RecordingIntake::default();
        session.set_checked(Field::TermsAccepted, true);

        let receipt = session.submit(&intake).unwrap();

        assert_eq!(session.step(), WizardStep::Submitted);
        assert!(session.is_submitted());
        assert_eq!(*session.submission(), SubmissionStatus::Accepted(receipt));
        assert_eq!(intake.received.borrow().len(), 1);
        assert_eq!(intake.received.borrow()[0].workshop, "web-dev");

        session.restart().unwrap();
        assert_eq!(session.step(), WizardStep::Personal);
        assert!(session.draft().is_blank());
        assert!(session.errors().is_empty());
        assert_eq!(*session.submission(), SubmissionStatus::Idle);
    }

    #[test]
    fn test_submit_hands_over_trimmed_draft() {
        let mut session = session_at_confirmation();
        session.retreat();
        session.retreat();
        session.set_field(Field::GraduationYear, " 2025 ");
        session.set_field(Field::Email, "jane@uni.edu  ");
        session.advance().unwrap();
        session.set_field(Field::Workshop, " web-dev");
        session.advance().unwrap();
        session.set_checked(Field::TermsAccepted, true);

        let intake = RecordingIntake::default();
        session.submit(&intake).unwrap();

        let received = intake.received.borrow();
        assert_eq!(received[0].graduation_year, "2025");
        assert_eq!(received[0].email, "jane@uni.edu");
        assert_eq!(received[0].workshop, "web-dev");
        assert_eq!(session.draft().graduation_year, " 2025 ");
    }

    #[test]
    fn test_submitted_is_terminal() {
        let mut session = session_at_confirmation();
        session.set_checked(Field::TermsAccepted, true);
        session.submit(&RecordingIntake::default()).unwrap();

        session.set_field(Field::FullName, "Someone Else");
        assert_eq!(session.draft().full_name, "Jane Doe");
        assert_eq!(session.retreat(), WizardStep::Submitted);
        assert_eq!(session.advance().unwrap(), WizardStep::Submitted);
        assert!(matches!(
            session.submit(&RecordingIntake::default()),
            Err(WizardError::NotInConfirmation { .. })
        ));
    }

    #[test]
    fn test_restart_requires_submitted() {
        let mut session = session_at_confirmation();
        assert!(matches!(
            session.restart(),
            Err(WizardError::NotSubmitted {
                current: WizardStep::Confirmation
            })
        ));
        assert_eq!(session.step(), WizardStep::Confirmation);
    }

    #[test]
    fn test_rejected_submission_keeps_draft() {
        let mut session = session_at_confirmation();
        session.set_checked(Field::TermsAccepted, true);
        let before = session.draft().clone();

        let err = session.submit(&RejectingIntake).unwrap_err();

        assert!(matches!(err, WizardError::Submission(SubmissionError::Rejected(_))));
        assert_eq!(session.step(), WizardStep::Confirmation);
        assert_eq!(*session.draft(), before);
        assert!(matches!(session.submission(), SubmissionStatus::Rejected(_)));

        // Retry against a working intake
        session.submit(&RecordingIntake::default()).unwrap();
        assert_eq!(session.step(), WizardStep::Submitted);
    }

    #[test]
    fn test_pending_submission_locks_session() {
        let mut session = session_at_confirmation();
        session.set_checked(Field::TermsAccepted, true);

        let payload = session.begin_submit().unwrap();
        assert!(payload.terms_accepted);
        assert_eq!(*session.submission(), SubmissionStatus::Pending);

        session.set_field(Field::FullName, "Changed");
        assert_eq!(session.retreat(), WizardStep::Confirmation);
        assert_eq!(session.draft().full_name, "Jane Doe");
        assert!(matches!(
            session.begin_submit(),
            Err(WizardError::SubmissionPending)
        ));

        session.complete_submit(Ok(SubmissionReceipt::new())).unwrap();
        assert_eq!(session.step(), WizardStep::Submitted);
    }

    #[test]
    fn test_complete_without_begin() {
        let mut session = session_at_confirmation();
        assert!(matches!(
            session.complete_submit(Ok(SubmissionReceipt::new())),
            Err(WizardError::NoPendingSubmission)
        ));
        assert_eq!(session.step(), WizardStep::Confirmation);
    }

    #[test]
    fn test_reset_idempotent() {
        let mut session = session_at_confirmation();
        session.set_checked(Field::TermsAccepted, true);
        session.submit(&RecordingIntake::default()).unwrap();

        session.reset();
        session.reset();

        assert_eq!(session.step(), WizardStep::Personal);
        assert!(session.draft().is_blank());
        assert!(session.errors().is_empty());
        assert!(!session.is_submitted());
    }
}
