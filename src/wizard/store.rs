//! Draft store - owns the draft and the currently failing fields

use crate::core::draft::{Field, RegistrationDraft};
use crate::core::step::WizardStep;
use crate::wizard::validator::ValidationErrors;

/// The mutable half of a wizard session
///
/// Edits never validate and never touch recorded errors; only the controller
/// writes errors, after running the validator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DraftStore {
    draft: RegistrationDraft,
    errors: ValidationErrors,
}

impl DraftStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing draft, e.g. one loaded from a file
    pub fn with_draft(draft: RegistrationDraft) -> Self {
        Self {
            draft,
            errors: ValidationErrors::new(),
        }
    }

    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        self.draft.set_field(field, value);
    }

    pub fn set_checked(&mut self, field: Field, checked: bool) {
        self.draft.set_checked(field, checked);
    }

    pub fn draft(&self) -> &RegistrationDraft {
        &self.draft
    }

    pub fn current_errors(&self) -> &ValidationErrors {
        &self.errors
    }

    /// Record a step's validation result, replacing that step's old entries
    pub(crate) fn record_errors(&mut self, step: WizardStep, errors: ValidationErrors) {
        self.errors.replace_step(step, errors);
    }

    pub(crate) fn clear_errors(&mut self, step: WizardStep) {
        self.errors.clear_step(step);
    }

    /// Back to an empty draft with no errors
    pub fn reset(&mut self) {
        self.draft = RegistrationDraft::default();
        self.errors.clear();
    }
}
