//! Registration wizard - draft store, step validation, controller and review

pub mod prompt;
pub mod session;
pub mod store;
pub mod summary;
pub mod validator;

pub use prompt::RegistrationWizard;
pub use session::{SubmissionStatus, WizardError, WizardSession};
pub use store::DraftStore;
pub use summary::{ConfirmationSummary, SummaryError, SummaryRenderer};
pub use validator::{is_valid_email, StepValidator, ValidationErrors};
