//! Core module - fundamental types and utilities

pub mod catalog;
pub mod config;
pub mod draft;
pub mod identity;
pub mod intake;
pub mod step;

pub use catalog::{Catalog, ExperienceLevel, WorkshopEntry};
pub use config::{Config, ConfigError};
pub use draft::{DraftFileError, DraftFormat, Field, RegistrationDraft};
pub use identity::{IdParseError, RegistrationId};
pub use intake::{FileIntake, RegistrationIntake, StoredRegistration, SubmissionError, SubmissionReceipt};
pub use step::WizardStep;
