//! Registration intake - the collaborator that accepts submitted drafts
//!
//! The wizard hands a validated draft to a [`RegistrationIntake`] and moves to
//! its terminal step only when the intake accepts it. Persistence and
//! duplicate detection belong to the intake, not to the wizard.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::draft::RegistrationDraft;
use crate::core::identity::RegistrationId;

/// Accepts submitted registrations
pub trait RegistrationIntake {
    /// Take ownership of a registration, returning a receipt on success
    fn submit(&self, draft: &RegistrationDraft) -> Result<SubmissionReceipt, SubmissionError>;
}

/// Proof that a registration was accepted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionReceipt {
    pub id: RegistrationId,
    pub submitted_at: DateTime<Utc>,
}

impl SubmissionReceipt {
    pub fn new() -> Self {
        Self {
            id: RegistrationId::new(),
            submitted_at: Utc::now(),
        }
    }
}

impl Default for SubmissionReceipt {
    fn default() -> Self {
        Self::new()
    }
}

/// Errors raised by an intake when it does not accept a registration
#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error("{email} is already registered for '{workshop}' ({existing})")]
    Duplicate {
        email: String,
        workshop: String,
        existing: RegistrationId,
    },

    #[error("registration rejected: {0}")]
    Rejected(String),

    #[error("failed to access {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize registration: {0}")]
    Serialize(String),
}

/// A registration as written by [`FileIntake`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredRegistration {
    pub id: RegistrationId,
    pub submitted_at: DateTime<Utc>,
    pub registration: RegistrationDraft,
}

/// Intake that stores one JSON document per registration in a directory
#[derive(Debug, Clone)]
pub struct FileIntake {
    dir: PathBuf,
}

impl FileIntake {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// All stored registrations, oldest first
    ///
    /// A missing directory means nothing has been submitted yet. Files that
    /// fail to parse are skipped.
    pub fn list(&self) -> Result<Vec<StoredRegistration>, SubmissionError> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }

        let entries = std::fs::read_dir(&self.dir).map_err(|source| self.io_error(source))?;
        let mut stored = Vec::new();

        for entry in entries {
            let path = entry.map_err(|source| self.io_error(source))?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }

            let contents = match std::fs::read_to_string(&path) {
                Ok(c) => c,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "skipping unreadable registration");
                    continue;
                }
            };
            match serde_json::from_str::<StoredRegistration>(&contents) {
                Ok(registration) => stored.push(registration),
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "skipping malformed registration");
                }
            }
        }

        stored.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(stored)
    }

    fn find_duplicate(&self, draft: &RegistrationDraft) -> Result<Option<RegistrationId>, SubmissionError> {
        let email = draft.email.trim().to_lowercase();
        Ok(self
            .list()?
            .into_iter()
            .find(|r| {
                r.registration.email.trim().to_lowercase() == email
                    && r.registration.workshop == draft.workshop
            })
            .map(|r| r.id))
    }

    fn io_error(&self, source: std::io::Error) -> SubmissionError {
        SubmissionError::Io {
            path: self.dir.display().to_string(),
            source,
        }
    }
}

/// Write to `tmp_path`, then rename over `final_path`
///
/// Readers never see a partially written registration, and a failed rename
/// leaves no temporary file behind.
fn write_atomically(tmp_path: &Path, final_path: &Path, contents: &str) -> Result<(), SubmissionError> {
    std::fs::write(tmp_path, contents).map_err(|source| SubmissionError::Io {
        path: tmp_path.display().to_string(),
        source,
    })?;
    if let Err(source) = std::fs::rename(tmp_path, final_path) {
        if let Err(e) = std::fs::remove_file(tmp_path) {
            tracing::warn!(path = %tmp_path.display(), error = %e, "failed to remove temporary file");
        }
        return Err(SubmissionError::Io {
            path: final_path.display().to_string(),
            source,
        });
    }
    Ok(())
}

impl RegistrationIntake for FileIntake {
    fn submit(&self, draft: &RegistrationDraft) -> Result<SubmissionReceipt, SubmissionError> {
        // Never store a registration without consent
        if !draft.terms_accepted {
            return Err(SubmissionError::Rejected(
                "terms and conditions were not accepted".to_string(),
            ));
        }
        if let Some(existing) = self.find_duplicate(draft)? {
            return Err(SubmissionError::Duplicate {
                email: draft.email.trim().to_string(),
                workshop: draft.workshop.clone(),
                existing,
            });
        }

        std::fs::create_dir_all(&self.dir).map_err(|source| self.io_error(source))?;

        let receipt = SubmissionReceipt::new();
        let stored = StoredRegistration {
            id: receipt.id,
            submitted_at: receipt.submitted_at,
            registration: draft.clone(),
        };
        let contents = serde_json::to_string_pretty(&stored)
            .map_err(|e| SubmissionError::Serialize(e.to_string()))?;

        let final_path = self.dir.join(receipt.id.file_name());
        let tmp_path = self.dir.join(format!(".{}.tmp", receipt.id));
        write_atomically(&tmp_path, &final_path, &contents)?;

        tracing::info!(id = %receipt.id, path = %final_path.display(), "registration stored");
        Ok(receipt)
    }
}
