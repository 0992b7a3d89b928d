//! Confirmation summary - read-only projection of a draft for review

use rust_embed::Embed;
use serde::Serialize;
use tera::Tera;
use thiserror::Error;

use crate::core::catalog::{Catalog, ExperienceLevel};
use crate::core::draft::{Field, RegistrationDraft};

#[derive(Embed)]
#[folder = "templates/"]
struct EmbeddedTemplates;

const CONFIRMATION_TEMPLATE: &str = "confirmation.txt.tera";

/// Shown for an empty phone number
pub const NOT_PROVIDED: &str = "Not provided";

/// Shown for empty special requirements
pub const NONE_PROVIDED: &str = "None";

/// One labelled value
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryEntry {
    pub field: Field,
    pub label: String,
    pub value: String,
}

/// A titled group of entries
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummarySection {
    pub title: String,
    pub entries: Vec<SummaryEntry>,
}

/// What the user reviews before accepting the terms
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfirmationSummary {
    pub sections: Vec<SummarySection>,
}

impl ConfirmationSummary {
    /// Project a draft into display form
    ///
    /// Catalog identifiers become labels; unknown identifiers pass through.
    pub fn from_draft(draft: &RegistrationDraft, catalog: &Catalog) -> Self {
        let entry = |field: Field, value: String| SummaryEntry {
            field,
            label: field.label().to_string(),
            value,
        };

        let personal = SummarySection {
            title: "Personal Information".to_string(),
            entries: vec![
                entry(Field::FullName, draft.full_name.clone()),
                entry(Field::Email, draft.email.clone()),
                entry(Field::Phone, or_placeholder(&draft.phone, NOT_PROVIDED)),
                entry(Field::University, draft.university.clone()),
                entry(Field::GraduationYear, draft.graduation_year.clone()),
            ],
        };

        let workshop_label = catalog
            .workshop_label(draft.workshop.trim())
            .map(String::from)
            .unwrap_or_else(|| draft.workshop.clone());
        let experience_label = draft
            .experience_level
            .parse::<ExperienceLevel>()
            .map(|level| level.label().to_string())
            .unwrap_or_else(|_| draft.experience_level.clone());

        let workshop = SummarySection {
            title: "Workshop Details".to_string(),
            entries: vec![
                entry(Field::Workshop, workshop_label),
                entry(Field::ExperienceLevel, experience_label),
                entry(
                    Field::SpecialRequirements,
                    or_placeholder(&draft.special_requirements, NONE_PROVIDED),
                ),
            ],
        };

        Self {
            sections: vec![personal, workshop],
        }
    }

    /// Display value for a field, if the summary shows it
    pub fn value(&self, field: Field) -> Option<&str> {
        self.sections
            .iter()
            .flat_map(|s| s.entries.iter())
            .find(|e| e.field == field)
            .map(|e| e.value.as_str())
    }
}

fn or_placeholder(value: &str, placeholder: &str) -> String {
    if value.trim().is_empty() {
        placeholder.to_string()
    } else {
        value.to_string()
    }
}

#[derive(Debug, Error)]
pub enum SummaryError {
    #[error("Template not found: {0}")]
    NotFound(String),

    #[error("Template rendering error: {0}")]
    RenderError(String),
}

/// Renders summaries as plain text using the embedded template
pub struct SummaryRenderer {
    tera: Tera,
}

impl SummaryRenderer {
    pub fn new() -> Result<Self, SummaryError> {
        let mut tera = Tera::default();

        for file in EmbeddedTemplates::iter() {
            let filename = file.as_ref();
            if let Some(content) = EmbeddedTemplates::get(filename) {
                if let Ok(template_str) = std::str::from_utf8(&content.data) {
                    tera.add_raw_template(filename, template_str)
                        .map_err(|e| SummaryError::RenderError(e.to_string()))?;
                }
            }
        }

        if !tera.get_template_names().any(|n| n == CONFIRMATION_TEMPLATE) {
            return Err(SummaryError::NotFound(CONFIRMATION_TEMPLATE.to_string()));
        }

        Ok(Self { tera })
    }

    pub fn render(&self, summary: &ConfirmationSummary) -> Result<String, SummaryError> {
        let context = tera::Context::from_serialize(summary)
            .map_err(|e| SummaryError::RenderError(e.to_string()))?;
        self.tera
            .render(CONFIRMATION_TEMPLATE, &context)
            .map_err(|e| SummaryError::RenderError(e.to_string()))
    }
}
