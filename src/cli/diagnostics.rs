//! Validation failures rendered as miette diagnostics

use miette::Diagnostic;
use thiserror::Error;

use crate::core::catalog::{Catalog, ExperienceLevel};
use crate::core::draft::Field;
use crate::wizard::validator::ValidationErrors;

/// A draft that failed one or more step rules
#[derive(Debug, Error, Diagnostic)]
#[error("Validation failed: {summary}")]
#[diagnostic(code(signup::validation_failed))]
pub struct StepValidationReport {
    summary: String,

    #[related]
    violations: Vec<FieldViolation>,
}

/// A single failing field
#[derive(Debug, Error, Diagnostic)]
#[error("{field}: {message}")]
pub struct FieldViolation {
    field: String,
    message: String,

    #[help]
    help: Option<String>,
}

impl StepValidationReport {
    pub fn new(errors: &ValidationErrors, catalog: &Catalog) -> Self {
        let violations: Vec<FieldViolation> = errors
            .iter()
            .map(|(field, message)| FieldViolation {
                field: field.key().to_string(),
                message: message.to_string(),
                help: field_help(field, catalog),
            })
            .collect();

        let summary = if violations.len() == 1 {
            "1 field".to_string()
        } else {
            format!("{} fields", violations.len())
        };

        Self {
            summary,
            violations,
        }
    }

    pub fn violation_count(&self) -> usize {
        self.violations.len()
    }
}

fn field_help(field: Field, catalog: &Catalog) -> Option<String> {
    match field {
        Field::Email => Some("Use an address like name@university.edu".to_string()),
        Field::GraduationYear => Some(format!(
            "Allowed years: {}",
            catalog.graduation_years().join(", ")
        )),
        Field::Workshop => Some(format!(
            "Valid workshops: {}",
            catalog
                .workshops()
                .iter()
                .map(|w| w.id.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        )),
        Field::ExperienceLevel => Some(format!(
            "One of: {}",
            ExperienceLevel::all()
                .iter()
                .map(|l| l.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        )),
        Field::TermsAccepted => Some("Pass --accept-terms to accept".to_string()),
        Field::FullName
        | Field::Phone
        | Field::University
        | Field::SpecialRequirements => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_lists_each_field() {
        let mut errors = ValidationErrors::new();
        errors.insert(Field::Email, "Please enter a valid email address");
        errors.insert(Field::Workshop, "Please select a workshop");

        let report = StepValidationReport::new(&errors, &Catalog::default());
        assert_eq!(report.violation_count(), 2);
        assert_eq!(report.to_string(), "Validation failed: 2 fields");
    }

    #[test]
    fn test_workshop_help_lists_catalog() {
        let help = field_help(Field::Workshop, &Catalog::default()).unwrap();
        assert!(help.contains("web-dev"));
        assert!(help.contains("ai"));
        assert!(field_help(Field::FullName, &Catalog::default()).is_none());
    }
}
