//! Step validation driven by a single rule table

use regex::Regex;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::OnceLock;

use crate::core::catalog::{Catalog, ExperienceLevel};
use crate::core::draft::{Field, RegistrationDraft};
use crate::core::step::WizardStep;

/// Failing fields mapped to a message
///
/// A missing key means the field currently passes, not that it was never
/// checked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<Field, String>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: Field) -> bool {
        self.0.contains_key(&field)
    }

    /// Look up by key ("email", "terms", ...)
    pub fn contains_key(&self, key: &str) -> bool {
        key.parse::<Field>().is_ok_and(|f| self.contains(f))
    }

    pub fn insert(&mut self, field: Field, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Drop every entry belonging to `step`
    pub fn clear_step(&mut self, step: WizardStep) {
        self.0.retain(|field, _| field.step() != step);
    }

    /// Replace the entries of `step` with `errors`
    pub fn replace_step(&mut self, step: WizardStep, errors: ValidationErrors) {
        self.clear_step(step);
        self.0.extend(errors.0);
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.0.iter().map(|(f, m)| (*f, m.as_str()))
    }

    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.0.keys().copied()
    }
}

/// A field check: returns the failure message, if any
type Check = fn(&str, &Catalog) -> Option<String>;

/// One row of the rule table
struct Rule {
    field: Field,
    check: Check,
}

const PERSONAL_RULES: &[Rule] = &[
    Rule {
        field: Field::FullName,
        check: check_full_name,
    },
    Rule {
        field: Field::Email,
        check: check_email,
    },
    Rule {
        field: Field::University,
        check: check_university,
    },
    Rule {
        field: Field::GraduationYear,
        check: check_graduation_year,
    },
];

const WORKSHOP_RULES: &[Rule] = &[
    Rule {
        field: Field::Workshop,
        check: check_workshop,
    },
    Rule {
        field: Field::ExperienceLevel,
        check: check_experience_level,
    },
];

const CONFIRMATION_RULES: &[Rule] = &[Rule {
    field: Field::TermsAccepted,
    check: check_terms,
}];

fn rules_for(step: WizardStep) -> &'static [Rule] {
    match step {
        WizardStep::Personal => PERSONAL_RULES,
        WizardStep::Workshop => WORKSHOP_RULES,
        WizardStep::Confirmation => CONFIRMATION_RULES,
        WizardStep::Submitted => &[],
    }
}

/// Validates one step of a draft against the catalog
#[derive(Debug, Clone, Default)]
pub struct StepValidator {
    catalog: Catalog,
}

impl StepValidator {
    pub fn new(catalog: Catalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Check only the fields belonging to `step`
    pub fn validate(&self, step: WizardStep, draft: &RegistrationDraft) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        for rule in rules_for(step) {
            if let Some(message) = (rule.check)(draft.get(rule.field), &self.catalog) {
                errors.insert(rule.field, message);
            }
        }
        errors
    }

    /// Check every data-entry step at once
    pub fn validate_all(&self, draft: &RegistrationDraft) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        for step in WizardStep::entry_steps() {
            errors.replace_step(*step, self.validate(*step, draft));
        }
        errors
    }
}

/// Permissive address check: `local@domain.tld`, no whitespace, one `@`
pub fn is_valid_email(value: &str) -> bool {
    static EMAIL_PATTERN: OnceLock<Regex> = OnceLock::new();
    EMAIL_PATTERN
        .get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"))
        .is_match(value)
}

fn check_full_name(value: &str, _: &Catalog) -> Option<String> {
    value
        .trim()
        .is_empty()
        .then(|| "Full name is required".to_string())
}

fn check_email(value: &str, _: &Catalog) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        Some("Email address is required".to_string())
    } else if !is_valid_email(value) {
        Some("Please enter a valid email address".to_string())
    } else {
        None
    }
}

fn check_university(value: &str, _: &Catalog) -> Option<String> {
    value
        .trim()
        .is_empty()
        .then(|| "University name is required".to_string())
}

fn check_graduation_year(value: &str, catalog: &Catalog) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        Some("Expected graduation year is required".to_string())
    } else if !catalog.has_graduation_year(value) {
        Some("Please select a valid graduation year".to_string())
    } else {
        None
    }
}

fn check_workshop(value: &str, catalog: &Catalog) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        Some("Please select a workshop".to_string())
    } else if !catalog.has_workshop(value) {
        Some(format!("Unknown workshop: {}", value))
    } else {
        None
    }
}

fn check_experience_level(value: &str, _: &Catalog) -> Option<String> {
    value
        .parse::<ExperienceLevel>()
        .is_err()
        .then(|| "Please select your experience level".to_string())
}

fn check_terms(value: &str, _: &Catalog) -> Option<String> {
    (value != "true").then(|| "You must accept the terms and conditions".to_string())
}
