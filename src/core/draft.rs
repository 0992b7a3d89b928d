//! Registration draft - the in-progress record edited by the wizard

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

use crate::core::step::WizardStep;

/// A field of the registration draft
///
/// The serialized name is the field's key in validation error maps. The terms
/// checkbox is keyed `terms`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Field {
    #[serde(rename = "fullName")]
    FullName,
    #[serde(rename = "email")]
    Email,
    #[serde(rename = "phone")]
    Phone,
    #[serde(rename = "university")]
    University,
    #[serde(rename = "graduationYear")]
    GraduationYear,
    #[serde(rename = "workshop")]
    Workshop,
    #[serde(rename = "experienceLevel")]
    ExperienceLevel,
    #[serde(rename = "specialRequirements")]
    SpecialRequirements,
    #[serde(rename = "terms", alias = "termsAccepted")]
    TermsAccepted,
}

impl Field {
    /// Key used in validation error maps and field-edit events
    pub fn key(self) -> &'static str {
        match self {
            Field::FullName => "fullName",
            Field::Email => "email",
            Field::Phone => "phone",
            Field::University => "university",
            Field::GraduationYear => "graduationYear",
            Field::Workshop => "workshop",
            Field::ExperienceLevel => "experienceLevel",
            Field::SpecialRequirements => "specialRequirements",
            Field::TermsAccepted => "terms",
        }
    }

    /// Human-readable label
    pub fn label(self) -> &'static str {
        match self {
            Field::FullName => "Full Name",
            Field::Email => "Email",
            Field::Phone => "Phone",
            Field::University => "University",
            Field::GraduationYear => "Graduation Year",
            Field::Workshop => "Selected Workshop",
            Field::ExperienceLevel => "Experience Level",
            Field::SpecialRequirements => "Special Requirements",
            Field::TermsAccepted => "Terms Accepted",
        }
    }

    /// The step whose form collects this field
    pub fn step(self) -> WizardStep {
        match self {
            Field::FullName
            | Field::Email
            | Field::Phone
            | Field::University
            | Field::GraduationYear => WizardStep::Personal,
            Field::Workshop | Field::ExperienceLevel | Field::SpecialRequirements => {
                WizardStep::Workshop
            }
            Field::TermsAccepted => WizardStep::Confirmation,
        }
    }

    pub fn is_optional(self) -> bool {
        matches!(self, Field::Phone | Field::SpecialRequirements)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl FromStr for Field {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .collect::<String>()
            .to_lowercase();
        match normalized.as_str() {
            "fullname" | "name" => Ok(Field::FullName),
            "email" => Ok(Field::Email),
            "phone" => Ok(Field::Phone),
            "university" => Ok(Field::University),
            "graduationyear" => Ok(Field::GraduationYear),
            "workshop" => Ok(Field::Workshop),
            "experiencelevel" | "experience" => Ok(Field::ExperienceLevel),
            "specialrequirements" => Ok(Field::SpecialRequirements),
            "terms" | "termsaccepted" => Ok(Field::TermsAccepted),
            _ => Err(format!("Unknown field: {}", s)),
        }
    }
}

/// The in-progress registration record
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RegistrationDraft {
    #[serde(deserialize_with = "scalar_string")]
    pub full_name: String,
    #[serde(deserialize_with = "scalar_string")]
    pub email: String,
    #[serde(deserialize_with = "scalar_string")]
    pub phone: String,
    #[serde(deserialize_with = "scalar_string")]
    pub university: String,
    #[serde(deserialize_with = "scalar_string")]
    pub graduation_year: String,
    #[serde(deserialize_with = "scalar_string")]
    pub workshop: String,
    #[serde(deserialize_with = "scalar_string")]
    pub experience_level: String,
    #[serde(deserialize_with = "scalar_string")]
    pub special_requirements: String,
    pub terms_accepted: bool,
}

impl RegistrationDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite a field with a text value
    ///
    /// Never validates. For the terms checkbox the text is read as a flag.
    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        match field {
            Field::FullName => self.full_name = value,
            Field::Email => self.email = value,
            Field::Phone => self.phone = value,
            Field::University => self.university = value,
            Field::GraduationYear => self.graduation_year = value,
            Field::Workshop => self.workshop = value,
            Field::ExperienceLevel => self.experience_level = value,
            Field::SpecialRequirements => self.special_requirements = value,
            Field::TermsAccepted => self.terms_accepted = parse_flag(&value),
        }
    }

    /// Set a boolean field; text fields are left untouched
    pub fn set_checked(&mut self, field: Field, checked: bool) {
        if field == Field::TermsAccepted {
            self.terms_accepted = checked;
        }
    }

    /// Current text value of a field
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::FullName => &self.full_name,
            Field::Email => &self.email,
            Field::Phone => &self.phone,
            Field::University => &self.university,
            Field::GraduationYear => &self.graduation_year,
            Field::Workshop => &self.workshop,
            Field::ExperienceLevel => &self.experience_level,
            Field::SpecialRequirements => &self.special_requirements,
            Field::TermsAccepted => {
                if self.terms_accepted {
                    "true"
                } else {
                    "false"
                }
            }
        }
    }

    /// Copy with surrounding whitespace removed from every text field
    ///
    /// This is the form handed to an intake on submit.
    pub fn trimmed(&self) -> Self {
        let trim = |s: &str| s.trim().to_string();
        Self {
            full_name: trim(&self.full_name),
            email: trim(&self.email),
            phone: trim(&self.phone),
            university: trim(&self.university),
            graduation_year: trim(&self.graduation_year),
            workshop: trim(&self.workshop),
            experience_level: trim(&self.experience_level),
            special_requirements: trim(&self.special_requirements),
            terms_accepted: self.terms_accepted,
        }
    }

    /// True when every field still holds its initial value
    pub fn is_blank(&self) -> bool {
        *self == Self::default()
    }

    /// Load a draft from a YAML or JSON file, chosen by extension
    pub fn load(path: &Path) -> Result<Self, DraftFileError> {
        let contents = std::fs::read_to_string(path).map_err(|source| DraftFileError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::parse(&contents, DraftFormat::from_path(path)).map_err(|message| {
            DraftFileError::Parse {
                path: path.display().to_string(),
                message,
            }
        })
    }

    /// Parse a draft document
    pub fn parse(contents: &str, format: DraftFormat) -> Result<Self, String> {
        match format {
            DraftFormat::Json => serde_json::from_str(contents).map_err(|e| e.to_string()),
            DraftFormat::Yaml => {
                if contents.trim().is_empty() {
                    return Ok(Self::default());
                }
                serde_yml::from_str(contents).map_err(|e| e.to_string())
            }
        }
    }

    /// Write the draft to a YAML or JSON file, chosen by extension
    pub fn save(&self, path: &Path) -> Result<(), DraftFileError> {
        let contents = match DraftFormat::from_path(path) {
            DraftFormat::Json => serde_json::to_string_pretty(self).map_err(|e| e.to_string()),
            DraftFormat::Yaml => serde_yml::to_string(self).map_err(|e| e.to_string()),
        }
        .map_err(|message| DraftFileError::Parse {
            path: path.display().to_string(),
            message,
        })?;

        std::fs::write(path, contents).map_err(|source| DraftFileError::Write {
            path: path.display().to_string(),
            source,
        })
    }
}

/// On-disk format of a draft file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftFormat {
    Yaml,
    Json,
}

impl DraftFormat {
    /// `.json` files are JSON, everything else is YAML
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => DraftFormat::Json,
            _ => DraftFormat::Yaml,
        }
    }
}

/// Errors reading or writing draft files
#[derive(Debug, Error)]
pub enum DraftFileError {
    #[error("failed to read draft {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write draft {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid draft {path}: {message}")]
    Parse { path: String, message: String },
}

/// A YAML/JSON scalar read as text, so `2026` and `"2026"` load alike
#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Integer(i64),
    Float(f64),
    Flag(bool),
}

impl From<Scalar> for String {
    fn from(scalar: Scalar) -> Self {
        match scalar {
            Scalar::Text(s) => s,
            Scalar::Integer(n) => n.to_string(),
            Scalar::Float(n) => n.to_string(),
            Scalar::Flag(b) => b.to_string(),
        }
    }
}

/// Text field that also accepts numbers, booleans and null (as empty)
pub(crate) fn scalar_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Scalar>::deserialize(deserializer)?
        .map(String::from)
        .unwrap_or_default())
}

/// Optional list of text values that may be written as numbers
pub(crate) fn scalar_strings<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<Scalar>>::deserialize(deserializer)?
        .map(|items| items.into_iter().map(String::from).collect()))
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_lowercase().as_str(),
        "true" | "yes" | "y" | "1" | "on"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_set_field_overwrites() {
        let mut draft = RegistrationDraft::new();
        draft.set_field(Field::FullName, "Jane");
        draft.set_field(Field::FullName, "Jane Doe");
        assert_eq!(draft.full_name, "Jane Doe");
        assert_eq!(draft.get(Field::FullName), "Jane Doe");
    }

    #[test]
    fn test_set_field_does_not_validate() {
        let mut draft = RegistrationDraft::new();
        draft.set_field(Field::Email, "not-an-email");
        draft.set_field(Field::Workshop, "underwater-basket-weaving");
        assert_eq!(draft.email, "not-an-email");
        assert_eq!(draft.workshop, "underwater-basket-weaving");
    }

    #[test]
    fn test_terms_from_text() {
        let mut draft = RegistrationDraft::new();
        draft.set_field(Field::TermsAccepted, "yes");
        assert!(draft.terms_accepted);
        draft.set_field(Field::TermsAccepted, "maybe");
        assert!(!draft.terms_accepted);
    }

    #[test]
    fn test_set_checked_ignores_text_fields() {
        let mut draft = RegistrationDraft::new();
        draft.set_checked(Field::FullName, true);
        assert!(draft.is_blank());
        draft.set_checked(Field::TermsAccepted, true);
        assert!(draft.terms_accepted);
    }

    #[test]
    fn test_field_parse_variants() {
        assert_eq!("fullName".parse::<Field>().unwrap(), Field::FullName);
        assert_eq!("full_name".parse::<Field>().unwrap(), Field::FullName);
        assert_eq!("graduation-year".parse::<Field>().unwrap(), Field::GraduationYear);
        assert_eq!("termsAccepted".parse::<Field>().unwrap(), Field::TermsAccepted);
        assert_eq!("terms".parse::<Field>().unwrap(), Field::TermsAccepted);
        assert!("shoeSize".parse::<Field>().is_err());
    }

    #[test]
    fn test_field_steps() {
        assert_eq!(Field::Phone.step(), WizardStep::Personal);
        assert_eq!(Field::SpecialRequirements.step(), WizardStep::Workshop);
        assert_eq!(Field::TermsAccepted.step(), WizardStep::Confirmation);
    }

    #[test]
    fn test_camel_case_serialization() {
        let mut draft = RegistrationDraft::new();
        draft.set_field(Field::FullName, "Jane Doe");
        draft.set_checked(Field::TermsAccepted, true);
        let json = serde_json::to_value(&draft).unwrap();
        assert_eq!(json["fullName"], "Jane Doe");
        assert_eq!(json["termsAccepted"], true);
        assert_eq!(json["graduationYear"], "");
    }

    #[test]
    fn test_partial_yaml_defaults_missing_fields() {
        let draft =
            RegistrationDraft::parse("fullName: Jane Doe\nemail: jane@uni.edu\n", DraftFormat::Yaml)
                .unwrap();
        assert_eq!(draft.full_name, "Jane Doe");
        assert_eq!(draft.university, "");
        assert!(!draft.terms_accepted);
    }

    #[test]
    fn test_unquoted_numbers_load_as_text() {
        let draft = RegistrationDraft::parse(
            "fullName: Jane Doe\ngraduationYear: 2026\nphone: 5551234\n",
            DraftFormat::Yaml,
        )
        .unwrap();
        assert_eq!(draft.graduation_year, "2026");
        assert_eq!(draft.phone, "5551234");

        let draft =
            RegistrationDraft::parse(r#"{"graduationYear": 2027, "phone": null}"#, DraftFormat::Json)
                .unwrap();
        assert_eq!(draft.graduation_year, "2027");
        assert_eq!(draft.phone, "");
    }

    #[test]
    fn test_null_yaml_field_is_empty() {
        let draft = RegistrationDraft::parse("fullName: Jane\nphone:\n", DraftFormat::Yaml).unwrap();
        assert_eq!(draft.phone, "");
    }

    #[test]
    fn test_trimmed_strips_text_fields() {
        let mut draft = RegistrationDraft::new();
        draft.set_field(Field::Email, " jane@uni.edu ");
        draft.set_field(Field::GraduationYear, " 2025 ");
        draft.set_field(Field::Workshop, "cloud\t");
        draft.set_checked(Field::TermsAccepted, true);

        let trimmed = draft.trimmed();
        assert_eq!(trimmed.email, "jane@uni.edu");
        assert_eq!(trimmed.graduation_year, "2025");
        assert_eq!(trimmed.workshop, "cloud");
        assert!(trimmed.terms_accepted);
    }

    #[test]
    fn test_empty_yaml_is_blank_draft() {
        let draft = RegistrationDraft::parse("", DraftFormat::Yaml).unwrap();
        assert!(draft.is_blank());
    }

    #[test]
    fn test_save_and_load() {
        let tmp = tempdir().unwrap();
        let mut draft = RegistrationDraft::new();
        draft.set_field(Field::FullName, "Jane Doe");
        draft.set_field(Field::Workshop, "ai");

        for name in ["draft.yaml", "draft.json"] {
            let path = tmp.path().join(name);
            draft.save(&path).unwrap();
            assert_eq!(RegistrationDraft::load(&path).unwrap(), draft);
        }
    }

    #[test]
    fn test_load_missing_file() {
        let tmp = tempdir().unwrap();
        let err = RegistrationDraft::load(&tmp.path().join("nope.yaml")).unwrap_err();
        assert!(matches!(err, DraftFileError::Read { .. }));
    }
}
