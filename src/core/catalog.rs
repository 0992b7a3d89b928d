//! Workshop catalog and the other fixed choice lists

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A selectable workshop
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkshopEntry {
    /// Identifier stored in the draft (e.g., "web-dev")
    pub id: String,
    /// Display label (e.g., "Web Development Fundamentals")
    pub label: String,
}

impl WorkshopEntry {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }
}

/// Choice lists the validator and the confirmation summary depend on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    workshops: Vec<WorkshopEntry>,
    graduation_years: Vec<String>,
}

impl Catalog {
    pub fn new(workshops: Vec<WorkshopEntry>, graduation_years: Vec<String>) -> Self {
        Self {
            workshops,
            graduation_years,
        }
    }

    /// The built-in workshop list
    pub fn default_workshops() -> Vec<WorkshopEntry> {
        vec![
            WorkshopEntry::new("web-dev", "Web Development Fundamentals"),
            WorkshopEntry::new("data-science", "Data Science with Python"),
            WorkshopEntry::new("cloud", "Cloud Architecture Workshop"),
            WorkshopEntry::new("mobile", "Mobile App Development"),
            WorkshopEntry::new("ai", "AI & Machine Learning Basics"),
        ]
    }

    /// The built-in graduation years
    pub fn default_graduation_years() -> Vec<String> {
        (2024..=2028).map(|y| y.to_string()).collect()
    }

    pub fn workshops(&self) -> &[WorkshopEntry] {
        &self.workshops
    }

    pub fn graduation_years(&self) -> &[String] {
        &self.graduation_years
    }

    /// Look up a workshop's display label
    pub fn workshop_label(&self, id: &str) -> Option<&str> {
        self.workshops
            .iter()
            .find(|w| w.id == id)
            .map(|w| w.label.as_str())
    }

    pub fn has_workshop(&self, id: &str) -> bool {
        self.workshops.iter().any(|w| w.id == id)
    }

    pub fn has_graduation_year(&self, year: &str) -> bool {
        self.graduation_years.iter().any(|y| y == year)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new(Self::default_workshops(), Self::default_graduation_years())
    }
}

/// Self-assessed experience with the workshop topic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExperienceLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl ExperienceLevel {
    pub fn all() -> &'static [ExperienceLevel] {
        &[
            ExperienceLevel::Beginner,
            ExperienceLevel::Intermediate,
            ExperienceLevel::Advanced,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ExperienceLevel::Beginner => "beginner",
            ExperienceLevel::Intermediate => "intermediate",
            ExperienceLevel::Advanced => "advanced",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ExperienceLevel::Beginner => "Beginner",
            ExperienceLevel::Intermediate => "Intermediate",
            ExperienceLevel::Advanced => "Advanced",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            ExperienceLevel::Beginner => "No prior experience",
            ExperienceLevel::Intermediate => "Some experience",
            ExperienceLevel::Advanced => "Experienced practitioner",
        }
    }
}

impl fmt::Display for ExperienceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ExperienceLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "beginner" => Ok(ExperienceLevel::Beginner),
            "intermediate" => Ok(ExperienceLevel::Intermediate),
            "advanced" => Ok(ExperienceLevel::Advanced),
            _ => Err(format!("Unknown experience level: {}", s)),
        }
    }
}
