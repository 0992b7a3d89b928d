//! Wizard steps and their fixed ordering

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A phase of the registration wizard
///
/// The three data-entry steps are ordered `Personal < Workshop < Confirmation`;
/// `Submitted` is terminal and only reachable through a successful submission.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum WizardStep {
    #[default]
    Personal,
    Workshop,
    Confirmation,
    Submitted,
}

impl WizardStep {
    /// The data-entry steps in forward order
    pub fn entry_steps() -> &'static [WizardStep] {
        &[
            WizardStep::Personal,
            WizardStep::Workshop,
            WizardStep::Confirmation,
        ]
    }

    /// Next data-entry step, if any
    ///
    /// Forward navigation never reaches `Submitted`; only submission does.
    pub fn next(self) -> Option<WizardStep> {
        match self {
            WizardStep::Personal => Some(WizardStep::Workshop),
            WizardStep::Workshop => Some(WizardStep::Confirmation),
            WizardStep::Confirmation | WizardStep::Submitted => None,
        }
    }

    /// Previous data-entry step, if any
    pub fn previous(self) -> Option<WizardStep> {
        match self {
            WizardStep::Personal | WizardStep::Submitted => None,
            WizardStep::Workshop => Some(WizardStep::Personal),
            WizardStep::Confirmation => Some(WizardStep::Workshop),
        }
    }

    /// Whether this is the terminal step
    pub fn is_terminal(self) -> bool {
        matches!(self, WizardStep::Submitted)
    }

    /// One-based position shown in the progress indicator
    pub fn number(self) -> usize {
        match self {
            WizardStep::Personal => 1,
            WizardStep::Workshop => 2,
            WizardStep::Confirmation => 3,
            WizardStep::Submitted => 4,
        }
    }

    /// Heading shown above the step's form
    pub fn title(self) -> &'static str {
        match self {
            WizardStep::Personal => "Personal Information",
            WizardStep::Workshop => "Workshop Selection",
            WizardStep::Confirmation => "Confirmation",
            WizardStep::Submitted => "Registration Complete",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            WizardStep::Personal => "personal",
            WizardStep::Workshop => "workshop",
            WizardStep::Confirmation => "confirmation",
            WizardStep::Submitted => "submitted",
        }
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for WizardStep {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "personal" => Ok(WizardStep::Personal),
            "workshop" => Ok(WizardStep::Workshop),
            "confirmation" => Ok(WizardStep::Confirmation),
            "submitted" => Ok(WizardStep::Submitted),
            _ => Err(format!("Unknown step: {}", s)),
        }
    }
}
