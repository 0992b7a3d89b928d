//! `signup validate` command - Check a draft file against the step rules

use clap::ValueEnum;
use console::style;
use miette::{IntoDiagnostic, Result};
use std::path::PathBuf;

use crate::cli::args::GlobalOpts;
use crate::cli::diagnostics::StepValidationReport;
use crate::cli::helpers::{load_config, print_structured};
use crate::core::draft::RegistrationDraft;
use crate::core::step::WizardStep;
use crate::wizard::StepValidator;

#[derive(clap::Args, Debug)]
pub struct ValidateArgs {
    /// Draft file (YAML or JSON)
    pub file: PathBuf,

    /// Which step's rules to check
    #[arg(long, short = 's', value_enum, default_value = "all")]
    pub step: StepArg,
}

/// Step selector for validation
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepArg {
    Personal,
    Workshop,
    Confirmation,
    /// Every data-entry step
    All,
}

impl StepArg {
    fn step(self) -> Option<WizardStep> {
        match self {
            StepArg::Personal => Some(WizardStep::Personal),
            StepArg::Workshop => Some(WizardStep::Workshop),
            StepArg::Confirmation => Some(WizardStep::Confirmation),
            StepArg::All => None,
        }
    }

    fn describe(self) -> &'static str {
        match self {
            StepArg::Personal => "personal step",
            StepArg::Workshop => "workshop step",
            StepArg::Confirmation => "confirmation step",
            StepArg::All => "all steps",
        }
    }
}

pub fn run(args: ValidateArgs, global: &GlobalOpts) -> Result<()> {
    let config = load_config(global)?;
    let draft = RegistrationDraft::load(&args.file).into_diagnostic()?;
    let validator = StepValidator::new(config.catalog());

    let errors = match args.step.step() {
        Some(step) => validator.validate(step, &draft),
        None => validator.validate_all(&draft),
    };
    tracing::debug!(file = %args.file.display(), failing = errors.len(), "validated draft");

    let printed = print_structured(&errors, global.format)?;

    if !errors.is_empty() {
        return Err(StepValidationReport::new(&errors, validator.catalog()).into());
    }

    if !printed && !global.quiet {
        println!(
            "{} {} passes {}",
            style("✓").green(),
            style(args.file.display()).cyan(),
            args.step.describe()
        );
    }
    Ok(())
}
