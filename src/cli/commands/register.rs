//! `signup register` command - Run the registration wizard

use console::style;
use miette::{bail, IntoDiagnostic, Result};
use serde::Serialize;
use std::path::PathBuf;

use crate::cli::args::GlobalOpts;
use crate::cli::diagnostics::StepValidationReport;
use crate::cli::helpers::{load_config, parse_assignment, print_structured};
use crate::core::draft::{Field, RegistrationDraft};
use crate::core::intake::{FileIntake, SubmissionReceipt};
use crate::core::step::WizardStep;
use crate::wizard::{RegistrationWizard, WizardError, WizardSession};

#[derive(clap::Args, Debug)]
pub struct RegisterArgs {
    /// Prefill the draft from a YAML or JSON file
    #[arg(long, value_name = "FILE")]
    pub from: Option<PathBuf>,

    /// Set a draft field (repeatable), e.g. --set email=jane@uni.edu
    #[arg(long = "set", value_name = "FIELD=VALUE")]
    pub set: Vec<String>,

    /// Accept the terms and conditions
    #[arg(long)]
    pub accept_terms: bool,

    /// Run every step without prompting and submit
    #[arg(long, short = 'y')]
    pub yes: bool,

    /// Directory where the registration is stored (overrides config)
    #[arg(long, value_name = "DIR")]
    pub intake_dir: Option<PathBuf>,
}

/// What an unattended run prints on success
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RegistrationOutput<'a> {
    #[serde(flatten)]
    receipt: &'a SubmissionReceipt,
    full_name: &'a str,
    email: &'a str,
    workshop: &'a str,
}

pub fn run(args: RegisterArgs, global: &GlobalOpts) -> Result<()> {
    let config = load_config(global)?;
    let intake = FileIntake::new(
        args.intake_dir
            .clone()
            .unwrap_or_else(|| config.intake_dir()),
    );

    let draft = match &args.from {
        Some(path) => RegistrationDraft::load(path).into_diagnostic()?,
        None => RegistrationDraft::default(),
    };

    let mut session = WizardSession::with_draft(config.catalog(), draft);
    for assignment in &args.set {
        let (field, value) = parse_assignment(assignment)?;
        session.set_field(field, value);
    }
    if args.accept_terms {
        session.set_checked(Field::TermsAccepted, true);
    }

    if args.yes {
        return run_unattended(&mut session, &intake, global);
    }

    if !console::user_attended() {
        bail!("Interactive registration needs a terminal. Use --yes with --from or --set to register without prompts.");
    }

    let receipts = RegistrationWizard::new()?.run(&mut session, &intake)?;
    if !global.quiet && !receipts.is_empty() {
        println!();
        println!(
            "{} {} registration(s) stored in {}",
            style("✓").green(),
            receipts.len(),
            style(intake.dir().display()).cyan()
        );
    }
    Ok(())
}

/// Drive the wizard through every step with the given draft, then submit
fn run_unattended(
    session: &mut WizardSession,
    intake: &FileIntake,
    global: &GlobalOpts,
) -> Result<()> {
    while session.step() != WizardStep::Confirmation {
        if let Err(e) = session.advance() {
            return Err(wizard_failure(e, session));
        }
    }

    let receipt = match session.submit(intake) {
        Ok(receipt) => receipt,
        Err(e) => return Err(wizard_failure(e, session)),
    };

    let draft = session.draft();
    let output = RegistrationOutput {
        receipt: &receipt,
        full_name: &draft.full_name,
        email: &draft.email,
        workshop: &draft.workshop,
    };
    if print_structured(&output, global.format)? {
        return Ok(());
    }

    if global.quiet {
        println!("{}", receipt.id);
    } else {
        let workshop = session
            .catalog()
            .workshop_label(&draft.workshop)
            .unwrap_or(&draft.workshop);
        println!(
            "{} Registered {} for {} ({})",
            style("✓").green(),
            style(&draft.full_name).bold(),
            style(workshop).cyan(),
            receipt.id
        );
    }
    Ok(())
}

fn wizard_failure(err: WizardError, session: &WizardSession) -> miette::Report {
    match err {
        WizardError::Validation { errors, .. } => {
            StepValidationReport::new(&errors, session.catalog()).into()
        }
        WizardError::Submission(e) => miette::miette!(
            help = "Nothing was stored; fix the problem and submit again",
            "Submission failed: {}",
            e
        ),
        other => miette::miette!("{}", other),
    }
}

