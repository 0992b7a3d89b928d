//! `signup summary` command - Print the confirmation summary of a draft

use miette::{IntoDiagnostic, Result};
use std::path::PathBuf;

use crate::cli::args::GlobalOpts;
use crate::cli::helpers::{load_config, print_structured};
use crate::core::draft::RegistrationDraft;
use crate::wizard::{ConfirmationSummary, SummaryRenderer};

#[derive(clap::Args, Debug)]
pub struct SummaryArgs {
    /// Draft file (YAML or JSON)
    pub file: PathBuf,
}

pub fn run(args: SummaryArgs, global: &GlobalOpts) -> Result<()> {
    let config = load_config(global)?;
    let draft = RegistrationDraft::load(&args.file).into_diagnostic()?;
    let summary = ConfirmationSummary::from_draft(&draft, &config.catalog());

    if print_structured(&summary, global.format)? {
        return Ok(());
    }

    let text = SummaryRenderer::new()
        .into_diagnostic()?
        .render(&summary)
        .into_diagnostic()?;
    print!("{}", text);
    Ok(())
}
