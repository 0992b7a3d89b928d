//! `signup registrations` command - List submitted registrations

use console::style;
use miette::{IntoDiagnostic, Result};
use std::path::PathBuf;
use tabled::{builder::Builder, settings::Style};

use crate::cli::args::GlobalOpts;
use crate::cli::helpers::{load_config, print_structured, truncate_str};
use crate::core::intake::FileIntake;

#[derive(clap::Args, Debug)]
pub struct RegistrationsArgs {
    /// Directory to read (overrides config)
    #[arg(long, value_name = "DIR")]
    pub intake_dir: Option<PathBuf>,

    /// Only show registrations for this workshop identifier
    #[arg(long, short = 'w')]
    pub workshop: Option<String>,
}

pub fn run(args: RegistrationsArgs, global: &GlobalOpts) -> Result<()> {
    let config = load_config(global)?;
    let catalog = config.catalog();
    let intake = FileIntake::new(args.intake_dir.unwrap_or_else(|| config.intake_dir()));

    let registrations: Vec<_> = intake
        .list()
        .into_diagnostic()?
        .into_iter()
        .filter(|r| {
            args.workshop
                .as_deref()
                .map_or(true, |w| r.registration.workshop == w)
        })
        .collect();

    if print_structured(&registrations, global.format)? {
        return Ok(());
    }

    if registrations.is_empty() {
        if !global.quiet {
            println!(
                "No registrations in {}",
                style(intake.dir().display()).cyan()
            );
        }
        return Ok(());
    }

    let mut table = Builder::default();
    table.push_record(["ID", "Name", "Email", "Workshop", "Submitted"]);
    for r in &registrations {
        let workshop = catalog
            .workshop_label(&r.registration.workshop)
            .unwrap_or(&r.registration.workshop);
        table.push_record([
            r.id.to_string(),
            truncate_str(&r.registration.full_name, 24),
            truncate_str(&r.registration.email, 32),
            truncate_str(workshop, 30),
            r.submitted_at.format("%Y-%m-%d %H:%M").to_string(),
        ]);
    }
    println!("{}", table.build().with(Style::rounded()));

    if !global.quiet {
        println!("{} registration(s) found", registrations.len());
    }
    Ok(())
}
