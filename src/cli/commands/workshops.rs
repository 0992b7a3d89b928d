//! `signup workshops` command - List the workshop catalog

use miette::Result;
use tabled::{builder::Builder, settings::Style};

use crate::cli::args::GlobalOpts;
use crate::cli::helpers::{load_config, print_structured};

#[derive(clap::Args, Debug)]
pub struct WorkshopsArgs {
    /// Print identifiers only, one per line
    #[arg(long)]
    pub ids: bool,
}

pub fn run(args: WorkshopsArgs, global: &GlobalOpts) -> Result<()> {
    let catalog = load_config(global)?.catalog();

    if print_structured(&catalog.workshops(), global.format)? {
        return Ok(());
    }

    if args.ids {
        for workshop in catalog.workshops() {
            println!("{}", workshop.id);
        }
        return Ok(());
    }

    let mut table = Builder::default();
    table.push_record(["ID", "Workshop"]);
    for workshop in catalog.workshops() {
        table.push_record([workshop.id.as_str(), workshop.label.as_str()]);
    }
    println!("{}", table.build().with(Style::rounded()));

    if !global.quiet {
        println!("{} workshop(s)", catalog.workshops().len());
    }
    Ok(())
}
