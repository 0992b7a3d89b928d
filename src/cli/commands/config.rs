//! `signup config` command - Configuration inspection
//!
//! Shows the effective configuration and where it is read from.

use clap::Subcommand;
use console::style;
use miette::Result;
use serde::Serialize;
use std::path::PathBuf;

use crate::cli::args::GlobalOpts;
use crate::cli::helpers::{load_config, print_structured};
use crate::core::catalog::WorkshopEntry;
use crate::core::config::{Config, INTAKE_DIR_ENV};

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show the effective configuration
    Show,

    /// Show paths to configuration files
    Path,

    /// List all available configuration keys
    Keys,
}

/// Valid configuration keys
const VALID_KEYS: &[(&str, &str)] = &[
    ("intake_dir", "Directory where submitted registrations are stored"),
    ("graduation_years", "Allowed graduation years (list of strings)"),
    ("workshops", "Workshop catalog (list of {id, label})"),
];

/// Configuration with every fallback resolved
#[derive(Debug, Serialize)]
struct EffectiveConfig {
    intake_dir: PathBuf,
    graduation_years: Vec<String>,
    workshops: Vec<WorkshopEntry>,
}

/// Run a config subcommand
pub fn run(cmd: ConfigCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        ConfigCommands::Show => run_show(global),
        ConfigCommands::Path => run_path(global),
        ConfigCommands::Keys => run_keys(),
    }
}

fn run_show(global: &GlobalOpts) -> Result<()> {
    let config = load_config(global)?;
    let catalog = config.catalog();
    let effective = EffectiveConfig {
        intake_dir: config.intake_dir(),
        graduation_years: catalog.graduation_years().to_vec(),
        workshops: catalog.workshops().to_vec(),
    };

    if print_structured(&effective, global.format)? {
        return Ok(());
    }

    println!("{}", style("Effective Configuration").bold().underlined());
    println!();
    println!(
        "  {} {}",
        style("intake_dir:").cyan(),
        effective.intake_dir.display()
    );
    println!(
        "  {} {}",
        style("graduation_years:").cyan(),
        effective.graduation_years.join(", ")
    );
    println!("  {}", style("workshops:").cyan());
    for workshop in &effective.workshops {
        println!("    {} {}", style(&workshop.id).yellow(), workshop.label);
    }

    println!();
    println!("{}", style("Config Sources (in priority order):").dim());
    println!("  1. Environment variables ({})", INTAKE_DIR_ENV);
    println!("  2. --config file");
    println!("  3. Directory config (./signup.yaml)");
    println!("  4. Global config (~/.config/signup/config.yaml)");

    Ok(())
}

fn run_path(global: &GlobalOpts) -> Result<()> {
    let describe = |path: &std::path::Path| {
        if path.exists() {
            style("(exists)").green().to_string()
        } else {
            style("(not found)").dim().to_string()
        }
    };

    match Config::global_config_path() {
        Some(path) => println!("global:    {} {}", path.display(), describe(&path)),
        None => println!("global:    {}", style("(no home directory)").dim()),
    }

    let project = Config::project_config_path();
    println!("directory: {} {}", project.display(), describe(&project));

    if let Some(explicit) = &global.config {
        println!("explicit:  {} {}", explicit.display(), describe(explicit));
    }
    Ok(())
}

fn run_keys() -> Result<()> {
    println!("{}", style("Available Configuration Keys").bold().underlined());
    println!();
    for (key, description) in VALID_KEYS {
        println!("  {:<18} {}", style(key).cyan(), description);
    }
    Ok(())
}
