//! CLI argument definitions using clap derive

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::cli::commands::{
    completions::CompletionsArgs, config::ConfigCommands, register::RegisterArgs,
    registrations::RegistrationsArgs, summary::SummaryArgs, validate::ValidateArgs,
    workshops::WorkshopsArgs,
};

#[derive(Parser)]
#[command(name = "signup")]
#[command(author, version, about = "Workshop registration wizard")]
#[command(long_about = "Register attendees for a workshop through a three-step wizard: personal information, workshop selection, and confirmation.")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOpts,
}

#[derive(clap::Args, Clone, Debug)]
pub struct GlobalOpts {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "auto")]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Config file layered over the discovered ones
    #[arg(long, global = true, env = "SIGNUP_CONFIG")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Register an attendee (interactive unless --yes is given)
    Register(RegisterArgs),

    /// Check a draft file against the wizard's validation rules
    Validate(ValidateArgs),

    /// Show the confirmation summary for a draft file
    Summary(SummaryArgs),

    /// List the workshop catalog
    Workshops(WorkshopsArgs),

    /// List submitted registrations
    Registrations(RegistrationsArgs),

    /// Configuration inspection
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output
    #[default]
    Auto,
    /// YAML format
    Yaml,
    /// JSON format (for programming)
    Json,
    /// Plain text
    Text,
}

impl OutputFormat {
    /// Whether output should be machine-readable
    pub fn is_structured(self) -> bool {
        matches!(self, OutputFormat::Yaml | OutputFormat::Json)
    }
}
