//! `signup completions` command - Shell completion scripts
//!
//! `source <(signup completions bash)` in a shell rc file, or write the
//! script once with `--output` (e.g. into `~/.config/fish/completions/`).

use clap::CommandFactory;
use clap_complete::Shell;
use console::style;
use miette::{IntoDiagnostic, Result};
use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;

use crate::cli::Cli;

#[derive(clap::Args, Debug)]
pub struct CompletionsArgs {
    /// Target shell
    #[arg(value_enum)]
    pub shell: Shell,

    /// Write the script to a file instead of stdout
    #[arg(long, short = 'o', value_name = "FILE")]
    pub output: Option<PathBuf>,
}

pub fn run(args: CompletionsArgs) -> Result<()> {
    let Some(path) = args.output else {
        return write_completions(args.shell, &mut io::stdout().lock());
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).into_diagnostic()?;
    }
    let mut file = File::create(&path).into_diagnostic()?;
    write_completions(args.shell, &mut file)?;
    file.flush().into_diagnostic()?;

    eprintln!(
        "{} Wrote {} completions to {}",
        style("✓").green(),
        args.shell,
        style(path.display()).cyan()
    );
    Ok(())
}

/// Generate the completion script for the `signup` command tree
fn write_completions(shell: Shell, out: &mut dyn Write) -> Result<()> {
    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();
    clap_complete::generate(shell, &mut cmd, bin_name, out);
    Ok(())
}
