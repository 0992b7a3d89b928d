use clap::Parser;
use miette::Result;
use signup::cli::{logging, Cli, Commands};

fn main() -> Result<()> {
    // Restore default SIGPIPE so piping into `head` exits quietly.
    #[cfg(unix)]
    {
        unsafe {
            libc::signal(libc::SIGPIPE, libc::SIG_DFL);
        }
    }
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .build(),
        )
    }))?;

    let cli = Cli::parse();
    let global = cli.global;
    logging::init_logging(global.verbose, global.quiet);

    match cli.command {
        Commands::Register(args) => signup::cli::commands::register::run(args, &global),
        Commands::Validate(args) => signup::cli::commands::validate::run(args, &global),
        Commands::Summary(args) => signup::cli::commands::summary::run(args, &global),
        Commands::Workshops(args) => signup::cli::commands::workshops::run(args, &global),
        Commands::Registrations(args) => {
            signup::cli::commands::registrations::run(args, &global)
        }
        Commands::Config(cmd) => signup::cli::commands::config::run(cmd, &global),
        Commands::Completions(args) => signup::cli::commands::completions::run(args),
    }
}
