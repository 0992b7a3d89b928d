//! CLI module - argument parsing and command dispatch

pub mod args;
pub mod commands;
pub mod diagnostics;
pub mod helpers;
pub mod logging;

pub use args::{Cli, Commands, GlobalOpts, OutputFormat};
