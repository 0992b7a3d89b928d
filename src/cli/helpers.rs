//! Shared helper functions for CLI commands
//!
//! This module contains utility functions that are used across multiple
//! command modules to avoid code duplication.

use miette::{IntoDiagnostic, Result};
use serde::Serialize;

use crate::cli::args::{GlobalOpts, OutputFormat};
use crate::core::draft::Field;
use crate::core::Config;

/// Load the layered config, honoring `--config`
pub fn load_config(global: &GlobalOpts) -> Result<Config> {
    Config::load(global.config.as_deref()).into_diagnostic()
}

/// Print a value as YAML or JSON
///
/// Returns `false` when the format is not structured and nothing was printed.
pub fn print_structured<T: Serialize>(value: &T, format: OutputFormat) -> Result<bool> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(value).into_diagnostic()?);
            Ok(true)
        }
        OutputFormat::Yaml => {
            print!("{}", serde_yml::to_string(value).into_diagnostic()?);
            Ok(true)
        }
        OutputFormat::Auto | OutputFormat::Text => Ok(false),
    }
}

/// Parse a `field=value` assignment
pub fn parse_assignment(s: &str) -> Result<(Field, String)> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| miette::miette!("expected FIELD=VALUE, got '{}'", s))?;
    let field = key.trim().parse::<Field>().map_err(|e| miette::miette!("{}", e))?;
    Ok((field, value.to_string()))
}

/// Truncate a string to max_len, adding "..." if truncated
///
/// Useful for table columns that need fixed-width output.
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_str() {
        assert_eq!(truncate_str("hello", 10), "hello");
        assert_eq!(truncate_str("hello world", 8), "hello...");
        assert_eq!(truncate_str("hi", 2), "hi");
        assert_eq!(truncate_str("Zoë Zoë Zoë", 6), "Zoë...");
    }

    #[test]
    fn test_parse_assignment() {
        let (field, value) = parse_assignment("email=jane@uni.edu").unwrap();
        assert_eq!(field, Field::Email);
        assert_eq!(value, "jane@uni.edu");

        let (field, value) = parse_assignment("special_requirements=a=b").unwrap();
        assert_eq!(field, Field::SpecialRequirements);
        assert_eq!(value, "a=b");
    }

    #[test]
    fn test_parse_assignment_errors() {
        assert!(parse_assignment("email").is_err());
        assert!(parse_assignment("shoeSize=44").is_err());
    }
}
