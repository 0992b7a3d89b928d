//! CLI command implementations

pub mod completions;
pub mod config;
pub mod register;
pub mod registrations;
pub mod summary;
pub mod validate;
pub mod workshops;
