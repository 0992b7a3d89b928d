//! Workshop Signup
//!
//! Registers attendees for a workshop through a three-step wizard
//! (personal details, workshop selection, confirmation) with per-step
//! validation and an explicit submit/confirm protocol.

pub mod cli;
pub mod core;
pub mod wizard;
