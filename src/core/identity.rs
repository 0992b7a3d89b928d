//! Registration identity using prefixed ULIDs

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use ulid::Ulid;

/// Prefix carried by every registration identifier
pub const REGISTRATION_PREFIX: &str = "REG";

/// A unique registration identifier, rendered as `REG-<ULID>`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RegistrationId {
    ulid: Ulid,
}

impl RegistrationId {
    /// Create a fresh identifier
    pub fn new() -> Self {
        Self { ulid: Ulid::new() }
    }

    /// Get the ULID component
    pub fn ulid(&self) -> Ulid {
        self.ulid
    }

    /// Parse a RegistrationId from a string
    pub fn parse(s: &str) -> Result<Self, IdParseError> {
        s.parse()
    }

    /// File name used when this registration is written to disk
    pub fn file_name(&self) -> String {
        format!("{}.json", self)
    }
}

impl Default for RegistrationId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RegistrationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", REGISTRATION_PREFIX, self.ulid)
    }
}

impl FromStr for RegistrationId {
    type Err = IdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (prefix_str, ulid_str) = s
            .split_once('-')
            .ok_or_else(|| IdParseError::MissingDelimiter(s.to_string()))?;

        if !prefix_str.eq_ignore_ascii_case(REGISTRATION_PREFIX) {
            return Err(IdParseError::InvalidPrefix(prefix_str.to_string()));
        }

        let ulid = Ulid::from_string(ulid_str)
            .map_err(|e| IdParseError::InvalidUlid(ulid_str.to_string(), e.to_string()))?;

        Ok(Self { ulid })
    }
}

impl Serialize for RegistrationId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for RegistrationId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Errors that can occur when parsing registration IDs
#[derive(Debug, Error)]
pub enum IdParseError {
    #[error("invalid registration prefix: '{0}' (expected REG)")]
    InvalidPrefix(String),

    #[error("missing '-' delimiter in registration ID: '{0}'")]
    MissingDelimiter(String),

    #[error("invalid ULID '{0}': {1}")]
    InvalidUlid(String, String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registration_id_generation() {
        let id = RegistrationId::new();
        assert!(id.to_string().starts_with("REG-"));
        assert_eq!(id.to_string().len(), 30); // REG- (4) + ULID (26)
    }

    #[test]
    fn test_registration_id_parsing() {
        let original = RegistrationId::new();
        let parsed = RegistrationId::parse(&original.to_string()).unwrap();
        assert_eq!(original, parsed);
    }

    #[test]
    fn test_registration_id_lowercase_prefix() {
        let original = RegistrationId::new();
        let lowered = format!("reg-{}", original.ulid());
        assert_eq!(RegistrationId::parse(&lowered).unwrap(), original);
    }

    #[test]
    fn test_registration_id_invalid_prefix() {
        let err = RegistrationId::parse("REQ-01HQ3K4N5M6P7R8S9T0UVWXYZ").unwrap_err();
        assert!(matches!(err, IdParseError::InvalidPrefix(_)));
    }

    #[test]
    fn test_registration_id_missing_delimiter() {
        let err = RegistrationId::parse("REG01HQ3K4N5M6P7R8S9T0UVWXYZ").unwrap_err();
        assert!(matches!(err, IdParseError::MissingDelimiter(_)));
    }

    #[test]
    fn test_registration_id_invalid_ulid() {
        let err = RegistrationId::parse("REG-notaulid").unwrap_err();
        assert!(matches!(err, IdParseError::InvalidUlid(_, _)));
    }

    #[test]
    fn test_file_name() {
        let id = RegistrationId::new();
        assert_eq!(id.file_name(), format!("{}.json", id));
    }
}
