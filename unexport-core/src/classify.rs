//! Classification of renamer refusals.
//!
//! The renamer reports refusals as free text. This table is coupled to its
//! wording; when the wording changes, only [`CLASSIFICATION_TABLE`] changes.

use serde::{Serialize, Serializer};
use std::fmt;

/// Why a rename was refused.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// References from other packages would break.
    WouldBreakClients,
    /// The offset does not address an identifier.
    InvalidPosition,
    /// The new name is not a valid identifier.
    InvalidIdentifier,
    /// The unexported name already exists in scope.
    NameCollision,
    /// A type would stop satisfying an interface.
    InterfaceAssignabilityBroken,
    /// Unrecognised text, kept verbatim.
    Unknown(String),
}

/// Substring to category, checked in order; first match wins.
const CLASSIFICATION_TABLE: &[(&str, ErrorCategory)] = &[
    ("breaking references", ErrorCategory::WouldBreakClients),
    ("no identifier at this position", ErrorCategory::InvalidPosition),
    ("not a valid identifier", ErrorCategory::InvalidIdentifier),
    ("would conflict with this method", ErrorCategory::NameCollision),
    (
        "no longer assignable to interface",
        ErrorCategory::InterfaceAssignabilityBroken,
    ),
];

/// Maps raw renamer output to a category.
pub fn classify(raw: &str) -> ErrorCategory {
    CLASSIFICATION_TABLE
        .iter()
        .find(|(needle, _)| raw.contains(needle))
        .map(|(_, category)| category.clone())
        .unwrap_or_else(|| ErrorCategory::Unknown(raw.to_string()))
}

impl ErrorCategory {
    /// Stable machine name.
    pub fn code(&self) -> &'static str {
        match self {
            Self::WouldBreakClients => "would_break_clients",
            Self::InvalidPosition => "invalid_position",
            Self::InvalidIdentifier => "invalid_identifier",
            Self::NameCollision => "name_collision",
            Self::InterfaceAssignabilityBroken => "interface_assignability_broken",
            Self::Unknown(_) => "unknown",
        }
    }

    /// Human description printed in the status line.
    pub fn description(&self) -> &'static str {
        match self {
            Self::WouldBreakClients => "would break package clients",
            Self::InvalidPosition => "internal error: invalid position",
            Self::InvalidIdentifier => "internal error: invalid identifier",
            Self::NameCollision => "symbol with unexported name form already exists",
            Self::InterfaceAssignabilityBroken => "would break interface assignability",
            Self::Unknown(_) => "unknown error",
        }
    }

    /// Raw renamer text for unrecognised refusals.
    pub fn raw_text(&self) -> Option<&str> {
        match self {
            Self::Unknown(raw) => Some(raw),
            _ => None,
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

impl Serialize for ErrorCategory {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_category() {
        assert_eq!(
            classify("renaming this func \"Baz\" to \"baz\" would make it unexported, breaking references"),
            ErrorCategory::WouldBreakClients
        );
        assert_eq!(
            classify("gorename: -offset \"a.go:#3\": no identifier at this position"),
            ErrorCategory::InvalidPosition
        );
        assert_eq!(
            classify("gorename: -to \"1x\": not a valid identifier"),
            ErrorCategory::InvalidIdentifier
        );
        assert_eq!(
            classify("renaming this method \"Do\" to \"do\"\n\twould conflict with this method"),
            ErrorCategory::NameCollision
        );
        assert_eq!(
            classify("type T is no longer assignable to interface I"),
            ErrorCategory::InterfaceAssignabilityBroken
        );
    }

    #[test]
    fn test_priority_order() {
        let raw = "breaking references; also no longer assignable to interface I";
        assert_eq!(classify(raw), ErrorCategory::WouldBreakClients);

        let raw = "would conflict with this method, no identifier at this position";
        assert_eq!(classify(raw), ErrorCategory::InvalidPosition);
    }

    #[test]
    fn test_unknown_keeps_raw_text() {
        let raw = "gorename: segmentation fault";
        let category = classify(raw);
        assert_eq!(category, ErrorCategory::Unknown(raw.to_string()));
        assert_eq!(category.raw_text(), Some(raw));
        assert_eq!(category.to_string(), "unknown error");
    }

    #[test]
    fn test_empty_text_is_unknown() {
        assert_eq!(classify(""), ErrorCategory::Unknown(String::new()));
    }

    #[test]
    fn test_codes_serialize() {
        let json = serde_json::to_string(&ErrorCategory::NameCollision).unwrap();
        assert_eq!(json, "\"name_collision\"");
        let json = serde_json::to_string(&ErrorCategory::Unknown("x".into())).unwrap();
        assert_eq!(json, "\"unknown\"");
    }
}
