//! # Resource Reference
//!
//! The immutable description of what a caller wants resolved: a name and an
//! optional version constraint.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A named external resource, optionally pinned to a version
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceReference {
    name: String,
    version_constraint: Option<String>,
}

impl ResourceReference {
    /// Create a reference with no version constraint
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version_constraint: None,
        }
    }

    /// Create a reference pinned to a version
    pub fn with_version(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version_constraint: Some(version.into()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The version constraint, with an empty string treated as unset
    pub fn version_constraint(&self) -> Option<&str> {
        self.version_constraint
            .as_deref()
            .filter(|version| !version.is_empty())
    }

    /// Whether `candidate` satisfies this reference's version constraint.
    ///
    /// An unset or empty constraint matches every candidate. Otherwise the
    /// candidate must equal the constraint, ignoring ASCII case.
    pub fn version_matches(&self, candidate: &str) -> bool {
        match self.version_constraint() {
            None => true,
            Some(constraint) => constraint.eq_ignore_ascii_case(candidate),
        }
    }
}

impl fmt::Display for ResourceReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.version_constraint() {
            Some(version) => write!(f, "{}/{}", self.name, version),
            None => write!(f, "{}", self.name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unconstrained_matches_anything() {
        let reference = ResourceReference::new("Contoso.Sdk");
        assert!(reference.version_matches("1.0.0"));
        assert!(reference.version_matches(""));
        assert!(reference.version_matches("not-a-version"));
    }

    #[test]
    fn test_empty_constraint_is_unset() {
        let reference = ResourceReference::with_version("Contoso.Sdk", "");
        assert_eq!(reference.version_constraint(), None);
        assert!(reference.version_matches("9.9.9"));
        assert_eq!(reference.to_string(), "Contoso.Sdk");
    }

    #[test]
    fn test_constraint_is_case_insensitive_exact() {
        let reference = ResourceReference::with_version("Contoso.Sdk", "2.0.0-Preview");
        assert!(reference.version_matches("2.0.0-preview"));
        assert!(reference.version_matches("2.0.0-PREVIEW"));
        assert!(!reference.version_matches("2.0.0"));
        assert!(!reference.version_matches("2.0.0-preview.1"));
    }

    #[test]
    fn test_display() {
        let reference = ResourceReference::with_version("Contoso.Sdk", "1.2.3");
        assert_eq!(reference.to_string(), "Contoso.Sdk/1.2.3");
    }
}
