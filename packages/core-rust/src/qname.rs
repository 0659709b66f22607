//! Structured qualified names for modules and services.
//!
//! A qualified name is a base name plus an optional version
//! (`"addressing"`, `"addressing-1.2"`). The parts are kept separate so map
//! lookups hash the structure directly instead of building `name-version`
//! strings on the hot path; `Display` renders the joined form for operators.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identity of a module or service: base name plus optional version.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct QualifiedName {
    name: String,
    version: Option<String>,
}

impl QualifiedName {
    /// Creates an unversioned qualified name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: None,
        }
    }

    /// Creates a versioned qualified name.
    #[must_use]
    pub fn versioned(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: Some(version.into()),
        }
    }

    /// The base name, without any version.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The version, if one was declared.
    #[must_use]
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// Returns a copy of this name carrying the given version.
    #[must_use]
    pub fn with_version(&self, version: impl Into<String>) -> Self {
        Self {
            name: self.name.clone(),
            version: Some(version.into()),
        }
    }

    /// `true` if the base name matches, regardless of version.
    #[must_use]
    pub fn matches_name(&self, name: &str) -> bool {
        self.name == name
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.version {
            Some(version) => write!(f, "{}-{}", self.name, version),
            None => f.write_str(&self.name),
        }
    }
}

impl From<&str> for QualifiedName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_joins_name_and_version() {
        assert_eq!(QualifiedName::new("logging").to_string(), "logging");
        assert_eq!(
            QualifiedName::versioned("logging", "1.0").to_string(),
            "logging-1.0"
        );
    }

    #[test]
    fn versioned_and_unversioned_are_distinct_keys() {
        let bare = QualifiedName::new("addressing");
        let versioned = QualifiedName::versioned("addressing", "1.2");
        assert_ne!(bare, versioned);
        assert!(bare.matches_name("addressing"));
        assert!(versioned.matches_name("addressing"));
    }

    #[test]
    fn with_version_keeps_base_name() {
        let bare = QualifiedName::new("security");
        let pinned = bare.with_version("2.0");
        assert_eq!(pinned, QualifiedName::versioned("security", "2.0"));
        assert_eq!(bare.version(), None);
    }
}
