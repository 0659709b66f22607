//! Handler identities and the placement rules modules declare for them.
//!
//! A handler is a single processing step. This crate carries only its
//! identity — logical name plus the module that contributed it; the dispatch
//! path maps identities to executable units, never this core.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::flow::Flow;
use crate::qname::QualifiedName;

/// Identity of a processing step: logical name plus the contributing module.
///
/// System handlers installed by the engine itself carry no module.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HandlerDesc {
    pub name: String,
    pub module: Option<QualifiedName>,
}

impl HandlerDesc {
    /// A built-in handler owned by the engine (no contributing module).
    #[must_use]
    pub fn system(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            module: None,
        }
    }

    /// A handler contributed by a module.
    #[must_use]
    pub fn contributed(name: impl Into<String>, module: QualifiedName) -> Self {
        Self {
            name: name.into(),
            module: Some(module),
        }
    }
}

impl fmt::Display for HandlerDesc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.module {
            Some(module) => write!(f, "{}:{}", module, self.name),
            None => f.write_str(&self.name),
        }
    }
}

/// Where within a phase a contributed handler should land.
///
/// `Before`/`After` reference another handler's logical name within the same
/// phase; resolution fails if the referenced handler is absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Placement {
    /// Anchored relative to the handlers declared at the given index.
    At(usize),
    /// Ahead of every handler already declared for the phase.
    First,
    /// After every handler already declared for the phase.
    Last,
    /// Immediately constrained to precede the named handler.
    Before(String),
    /// Immediately constrained to follow the named handler.
    After(String),
}

/// A module's declaration that a handler be inserted into a named phase of a
/// flow at a given position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HandlerRule {
    pub handler: HandlerDesc,
    pub flow: Flow,
    pub phase: String,
    pub placement: Placement,
}

impl HandlerRule {
    /// Creates a placement rule for one handler.
    #[must_use]
    pub fn new(
        handler: HandlerDesc,
        flow: Flow,
        phase: impl Into<String>,
        placement: Placement,
    ) -> Self {
        Self {
            handler,
            flow,
            phase: phase.into(),
            placement,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_shows_contributing_module() {
        let system = HandlerDesc::system("request-uri-dispatcher");
        assert_eq!(system.to_string(), "request-uri-dispatcher");

        let contributed = HandlerDesc::contributed(
            "audit-in",
            QualifiedName::versioned("logging", "1.0"),
        );
        assert_eq!(contributed.to_string(), "logging-1.0:audit-in");
    }

    #[test]
    fn system_handlers_have_no_module() {
        assert!(HandlerDesc::system("dispatch-checker").module.is_none());
    }
}
