//! Named, ordered containers of processing steps.
//!
//! Phases are shared across every service of a flow direction; modules
//! inject handlers into them by name. Mutation is append or
//! insert-at-index only — handlers are never removed from a live phase.

use serde::{Deserialize, Serialize};

use crate::handler::HandlerDesc;

/// Well-known system phase names.
pub mod phases {
    /// First in-flow phase; transport-level dispatch handlers live here.
    pub const TRANSPORT_IN: &str = "TransportIn";
    /// In-flow phase ahead of dispatch; security flows read service
    /// parameters resolved here.
    pub const PRE_DISPATCH: &str = "PreDispatch";
    /// The dispatch phase proper.
    pub const DISPATCH: &str = "Dispatch";
    /// Runs after dispatch has picked a service and operation.
    pub const POST_DISPATCH: &str = "PostDispatch";
    /// Default user phase of the out flow.
    pub const MESSAGE_OUT: &str = "MessageOut";
    /// Default user phase for in-flow message processing.
    pub const MESSAGE_PROCESSING: &str = "MessageProcessing";
}

/// A named, ordered sequence of handlers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Phase {
    name: String,
    handlers: Vec<HandlerDesc>,
}

impl Phase {
    /// Creates an empty phase.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            handlers: Vec::new(),
        }
    }

    /// The phase name modules target in their placement rules.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The handlers in execution order.
    #[must_use]
    pub fn handlers(&self) -> &[HandlerDesc] {
        &self.handlers
    }

    /// Appends a handler at the end of the phase.
    pub fn add_handler(&mut self, handler: HandlerDesc) {
        self.handlers.push(handler);
    }

    /// Inserts a handler at the given index; indexes beyond the current
    /// length clamp to an append.
    pub fn insert_handler_at(&mut self, index: usize, handler: HandlerDesc) {
        let index = index.min(self.handlers.len());
        self.handlers.insert(index, handler);
    }

    /// Position of the named handler within the phase, if present.
    #[must_use]
    pub fn index_of(&self, handler_name: &str) -> Option<usize> {
        self.handlers.iter().position(|h| h.name == handler_name)
    }

    /// `true` if a handler of that name is present.
    #[must_use]
    pub fn contains(&self, handler_name: &str) -> bool {
        self.index_of(handler_name).is_some()
    }

    /// Number of handlers in the phase.
    #[must_use]
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// `true` if the phase holds no handlers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_and_insert_preserve_order() {
        let mut phase = Phase::new(phases::TRANSPORT_IN);
        phase.add_handler(HandlerDesc::system("b"));
        phase.insert_handler_at(0, HandlerDesc::system("a"));
        phase.add_handler(HandlerDesc::system("c"));

        let names: Vec<&str> = phase.handlers().iter().map(|h| h.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
        assert_eq!(phase.index_of("b"), Some(1));
    }

    #[test]
    fn out_of_range_insert_clamps_to_append() {
        let mut phase = Phase::new(phases::DISPATCH);
        phase.insert_handler_at(7, HandlerDesc::system("only"));
        assert_eq!(phase.len(), 1);
        assert!(phase.contains("only"));
    }
}
