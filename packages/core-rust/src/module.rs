//! Module (plugin) descriptors.
//!
//! A module declares the handlers it wants inserted into named phases. A
//! `ModuleDesc` cannot exist without a qualified name — an unnamed module
//! would be permanently unreachable by lookup, so the constructor makes the
//! case unrepresentable.

use serde::{Deserialize, Serialize};

use crate::flow::Flow;
use crate::handler::HandlerRule;
use crate::param::ParamStore;
use crate::qname::QualifiedName;

/// A deployed module and its handler contributions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleDesc {
    qname: QualifiedName,
    rules: Vec<HandlerRule>,
    params: ParamStore,
}

impl ModuleDesc {
    /// Creates a module descriptor with no handler rules.
    #[must_use]
    pub fn new(qname: QualifiedName) -> Self {
        Self {
            qname,
            rules: Vec::new(),
            params: ParamStore::new(),
        }
    }

    /// The module's qualified name (`name` or `name-version`).
    #[must_use]
    pub fn qname(&self) -> &QualifiedName {
        &self.qname
    }

    /// Declares a handler placement.
    pub fn add_rule(&mut self, rule: HandlerRule) {
        self.rules.push(rule);
    }

    /// Builder-style [`add_rule`](Self::add_rule).
    #[must_use]
    pub fn with_rule(mut self, rule: HandlerRule) -> Self {
        self.add_rule(rule);
        self
    }

    /// All handler rules, in declaration order.
    #[must_use]
    pub fn rules(&self) -> &[HandlerRule] {
        &self.rules
    }

    /// The rules targeting one flow, in declaration order.
    pub fn rules_for(&self, flow: Flow) -> impl Iterator<Item = &HandlerRule> {
        self.rules.iter().filter(move |r| r.flow == flow)
    }

    /// The module's parameters.
    #[must_use]
    pub fn params(&self) -> &ParamStore {
        &self.params
    }

    /// Mutable access to the module's parameters.
    pub fn params_mut(&mut self) -> &mut ParamStore {
        &mut self.params
    }
}
