//! Message flow directions and their resolved artifacts.
//!
//! Every message moves through one of four flows. A [`FlowPhases`] is the
//! phase-structured view (the registry's global lists and the declared
//! skeletons); a [`FlowChains`] is the flattened, per-service handler
//! sequence the dispatch path actually walks.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::handler::HandlerDesc;
use crate::phase::Phase;

/// One of the four message processing directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Flow {
    /// Inbound, up to and including dispatch.
    In,
    /// Outbound.
    Out,
    /// Inbound fault.
    InFault,
    /// Outbound fault.
    OutFault,
}

impl Flow {
    /// All flows, in canonical order.
    pub const ALL: [Flow; 4] = [Flow::In, Flow::Out, Flow::InFault, Flow::OutFault];

    /// Stable index for per-flow slot arrays.
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Flow::In => 0,
            Flow::Out => 1,
            Flow::InFault => 2,
            Flow::OutFault => 3,
        }
    }
}

impl fmt::Display for Flow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Flow::In => "in",
            Flow::Out => "out",
            Flow::InFault => "in-fault",
            Flow::OutFault => "out-fault",
        })
    }
}

/// An ordered list of phases per flow.
///
/// Holds both the declared skeletons (phases as deployed, before any module
/// engagement) and the registry's live global flow lists.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlowPhases {
    flows: [Vec<Phase>; 4],
}

impl FlowPhases {
    /// Creates an empty set of flow phase lists.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The phases of one flow, in execution order.
    #[must_use]
    pub fn flow(&self, flow: Flow) -> &[Phase] {
        &self.flows[flow.index()]
    }

    /// Mutable access to one flow's phase list.
    pub fn flow_mut(&mut self, flow: Flow) -> &mut Vec<Phase> {
        &mut self.flows[flow.index()]
    }

    /// Appends a phase to a flow.
    pub fn push_phase(&mut self, flow: Flow, phase: Phase) {
        self.flows[flow.index()].push(phase);
    }

    /// Looks up a phase of a flow by name.
    #[must_use]
    pub fn phase(&self, flow: Flow, name: &str) -> Option<&Phase> {
        self.flow(flow).iter().find(|p| p.name() == name)
    }

    /// `true` if the named phase is declared for the flow.
    #[must_use]
    pub fn has_phase(&self, flow: Flow, name: &str) -> bool {
        self.phase(flow, name).is_some()
    }
}

/// The four resolved handler chains of one service.
///
/// `PartialEq` compares handler sequences element-for-element, which is what
/// the engage/disengage round-trip guarantees are stated in terms of.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlowChains {
    chains: [Vec<HandlerDesc>; 4],
}

impl FlowChains {
    /// Creates four empty chains.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The resolved chain for a flow.
    #[must_use]
    pub fn chain(&self, flow: Flow) -> &[HandlerDesc] {
        &self.chains[flow.index()]
    }

    /// Replaces the chain for a flow.
    pub fn set_chain(&mut self, flow: Flow, chain: Vec<HandlerDesc>) {
        self.chains[flow.index()] = chain;
    }

    /// `true` if every flow's chain is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chains.iter().all(Vec::is_empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::phase::phases;

    #[test]
    fn flow_indexes_are_stable_and_distinct() {
        let mut seen = [false; 4];
        for flow in Flow::ALL {
            assert!(!seen[flow.index()]);
            seen[flow.index()] = true;
        }
    }

    #[test]
    fn phases_are_looked_up_per_flow() {
        let mut phases_by_flow = FlowPhases::new();
        phases_by_flow.push_phase(Flow::In, Phase::new(phases::TRANSPORT_IN));
        phases_by_flow.push_phase(Flow::Out, Phase::new(phases::MESSAGE_OUT));

        assert!(phases_by_flow.has_phase(Flow::In, phases::TRANSPORT_IN));
        assert!(!phases_by_flow.has_phase(Flow::Out, phases::TRANSPORT_IN));
        assert_eq!(phases_by_flow.flow(Flow::InFault).len(), 0);
    }

    #[test]
    fn chain_equality_is_sequence_equality() {
        let mut a = FlowChains::new();
        let mut b = FlowChains::new();
        a.set_chain(Flow::Out, vec![HandlerDesc::system("x")]);
        b.set_chain(Flow::Out, vec![HandlerDesc::system("x")]);
        assert_eq!(a, b);

        b.set_chain(Flow::Out, vec![HandlerDesc::system("y")]);
        assert_ne!(a, b);
    }
}
