//! Phase resolution: pure chain construction.
//!
//! The resolver never mutates live chains. Given the declared phase skeleton
//! for each flow and the modules whose handler rules apply, it produces a
//! fresh artifact — phase-structured global flow lists, or a flattened
//! per-service [`FlowChains`] — that the registry swaps in atomically.
//! Re-running a resolution over equal inputs yields byte-identical output,
//! which is what makes engage-then-disengage restore the exact prior chains.

mod ordering;

use std::collections::HashMap;
use std::sync::Arc;

use axon_core::{Flow, FlowChains, FlowPhases, HandlerDesc, ModuleDesc, Phase, Placement};

use crate::error::ChainError;
use ordering::order_phase;

/// Resolves the global flow phase lists with the engaged modules' handlers
/// injected.
///
/// The skeleton's own handlers keep their relative order; engaged modules
/// contribute in engagement order.
///
/// # Errors
///
/// [`ChainError::PhaseNotFound`] if a rule targets an undeclared phase,
/// [`ChainError::AmbiguousOrdering`] for unsatisfiable placement rules.
pub fn resolve_global_flows(
    skeleton: &FlowPhases,
    engaged: &[Arc<ModuleDesc>],
) -> Result<FlowPhases, ChainError> {
    let mut resolved = FlowPhases::new();
    for flow in Flow::ALL {
        let contributions = collect_contributions(skeleton, flow, engaged)?;
        for phase in skeleton.flow(flow) {
            let handlers = order_phase(
                phase,
                contributions.get(phase.name()).map_or(&[][..], Vec::as_slice),
            )?;
            let mut rebuilt = Phase::new(phase.name());
            for handler in handlers {
                rebuilt.add_handler(handler);
            }
            resolved.push_phase(flow, rebuilt);
        }
    }
    Ok(resolved)
}

/// Resolves the four execution chains of one service.
///
/// Contributions come from the globally engaged modules (in engagement
/// order) followed by the service's own declared dependencies (in
/// declaration order); a dependency that is also engaged contributes once.
/// The result is flattened across the flow's phases in phase order.
///
/// # Errors
///
/// [`ChainError::PhaseNotFound`] if a rule targets an undeclared phase,
/// [`ChainError::AmbiguousOrdering`] for unsatisfiable placement rules.
pub fn resolve_service_chains(
    skeleton: &FlowPhases,
    engaged: &[Arc<ModuleDesc>],
    service_modules: &[Arc<ModuleDesc>],
) -> Result<FlowChains, ChainError> {
    let mut modules: Vec<Arc<ModuleDesc>> = engaged.to_vec();
    for module in service_modules {
        if !modules.iter().any(|m| m.qname() == module.qname()) {
            modules.push(module.clone());
        }
    }

    let mut chains = FlowChains::new();
    for flow in Flow::ALL {
        let contributions = collect_contributions(skeleton, flow, &modules)?;
        let mut chain: Vec<HandlerDesc> = Vec::new();
        for phase in skeleton.flow(flow) {
            let handlers = order_phase(
                phase,
                contributions.get(phase.name()).map_or(&[][..], Vec::as_slice),
            )?;
            chain.extend(handlers);
        }
        chains.set_chain(flow, chain);
    }
    Ok(chains)
}

/// Groups the modules' rules for one flow by target phase, validating that
/// every targeted phase is declared.
fn collect_contributions(
    skeleton: &FlowPhases,
    flow: Flow,
    modules: &[Arc<ModuleDesc>],
) -> Result<HashMap<String, Vec<(HandlerDesc, Placement)>>, ChainError> {
    let mut contributions: HashMap<String, Vec<(HandlerDesc, Placement)>> = HashMap::new();
    for module in modules {
        for rule in module.rules_for(flow) {
            if !skeleton.has_phase(flow, &rule.phase) {
                return Err(ChainError::PhaseNotFound {
                    phase: rule.phase.clone(),
                    flow,
                });
            }
            contributions
                .entry(rule.phase.clone())
                .or_default()
                .push((rule.handler.clone(), rule.placement.clone()));
        }
    }
    Ok(contributions)
}

#[cfg(test)]
mod tests {
    use axon_core::{phases, HandlerRule, QualifiedName};
    use proptest::prelude::*;

    use super::*;

    fn out_skeleton() -> FlowPhases {
        let mut skeleton = FlowPhases::new();
        skeleton.push_phase(Flow::Out, Phase::new(phases::MESSAGE_OUT));
        skeleton.push_phase(Flow::Out, Phase::new("Security"));
        skeleton
    }

    fn module(name: &str, rules: Vec<HandlerRule>) -> Arc<ModuleDesc> {
        let mut desc = ModuleDesc::new(QualifiedName::new(name));
        for rule in rules {
            desc.add_rule(rule);
        }
        Arc::new(desc)
    }

    fn rule(module: &str, handler: &str, phase: &str, placement: Placement) -> HandlerRule {
        HandlerRule::new(
            HandlerDesc::contributed(handler, QualifiedName::new(module)),
            Flow::Out,
            phase,
            placement,
        )
    }

    fn chain_names(chains: &FlowChains, flow: Flow) -> Vec<&str> {
        chains.chain(flow).iter().map(|h| h.name.as_str()).collect()
    }

    #[test]
    fn chains_flatten_phases_in_declaration_order() {
        let skeleton = out_skeleton();
        let logging = module(
            "logging",
            vec![
                rule("logging", "audit", phases::MESSAGE_OUT, Placement::Last),
                rule("logging", "sign", "Security", Placement::Last),
            ],
        );

        let chains = resolve_service_chains(&skeleton, &[logging], &[]).unwrap();
        assert_eq!(chain_names(&chains, Flow::Out), vec!["audit", "sign"]);
    }

    #[test]
    fn service_dependencies_contribute_after_engaged_modules() {
        let skeleton = out_skeleton();
        let engaged = module(
            "logging",
            vec![rule("logging", "audit", phases::MESSAGE_OUT, Placement::Last)],
        );
        let dep = module(
            "compress",
            vec![rule("compress", "gzip", phases::MESSAGE_OUT, Placement::Last)],
        );

        let chains = resolve_service_chains(&skeleton, &[engaged], &[dep]).unwrap();
        assert_eq!(chain_names(&chains, Flow::Out), vec!["audit", "gzip"]);
    }

    #[test]
    fn engaged_dependency_contributes_once() {
        let skeleton = out_skeleton();
        let logging = module(
            "logging",
            vec![rule("logging", "audit", phases::MESSAGE_OUT, Placement::Last)],
        );

        let chains = resolve_service_chains(
            &skeleton,
            std::slice::from_ref(&logging),
            &[logging.clone()],
        )
        .unwrap();
        assert_eq!(chain_names(&chains, Flow::Out), vec!["audit"]);
    }

    #[test]
    fn undeclared_target_phase_is_rejected() {
        let skeleton = out_skeleton();
        let bad = module(
            "rm",
            vec![rule("rm", "retry", "Reliability", Placement::Last)],
        );

        let err = resolve_service_chains(&skeleton, &[bad], &[]).unwrap_err();
        assert_eq!(
            err,
            ChainError::PhaseNotFound {
                phase: "Reliability".to_string(),
                flow: Flow::Out,
            }
        );
    }

    #[test]
    fn global_flows_keep_phase_structure() {
        let mut skeleton = FlowPhases::new();
        let mut transport_in = Phase::new(phases::TRANSPORT_IN);
        transport_in.add_handler(HandlerDesc::system("request-uri-dispatcher"));
        skeleton.push_phase(Flow::In, transport_in);
        skeleton.push_phase(Flow::In, Phase::new(phases::PRE_DISPATCH));

        let security = module(
            "security",
            vec![HandlerRule::new(
                HandlerDesc::contributed("verify", QualifiedName::new("security")),
                Flow::In,
                phases::PRE_DISPATCH,
                Placement::First,
            )],
        );

        let flows = resolve_global_flows(&skeleton, &[security]).unwrap();
        let in_phases = flows.flow(Flow::In);
        assert_eq!(in_phases.len(), 2);
        assert_eq!(in_phases[0].name(), phases::TRANSPORT_IN);
        assert!(in_phases[0].contains("request-uri-dispatcher"));
        assert!(in_phases[1].contains("verify"));
    }

    proptest! {
        /// Resolution is a pure function: resolving the same inputs twice
        /// yields identical chains, and every satisfied `Before` constraint
        /// holds in the output.
        #[test]
        fn resolution_is_deterministic_and_honors_constraints(
            specs in proptest::collection::vec((0u8..5, 0usize..8), 1..8),
        ) {
            let skeleton = out_skeleton();
            let mut desc = ModuleDesc::new(QualifiedName::new("gen"));
            let count = specs.len();
            for (i, (kind, target)) in specs.iter().enumerate() {
                let name = format!("h{i}");
                let target_name = format!("h{}", target % count);
                let placement = match kind {
                    0 => Placement::First,
                    1 => Placement::Last,
                    2 => Placement::At(*target % 4),
                    3 => Placement::Before(target_name),
                    _ => Placement::After(target_name),
                };
                desc.add_rule(rule("gen", &name, phases::MESSAGE_OUT, placement));
            }
            let desc = Arc::new(desc);

            let first = resolve_service_chains(&skeleton, std::slice::from_ref(&desc), &[]);
            let second = resolve_service_chains(&skeleton, std::slice::from_ref(&desc), &[]);
            prop_assert_eq!(&first, &second);

            if let Ok(chains) = first {
                let chain = chains.chain(Flow::Out);
                let pos = |n: &str| chain.iter().position(|h| h.name == n);
                for rule in desc.rules() {
                    match &rule.placement {
                        Placement::Before(t) => {
                            if let (Some(a), Some(b)) = (pos(&rule.handler.name), pos(t)) {
                                prop_assert!(a < b);
                            }
                        }
                        Placement::After(t) => {
                            if let (Some(a), Some(b)) = (pos(&rule.handler.name), pos(t)) {
                                prop_assert!(a > b);
                            }
                        }
                        _ => {}
                    }
                }
            }
        }
    }
}
