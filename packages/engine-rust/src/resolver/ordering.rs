//! Constraint ordering for one phase.
//!
//! Placement rules are resolved as an explicit precedence graph over the
//! phase's declared and contributed handlers, then a topological sort with
//! index-ordered tie-breaking. The tie-break makes the result a pure
//! function of the inputs: equal skeletons and equal contribution sequences
//! always produce byte-identical orderings.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashSet};

use axon_core::{HandlerDesc, Phase, Placement};

use crate::error::ChainError;

/// Orders a phase's declared handlers together with a set of contributions.
///
/// Declared handlers keep their relative order. `First`/`Last`/`At` anchor
/// against the declared handlers; `Before`/`After` reference any handler of
/// the phase by logical name. Ties are broken by sequence number (declared
/// handlers first, then contributions in the order given).
///
/// # Errors
///
/// [`ChainError::AmbiguousOrdering`] if a `Before`/`After` reference names a
/// handler that is not present, if two handlers of the phase share a logical
/// name, or if the constraints form a precedence cycle.
pub(crate) fn order_phase(
    phase: &Phase,
    contributions: &[(HandlerDesc, Placement)],
) -> Result<Vec<HandlerDesc>, ChainError> {
    let declared = phase.handlers();
    let total = declared.len() + contributions.len();

    // Items are indexed by sequence number: declared handlers first.
    let mut items: Vec<&HandlerDesc> = declared.iter().collect();
    items.extend(contributions.iter().map(|(handler, _)| handler));

    let mut names = HashSet::with_capacity(total);
    for item in &items {
        if !names.insert(item.name.as_str()) {
            return Err(ChainError::AmbiguousOrdering {
                phase: phase.name().to_string(),
                detail: format!("duplicate handler name {}", item.name),
            });
        }
    }

    let index_of = |name: &str| items.iter().position(|h| h.name == name);

    let mut edges: HashSet<(usize, usize)> = HashSet::new();
    for i in 1..declared.len() {
        edges.insert((i - 1, i));
    }

    // Contributions carrying `First` must also precede ones carrying `Last`,
    // even when the phase declares no handlers to anchor against.
    let mut firsts: Vec<usize> = Vec::new();
    let mut lasts: Vec<usize> = Vec::new();

    for (offset, (handler, placement)) in contributions.iter().enumerate() {
        let this = declared.len() + offset;
        match placement {
            Placement::First => {
                for d in 0..declared.len() {
                    edges.insert((this, d));
                }
                firsts.push(this);
            }
            Placement::Last => {
                for d in 0..declared.len() {
                    edges.insert((d, this));
                }
                lasts.push(this);
            }
            Placement::At(at) => {
                for d in 0..declared.len() {
                    if d < *at {
                        edges.insert((d, this));
                    } else {
                        edges.insert((this, d));
                    }
                }
            }
            Placement::Before(target) => {
                let Some(target) = index_of(target) else {
                    return Err(missing_reference(phase, handler, target));
                };
                edges.insert((this, target));
            }
            Placement::After(target) => {
                let Some(target) = index_of(target) else {
                    return Err(missing_reference(phase, handler, target));
                };
                edges.insert((target, this));
            }
        }
    }

    for &first in &firsts {
        for &last in &lasts {
            edges.insert((first, last));
        }
    }

    // Kahn's algorithm; the ready heap yields the smallest sequence number,
    // which pins a single deterministic order for unconstrained handlers.
    let mut indegree = vec![0usize; total];
    let mut successors = vec![Vec::new(); total];
    for &(from, to) in &edges {
        indegree[to] += 1;
        successors[from].push(to);
    }

    let mut ready: BinaryHeap<Reverse<usize>> = indegree
        .iter()
        .enumerate()
        .filter(|(_, deg)| **deg == 0)
        .map(|(i, _)| Reverse(i))
        .collect();

    let mut ordered = Vec::with_capacity(total);
    while let Some(Reverse(next)) = ready.pop() {
        ordered.push((*items[next]).clone());
        for &succ in &successors[next] {
            indegree[succ] -= 1;
            if indegree[succ] == 0 {
                ready.push(Reverse(succ));
            }
        }
    }

    if ordered.len() < total {
        let stuck = indegree
            .iter()
            .position(|deg| *deg > 0)
            .map_or_else(String::new, |i| items[i].name.clone());
        return Err(ChainError::AmbiguousOrdering {
            phase: phase.name().to_string(),
            detail: format!("precedence cycle involving {stuck}"),
        });
    }

    Ok(ordered)
}

fn missing_reference(phase: &Phase, handler: &HandlerDesc, target: &str) -> ChainError {
    ChainError::AmbiguousOrdering {
        phase: phase.name().to_string(),
        detail: format!(
            "handler {} references {target}, which is not present",
            handler.name
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn phase_with(names: &[&str]) -> Phase {
        let mut phase = Phase::new("P");
        for name in names {
            phase.add_handler(HandlerDesc::system(*name));
        }
        phase
    }

    fn names(ordered: &[HandlerDesc]) -> Vec<&str> {
        ordered.iter().map(|h| h.name.as_str()).collect()
    }

    #[test]
    fn declared_order_is_preserved_without_contributions() {
        let phase = phase_with(&["a", "b", "c"]);
        let ordered = order_phase(&phase, &[]).unwrap();
        assert_eq!(names(&ordered), vec!["a", "b", "c"]);
    }

    #[test]
    fn first_and_last_bracket_the_declared_handlers() {
        let phase = phase_with(&["a", "b"]);
        let contributions = vec![
            (HandlerDesc::system("tail"), Placement::Last),
            (HandlerDesc::system("head"), Placement::First),
        ];
        let ordered = order_phase(&phase, &contributions).unwrap();
        assert_eq!(names(&ordered), vec!["head", "a", "b", "tail"]);
    }

    #[test]
    fn first_precedes_last_in_an_empty_phase() {
        let phase = Phase::new("P");
        let contributions = vec![
            (HandlerDesc::system("tail"), Placement::Last),
            (HandlerDesc::system("head"), Placement::First),
        ];
        let ordered = order_phase(&phase, &contributions).unwrap();
        assert_eq!(names(&ordered), vec!["head", "tail"]);
    }

    #[test]
    fn absolute_index_anchors_between_declared_handlers() {
        let phase = phase_with(&["a", "b", "c"]);
        let contributions = vec![(HandlerDesc::system("mid"), Placement::At(1))];
        let ordered = order_phase(&phase, &contributions).unwrap();
        assert_eq!(names(&ordered), vec!["a", "mid", "b", "c"]);
    }

    #[test]
    fn before_and_after_constrain_relative_position() {
        let phase = phase_with(&["a", "b"]);
        let contributions = vec![
            (HandlerDesc::system("x"), Placement::Before("b".to_string())),
            (HandlerDesc::system("y"), Placement::After("b".to_string())),
        ];
        let ordered = order_phase(&phase, &contributions).unwrap();

        let pos = |n: &str| ordered.iter().position(|h| h.name == n).unwrap();
        assert!(pos("x") < pos("b"));
        assert!(pos("b") < pos("y"));
        assert_eq!(names(&ordered)[0], "a");
    }

    #[test]
    fn before_may_reference_another_contribution() {
        let phase = Phase::new("P");
        let contributions = vec![
            (HandlerDesc::system("late"), Placement::Last),
            (
                HandlerDesc::system("early"),
                Placement::Before("late".to_string()),
            ),
        ];
        let ordered = order_phase(&phase, &contributions).unwrap();
        assert_eq!(names(&ordered), vec!["early", "late"]);
    }

    #[test]
    fn missing_reference_is_rejected() {
        let phase = phase_with(&["a"]);
        let contributions = vec![(
            HandlerDesc::system("x"),
            Placement::Before("ghost".to_string()),
        )];
        let err = order_phase(&phase, &contributions).unwrap_err();
        assert!(matches!(
            err,
            ChainError::AmbiguousOrdering { ref detail, .. } if detail.contains("ghost")
        ));
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let phase = phase_with(&["a"]);
        let contributions = vec![(HandlerDesc::system("a"), Placement::Last)];
        let err = order_phase(&phase, &contributions).unwrap_err();
        assert!(matches!(
            err,
            ChainError::AmbiguousOrdering { ref detail, .. } if detail.contains("duplicate")
        ));
    }

    #[test]
    fn precedence_cycle_is_rejected() {
        let phase = Phase::new("P");
        let contributions = vec![
            (HandlerDesc::system("x"), Placement::Before("y".to_string())),
            (HandlerDesc::system("y"), Placement::Before("x".to_string())),
        ];
        let err = order_phase(&phase, &contributions).unwrap_err();
        assert!(matches!(
            err,
            ChainError::AmbiguousOrdering { ref detail, .. } if detail.contains("cycle")
        ));
    }
}
