//! Elimination of unit productions.

use crate::{
    grammar::{Grammar, Production, Symbol},
    types::{Map, Set},
};

/// Calculate, for each nonterminal, the nonterminals reachable from it
/// through one or more unit productions (excluding itself).
///
/// Unit productions whose target is not defined in the grammar are not
/// followed.
pub fn unit_closure(grammar: &Grammar) -> Map<Symbol, Set<Symbol>> {
    let mut closure = Map::default();
    for left in grammar.nonterminals() {
        let mut reached: Set<Symbol> = Set::default();
        let mut pending = unit_targets(grammar, left).collect::<Vec<_>>();
        pending.reverse();
        while let Some(target) = pending.pop() {
            if target == left || !reached.insert(target) {
                continue;
            }
            let mut next: Vec<_> = unit_targets(grammar, target).collect();
            next.reverse();
            pending.extend(next);
        }
        closure.insert(left, reached);
    }
    closure
}

fn unit_targets(grammar: &Grammar, left: Symbol) -> impl Iterator<Item = Symbol> + '_ {
    grammar
        .productions(left)
        .iter()
        .filter_map(Production::unit_target)
        .filter(|target| grammar.contains(*target))
}

/// Replace each unit production `A -> B` with the non-unit alternatives of
/// every nonterminal reachable from `A` through unit productions.
///
/// Cycles of unit productions are handled by the closure; a nonterminal whose
/// alternatives are all units within a cycle ends up with no alternatives.
pub fn remove_units(grammar: &Grammar) -> Grammar {
    let span = tracing::trace_span!("remove_units");
    let _entered = span.enter();

    let closure = unit_closure(grammar);
    let is_unit = |p: &Production| p.unit_target().map_or(false, |t| grammar.contains(t));

    let mut result = grammar.clone();
    for (left, reached) in &closure {
        let right = result.productions_mut(*left);
        let before = right.len();
        right.retain(|p| !is_unit(p));
        if right.len() == before && reached.is_empty() {
            continue;
        }
        tracing::debug!("{}: removed {} unit production(s)", left, before - right.len());

        for target in reached {
            for production in grammar.productions(*target) {
                if !is_unit(production) && !right.contains(production) {
                    tracing::trace!("{} -> {} (via {})", left, production, target);
                    right.push(production.clone());
                }
            }
        }
    }

    result
}
