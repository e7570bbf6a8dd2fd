//! Elimination of epsilon productions.

use crate::{
    convert::ConvertError,
    grammar::{Grammar, Production, Symbol},
    symbol,
    types::Set,
};
use itertools::Itertools as _;

/// Calculate the set of nullable nonterminals in this grammar.
pub fn nullable_set(grammar: &Grammar) -> Set<Symbol> {
    // nonterminals with an explicit epsilon production
    let mut nullable: Set<Symbol> = grammar
        .rules()
        .filter_map(|(left, right)| right.iter().any(Production::is_epsilon).then_some(left))
        .collect();
    for symbol in &nullable {
        tracing::debug!("{} is nullable (derives epsilon directly)", symbol);
    }

    let mut changed = true;
    while changed {
        changed = false;
        for (left, right) in grammar.rules() {
            if nullable.contains(&left) {
                continue;
            }
            let derives_nullable = right.iter().any(|production| {
                !production.is_epsilon()
                    && production.symbols().iter().all(|s| nullable.contains(s))
            });
            if derives_nullable {
                tracing::debug!("{} is nullable (derives only nullable symbols)", left);
                nullable.insert(left);
                changed = true;
            }
        }
    }

    nullable
}

/// Remove every epsilon production, adding for each production the variants
/// with some of its nullable symbols deleted.
///
/// A nullable start symbol loses the empty string; see `add_empty_start`.
pub fn remove_epsilon(grammar: &Grammar, nullable: &Set<Symbol>) -> Grammar {
    let span = tracing::trace_span!("remove_epsilon");
    let _entered = span.enter();

    let mut result = grammar.clone();
    for right in result.rules.values_mut() {
        right.retain(|production| !production.is_epsilon());
    }

    for right in result.rules.values_mut() {
        let mut added = vec![];
        for production in right.iter() {
            for variant in nullable_variants(production, nullable) {
                if !right.contains(&variant) && !added.contains(&variant) {
                    added.push(variant);
                }
            }
        }
        right.extend(added);
    }

    result
}

/// Enumerate the productions obtained by deleting every non-empty subset of
/// the nullable positions, skipping the ones that become empty.
fn nullable_variants<'p>(
    production: &'p Production,
    nullable: &'p Set<Symbol>,
) -> impl Iterator<Item = Production> + 'p {
    let positions: Vec<usize> = production
        .symbols()
        .iter()
        .positions(|symbol| nullable.contains(symbol))
        .collect();

    (1..=positions.len())
        .flat_map(move |size| positions.clone().into_iter().combinations(size))
        .filter_map(move |removed| {
            let mut symbols = production.symbols().to_vec();
            for &pos in removed.iter().rev() {
                symbols.remove(pos);
            }
            (!symbols.is_empty()).then(|| Production::new(symbols))
        })
}

/// Give the grammar a fresh start symbol `S0 -> S | $`, so that the empty
/// string stays in the language once epsilon productions have been removed.
pub fn add_empty_start(grammar: &mut Grammar) -> Result<Symbol, ConvertError> {
    let start = grammar.start_symbol().ok_or(ConvertError::EmptyGrammar)?;
    let new_start = symbol::introduce(
        grammar,
        [Production::new([start]), Production::epsilon()],
    )?;
    grammar.set_start_symbol(new_start);
    tracing::debug!("{} replaces {} as the start symbol", new_start, start);
    Ok(new_start)
}
