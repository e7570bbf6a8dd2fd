//! Splitting of long productions into chains of binary productions.

use crate::{
    convert::ConvertError,
    grammar::{Grammar, Production},
    symbol,
};

/// Rewrite every production longer than two symbols by repeatedly replacing
/// its last two symbols with a fresh nonterminal deriving them.
///
/// `A -> BCDE` becomes `A -> BY`, `Y -> CX`, `X -> DE`.
pub fn binarize(grammar: &Grammar) -> Result<Grammar, ConvertError> {
    let span = tracing::trace_span!("binarize");
    let _entered = span.enter();

    let mut result = grammar.clone();

    // nonterminals introduced below are appended and visited by the same walk
    let mut index = 0;
    while let Some((left, count)) = result
        .rules
        .get_index(index)
        .map(|(left, right)| (*left, right.len()))
    {
        for i in 0..count {
            while result.rules[index][i].len() > 2 {
                let production = &result.rules[index][i];
                let tail = &production.symbols()[production.len() - 2..];
                let tail = Production::new(tail.to_vec());
                let fresh = symbol::introduce(&mut result, [tail])?;

                let symbols = result.rules[index][i].symbols_mut();
                symbols.truncate(symbols.len() - 2);
                symbols.push(fresh);
                tracing::trace!(
                    "{} -> {} (split off {})",
                    left,
                    result.rules[index][i],
                    fresh
                );
            }
        }
        index += 1;
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::Symbol;

    fn sym(ch: char) -> Symbol {
        Symbol::new(ch).unwrap()
    }

    fn prods(grammar: &Grammar, left: char) -> Vec<String> {
        grammar
            .productions(sym(left))
            .iter()
            .map(|p| p.to_string())
            .collect()
    }

    #[test]
    fn splits_off_the_last_pair() {
        let grammar = Grammar::define(|g| {
            g.rule('S', ["ABC"])?;
            g.rule('A', ["a"])?;
            g.rule('B', ["b"])?;
            g.rule('C', ["c"])?;
            Ok(())
        })
        .unwrap();
        let result = binarize(&grammar).unwrap();
        assert_eq!(prods(&result, 'S'), ["AD"]);
        assert_eq!(prods(&result, 'D'), ["BC"]);
        assert_eq!(result.len(), 5);
    }

    #[test]
    fn right_branching_chain() {
        let grammar = Grammar::define(|g| {
            g.rule('S', ["SSSSS", "SS", "s"])?;
            Ok(())
        })
        .unwrap();
        let result = binarize(&grammar).unwrap();
        // n - 2 new nonterminals for a production of length n
        assert_eq!(result.len(), 4);
        assert_eq!(prods(&result, 'S'), ["SC", "SS", "s"]);
        assert_eq!(prods(&result, 'C'), ["SB"]);
        assert_eq!(prods(&result, 'B'), ["SA"]);
        assert_eq!(prods(&result, 'A'), ["SS"]);
        assert!(result.rules().all(|(_, right)| right.iter().all(|p| p.len() <= 2)));
    }

    #[test]
    fn single_walk_binarizes_everything() {
        let grammar = Grammar::define(|g| {
            g.rule('S', ["SSSS", "SSS"])?;
            g.rule('T', ["STSTS"])?;
            Ok(())
        })
        .unwrap();
        let result = binarize(&grammar).unwrap();
        assert!(result.rules().all(|(_, right)| right.iter().all(|p| p.len() <= 2)));
        // 2 + 1 + 3 fresh nonterminals
        assert_eq!(result.len(), 8);
        assert_eq!(binarize(&result).unwrap(), result);
    }

    #[test]
    fn short_productions_are_untouched() {
        let grammar = Grammar::define(|g| {
            g.rule('S', ["AB", "a"])?;
            g.rule('A', ["a"])?;
            g.rule('B', ["b"])?;
            Ok(())
        })
        .unwrap();
        assert_eq!(binarize(&grammar).unwrap(), grammar);
    }

    #[test]
    fn exhaustion_is_reported() {
        // 23 + 2 fresh nonterminals are needed, only 24 letters are free
        let long = "S".repeat(25);
        let grammar = Grammar::define(|g| {
            g.rule('S', [long.as_str()])?;
            g.rule('A', ["SSSS"])?;
            Ok(())
        })
        .unwrap();
        assert_eq!(binarize(&grammar), Err(ConvertError::SymbolExhaustion));
    }
}
