//! Allocation of fresh nonterminal symbols.

use crate::{
    convert::ConvertError,
    grammar::{Grammar, Production, Symbol},
};

/// The number of nonterminals a grammar can ever hold.
pub const POOL_SIZE: usize = 26;

/// Iterate over the pool of nonterminals in allocation order.
pub fn pool() -> impl Iterator<Item = Symbol> {
    ('A'..='Z').map(Symbol::from_pool)
}

/// Return the first nonterminal of the pool that is not yet a key of
/// `grammar`.
///
/// The returned symbol is not reserved; the caller must insert it before
/// asking for another one.
pub fn allocate(grammar: &Grammar) -> Result<Symbol, ConvertError> {
    pool()
        .find(|symbol| !grammar.contains(*symbol))
        .ok_or(ConvertError::SymbolExhaustion)
}

/// Allocate a fresh nonterminal and define it with `productions` right away.
pub fn introduce<I>(grammar: &mut Grammar, productions: I) -> Result<Symbol, ConvertError>
where
    I: IntoIterator<Item = Production>,
{
    let symbol = allocate(grammar)?;
    grammar.declare(symbol);
    for production in productions {
        grammar.add_production(symbol, production);
    }
    tracing::trace!("introduced {}", grammar.display_rule(symbol));
    Ok(symbol)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skips_symbols_in_use() {
        let grammar = Grammar::define(|g| {
            g.rule('A', ["a"])?;
            g.rule('B', ["b"])?;
            g.rule('D', ["d"])?;
            Ok(())
        })
        .unwrap();
        assert_eq!(allocate(&grammar).unwrap().as_char(), 'C');
    }

    #[test]
    fn allocation_is_not_a_reservation() {
        let mut grammar = Grammar::new();
        let first = allocate(&grammar).unwrap();
        assert_eq!(allocate(&grammar).unwrap(), first);

        let introduced = introduce(&mut grammar, ["a".parse().unwrap()]).unwrap();
        assert_eq!(introduced, first);
        assert_eq!(allocate(&grammar).unwrap().as_char(), 'B');
    }

    #[test]
    fn exhaustion() {
        let mut grammar = Grammar::new();
        for _ in 0..POOL_SIZE {
            introduce(&mut grammar, []).unwrap();
        }
        assert_eq!(grammar.len(), POOL_SIZE);
        assert_eq!(allocate(&grammar), Err(ConvertError::SymbolExhaustion));
    }
}
