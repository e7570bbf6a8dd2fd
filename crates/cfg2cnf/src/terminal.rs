//! Isolation of terminals appearing in productions longer than one symbol.

use crate::{
    convert::ConvertError,
    grammar::{Grammar, Production, Symbol},
    symbol,
    types::Map,
};

/// The nonterminals introduced for terminals, keyed by the terminal.
///
/// One mapping lives for one conversion; it is never shared between
/// grammars.
pub type TerminalMapping = Map<Symbol, Symbol>;

/// Replace every terminal inside a production of length > 1 with a
/// nonterminal that derives exactly that terminal.
///
/// Terminals already present in `mapping` reuse their nonterminal; new ones
/// get a fresh symbol `N -> t` which is recorded in `mapping`.
///
/// A terminal that only occurs as a single-symbol production (`B -> b`) is
/// not isolated and gets no nonterminal, so `S -> aBc`, `B -> b` needs two
/// fresh symbols, not three.
pub fn isolate_terminals(
    grammar: &Grammar,
    mapping: &mut TerminalMapping,
) -> Result<Grammar, ConvertError> {
    let span = tracing::trace_span!("isolate_terminals");
    let _entered = span.enter();

    let mut result = grammar.clone();

    let terminals: Vec<Symbol> = grammar
        .rules()
        .flat_map(|(_, right)| right)
        .filter(|production| production.len() > 1)
        .flat_map(|production| production.symbols())
        .copied()
        .filter(|symbol| symbol.is_terminal())
        .collect();
    for terminal in terminals {
        if mapping.contains_key(&terminal) {
            continue;
        }
        let isolated = symbol::introduce(&mut result, [Production::new([terminal])])?;
        tracing::debug!("{} isolates terminal {}", isolated, terminal);
        mapping.insert(terminal, isolated);
    }

    for right in result.rules.values_mut() {
        for production in right.iter_mut() {
            if production.len() <= 1 || !production.has_terminal() {
                continue;
            }
            let before = production.to_string();
            for symbol in production.symbols_mut() {
                if let Some(isolated) = mapping.get(&*symbol) {
                    *symbol = *isolated;
                }
            }
            tracing::trace!("{} => {}", before, production);
        }
    }

    Ok(result)
}
