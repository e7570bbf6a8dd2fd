//! Bounded enumeration of the words a grammar derives.
//!
//! Works on arbitrary grammars (epsilon and unit productions included), so
//! it can be compared against the result of a conversion.

use cfg2cnf::grammar::{Grammar, Symbol};
use std::collections::{BTreeMap, BTreeSet};

/// Collect every word of length `<= max_len` derivable from the start
/// symbol.
pub fn words(grammar: &Grammar, max_len: usize) -> BTreeSet<String> {
    let mut derived: BTreeMap<Symbol, BTreeSet<String>> = BTreeMap::new();

    let mut changed = true;
    while changed {
        changed = false;
        for (left, right) in grammar.rules() {
            for production in right {
                let mut partial = BTreeSet::from([String::new()]);
                for &symbol in production.symbols() {
                    let mut next = BTreeSet::new();
                    for prefix in &partial {
                        if symbol.is_terminal() {
                            if prefix.len() < max_len {
                                next.insert(format!("{}{}", prefix, symbol));
                            }
                            continue;
                        }
                        for suffix in derived.get(&symbol).into_iter().flatten() {
                            if prefix.len() + suffix.len() <= max_len {
                                next.insert(format!("{}{}", prefix, suffix));
                            }
                        }
                    }
                    partial = next;
                }
                let entry = derived.entry(left).or_default();
                for word in partial {
                    changed |= entry.insert(word);
                }
            }
        }
    }

    grammar
        .start_symbol()
        .and_then(|start| derived.remove(&start))
        .unwrap_or_default()
}

/// The terminals occurring anywhere in `grammar`.
pub fn alphabet(grammar: &Grammar) -> BTreeSet<char> {
    grammar
        .rules()
        .flat_map(|(_, right)| right)
        .flat_map(|production| production.symbols())
        .filter(|symbol| symbol.is_terminal())
        .map(|symbol| symbol.as_char())
        .collect()
}

/// Every word over `alphabet` of length `1..=max_len`.
pub fn all_words(alphabet: &BTreeSet<char>, max_len: usize) -> Vec<String> {
    let mut words = vec![];
    let mut layer = vec![String::new()];
    for _ in 0..max_len {
        layer = layer
            .iter()
            .flat_map(|prefix| alphabet.iter().map(move |ch| format!("{}{}", prefix, ch)))
            .collect();
        words.extend(layer.iter().cloned());
    }
    words
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounded_words() {
        let grammar = Grammar::define(|g| {
            g.rule('S', ["aSb", "$"])?;
            Ok(())
        })
        .unwrap();
        let expected: BTreeSet<String> = ["", "ab", "aabb"].iter().map(|s| s.to_string()).collect();
        assert_eq!(words(&grammar, 5), expected);
    }

    #[test]
    fn enumerate_all_words() {
        let alphabet = BTreeSet::from(['a', 'b']);
        assert_eq!(all_words(&alphabet, 2), ["a", "b", "aa", "ab", "ba", "bb"]);
    }
}
