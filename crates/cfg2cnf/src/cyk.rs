//! Membership test for grammars in Chomsky Normal Form.

use crate::{
    grammar::{Grammar, Symbol},
    types::{Map, Set},
};

/// Decide whether the start symbol of `grammar` derives `word`, using the
/// Cocke–Younger–Kasami algorithm.
///
/// Only productions of CNF shape are taken into account, plus an epsilon
/// production on the start symbol for the empty word.
pub fn recognize(grammar: &Grammar, word: &str) -> bool {
    let start = match grammar.start_symbol() {
        Some(start) => start,
        None => return false,
    };
    let word: Vec<Symbol> = match word.chars().map(Symbol::new).collect() {
        Ok(word) => word,
        Err(..) => return false,
    };
    if word.iter().any(|symbol| symbol.is_nonterminal()) {
        return false;
    }
    if word.is_empty() {
        return grammar.productions(start).iter().any(|p| p.is_epsilon());
    }

    let mut lexical: Map<Symbol, Vec<Symbol>> = Map::default();
    let mut binary: Vec<(Symbol, Symbol, Symbol)> = vec![];
    for (left, right) in grammar.rules() {
        for production in right {
            match *production.symbols() {
                [t] if t.is_terminal() => lexical.entry(t).or_default().push(left),
                [b, c] if b.is_nonterminal() && c.is_nonterminal() => binary.push((left, b, c)),
                _ => (),
            }
        }
    }

    // chart[len - 1][i]: nonterminals deriving word[i..i + len]
    let n = word.len();
    let mut chart: Vec<Vec<Set<Symbol>>> = Vec::with_capacity(n);
    chart.push(
        word.iter()
            .map(|t| lexical.get(t).into_iter().flatten().copied().collect())
            .collect(),
    );
    for len in 2..=n {
        let mut row = Vec::with_capacity(n - len + 1);
        for i in 0..=n - len {
            let mut cell = Set::default();
            for split in 1..len {
                let left = &chart[split - 1][i];
                let right = &chart[len - split - 1][i + split];
                if left.is_empty() || right.is_empty() {
                    continue;
                }
                for &(a, b, c) in &binary {
                    if left.contains(&b) && right.contains(&c) {
                        cell.insert(a);
                    }
                }
            }
            row.push(cell);
        }
        chart.push(row);
    }

    chart[n - 1][0].contains(&start)
}
