//! Grammar types.

use crate::types::Map;
use std::{fmt, str::FromStr};

/// The character that denotes the empty production when it is the sole
/// content of an alternative.
pub const EPSILON: char = '$';

/// A single-character grammar symbol.
///
/// Uppercase ASCII letters are nonterminals; lowercase ASCII letters and
/// ASCII digits are terminals.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct Symbol {
    raw: char,
}

impl Symbol {
    pub fn new(raw: char) -> Result<Self, GrammarDefError> {
        if raw.is_ascii_alphanumeric() {
            Ok(Self { raw })
        } else {
            Err(GrammarDefError::InvalidSymbol(raw))
        }
    }

    /// Create a nonterminal symbol, rejecting anything but an uppercase letter.
    pub fn nonterminal(raw: char) -> Result<Self, GrammarDefError> {
        let symbol = Self::new(raw)?;
        if !symbol.is_nonterminal() {
            return Err(GrammarDefError::ExpectedNonterminal(raw));
        }
        Ok(symbol)
    }

    #[inline]
    pub(crate) const fn from_pool(raw: char) -> Self {
        debug_assert!(raw.is_ascii_uppercase());
        Self { raw }
    }

    #[inline]
    pub const fn as_char(self) -> char {
        self.raw
    }

    #[inline]
    pub const fn is_nonterminal(self) -> bool {
        self.raw.is_ascii_uppercase()
    }

    #[inline]
    pub const fn is_terminal(self) -> bool {
        !self.is_nonterminal()
    }
}

impl TryFrom<char> for Symbol {
    type Error = GrammarDefError;

    fn try_from(raw: char) -> Result<Self, Self::Error> {
        Self::new(raw)
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.raw, f)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.raw, f)
    }
}

/// The right-hand side of a production rule.
///
/// An empty sequence of symbols is the epsilon production.
#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub struct Production {
    symbols: Vec<Symbol>,
}

impl Production {
    pub const fn epsilon() -> Self {
        Self {
            symbols: Vec::new(),
        }
    }

    pub fn new<I>(symbols: I) -> Self
    where
        I: IntoIterator<Item = Symbol>,
    {
        Self {
            symbols: symbols.into_iter().collect(),
        }
    }

    pub fn is_epsilon(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols[..]
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Return the target nonterminal if this is a unit production.
    pub fn unit_target(&self) -> Option<Symbol> {
        match self.symbols[..] {
            [symbol] if symbol.is_nonterminal() => Some(symbol),
            _ => None,
        }
    }

    pub fn has_terminal(&self) -> bool {
        self.symbols.iter().any(|symbol| symbol.is_terminal())
    }

    pub(crate) fn symbols_mut(&mut self) -> &mut Vec<Symbol> {
        &mut self.symbols
    }
}

impl FromStr for Production {
    type Err = GrammarDefError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "$" {
            return Ok(Self::epsilon());
        }
        if s.is_empty() {
            return Err(GrammarDefError::EmptyProduction);
        }
        let mut symbols = Vec::with_capacity(s.len());
        for ch in s.chars() {
            if ch == EPSILON {
                return Err(GrammarDefError::MisplacedEpsilon(s.to_owned()));
            }
            symbols.push(Symbol::new(ch)?);
        }
        Ok(Self { symbols })
    }
}

impl fmt::Debug for Production {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.to_string())
    }
}

impl fmt::Display for Production {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_epsilon() {
            return write!(f, "{}", EPSILON);
        }
        for symbol in &self.symbols {
            write!(f, "{}", symbol)?;
        }
        Ok(())
    }
}

/// A context-free grammar, as a mapping from each nonterminal to its
/// alternatives.
///
/// Nonterminals keep the order in which they were defined. Unless it is set
/// explicitly, the start symbol is the first nonterminal defined.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Grammar {
    pub(crate) rules: Map<Symbol, Vec<Production>>,
    pub(crate) start: Option<Symbol>,
}

impl Grammar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Define a grammar using the specified function.
    pub fn define<F>(f: F) -> Result<Self, GrammarDefError>
    where
        F: FnOnce(&mut GrammarDef) -> Result<(), GrammarDefError>,
    {
        let mut def = GrammarDef {
            grammar: Grammar::new(),
        };
        f(&mut def)?;
        def.end()
    }

    pub fn start_symbol(&self) -> Option<Symbol> {
        self.start.or_else(|| self.rules.keys().next().copied())
    }

    pub fn set_start_symbol(&mut self, symbol: Symbol) {
        self.start = Some(symbol);
    }

    pub fn nonterminals(&self) -> impl Iterator<Item = Symbol> + '_ {
        self.rules.keys().copied()
    }

    pub fn rules(&self) -> impl Iterator<Item = (Symbol, &[Production])> + '_ {
        self.rules.iter().map(|(left, right)| (*left, &right[..]))
    }

    /// Return the alternatives of `nonterminal`, or an empty slice if it is
    /// not defined.
    pub fn productions(&self, nonterminal: Symbol) -> &[Production] {
        self.rules.get(&nonterminal).map_or(&[], |right| &right[..])
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn contains(&self, nonterminal: Symbol) -> bool {
        self.rules.contains_key(&nonterminal)
    }

    pub fn contains_production(&self, nonterminal: Symbol, production: &Production) -> bool {
        self.productions(nonterminal).contains(production)
    }

    /// Make `nonterminal` a key of this grammar, with no alternatives if it
    /// was not defined yet.
    pub fn declare(&mut self, nonterminal: Symbol) {
        self.rules.entry(nonterminal).or_default();
    }

    /// Append `production` to the alternatives of `nonterminal` unless it is
    /// already present. Returns whether it was added.
    pub fn add_production(&mut self, nonterminal: Symbol, production: Production) -> bool {
        let right = self.rules.entry(nonterminal).or_default();
        if right.contains(&production) {
            return false;
        }
        right.push(production);
        true
    }

    pub(crate) fn productions_mut(&mut self, nonterminal: Symbol) -> &mut Vec<Production> {
        self.rules.entry(nonterminal).or_default()
    }

    /// Collect `(referrer, symbol)` pairs for every nonterminal that appears
    /// on a right-hand side but is not a key of this grammar.
    pub fn undefined_references(&self) -> Vec<(Symbol, Symbol)> {
        let mut undefined = vec![];
        for (left, right) in &self.rules {
            for symbol in right.iter().flat_map(|p| p.symbols()) {
                if symbol.is_nonterminal()
                    && !self.rules.contains_key(symbol)
                    && !undefined.contains(&(*left, *symbol))
                {
                    undefined.push((*left, *symbol));
                }
            }
        }
        undefined
    }

    /// Check that every production is a single terminal or a pair of
    /// nonterminals.
    ///
    /// An epsilon production is tolerated on the start symbol as long as the
    /// start symbol never occurs on a right-hand side.
    pub fn is_chomsky_normal_form(&self) -> bool {
        let start = self.start_symbol();
        let start_on_right = self
            .rules
            .values()
            .flatten()
            .any(|p| start.map_or(false, |s| p.symbols().contains(&s)));

        self.rules.iter().all(|(left, right)| {
            right.iter().all(|p| match p.symbols() {
                [] => Some(*left) == start && !start_on_right,
                [a] => a.is_terminal(),
                [a, b] => a.is_nonterminal() && b.is_nonterminal(),
                _ => false,
            })
        })
    }

    /// `"A -> x | y"`
    pub fn display_rule(&self, nonterminal: Symbol) -> DisplayRule<'_> {
        DisplayRule {
            grammar: self,
            nonterminal,
        }
    }
}

pub struct DisplayRule<'g> {
    grammar: &'g Grammar,
    nonterminal: Symbol,
}

impl fmt::Display for DisplayRule<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ->", self.nonterminal)?;
        for (i, production) in self.grammar.productions(self.nonterminal).iter().enumerate() {
            if i > 0 {
                f.write_str(" |")?;
            }
            write!(f, " {}", production)?;
        }
        Ok(())
    }
}

impl fmt::Display for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut nonterminals: Vec<_> = self.nonterminals().collect();
        nonterminals.sort();
        for nonterminal in nonterminals {
            writeln!(f, "{}", self.display_rule(nonterminal))?;
        }
        Ok(())
    }
}

/// The contextual values for building a `Grammar`.
#[derive(Debug)]
pub struct GrammarDef {
    grammar: Grammar,
}

impl GrammarDef {
    /// Declare a nonterminal without adding any alternatives.
    pub fn nonterminal(&mut self, name: char) -> Result<Symbol, GrammarDefError> {
        let symbol = Symbol::nonterminal(name)?;
        self.grammar.declare(symbol);
        Ok(symbol)
    }

    /// Add the alternatives written as strings (`"aB"`, `"$"`, ...) to `left`.
    ///
    /// Duplicated alternatives are merged.
    pub fn rule<'a, I>(&mut self, left: char, productions: I) -> Result<Symbol, GrammarDefError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let left = self.nonterminal(left)?;
        for production in productions {
            let production: Production = production.parse()?;
            self.grammar.add_production(left, production);
        }
        Ok(left)
    }

    /// Specify the start symbol for this grammar.
    pub fn start_symbol(&mut self, name: char) -> Result<(), GrammarDefError> {
        let symbol = Symbol::nonterminal(name)?;
        self.grammar.start.replace(symbol);
        Ok(())
    }

    fn end(self) -> Result<Grammar, GrammarDefError> {
        if let Some(start) = self.grammar.start {
            if !self.grammar.contains(start) {
                return Err(GrammarDefError::UnknownStartSymbol(start.as_char()));
            }
        }
        Ok(self.grammar)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GrammarDefError {
    #[error("`{}' is not a grammar symbol", _0)]
    InvalidSymbol(char),

    #[error("`{}' is not a nonterminal", _0)]
    ExpectedNonterminal(char),

    #[error("`$' must be the only content of an alternative: `{}'", _0)]
    MisplacedEpsilon(String),

    #[error("empty alternative")]
    EmptyProduction,

    #[error("unknown start symbol: `{}'", _0)]
    UnknownStartSymbol(char),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sym(ch: char) -> Symbol {
        Symbol::new(ch).unwrap()
    }

    #[test]
    fn symbol_kinds() {
        assert!(sym('S').is_nonterminal());
        assert!(sym('a').is_terminal());
        assert!(sym('0').is_terminal());
        assert_eq!(Symbol::new('-'), Err(GrammarDefError::InvalidSymbol('-')));
        assert_eq!(
            Symbol::nonterminal('a'),
            Err(GrammarDefError::ExpectedNonterminal('a'))
        );
    }

    #[test]
    fn parse_production() {
        let p: Production = "aBc".parse().unwrap();
        assert_eq!(p.symbols(), [sym('a'), sym('B'), sym('c')]);
        assert!("$".parse::<Production>().unwrap().is_epsilon());
        assert!(matches!(
            "a$".parse::<Production>(),
            Err(GrammarDefError::MisplacedEpsilon(..))
        ));
        assert_eq!(
            "".parse::<Production>(),
            Err(GrammarDefError::EmptyProduction)
        );
        assert_eq!("B".parse::<Production>().unwrap().unit_target(), Some(sym('B')));
        assert_eq!("b".parse::<Production>().unwrap().unit_target(), None);
    }

    #[test]
    fn define_merges_duplicates() {
        let grammar = Grammar::define(|g| {
            g.rule('S', ["aB", "aB"])?;
            g.rule('B', ["b"])?;
            g.rule('S', ["aB", "$"])?;
            Ok(())
        })
        .unwrap();
        assert_eq!(grammar.start_symbol(), Some(sym('S')));
        assert_eq!(grammar.productions(sym('S')).len(), 2);
        assert!(grammar.contains_production(sym('S'), &Production::epsilon()));
        assert!(grammar.undefined_references().is_empty());
    }

    #[test]
    fn explicit_start_symbol() {
        let grammar = Grammar::define(|g| {
            g.rule('A', ["a"])?;
            g.rule('S', ["AA"])?;
            g.start_symbol('S')
        })
        .unwrap();
        assert_eq!(grammar.start_symbol(), Some(sym('S')));

        let err = Grammar::define(|g| {
            g.rule('A', ["a"])?;
            g.start_symbol('S')
        })
        .unwrap_err();
        assert_eq!(err, GrammarDefError::UnknownStartSymbol('S'));
    }

    #[test]
    fn undefined_references() {
        let grammar = Grammar::define(|g| {
            g.rule('S', ["aX", "XY"])?;
            Ok(())
        })
        .unwrap();
        assert_eq!(
            grammar.undefined_references(),
            [(sym('S'), sym('X')), (sym('S'), sym('Y'))]
        );
    }

    #[test]
    fn chomsky_normal_form_shape() {
        let cnf = Grammar::define(|g| {
            g.rule('S', ["AB", "a"])?;
            g.rule('A', ["a"])?;
            g.rule('B', ["b"])?;
            Ok(())
        })
        .unwrap();
        assert!(cnf.is_chomsky_normal_form());

        for bad in ["aB", "A", "ABA"] {
            let grammar = Grammar::define(|g| {
                g.rule('S', [bad])?;
                g.rule('A', ["a"])?;
                g.rule('B', ["b"])?;
                Ok(())
            })
            .unwrap();
            assert!(!grammar.is_chomsky_normal_form(), "{}", bad);
        }

        let empty_start = Grammar::define(|g| {
            g.rule('S', ["AA", "$"])?;
            g.rule('A', ["a"])?;
            Ok(())
        })
        .unwrap();
        assert!(empty_start.is_chomsky_normal_form());

        let empty_inner = Grammar::define(|g| {
            g.rule('S', ["AA"])?;
            g.rule('A', ["a", "$"])?;
            Ok(())
        })
        .unwrap();
        assert!(!empty_inner.is_chomsky_normal_form());

        let recursive_start = Grammar::define(|g| {
            g.rule('S', ["SS", "$"])?;
            Ok(())
        })
        .unwrap();
        assert!(!recursive_start.is_chomsky_normal_form());
    }

    #[test]
    fn display_is_sorted() {
        let grammar = Grammar::define(|g| {
            g.rule('S', ["AB", "$"])?;
            g.rule('B', ["b"])?;
            g.rule('A', ["a"])?;
            g.nonterminal('C')?;
            Ok(())
        })
        .unwrap();
        assert_eq!(
            grammar.to_string(),
            "A -> a\nB -> b\nC ->\nS -> AB | $\n"
        );
    }
}
