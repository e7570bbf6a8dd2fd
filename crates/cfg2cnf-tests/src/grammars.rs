//! Grammar definitions for integration tests.

use cfg2cnf::grammar::{GrammarDef, GrammarDefError};

pub type Fixture = fn(&mut GrammarDef) -> Result<(), GrammarDefError>;

/// Nullable nonterminal on the right of a left-recursive start symbol.
pub fn g_epsilon(g: &mut GrammarDef) -> Result<(), GrammarDefError> {
    g.rule('S', ["SaB", "aB"])?;
    g.rule('B', ["bB", "$"])?;
    Ok(())
}

/// Exercises every stage of the conversion.
pub fn g_assignment(g: &mut GrammarDef) -> Result<(), GrammarDefError> {
    g.rule('S', ["X", "Y"])?;
    g.rule('X', ["xX", "xZ"])?;
    g.rule('Y', ["yY", "yZ"])?;
    g.rule('Z', ["abcM"])?;
    g.rule('M', ["NP"])?;
    g.rule('N', ["n", "$"])?;
    g.rule('P', ["p", "$"])?;
    Ok(())
}

pub fn g_units(g: &mut GrammarDef) -> Result<(), GrammarDefError> {
    g.rule('S', ["A", "B", "C"])?;
    g.rule('A', ["a"])?;
    g.rule('B', ["b"])?;
    g.rule('C', ["c"])?;
    Ok(())
}

pub fn g_mixed(g: &mut GrammarDef) -> Result<(), GrammarDefError> {
    g.rule('S', ["aBc"])?;
    g.rule('B', ["b"])?;
    Ok(())
}

pub fn g_long(g: &mut GrammarDef) -> Result<(), GrammarDefError> {
    g.rule('S', ["ABC"])?;
    g.rule('A', ["a"])?;
    g.rule('B', ["b"])?;
    g.rule('C', ["c"])?;
    Ok(())
}

// E → E p T | T
// T → T m F | F
// F → l E r | n
pub fn g_arith(g: &mut GrammarDef) -> Result<(), GrammarDefError> {
    g.start_symbol('E')?;
    g.rule('F', ["lEr", "n"])?;
    g.rule('T', ["TmF", "F"])?;
    g.rule('E', ["EpT", "T"])?;
    Ok(())
}

/// Balanced parentheses, written with `l` and `r`.
pub fn g_balanced(g: &mut GrammarDef) -> Result<(), GrammarDefError> {
    g.rule('S', ["lSr", "SS", "$"])?;
    Ok(())
}

pub fn g_palindromes(g: &mut GrammarDef) -> Result<(), GrammarDefError> {
    g.rule('S', ["aSa", "bSb", "a", "b", "$"])?;
    Ok(())
}

/// Unit cycle between three nonterminals.
pub fn g_unit_cycle(g: &mut GrammarDef) -> Result<(), GrammarDefError> {
    g.rule('S', ["A", "sA"])?;
    g.rule('A', ["B", "a"])?;
    g.rule('B', ["S", "bB"])?;
    Ok(())
}

pub fn all() -> [(&'static str, Fixture); 9] {
    [
        ("epsilon", g_epsilon),
        ("assignment", g_assignment),
        ("units", g_units),
        ("mixed", g_mixed),
        ("long", g_long),
        ("arith", g_arith),
        ("balanced", g_balanced),
        ("palindromes", g_palindromes),
        ("unit_cycle", g_unit_cycle),
    ]
}
