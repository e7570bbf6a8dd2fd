//! Reader for the line-oriented grammar format.
//!
//! ```text
//! S -> SaB | aB
//! B -> bB | $
//! *
//! ```
//!
//! Each line defines alternatives for one nonterminal; `$` is the empty
//! production and a line holding only `*` ends the input. Lines that cannot
//! be read are reported and skipped.

pub mod lexer;

use self::lexer::{Lexer, Token};
use crate::grammar::{Grammar, GrammarDefError, Production, Symbol};

/// The result of reading a grammar text.
#[derive(Debug)]
pub struct Parsed {
    /// The grammar built from every line that could be read.
    pub grammar: Grammar,
    /// The lines that were skipped.
    pub errors: Vec<LineError>,
}

pub fn parse(source: &str) -> Parsed {
    let span = tracing::trace_span!("parse");
    let _entered = span.enter();

    let mut grammar = Grammar::new();
    let mut errors = vec![];
    for (index, text) in source.lines().enumerate() {
        let line = index + 1;
        match parse_line(text) {
            Ok(Line::Blank) => (),
            Ok(Line::End) => {
                tracing::trace!("end of input at line {}", line);
                break;
            }
            Ok(Line::Rule { left, alternatives }) => {
                grammar.declare(left);
                for production in alternatives {
                    grammar.add_production(left, production);
                }
            }
            Err(kind) => {
                tracing::warn!("skipping line {}: {}", line, kind);
                errors.push(LineError { line, kind });
            }
        }
    }

    Parsed { grammar, errors }
}

enum Line {
    Blank,
    End,
    Rule {
        left: Symbol,
        alternatives: Vec<Production>,
    },
}

fn parse_line(text: &str) -> Result<Line, LineErrorKind> {
    let tokens = Lexer::new(text)
        .map(|res| {
            res.map(|(_, token, _)| token)
                .map_err(|err| LineErrorKind::InvalidCharacter {
                    column: err.location.col as usize + 1,
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    match tokens[..] {
        [] => return Ok(Line::Blank),
        [Token::Star] => return Ok(Line::End),
        _ => (),
    }

    let arrow = tokens
        .iter()
        .position(|t| *t == Token::Arrow)
        .ok_or(LineErrorKind::MissingArrow)?;
    let left = match tokens[..arrow] {
        [Token::Symbols(name)] if name.len() == 1 => {
            let ch = name.chars().next().ok_or(LineErrorKind::BadLeftSide)?;
            Symbol::nonterminal(ch).map_err(|_| LineErrorKind::BadLeftSide)?
        }
        _ => return Err(LineErrorKind::BadLeftSide),
    };

    let mut alternatives = vec![];
    for alternative in tokens[arrow + 1..].split(|t| *t == Token::VertBar) {
        match alternative {
            [] => continue,
            [Token::Epsilon] => alternatives.push(Production::epsilon()),
            _ => {
                let mut symbols = vec![];
                for token in alternative {
                    match token {
                        Token::Symbols(s) => {
                            for ch in s.chars() {
                                symbols.push(Symbol::new(ch)?);
                            }
                        }
                        Token::Epsilon => return Err(LineErrorKind::MisplacedEpsilon),
                        token => return Err(LineErrorKind::UnexpectedToken(token.to_string())),
                    }
                }
                alternatives.push(Production::new(symbols));
            }
        }
    }

    Ok(Line::Rule { left, alternatives })
}

/// A line of the grammar text that was skipped.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("line {}: {}", line, kind)]
pub struct LineError {
    /// 1-based line number.
    pub line: usize,
    pub kind: LineErrorKind,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LineErrorKind {
    #[error("unrecognized character at column {}", column)]
    InvalidCharacter { column: usize },

    #[error("missing `->' (expected `A -> b | c')")]
    MissingArrow,

    #[error("expected a single nonterminal before `->'")]
    BadLeftSide,

    #[error("unexpected `{}' in an alternative", _0)]
    UnexpectedToken(String),

    #[error("`$' must be the only content of an alternative")]
    MisplacedEpsilon,

    #[error(transparent)]
    Definition(#[from] GrammarDefError),
}
