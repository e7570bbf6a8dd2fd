//! Lexer implementation.

use std::fmt;

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Token<'input> {
    Arrow,
    VertBar,
    Epsilon,
    Star,
    /// A run of grammar symbols, such as `SaB`.
    Symbols(&'input str),
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Arrow => f.write_str("->"),
            Token::VertBar => f.write_str("|"),
            Token::Epsilon => f.write_str("$"),
            Token::Star => f.write_str("*"),
            Token::Symbols(s) => f.write_str(s),
        }
    }
}

lexgen::lexer! {
    pub Lexer -> Token<'input>;

    let whitespace = [' ' '\t' '\r'];
    let symbol = ['A'-'Z' 'a'-'z' '0'-'9'];

    rule Init {
        $whitespace+,
        "->" = Token::Arrow,
        "|" = Token::VertBar,
        "$" = Token::Epsilon,
        "*" = Token::Star,
        $symbol+ => |lexer| {
            let token = Token::Symbols(lexer.match_());
            lexer.return_(token)
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Token::*;

    fn lex(input: &str) -> Vec<Token<'_>> {
        Lexer::new(input)
            .map(|res| res.map(|(_, t, _)| t))
            .collect::<Result<Vec<_>, _>>()
            .unwrap()
    }

    #[test]
    fn smoketest() {
        let tokens = lex("S -> SaB | a B |$\t");
        assert!(matches!(
            dbg!(&tokens[..]),
            [
                Symbols("S"),
                Arrow,
                Symbols("SaB"),
                VertBar,
                Symbols("a"),
                Symbols("B"),
                VertBar,
                Epsilon,
            ]
        ));
        assert_eq!(lex("*"), [Star]);
        assert!(lex("  ").is_empty());
    }

    #[test]
    fn invalid_character() {
        let err = Lexer::new("S -> a, b")
            .collect::<Result<Vec<_>, _>>()
            .unwrap_err();
        assert_eq!(err.location.col, 6);
    }
}
