//! The conversion pipeline.

use crate::{
    binarize::binarize,
    epsilon,
    grammar::{Grammar, Symbol},
    symbol::POOL_SIZE,
    terminal::{isolate_terminals, TerminalMapping},
    unit::remove_units,
};

/// Convert `grammar` into Chomsky Normal Form with the default
/// configuration.
pub fn convert(grammar: &Grammar) -> Result<Grammar, ConvertError> {
    Config::new().convert(grammar)
}

/// The configuration of a conversion.
#[derive(Debug, Default, Clone)]
pub struct Config {
    keep_empty_start: bool,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep the empty string in the language of a grammar whose start symbol
    /// is nullable, by introducing a fresh start symbol `S0 -> S | $`.
    ///
    /// Without this, the empty string is silently dropped.
    pub fn keep_empty_start(mut self) -> Self {
        self.keep_empty_start = true;
        self
    }

    pub fn convert(&self, grammar: &Grammar) -> Result<Grammar, ConvertError> {
        self.run(grammar).map(|stages| stages.binarized)
    }

    /// Run every stage of the conversion, keeping each intermediate grammar.
    pub fn run(&self, grammar: &Grammar) -> Result<Stages, ConvertError> {
        let span = tracing::debug_span!("convert");
        let _entered = span.enter();

        validate(grammar)?;

        let nullable = epsilon::nullable_set(grammar);
        let mut without_epsilon = epsilon::remove_epsilon(grammar, &nullable);
        if self.keep_empty_start {
            let start = grammar.start_symbol().ok_or(ConvertError::EmptyGrammar)?;
            if nullable.contains(&start) {
                epsilon::add_empty_start(&mut without_epsilon)?;
            }
        }
        tracing::debug!("without epsilon productions:\n{}", without_epsilon);

        let without_units = remove_units(&without_epsilon);
        tracing::debug!("without unit productions:\n{}", without_units);

        let mut terminal_mapping = TerminalMapping::default();
        let isolated = isolate_terminals(&without_units, &mut terminal_mapping)?;
        tracing::debug!("with isolated terminals:\n{}", isolated);

        let binarized = binarize(&isolated)?;
        tracing::debug!("binarized:\n{}", binarized);

        Ok(Stages {
            original: grammar.clone(),
            without_epsilon,
            without_units,
            isolated,
            binarized,
            terminal_mapping,
        })
    }
}

fn validate(grammar: &Grammar) -> Result<(), ConvertError> {
    if grammar.is_empty() {
        return Err(ConvertError::EmptyGrammar);
    }
    if let Some(&(referrer, symbol)) = grammar.undefined_references().first() {
        return Err(ConvertError::UndefinedNonterminal { symbol, referrer });
    }
    Ok(())
}

/// The grammars produced by each stage of a conversion.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct Stages {
    pub original: Grammar,
    pub without_epsilon: Grammar,
    pub without_units: Grammar,
    pub isolated: Grammar,
    /// The final grammar, in Chomsky Normal Form.
    pub binarized: Grammar,
    /// The nonterminals introduced for terminals during this conversion.
    pub terminal_mapping: TerminalMapping,
}

impl Stages {
    /// Iterate over each grammar with a human-readable title, in pipeline
    /// order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &Grammar)> + '_ {
        [
            ("Original grammar", &self.original),
            ("After removing epsilon productions", &self.without_epsilon),
            ("After removing unit productions", &self.without_units),
            ("After isolating terminals", &self.isolated),
            ("After binarizing long productions", &self.binarized),
        ]
        .into_iter()
    }

    pub fn into_grammar(self) -> Grammar {
        self.binarized
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConvertError {
    #[error("ran out of fresh nonterminal symbols (all {} are in use)", POOL_SIZE)]
    SymbolExhaustion,

    #[error("nonterminal `{}' is used by `{}' but never defined", symbol, referrer)]
    UndefinedNonterminal { symbol: Symbol, referrer: Symbol },

    #[error("the grammar defines no nonterminals")]
    EmptyGrammar,
}
