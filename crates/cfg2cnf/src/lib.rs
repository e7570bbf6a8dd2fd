//! Conversion of context-free grammars into Chomsky Normal Form.
//!
//! The conversion runs four stages in a fixed order, each producing a new
//! grammar from the previous one:
//!
//! 1. removal of epsilon productions ([`epsilon`]),
//! 2. removal of unit productions ([`unit`]),
//! 3. isolation of terminals inside longer productions ([`terminal`]),
//! 4. splitting of long productions into binary ones ([`binarize`]).
//!
//! ```
//! use cfg2cnf::{convert, grammar::Grammar};
//!
//! let grammar = Grammar::define(|g| {
//!     g.rule('S', ["aSb", "ab"])?;
//!     Ok(())
//! })?;
//! let cnf = convert(&grammar)?;
//! assert!(cnf.is_chomsky_normal_form());
//! assert!(cfg2cnf::cyk::recognize(&cnf, "aabb"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod binarize;
pub mod convert;
pub mod cyk;
pub mod epsilon;
pub mod grammar;
pub mod symbol;
pub mod syntax;
pub mod terminal;
pub mod types;
pub mod unit;

pub use crate::convert::{convert, Config, ConvertError, Stages};
