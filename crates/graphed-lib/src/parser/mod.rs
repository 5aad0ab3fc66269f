//! Scanner and parser for the query language.
//!
//! # Architecture
//!
//! The parser pulls tokens from the [`Scanner`] one at a time and keeps a single token
//! of lookahead. Productions live in `grammar/` as `parse_*` methods on [`Parser`].
//!
//! - Literal values are decoded by the scanner; the parser never looks at raw text
//! - Const and dynamic value positions are separate instantiations of one generic
//!   value production, so const trees cannot hold variables
//! - Nesting is bounded by recursion fuel instead of the native stack
//!
//! There is no recovery: the first lexical or grammar error aborts the parse.

pub mod lexer;

mod core;
mod grammar;
mod invariants;

#[cfg(test)]
mod lexer_tests;
#[cfg(test)]
mod tests;

pub use core::{DEFAULT_RECURSION_FUEL, ParseError, Parser};
pub use lexer::{LexError, Scanner, Token, TokenKind, dedent_block_string, lex};

use graphed_core::Document;

use crate::Result;

/// Main entry point, with default limits.
pub fn parse(source: &str) -> Result<Document<'_>> {
    Parser::new(source).parse()
}
