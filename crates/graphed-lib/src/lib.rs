//! Graphed: scanner, parser and printers for a GraphQL-style query language.
//!
//! Parses schema definition language and executable documents into the document
//! tree from `graphed-core`, and renders it back as compact source text or as an
//! s-expression dump.
//!
//! # Example
//!
//! ```
//! let source = "query Hero($episode: Episode = JEDI) { hero(episode: $episode) { name } }";
//!
//! let document = graphed_lib::parse(source).expect("valid document");
//! assert_eq!(
//!     graphed_lib::print(&document),
//!     "query Hero($episode:Episode=JEDI){hero(episode:$episode){name}}"
//! );
//! ```

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod diagnostics;
pub mod parser;

use rowan::{TextRange, TextSize};

pub use diagnostics::ErrorPrinter;
pub use graphed_core::{Document, print, to_sexp};
pub use parser::{
    DEFAULT_RECURSION_FUEL, LexError, ParseError, Parser, Scanner, Token, TokenKind, parse,
};

/// Errors that can occur while turning source text into a document.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// Malformed lexeme.
    #[error(transparent)]
    Lex(#[from] LexError),

    /// Token sequence not allowed by the grammar.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Recursion fuel exhausted (input nested too deeply).
    #[error("recursion limit exceeded at {}..{}", u32::from(.span.start()), u32::from(.span.end()))]
    RecursionLimitExceeded { span: TextRange },

    /// Source longer than the configured maximum.
    #[error("source too large: {len} bytes, limit is {limit}")]
    SourceTooLarge { len: usize, limit: usize },
}

impl Error {
    /// Byte range to point at. Lexical errors yield an empty range at their offset.
    pub fn span(&self) -> TextRange {
        match self {
            Error::Lex(err) => TextRange::empty(TextSize::from(err.offset as u32)),
            Error::Parse(err) => err.span,
            Error::RecursionLimitExceeded { span } => *span,
            Error::SourceTooLarge { .. } => TextRange::empty(TextSize::from(0)),
        }
    }

    /// Description without position information.
    pub fn message(&self) -> String {
        match self {
            Error::Lex(err) => err.message.clone(),
            Error::Parse(err) => format!("{}, found {}", err.message, err.found),
            Error::RecursionLimitExceeded { .. } => "recursion limit exceeded".to_owned(),
            Error::SourceTooLarge { .. } => self.to_string(),
        }
    }

    /// Renders the error with a snippet of `source`.
    pub fn render(&self, source: &str) -> String {
        self.printer().source(source).render()
    }

    pub fn printer(&self) -> ErrorPrinter<'_, '_> {
        ErrorPrinter::new(self)
    }
}

/// Result type for parsing operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Parses `source` and prints it back in compact form.
pub fn parse_and_print(source: &str) -> Result<String> {
    parse(source).map(|document| print(&document))
}

/// Parses `source` and renders its s-expression dump.
pub fn parse_to_sexp(source: &str) -> Result<String> {
    parse(source).map(|document| to_sexp(&document))
}
