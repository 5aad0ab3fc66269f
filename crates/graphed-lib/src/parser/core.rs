//! Parser state machine and low-level operations.

use rowan::{TextRange, TextSize};

use graphed_core::Document;

use super::lexer::{Scanner, Token, TokenKind};
use crate::{Error, Result};

/// Nesting depth allowed by default for selection sets, list and object values, and list types.
pub const DEFAULT_RECURSION_FUEL: u32 = 256;

/// Grammar-level failure anchored at the offending token.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}, found {found} at {}..{}", u32::from(.span.start()), u32::from(.span.end()))]
pub struct ParseError {
    pub message: String,
    pub span: TextRange,
    /// Display form of the token found instead.
    pub found: String,
}

/// Single-token-lookahead recursive descent parser.
///
/// Every error is fatal: the first one aborts the parse and nothing is returned.
pub struct Parser<'src> {
    pub(super) source: &'src str,
    scanner: Scanner<'src>,
    pub(super) current: Token<'src>,
    pub(super) depth: u32,
    recursion_fuel_limit: Option<u32>,
    max_source_len: Option<usize>,
}

impl<'src> Parser<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            scanner: Scanner::new(source),
            current: Token::new(TokenKind::Eof, TextRange::empty(TextSize::from(0))),
            depth: 0,
            recursion_fuel_limit: Some(DEFAULT_RECURSION_FUEL),
            max_source_len: None,
        }
    }

    /// Maximum nesting depth. `None` removes the limit.
    pub fn with_recursion_fuel(mut self, limit: Option<u32>) -> Self {
        self.recursion_fuel_limit = limit;
        self
    }

    /// Rejects sources longer than `limit` bytes before scanning.
    pub fn with_max_source_len(mut self, limit: Option<usize>) -> Self {
        self.max_source_len = limit;
        self
    }

    pub fn parse(mut self) -> Result<Document<'src>> {
        let span = tracing::debug_span!(
            target: "graphed.parse",
            "parse_document",
            source_len = self.source.len(),
            definitions = tracing::field::Empty,
        );
        let _guard = span.enter();

        let result = self.parse_root();
        match &result {
            Ok(document) => {
                span.record("definitions", document.definitions.len());
            }
            Err(err) => {
                tracing::debug!(target: "graphed.parse", error = %err, "parse failed");
            }
        }
        result
    }

    fn parse_root(&mut self) -> Result<Document<'src>> {
        if let Some(limit) = self.max_source_len
            && self.source.len() > limit
        {
            return Err(Error::SourceTooLarge {
                len: self.source.len(),
                limit,
            });
        }

        self.scanner.reset();
        self.depth = 0;
        self.current = self.scanner.scan()?;

        let definitions = self.parse_definitions()?;
        Ok(Document::new(definitions).with_source(self.source))
    }

    pub(super) fn at(&self, kind: TokenKind<'_>) -> bool {
        self.current.kind == kind
    }

    pub(super) fn at_eof(&self) -> bool {
        self.current.kind == TokenKind::Eof
    }

    pub(super) fn at_keyword(&self, keyword: &str) -> bool {
        matches!(self.current.kind, TokenKind::Name(name) if name == keyword)
    }

    /// Consumes the current token and returns it.
    pub(super) fn bump(&mut self) -> Result<Token<'src>> {
        self.assert_not_eof();
        let next = self.scanner.scan()?;
        Ok(std::mem::replace(&mut self.current, next))
    }

    pub(super) fn eat(&mut self, kind: TokenKind<'_>) -> Result<bool> {
        if self.at(kind) {
            self.bump()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    pub(super) fn eat_keyword(&mut self, keyword: &str) -> Result<bool> {
        if self.at_keyword(keyword) {
            self.bump()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    pub(super) fn expect(&mut self, kind: TokenKind<'_>) -> Result<Token<'src>> {
        if self.at(kind.clone()) {
            return self.bump();
        }
        Err(self.error(format!("expected {kind}")))
    }

    pub(super) fn expect_keyword(&mut self, keyword: &str) -> Result<()> {
        if self.eat_keyword(keyword)? {
            return Ok(());
        }
        Err(self.error(format!("expected `{keyword}`")))
    }

    pub(super) fn expect_name(&mut self) -> Result<&'src str> {
        match self.current.kind {
            TokenKind::Name(name) => {
                self.bump()?;
                Ok(name)
            }
            _ => Err(self.error("expected a name")),
        }
    }

    /// Items up to `close`, assuming the opening delimiter was consumed.
    pub(super) fn delimited<T>(
        &mut self,
        close: TokenKind<'static>,
        mut item: impl FnMut(&mut Self) -> Result<T>,
    ) -> Result<Vec<T>> {
        let mut items = Vec::new();
        loop {
            if self.eat(close.clone())? {
                return Ok(items);
            }
            if self.at_eof() {
                return Err(self.error(format!("expected closing delimiter {close}")));
            }
            items.push(item(self)?);
        }
    }

    /// Like [`Self::delimited`], but an immediately closed list is an error.
    pub(super) fn delimited_nonempty<T>(
        &mut self,
        close: TokenKind<'static>,
        what: &str,
        item: impl FnMut(&mut Self) -> Result<T>,
    ) -> Result<Vec<T>> {
        if self.at(close.clone()) {
            return Err(self.error(format!("expected at least one {what}")));
        }
        self.delimited(close, item)
    }

    pub(super) fn error(&self, message: impl Into<String>) -> Error {
        self.error_at(&self.current, message)
    }

    pub(super) fn error_at(&self, token: &Token<'_>, message: impl Into<String>) -> Error {
        Error::Parse(ParseError {
            message: message.into(),
            span: token.span,
            found: token.kind.to_string(),
        })
    }

    pub(super) fn enter_recursion(&mut self) -> Result<()> {
        if let Some(limit) = self.recursion_fuel_limit
            && self.depth >= limit
        {
            return Err(Error::RecursionLimitExceeded {
                span: self.current.span,
            });
        }
        self.depth += 1;
        Ok(())
    }

    pub(super) fn exit_recursion(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }
}
