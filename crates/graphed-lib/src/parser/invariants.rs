//! Invariant checks excluded from coverage reports.

#![cfg_attr(coverage_nightly, coverage(off))]

use super::core::Parser;
use super::lexer::TokenKind;

impl Parser<'_> {
    #[inline]
    pub(super) fn assert_not_eof(&self) {
        assert!(
            self.current.kind != TokenKind::Eof,
            "broken parser invariant: bump called at end of input"
        );
    }

    #[inline]
    pub(super) fn assert_current(&self, expected: TokenKind<'_>) {
        assert_eq!(
            self.current.kind, expected,
            "broken parser invariant: expected {expected} (upstream caller's responsibility)",
        );
    }

    #[inline]
    pub(super) fn assert_keyword(&self, keyword: &str) {
        assert!(
            self.at_keyword(keyword),
            "broken parser invariant: expected keyword `{keyword}` but found {}",
            self.current.kind,
        );
    }
}
