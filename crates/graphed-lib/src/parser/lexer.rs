//! Scanner for the query language.
//!
//! Logos recognizes punctuators, names and the first character of numbers and strings.
//! Numbers and strings are then finished by hand-written scanners, which enforce the
//! literal grammar and build the decoded value.
//!
//! ## Error handling
//!
//! The first malformed lexeme ends the scan with a [`LexError`]. There is no recovery:
//! the parser treats every lexical error as fatal.

use std::fmt;
use std::ops::Range;

use logos::{Lexer, Logos};
use rowan::TextRange;

/// Lexical failure: what went wrong and the byte offset where it was detected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message} at {offset}")]
pub struct LexError {
    pub message: String,
    pub offset: usize,
}

impl LexError {
    pub fn new(message: impl Into<String>, offset: usize) -> Self {
        Self {
            message: message.into(),
            offset,
        }
    }
}

/// One lexical unit. Equality compares kinds and values only, never spans.
#[derive(Debug, Clone)]
pub struct Token<'src> {
    pub kind: TokenKind<'src>,
    pub span: TextRange,
}

impl<'src> Token<'src> {
    #[inline]
    pub fn new(kind: TokenKind<'src>, span: TextRange) -> Self {
        Self { kind, span }
    }
}

impl PartialEq for Token<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.kind.fmt(f)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind<'src> {
    Eof,
    Bang,
    Dollar,
    Amp,
    ParenOpen,
    ParenClose,
    Spread,
    Colon,
    Equals,
    At,
    BracketOpen,
    BracketClose,
    BraceOpen,
    BraceClose,
    Pipe,
    Name(&'src str),
    Int(i64),
    Float(f64),
    /// Decoded value: escapes resolved, block strings dedented.
    String(String),
}

impl TokenKind<'_> {
    /// Source text of a punctuator, `None` for valued tokens and EOF.
    pub fn punctuator(&self) -> Option<&'static str> {
        Some(match self {
            TokenKind::Bang => "!",
            TokenKind::Dollar => "$",
            TokenKind::Amp => "&",
            TokenKind::ParenOpen => "(",
            TokenKind::ParenClose => ")",
            TokenKind::Spread => "...",
            TokenKind::Colon => ":",
            TokenKind::Equals => "=",
            TokenKind::At => "@",
            TokenKind::BracketOpen => "[",
            TokenKind::BracketClose => "]",
            TokenKind::BraceOpen => "{",
            TokenKind::BraceClose => "}",
            TokenKind::Pipe => "|",
            _ => return None,
        })
    }
}

impl fmt::Display for TokenKind<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(text) = self.punctuator() {
            return write!(f, "`{text}`");
        }
        match self {
            TokenKind::Name(name) => write!(f, "name `{name}`"),
            TokenKind::Int(value) => write!(f, "int `{value}`"),
            TokenKind::Float(value) => write!(f, "float `{value:?}`"),
            TokenKind::String(value) => write!(f, "string {value:?}"),
            _ => f.write_str("end of input"),
        }
    }
}

/// Error channel of the logos lexer: either an unmatched character or a
/// failure reported by one of the literal scanners.
#[derive(Debug, Clone, PartialEq, Default)]
enum RawError {
    #[default]
    Unrecognized,
    Invalid(LexError),
}

impl From<LexError> for RawError {
    fn from(err: LexError) -> Self {
        RawError::Invalid(err)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Number {
    Int(i64),
    Float(f64),
}

/// Whitespace, line terminators, commas, the byte order mark and comments are skipped.
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(error = RawError)]
#[logos(skip r"[ \t\r\n,\u{FEFF}]+")]
#[logos(skip(r"#[^\n\r]*", allow_greedy = true))]
enum Lexeme<'src> {
    #[token("!")]
    Bang,

    #[token("$")]
    Dollar,

    #[token("&")]
    Amp,

    #[token("(")]
    ParenOpen,

    #[token(")")]
    ParenClose,

    /// A single `.` is matched and the other two are checked by hand.
    #[token(".", scan_spread)]
    Spread,

    #[token(":")]
    Colon,

    #[token("=")]
    Equals,

    #[token("@")]
    At,

    #[token("[")]
    BracketOpen,

    #[token("]")]
    BracketClose,

    #[token("{")]
    BraceOpen,

    #[token("}")]
    BraceClose,

    #[token("|")]
    Pipe,

    #[regex(r"[A-Za-z_][A-Za-z0-9_]*", |lex| lex.slice())]
    Name(&'src str),

    #[token("-", scan_number)]
    #[regex(r"[0-9]", scan_number)]
    Number(Number),

    #[token("\"", scan_string)]
    #[token("\"\"\"", scan_block_string)]
    String(String),
}

impl<'src> Lexeme<'src> {
    fn into_kind(self) -> TokenKind<'src> {
        match self {
            Lexeme::Bang => TokenKind::Bang,
            Lexeme::Dollar => TokenKind::Dollar,
            Lexeme::Amp => TokenKind::Amp,
            Lexeme::ParenOpen => TokenKind::ParenOpen,
            Lexeme::ParenClose => TokenKind::ParenClose,
            Lexeme::Spread => TokenKind::Spread,
            Lexeme::Colon => TokenKind::Colon,
            Lexeme::Equals => TokenKind::Equals,
            Lexeme::At => TokenKind::At,
            Lexeme::BracketOpen => TokenKind::BracketOpen,
            Lexeme::BracketClose => TokenKind::BracketClose,
            Lexeme::BraceOpen => TokenKind::BraceOpen,
            Lexeme::BraceClose => TokenKind::BraceClose,
            Lexeme::Pipe => TokenKind::Pipe,
            Lexeme::Name(name) => TokenKind::Name(name),
            Lexeme::Number(Number::Int(value)) => TokenKind::Int(value),
            Lexeme::Number(Number::Float(value)) => TokenKind::Float(value),
            Lexeme::String(value) => TokenKind::String(value),
        }
    }
}

fn range_to_text_range(range: Range<usize>) -> TextRange {
    TextRange::new((range.start as u32).into(), (range.end as u32).into())
}

/// Restartable token stream over one source string.
pub struct Scanner<'src> {
    source: &'src str,
    lexer: Lexer<'src, Lexeme<'src>>,
}

impl<'src> Scanner<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            lexer: Lexeme::lexer(source),
        }
    }

    pub fn source(&self) -> &'src str {
        self.source
    }

    /// Next token. At end of input this keeps returning EOF.
    pub fn scan(&mut self) -> Result<Token<'src>, LexError> {
        let Some(next) = self.lexer.next() else {
            let end = self.source.len();
            return Ok(Token::new(TokenKind::Eof, range_to_text_range(end..end)));
        };
        let span = self.lexer.span();
        match next {
            Ok(lexeme) => Ok(Token::new(lexeme.into_kind(), range_to_text_range(span))),
            Err(RawError::Invalid(err)) => Err(err),
            Err(RawError::Unrecognized) => Err(unexpected_symbol(self.source, span.start)),
        }
    }

    /// Drains the scanner. The result ends with exactly one EOF token.
    pub fn remaining(&mut self) -> Result<Vec<Token<'src>>, LexError> {
        let mut tokens = Vec::new();
        loop {
            let token = self.scan()?;
            let done = token.kind == TokenKind::Eof;
            tokens.push(token);
            if done {
                return Ok(tokens);
            }
        }
    }

    /// Rewinds to the start of the source.
    pub fn reset(&mut self) {
        tracing::trace!(target: "graphed.scan", source_len = self.source.len(), "scanner reset");
        self.lexer = Lexeme::lexer(self.source);
    }

    /// Yields tokens up to and including EOF, or up to the first error.
    pub fn tokens(&mut self) -> impl Iterator<Item = Result<Token<'src>, LexError>> + '_ {
        let mut done = false;
        std::iter::from_fn(move || {
            if done {
                return None;
            }
            let result = self.scan();
            done = !matches!(&result, Ok(token) if token.kind != TokenKind::Eof);
            Some(result)
        })
    }
}

/// Convenience: scans the whole source at once.
pub fn lex(source: &str) -> Result<Vec<Token<'_>>, LexError> {
    Scanner::new(source).remaining()
}

fn unexpected_symbol(source: &str, offset: usize) -> LexError {
    match source[offset..].chars().next() {
        Some(c) => LexError::new(
            format!("unexpected symbol `{}` (0x{:x})", display_char(c), c as u32),
            offset,
        ),
        None => LexError::new("unexpected end of input", offset),
    }
}

/// Control characters are escaped, everything else is shown as is.
fn display_char(c: char) -> String {
    if c.is_control() {
        c.escape_debug().to_string()
    } else {
        c.to_string()
    }
}

fn char_at(source: &str, offset: usize) -> Option<char> {
    source.get(offset..).and_then(|rest| rest.chars().next())
}

/// Moves the lexer so the current lexeme ends at `end`.
fn bump_to<'s>(lex: &mut Lexer<'s, Lexeme<'s>>, end: usize) {
    let current = lex.span().end;
    lex.bump(end - current);
}

fn scan_spread<'s>(lex: &mut Lexer<'s, Lexeme<'s>>) -> Result<(), LexError> {
    if lex.remainder().starts_with("..") {
        lex.bump(2);
        Ok(())
    } else {
        Err(LexError::new("unfinished spread operator", lex.span().start))
    }
}

// ============================================================================
// Numbers
// ============================================================================

/// `-? (0 | [1-9][0-9]*) (. [0-9]+)? ([eE] [+-]? [0-9]+)?`, not followed by `.` or a name.
fn scan_number<'s>(lex: &mut Lexer<'s, Lexeme<'s>>) -> Result<Number, LexError> {
    let source = lex.source();
    let bytes = source.as_bytes();
    let start = lex.span().start;
    let mut pos = start;
    let mut is_float = false;

    if bytes[pos] == b'-' {
        pos += 1;
    }

    match bytes.get(pos) {
        Some(b'0') => {
            pos += 1;
            if let Some(&digit) = bytes.get(pos)
                && digit.is_ascii_digit()
            {
                return Err(LexError::new(
                    format!("invalid number, unexpected digit after 0: `{}`", digit as char),
                    pos,
                ));
            }
        }
        Some(b'1'..=b'9') => pos = skip_digits(bytes, pos),
        _ => return Err(expected_digit(source, pos)),
    }

    if bytes.get(pos) == Some(&b'.') {
        is_float = true;
        pos = require_digits(source, pos + 1)?;
    }

    if let Some(b'e' | b'E') = bytes.get(pos) {
        is_float = true;
        pos += 1;
        if let Some(b'+' | b'-') = bytes.get(pos) {
            pos += 1;
        }
        pos = require_digits(source, pos)?;
    }

    if let Some(&next) = bytes.get(pos)
        && (next == b'.' || next == b'_' || next.is_ascii_alphabetic())
    {
        return Err(expected_digit(source, pos));
    }

    let text = &source[start..pos];
    bump_to(lex, pos);

    if is_float {
        text.parse::<f64>()
            .map(Number::Float)
            .map_err(|_| LexError::new(format!("invalid number `{text}`"), start))
    } else {
        text.parse::<i64>()
            .map(Number::Int)
            .map_err(|_| LexError::new("invalid number, integer out of range", start))
    }
}

fn skip_digits(bytes: &[u8], mut pos: usize) -> usize {
    while bytes.get(pos).is_some_and(u8::is_ascii_digit) {
        pos += 1;
    }
    pos
}

/// One or more digits at `pos`; returns the offset past them.
fn require_digits(source: &str, pos: usize) -> Result<usize, LexError> {
    match source.as_bytes().get(pos) {
        Some(b) if b.is_ascii_digit() => Ok(skip_digits(source.as_bytes(), pos)),
        _ => Err(expected_digit(source, pos)),
    }
}

fn expected_digit(source: &str, pos: usize) -> LexError {
    match char_at(source, pos) {
        Some(c) => LexError::new(
            format!("invalid number, expected digit but got `{}`", display_char(c)),
            pos,
        ),
        None => LexError::new("unterminated number", pos),
    }
}

// ============================================================================
// Strings
// ============================================================================

fn scan_string<'s>(lex: &mut Lexer<'s, Lexeme<'s>>) -> Result<String, LexError> {
    let source = lex.source();
    let mut pos = lex.span().end;
    let mut value = String::new();

    loop {
        let Some(c) = char_at(source, pos) else {
            return Err(LexError::new("unterminated string", pos));
        };
        match c {
            '"' => {
                pos += 1;
                break;
            }
            '\n' | '\r' => {
                return Err(LexError::new(
                    "unterminated string, newline in non-block string",
                    pos,
                ));
            }
            '\\' => pos = scan_escape(source, pos, &mut value)?,
            _ => {
                value.push(c);
                pos += c.len_utf8();
            }
        }
    }

    bump_to(lex, pos);
    Ok(value)
}

/// Decodes the escape starting at the backslash at `pos`; returns the offset past it.
fn scan_escape(source: &str, pos: usize, out: &mut String) -> Result<usize, LexError> {
    let Some(escaped) = char_at(source, pos + 1) else {
        return Err(LexError::new("unterminated string", pos + 1));
    };
    let decoded = match escaped {
        'b' => '\u{8}',
        'f' => '\u{c}',
        'n' => '\n',
        'r' => '\r',
        't' => '\t',
        'u' => return scan_unicode_escape(source, pos, out),
        // `"`, `\`, `/`, and leniently any other character, stand for themselves.
        other => other,
    };
    out.push(decoded);
    Ok(pos + 1 + escaped.len_utf8())
}

/// `\uXXXX` (with surrogate pairs) or `\u{X..XXXXXX}` starting at the backslash at `pos`.
fn scan_unicode_escape(source: &str, pos: usize, out: &mut String) -> Result<usize, LexError> {
    let body = pos + 2;

    if source[body..].starts_with('{') {
        let bytes = source.as_bytes();
        let digits_start = body + 1;
        let end = digits_start
            + bytes[digits_start..]
                .iter()
                .take_while(|b| b.is_ascii_hexdigit())
                .count();
        match bytes.get(end) {
            Some(b'}') => {}
            Some(_) => return Err(invalid_unicode_escape(source, pos, end - pos + 1)),
            None => return Err(LexError::new("unterminated Unicode escape", pos)),
        }
        let digits = &source[digits_start..end];
        let scalar = (1..=6)
            .contains(&digits.len())
            .then(|| u32::from_str_radix(digits, 16).ok())
            .flatten()
            .and_then(char::from_u32);
        let Some(c) = scalar else {
            return Err(invalid_unicode_escape(source, pos, end - pos + 1));
        };
        out.push(c);
        return Ok(end + 1);
    }

    if source.len() < body + 4 {
        return Err(LexError::new("unterminated Unicode escape", pos));
    }
    let Some(unit) = hex4(source, body) else {
        return Err(invalid_unicode_escape(source, pos, 6));
    };

    match unit {
        0xD800..=0xDBFF => {
            let next = body + 4;
            let low = source[next..]
                .starts_with("\\u")
                .then(|| hex4(source, next + 2))
                .flatten()
                .filter(|low| (0xDC00..=0xDFFF).contains(low));
            let Some(low) = low else {
                return Err(invalid_unicode_escape(source, pos, 6));
            };
            let combined = 0x10000 + ((unit - 0xD800) << 10) + (low - 0xDC00);
            let Some(c) = char::from_u32(combined) else {
                return Err(invalid_unicode_escape(source, pos, 12));
            };
            out.push(c);
            Ok(next + 6)
        }
        _ => {
            // Lone low surrogates have no scalar value.
            let Some(c) = char::from_u32(unit) else {
                return Err(invalid_unicode_escape(source, pos, 6));
            };
            out.push(c);
            Ok(body + 4)
        }
    }
}

fn hex4(source: &str, at: usize) -> Option<u32> {
    let digits = source.get(at..at + 4)?;
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    u32::from_str_radix(digits, 16).ok()
}

fn invalid_unicode_escape(source: &str, pos: usize, chars: usize) -> LexError {
    let text: String = source[pos..].chars().take(chars).collect();
    LexError::new(format!("invalid Unicode escape `{text}`"), pos)
}

// ============================================================================
// Block strings
// ============================================================================

fn scan_block_string<'s>(lex: &mut Lexer<'s, Lexeme<'s>>) -> Result<String, LexError> {
    let source = lex.source();
    let mut pos = lex.span().end;
    let mut raw = String::new();

    loop {
        let rest = &source[pos..];
        if rest.starts_with("\"\"\"") {
            pos += 3;
            break;
        }
        if rest.starts_with("\\\"\"\"") {
            raw.push_str("\"\"\"");
            pos += 4;
            continue;
        }
        let Some(c) = rest.chars().next() else {
            return Err(LexError::new("unterminated block string", pos));
        };
        raw.push(c);
        pos += c.len_utf8();
    }

    bump_to(lex, pos);
    Ok(dedent_block_string(&raw))
}

/// Block string value from raw content.
///
/// Strips the smallest indentation found on non-blank lines after the first from every
/// line but the first, drops blank lines at both ends and joins with `\n`.
pub fn dedent_block_string(raw: &str) -> String {
    let lines = split_lines(raw);

    let common_indent = lines
        .iter()
        .skip(1)
        .filter_map(|line| leading_whitespace(line))
        .min()
        .unwrap_or(0);

    let stripped: Vec<&str> = lines
        .iter()
        .copied()
        .enumerate()
        .map(|(i, line)| {
            if i == 0 {
                line
            } else {
                &line[common_indent.min(line.len())..]
            }
        })
        .collect();

    let is_blank = |line: &&str| leading_whitespace(line).is_none();
    let first = stripped.iter().position(|l| !is_blank(l));
    let last = stripped.iter().rposition(|l| !is_blank(l));
    match (first, last) {
        (Some(first), Some(last)) => stripped[first..=last].join("\n"),
        _ => String::new(),
    }
}

/// Splits on `\n`, `\r\n` and lone `\r`.
fn split_lines(raw: &str) -> Vec<&str> {
    let bytes = raw.as_bytes();
    let mut lines = Vec::new();
    let mut start = 0;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\n' => {
                lines.push(&raw[start..i]);
                i += 1;
                start = i;
            }
            b'\r' => {
                lines.push(&raw[start..i]);
                i += if bytes.get(i + 1) == Some(&b'\n') { 2 } else { 1 };
                start = i;
            }
            _ => i += 1,
        }
    }
    lines.push(&raw[start..]);
    lines
}

/// Count of leading spaces and tabs, or `None` if the line has nothing else.
fn leading_whitespace(line: &str) -> Option<usize> {
    line.bytes().position(|b| b != b' ' && b != b'\t')
}
