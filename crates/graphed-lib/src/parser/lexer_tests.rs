use rowan::{TextRange, TextSize};

use super::lexer::{Scanner, Token, TokenKind, dedent_block_string, lex};

/// One token per line with its byte range, or the error.
fn snapshot(input: &str) -> String {
    match lex(input) {
        Ok(tokens) => tokens
            .iter()
            .map(|token| {
                format!(
                    "{:?} {}..{}\n",
                    token.kind,
                    u32::from(token.span.start()),
                    u32::from(token.span.end())
                )
            })
            .collect(),
        Err(err) => format!("error: {err}"),
    }
}

/// Kinds only, EOF included.
fn kinds(input: &str) -> String {
    match lex(input) {
        Ok(tokens) => tokens
            .iter()
            .map(|token| format!("{:?}\n", token.kind))
            .collect(),
        Err(err) => format!("error: {err}"),
    }
}

fn first_kind(input: &str) -> TokenKind<'_> {
    Scanner::new(input).scan().expect("valid token").kind
}

fn error(input: &str) -> String {
    match lex(input) {
        Ok(tokens) => panic!("expected a lexical error, got {} tokens", tokens.len()),
        Err(err) => err.to_string(),
    }
}

// ============================================================================
// Punctuators and ignored input
// ============================================================================

#[test]
fn punctuation() {
    insta::assert_snapshot!(snapshot("! $ & ( ) ... : = @ [ ] { } |"), @r"
    Bang 0..1
    Dollar 2..3
    Amp 4..5
    ParenOpen 6..7
    ParenClose 8..9
    Spread 10..13
    Colon 14..15
    Equals 16..17
    At 18..19
    BracketOpen 20..21
    BracketClose 22..23
    BraceOpen 24..25
    BraceClose 26..27
    Pipe 28..29
    Eof 29..29
    ");
}

#[test]
fn ignored_input() {
    let input = "\u{FEFF}a,\tb\r\n# comment\nc # trailing";
    insta::assert_snapshot!(snapshot(input), @r#"
    Name("a") 3..4
    Name("b") 6..7
    Name("c") 19..20
    Eof 31..31
    "#);
}

#[test]
fn empty_input_is_a_single_eof() {
    insta::assert_snapshot!(snapshot(""), @"Eof 0..0");
    insta::assert_snapshot!(snapshot("  ,,, # only a comment"), @"Eof 22..22");
}

#[test]
fn names() {
    insta::assert_snapshot!(kinds("_ a1 __typename query"), @r#"
    Name("_")
    Name("a1")
    Name("__typename")
    Name("query")
    Eof
    "#);
}

#[test]
fn unexpected_symbol() {
    insta::assert_snapshot!(error("{ a ? }"), @"unexpected symbol `?` (0x3f) at 4");
    insta::assert_snapshot!(error("\\"), @r"unexpected symbol `\` (0x5c) at 0");
    insta::assert_snapshot!(error("é"), @"unexpected symbol `é` (0xe9) at 0");
}

#[test]
fn unfinished_spread() {
    insta::assert_snapshot!(error("."), @"unfinished spread operator at 0");
    insta::assert_snapshot!(error("{ .. }"), @"unfinished spread operator at 2");
}

// ============================================================================
// Numbers
// ============================================================================

#[test]
fn numbers() {
    insta::assert_snapshot!(snapshot("4 4.123 123e4 -1.123e-4 0 -0 1E+2"), @r"
    Int(4) 0..1
    Float(4.123) 2..7
    Float(1230000.0) 8..13
    Float(-0.0001123) 14..23
    Int(0) 24..25
    Int(0) 26..28
    Float(100.0) 29..33
    Eof 33..33
    ");
}

#[test]
fn number_followed_by_punctuation() {
    insta::assert_snapshot!(kinds("[1,2]"), @r"
    BracketOpen
    Int(1)
    Int(2)
    BracketClose
    Eof
    ");
}

#[test]
fn leading_zero_is_rejected() {
    for input in ["00", "01", "01.23", "-01"] {
        let err = lex(input).expect_err(input);
        assert!(
            err.message.contains("unexpected digit after 0"),
            "{input}: {err}"
        );
    }
    insta::assert_snapshot!(error("01"), @"invalid number, unexpected digit after 0: `1` at 1");
}

#[test]
fn number_must_not_run_into_names_or_dots() {
    insta::assert_snapshot!(error("123abc"), @"invalid number, expected digit but got `a` at 3");
    insta::assert_snapshot!(error("1.23.4"), @"invalid number, expected digit but got `.` at 4");
    insta::assert_snapshot!(error("1_234"), @"invalid number, expected digit but got `_` at 1");
    insta::assert_snapshot!(error("0x1F"), @"invalid number, expected digit but got `x` at 1");
}

#[test]
fn incomplete_numbers() {
    insta::assert_snapshot!(error("1."), @"unterminated number at 2");
    insta::assert_snapshot!(error("1e"), @"unterminated number at 2");
    insta::assert_snapshot!(error("-"), @"unterminated number at 1");
    insta::assert_snapshot!(error("1.e5"), @"invalid number, expected digit but got `e` at 2");
    insta::assert_snapshot!(error("-a"), @"invalid number, expected digit but got `a` at 1");
    insta::assert_snapshot!(error("1e+ "), @"invalid number, expected digit but got ` ` at 3");
}

#[test]
fn integer_out_of_range() {
    insta::assert_snapshot!(
        error("99999999999999999999"),
        @"invalid number, integer out of range at 0"
    );
    assert_eq!(first_kind("9223372036854775807"), TokenKind::Int(i64::MAX));
    assert_eq!(first_kind("-9223372036854775808"), TokenKind::Int(i64::MIN));
}

#[test]
fn float_overflow_saturates() {
    assert_eq!(first_kind("1e999"), TokenKind::Float(f64::INFINITY));
    assert_eq!(first_kind("-1e999"), TokenKind::Float(f64::NEG_INFINITY));
}

// ============================================================================
// Strings
// ============================================================================

#[test]
fn simple_strings() {
    insta::assert_snapshot!(snapshot(r#""" "simple" "é😀""#), @r#"
    String("") 0..2
    String("simple") 3..11
    String("é😀") 12..20
    Eof 20..20
    "#);
}

#[test]
fn string_escapes() {
    assert_eq!(
        first_kind(r#""\" \\ \/ \b \f \n \r \t""#),
        TokenKind::String("\" \\ / \u{8} \u{c} \n \r \t".to_owned())
    );
    assert_eq!(
        first_kind(r#""\u0041\u00E9""#),
        TokenKind::String("Aé".to_owned())
    );
}

#[test]
fn braced_and_surrogate_escapes_agree() {
    let braced = first_kind(r#""\u{1F600}""#);
    let pair = first_kind(r#""\uD83D\uDE00""#);
    assert_eq!(braced, TokenKind::String("😀".to_owned()));
    assert_eq!(braced, pair);
    assert_eq!(first_kind(r#""\u{41}""#), TokenKind::String("A".to_owned()));
}

#[test]
fn invalid_unicode_escapes() {
    insta::assert_snapshot!(error(r#""\u{D83D}""#), @r"invalid Unicode escape `\u{D83D}` at 1");
    insta::assert_snapshot!(error(r#""\uD800\uD800""#), @r"invalid Unicode escape `\uD800` at 1");
    insta::assert_snapshot!(error(r#""\uDC00""#), @r"invalid Unicode escape `\uDC00` at 1");
    insta::assert_snapshot!(error(r#""\u{}""#), @r"invalid Unicode escape `\u{}` at 1");
    insta::assert_snapshot!(error(r#""\u{1234567}""#), @r"invalid Unicode escape `\u{1234567}` at 1");
    insta::assert_snapshot!(error(r#""\u{110000}""#), @r"invalid Unicode escape `\u{110000}` at 1");
    insta::assert_snapshot!(error(r#""\uZZZZ""#), @r"invalid Unicode escape `\uZZZZ` at 1");
}

#[test]
fn unterminated_unicode_escapes() {
    insta::assert_snapshot!(error(r#""\u{12"#), @"unterminated Unicode escape at 1");
    insta::assert_snapshot!(error(r#""\u12"#), @"unterminated Unicode escape at 1");
}

/// Compatibility behavior: an unknown escape keeps the character and drops the backslash.
#[test]
fn unknown_escape_is_kept_leniently() {
    assert_eq!(first_kind(r#""\q""#), TokenKind::String("q".to_owned()));
}

#[test]
fn unterminated_strings() {
    insta::assert_snapshot!(error(r#""abc"#), @"unterminated string at 4");
    insta::assert_snapshot!(error("\"a\nb\""), @"unterminated string, newline in non-block string at 2");
    insta::assert_snapshot!(error("\"a\\"), @"unterminated string at 3");
}

// ============================================================================
// Block strings
// ============================================================================

#[test]
fn block_string_keeps_inner_blank_lines() {
    let tokens = lex("\"\"\"abc\n\ndef\"\"\"").expect("valid block string");
    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens[0].kind, TokenKind::String("abc\n\ndef".to_owned()));
    assert_eq!(tokens[1].kind, TokenKind::Eof);
}

#[test]
fn block_string_is_dedented() {
    let input = "\"\"\"\n    Hello,\n      World!\n\n    Yours,\n      GraphQL.\n  \"\"\"";
    assert_eq!(
        first_kind(input),
        TokenKind::String("Hello,\n  World!\n\nYours,\n  GraphQL.".to_owned())
    );
}

#[test]
fn block_string_first_line_is_not_dedented() {
    assert_eq!(
        first_kind("\"\"\"  first\n  second\"\"\""),
        TokenKind::String("  first\nsecond".to_owned())
    );
}

#[test]
fn block_string_escapes() {
    assert_eq!(
        first_kind(r#""""a \""" b""""#),
        TokenKind::String(r#"a """ b"#.to_owned())
    );
    assert_eq!(
        first_kind(r#""""a\nb\u0041""""#),
        TokenKind::String(r"a\nb\u0041".to_owned())
    );
}

#[test]
fn block_string_line_terminators() {
    assert_eq!(
        first_kind("\"\"\"a\r\n  b\r  c\"\"\""),
        TokenKind::String("a\nb\nc".to_owned())
    );
}

#[test]
fn unterminated_block_string() {
    insta::assert_snapshot!(error(r#""""abc"#), @"unterminated block string at 6");
    insta::assert_snapshot!(error(r#""""abc""#), @"unterminated block string at 7");
}

#[test]
fn dedent() {
    assert_eq!(dedent_block_string("   \n  x\n   "), "x");
    assert_eq!(dedent_block_string(""), "");
    assert_eq!(dedent_block_string("\n\n  \n"), "");
    assert_eq!(dedent_block_string("\ta\n\t\tb\n\tc"), "\ta\n\tb\nc");
    assert_eq!(dedent_block_string("a\n    b\n  c"), "a\n  b\nc");
}

// ============================================================================
// Scanner
// ============================================================================

#[test]
fn scanner_keeps_returning_eof() {
    let mut scanner = Scanner::new("a b");
    assert_eq!(scanner.scan().unwrap().kind, TokenKind::Name("a"));

    let rest = scanner.remaining().unwrap();
    let rest: Vec<_> = rest.into_iter().map(|token| token.kind).collect();
    assert_eq!(rest, vec![TokenKind::Name("b"), TokenKind::Eof]);

    assert_eq!(scanner.scan().unwrap().kind, TokenKind::Eof);
    assert_eq!(scanner.scan().unwrap().kind, TokenKind::Eof);
}

#[test]
fn scanner_reset() {
    let mut scanner = Scanner::new("a b");
    scanner.remaining().unwrap();
    scanner.reset();
    assert_eq!(scanner.scan().unwrap().kind, TokenKind::Name("a"));
    assert_eq!(scanner.source(), "a b");
}

#[test]
fn remaining_ends_with_one_eof() {
    let tokens = lex("{ a }").unwrap();
    let eofs = tokens
        .iter()
        .filter(|token| token.kind == TokenKind::Eof)
        .count();
    assert_eq!(eofs, 1);
    assert_eq!(tokens.last().unwrap().kind, TokenKind::Eof);
}

#[test]
fn tokens_stop_after_eof_or_error() {
    assert_eq!(Scanner::new("a").tokens().count(), 2);

    let items: Vec<_> = Scanner::new("a ? b").tokens().collect();
    assert_eq!(items.len(), 2);
    assert!(items[0].is_ok());
    assert_eq!(items[1].as_ref().unwrap_err().offset, 2);
}

#[test]
fn tokens_continue_where_scan_left_off() {
    let mut scanner = Scanner::new("a b c");
    let first: Token<'_> = scanner.scan().unwrap();
    assert_eq!(first.kind, TokenKind::Name("a"));

    let rest: Vec<_> = scanner
        .tokens()
        .map(|token| token.unwrap().kind)
        .collect();
    assert_eq!(
        rest,
        vec![TokenKind::Name("b"), TokenKind::Name("c"), TokenKind::Eof]
    );

    assert_eq!(scanner.scan().unwrap().kind, TokenKind::Eof);
    assert_eq!(scanner.tokens().count(), 1);
}

#[test]
fn token_equality_ignores_spans() {
    let a = Token::new(
        TokenKind::Name("a"),
        TextRange::new(TextSize::from(0), TextSize::from(1)),
    );
    let b = Token::new(
        TokenKind::Name("a"),
        TextRange::new(TextSize::from(5), TextSize::from(6)),
    );
    assert_eq!(a, b);
    assert_ne!(a, Token::new(TokenKind::Name("b"), a.span));
}

#[test]
fn token_display() {
    insta::assert_snapshot!(TokenKind::Name("foo").to_string(), @"name `foo`");
    insta::assert_snapshot!(TokenKind::BraceOpen.to_string(), @"`{`");
    insta::assert_snapshot!(TokenKind::Spread.to_string(), @"`...`");
    insta::assert_snapshot!(TokenKind::Int(4).to_string(), @"int `4`");
    insta::assert_snapshot!(TokenKind::Float(1.5).to_string(), @"float `1.5`");
    insta::assert_snapshot!(TokenKind::String("a\"b".to_owned()).to_string(), @r#"string "a\"b""#);
    insta::assert_snapshot!(TokenKind::Eof.to_string(), @"end of input");
}
