use indoc::indoc;

use crate::{Error, Parser, parse};

fn parse_error(source: &str) -> Error {
    parse(source).expect_err("source should not parse")
}

#[test]
fn without_source_renders_one_line() {
    let err = parse_error("{ }");
    insta::assert_snapshot!(
        err.printer().render(),
        @"error: expected at least one selection, found `}` at 2..3"
    );
}

#[test]
fn parse_error_with_source() {
    let source = "{ }";
    let err = parse_error(source);
    insta::assert_snapshot!(err.render(source), @r"
    error: expected at least one selection, found `}`
      |
    1 | { }
      |   ^
    ");
}

#[test]
fn printer_with_path() {
    let source = "{ }";
    let err = parse_error(source);
    let result = err.printer().source(source).path("query.graphql").render();
    insta::assert_snapshot!(result, @r"
    error: expected at least one selection, found `}`
     --> query.graphql:1:3
      |
    1 | { }
      |   ^
    ");
}

#[test]
fn lexical_error_is_widened_to_one_character() {
    let source = "{ a(b: 01) }";
    let err = parse_error(source);
    assert!(err.span().is_empty());
    insta::assert_snapshot!(err.render(source), @r"
    error: invalid number, unexpected digit after 0: `1`
      |
    1 | { a(b: 01) }
      |         ^
    ");
}

#[test]
fn lexical_error_at_multibyte_character() {
    let source = "{ é }";
    let err = parse_error(source);
    assert_eq!(usize::from(err.span().start()), 2);
    insta::assert_snapshot!(err.render(source), @r"
    error: unexpected symbol `é` (0xe9)
      |
    1 | { é }
      |   ^
    ");
}

#[test]
fn lexical_error_at_end_of_input() {
    let source = "{ a(b: \"x";
    let err = parse_error(source);
    let rendered = err.render(source);
    assert!(rendered.starts_with("error: unterminated string"));
}

#[test]
fn only_the_offending_line_is_shown() {
    let source = indoc! {r#"
    query {
      a(x: )
    }
    "#};
    let err = parse_error(source);
    insta::assert_snapshot!(err.render(source), @r"
    error: expected a value, found `)`
      |
    2 |   a(x: )
      |        ^
    ");
}

#[test]
fn recursion_limit_points_at_the_nested_token() {
    let source = "{a{b{c}}}";
    let err = Parser::new(source)
        .with_recursion_fuel(Some(2))
        .parse()
        .unwrap_err();
    insta::assert_snapshot!(err.render(source), @r"
    error: recursion limit exceeded
      |
    1 | {a{b{c}}}
      |      ^
    ");
}

#[test]
fn source_too_large_has_no_snippet() {
    let source = "{ a }";
    let err = Parser::new(source)
        .with_max_source_len(Some(3))
        .parse()
        .unwrap_err();
    insta::assert_snapshot!(err.render(source), @"error: source too large: 5 bytes, limit is 3");
}

#[test]
fn printer_colored() {
    let source = "{ }";
    let err = parse_error(source);
    let result = err.printer().source(source).colored(true).render();
    assert!(result.contains("expected at least one selection"));
    assert!(result.contains('\x1b'));
}

#[test]
fn format_into_existing_buffer() {
    let source = "{ }";
    let err = parse_error(source);
    let mut out = String::from(">> ");
    err.printer().format(&mut out).unwrap();
    insta::assert_snapshot!(out, @">> error: expected at least one selection, found `}` at 2..3");
}
