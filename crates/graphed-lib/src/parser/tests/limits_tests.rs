use crate::{DEFAULT_RECURSION_FUEL, Error, Parser};

fn nested_lists(depth: usize) -> String {
    format!("{{ f(a: {}1{}) }}", "[".repeat(depth), "]".repeat(depth))
}

#[test]
fn recursion_limit_on_selection_sets() {
    let err = Parser::new("{a{b{c}}}")
        .with_recursion_fuel(Some(2))
        .parse()
        .unwrap_err();

    assert!(matches!(err, Error::RecursionLimitExceeded { .. }));
    insta::assert_snapshot!(err.to_string(), @"recursion limit exceeded at 5..6");
}

#[test]
fn recursion_limit_counts_every_nesting_kind() {
    let source = "query($a: [[Int]]) { f(o: {k: [1]}) }";

    assert!(Parser::new(source).with_recursion_fuel(Some(3)).parse().is_ok());
    assert!(matches!(
        Parser::new(source).with_recursion_fuel(Some(1)).parse(),
        Err(Error::RecursionLimitExceeded { .. })
    ));
}

#[test]
fn default_recursion_fuel() {
    let shallow = nested_lists(DEFAULT_RECURSION_FUEL as usize - 1);
    assert!(crate::parse(&shallow).is_ok());

    let deep = nested_lists(DEFAULT_RECURSION_FUEL as usize + 10);
    assert!(matches!(
        crate::parse(&deep),
        Err(Error::RecursionLimitExceeded { .. })
    ));
}

#[test]
fn unlimited_recursion_fuel() {
    let source = nested_lists(DEFAULT_RECURSION_FUEL as usize + 10);
    assert!(Parser::new(&source).with_recursion_fuel(None).parse().is_ok());
}

#[test]
fn source_length_cap() {
    let err = Parser::new("{ a }")
        .with_max_source_len(Some(3))
        .parse()
        .unwrap_err();

    assert_eq!(err, Error::SourceTooLarge { len: 5, limit: 3 });
    insta::assert_snapshot!(err.to_string(), @"source too large: 5 bytes, limit is 3");

    assert!(Parser::new("{ a }").with_max_source_len(Some(5)).parse().is_ok());
}

#[test]
fn parsed_document_keeps_its_source() {
    let source = "{ a }";
    let document = crate::parse(source).unwrap();
    assert_eq!(document.source, Some(source));
}
