use indoc::indoc;

use super::{error, sexp};

#[test]
fn schema_definition() {
    insta::assert_snapshot!(
        sexp(r#""root" schema @d { query: Q mutation: M }"#),
        @r#"(doc ((schema "root" false ((directive d ())) ((QUERY Q) (MUTATION M)))))"#
    );
}

#[test]
fn schema_extension_with_directives_only() {
    insta::assert_snapshot!(
        sexp("extend schema @d"),
        @"(doc ((schema nil true ((directive d ())) ())))"
    );
}

#[test]
fn schema_needs_directives_or_block() {
    insta::assert_snapshot!(
        error("extend schema"),
        @"expected `{` or directives after `schema`, found end of input at 13..13"
    );
    insta::assert_snapshot!(
        error("schema { }"),
        @"expected at least one operation type, found `}` at 9..10"
    );
}

#[test]
fn schema_operation_types() {
    insta::assert_snapshot!(
        error("schema { foo: Q }"),
        @"unknown operation type, found name `foo` at 9..12"
    );
    insta::assert_snapshot!(
        error("schema { query Q }"),
        @"expected `:`, found name `Q` at 15..16"
    );
}

#[test]
fn object_type() {
    let input = indoc! {r#"
    """
    User record
    """
    type User implements & Node & Entity @key(fields: "id") {
      "the id" id: ID!
      friends(first: Int = 10 @deprecated, after: String): [User!]
    }
    "#};

    insta::assert_snapshot!(
        sexp(input),
        @r#"(doc ((type "User record" false User (Node Entity) ((directive key ((arg fields "id")))) ((field-def "the id" id () (non-null ID) ()) (field-def nil friends ((input-value nil first Int 10 ((directive deprecated ()))) (input-value nil after String nil ())) (list (non-null User)) ())))))"#
    );
}

#[test]
fn object_extension_is_unchecked() {
    insta::assert_snapshot!(
        sexp("extend type T"),
        @"(doc ((type nil true T () () ())))"
    );
}

#[test]
fn empty_field_block_is_rejected() {
    insta::assert_snapshot!(
        error("type T {}"),
        @"expected at least one field, found `}` at 8..9"
    );
    insta::assert_snapshot!(
        error("type T { f(): Int }"),
        @"expected at least one argument definition, found `)` at 11..12"
    );
}

#[test]
fn interface_extension() {
    insta::assert_snapshot!(
        sexp("extend interface Node @d"),
        @"(doc ((interface nil true Node () ((directive d ())) ())))"
    );
    insta::assert_snapshot!(
        error("extend interface Node"),
        @"interface extension `Node` must add interfaces, directives or fields, found end of input at 21..21"
    );
}

#[test]
fn interface_implementing_interfaces() {
    insta::assert_snapshot!(
        sexp("interface Named implements Node { name: String }"),
        @"(doc ((interface nil false Named (Node) () ((field-def nil name () String ())))))"
    );
}

#[test]
fn unions() {
    insta::assert_snapshot!(
        sexp("union U = | A | B union V @d extend union W"),
        @"(doc ((union nil false U () (A B)) (union nil false V ((directive d ())) ()) (union nil true W () ())))"
    );
}

#[test]
fn enums() {
    insta::assert_snapshot!(
        sexp(r#"enum Color { RED "green" GREEN @deprecated }"#),
        @r#"(doc ((enum nil false Color () ((enum-value-def nil RED ()) (enum-value-def "green" GREEN ((directive deprecated ())))))))"#
    );
    insta::assert_snapshot!(
        error("extend enum Color"),
        @"enum extension `Color` must add directives or values, found end of input at 17..17"
    );
}

#[test]
fn input_objects() {
    insta::assert_snapshot!(
        sexp("input Point { x: Float = 0.5, y: Float! }"),
        @"(doc ((input nil false Point () ((input-value nil x Float 0.5 ()) (input-value nil y (non-null Float) nil ())))))"
    );
    insta::assert_snapshot!(
        error("extend input Point"),
        @"input extension `Point` must add directives or fields, found end of input at 18..18"
    );
}

#[test]
fn scalar_extension() {
    insta::assert_snapshot!(
        sexp(r#"extend scalar Date @specifiedBy(url: "https://example.com")"#),
        @r#"(doc ((scalar nil true Date ((directive specifiedBy ((arg url "https://example.com")))))))"#
    );
}

#[test]
fn directive_definition() {
    insta::assert_snapshot!(
        sexp(r#""tags" directive @tag(name: String!) repeatable on | FIELD_DEFINITION | OBJECT"#),
        @r#"(doc ((directive-def "tags" tag ((input-value nil name (non-null String) nil ())) true (FIELD_DEFINITION OBJECT))))"#
    );
}

#[test]
fn every_directive_location() {
    let input = indoc! {r#"
    directive @all on QUERY | MUTATION | SUBSCRIPTION | FIELD | FRAGMENT_DEFINITION
      | FRAGMENT_SPREAD | INLINE_FRAGMENT | VARIABLE_DEFINITION | SCHEMA | SCALAR
      | OBJECT | FIELD_DEFINITION | ARGUMENT_DEFINITION | INTERFACE | UNION | ENUM
      | ENUM_VALUE | INPUT_OBJECT | INPUT_FIELD_DEFINITION
    "#};

    insta::assert_snapshot!(
        sexp(input),
        @"(doc ((directive-def nil all () false (QUERY MUTATION SUBSCRIPTION FIELD FRAGMENT_DEFINITION FRAGMENT_SPREAD INLINE_FRAGMENT VARIABLE_DEFINITION SCHEMA SCALAR OBJECT FIELD_DEFINITION ARGUMENT_DEFINITION INTERFACE UNION ENUM ENUM_VALUE INPUT_OBJECT INPUT_FIELD_DEFINITION))))"
    );
}

#[test]
fn directive_definition_errors() {
    insta::assert_snapshot!(
        error("directive @a on FIELD | NOWHERE"),
        @"unknown directive location, found name `NOWHERE` at 24..31"
    );
    insta::assert_snapshot!(
        error("directive @a on"),
        @"expected a directive location, found end of input at 15..15"
    );
    insta::assert_snapshot!(
        error("extend directive @a on FIELD"),
        @"directive definitions cannot be extended, found name `directive` at 7..16"
    );
}

#[test]
fn definition_tags_differ_from_usage_tags() {
    let source = indoc! {"
    directive @d on ENUM_VALUE | INPUT_FIELD_DEFINITION
    enum E { A @d }
    input I { a: E = A @d }
    "};
    insta::assert_snapshot!(
        sexp(source),
        @"(doc ((directive-def nil d () false (ENUM_VALUE INPUT_FIELD_DEFINITION)) (enum nil false E () ((enum-value-def nil A ((directive d ()))))) (input nil false I () ((input-value nil a E (enum-value A) ((directive d ())))))))"
    );
}
