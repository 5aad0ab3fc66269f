mod limits_tests;
mod type_system_tests;

/// S-expression dump of `input`, or the rendered error.
fn sexp(input: &str) -> String {
    match crate::parse_to_sexp(input) {
        Ok(out) => out,
        Err(err) => format!("error: {err}"),
    }
}

/// The error message of a source that must not parse.
fn error(input: &str) -> String {
    match crate::parse(input) {
        Ok(document) => panic!(
            "expected an error, parsed {} definitions",
            document.definitions.len()
        ),
        Err(err) => err.to_string(),
    }
}
