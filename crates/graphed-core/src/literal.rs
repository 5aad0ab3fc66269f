//! Source forms for string and float literals, shared by the printer and the s-expression dump.

use std::fmt::Write;

/// Appends `value` as a double-quoted string literal.
///
/// Escapes `"`, `\` and the C0/C1 control ranges (`0x00..=0x1F`, `0x7F..=0x9F`);
/// everything else passes through unchanged.
pub fn write_quoted(out: &mut String, value: &str) {
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\u{8}' => out.push_str("\\b"),
            '\t' => out.push_str("\\t"),
            '\n' => out.push_str("\\n"),
            '\u{c}' => out.push_str("\\f"),
            '\r' => out.push_str("\\r"),
            '\u{0}'..='\u{1f}' | '\u{7f}'..='\u{9f}' => {
                write!(out, "\\u{:04X}", c as u32).expect("String write never fails");
            }
            _ => out.push(c),
        }
    }
    out.push('"');
}

pub fn quoted(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    write_quoted(&mut out, value);
    out
}

/// Shortest text that reads back as the same float and always lexes as a float.
///
/// Infinities (from saturated exponents) are written as `1e999`, which reads back
/// as infinity again.
pub fn format_float(value: f64) -> String {
    if value.is_infinite() {
        return if value > 0.0 { "1e999" } else { "-1e999" }.to_owned();
    }
    // `Debug` keeps a `.0` or an exponent on every finite value.
    format!("{value:?}")
}
