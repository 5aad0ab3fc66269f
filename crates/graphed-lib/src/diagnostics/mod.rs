//! Human-readable rendering of parse errors.
//!
//! Without a source the error renders as a single `error: ...` line. With one, the
//! offending span is underlined in a snippet of the source.

mod printer;

#[cfg(test)]
mod tests;

pub use printer::ErrorPrinter;
