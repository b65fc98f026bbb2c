//! Grammar document parsers.
//!
//! Each parser reads a grammar document and produces a model [`Grammar`](crate::ir::Grammar).

mod json;

pub use json::{load_grammar, parse_grammar, parse_grammar_str};
