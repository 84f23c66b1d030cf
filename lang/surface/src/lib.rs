#![allow(clippy::style)]

//! PENMAN text: tokens, the tree parser and the formatter.

/// Logos-based lexers for the bracketed and the triple notations.
pub mod lexer;
pub use lexer::*;
/// Tree and triple parsing over an explicit node stack.
pub mod parser;
pub use parser::*;
/// Positioned decode errors.
pub mod err;
pub use err::*;
/// Trees and triples back to text.
pub mod fmt;
pub use fmt::{Formatter, Indent, format, format_triples};
