//! Frontend
//!
//! Source text to resolved expression trees: lexer, parser, reference
//! resolution, simplification, and the library that holds named definitions.

pub mod lexer;
pub mod library;
pub mod parser;

pub use library::Library;
