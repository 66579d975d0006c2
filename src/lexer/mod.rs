//! Lexical analysis module for the front end.
//!
//! This module contains the lexer (tokenizer) that converts source text
//! into a stream of tokens for the parser. It handles:
//!
//! - Tokenization of source text using ordered regex patterns
//! - Recognition of keywords, identifiers, typed literals, and operators
//! - Token position tracking (line number and line text) for diagnostics
//! - Comments and whitespace handling
//!
//! Lexing never fails: anything it cannot make sense of becomes an
//! `Error` token and scanning continues after it.

pub mod lexer;
pub mod tokens;

#[cfg(test)]
mod tests;
