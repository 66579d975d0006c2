//! Parser module for building the expression tree.
//!
//! This module contains the parser that transforms the token stream into
//! expression trees allocated in a `Context`. It uses operator precedence
//! climbing for expressions and handles:
//!
//! - Declaration parsing (global variables, functions, extern prototypes)
//! - Statement parsing (local variables, conditions, returns, scopes)
//! - Expression parsing (binary ops, unary ops, conversions, calls)
//! - Type name parsing
//! - Name resolution, overload resolution and type checking
//! - Error reporting and panic-mode recovery
//!
//! Statements, declarations and primary expressions are dispatched through
//! lookup tables keyed by their first token.

pub mod expr;
pub mod lookups;
pub mod parser;
pub mod recovery;
pub mod stmt;
pub mod types;

#[cfg(test)]
mod tests;
