//! Diagnostics for the front end.
//!
//! This module defines how problems found in the source are described and
//! delivered. It includes:
//!
//! - Diagnostic kinds for the lexical, syntactic and semantic phases
//! - The three severities (message, warning, error)
//! - The `Reporter` sink trait and its console and in-memory implementations
//! - Error formatting and display functionality

pub mod errors;
pub mod reporter;
