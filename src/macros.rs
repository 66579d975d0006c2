//! Utility macros for the front end.
//!
//! This module defines helper macros used by the lexer:
//!
//! - `MK_TOKEN!` - Creates a Token instance
//! - `MK_DEFAULT_HANDLER!` - Creates a lexer handler for fixed-text tokens
//!
//! These macros reduce boilerplate in the lexer pattern table.

/// Creates a Token instance.
///
/// # Arguments
///
/// * `$kind` - The TokenKind
/// * `$lexeme` - The matched text
/// * `$value` - The raw literal payload (0 for non-literals)
/// * `$span` - The source span
///
/// # Example
///
/// ```ignore
/// let token = MK_TOKEN!(TokenKind::I64Literal, "42".to_string(), 42, span);
/// ```
#[macro_export]
macro_rules! MK_TOKEN {
    ($kind:expr, $lexeme:expr, $value:expr, $span:expr) => {
        Token {
            kind: $kind,
            lexeme: $lexeme,
            value: $value,
            span: $span,
        }
    };
}

/// Creates a lexer handler for patterns that always produce the same token.
///
/// The generated handler ignores the matched text beyond its length and
/// returns a token of the given kind spanning it.
///
/// # Arguments
///
/// * `$kind` - The TokenKind to create
///
/// # Example
///
/// ```ignore
/// RegexPattern {
///     regex: Regex::new("^\\+").unwrap(),
///     handler: MK_DEFAULT_HANDLER!(TokenKind::Plus),
/// }
/// ```
#[macro_export]
macro_rules! MK_DEFAULT_HANDLER {
    ($kind:expr) => {
        |lexer: &mut Lexer, matched: &str| {
            let span = lexer.span_of(matched.len());
            Some(MK_TOKEN!($kind, String::from(matched), 0, span))
        }
    };
}
