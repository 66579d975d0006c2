//! Unit tests for the lexer module.
//!
//! This module contains tests for tokenization including:
//! - Keywords and identifiers
//! - Typed numeric literals (suffixes, bases, ranges)
//! - Operators and maximal munch
//! - Comments
//! - Error tokens and position tracking

use crate::errors::errors::ErrorImpl;

use super::{
    lexer::{tokenize, Lexer},
    tokens::TokenKind,
};

fn kinds(source: &str) -> Vec<TokenKind> {
    tokenize(source).iter().map(|token| token.kind).collect()
}

#[test]
fn test_tokenize_keywords() {
    let tokens = tokenize("var fn extern return if elif else as const void PTR");

    assert_eq!(tokens[0].kind, TokenKind::Var);
    assert_eq!(tokens[1].kind, TokenKind::Fn);
    assert_eq!(tokens[2].kind, TokenKind::Extern);
    assert_eq!(tokens[3].kind, TokenKind::Return);
    assert_eq!(tokens[4].kind, TokenKind::If);
    assert_eq!(tokens[5].kind, TokenKind::Elif);
    assert_eq!(tokens[6].kind, TokenKind::Else);
    assert_eq!(tokens[7].kind, TokenKind::As);
    assert_eq!(tokens[8].kind, TokenKind::Const);
    assert_eq!(tokens[9].kind, TokenKind::Void);
    assert_eq!(tokens[10].kind, TokenKind::Ptr);
    assert_eq!(tokens[11].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_builtin_type_names() {
    let tokens = tokenize("u8 u16 u32 u64 u128 i8 i16 i32 i64 i128 f32 f64 bool");

    assert_eq!(tokens.len(), 14);
    assert!(tokens[..13].iter().all(|token| token.kind.is_builtin_type()));
    assert_eq!(tokens[8].kind, TokenKind::I64);
}

#[test]
fn test_tokenize_identifiers() {
    let tokens = tokenize("foo bar baz_123 _underscore CamelCase variable");

    assert_eq!(tokens[0].kind, TokenKind::Identifier);
    assert_eq!(tokens[0].lexeme, "foo");
    assert_eq!(tokens[2].lexeme, "baz_123");
    assert_eq!(tokens[3].lexeme, "_underscore");
    assert_eq!(tokens[4].lexeme, "CamelCase");
    // Keywords only match whole words
    assert_eq!(tokens[5].kind, TokenKind::Identifier);
    assert_eq!(tokens[5].lexeme, "variable");
}

#[test]
fn test_tokenize_bool_literals() {
    let tokens = tokenize("true false");

    assert_eq!(tokens[0].kind, TokenKind::BoolLiteral);
    assert_eq!(tokens[0].value, 1);
    assert_eq!(tokens[1].kind, TokenKind::BoolLiteral);
    assert_eq!(tokens[1].value, 0);
}

#[test]
fn test_tokenize_integer_literals() {
    let tokens = tokenize("42 7u8 300u16 5i32 0x1F 0b101 0o17 255u8");

    assert_eq!(tokens[0].kind, TokenKind::I64Literal);
    assert_eq!(tokens[0].value, 42);
    assert_eq!(tokens[1].kind, TokenKind::U8Literal);
    assert_eq!(tokens[1].value, 7);
    assert_eq!(tokens[2].kind, TokenKind::U16Literal);
    assert_eq!(tokens[2].value, 300);
    assert_eq!(tokens[3].kind, TokenKind::I32Literal);
    assert_eq!(tokens[4].kind, TokenKind::I64Literal);
    assert_eq!(tokens[4].value, 31);
    assert_eq!(tokens[5].value, 5);
    assert_eq!(tokens[6].value, 15);
    assert_eq!(tokens[7].kind, TokenKind::U8Literal);
    assert_eq!(tokens[7].value, 255);
}

#[test]
fn test_tokenize_float_literals() {
    let tokens = tokenize("3.14 2.5f32 1e3 10f64");

    assert_eq!(tokens[0].kind, TokenKind::F64Literal);
    assert_eq!(f64::from_bits(tokens[0].value), 3.14);
    assert_eq!(tokens[1].kind, TokenKind::F32Literal);
    assert_eq!(f32::from_bits(tokens[1].value as u32), 2.5);
    assert_eq!(tokens[2].kind, TokenKind::F64Literal);
    assert_eq!(f64::from_bits(tokens[2].value), 1000.0);
    assert_eq!(tokens[3].kind, TokenKind::F64Literal);
    assert_eq!(f64::from_bits(tokens[3].value), 10.0);
}

#[test]
fn test_literal_out_of_range() {
    let mut lexer = Lexer::new("256u8");
    let token = lexer.next_token();

    assert_eq!(token.kind, TokenKind::Error);
    assert_eq!(token.lexeme, "256u8");
    assert_eq!(
        lexer.take_error(),
        Some(ErrorImpl::LiteralOutOfRange {
            token: "256u8".to_string(),
            type_: "u8".to_string()
        })
    );
    assert_eq!(lexer.take_error(), None);
}

#[test]
fn test_malformed_literals() {
    let mut lexer = Lexer::new("12abc 1.5u8 0x10f64");

    assert_eq!(lexer.next_token().kind, TokenKind::Error);
    assert!(matches!(lexer.take_error(), Some(ErrorImpl::InvalidLiteralSuffix { .. })));

    assert_eq!(lexer.next_token().kind, TokenKind::Error);
    assert!(matches!(lexer.take_error(), Some(ErrorImpl::MismatchedLiteralSuffix { .. })));

    // `f` and the digits are hex digits: this is one hex literal
    let token = lexer.next_token();
    assert_eq!(token.kind, TokenKind::I64Literal);
    assert_eq!(token.value, 0x10f64);
}

#[test]
fn test_tokenize_operators() {
    assert_eq!(
        kinds("+ - * / % & | ^ ~ ! < > = , ; : ( ) { }"),
        vec![
            TokenKind::Plus,
            TokenKind::Dash,
            TokenKind::Star,
            TokenKind::Slash,
            TokenKind::Percent,
            TokenKind::Ampersand,
            TokenKind::Pipe,
            TokenKind::Caret,
            TokenKind::Tilde,
            TokenKind::Not,
            TokenKind::Less,
            TokenKind::Greater,
            TokenKind::Assignment,
            TokenKind::Comma,
            TokenKind::Semicolon,
            TokenKind::Colon,
            TokenKind::OpenParen,
            TokenKind::CloseParen,
            TokenKind::OpenCurly,
            TokenKind::CloseCurly,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_maximal_munch() {
    assert_eq!(
        kinds("++ -- == != <= >= << >> && || -> += -= *= /= %= &= |= ^= <<= >>="),
        vec![
            TokenKind::PlusPlus,
            TokenKind::MinusMinus,
            TokenKind::Equals,
            TokenKind::NotEquals,
            TokenKind::LessEquals,
            TokenKind::GreaterEquals,
            TokenKind::LeftShift,
            TokenKind::RightShift,
            TokenKind::And,
            TokenKind::Or,
            TokenKind::Arrow,
            TokenKind::PlusEquals,
            TokenKind::MinusEquals,
            TokenKind::StarEquals,
            TokenKind::SlashEquals,
            TokenKind::PercentEquals,
            TokenKind::AmpersandEquals,
            TokenKind::PipeEquals,
            TokenKind::CaretEquals,
            TokenKind::LeftShiftEquals,
            TokenKind::RightShiftEquals,
            TokenKind::EOF,
        ]
    );

    // Without separating whitespace
    assert_eq!(
        kinds("x+++y"),
        vec![
            TokenKind::Identifier,
            TokenKind::PlusPlus,
            TokenKind::Plus,
            TokenKind::Identifier,
            TokenKind::EOF
        ]
    );
}

#[test]
fn test_lexeme_round_trip() {
    for text in ["var", "x1", "42", "7u8", "2.5f32", "<<=", "++", "!=", "->", "PTR"] {
        let source = format!("{} ", text);
        let token = Lexer::new(&source).next_token();
        assert_eq!(token.lexeme, text);
        assert_ne!(token.kind, TokenKind::Error);
    }
}

#[test]
fn test_tokenize_comments() {
    let tokens = tokenize("a // line comment\n/* block\n comment */ b");

    assert_eq!(tokens.len(), 3);
    assert_eq!(tokens[0].lexeme, "a");
    assert_eq!(tokens[1].lexeme, "b");
    assert_eq!(tokens[1].span.start.line, 3);
}

#[test]
fn test_unterminated_comment() {
    let mut lexer = Lexer::new("a /* never closed");
    lexer.next_token();

    assert_eq!(lexer.next_token().kind, TokenKind::Error);
    assert_eq!(lexer.take_error(), Some(ErrorImpl::UnterminatedComment));
    assert_eq!(lexer.next_token().kind, TokenKind::EOF);
}

#[test]
fn test_unrecognised_character_continues() {
    let mut lexer = Lexer::new("a @ b");

    assert_eq!(lexer.next_token().kind, TokenKind::Identifier);
    let error = lexer.next_token();
    assert_eq!(error.kind, TokenKind::Error);
    assert_eq!(error.lexeme, "@");
    assert_eq!(
        lexer.take_error(),
        Some(ErrorImpl::UnrecognisedToken { token: "@".to_string() })
    );
    let after = lexer.next_token();
    assert_eq!(after.kind, TokenKind::Identifier);
    assert_eq!(after.lexeme, "b");
}

#[test]
fn test_eof_is_sticky() {
    let mut lexer = Lexer::new("x");

    assert_eq!(lexer.next_token().kind, TokenKind::Identifier);
    assert_eq!(lexer.next_token().kind, TokenKind::EOF);
    assert_eq!(lexer.next_token().kind, TokenKind::EOF);
    assert_eq!(lexer.next_token().kind, TokenKind::EOF);
}

#[test]
fn test_nul_terminates_input() {
    assert_eq!(
        kinds("a b\0c d"),
        vec![TokenKind::Identifier, TokenKind::Identifier, TokenKind::EOF]
    );
}

#[test]
fn test_position_tracking() {
    let mut lexer = Lexer::new("var x;\n  foo = 1;");

    lexer.next_token();
    lexer.next_token();
    lexer.next_token();
    assert_eq!(lexer.line_number(), 1);

    let foo = lexer.next_token();
    assert_eq!(foo.span.start.line, 2);
    assert_eq!(foo.span.start.column, 2);
    assert_eq!(foo.span.start.line_text.as_str(), "  foo = 1;");
    assert_eq!(lexer.line_number(), 2);
    assert_eq!(lexer.line_text(), "  foo = 1;");
}
