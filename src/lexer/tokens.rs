use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

use crate::Span;

lazy_static! {
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("var", TokenKind::Var);
        map.insert("fn", TokenKind::Fn);
        map.insert("extern", TokenKind::Extern);
        map.insert("return", TokenKind::Return);
        map.insert("if", TokenKind::If);
        map.insert("elif", TokenKind::Elif);
        map.insert("else", TokenKind::Else);
        map.insert("as", TokenKind::As);
        map.insert("const", TokenKind::Const);
        map.insert("void", TokenKind::Void);
        map.insert("PTR", TokenKind::Ptr);
        map.insert("true", TokenKind::BoolLiteral);
        map.insert("false", TokenKind::BoolLiteral);
        map.insert("u8", TokenKind::U8);
        map.insert("u16", TokenKind::U16);
        map.insert("u32", TokenKind::U32);
        map.insert("u64", TokenKind::U64);
        map.insert("u128", TokenKind::U128);
        map.insert("i8", TokenKind::I8);
        map.insert("i16", TokenKind::I16);
        map.insert("i32", TokenKind::I32);
        map.insert("i64", TokenKind::I64);
        map.insert("i128", TokenKind::I128);
        map.insert("f32", TokenKind::F32);
        map.insert("f64", TokenKind::F64);
        map.insert("bool", TokenKind::Bool);
        map
    };
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    EOF,
    /// Unrecognised character, malformed literal or unterminated comment
    Error,
    Identifier,

    // Literals
    BoolLiteral,
    U8Literal,
    U16Literal,
    U32Literal,
    U64Literal,
    U128Literal,
    I8Literal,
    I16Literal,
    I32Literal,
    I64Literal,
    I128Literal,
    F32Literal,
    F64Literal,

    OpenParen,
    CloseParen,
    OpenCurly,
    CloseCurly,
    Comma,
    Semicolon,
    Colon,
    Arrow,

    Assignment, // =
    Equals,     // ==
    Not,        // !
    NotEquals,  // !=

    Less,
    LessEquals,
    Greater,
    GreaterEquals,

    Or,
    And,

    PlusPlus,
    MinusMinus,
    PlusEquals,
    MinusEquals,
    StarEquals,
    SlashEquals,
    PercentEquals,
    AmpersandEquals,
    PipeEquals,
    CaretEquals,
    LeftShiftEquals,
    RightShiftEquals,

    Plus,
    Dash,
    Slash,
    Star,
    Percent,
    Ampersand,
    Pipe,
    Caret,
    Tilde,
    LeftShift,
    RightShift,

    // Reserved
    Var,
    Fn,
    Extern,
    Return,
    If,
    Elif,
    Else,
    As,
    Const,
    Void,
    Ptr,
    U8,
    U16,
    U32,
    U64,
    U128,
    I8,
    I16,
    I32,
    I64,
    I128,
    F32,
    F64,
    Bool,
}

impl TokenKind {
    pub fn is_literal(&self) -> bool {
        matches!(
            self,
            TokenKind::BoolLiteral
                | TokenKind::U8Literal
                | TokenKind::U16Literal
                | TokenKind::U32Literal
                | TokenKind::U64Literal
                | TokenKind::U128Literal
                | TokenKind::I8Literal
                | TokenKind::I16Literal
                | TokenKind::I32Literal
                | TokenKind::I64Literal
                | TokenKind::I128Literal
                | TokenKind::F32Literal
                | TokenKind::F64Literal
        )
    }

    /// Built-in scalar type keywords (`i64`, `bool`, ...)
    pub fn is_builtin_type(&self) -> bool {
        matches!(
            self,
            TokenKind::U8
                | TokenKind::U16
                | TokenKind::U32
                | TokenKind::U64
                | TokenKind::U128
                | TokenKind::I8
                | TokenKind::I16
                | TokenKind::I32
                | TokenKind::I64
                | TokenKind::I128
                | TokenKind::F32
                | TokenKind::F64
                | TokenKind::Bool
        )
    }

    pub fn is_assignment(&self) -> bool {
        matches!(
            self,
            TokenKind::Assignment
                | TokenKind::PlusEquals
                | TokenKind::MinusEquals
                | TokenKind::StarEquals
                | TokenKind::SlashEquals
                | TokenKind::PercentEquals
                | TokenKind::AmpersandEquals
                | TokenKind::PipeEquals
                | TokenKind::CaretEquals
                | TokenKind::LeftShiftEquals
                | TokenKind::RightShiftEquals
        )
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    /// Raw 64-bit payload of literal tokens (IEEE bits for floats)
    pub value: u64,
    pub span: Span,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Token {{\nkind: {},\nlexeme: {}}}", self.kind, self.lexeme)
    }
}

impl Token {
    fn is_one_of_many(&self, tokens: &[TokenKind]) -> bool {
        tokens.contains(&self.kind)
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }

    pub fn debug(&self) {
        if self.kind.is_literal()
            || self.is_one_of_many(&[TokenKind::Identifier, TokenKind::Error])
        {
            println!("{} ({})", self.kind, self.lexeme);
        } else {
            println!("{} ()", self.kind);
        }
    }
}
