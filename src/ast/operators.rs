//! Unary and binary operators, and their mapping from tokens.

use std::fmt::Display;

use crate::lexer::tokens::TokenKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOperator {
    Negate,
    BoolNot,
    BitNot,
    PreIncrement,
    PreDecrement,
    PostIncrement,
    PostDecrement,
    AddressOf,
    Dereference,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    Sum,
    Sub,
    Mul,
    Div,
    Mod,
    BitAnd,
    BitOr,
    BitXor,
    LeftShift,
    RightShift,
    BoolAnd,
    BoolOr,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
    Equal,
    NotEqual,
}

impl BinaryOperator {
    /// Operators producing a `bool` whatever their operand type.
    pub fn is_comparison(&self) -> bool {
        matches!(
            self,
            BinaryOperator::Less
                | BinaryOperator::LessEqual
                | BinaryOperator::Greater
                | BinaryOperator::GreaterEqual
                | BinaryOperator::Equal
                | BinaryOperator::NotEqual
        )
    }

    pub fn is_bool_logic(&self) -> bool {
        matches!(self, BinaryOperator::BoolAnd | BinaryOperator::BoolOr)
    }
}

impl UnaryOperator {
    /// Increments and decrements write back to their operand.
    pub fn writes_operand(&self) -> bool {
        matches!(
            self,
            UnaryOperator::PreIncrement
                | UnaryOperator::PreDecrement
                | UnaryOperator::PostIncrement
                | UnaryOperator::PostDecrement
        )
    }
}

impl Display for UnaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let symbol = match self {
            UnaryOperator::Negate => "-",
            UnaryOperator::BoolNot => "!",
            UnaryOperator::BitNot => "~",
            UnaryOperator::PreIncrement => "++",
            UnaryOperator::PreDecrement => "--",
            UnaryOperator::PostIncrement => "post++",
            UnaryOperator::PostDecrement => "post--",
            UnaryOperator::AddressOf => "&",
            UnaryOperator::Dereference => "*",
        };
        write!(f, "{}", symbol)
    }
}

impl Display for BinaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let symbol = match self {
            BinaryOperator::Sum => "+",
            BinaryOperator::Sub => "-",
            BinaryOperator::Mul => "*",
            BinaryOperator::Div => "/",
            BinaryOperator::Mod => "%",
            BinaryOperator::BitAnd => "&",
            BinaryOperator::BitOr => "|",
            BinaryOperator::BitXor => "^",
            BinaryOperator::LeftShift => "<<",
            BinaryOperator::RightShift => ">>",
            BinaryOperator::BoolAnd => "&&",
            BinaryOperator::BoolOr => "||",
            BinaryOperator::Less => "<",
            BinaryOperator::LessEqual => "<=",
            BinaryOperator::Greater => ">",
            BinaryOperator::GreaterEqual => ">=",
            BinaryOperator::Equal => "==",
            BinaryOperator::NotEqual => "!=",
        };
        write!(f, "{}", symbol)
    }
}

pub fn token_to_binary_operator(kind: TokenKind) -> Option<BinaryOperator> {
    match kind {
        TokenKind::Plus => Some(BinaryOperator::Sum),
        TokenKind::Dash => Some(BinaryOperator::Sub),
        TokenKind::Star => Some(BinaryOperator::Mul),
        TokenKind::Slash => Some(BinaryOperator::Div),
        TokenKind::Percent => Some(BinaryOperator::Mod),
        TokenKind::Ampersand => Some(BinaryOperator::BitAnd),
        TokenKind::Pipe => Some(BinaryOperator::BitOr),
        TokenKind::Caret => Some(BinaryOperator::BitXor),
        TokenKind::LeftShift => Some(BinaryOperator::LeftShift),
        TokenKind::RightShift => Some(BinaryOperator::RightShift),
        TokenKind::And => Some(BinaryOperator::BoolAnd),
        TokenKind::Or => Some(BinaryOperator::BoolOr),
        TokenKind::Less => Some(BinaryOperator::Less),
        TokenKind::LessEquals => Some(BinaryOperator::LessEqual),
        TokenKind::Greater => Some(BinaryOperator::Greater),
        TokenKind::GreaterEquals => Some(BinaryOperator::GreaterEqual),
        TokenKind::Equals => Some(BinaryOperator::Equal),
        TokenKind::NotEquals => Some(BinaryOperator::NotEqual),
        _ => None,
    }
}

/// Operator applied by a compound assignment (`+=` applies `+`).
/// Plain `=` and non-assignment tokens map to `None`.
pub fn assignment_to_binary_operator(kind: TokenKind) -> Option<BinaryOperator> {
    match kind {
        TokenKind::PlusEquals => Some(BinaryOperator::Sum),
        TokenKind::MinusEquals => Some(BinaryOperator::Sub),
        TokenKind::StarEquals => Some(BinaryOperator::Mul),
        TokenKind::SlashEquals => Some(BinaryOperator::Div),
        TokenKind::PercentEquals => Some(BinaryOperator::Mod),
        TokenKind::AmpersandEquals => Some(BinaryOperator::BitAnd),
        TokenKind::PipeEquals => Some(BinaryOperator::BitOr),
        TokenKind::CaretEquals => Some(BinaryOperator::BitXor),
        TokenKind::LeftShiftEquals => Some(BinaryOperator::LeftShift),
        TokenKind::RightShiftEquals => Some(BinaryOperator::RightShift),
        _ => None,
    }
}

/// `is_post` selects the postfix form of `++` and `--`.
pub fn token_to_unary_operator(kind: TokenKind, is_post: bool) -> Option<UnaryOperator> {
    match (kind, is_post) {
        (TokenKind::PlusPlus, false) => Some(UnaryOperator::PreIncrement),
        (TokenKind::PlusPlus, true) => Some(UnaryOperator::PostIncrement),
        (TokenKind::MinusMinus, false) => Some(UnaryOperator::PreDecrement),
        (TokenKind::MinusMinus, true) => Some(UnaryOperator::PostDecrement),
        (TokenKind::Dash, false) => Some(UnaryOperator::Negate),
        (TokenKind::Not, false) => Some(UnaryOperator::BoolNot),
        (TokenKind::Tilde, false) => Some(UnaryOperator::BitNot),
        (TokenKind::Ampersand, false) => Some(UnaryOperator::AddressOf),
        (TokenKind::Star, false) => Some(UnaryOperator::Dereference),
        _ => None,
    }
}
