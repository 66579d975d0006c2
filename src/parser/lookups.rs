use std::collections::HashMap;

use lazy_static::lazy_static;

use crate::{ast::context::ExprId, lexer::tokens::TokenKind};

use super::{
    expr::*,
    parser::{ParseResult, Parser},
    stmt::*,
};

/// Rank of tokens that are not binary operators. Ends every precedence climb.
pub const TERMINATOR_PRECEDENCE: u8 = 255;

lazy_static! {
    // Smaller binds tighter
    static ref PRECEDENCE_LOOKUP: HashMap<TokenKind, u8> = {
        let mut map = HashMap::new();
        map.insert(TokenKind::As, 2);

        map.insert(TokenKind::Star, 3);
        map.insert(TokenKind::Slash, 3);
        map.insert(TokenKind::Percent, 3);

        map.insert(TokenKind::Plus, 4);
        map.insert(TokenKind::Dash, 4);

        map.insert(TokenKind::LeftShift, 5);
        map.insert(TokenKind::RightShift, 5);

        map.insert(TokenKind::Less, 6);
        map.insert(TokenKind::LessEquals, 6);
        map.insert(TokenKind::Greater, 6);
        map.insert(TokenKind::GreaterEquals, 6);

        map.insert(TokenKind::Equals, 7);
        map.insert(TokenKind::NotEquals, 7);

        map.insert(TokenKind::Ampersand, 8);
        map.insert(TokenKind::Caret, 9);
        map.insert(TokenKind::Pipe, 10);
        map.insert(TokenKind::And, 11);
        map.insert(TokenKind::Or, 12);

        // Right associative
        map.insert(TokenKind::Assignment, 14);
        map.insert(TokenKind::PlusEquals, 14);
        map.insert(TokenKind::MinusEquals, 14);
        map.insert(TokenKind::StarEquals, 14);
        map.insert(TokenKind::SlashEquals, 14);
        map.insert(TokenKind::PercentEquals, 14);
        map.insert(TokenKind::AmpersandEquals, 14);
        map.insert(TokenKind::PipeEquals, 14);
        map.insert(TokenKind::CaretEquals, 14);
        map.insert(TokenKind::LeftShiftEquals, 14);
        map.insert(TokenKind::RightShiftEquals, 14);
        map
    };
}

/// Precedence of `kind` as a binary operator. Defined for every token kind.
pub fn get_op_precedence(kind: TokenKind) -> u8 {
    PRECEDENCE_LOOKUP
        .get(&kind)
        .copied()
        .unwrap_or(TERMINATOR_PRECEDENCE)
}

pub type StmtHandler = fn(&mut Parser<'_>) -> ParseResult<ExprId>;
pub type DeclHandler = fn(&mut Parser<'_>) -> ParseResult<ExprId>;
pub type NUDHandler = fn(&mut Parser<'_>) -> ParseResult<ExprId>;

pub fn create_token_lookups(parser: &mut Parser) {
    // Literals and symbols
    parser.nud(TokenKind::BoolLiteral, parse_literal_expr);
    parser.nud(TokenKind::U8Literal, parse_literal_expr);
    parser.nud(TokenKind::U16Literal, parse_literal_expr);
    parser.nud(TokenKind::U32Literal, parse_literal_expr);
    parser.nud(TokenKind::U64Literal, parse_literal_expr);
    parser.nud(TokenKind::U128Literal, parse_literal_expr);
    parser.nud(TokenKind::I8Literal, parse_literal_expr);
    parser.nud(TokenKind::I16Literal, parse_literal_expr);
    parser.nud(TokenKind::I32Literal, parse_literal_expr);
    parser.nud(TokenKind::I64Literal, parse_literal_expr);
    parser.nud(TokenKind::I128Literal, parse_literal_expr);
    parser.nud(TokenKind::F32Literal, parse_literal_expr);
    parser.nud(TokenKind::F64Literal, parse_literal_expr);
    parser.nud(TokenKind::Identifier, parse_identifier_expr);
    parser.nud(TokenKind::OpenParen, parse_grouping_expr);
    parser.nud(TokenKind::Error, parse_error_token_expr);

    // Prefix operators
    parser.nud(TokenKind::Dash, parse_unary_expr);
    parser.nud(TokenKind::Not, parse_unary_expr);
    parser.nud(TokenKind::Tilde, parse_unary_expr);
    parser.nud(TokenKind::PlusPlus, parse_unary_expr);
    parser.nud(TokenKind::MinusMinus, parse_unary_expr);
    parser.nud(TokenKind::Ampersand, parse_unary_expr);
    parser.nud(TokenKind::Star, parse_unary_expr);

    // Statements
    parser.stmt(TokenKind::Var, parse_var_decl_stmt);
    parser.stmt(TokenKind::If, parse_if_stmt);
    parser.stmt(TokenKind::Return, parse_return_stmt);
    parser.stmt(TokenKind::OpenCurly, parse_scope);

    // Declarations
    parser.decl(TokenKind::Var, parse_var_decl_stmt);
    parser.decl(TokenKind::Fn, parse_fn_decl);
    parser.decl(TokenKind::Extern, parse_extern_decl);
}

// Lookup tables inside parser struct, so it's easier
pub type StmtLookup = HashMap<TokenKind, StmtHandler>;
pub type DeclLookup = HashMap<TokenKind, DeclHandler>;
pub type NUDLookup = HashMap<TokenKind, NUDHandler>;
