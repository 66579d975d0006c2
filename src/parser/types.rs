use crate::{
    ast::{context::TypeId, types::BuiltInId},
    errors::errors::ErrorImpl,
    lexer::tokens::TokenKind,
};

use super::parser::{ParseResult, Parser, SyntaxError};

fn builtin_type_id(kind: TokenKind) -> Option<BuiltInId> {
    match kind {
        TokenKind::U8 => Some(BuiltInId::U8),
        TokenKind::U16 => Some(BuiltInId::U16),
        TokenKind::U32 => Some(BuiltInId::U32),
        TokenKind::U64 => Some(BuiltInId::U64),
        TokenKind::U128 => Some(BuiltInId::U128),
        TokenKind::I8 => Some(BuiltInId::I8),
        TokenKind::I16 => Some(BuiltInId::I16),
        TokenKind::I32 => Some(BuiltInId::I32),
        TokenKind::I64 => Some(BuiltInId::I64),
        TokenKind::I128 => Some(BuiltInId::I128),
        TokenKind::F32 => Some(BuiltInId::F32),
        TokenKind::F64 => Some(BuiltInId::F64),
        TokenKind::Bool => Some(BuiltInId::Bool),
        _ => None,
    }
}

/// Parses a type name:
///
/// ```text
/// typename := ["const"] ( builtin | "void" | "PTR" "<" typename ">"
///           | "fn" "(" [typename ("," typename)*] ")" "->" typename )
/// ```
///
/// `const` only applies to built-ins and pointers.
pub fn parse_typename(parser: &mut Parser) -> ParseResult<TypeId> {
    parser.nested(parse_any_typename)
}

fn parse_any_typename(parser: &mut Parser) -> ParseResult<TypeId> {
    let is_const = parser.accept(TokenKind::Const);
    let kind = parser.current_token_kind();

    if let Some(id) = builtin_type_id(kind) {
        parser.advance();
        return Ok(parser.ctx.create_builtin(id, is_const));
    }

    match kind {
        TokenKind::Void => {
            parser.advance();
            Ok(parser.ctx.create_void())
        }
        TokenKind::Ptr => parse_pointer_type(parser, is_const),
        TokenKind::Fn => parse_fn_type(parser),
        TokenKind::Error => {
            parser.advance();
            Err(SyntaxError)
        }
        _ => {
            let token = parser.current_token().clone();
            parser.error(ErrorImpl::ExpectedTypename { token: token.lexeme }, token.span);
            Err(SyntaxError)
        }
    }
}

fn parse_pointer_type(parser: &mut Parser, is_const: bool) -> ParseResult<TypeId> {
    parser.advance();
    parser.expect(TokenKind::Less, "'<'")?;
    let pointee = parse_typename(parser)?;
    parser.expect_closing_angle()?;

    Ok(parser.ctx.create_pointer(is_const, pointee))
}

fn parse_fn_type(parser: &mut Parser) -> ParseResult<TypeId> {
    parser.advance();
    parser.expect(TokenKind::OpenParen, "'('")?;

    let mut params = vec![];
    if !parser.accept(TokenKind::CloseParen) {
        loop {
            params.push(parse_typename(parser)?);
            if parser.accept(TokenKind::Comma) {
                continue;
            }
            parser.expect(TokenKind::CloseParen, "')'")?;
            break;
        }
    }

    parser.expect(TokenKind::Arrow, "'->'")?;
    let return_type = parse_typename(parser)?;

    Ok(parser.ctx.create_fn(return_type, params))
}
