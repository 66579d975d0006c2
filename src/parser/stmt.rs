use log::debug;

use crate::{
    ast::{
        ast::{Expr, ExprKind},
        context::{ExprId, TypeId},
        types::Type,
    },
    errors::errors::ErrorImpl,
    lexer::tokens::{Token, TokenKind},
    Span,
};

use super::{
    expr::{implicit_conversion, parse_expr},
    parser::{ParseResult, Parser, SyntaxError},
    recovery::Recovery,
    types::parse_typename,
};

/// Parses one top-level declaration. Returns `None` when nothing usable was
/// parsed, after recovering.
pub fn parse_declaration(parser: &mut Parser) -> Option<ExprId> {
    let kind = parser.current_token_kind();

    let Some(handler) = parser.get_decl_handler(kind) else {
        let token = parser.current_token().clone();
        if token.is(TokenKind::Error) {
            parser.advance();
        } else {
            parser.error(ErrorImpl::ExpectedDeclaration { token: token.lexeme }, token.span);
        }
        parser.recover(Recovery::Declaration);
        return None;
    };

    match handler(parser) {
        Ok(expr) => Some(expr),
        Err(_) => {
            let recovery = if kind == TokenKind::Var {
                Recovery::Semicolon
            } else {
                Recovery::FnDecl
            };
            parser.recover(recovery);
            None
        }
    }
}

/// Parses one statement of a function body. Syntax errors are recovered
/// from here and leave the sentinel in place of the statement.
pub fn parse_stmt(parser: &mut Parser) -> ExprId {
    let start = parser.current_token().span.clone();

    let result = parser.nested(|parser| match parser.get_stmt_handler(parser.current_token_kind()) {
        Some(handler) => handler(parser),
        None => parse_expression_stmt(parser),
    });

    match result {
        Ok(expr) => expr,
        Err(_) => {
            parser.recover(Recovery::Semicolon);
            let span = start.to(parser.previous_span());
            parser.error_expr(span)
        }
    }
}

/// Whether evaluating the expression does something besides producing a value.
fn has_effect(parser: &Parser, expr: ExprId) -> bool {
    match &parser.ctx.get_expr(expr).kind {
        ExprKind::VarWrite { .. } | ExprKind::FnCall { .. } | ExprKind::Error => true,
        ExprKind::Unary { op, .. } => op.writes_operand(),
        _ => false,
    }
}

pub fn parse_expression_stmt(parser: &mut Parser) -> ParseResult<ExprId> {
    let expr = parse_expr(parser)?;
    parser.expect(TokenKind::Semicolon, "';'")?;

    if !has_effect(parser, expr) {
        let span = parser.ctx.get_expr(expr).span.clone();
        parser.warning(ErrorImpl::UnusedExpressionResult, span);
    }

    Ok(expr)
}

/// `var IDENT [: typename] [= expression];`, global or local depending on
/// where it appears.
pub fn parse_var_decl_stmt(parser: &mut Parser) -> ParseResult<ExprId> {
    let start = parser.advance();
    let name = parser.expect(TokenKind::Identifier, "an identifier")?;

    let declared = if parser.accept(TokenKind::Colon) {
        Some(parse_typename(parser)?)
    } else {
        None
    };

    let init = if parser.accept(TokenKind::Assignment) {
        Some(parse_expr(parser)?)
    } else {
        None
    };

    parser.expect(TokenKind::Semicolon, "';'")?;
    let span = start.span.to(parser.previous_span());

    Ok(declare_variable(parser, &name, declared, init, span))
}

fn declare_variable(
    parser: &mut Parser,
    name: &Token,
    declared: Option<TypeId>,
    init: Option<ExprId>,
    span: Span,
) -> ExprId {
    let mut ty = match (declared, init) {
        (Some(ty), _) => ty,
        (None, Some(init)) => {
            let init_ty = parser.ctx.get_expr(init).ty;
            parser.ctx.with_const(init_ty, false)
        }
        (None, None) => {
            parser.error(ErrorImpl::ExpectedExplicitValue, span.clone());
            parser.ctx.create_error()
        }
    };

    if parser.ctx.get_type(ty).is_void() {
        parser.error(ErrorImpl::VoidVariable { variable: name.lexeme.clone() }, name.span.clone());
        ty = parser.ctx.create_error();
    }

    let init = match (declared, init) {
        (Some(_), Some(init)) => Some(implicit_conversion(parser, init, ty)),
        (_, init) => init,
    };

    let is_global = parser.is_global_scope();
    let decl = parser.ctx.add_expr(Expr::new(
        ExprKind::VarDecl {
            name: name.lexeme.clone(),
            init,
            is_global,
        },
        ty,
        span,
    ));

    let previous = if is_global {
        parser
            .find_global_var(&name.lexeme)
            .or_else(|| parser.find_overloads(&name.lexeme).and_then(|defs| defs.first().copied()))
            .map(|previous| parser.ctx.get_expr(previous).span.clone())
    } else {
        parser
            .find_local_in_scope(&name.lexeme)
            .map(|local| local.span.clone())
    };

    match previous {
        Some(previous) => {
            let error = if is_global && parser.find_overloads(&name.lexeme).is_some() {
                ErrorImpl::NameIsFunction { name: name.lexeme.clone() }
            } else {
                ErrorImpl::VariableAlreadyDeclared { variable: name.lexeme.clone() }
            };
            parser.error(error, name.span.clone());
            parser.message(ErrorImpl::PreviousDeclaration { name: name.lexeme.clone() }, previous);
        }
        None if is_global => parser.add_global_var(&name.lexeme, decl),
        None => {
            let slot = parser.push_local(&name.lexeme, ty, name.span.clone());
            debug!("local variable {:?} in slot {}", name.lexeme, slot);
        }
    }

    decl
}

/// `{ statement* }` in a new local scope.
pub fn parse_scope(parser: &mut Parser) -> ParseResult<ExprId> {
    let open = parser.expect(TokenKind::OpenCurly, "'{'")?;

    parser.with_local_scope(|parser| {
        let mut body = vec![];

        loop {
            match parser.current_token_kind() {
                TokenKind::CloseCurly => {
                    parser.advance();
                    break;
                }
                TokenKind::EOF => {
                    parser.error(ErrorImpl::UnclosedScope, open.span.clone());
                    return Err(SyntaxError);
                }
                _ => {
                    let before = parser.consumed();
                    body.push(parse_stmt(parser));
                    if parser.consumed() == before {
                        parser.advance();
                    }
                }
            }
        }

        let span = open.span.to(parser.previous_span());
        let ty = parser.ctx.create_void();
        Ok(parser.ctx.add_expr(Expr::new(ExprKind::Scope { body }, ty, span)))
    })
}

/// Body of a function or a condition branch: a scope, or `:` followed by a
/// single statement.
pub fn parse_body(parser: &mut Parser) -> ParseResult<ExprId> {
    if !parser.current_token().is(TokenKind::Colon) {
        return parse_scope(parser);
    }

    let colon = parser.advance();
    let stmt = parser.with_local_scope(parse_stmt);
    let span = colon.span.to(parser.previous_span());
    let ty = parser.ctx.create_void();
    Ok(parser
        .ctx
        .add_expr(Expr::new(ExprKind::Scope { body: vec![stmt] }, ty, span)))
}

/// `if cond body (elif cond body)* [else body]`. `elif` branches nest as the
/// `otherwise` branch of the previous condition.
pub fn parse_if_stmt(parser: &mut Parser) -> ParseResult<ExprId> {
    let start = parser.advance();
    parse_condition(parser, start.span)
}

fn parse_condition(parser: &mut Parser, start: Span) -> ParseResult<ExprId> {
    let cond = parse_expr(parser)?;
    check_condition(parser, cond);
    let then = parse_body(parser)?;

    let otherwise = match parser.current_token_kind() {
        TokenKind::Elif => {
            let elif = parser.advance();
            Some(parser.nested(|parser| parse_condition(parser, elif.span))?)
        }
        TokenKind::Else => {
            parser.advance();
            Some(parse_body(parser)?)
        }
        _ => None,
    };

    let span = start.to(parser.previous_span());
    let ty = parser.ctx.create_void();
    Ok(parser.ctx.add_expr(Expr::new(
        ExprKind::Condition { cond, then, otherwise },
        ty,
        span,
    )))
}

fn check_condition(parser: &mut Parser, cond: ExprId) {
    let expr = parser.ctx.get_expr(cond);
    let ty = parser.ctx.get_type(expr.ty);
    if ty.is_error() || ty.is_bool() {
        return;
    }

    let error = ErrorImpl::ConditionNotBool { type_: parser.ctx.type_name(expr.ty) };
    let span = expr.span.clone();
    parser.error(error, span);
}

fn fn_name(parser: &Parser, def: ExprId) -> String {
    match &parser.ctx.get_expr(def).kind {
        ExprKind::FnDef { name, .. } => name.clone(),
        _ => String::new(),
    }
}

fn return_type_of(parser: &Parser, def: ExprId) -> Option<TypeId> {
    match parser.ctx.get_type(parser.ctx.get_expr(def).ty) {
        Type::Function { return_type, .. } => Some(*return_type),
        _ => None,
    }
}

/// `return [expression];`, checked against the function being parsed.
pub fn parse_return_stmt(parser: &mut Parser) -> ParseResult<ExprId> {
    let start = parser.advance();

    let value = if parser.current_token().is(TokenKind::Semicolon) {
        None
    } else {
        Some(parse_expr(parser)?)
    };
    parser.expect(TokenKind::Semicolon, "';'")?;
    let span = start.span.to(parser.previous_span());

    let Some((def, return_type)) = parser
        .current_fn()
        .and_then(|def| return_type_of(parser, def).map(|ty| (def, ty)))
    else {
        parser.error(
            ErrorImpl::UnexpectedTokenDetailed {
                token: start.lexeme,
                message: String::from("return outside of a function"),
            },
            span.clone(),
        );
        return Ok(parser.error_expr(span));
    };

    let function = fn_name(parser, def);
    let ret = parser.ctx.get_type(return_type).clone();

    let value = match value {
        Some(value) if ret.is_void() => {
            if !parser.ctx.get_expr(value).is_error() {
                parser.error(ErrorImpl::UnexpectedReturnValue { function }, span.clone());
            }
            Some(value)
        }
        Some(value) => Some(implicit_conversion(parser, value, return_type)),
        None if !ret.is_void() && !ret.is_error() => {
            let error = ErrorImpl::MissingReturnValue {
                function,
                type_: parser.ctx.type_name(return_type),
            };
            parser.error(error, span.clone());
            None
        }
        None => None,
    };

    let ret = parser
        .ctx
        .add_expr(Expr::new(ExprKind::FnReturn { value }, return_type, span));

    if let ExprKind::FnDef { returns, .. } = &mut parser.ctx.get_expr_mut(def).kind {
        returns.push(ret);
    }

    Ok(ret)
}

struct Prototype {
    name: Token,
    params: Vec<(String, TypeId, Span)>,
    return_type: TypeId,
    fn_ty: TypeId,
}

/// `IDENT ( [IDENT : typename {, IDENT : typename}] ) [-> typename]`
fn parse_prototype(parser: &mut Parser) -> ParseResult<Prototype> {
    let name = parser.expect(TokenKind::Identifier, "a function name")?;
    parser.expect(TokenKind::OpenParen, "'('")?;

    let mut params: Vec<(String, TypeId, Span)> = vec![];
    if !parser.accept(TokenKind::CloseParen) {
        loop {
            let param = parser.expect(TokenKind::Identifier, "a parameter name")?;
            parser.expect(TokenKind::Colon, "':'")?;
            let mut ty = parse_typename(parser)?;

            if params.iter().any(|(other, _, _)| *other == param.lexeme) {
                parser.error(
                    ErrorImpl::DuplicateParameter { parameter: param.lexeme.clone() },
                    param.span.clone(),
                );
            }
            if parser.ctx.get_type(ty).is_void() {
                parser.error(
                    ErrorImpl::VoidVariable { variable: param.lexeme.clone() },
                    param.span.clone(),
                );
                ty = parser.ctx.create_error();
            }
            params.push((param.lexeme, ty, param.span));

            if parser.accept(TokenKind::Comma) {
                continue;
            }
            parser.expect(TokenKind::CloseParen, "')'")?;
            break;
        }
    }

    let return_type = if parser.accept(TokenKind::Arrow) {
        parse_typename(parser)?
    } else {
        parser.ctx.create_void()
    };

    let param_types = params.iter().map(|(_, ty, _)| *ty).collect();
    let fn_ty = parser.ctx.create_fn(return_type, param_types);

    Ok(Prototype {
        name,
        params,
        return_type,
        fn_ty,
    })
}

pub fn parse_fn_decl(parser: &mut Parser) -> ParseResult<ExprId> {
    let start = parser.advance();
    parse_function(parser, start.span, false)
}

/// `extern fn prototype;`
pub fn parse_extern_decl(parser: &mut Parser) -> ParseResult<ExprId> {
    let start = parser.advance();
    parser.expect(TokenKind::Fn, "'fn'")?;
    parse_function(parser, start.span, true)
}

fn parse_function(parser: &mut Parser, start: Span, is_extern: bool) -> ParseResult<ExprId> {
    let proto = parse_prototype(parser)?;

    let has_body = !is_extern
        && matches!(
            parser.current_token_kind(),
            TokenKind::OpenCurly | TokenKind::Colon
        );
    if !has_body {
        parser.expect(TokenKind::Semicolon, "';'")?;
    }

    let span = start.to(parser.previous_span());
    let def = declare_function(parser, &proto, has_body, span.clone());
    if !has_body {
        return Ok(def);
    }

    let body = parser.with_current_fn(def, |parser| {
        parser.with_local_scope(|parser| {
            for (name, ty, span) in &proto.params {
                parser.push_local(name, *ty, span.clone());
            }
            parse_body(parser)
        })
    })?;

    let returns = match &mut parser.ctx.get_expr_mut(def).kind {
        ExprKind::FnDef { body: slot, returns, .. } => {
            *slot = Some(body);
            returns.len()
        }
        _ => 0,
    };

    let ret = parser.ctx.get_type(proto.return_type);
    if returns == 0 && !ret.is_void() && !ret.is_error() {
        parser.warning(ErrorImpl::MissingReturn { function: proto.name.lexeme.clone() }, span);
    }

    Ok(def)
}

fn same_params(parser: &Parser, lhs: TypeId, rhs: TypeId) -> bool {
    match (parser.ctx.get_type(lhs), parser.ctx.get_type(rhs)) {
        (Type::Function { params: a, .. }, Type::Function { params: b, .. }) => {
            a.len() == b.len() && a.iter().zip(b.iter()).all(|(a, b)| parser.ctx.is_equal(*a, *b))
        }
        _ => false,
    }
}

fn new_fn_def(parser: &mut Parser, proto: &Prototype, span: Span) -> ExprId {
    parser.ctx.add_expr(Expr::new(
        ExprKind::FnDef {
            name: proto.name.lexeme.clone(),
            params: proto.params.iter().map(|(name, _, _)| name.clone()).collect(),
            body: None,
            returns: vec![],
        },
        proto.fn_ty,
        span,
    ))
}

/// Adds the function to its overload set, or returns the prototype it
/// supplies a body for. Conflicting declarations are reported and get a
/// definition outside of the overload set, so that their body still gets
/// checked.
fn declare_function(parser: &mut Parser, proto: &Prototype, has_body: bool, span: Span) -> ExprId {
    let name = proto.name.lexeme.as_str();

    if let Some(previous) = parser.find_global_var(name) {
        let previous = parser.ctx.get_expr(previous).span.clone();
        parser.error(ErrorImpl::NameIsVariable { name: String::from(name) }, proto.name.span.clone());
        parser.message(ErrorImpl::PreviousDeclaration { name: String::from(name) }, previous);
        return new_fn_def(parser, proto, span);
    }

    let existing = parser.find_overloads(name).and_then(|defs| {
        defs.iter()
            .copied()
            .find(|def| same_params(parser, parser.ctx.get_expr(*def).ty, proto.fn_ty))
    });

    let Some(previous) = existing else {
        let def = new_fn_def(parser, proto, span);
        parser.add_overload(name, def);
        return def;
    };

    let previous_ty = parser.ctx.get_expr(previous).ty;
    let same_return = match parser.ctx.get_type(previous_ty) {
        Type::Function { return_type, .. } => parser.ctx.is_equal(*return_type, proto.return_type),
        _ => false,
    };

    let param_names: Vec<String> = proto.params.iter().map(|(name, _, _)| name.clone()).collect();
    if let ExprKind::FnDef { body: None, params, .. } = &mut parser.ctx.get_expr_mut(previous).kind {
        if has_body && same_return {
            debug!("body supplied for prototype {:?}", name);
            *params = param_names;
            return previous;
        }
    }

    let previous_span = parser.ctx.get_expr(previous).span.clone();
    parser.error(
        ErrorImpl::FunctionAlreadyDeclared { function: String::from(name) },
        proto.name.span.clone(),
    );
    parser.message(ErrorImpl::PreviousDeclaration { name: String::from(name) }, previous_span);
    new_fn_def(parser, proto, span)
}
