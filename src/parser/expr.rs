use crate::{
    ast::{
        ast::{Expr, ExprKind},
        context::{ExprId, TypeId},
        operators::{
            assignment_to_binary_operator, token_to_binary_operator, token_to_unary_operator,
            BinaryOperator, UnaryOperator,
        },
        types::{BuiltInId, Type},
    },
    errors::errors::ErrorImpl,
    lexer::tokens::{Token, TokenKind},
    Span,
};

use super::{
    lookups::{get_op_precedence, TERMINATOR_PRECEDENCE},
    parser::{ParseResult, Parser, SyntaxError},
    recovery::Recovery,
    types::parse_typename,
};

fn span_of(parser: &Parser, id: ExprId) -> Span {
    parser.ctx.get_expr(id).span.clone()
}

fn type_of(parser: &Parser, id: ExprId) -> TypeId {
    parser.ctx.get_expr(id).ty
}

fn is_error(parser: &Parser, id: ExprId) -> bool {
    parser.ctx.get_expr(id).is_error() || parser.ctx.get_type(type_of(parser, id)).is_error()
}

pub fn parse_expr(parser: &mut Parser) -> ParseResult<ExprId> {
    parse_binary(parser, TERMINATOR_PRECEDENCE)
}

/// Precedence climbing: parses operators ranked below `limit`.
pub fn parse_binary(parser: &mut Parser, limit: u8) -> ParseResult<ExprId> {
    parser.nested(|parser| parse_binary_operators(parser, limit))
}

fn parse_binary_operators(parser: &mut Parser, limit: u8) -> ParseResult<ExprId> {
    let mut lhs = parse_primary(parser)?;

    loop {
        let kind = parser.current_token_kind();
        let precedence = get_op_precedence(kind);
        if precedence >= limit {
            return Ok(lhs);
        }

        let operator = parser.advance();

        if kind == TokenKind::As {
            let target = parse_typename(parser)?;
            let span = span_of(parser, lhs).to(parser.previous_span());
            lhs = explicit_conversion(parser, lhs, target, span);
        } else if kind.is_assignment() {
            let rhs = parse_binary(parser, precedence + 1)?;
            lhs = build_assignment(parser, lhs, &operator, rhs);
        } else {
            let rhs = parse_binary(parser, precedence)?;
            let span = span_of(parser, lhs).to(&span_of(parser, rhs));
            lhs = match token_to_binary_operator(kind) {
                Some(op) => build_binary(parser, lhs, op, rhs, span),
                None => {
                    parser.error(ErrorImpl::UnexpectedToken { token: operator.lexeme }, operator.span);
                    parser.error_expr(span)
                }
            };
        }
    }
}

pub fn parse_primary(parser: &mut Parser) -> ParseResult<ExprId> {
    let kind = parser.current_token_kind();

    match parser.get_nud_handler(kind) {
        Some(handler) => handler(parser),
        None => {
            let token = parser.current_token().clone();
            parser.error(
                ErrorImpl::UnexpectedTokenDetailed {
                    token: token.lexeme,
                    message: String::from("expected an expression"),
                },
                token.span,
            );
            Err(SyntaxError)
        }
    }
}

fn literal_type(kind: TokenKind) -> Option<BuiltInId> {
    match kind {
        TokenKind::BoolLiteral => Some(BuiltInId::Bool),
        TokenKind::U8Literal => Some(BuiltInId::U8),
        TokenKind::U16Literal => Some(BuiltInId::U16),
        TokenKind::U32Literal => Some(BuiltInId::U32),
        TokenKind::U64Literal => Some(BuiltInId::U64),
        TokenKind::U128Literal => Some(BuiltInId::U128),
        TokenKind::I8Literal => Some(BuiltInId::I8),
        TokenKind::I16Literal => Some(BuiltInId::I16),
        TokenKind::I32Literal => Some(BuiltInId::I32),
        TokenKind::I64Literal => Some(BuiltInId::I64),
        TokenKind::I128Literal => Some(BuiltInId::I128),
        TokenKind::F32Literal => Some(BuiltInId::F32),
        TokenKind::F64Literal => Some(BuiltInId::F64),
        _ => None,
    }
}

pub fn parse_literal_expr(parser: &mut Parser) -> ParseResult<ExprId> {
    let token = parser.advance();
    let Some(id) = literal_type(token.kind) else {
        parser.error(ErrorImpl::UnexpectedToken { token: token.lexeme }, token.span);
        return Err(SyntaxError);
    };

    let ty = parser.ctx.create_builtin(id, false);
    Ok(parser
        .ctx
        .add_expr(Expr::new(ExprKind::Literal { value: token.value }, ty, token.span)))
}

/// Error tokens stand for an expression: the lexical error is reported when
/// the token is consumed and the sentinel takes its place.
pub fn parse_error_token_expr(parser: &mut Parser) -> ParseResult<ExprId> {
    let token = parser.advance();
    Ok(parser.error_expr(token.span))
}

/// Expects the `)` matching the `(` at `open`.
fn expect_close_paren(parser: &mut Parser, open: &Span) -> ParseResult<()> {
    match parser.current_token_kind() {
        TokenKind::CloseParen => {
            parser.advance();
            Ok(())
        }
        TokenKind::Semicolon | TokenKind::CloseCurly | TokenKind::EOF => {
            parser.error(ErrorImpl::UnclosedParenthesis, open.clone());
            Err(SyntaxError)
        }
        _ => parser.expect(TokenKind::CloseParen, "')'").map(|_| ()),
    }
}

pub fn parse_grouping_expr(parser: &mut Parser) -> ParseResult<ExprId> {
    let open = parser.advance();

    let inner = parse_expr(parser).and_then(|expr| {
        expect_close_paren(parser, &open.span)?;
        Ok(expr)
    });

    match inner {
        Ok(expr) => Ok(expr),
        Err(_) => {
            parser.recover(Recovery::RightParen);
            let span = open.span.to(parser.previous_span());
            Ok(parser.error_expr(span))
        }
    }
}

pub fn parse_unary_expr(parser: &mut Parser) -> ParseResult<ExprId> {
    let operator = parser.advance();
    let child = parser.nested(parse_primary)?;
    let span = operator.span.to(&span_of(parser, child));

    match token_to_unary_operator(operator.kind, false) {
        Some(op) => Ok(build_unary(parser, op, child, span)),
        None => {
            parser.error(ErrorImpl::UnexpectedToken { token: operator.lexeme }, operator.span);
            Ok(parser.error_expr(span))
        }
    }
}

/// Variable read, post increment/decrement or function call.
pub fn parse_identifier_expr(parser: &mut Parser) -> ParseResult<ExprId> {
    let name = parser.advance();

    if parser.current_token().is(TokenKind::OpenParen) {
        return parse_function_call(parser, name);
    }

    let variable = resolve_variable(parser, &name);

    match parser.current_token_kind() {
        kind @ (TokenKind::PlusPlus | TokenKind::MinusMinus) => {
            let operator = parser.advance();
            let span = name.span.to(&operator.span);
            match token_to_unary_operator(kind, true) {
                Some(op) => Ok(build_unary(parser, op, variable, span)),
                None => Ok(parser.error_expr(span)),
            }
        }
        _ => Ok(variable),
    }
}

fn resolve_variable(parser: &mut Parser, name: &Token) -> ExprId {
    if let Some(variable) = parser.find_variable(&name.lexeme) {
        return parser.ctx.add_expr(Expr::new(
            ExprKind::VarRead {
                name: name.lexeme.clone(),
                local_id: variable.local_id,
            },
            variable.ty,
            name.span.clone(),
        ));
    }

    let error = if parser.find_overloads(&name.lexeme).is_some() {
        ErrorImpl::NameIsFunction { name: name.lexeme.clone() }
    } else {
        ErrorImpl::VariableNotDeclared { variable: name.lexeme.clone() }
    };
    parser.error(error, name.span.clone());
    parser.error_expr(name.span.clone())
}

/// Parses the argument list following `name` and resolves the call.
pub fn parse_function_call(parser: &mut Parser, name: Token) -> ParseResult<ExprId> {
    let open = parser.advance();
    let mut args = vec![];

    if !parser.accept(TokenKind::CloseParen) {
        loop {
            let arg = parse_expr(parser).and_then(|arg| {
                if !parser.current_token().is(TokenKind::Comma) {
                    expect_close_paren(parser, &open.span)?;
                }
                Ok(arg)
            });

            match arg {
                Ok(arg) => args.push(arg),
                Err(_) => {
                    parser.recover(Recovery::RightParen);
                    let span = name.span.to(parser.previous_span());
                    return Ok(parser.error_expr(span));
                }
            }

            if !parser.accept(TokenKind::Comma) {
                break;
            }
        }
    }

    let span = name.span.to(parser.previous_span());
    Ok(validate_fn_call(parser, &name.lexeme, args, span))
}

fn fn_signature(parser: &Parser, def: ExprId) -> Option<(TypeId, Vec<TypeId>)> {
    match parser.ctx.get_type(type_of(parser, def)) {
        Type::Function { return_type, params } => Some((*return_type, params.clone())),
        _ => None,
    }
}

fn report_candidates(parser: &mut Parser, name: &str, candidates: &[ExprId]) {
    for def in candidates {
        let signature = format!("{}: {}", name, parser.ctx.type_name(type_of(parser, *def)));
        let span = span_of(parser, *def);
        parser.message(ErrorImpl::CandidateOverload { signature }, span);
    }
}

/// Resolves the call of `name` with `args` against its overload set and
/// builds the call, converting the arguments to the parameter types.
pub fn validate_fn_call(parser: &mut Parser, name: &str, args: Vec<ExprId>, span: Span) -> ExprId {
    let Some(overloads) = parser.find_overloads(name).cloned() else {
        let error = if parser.find_variable(name).is_some() {
            ErrorImpl::NameIsVariable { name: String::from(name) }
        } else {
            ErrorImpl::FunctionNotDeclared { function: String::from(name) }
        };
        parser.error(error, span.clone());
        return parser.error_expr(span);
    };

    if args.iter().any(|arg| is_error(parser, *arg)) {
        return parser.error_expr(span);
    }

    let callee = if overloads.len() == 1 {
        check_single_overload(parser, name, overloads[0], &args)
    } else {
        select_overload(parser, name, &overloads, &args, &span)
    };

    let Some((callee, (return_type, params))) =
        callee.and_then(|def| fn_signature(parser, def).map(|signature| (def, signature)))
    else {
        return parser.error_expr(span);
    };

    let args = args
        .into_iter()
        .zip(params)
        .map(|(arg, param)| implicit_conversion(parser, arg, param))
        .collect();

    parser
        .ctx
        .add_expr(Expr::new(ExprKind::FnCall { callee, args }, return_type, span))
}

/// With a single overload, mismatches are reported one by one.
fn check_single_overload(parser: &mut Parser, name: &str, def: ExprId, args: &[ExprId]) -> Option<ExprId> {
    let (_, params) = fn_signature(parser, def)?;
    let call_span = match (args.first(), args.last()) {
        (Some(first), Some(last)) => span_of(parser, *first).to(&span_of(parser, *last)),
        _ => parser.previous_span().clone(),
    };

    if args.len() != params.len() {
        let (expected, received) = (params.len(), args.len());
        let error = if received > expected {
            ErrorImpl::UnexpectedArguments { function: String::from(name), expected, received }
        } else {
            ErrorImpl::MissingArguments { function: String::from(name), expected, received }
        };
        parser.error(error, call_span);
        report_candidates(parser, name, &[def]);
        return None;
    }

    let mut matches = true;
    for (index, (arg, param)) in args.iter().zip(params.iter()).enumerate() {
        let arg_ty = type_of(parser, *arg);
        if !parser.ctx.is_convertible(arg_ty, *param) {
            let error = ErrorImpl::ArgumentTypeMatchError {
                index: index + 1,
                expected: parser.ctx.type_name(*param),
                received: parser.ctx.type_name(arg_ty),
            };
            let span = span_of(parser, *arg);
            parser.error(error, span);
            matches = false;
        }
    }

    matches.then_some(def)
}

/// Ranks the overloads taking as many parameters as there are arguments:
/// exact matches first, then matches ignoring const, then matches through
/// conversions. The best rank must hold a single candidate.
fn select_overload(
    parser: &mut Parser,
    name: &str,
    overloads: &[ExprId],
    args: &[ExprId],
    span: &Span,
) -> Option<ExprId> {
    let arg_types: Vec<TypeId> = args.iter().map(|arg| type_of(parser, *arg)).collect();
    let candidates: Vec<(ExprId, Vec<TypeId>)> = overloads
        .iter()
        .filter_map(|def| fn_signature(parser, *def).map(|(_, params)| (*def, params)))
        .filter(|(_, params)| params.len() == args.len())
        .collect();

    let ctx = &parser.ctx;
    let ranks: [&dyn Fn(TypeId, TypeId) -> bool; 3] = [
        &|arg: TypeId, param: TypeId| ctx.is_equal_with_const(arg, param),
        &|arg: TypeId, param: TypeId| ctx.is_equal(arg, param),
        &|arg: TypeId, param: TypeId| ctx.is_convertible(arg, param),
    ];

    let mut tied = vec![];
    for rank in ranks {
        let matching: Vec<ExprId> = candidates
            .iter()
            .filter(|(_, params)| arg_types.iter().zip(params).all(|(arg, param)| rank(*arg, *param)))
            .map(|(def, _)| *def)
            .collect();

        if matching.len() == 1 {
            return Some(matching[0]);
        }
        if matching.len() > 1 {
            tied = matching;
            break;
        }
    }

    if tied.is_empty() {
        let arguments = arg_types
            .iter()
            .map(|ty| parser.ctx.type_name(*ty))
            .collect::<Vec<_>>()
            .join(", ");
        parser.error(
            ErrorImpl::NoMatchingOverload { function: String::from(name), arguments },
            span.clone(),
        );
        report_candidates(parser, name, overloads);
    } else {
        parser.error(ErrorImpl::AmbiguousCall { function: String::from(name) }, span.clone());
        report_candidates(parser, name, &tied);
    }
    None
}

enum Numeric {
    Int(i128),
    Float(f64),
}

fn decode_literal(value: u64, id: BuiltInId) -> Numeric {
    match id {
        BuiltInId::F32 => Numeric::Float(f32::from_bits(value as u32) as f64),
        BuiltInId::F64 => Numeric::Float(f64::from_bits(value)),
        id if id.is_signed() => Numeric::Int(value as i64 as i128),
        _ => Numeric::Int(value as i128),
    }
}

/// Raw payload of a literal converted from one built-in type to another.
pub fn convert_literal_value(value: u64, from: BuiltInId, to: BuiltInId) -> u64 {
    let int = match decode_literal(value, from) {
        Numeric::Float(float) => match to {
            BuiltInId::F32 => return (float as f32).to_bits() as u64,
            BuiltInId::F64 => return float.to_bits(),
            BuiltInId::Bool => return (float != 0.0) as u64,
            _ => float as i128,
        },
        Numeric::Int(int) => match to {
            BuiltInId::F32 => return (int as f32).to_bits() as u64,
            BuiltInId::F64 => return (int as f64).to_bits(),
            BuiltInId::Bool => return (int != 0) as u64,
            _ => int,
        },
    };

    let bits = to.bits();
    if bits >= 64 {
        return int as u64;
    }
    let truncated = (int as u64) & ((1u64 << bits) - 1);
    if to.is_signed() && truncated >> (bits - 1) == 1 {
        // Sign extension
        truncated | !((1u64 << bits) - 1)
    } else {
        truncated
    }
}

/// Whether converting the literal `value` changes the number it denotes.
/// Rounding between floating types does not count.
pub fn literal_value_changes(value: u64, from: BuiltInId, to: BuiltInId) -> bool {
    let converted = convert_literal_value(value, from, to);
    match (decode_literal(value, from), decode_literal(converted, to)) {
        (Numeric::Int(before), Numeric::Int(after)) => before != after,
        (Numeric::Float(before), Numeric::Int(after)) => before != after as f64,
        (Numeric::Int(before), Numeric::Float(after)) => after as i128 != before,
        (Numeric::Float(_), Numeric::Float(_)) => false,
    }
}

/// New literal holding the value of `literal` converted to `to`. `None` when
/// either type is not a built-in. With `report_loss`, a literal whose value
/// does not survive the conversion gets a warning.
fn retype_literal(parser: &mut Parser, literal: ExprId, to: TypeId, report_loss: bool) -> Option<ExprId> {
    let expr = parser.ctx.get_expr(literal);
    let ExprKind::Literal { value } = expr.kind else {
        return None;
    };
    let from = parser.ctx.get_type(expr.ty).builtin_id()?;
    let target = parser.ctx.get_type(to).builtin_id()?;
    let span = expr.span.clone();

    if report_loss && literal_value_changes(value, from, target) {
        let warning = ErrorImpl::LiteralTruncated {
            literal: span.lexeme().to_string(),
            type_: parser.ctx.type_name(to),
        };
        parser.warning(warning, span.clone());
    }

    let value = convert_literal_value(value, from, target);
    Some(parser.ctx.add_expr(Expr::new(ExprKind::Literal { value }, to, span)))
}

/// Converts `expr` to `to` where a value of type `to` is required.
///
/// Equal types pass unchanged and literals are converted in place, with a
/// warning only when their value changes. Other convertible values get a
/// conversion node and a warning.
pub fn implicit_conversion(parser: &mut Parser, expr: ExprId, to: TypeId) -> ExprId {
    if is_error(parser, expr) {
        return expr;
    }

    let from = type_of(parser, expr);
    if parser.ctx.is_equal(from, to) {
        return expr;
    }

    let span = span_of(parser, expr);
    if !parser.ctx.is_convertible(from, to) {
        let error = ErrorImpl::TypeMatchError {
            expected: parser.ctx.type_name(to),
            received: parser.ctx.type_name(from),
        };
        parser.error(error, span.clone());
        return parser.error_expr(span);
    }

    if let Some(literal) = retype_literal(parser, expr, to, true) {
        return literal;
    }

    let warning = ErrorImpl::ImplicitConversion {
        from: parser.ctx.type_name(from),
        to: parser.ctx.type_name(to),
    };
    parser.warning(warning, span.clone());
    parser
        .ctx
        .add_expr(Expr::new(ExprKind::Convert { child: expr }, to, span))
}

/// `expr as target`.
pub fn explicit_conversion(parser: &mut Parser, expr: ExprId, target: TypeId, span: Span) -> ExprId {
    if is_error(parser, expr) {
        return expr;
    }

    let from = type_of(parser, expr);
    if parser.ctx.is_equal(from, target) {
        let warning = ErrorImpl::UselessConversion { type_: parser.ctx.type_name(target) };
        parser.warning(warning, span);
        return expr;
    }

    if !parser.ctx.is_convertible(from, target) {
        let error = ErrorImpl::InvalidConversion {
            from: parser.ctx.type_name(from),
            to: parser.ctx.type_name(target),
        };
        parser.error(error, span.clone());
        return parser.error_expr(span);
    }

    if let Some(literal) = retype_literal(parser, expr, target, false) {
        return literal;
    }

    parser
        .ctx
        .add_expr(Expr::new(ExprKind::Convert { child: expr }, target, span))
}

/// Brings both operands to the same type: a literal operand takes the
/// built-in type of the other one. A floating literal never takes an
/// integral or bool type.
fn match_operands(parser: &mut Parser, lhs: ExprId, rhs: ExprId, span: &Span) -> Option<(ExprId, ExprId)> {
    let (lhs_ty, rhs_ty) = (type_of(parser, lhs), type_of(parser, rhs));
    if parser.ctx.is_equal(lhs_ty, rhs_ty) {
        return Some((lhs, rhs));
    }

    let (Some(lhs_id), Some(rhs_id)) = (
        parser.ctx.get_type(lhs_ty).builtin_id(),
        parser.ctx.get_type(rhs_ty).builtin_id(),
    ) else {
        return report_operand_mismatch(parser, lhs_ty, rhs_ty, span);
    };

    if parser.ctx.get_expr(rhs).is_literal() && (lhs_id.is_floating() || !rhs_id.is_floating()) {
        let target = parser.ctx.with_const(lhs_ty, false);
        if let Some(rhs) = retype_literal(parser, rhs, target, true) {
            return Some((lhs, rhs));
        }
    }
    if parser.ctx.get_expr(lhs).is_literal() && (rhs_id.is_floating() || !lhs_id.is_floating()) {
        let target = parser.ctx.with_const(rhs_ty, false);
        if let Some(lhs) = retype_literal(parser, lhs, target, true) {
            return Some((lhs, rhs));
        }
    }

    report_operand_mismatch(parser, lhs_ty, rhs_ty, span)
}

fn report_operand_mismatch(parser: &mut Parser, lhs_ty: TypeId, rhs_ty: TypeId, span: &Span) -> Option<(ExprId, ExprId)> {
    let error = ErrorImpl::TypeMatchError {
        expected: parser.ctx.type_name(lhs_ty),
        received: parser.ctx.type_name(rhs_ty),
    };
    parser.error(error, span.clone());
    None
}

pub fn build_binary(parser: &mut Parser, lhs: ExprId, op: BinaryOperator, rhs: ExprId, span: Span) -> ExprId {
    if is_error(parser, lhs) || is_error(parser, rhs) {
        return parser.error_expr(span);
    }

    let Some((lhs, rhs)) = match_operands(parser, lhs, rhs, &span) else {
        return parser.error_expr(span);
    };

    let lhs_ty = type_of(parser, lhs);
    if !parser.ctx.get_type(lhs_ty).supports(op) {
        let error = ErrorImpl::UnsupportedOperator {
            operator: op.to_string(),
            type_: parser.ctx.type_name(lhs_ty),
        };
        parser.error(error, span.clone());
        return parser.error_expr(span);
    }

    let ty = if op.is_comparison() || op.is_bool_logic() {
        parser.ctx.create_bool(false)
    } else {
        parser.ctx.with_const(lhs_ty, false)
    };

    parser
        .ctx
        .add_expr(Expr::new(ExprKind::Binary { lhs, op, rhs }, ty, span))
}

/// Negated literal, folded. `None` for non-literals and unsigned types.
fn fold_negation(parser: &mut Parser, child: ExprId, span: &Span) -> Option<ExprId> {
    let expr = parser.ctx.get_expr(child);
    let ExprKind::Literal { value } = expr.kind else {
        return None;
    };

    let value = match parser.ctx.get_type(expr.ty).builtin_id()? {
        BuiltInId::F32 => value ^ (1 << 31),
        BuiltInId::F64 => value ^ (1 << 63),
        id if id.is_signed() => (value as i64).wrapping_neg() as u64,
        _ => return None,
    };

    let ty = expr.ty;
    Some(parser.ctx.add_expr(Expr::new(ExprKind::Literal { value }, ty, span.clone())))
}

pub fn build_unary(parser: &mut Parser, op: UnaryOperator, child: ExprId, span: Span) -> ExprId {
    if is_error(parser, child) {
        return parser.error_expr(span);
    }

    let child_ty = type_of(parser, child);
    let child_type = parser.ctx.get_type(child_ty).clone();
    let builtin = child_type.builtin_id();
    let is_variable = matches!(parser.ctx.get_expr(child).kind, ExprKind::VarRead { .. });

    let ty = match op {
        UnaryOperator::Negate => match builtin {
            Some(id) if !id.is_bool() => {
                if id.is_unsigned() {
                    let warning = ErrorImpl::NegateUnsigned { type_: parser.ctx.type_name(child_ty) };
                    parser.warning(warning, span.clone());
                } else if let Some(folded) = fold_negation(parser, child, &span) {
                    return folded;
                }
                Some(parser.ctx.with_const(child_ty, false))
            }
            _ => None,
        },
        UnaryOperator::BoolNot => builtin
            .filter(|id| id.is_bool())
            .map(|_| parser.ctx.create_bool(false)),
        UnaryOperator::BitNot => builtin
            .filter(|id| id.is_integral())
            .map(|_| parser.ctx.with_const(child_ty, false)),
        UnaryOperator::PreIncrement
        | UnaryOperator::PreDecrement
        | UnaryOperator::PostIncrement
        | UnaryOperator::PostDecrement => {
            if !is_variable {
                parser.error(ErrorImpl::NotAnLvalue, span.clone());
                return parser.error_expr(span);
            }
            if child_type.is_const() {
                let variable = match &parser.ctx.get_expr(child).kind {
                    ExprKind::VarRead { name, .. } => name.clone(),
                    _ => String::new(),
                };
                parser.error(ErrorImpl::WriteToConst { variable }, span.clone());
                return parser.error_expr(span);
            }
            builtin.filter(|id| !id.is_bool()).map(|_| child_ty)
        }
        UnaryOperator::AddressOf => {
            if !is_variable {
                parser.error(ErrorImpl::NotAnLvalue, span.clone());
                return parser.error_expr(span);
            }
            Some(parser.ctx.create_pointer(false, child_ty))
        }
        UnaryOperator::Dereference => match child_type {
            Type::Pointer { pointee, .. } => Some(pointee),
            _ => None,
        },
    };

    let Some(ty) = ty else {
        let error = ErrorImpl::UnsupportedOperator {
            operator: op.to_string(),
            type_: parser.ctx.type_name(child_ty),
        };
        parser.error(error, span.clone());
        return parser.error_expr(span);
    };

    parser
        .ctx
        .add_expr(Expr::new(ExprKind::Unary { op, child }, ty, span))
}

/// `lhs = rhs` and the compound assignments, which expand to
/// `lhs = lhs op rhs`.
pub fn build_assignment(parser: &mut Parser, lhs: ExprId, operator: &Token, rhs: ExprId) -> ExprId {
    let span = span_of(parser, lhs).to(&span_of(parser, rhs));
    if is_error(parser, lhs) || is_error(parser, rhs) {
        return parser.error_expr(span);
    }

    let ExprKind::VarRead { name, local_id } = parser.ctx.get_expr(lhs).kind.clone() else {
        let lhs_span = span_of(parser, lhs);
        parser.error(ErrorImpl::NotAnLvalue, lhs_span);
        return parser.error_expr(span);
    };

    let variable_ty = type_of(parser, lhs);
    if parser.ctx.get_type(variable_ty).is_const() {
        parser.error(ErrorImpl::WriteToConst { variable: name }, span.clone());
        return parser.error_expr(span);
    }

    let value = match assignment_to_binary_operator(operator.kind) {
        Some(op) => build_binary(parser, lhs, op, rhs, span.clone()),
        None => rhs,
    };
    if is_error(parser, value) {
        return parser.error_expr(span);
    }

    let value = implicit_conversion(parser, value, variable_ty);
    parser.ctx.add_expr(Expr::new(
        ExprKind::VarWrite { name, value, local_id },
        variable_ty,
        span,
    ))
}
