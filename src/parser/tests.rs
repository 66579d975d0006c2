//! Unit tests for the parser module.
//!
//! This module contains tests for parsing and checking:
//! - Operator precedence and associativity
//! - Variable and function declarations, scopes and slots
//! - Calls and overload resolution
//! - Conversions and literal typing
//! - Statement checks (conditions, returns, unused results)
//! - Panic-mode recovery

use pretty_assertions::assert_eq;

use crate::{
    ast::{ast::ExprKind, context::ExprId, types::BuiltInId},
    errors::reporter::DiagnosticBuffer,
    lexer::tokens::TokenKind,
};

use super::{
    expr::{convert_literal_value, literal_value_changes},
    lookups::{get_op_precedence, TERMINATOR_PRECEDENCE},
    parser::{create_ast, parse, MAX_NESTING_DEPTH},
};

struct Parsed {
    dump: String,
    errors: u32,
    warnings: u32,
    buffer: DiagnosticBuffer,
}

fn parse_source(source: &str) -> Parsed {
    let mut buffer = DiagnosticBuffer::new();
    let (dump, errors, warnings) = {
        let parser = parse(source, &mut buffer);
        (
            parser.ctx.dump_program(&parser.result),
            parser.error_count,
            parser.warn_count,
        )
    };

    Parsed {
        dump,
        errors,
        warnings,
        buffer,
    }
}

fn assert_clean(source: &str, expected: &str) {
    let parsed = parse_source(source);
    assert_eq!(parsed.errors, 0, "{:?}", parsed.buffer.diagnostics);
    assert_eq!(parsed.warnings, 0, "{:?}", parsed.buffer.diagnostics);
    assert_eq!(parsed.dump, expected);
}

fn assert_single_error(source: &str, name: &str) -> Parsed {
    let parsed = parse_source(source);
    assert_eq!(parsed.errors, 1, "{:?}", parsed.buffer.diagnostics);
    assert!(parsed.buffer.contains(name), "{:?}", parsed.buffer.diagnostics);
    parsed
}

fn assert_single_warning(source: &str, name: &str) -> Parsed {
    let parsed = parse_source(source);
    assert_eq!(parsed.errors, 0, "{:?}", parsed.buffer.diagnostics);
    assert_eq!(parsed.warnings, 1, "{:?}", parsed.buffer.diagnostics);
    assert!(parsed.buffer.contains(name), "{:?}", parsed.buffer.diagnostics);
    parsed
}

// Precedence

#[test]
fn test_precedence_table_is_total() {
    assert_eq!(get_op_precedence(TokenKind::As), 2);
    assert_eq!(get_op_precedence(TokenKind::Star), 3);
    assert_eq!(get_op_precedence(TokenKind::Plus), 4);
    assert_eq!(get_op_precedence(TokenKind::LeftShift), 5);
    assert_eq!(get_op_precedence(TokenKind::GreaterEquals), 6);
    assert_eq!(get_op_precedence(TokenKind::NotEquals), 7);
    assert_eq!(get_op_precedence(TokenKind::Or), 12);
    assert_eq!(get_op_precedence(TokenKind::RightShiftEquals), 14);

    for kind in [
        TokenKind::Semicolon,
        TokenKind::OpenParen,
        TokenKind::Identifier,
        TokenKind::Not,
        TokenKind::EOF,
    ] {
        assert_eq!(get_op_precedence(kind), TERMINATOR_PRECEDENCE);
    }
}

#[test]
fn test_multiplication_binds_tighter() {
    assert_clean("var x: i64 = 1 + 2 * 3;", "(global x (+ 1 (* 2 3)))");
}

#[test]
fn test_grouping_overrides_precedence() {
    assert_clean("var x: i64 = (1 + 2) * 3;", "(global x (* (+ 1 2) 3))");
}

#[test]
fn test_binary_operators_are_left_associative() {
    assert_clean("var x: i64 = 1 - 2 - 3;", "(global x (- (- 1 2) 3))");
}

#[test]
fn test_shift_binds_looser_than_sum() {
    assert_clean("var x: i64 = 1 << 2 + 3;", "(global x (<< 1 (+ 2 3)))");
}

#[test]
fn test_logic_operators() {
    assert_clean(
        "var b: bool = 1 < 2 && 3 < 4 || false;",
        "(global b (|| (&& (< 1 2) (< 3 4)) false))",
    );
}

#[test]
fn test_assignment_is_right_associative() {
    assert_clean(
        "fn f() { var a: i64; var b: i64; a = b = 3; }",
        "(fn f () (scope (var a) (var b) (= a@0 (= b@1 3))))",
    );
}

#[test]
fn test_compound_assignment_expands() {
    assert_clean(
        "fn f() { var x: i64 = 1; x += 2; }",
        "(fn f () (scope (var x 1) (= x@0 (+ x@0 2))))",
    );
}

#[test]
fn test_negative_literal_is_folded() {
    assert_clean("var x: i64 = -5 + 1;", "(global x (+ -5 1))");
}

#[test]
fn test_increment_and_decrement() {
    assert_clean(
        "fn f() { var i: i64 = 0; i++; --i; }",
        "(fn f () (scope (var i 0) (post++ i@0) (-- i@0)))",
    );
}

#[test]
fn test_address_of_and_dereference() {
    assert_clean(
        "fn f() { var a: i64 = 1; var p: PTR<i64> = &a; var b: i64 = *p; }",
        "(fn f () (scope (var a 1) (var p (& a@0)) (var b (* p@1))))",
    );
}

// Declarations and scopes

#[test]
fn test_function_parameters_take_first_slots() {
    assert_clean(
        "fn add(a: i64, b: i64) -> i64 { return a + b; }",
        "(fn add (a b) (scope (return (+ a@0 b@1))))",
    );
}

#[test]
fn test_body_can_shadow_parameter() {
    assert_clean(
        "fn f(x: i64) -> i64 { var x: i64 = 2; return x; }",
        "(fn f (x) (scope (var x 2) (return x@1)))",
    );
}

#[test]
fn test_inner_scope_shadows_and_releases() {
    assert_clean(
        "fn f() -> i64 { var x: i64 = 1; { var x: i64 = 2; } var y: i64 = 3; return x; }",
        "(fn f () (scope (var x 1) (scope (var x 2)) (var y 3) (return x@0)))",
    );
}

#[test]
fn test_global_reads_have_no_slot() {
    assert_clean(
        "var g: i64 = 1; fn f() -> i64 { return g; }",
        "(global g 1)\n(fn f () (scope (return g)))",
    );
}

#[test]
fn test_colon_body() {
    assert_clean(
        "fn id(x: i64) -> i64: return x;",
        "(fn id (x) (scope (return x@0)))",
    );
}

#[test]
fn test_extern_prototype() {
    assert_clean("extern fn putchar(c: i32) -> i32;", "(fn putchar (c))");
}

#[test]
fn test_prototype_then_definition() {
    assert_clean(
        "fn f(x: i64) -> i64;\nfn g() -> i64 { return f(1); }\nfn f(y: i64) -> i64 { return y; }",
        "(fn f (y) (scope (return y@0)))\n(fn g () (scope (return (call f 1))))",
    );
}

#[test]
fn test_condition_chain() {
    assert_clean(
        "fn sign(x: i64) -> i64 { if x > 0 { return 1; } elif x < 0 { return -1; } else { return 0; } }",
        "(fn sign (x) (scope (if (> x@0 0) (scope (return 1)) (if (< x@0 0) (scope (return -1)) (scope (return 0))))))",
    );
}

#[test]
fn test_inferred_variable_type_drops_const() {
    let parsed = parse_source("fn f() { var a: const i32 = 1; var b = a; b = 2; }");
    assert_eq!(parsed.errors, 0, "{:?}", parsed.buffer.diagnostics);
}

#[test]
fn test_nested_pointer_type() {
    let mut buffer = DiagnosticBuffer::new();
    let parser = parse("var p: PTR<PTR<i64>>; var f: fn(i64, bool) -> void;", &mut buffer);

    assert_eq!(parser.error_count, 0);
    let types: Vec<String> = parser
        .result
        .iter()
        .map(|decl| parser.ctx.type_name(parser.ctx.get_expr(*decl).ty))
        .collect();
    assert_eq!(types, vec!["PTR<PTR<i64>>", "fn(i64, bool) -> void"]);
}

#[test]
fn test_variable_not_declared() {
    assert_single_error("var x: i64 = y;", "VariableNotDeclared");
}

#[test]
fn test_global_redeclaration() {
    let parsed = assert_single_error("var x: i64;\nvar x: i64;", "VariableAlreadyDeclared");
    assert_eq!(parsed.buffer.messages().len(), 1);
    assert!(parsed.buffer.contains("PreviousDeclaration"));
}

#[test]
fn test_local_redeclaration() {
    assert_single_error(
        "fn f() { var x: i64 = 1; var x: i64 = 2; }",
        "VariableAlreadyDeclared",
    );
}

#[test]
fn test_duplicate_parameter() {
    assert_single_error("fn f(a: i64, a: i64) {}", "DuplicateParameter");
}

#[test]
fn test_void_variable() {
    assert_single_error("fn f() { var v: void; }", "VoidVariable");
}

#[test]
fn test_variable_needs_type_or_value() {
    assert_single_error("var x;", "ExpectedExplicitValue");
}

#[test]
fn test_function_redefinition() {
    assert_single_error("fn f() {}\nfn f() {}", "FunctionAlreadyDeclared");
}

#[test]
fn test_prototype_with_other_return_type() {
    assert_single_error(
        "fn f(x: i64);\nfn f(x: i64) -> i64 { return x; }",
        "FunctionAlreadyDeclared",
    );
}

#[test]
fn test_variable_named_like_function() {
    assert_single_error("fn f() {}\nvar f: i64;", "NameIsFunction");
}

#[test]
fn test_function_named_like_variable() {
    assert_single_error("var f: i64;\nfn f() {}", "NameIsVariable");
}

// Calls

#[test]
fn test_call_of_undeclared_function() {
    assert_single_error("fn f() { g(); }", "FunctionNotDeclared");
}

#[test]
fn test_call_of_variable() {
    assert_single_error("var x: i64 = 1;\nfn f() { x(); }", "NameIsVariable");
}

#[test]
fn test_too_many_arguments() {
    let parsed = assert_single_error("fn f(x: i64) {}\nfn g() { f(1, 2); }", "UnexpectedArguments");
    assert!(parsed.buffer.contains("CandidateOverload"));
}

#[test]
fn test_missing_arguments() {
    assert_single_error("fn f(x: i64, y: i64) {}\nfn g() { f(1); }", "MissingArguments");
}

#[test]
fn test_argument_type_mismatch() {
    assert_single_error(
        "fn f(x: i64) {}\nfn g() { var a: i64 = 1; f(&a); }",
        "ArgumentTypeMatchError",
    );
}

#[test]
fn test_argument_is_converted_to_parameter_type() {
    let parsed = assert_single_warning(
        "fn f(x: i64) {}\nfn g() { var a: i32 = 1; f(a); }",
        "ImplicitConversion",
    );
    assert_eq!(
        parsed.dump,
        "(fn f (x) (scope))\n(fn g () (scope (var a 1) (call f (as i64 a@0))))"
    );
}

#[test]
fn test_overload_exact_match() {
    assert_clean(
        "fn f(x: i32) -> i32 { return x; }\nfn f(x: f64) -> f64 { return x; }\nfn g() { var a: f64 = 1.0; var b: f64 = f(a); }",
        "(fn f (x) (scope (return x@0)))\n(fn f (x) (scope (return x@0)))\n(fn g () (scope (var a 1.0) (var b (call f a@0))))",
    );
}

#[test]
fn test_overload_match_ignoring_const() {
    let parsed = parse_source("fn f(x: const i64) {}\nfn f(x: i32) {}\nfn g() { var a: i64 = 1; f(a); }");
    assert_eq!(parsed.errors, 0, "{:?}", parsed.buffer.diagnostics);
    assert_eq!(parsed.warnings, 0, "{:?}", parsed.buffer.diagnostics);
}

#[test]
fn test_ambiguous_call() {
    let parsed = assert_single_error("fn f(x: i32) {}\nfn f(x: u8) {}\nfn g() { f(1); }", "AmbiguousCall");
    assert_eq!(parsed.buffer.messages().len(), 2);
}

#[test]
fn test_no_matching_overload() {
    let parsed = assert_single_error(
        "fn f(x: i32) {}\nfn f(x: u8) {}\nfn g() { var a: i64 = 1; f(&a); }",
        "NoMatchingOverload",
    );
    assert_eq!(parsed.buffer.messages().len(), 2);
}

// Operators and conversions

#[test]
fn test_operand_types_must_match() {
    assert_single_error(
        "fn f() { var a: i64 = 1; var b: bool = true; var c: i64 = a + b; }",
        "TypeMatchError",
    );
}

#[test]
fn test_unsupported_operator() {
    assert_single_error(
        "fn f() { var a: bool = true; var b: bool = a + a; }",
        "UnsupportedOperator",
    );
}

#[test]
fn test_pointers_only_compare() {
    assert_single_error(
        "fn f() { var a: i64 = 1; var p: PTR<i64> = &a; var q: PTR<i64> = p + p; }",
        "UnsupportedOperator",
    );
}

#[test]
fn test_write_to_const() {
    assert_single_error("fn f() { var x: const i64 = 1; x = 2; }", "WriteToConst");
}

#[test]
fn test_assignment_needs_variable() {
    assert_single_error("fn f() { var x: i64 = 1; x + 1 = 2; }", "NotAnLvalue");
}

#[test]
fn test_implicit_conversion_inserts_node() {
    let parsed = assert_single_warning(
        "fn f() { var a: i32 = 1; var b: i64 = a; }",
        "ImplicitConversion",
    );
    assert_eq!(parsed.dump, "(fn f () (scope (var a 1) (var b (as i64 a@0))))");
}

#[test]
fn test_explicit_conversion() {
    assert_clean(
        "fn f() { var a: i32 = 1; var b: i64 = a as i64; }",
        "(fn f () (scope (var a 1) (var b (as i64 a@0))))",
    );
}

#[test]
fn test_literal_takes_declared_type() {
    assert_clean("var x: f64 = 1;", "(global x 1.0)");
}

#[test]
fn test_useless_conversion() {
    assert_single_warning(
        "fn f() { var a: i64 = 1; var b: i64 = a as i64; }",
        "UselessConversion",
    );
}

#[test]
fn test_invalid_conversion() {
    assert_single_error(
        "fn f() { var a: i64 = 1; var p: PTR<i64> = &a; var b: i64 = p as i64; }",
        "InvalidConversion",
    );
}

#[test]
fn test_negate_unsigned() {
    assert_single_warning("fn f() { var a: u8 = 1; var b: u8 = -a; }", "NegateUnsigned");
}

#[test]
fn test_convert_literal_value() {
    assert_eq!(convert_literal_value(300, BuiltInId::I64, BuiltInId::U8), 44);
    assert_eq!(convert_literal_value((-1i64) as u64, BuiltInId::I64, BuiltInId::I8), u64::MAX);
    assert_eq!(convert_literal_value(2.75f64.to_bits(), BuiltInId::F64, BuiltInId::I32), 2);
    assert_eq!(convert_literal_value(3, BuiltInId::I64, BuiltInId::F64), 3.0f64.to_bits());
    assert_eq!(convert_literal_value(0, BuiltInId::I64, BuiltInId::Bool), 0);
    assert_eq!(convert_literal_value(7, BuiltInId::U8, BuiltInId::Bool), 1);
}

#[test]
fn test_literal_value_changes() {
    assert!(literal_value_changes(300, BuiltInId::I64, BuiltInId::U8));
    assert!(!literal_value_changes(255, BuiltInId::I64, BuiltInId::U8));
    assert!(literal_value_changes((-1i64) as u64, BuiltInId::I64, BuiltInId::U32));
    assert!(literal_value_changes(200, BuiltInId::U8, BuiltInId::I8));
    assert!(literal_value_changes(2, BuiltInId::I64, BuiltInId::Bool));
    assert!(!literal_value_changes(1, BuiltInId::I64, BuiltInId::Bool));
    assert!(literal_value_changes(1.5f64.to_bits(), BuiltInId::F64, BuiltInId::I32));
    assert!(!literal_value_changes(2.0f64.to_bits(), BuiltInId::F64, BuiltInId::I32));
    assert!(literal_value_changes((1u64 << 53) + 1, BuiltInId::I64, BuiltInId::F64));
    assert!(!literal_value_changes(1.1f64.to_bits(), BuiltInId::F64, BuiltInId::F32));
}

#[test]
fn test_truncated_literal_warns() {
    let parsed = assert_single_warning("var x: u8 = 300;", "LiteralTruncated");
    assert_eq!(parsed.dump, "(global x 44)");
}

#[test]
fn test_literal_to_bool_warns() {
    let parsed = assert_single_warning("var b: bool = 2;", "LiteralTruncated");
    assert_eq!(parsed.dump, "(global b true)");
}

#[test]
fn test_negative_literal_to_unsigned_warns() {
    assert_single_warning("fn f(x: u32) {}\nfn g() { f(-1); }", "LiteralTruncated");
}

#[test]
fn test_literal_that_fits_is_silent() {
    assert_clean("var x: i8 = -128;", "(global x -128)");
    assert_clean("var y: f32 = 1.1;", "(global y 1.1)");
}

#[test]
fn test_explicit_truncation_is_silent() {
    assert_clean("var x: u8 = 300 as u8;", "(global x 44)");
}

#[test]
fn test_integer_literal_widens_to_float_operand() {
    assert_clean("var c = 2 + 1.5;", "(global c (+ 2.0 1.5))");
    assert_clean("var d = 1.5 * 2;", "(global d (* 1.5 2.0))");
}

#[test]
fn test_float_literal_never_narrows_to_integer_operand() {
    assert_single_error(
        "fn f() { var a: i64 = 1; var b: i64 = a + 1.5; }",
        "TypeMatchError",
    );
}

#[test]
fn test_operand_literal_truncation_warns() {
    assert_single_warning(
        "fn f() { var a: u8 = 1; var b: u8 = a + 300; }",
        "LiteralTruncated",
    );
}

// Statements

#[test]
fn test_condition_must_be_bool() {
    assert_single_error("fn f(x: i64) { if x { } }", "ConditionNotBool");
}

#[test]
fn test_unused_expression_result() {
    assert_single_warning("fn f(x: i64) { x + 1; }", "UnusedExpressionResult");
}

#[test]
fn test_missing_return() {
    assert_single_warning("fn f() -> i64 { }", "MissingReturn");
}

#[test]
fn test_missing_return_value() {
    assert_single_error("fn f() -> i64 { return; }", "MissingReturnValue");
}

#[test]
fn test_unexpected_return_value() {
    assert_single_error("fn f() { return 1; }", "UnexpectedReturnValue");
}

#[test]
fn test_returns_are_recorded() {
    let mut buffer = DiagnosticBuffer::new();
    let parser = parse(
        "fn f(x: bool) -> i64 { if x { return 1; } return 2; }",
        &mut buffer,
    );

    assert_eq!(parser.error_count, 0);
    match &parser.ctx.get_expr(parser.result[0]).kind {
        ExprKind::FnDef { returns, .. } => assert_eq!(returns.len(), 2),
        kind => panic!("expected a function, got {}", kind.name()),
    }
}

// Recovery

#[test]
fn test_missing_semicolon_before_declaration() {
    let parsed = assert_single_error("var a: i64 = 1\nvar b: i64 = 2;", "ExpectedToken");
    assert_eq!(parsed.dump, "(global b 2)");
}

#[test]
fn test_missing_semicolon_inside_body() {
    let parsed = assert_single_error(
        "fn f() { var x: i64 = 1 var y: i64 = 2; return; }",
        "ExpectedToken",
    );
    assert_eq!(parsed.dump, "(fn f () (scope <error> (var y 2) (return)))");
}

#[test]
fn test_missing_expression() {
    let parsed = assert_single_error("fn f() { var x: i64 = ; return; }", "UnexpectedTokenDetailed");
    assert_eq!(parsed.dump, "(fn f () (scope <error> (return)))");
}

#[test]
fn test_bad_argument_list_recovers_at_paren() {
    let parsed = assert_single_error(
        "fn g(x: i64) {}\nfn f() { g(1 2); var y: i64 = 3; }",
        "ExpectedToken",
    );
    assert_eq!(
        parsed.dump,
        "(fn g (x) (scope))\n(fn f () (scope <error> (var y 3)))"
    );
}

#[test]
fn test_unclosed_parenthesis() {
    let parsed = assert_single_error("fn f() { var x: i64 = (1 + 2; }", "UnclosedParenthesis");
    assert_eq!(parsed.dump, "(fn f () (scope (var x <error>)))");
}

#[test]
fn test_bad_prototype_skips_body() {
    let parsed = assert_single_error("fn f(x i64) { return; }\nvar z: i64 = 2;", "ExpectedToken");
    assert_eq!(parsed.dump, "(global z 2)");
}

#[test]
fn test_statement_at_top_level() {
    let parsed = assert_single_error("return 1;\nvar z: i64 = 2;", "ExpectedDeclaration");
    assert_eq!(parsed.dump, "(global z 2)");
}

#[test]
fn test_unclosed_scope() {
    assert_single_error("fn f() { var x: i64 = 1;", "UnclosedScope");
}

#[test]
fn test_lexical_error_reported_once() {
    let parsed = assert_single_error("var x: i64 = 1 @ 2;", "UnrecognisedToken");
    assert_eq!(parsed.buffer.errors().len(), 1);
}

#[test]
fn test_lexical_error_as_expression() {
    let parsed = assert_single_error("var x: i64 = @;", "UnrecognisedToken");
    assert_eq!(parsed.dump, "(global x <error>)");
}

#[test]
fn test_moderate_nesting_is_accepted() {
    let source = format!("var x: i64 = {}1{};", "(".repeat(50), ")".repeat(50));
    assert_clean(&source, "(global x 1)");
}

#[test]
fn test_deep_parentheses_are_rejected() {
    let source = format!("var x: i64 = {}1{};", "(".repeat(1000), ")".repeat(1000));
    let parsed = parse_source(&source);

    assert!(parsed.errors >= 1);
    assert_eq!(parsed.buffer.errors()[0].get_error_name(), "NestingTooDeep");
}

#[test]
fn test_deep_unary_chain_is_rejected() {
    let source = format!("var x: i64 = {}1;", "- ".repeat(1000));
    let parsed = parse_source(&source);

    assert_eq!(parsed.buffer.errors()[0].get_error_name(), "NestingTooDeep");
}

#[test]
fn test_deep_blocks_are_rejected() {
    let source = format!("fn f() {{ {}{} }}", "{".repeat(1000), "}".repeat(1000));
    let parsed = parse_source(&source);

    assert_eq!(parsed.buffer.errors()[0].get_error_name(), "NestingTooDeep");
}

#[test]
fn test_long_elif_chain_is_rejected() {
    let source = format!("fn f(x: bool) {{ if x {{}} {}}}", "elif x {} ".repeat(1000));
    let parsed = parse_source(&source);

    assert_eq!(parsed.buffer.errors()[0].get_error_name(), "NestingTooDeep");
}

#[test]
fn test_deep_pointer_type_is_rejected() {
    let depth = MAX_NESTING_DEPTH + 10;
    let source = format!("var p: {}i64{};", "PTR<".repeat(depth), ">".repeat(depth));
    let parsed = parse_source(&source);

    assert_eq!(parsed.buffer.errors()[0].get_error_name(), "NestingTooDeep");
}

// Results

#[test]
fn test_create_ast_counts_errors() {
    let mut buffer = DiagnosticBuffer::new();
    let result = create_ast("var x: i64 = y; var z: bool = w;", &mut buffer);

    assert_eq!(result.err(), Some(2));
    assert_eq!(buffer.errors().len(), 2);
}

#[test]
fn test_create_ast_accepts_warnings() {
    let mut buffer = DiagnosticBuffer::new();
    let ast = match create_ast("fn f(x: i64) { x + 1; }", &mut buffer) {
        Ok(ast) => ast,
        Err(count) => panic!("{} errors: {:?}", count, buffer.diagnostics),
    };

    assert_eq!(ast.expressions.len(), 1);
    assert_eq!(buffer.warnings().len(), 1);
}

#[test]
fn test_repeated_statements_are_structurally_equal() {
    let mut buffer = DiagnosticBuffer::new();
    let parser = parse("fn f(a: i64) { a + 1; a + 1; a + 2; }", &mut buffer);

    let body: Vec<ExprId> = match &parser.ctx.get_expr(parser.result[0]).kind {
        ExprKind::FnDef { body: Some(body), .. } => match &parser.ctx.get_expr(*body).kind {
            ExprKind::Scope { body } => body.clone(),
            kind => panic!("expected a scope, got {}", kind.name()),
        },
        kind => panic!("expected a function, got {}", kind.name()),
    };

    assert_eq!(body.len(), 3);
    assert_ne!(body[0], body[1]);
    assert_eq!(parser.ctx.expr_ref(body[0]), parser.ctx.expr_ref(body[1]));
    assert_ne!(parser.ctx.expr_ref(body[0]), parser.ctx.expr_ref(body[2]));
    assert_eq!(parser.ctx.hash_expr(body[0]), parser.ctx.hash_expr(body[1]));
}
