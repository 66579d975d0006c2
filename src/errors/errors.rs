use std::fmt::Display;

use thiserror::Error;

use crate::{render_span, Position, Span};

/// Severity channel a diagnostic is routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Message,
    Warning,
    Error,
}

impl Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Message => write!(f, "Message"),
            Severity::Warning => write!(f, "Warning"),
            Severity::Error => write!(f, "Error"),
        }
    }
}

/// A reported problem with its source location.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    severity: Severity,
    internal_error: ErrorImpl,
    span: Span,
}

impl Diagnostic {
    pub fn new(severity: Severity, error_impl: ErrorImpl, span: Span) -> Self {
        Diagnostic {
            severity,
            internal_error: error_impl,
            span,
        }
    }

    pub fn error(error_impl: ErrorImpl, span: Span) -> Self {
        Diagnostic::new(Severity::Error, error_impl, span)
    }

    pub fn warning(error_impl: ErrorImpl, span: Span) -> Self {
        Diagnostic::new(Severity::Warning, error_impl, span)
    }

    pub fn message(error_impl: ErrorImpl, span: Span) -> Self {
        Diagnostic::new(Severity::Message, error_impl, span)
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn kind(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn get_position(&self) -> &Position {
        &self.span.start
    }

    pub fn get_span(&self) -> &Span {
        &self.span
    }

    /// Offending source text.
    pub fn lexeme(&self) -> &str {
        self.span.lexeme()
    }

    pub fn get_error_name(&self) -> &str {
        self.internal_error.get_error_name()
    }

    pub fn get_tip(&self) -> ErrorTip {
        self.internal_error.get_tip()
    }

    /// Human readable rendering:
    ///
    /// ```text
    /// Error: variable "y" not declared (line 3)
    ///   |
    /// 3 | x = y;
    ///   |     ^
    /// ```
    pub fn render(&self) -> String {
        let mut out = format!(
            "{}: {} (line {})\n",
            self.severity, self.internal_error, self.span.start.line
        );
        out.push_str(&render_span(&self.span));
        if let ErrorTip::Suggestion(tip) = self.get_tip() {
            out.push_str(&format!("\nTip: {}", tip));
        }
        out
    }
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.severity, self.internal_error)
    }
}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    // Lexical
    #[error("unrecognised token: {token:?}")]
    UnrecognisedToken { token: String },
    #[error("invalid literal suffix: {token:?}")]
    InvalidLiteralSuffix { token: String },
    #[error("literal {token:?} has a suffix that does not match its shape")]
    MismatchedLiteralSuffix { token: String },
    #[error("literal {token:?} does not fit in {type_}")]
    LiteralOutOfRange { token: String, type_: String },
    #[error("unterminated block comment")]
    UnterminatedComment,

    // Syntactic
    #[error("unexpected token: {token:?}")]
    UnexpectedToken { token: String },
    #[error("expected {expected}, found {token:?}")]
    ExpectedToken { expected: String, token: String },
    #[error("unexpected token ({message}): {token:?}")]
    UnexpectedTokenDetailed { token: String, message: String },
    #[error("expected a declaration, found {token:?}")]
    ExpectedDeclaration { token: String },
    #[error("expected a type name, found {token:?}")]
    ExpectedTypename { token: String },
    #[error("unclosed parenthesis delimiter")]
    UnclosedParenthesis,
    #[error("unclosed scope delimiter")]
    UnclosedScope,
    #[error("nesting exceeds the limit of {limit}")]
    NestingTooDeep { limit: usize },

    // Semantic
    #[error("variable {variable:?} already declared")]
    VariableAlreadyDeclared { variable: String },
    #[error("variable {variable:?} not declared")]
    VariableNotDeclared { variable: String },
    #[error("variable {variable:?} cannot have type void")]
    VoidVariable { variable: String },
    #[error("parameter {parameter:?} declared twice")]
    DuplicateParameter { parameter: String },
    #[error("function {function:?} already declared with this signature")]
    FunctionAlreadyDeclared { function: String },
    #[error("function {function:?} not declared")]
    FunctionNotDeclared { function: String },
    #[error("{name:?} is a function, not a variable")]
    NameIsFunction { name: String },
    #[error("{name:?} is a variable, not a function")]
    NameIsVariable { name: String },
    #[error("too many arguments to {function:?}: expected {expected}, received {received}")]
    UnexpectedArguments { function: String, expected: usize, received: usize },
    #[error("missing arguments to {function:?}: expected {expected}, received {received}")]
    MissingArguments { function: String, expected: usize, received: usize },
    #[error("argument {index} types do not match: expected {expected}, received {received}")]
    ArgumentTypeMatchError { index: usize, expected: String, received: String },
    #[error("no overload of {function:?} matches the arguments ({arguments})")]
    NoMatchingOverload { function: String, arguments: String },
    #[error("call to {function:?} is ambiguous")]
    AmbiguousCall { function: String },
    #[error("types do not match: expected {expected}, received {received}")]
    TypeMatchError { expected: String, received: String },
    #[error("cannot convert {from} to {to}")]
    InvalidConversion { from: String, to: String },
    #[error("type {type_} does not support operator {operator}")]
    UnsupportedOperator { operator: String, type_: String },
    #[error("expression is not assignable")]
    NotAnLvalue,
    #[error("cannot write to const variable {variable:?}")]
    WriteToConst { variable: String },
    #[error("condition must be of type bool, received {type_}")]
    ConditionNotBool { type_: String },
    #[error("function {function:?} must return a value of type {type_}")]
    MissingReturnValue { function: String, type_: String },
    #[error("function {function:?} returns void and cannot return a value")]
    UnexpectedReturnValue { function: String },
    #[error("expected explicit value when no type is given")]
    ExpectedExplicitValue,

    // Warnings
    #[error("expression result is unused")]
    UnusedExpressionResult,
    #[error("useless conversion to {type_}")]
    UselessConversion { type_: String },
    #[error("implicit conversion from {from} to {to}")]
    ImplicitConversion { from: String, to: String },
    #[error("literal {literal} does not fit in {type_}")]
    LiteralTruncated { literal: String, type_: String },
    #[error("negating a value of unsigned type {type_}")]
    NegateUnsigned { type_: String },
    #[error("function {function:?} never returns a value")]
    MissingReturn { function: String },

    // Messages
    #[error("{name:?} was previously declared here")]
    PreviousDeclaration { name: String },
    #[error("candidate: {signature}")]
    CandidateOverload { signature: String },
}

impl ErrorImpl {
    pub fn get_error_name(&self) -> &str {
        match self {
            ErrorImpl::UnrecognisedToken { .. } => "UnrecognisedToken",
            ErrorImpl::InvalidLiteralSuffix { .. } => "InvalidLiteralSuffix",
            ErrorImpl::MismatchedLiteralSuffix { .. } => "MismatchedLiteralSuffix",
            ErrorImpl::LiteralOutOfRange { .. } => "LiteralOutOfRange",
            ErrorImpl::UnterminatedComment => "UnterminatedComment",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::ExpectedToken { .. } => "ExpectedToken",
            ErrorImpl::UnexpectedTokenDetailed { .. } => "UnexpectedTokenDetailed",
            ErrorImpl::ExpectedDeclaration { .. } => "ExpectedDeclaration",
            ErrorImpl::ExpectedTypename { .. } => "ExpectedTypename",
            ErrorImpl::UnclosedParenthesis => "UnclosedParenthesis",
            ErrorImpl::UnclosedScope => "UnclosedScope",
            ErrorImpl::NestingTooDeep { .. } => "NestingTooDeep",
            ErrorImpl::VariableAlreadyDeclared { .. } => "VariableAlreadyDeclared",
            ErrorImpl::VariableNotDeclared { .. } => "VariableNotDeclared",
            ErrorImpl::VoidVariable { .. } => "VoidVariable",
            ErrorImpl::DuplicateParameter { .. } => "DuplicateParameter",
            ErrorImpl::FunctionAlreadyDeclared { .. } => "FunctionAlreadyDeclared",
            ErrorImpl::FunctionNotDeclared { .. } => "FunctionNotDeclared",
            ErrorImpl::NameIsFunction { .. } => "NameIsFunction",
            ErrorImpl::NameIsVariable { .. } => "NameIsVariable",
            ErrorImpl::UnexpectedArguments { .. } => "UnexpectedArguments",
            ErrorImpl::MissingArguments { .. } => "MissingArguments",
            ErrorImpl::ArgumentTypeMatchError { .. } => "ArgumentTypeMatchError",
            ErrorImpl::NoMatchingOverload { .. } => "NoMatchingOverload",
            ErrorImpl::AmbiguousCall { .. } => "AmbiguousCall",
            ErrorImpl::TypeMatchError { .. } => "TypeMatchError",
            ErrorImpl::InvalidConversion { .. } => "InvalidConversion",
            ErrorImpl::UnsupportedOperator { .. } => "UnsupportedOperator",
            ErrorImpl::NotAnLvalue => "NotAnLvalue",
            ErrorImpl::WriteToConst { .. } => "WriteToConst",
            ErrorImpl::ConditionNotBool { .. } => "ConditionNotBool",
            ErrorImpl::MissingReturnValue { .. } => "MissingReturnValue",
            ErrorImpl::UnexpectedReturnValue { .. } => "UnexpectedReturnValue",
            ErrorImpl::ExpectedExplicitValue => "ExpectedExplicitValue",
            ErrorImpl::UnusedExpressionResult => "UnusedExpressionResult",
            ErrorImpl::UselessConversion { .. } => "UselessConversion",
            ErrorImpl::ImplicitConversion { .. } => "ImplicitConversion",
            ErrorImpl::LiteralTruncated { .. } => "LiteralTruncated",
            ErrorImpl::NegateUnsigned { .. } => "NegateUnsigned",
            ErrorImpl::MissingReturn { .. } => "MissingReturn",
            ErrorImpl::PreviousDeclaration { .. } => "PreviousDeclaration",
            ErrorImpl::CandidateOverload { .. } => "CandidateOverload",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match self {
            ErrorImpl::ExpectedToken { expected, .. } if expected == "';'" => {
                ErrorTip::Suggestion(String::from("did you miss a semicolon?"))
            }
            ErrorImpl::LiteralOutOfRange { type_, .. } => ErrorTip::Suggestion(format!(
                "use a wider suffix than `{}`",
                type_
            )),
            ErrorImpl::InvalidLiteralSuffix { .. } => ErrorTip::Suggestion(String::from(
                "valid suffixes are u8, u16, u32, u64, u128, i8, i16, i32, i64, i128, f32 and f64",
            )),
            ErrorImpl::VariableNotDeclared { variable } => ErrorTip::Suggestion(format!(
                "declare `{}` with `var {}: <type> = <value>;` before using it",
                variable, variable
            )),
            ErrorImpl::UnexpectedArguments { expected, received, .. }
            | ErrorImpl::MissingArguments { expected, received, .. } => ErrorTip::Suggestion(
                format!("Expected {} arguments, received {}", expected, received),
            ),
            ErrorImpl::InvalidConversion { .. } => ErrorTip::Suggestion(String::from(
                "only built-in scalars convert to each other, and pointers to pointers",
            )),
            ErrorImpl::WriteToConst { variable } => ErrorTip::Suggestion(format!(
                "remove `const` from the type of `{}`",
                variable
            )),
            ErrorImpl::ImplicitConversion { to, .. } => ErrorTip::Suggestion(format!(
                "write `as {}` to make the conversion explicit",
                to
            )),
            ErrorImpl::LiteralTruncated { type_, .. } => ErrorTip::Suggestion(format!(
                "write `as {}` if the truncated value is intended",
                type_
            )),
            ErrorImpl::ExpectedExplicitValue => ErrorTip::Suggestion(String::from(
                "Expected explicit value when no type is given",
            )),
            _ => ErrorTip::None,
        }
    }
}
