//! Parser implementation for building the expression tree.
//!
//! This module contains the main Parser struct, its token handling and the
//! semantic state shared by the parsing functions: the local variable table,
//! the global variable and function tables, and the function whose body is
//! being parsed.
//!
//! Expressions are parsed with operator precedence climbing, statements and
//! declarations through handler lookup tables keyed by their first token.
//! Semantic checks run while parsing, every node is allocated in the
//! [`Context`] the parser owns.

use std::collections::HashMap;

use log::{debug, info};
use rustc_hash::FxHashMap;

use crate::{
    ast::{
        ast::{Expr, ExprKind},
        context::{Context, ExprId, TypeId},
    },
    errors::{
        errors::{Diagnostic, ErrorImpl},
        reporter::Reporter,
    },
    lexer::{
        lexer::Lexer,
        tokens::{Token, TokenKind},
    },
    Span,
};

use super::{
    lookups::{create_token_lookups, DeclLookup, DeclHandler, NUDHandler, NUDLookup, StmtHandler, StmtLookup},
    recovery::Recovery,
    stmt::parse_declaration,
};

/// A syntax error. It has already been handed to the reporter when this is
/// returned, the caller only has to recover.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyntaxError;

pub type ParseResult<T> = Result<T, SyntaxError>;

/// Deepest nesting of expressions, statements and type names accepted.
pub const MAX_NESTING_DEPTH: usize = 128;

/// A variable of the local table. Its slot is its index in the table.
#[derive(Debug, Clone)]
pub struct Local {
    pub name: String,
    pub ty: TypeId,
    pub span: Span,
}

/// Resolved variable: its type and its slot (or `GLOBAL_ID`).
#[derive(Debug, Clone, Copy)]
pub struct Variable {
    pub ty: TypeId,
    pub local_id: u64,
}

/// The main parser structure that maintains parsing state.
pub struct Parser<'r> {
    lexer: Lexer,
    current: Token,
    /// Lexical error carried by `current` when it is an Error token
    current_error: Option<ErrorImpl>,
    previous_span: Span,
    /// Number of tokens consumed so far
    consumed: usize,
    reporter: &'r mut dyn Reporter,

    pub ctx: Context,
    pub error_count: u32,
    pub warn_count: u32,
    /// Top-level expressions, in source order
    pub result: Vec<ExprId>,

    locals: Vec<Local>,
    /// Index of the first local of the innermost scope
    scope_start: usize,
    global_vars: FxHashMap<String, ExprId>,
    global_fns: FxHashMap<String, Vec<ExprId>>,
    /// Function definition whose body is being parsed
    current_fn: Option<ExprId>,
    /// Current nesting level, see `nested`
    depth: usize,

    stmt_lookup: StmtLookup,
    decl_lookup: DeclLookup,
    nud_lookup: NUDLookup,
}

impl<'r> Parser<'r> {
    pub fn new(source: &str, reporter: &'r mut dyn Reporter) -> Self {
        let mut lexer = Lexer::new(source);
        let current = lexer.next_token();
        let current_error = if current.is(TokenKind::Error) {
            lexer.take_error()
        } else {
            None
        };

        let mut parser = Parser {
            lexer,
            previous_span: current.span.clone(),
            current,
            current_error,
            consumed: 0,
            reporter,
            ctx: Context::new(),
            error_count: 0,
            warn_count: 0,
            result: vec![],
            locals: vec![],
            scope_start: 0,
            global_vars: FxHashMap::default(),
            global_fns: FxHashMap::default(),
            current_fn: None,
            depth: 0,
            stmt_lookup: HashMap::new(),
            decl_lookup: HashMap::new(),
            nud_lookup: HashMap::new(),
        };
        create_token_lookups(&mut parser);
        parser
    }

    /// Returns the current token without advancing.
    pub fn current_token(&self) -> &Token {
        &self.current
    }

    /// Returns the kind of the current token.
    pub fn current_token_kind(&self) -> TokenKind {
        self.current.kind
    }

    /// Span of the last consumed token.
    pub fn previous_span(&self) -> &Span {
        &self.previous_span
    }

    pub fn consumed(&self) -> usize {
        self.consumed
    }

    pub fn at_eof(&self) -> bool {
        self.current.is(TokenKind::EOF)
    }

    /// Advances to the next token and returns the consumed one.
    ///
    /// Consuming an Error token reports the lexical error it carries.
    pub fn advance(&mut self) -> Token {
        let next = self.lexer.next_token();
        let next_error = if next.is(TokenKind::Error) {
            self.lexer.take_error()
        } else {
            None
        };

        let token = std::mem::replace(&mut self.current, next);
        let error = std::mem::replace(&mut self.current_error, next_error);
        if let Some(error) = error {
            self.error(error, token.span.clone());
        }

        self.previous_span = token.span.clone();
        self.consumed += 1;
        token
    }

    /// Consumes the current token when it is of the given kind.
    pub fn accept(&mut self, kind: TokenKind) -> bool {
        if self.current.is(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Expects a token of the specified kind. `expected` describes it in the
    /// diagnostic (`"';'"`, `"an identifier"`).
    pub fn expect(&mut self, kind: TokenKind, expected: &str) -> ParseResult<Token> {
        if self.current.is(kind) {
            return Ok(self.advance());
        }

        if self.current.is(TokenKind::Error) {
            // The lexical error is all there is to say
            self.advance();
        } else {
            let token = self.current.lexeme.clone();
            let span = self.current.span.clone();
            self.error(
                ErrorImpl::ExpectedToken {
                    expected: String::from(expected),
                    token,
                },
                span,
            );
        }
        Err(SyntaxError)
    }

    /// Expects the `>` closing a `PTR<...>`, splitting `>>`, `>=` and `>>=`.
    pub fn expect_closing_angle(&mut self) -> ParseResult<()> {
        let rest = match self.current.kind {
            TokenKind::Greater => {
                self.advance();
                return Ok(());
            }
            TokenKind::RightShift => (TokenKind::Greater, ">"),
            TokenKind::GreaterEquals => (TokenKind::Assignment, "="),
            TokenKind::RightShiftEquals => (TokenKind::GreaterEquals, ">="),
            _ => return self.expect(TokenKind::Greater, "'>'").map(|_| ()),
        };

        self.current.kind = rest.0;
        self.current.lexeme = String::from(rest.1);
        self.current.span.start.column += 1;
        self.previous_span = self.current.span.clone();
        Ok(())
    }

    pub fn error(&mut self, kind: ErrorImpl, span: Span) {
        self.error_count += 1;
        debug!("error: {}", kind);
        self.reporter.report(&Diagnostic::error(kind, span));
    }

    pub fn warning(&mut self, kind: ErrorImpl, span: Span) {
        self.warn_count += 1;
        debug!("warning: {}", kind);
        self.reporter.report(&Diagnostic::warning(kind, span));
    }

    pub fn message(&mut self, kind: ErrorImpl, span: Span) {
        self.reporter.report(&Diagnostic::message(kind, span));
    }

    /// Allocates the error sentinel.
    pub fn error_expr(&mut self, span: Span) -> ExprId {
        let ty = self.ctx.create_error();
        self.ctx.add_expr(Expr::new(ExprKind::Error, ty, span))
    }

    pub fn get_stmt_handler(&self, kind: TokenKind) -> Option<StmtHandler> {
        self.stmt_lookup.get(&kind).copied()
    }

    pub fn get_decl_handler(&self, kind: TokenKind) -> Option<DeclHandler> {
        self.decl_lookup.get(&kind).copied()
    }

    pub fn get_nud_handler(&self, kind: TokenKind) -> Option<NUDHandler> {
        self.nud_lookup.get(&kind).copied()
    }

    pub fn stmt(&mut self, kind: TokenKind, stmt_fn: StmtHandler) {
        self.stmt_lookup.insert(kind, stmt_fn);
    }

    pub fn decl(&mut self, kind: TokenKind, decl_fn: DeclHandler) {
        self.decl_lookup.insert(kind, decl_fn);
    }

    pub fn nud(&mut self, kind: TokenKind, nud_fn: NUDHandler) {
        self.nud_lookup.insert(kind, nud_fn);
    }

    /// Skips tokens according to `recovery`. See [`Recovery`].
    pub fn recover(&mut self, recovery: Recovery) {
        debug!("recovering ({:?}) at {:?}", recovery, self.current.lexeme);
        recovery.apply(self);
    }

    // Variables

    /// Runs `f` in a new local scope: locals declared inside are dropped
    /// on exit.
    pub fn with_local_scope<T>(&mut self, f: impl FnOnce(&mut Parser<'r>) -> T) -> T {
        let saved_start = self.scope_start;
        let saved_len = self.locals.len();
        self.scope_start = saved_len;

        let result = f(self);

        self.locals.truncate(saved_len);
        self.scope_start = saved_start;
        result
    }

    /// Runs `f` one nesting level deeper. Past `MAX_NESTING_DEPTH` levels
    /// the error is reported and `f` is not run.
    pub fn nested<T>(&mut self, f: impl FnOnce(&mut Parser<'r>) -> ParseResult<T>) -> ParseResult<T> {
        if self.depth >= MAX_NESTING_DEPTH {
            let span = self.current.span.clone();
            self.error(ErrorImpl::NestingTooDeep { limit: MAX_NESTING_DEPTH }, span);
            return Err(SyntaxError);
        }

        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    pub fn is_global_scope(&self) -> bool {
        self.current_fn.is_none()
    }

    /// Adds a local to the innermost scope and returns its slot.
    pub fn push_local(&mut self, name: &str, ty: TypeId, span: Span) -> u64 {
        self.locals.push(Local {
            name: String::from(name),
            ty,
            span,
        });
        (self.locals.len() - 1) as u64
    }

    /// Local of the innermost scope named `name`.
    pub fn find_local_in_scope(&self, name: &str) -> Option<&Local> {
        self.locals[self.scope_start..]
            .iter()
            .rev()
            .find(|local| local.name == name)
    }

    /// Resolves `name`: locals first, most recent first, then globals.
    pub fn find_variable(&self, name: &str) -> Option<Variable> {
        if let Some((index, local)) = self
            .locals
            .iter()
            .enumerate()
            .rev()
            .find(|(_, local)| local.name == name)
        {
            return Some(Variable {
                ty: local.ty,
                local_id: index as u64,
            });
        }

        self.global_vars.get(name).map(|decl| Variable {
            ty: self.ctx.get_expr(*decl).ty,
            local_id: crate::ast::ast::GLOBAL_ID,
        })
    }

    pub fn find_global_var(&self, name: &str) -> Option<ExprId> {
        self.global_vars.get(name).copied()
    }

    pub fn add_global_var(&mut self, name: &str, decl: ExprId) {
        debug!("global variable {:?}", name);
        self.global_vars.insert(String::from(name), decl);
    }

    // Functions

    pub fn find_overloads(&self, name: &str) -> Option<&Vec<ExprId>> {
        self.global_fns.get(name)
    }

    pub fn add_overload(&mut self, name: &str, def: ExprId) {
        debug!("function {:?}: {}", name, self.ctx.type_name(self.ctx.get_expr(def).ty));
        self.global_fns.entry(String::from(name)).or_default().push(def);
    }

    pub fn current_fn(&self) -> Option<ExprId> {
        self.current_fn
    }

    /// Runs `f` with `def` as the function being parsed.
    pub fn with_current_fn<T>(&mut self, def: ExprId, f: impl FnOnce(&mut Parser<'r>) -> T) -> T {
        let saved = self.current_fn.replace(def);
        let result = f(self);
        self.current_fn = saved;
        result
    }

    /// Parses declarations until the end of the input.
    pub fn parse_program(&mut self) {
        while !self.at_eof() {
            let before = self.consumed;
            let expr = parse_declaration(self);
            // A definition completing a prototype returns the prototype itself
            if let Some(expr) = expr.filter(|expr| !self.result.contains(expr)) {
                self.result.push(expr);
            }
            if self.consumed == before {
                self.advance();
            }
        }

        info!(
            "parsed {} declarations: {} errors, {} warnings",
            self.result.len(),
            self.error_count,
            self.warn_count
        );
    }
}

/// The result of a successful parse: the top-level expressions, in source
/// order, and the context owning every node.
#[derive(Debug)]
pub struct Ast {
    pub expressions: Vec<ExprId>,
    pub ctx: Context,
}

impl Ast {
    /// S-expression dump of the whole program, one declaration per line.
    pub fn dump(&self) -> String {
        self.ctx.dump_program(&self.expressions)
    }
}

/// Parses `source` and returns the parser with everything it produced, even
/// when errors were found.
pub fn parse<'r>(source: &str, reporter: &'r mut dyn Reporter) -> Parser<'r> {
    let mut parser = Parser::new(source, reporter);
    parser.parse_program();
    parser
}

/// Parses `source` into an [`Ast`].
///
/// Every diagnostic goes to `reporter`. Returns the number of errors when
/// there was at least one.
pub fn create_ast(source: &str, reporter: &mut dyn Reporter) -> Result<Ast, u32> {
    let parser = parse(source, reporter);

    if parser.error_count > 0 {
        return Err(parser.error_count);
    }

    Ok(Ast {
        expressions: parser.result,
        ctx: parser.ctx,
    })
}
