//! Panic-mode error recovery.
//!
//! After a syntax error the parser skips tokens until it reaches a point from
//! which parsing can resume. Every skipped Error token still reports its
//! lexical error.

use crate::lexer::tokens::TokenKind;

use super::parser::Parser;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recovery {
    /// Skip to `;` (consumed) or EOF. Stops early before a token starting a
    /// statement or a declaration, which is left for the next parse.
    Semicolon,
    /// Skip to `;`, `{`, `:` or EOF, then skip the function body or the `;`.
    FnDecl,
    /// Skip to `)` (consumed), `;` or EOF.
    RightParen,
    /// Skip to the next `var`, `fn`, `extern` or EOF.
    Declaration,
}

/// Tokens starting a statement or a declaration.
const SYNC_TOKENS: [TokenKind; 6] = [
    TokenKind::Var,
    TokenKind::Fn,
    TokenKind::Extern,
    TokenKind::If,
    TokenKind::Return,
    TokenKind::CloseCurly,
];

impl Recovery {
    pub fn apply(self, parser: &mut Parser) {
        match self {
            Recovery::Semicolon => panic_consume_semicolon(parser),
            Recovery::FnDecl => panic_consume_fn_decl(parser),
            Recovery::RightParen => panic_consume_rparen(parser),
            Recovery::Declaration => panic_consume_declaration(parser),
        }
    }
}

fn panic_consume_semicolon(parser: &mut Parser) {
    loop {
        match parser.current_token_kind() {
            TokenKind::EOF => return,
            TokenKind::Semicolon => {
                parser.advance();
                return;
            }
            kind if SYNC_TOKENS.contains(&kind) => return,
            _ => {
                parser.advance();
            }
        }
    }
}

fn panic_consume_fn_decl(parser: &mut Parser) {
    while !matches!(
        parser.current_token_kind(),
        TokenKind::Semicolon | TokenKind::OpenCurly | TokenKind::Colon | TokenKind::EOF
    ) {
        parser.advance();
    }

    match parser.current_token_kind() {
        TokenKind::OpenCurly => skip_balanced_braces(parser),
        TokenKind::Colon => {
            parser.advance();
            panic_consume_semicolon(parser);
        }
        TokenKind::Semicolon => {
            parser.advance();
        }
        _ => {}
    }
}

fn panic_consume_rparen(parser: &mut Parser) {
    loop {
        match parser.current_token_kind() {
            TokenKind::EOF | TokenKind::Semicolon => return,
            TokenKind::CloseParen => {
                parser.advance();
                return;
            }
            _ => {
                parser.advance();
            }
        }
    }
}

fn panic_consume_declaration(parser: &mut Parser) {
    while !matches!(
        parser.current_token_kind(),
        TokenKind::Var | TokenKind::Fn | TokenKind::Extern | TokenKind::EOF
    ) {
        parser.advance();
    }
}

/// Skips from `{` to its matching `}`, both included.
fn skip_balanced_braces(parser: &mut Parser) {
    let mut depth = 0usize;
    loop {
        match parser.current_token_kind() {
            TokenKind::EOF => return,
            TokenKind::OpenCurly => depth += 1,
            TokenKind::CloseCurly => {
                depth -= 1;
                if depth == 0 {
                    parser.advance();
                    return;
                }
            }
            _ => {}
        }
        parser.advance();
    }
}
