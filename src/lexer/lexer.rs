use std::rc::Rc;

use lazy_static::lazy_static;
use log::trace;
use regex::Regex;

use crate::{errors::errors::ErrorImpl, Position, Span, MK_DEFAULT_HANDLER, MK_TOKEN};

use super::tokens::{Token, TokenKind, RESERVED_LOOKUP};

/// Handles one pattern match. Returns `None` for skipped text.
pub type RegexHandler = fn(&mut Lexer, &str) -> Option<Token>;

pub struct RegexPattern {
    regex: Regex,
    handler: RegexHandler,
}

lazy_static! {
    // Tried in order: comments before `/`, and longer operators before their prefixes.
    static ref PATTERNS: Vec<RegexPattern> = vec![
        RegexPattern { regex: Regex::new("^\\s+").unwrap(), handler: skip_handler },
        RegexPattern { regex: Regex::new("^//[^\n]*").unwrap(), handler: skip_handler },
        RegexPattern { regex: Regex::new("^/\\*(?s:.*?)\\*/").unwrap(), handler: skip_handler },
        RegexPattern { regex: Regex::new("^/\\*(?s:.*)").unwrap(), handler: unterminated_comment_handler },
        RegexPattern { regex: Regex::new("^[a-zA-Z_][a-zA-Z0-9_]*").unwrap(), handler: symbol_handler },
        RegexPattern {
            regex: Regex::new("^(?:0x[0-9a-fA-F]+|0b[01]+|0o[0-7]+|[0-9]+(?:\\.[0-9]+)?(?:[eE][+-]?[0-9]+)?)[a-zA-Z0-9_]*").unwrap(),
            handler: number_handler,
        },
        RegexPattern { regex: Regex::new("^<<=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::LeftShiftEquals) },
        RegexPattern { regex: Regex::new("^>>=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::RightShiftEquals) },
        RegexPattern { regex: Regex::new("^==").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Equals) },
        RegexPattern { regex: Regex::new("^!=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::NotEquals) },
        RegexPattern { regex: Regex::new("^<=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::LessEquals) },
        RegexPattern { regex: Regex::new("^>=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::GreaterEquals) },
        RegexPattern { regex: Regex::new("^<<").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::LeftShift) },
        RegexPattern { regex: Regex::new("^>>").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::RightShift) },
        RegexPattern { regex: Regex::new("^\\|\\|").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Or) },
        RegexPattern { regex: Regex::new("^&&").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::And) },
        RegexPattern { regex: Regex::new("^\\+\\+").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::PlusPlus) },
        RegexPattern { regex: Regex::new("^--").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::MinusMinus) },
        RegexPattern { regex: Regex::new("^->").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Arrow) },
        RegexPattern { regex: Regex::new("^\\+=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::PlusEquals) },
        RegexPattern { regex: Regex::new("^-=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::MinusEquals) },
        RegexPattern { regex: Regex::new("^\\*=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::StarEquals) },
        RegexPattern { regex: Regex::new("^/=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::SlashEquals) },
        RegexPattern { regex: Regex::new("^%=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::PercentEquals) },
        RegexPattern { regex: Regex::new("^&=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::AmpersandEquals) },
        RegexPattern { regex: Regex::new("^\\|=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::PipeEquals) },
        RegexPattern { regex: Regex::new("^\\^=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::CaretEquals) },
        RegexPattern { regex: Regex::new("^\\(").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::OpenParen) },
        RegexPattern { regex: Regex::new("^\\)").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::CloseParen) },
        RegexPattern { regex: Regex::new("^\\{").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::OpenCurly) },
        RegexPattern { regex: Regex::new("^\\}").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::CloseCurly) },
        RegexPattern { regex: Regex::new("^,").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Comma) },
        RegexPattern { regex: Regex::new("^;").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Semicolon) },
        RegexPattern { regex: Regex::new("^:").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Colon) },
        RegexPattern { regex: Regex::new("^=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Assignment) },
        RegexPattern { regex: Regex::new("^!").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Not) },
        RegexPattern { regex: Regex::new("^<").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Less) },
        RegexPattern { regex: Regex::new("^>").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Greater) },
        RegexPattern { regex: Regex::new("^\\+").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Plus) },
        RegexPattern { regex: Regex::new("^-").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Dash) },
        RegexPattern { regex: Regex::new("^\\*").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Star) },
        RegexPattern { regex: Regex::new("^/").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Slash) },
        RegexPattern { regex: Regex::new("^%").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Percent) },
        RegexPattern { regex: Regex::new("^&").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Ampersand) },
        RegexPattern { regex: Regex::new("^\\|").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Pipe) },
        RegexPattern { regex: Regex::new("^\\^").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Caret) },
        RegexPattern { regex: Regex::new("^~").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Tilde) },
    ];

    static ref NUMBER_PARTS: Regex = Regex::new(
        "^(?P<body>0x(?P<hex>[0-9a-fA-F]+)|0b(?P<bin>[01]+)|0o(?P<oct>[0-7]+)|(?P<dec>[0-9]+)(?P<frac>\\.[0-9]+)?(?P<exp>[eE][+-]?[0-9]+)?)(?P<suffix>[a-zA-Z0-9_]*)$"
    ).unwrap();
}

/// Streaming tokenizer over one source buffer.
///
/// The buffer ends at the end of the string or at its first NUL character.
pub struct Lexer {
    source: String,
    pos: usize,
    line: u32,
    line_start: usize,
    line_text: Rc<String>,
    last_error: Option<ErrorImpl>,
}

impl Lexer {
    pub fn new(source: &str) -> Lexer {
        let source = match source.find('\0') {
            Some(nul) => &source[..nul],
            None => source,
        };

        let mut lexer = Lexer {
            source: source.to_string(),
            pos: 0,
            line: 1,
            line_start: 0,
            line_text: Rc::new(String::new()),
            last_error: None,
        };
        lexer.line_text = lexer.read_line_text(0);
        lexer
    }

    /// Scans and returns the next token. Once the input is exhausted every
    /// call returns an EOF token.
    pub fn next_token(&mut self) -> Token {
        loop {
            if self.at_eof() {
                let span = self.span_of(0);
                return MK_TOKEN!(TokenKind::EOF, String::from("EOF"), 0, span);
            }

            let mut handled = None;
            for pattern in PATTERNS.iter() {
                if let Some(found) = pattern.regex.find(self.remainder()) {
                    let matched = found.as_str().to_string();
                    let token = (pattern.handler)(self, &matched);
                    self.advance_n(matched.len());
                    handled = Some(token);
                    break;
                }
            }

            match handled {
                Some(Some(token)) => {
                    trace!("token {:?} {:?}", token.kind, token.lexeme);
                    return token;
                }
                Some(None) => continue,
                None => {
                    let offending = self.remainder().chars().next().unwrap_or('\0').to_string();
                    let token = error_token(
                        self,
                        &offending,
                        ErrorImpl::UnrecognisedToken { token: offending.clone() },
                    );
                    self.advance_n(offending.len());
                    return token;
                }
            }
        }
    }

    /// Returns the reason of the most recent Error token, if not taken yet.
    pub fn take_error(&mut self) -> Option<ErrorImpl> {
        self.last_error.take()
    }

    /// Number of the line the cursor is on (1-based).
    pub fn line_number(&self) -> u32 {
        self.line
    }

    /// Full text of the line the cursor is on.
    pub fn line_text(&self) -> &str {
        &self.line_text
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    pub fn remainder(&self) -> &str {
        &self.source[self.pos..]
    }

    /// Span of the next `len` bytes from the cursor.
    pub fn span_of(&self, len: usize) -> Span {
        let column = (self.pos - self.line_start) as u32;
        Span {
            start: Position {
                line: self.line,
                column,
                line_text: Rc::clone(&self.line_text),
            },
            end: Position {
                line: self.line,
                column: column + len as u32,
                line_text: Rc::clone(&self.line_text),
            },
        }
    }

    fn advance_n(&mut self, n: usize) {
        let end = (self.pos + n).min(self.source.len());
        while self.pos < end {
            if self.source.as_bytes()[self.pos] == b'\n' {
                self.line += 1;
                self.line_start = self.pos + 1;
                self.line_text = self.read_line_text(self.line_start);
            }
            self.pos += 1;
        }
    }

    fn read_line_text(&self, start: usize) -> Rc<String> {
        let rest = &self.source[start..];
        let end = rest.find('\n').unwrap_or(rest.len());
        Rc::new(rest[..end].trim_end_matches('\r').to_string())
    }
}

fn error_token(lexer: &mut Lexer, matched: &str, error: ErrorImpl) -> Token {
    lexer.last_error = Some(error);
    let span = lexer.span_of(matched.len());
    MK_TOKEN!(TokenKind::Error, String::from(matched), 0, span)
}

fn skip_handler(_lexer: &mut Lexer, _matched: &str) -> Option<Token> {
    None
}

fn unterminated_comment_handler(lexer: &mut Lexer, matched: &str) -> Option<Token> {
    // Only the opening `/*` is shown; the rest of the input is swallowed.
    let mut token = error_token(lexer, "/*", ErrorImpl::UnterminatedComment);
    token.lexeme = String::from(matched);
    Some(token)
}

fn symbol_handler(lexer: &mut Lexer, matched: &str) -> Option<Token> {
    let span = lexer.span_of(matched.len());

    if let Some(kind) = RESERVED_LOOKUP.get(matched) {
        let value = if matched == "true" { 1 } else { 0 };
        Some(MK_TOKEN!(*kind, String::from(matched), value, span))
    } else {
        Some(MK_TOKEN!(TokenKind::Identifier, String::from(matched), 0, span))
    }
}

/// Bit width and signedness of integer literal suffixes.
fn integer_suffix(suffix: &str) -> Option<(TokenKind, u32, bool)> {
    match suffix {
        "u8" => Some((TokenKind::U8Literal, 8, false)),
        "u16" => Some((TokenKind::U16Literal, 16, false)),
        "u32" => Some((TokenKind::U32Literal, 32, false)),
        "u64" => Some((TokenKind::U64Literal, 64, false)),
        "u128" => Some((TokenKind::U128Literal, 128, false)),
        "i8" => Some((TokenKind::I8Literal, 8, true)),
        "i16" => Some((TokenKind::I16Literal, 16, true)),
        "i32" => Some((TokenKind::I32Literal, 32, true)),
        "i64" | "" => Some((TokenKind::I64Literal, 64, true)),
        "i128" => Some((TokenKind::I128Literal, 128, true)),
        _ => None,
    }
}

fn integer_fits(value: u64, bits: u32, signed: bool) -> bool {
    let bits = bits.min(64);
    let max = match (bits, signed) {
        (64, false) => u64::MAX,
        (bits, false) => (1u64 << bits) - 1,
        (bits, true) => (1u64 << (bits - 1)) - 1,
    };
    value <= max
}

fn number_handler(lexer: &mut Lexer, matched: &str) -> Option<Token> {
    let Some(parts) = NUMBER_PARTS.captures(matched) else {
        return Some(error_token(
            lexer,
            matched,
            ErrorImpl::UnrecognisedToken { token: String::from(matched) },
        ));
    };

    let suffix = parts.name("suffix").map_or("", |m| m.as_str());
    let is_float_shape = parts.name("frac").is_some() || parts.name("exp").is_some();
    let based = parts
        .name("hex")
        .map(|m| (m.as_str(), 16))
        .or_else(|| parts.name("bin").map(|m| (m.as_str(), 2)))
        .or_else(|| parts.name("oct").map(|m| (m.as_str(), 8)));

    if suffix == "f32" || suffix == "f64" || (suffix.is_empty() && is_float_shape) {
        if based.is_some() {
            return Some(error_token(
                lexer,
                matched,
                ErrorImpl::MismatchedLiteralSuffix { token: String::from(matched) },
            ));
        }

        let body = parts.name("body").map_or("", |m| m.as_str());
        let Ok(parsed) = body.parse::<f64>() else {
            return Some(error_token(
                lexer,
                matched,
                ErrorImpl::UnrecognisedToken { token: String::from(matched) },
            ));
        };

        let span = lexer.span_of(matched.len());
        return if suffix == "f32" {
            let bits = (parsed as f32).to_bits() as u64;
            Some(MK_TOKEN!(TokenKind::F32Literal, String::from(matched), bits, span))
        } else {
            Some(MK_TOKEN!(TokenKind::F64Literal, String::from(matched), parsed.to_bits(), span))
        };
    }

    let Some((kind, bits, signed)) = integer_suffix(suffix) else {
        return Some(error_token(
            lexer,
            matched,
            ErrorImpl::InvalidLiteralSuffix { token: String::from(matched) },
        ));
    };

    if is_float_shape {
        return Some(error_token(
            lexer,
            matched,
            ErrorImpl::MismatchedLiteralSuffix { token: String::from(matched) },
        ));
    }

    let (digits, radix) = based.unwrap_or_else(|| (parts.name("dec").map_or("", |m| m.as_str()), 10));
    let type_name = if suffix.is_empty() { "i64" } else { suffix };

    match u64::from_str_radix(digits, radix) {
        Ok(value) if integer_fits(value, bits, signed) => {
            let span = lexer.span_of(matched.len());
            Some(MK_TOKEN!(kind, String::from(matched), value, span))
        }
        _ => Some(error_token(
            lexer,
            matched,
            ErrorImpl::LiteralOutOfRange {
                token: String::from(matched),
                type_: String::from(type_name),
            },
        )),
    }
}

/// Tokenizes the whole buffer, EOF token included.
pub fn tokenize(source: &str) -> Vec<Token> {
    let mut lexer = Lexer::new(source);
    let mut tokens = vec![];

    loop {
        let token = lexer.next_token();
        let is_eof = token.kind == TokenKind::EOF;
        tokens.push(token);
        if is_eof {
            break;
        }
    }

    tokens
}
