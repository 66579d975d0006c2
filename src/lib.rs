#![allow(clippy::module_inception)]

use std::rc::Rc;

pub mod ast;
pub mod config;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;

extern crate regex;

pub use parser::parser::{create_ast, Ast};

/// A location in the source text.
///
/// `line` is 1-based, `column` is a 0-based byte offset into `line_text`,
/// which holds the whole line the position lies on (without its newline).
#[derive(Debug, Clone)]
pub struct Position {
    pub line: u32,
    pub column: u32,
    pub line_text: Rc<String>,
}

impl Position {
    pub fn null() -> Self {
        Position {
            line: 0,
            column: 0,
            line_text: Rc::new(String::from("<null>")),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    pub fn null() -> Self {
        Span {
            start: Position::null(),
            end: Position::null(),
        }
    }

    /// Span covering `self` up to the end of `other`.
    pub fn to(&self, other: &Span) -> Span {
        Span {
            start: self.start.clone(),
            end: other.end.clone(),
        }
    }

    /// Text covered by the span, clamped to the starting line.
    pub fn lexeme(&self) -> &str {
        let text = self.start.line_text.as_str();
        let start = (self.start.column as usize).min(text.len());
        let end = if self.end.line == self.start.line {
            (self.end.column as usize).clamp(start, text.len())
        } else {
            text.len()
        };
        text.get(start..end).unwrap_or("")
    }
}

/// Renders the caret block shown under a diagnostic:
///
/// ```text
///    |
/// 20 | var a: i64 = #;
///    |              ^
/// ```
pub fn render_span(span: &Span) -> String {
    let line_string = span.start.line.to_string();
    let padding = line_string.len() + 2;

    let (line_text_removed, removed_whitespace) =
        remove_starting_whitespace(&span.start.line_text);

    let column = span.start.column as usize;
    let arrows = column.saturating_sub(removed_whitespace);
    let width = span.lexeme().len().max(1);

    let mut out = String::new();
    out.push_str(&format!("{:>padding$}\n", "|"));
    out.push_str(&format!("{} | {}\n", line_string, line_text_removed.trim_end()));
    out.push_str(&format!(
        "{:>padding$} {}{}",
        "|",
        " ".repeat(arrows),
        "^".repeat(width)
    ));
    out
}

fn remove_starting_whitespace(string: &str) -> (String, usize) {
    let mut start = 0;
    for c in string.chars() {
        if c == ' ' || c == '\t' {
            start += 1;
        } else {
            break;
        }
    }

    (String::from(&string[start..]), start)
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::{render_span, Position, Span};

    fn span(text: &str, line: u32, start: u32, end: u32) -> Span {
        let line_text = Rc::new(text.to_string());
        Span {
            start: Position { line, column: start, line_text: Rc::clone(&line_text) },
            end: Position { line, column: end, line_text },
        }
    }

    #[test]
    fn test_span_lexeme() {
        let span = span("var a: i64 = #;", 1, 13, 14);
        assert_eq!(span.lexeme(), "#");
    }

    #[test]
    fn test_render_span_strips_indentation() {
        let span = span("    x = 1;", 20, 4, 5);
        let rendered = render_span(&span);
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines[0], "   |");
        assert_eq!(lines[1], "20 | x = 1;");
        assert_eq!(lines[2], "   | ^");
    }
}
