use serde::Serialize;

use crate::lexical::lexer::{Lexer, TokenKind};

/// A piece of source text outside the AST (a comment or a preprocessor
/// directive) and the line it starts on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceRemark {
    pub text: String,
    pub line: u32,
}

/// All line and block comments, in source order.
pub fn comments(source: &str) -> Vec<SourceRemark> {
    Lexer::new(source)
        .filter(|lexeme| lexeme.kind.is_some_and(TokenKind::is_comment))
        .map(|lexeme| SourceRemark {
            text: lexeme.text.to_string(),
            line: lexeme.line,
        })
        .collect()
}

/// All preprocessor directives, in source order.
///
/// A directive must be the first token on its line; only whitespace and
/// block comments may precede the `#`.
pub fn preprocessor_statements(source: &str) -> Vec<SourceRemark> {
    let mut statements = Vec::new();
    let mut at_line_start = true;

    for lexeme in Lexer::new(source) {
        match lexeme.kind {
            Some(TokenKind::Newline) => at_line_start = true,
            Some(TokenKind::Whitespace | TokenKind::BlockComment) => {},
            Some(TokenKind::Directive) if at_line_start => {
                statements.push(SourceRemark {
                    text: lexeme.text.trim_end().to_string(),
                    line: lexeme.line,
                });
                at_line_start = false;
            },
            _ => at_line_start = false,
        }
    }

    statements
}

#[cfg(test)]
#[path = "../../tests/src/lexical/listing_tests.rs"]
mod tests;
